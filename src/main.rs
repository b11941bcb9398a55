//! cvfolio-config entry point
//!
//! Developer tool for checking a site configuration file and printing the
//! configuration the site would actually render with.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cvfolio_config::config::{load_config_with_hash, ConfigProfile, ConfigSource};
use cvfolio_config::{ConfigError, ConfigResolver, LegacySiteConfig, SiteConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// cvfolio-config: inspect cvfolio site configuration
///
/// Reads `cvfolio.config.json` (or `config.yml` with --legacy) from the
/// current directory unless a path is given.
#[derive(Parser, Debug)]
#[command(name = "cvfolio-config")]
#[command(version)]
#[command(about = "Validate and resolve cvfolio site configuration", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Strictly validate a configuration file, failing on any problem
    Check(SourceArgs),

    /// Print the resolved configuration, falling back to defaults on problems
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Path to the configuration file (JSON, YAML or TOML)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Use the legacy `config.yml` schema
    #[arg(long)]
    legacy: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Check(args) if args.legacy => handle_check::<LegacySiteConfig>(args.path),
        Command::Check(args) => handle_check::<SiteConfig>(args.path),
        Command::Show { source, format } if source.legacy => {
            handle_show::<LegacySiteConfig>(source.path, format)
        }
        Command::Show { source, format } => handle_show::<SiteConfig>(source.path, format),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("warn"),
                1 => EnvFilter::new("cvfolio_config=info,warn"),
                2 => EnvFilter::new("cvfolio_config=debug,info"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn source_for<P: ConfigProfile>(path: Option<PathBuf>) -> ConfigSource {
    match path {
        Some(path) => ConfigSource::file(path),
        None => ConfigSource::conventional::<P>(),
    }
}

/// Handles `check`: strict load, reporting every validation issue
fn handle_check<P: ConfigProfile>(path: Option<PathBuf>) -> anyhow::Result<()> {
    let source = source_for::<P>(path);
    tracing::info!("Checking {} configuration: {}", P::NAME, source.label());

    match load_config_with_hash::<P>(&source) {
        Ok((_, hash)) => {
            println!("✓ {} is valid (sha256: {})", source.label(), hash);
            Ok(())
        }
        Err(ConfigError::Validation { path, errors }) => {
            println!("✗ {} has {} invalid field(s):", path, errors.issues().len());
            println!("{}", errors);
            bail!("configuration is invalid")
        }
        Err(e) => Err(e).with_context(|| format!("failed to check {}", source.label())),
    }
}

/// Handles `show`: resolves with fallback and prints flags plus provenance
fn handle_show<P: ConfigProfile>(
    path: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let resolver = ConfigResolver::<P>::new(source_for::<P>(path));
    let resolved = resolver.resolve();

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&*resolved)?,
        OutputFormat::Yaml => serde_yaml::to_string(&*resolved)?,
    };
    println!("{}", rendered);

    Ok(())
}
