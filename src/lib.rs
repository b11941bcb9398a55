//! cvfolio-config: site configuration for the cvfolio static site
//!
//! This crate reads the user's site flags, validates them against a fixed
//! schema, and overlays them on hard-coded defaults. The result is cached for
//! the life of the process and never fails to produce a complete
//! configuration.

pub mod config;
pub mod resolver;

use thiserror::Error;

/// Configuration-specific errors
///
/// The resolver turns every one of these into a warning plus defaults;
/// only the strict loaders surface them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config source not found: {0}")]
    NotFound(String),

    #[error("Failed to read config source {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} in {path}: {message}")]
    Parse {
        path: String,
        format: config::SourceFormat,
        message: String,
    },

    #[error("Invalid configuration in {path}:\n{errors}")]
    Validation {
        path: String,
        errors: config::ValidationErrors,
    },

    #[error("Failed to convert validated configuration: {0}")]
    Deserialize(String),

    #[error("Invalid schema definition: {0}")]
    Schema(String),
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{ConfigSource, LegacySiteConfig, SiteConfig};
pub use resolver::{resolve, resolve_legacy, ConfigResolver, ResolvedConfig};
