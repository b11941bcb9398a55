use crate::config::profile::ConfigProfile;
use crate::config::validation::{schema_shape, validate};
use crate::ConfigError;
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Syntax of a configuration source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Yaml,
    Toml,
}

impl SourceFormat {
    /// Picks a format from the file extension
    ///
    /// `.json` is JSON, `.toml` is TOML, anything else (including `.yml`,
    /// `.yaml` and no extension) is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => SourceFormat::Json,
            Some("toml") => SourceFormat::Toml,
            _ => SourceFormat::Yaml,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Json => "JSON",
            SourceFormat::Yaml => "YAML",
            SourceFormat::Toml => "TOML",
        };
        f.write_str(name)
    }
}

/// Where raw configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file on disk
    File(PathBuf),

    /// A resource bundled into the binary; `name` carries the extension
    Embedded {
        name: &'static str,
        contents: &'static str,
    },
}

impl ConfigSource {
    /// A file source at `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ConfigSource::File(path.into())
    }

    /// A bundled source, e.g. `ConfigSource::embedded("cvfolio.config.json", include_str!(..))`
    pub fn embedded(name: &'static str, contents: &'static str) -> Self {
        ConfigSource::Embedded { name, contents }
    }

    /// The profile's conventional file in the current working directory
    pub fn conventional<P: ConfigProfile>() -> Self {
        let path = std::env::current_dir()
            .map(|dir| dir.join(P::FILE_NAME))
            .unwrap_or_else(|_| PathBuf::from(P::FILE_NAME));
        ConfigSource::File(path)
    }

    /// Label used in logs and error messages
    pub fn label(&self) -> String {
        match self {
            ConfigSource::File(path) => path.display().to_string(),
            ConfigSource::Embedded { name, .. } => format!("embedded:{}", name),
        }
    }

    /// Syntax the source is parsed with
    pub fn format(&self) -> SourceFormat {
        match self {
            ConfigSource::File(path) => SourceFormat::from_path(path),
            ConfigSource::Embedded { name, .. } => SourceFormat::from_path(Path::new(name)),
        }
    }

    /// Reads the raw text of the source
    pub fn read(&self) -> Result<String, ConfigError> {
        match self {
            ConfigSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ConfigError::NotFound(self.label())
                } else {
                    ConfigError::Io {
                        path: self.label(),
                        source: e,
                    }
                }
            }),
            ConfigSource::Embedded { contents, .. } => Ok((*contents).to_string()),
        }
    }
}

/// Parses raw text into a generic document
///
/// A YAML source with no content (blank or only comments) is an empty
/// mapping. An explicit YAML `null`/`~` document stays `null` and fails
/// validation like any other non-object root. YAML merge keys (`<<: *anchor`)
/// are expanded before conversion.
///
/// Mapping keys must be strings anywhere in the document, including under
/// keys the schema ignores: a YAML complex key such as `? [a, b]` fails the
/// whole parse rather than being skipped as unknown.
pub fn parse_document(
    text: &str,
    format: SourceFormat,
    label: &str,
) -> Result<Value, ConfigError> {
    let parse_error = |message: String| ConfigError::Parse {
        path: label.to_string(),
        format,
        message,
    };

    match format {
        SourceFormat::Json => serde_json::from_str(text).map_err(|e| parse_error(e.to_string())),
        SourceFormat::Toml => toml::from_str(text).map_err(|e| parse_error(e.to_string())),
        SourceFormat::Yaml => {
            if is_blank_yaml(text) {
                return Ok(Value::Object(Map::new()));
            }
            let mut document: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            document
                .apply_merge()
                .map_err(|e| parse_error(e.to_string()))?;
            serde_yaml::from_value(document).map_err(|e| parse_error(e.to_string()))
        }
    }
}

/// True when YAML text has nothing but whitespace and comments
fn is_blank_yaml(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// Parses, validates and merges raw text for profile `P`
///
/// # Returns
///
/// * `Ok(P)` - Defaults overlaid with every flag present in the input
/// * `Err(ConfigError)` - The text failed to parse or validate
pub fn load_config_from_str<P: ConfigProfile>(
    text: &str,
    format: SourceFormat,
    label: &str,
) -> Result<P, ConfigError> {
    let document = parse_document(text, format, label)?;

    let shape = schema_shape(&P::defaults())?;
    validate(&document, &shape).map_err(|errors| ConfigError::Validation {
        path: label.to_string(),
        errors,
    })?;

    let raw: P::Raw =
        serde_json::from_value(document).map_err(|e| ConfigError::Deserialize(e.to_string()))?;

    Ok(P::merge(&raw))
}

/// Loads, validates and merges a configuration source for profile `P`
///
/// Unlike the resolver this never falls back to defaults: every failure is
/// returned to the caller.
///
/// # Example
///
/// ```no_run
/// use cvfolio_config::config::{load_config, ConfigSource, SiteConfig};
///
/// let config: SiteConfig = load_config(&ConfigSource::file("cvfolio.config.json")).unwrap();
/// println!("Header enabled: {}", config.layout.header);
/// ```
pub fn load_config<P: ConfigProfile>(source: &ConfigSource) -> Result<P, ConfigError> {
    let text = source.read()?;
    load_config_from_str(&text, source.format(), &source.label())
}

/// Computes a SHA-256 hash of configuration text
///
/// # Returns
///
/// Hex-encoded SHA-256 digest (64 characters)
pub fn compute_config_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Loads a configuration and returns both the config and the hash of its text
pub fn load_config_with_hash<P: ConfigProfile>(
    source: &ConfigSource,
) -> Result<(P, String), ConfigError> {
    let text = source.read()?;
    let config = load_config_from_str(&text, source.format(), &source.label())?;
    Ok((config, compute_config_hash(&text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{
        LegacySiteConfig, SiteConfig, DEFAULT_LEGACY_CONFIG, DEFAULT_SITE_CONFIG,
    };
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn create_temp_config(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SourceFormat::from_path(Path::new("a.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("a.JSON")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("a.yml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("a.yaml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("a.toml")), SourceFormat::Toml);
        assert_eq!(SourceFormat::from_path(Path::new("config")), SourceFormat::Yaml);
    }

    #[test]
    fn test_load_valid_json() {
        let file = create_temp_config(
            r#"{"layout": {"header": false}, "sections": {"writing": {"latestPosts": false}}}"#,
            ".json",
        );
        let config: SiteConfig = load_config(&ConfigSource::file(file.path())).unwrap();

        assert!(!config.layout.header);
        assert!(config.layout.footer);
        assert!(!config.sections.writing.latest_posts);
        assert!(config.sections.writing.author);
    }

    #[test]
    fn test_load_valid_yaml() {
        let content = r#"
sections:
  workExperience: true
  talks: false
elements:
  avatar: false
"#;
        let file = create_temp_config(content, ".yml");
        let config: LegacySiteConfig = load_config(&ConfigSource::file(file.path())).unwrap();

        assert!(!config.sections.talks);
        assert!(config.sections.social_links);
        assert!(!config.elements.avatar);
        assert!(config.elements.footer);
    }

    #[test]
    fn test_load_valid_toml() {
        let content = r#"
[layout]
themeSwitcher = false

[sections.homepage]
speaking = false
"#;
        let file = create_temp_config(content, ".toml");
        let config: SiteConfig = load_config(&ConfigSource::file(file.path())).unwrap();

        assert!(!config.layout.theme_switcher);
        assert!(!config.sections.homepage.speaking);
        assert!(config.sections.homepage.about);
    }

    #[test]
    fn test_load_config_with_missing_path() {
        let result: Result<SiteConfig, _> =
            load_config(&ConfigSource::file("/nonexistent/cvfolio.config.json"));
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_config_with_invalid_json() {
        let file = create_temp_config("{\"layout\": {", ".json");
        let result: Result<SiteConfig, _> = load_config(&ConfigSource::file(file.path()));

        match result.unwrap_err() {
            ConfigError::Parse { format, .. } => assert_eq!(format, SourceFormat::Json),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_with_invalid_yaml() {
        let file = create_temp_config("sections: [unclosed\n  talks: {", ".yml");
        let result: Result<LegacySiteConfig, _> = load_config(&ConfigSource::file(file.path()));
        assert!(matches!(result.unwrap_err(), ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config(r#"{"layout": {"header": "false"}}"#, ".json");
        let result: Result<SiteConfig, _> = load_config(&ConfigSource::file(file.path()));

        match result.unwrap_err() {
            ConfigError::Validation { errors, .. } => {
                assert_eq!(errors.paths(), vec!["layout.header"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_yaml_is_all_defaults() {
        let config: LegacySiteConfig =
            load_config_from_str("", SourceFormat::Yaml, "empty.yml").unwrap();
        assert_eq!(config, DEFAULT_LEGACY_CONFIG);

        let config: LegacySiteConfig =
            load_config_from_str("# nothing here\n", SourceFormat::Yaml, "comments.yml").unwrap();
        assert_eq!(config, DEFAULT_LEGACY_CONFIG);
    }

    #[test]
    fn test_explicit_yaml_null_fails_validation() {
        for text in ["~\n", "null\n", "# header\n~\n"] {
            let result: Result<LegacySiteConfig, _> =
                load_config_from_str(text, SourceFormat::Yaml, "config.yml");

            match result.unwrap_err() {
                ConfigError::Validation { errors, .. } => {
                    assert_eq!(errors.paths(), vec!["root"]);
                    assert_eq!(errors.issues()[0].message, "expected object, received null");
                }
                other => panic!("expected validation error for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_yaml_merge_keys_are_expanded() {
        let text = concat!(
            "base: &b\n",
            "  talks: false\n",
            "  avatar: true\n",
            "sections:\n",
            "  <<: *b\n",
            "  writing: false\n",
        );
        let config: LegacySiteConfig =
            load_config_from_str(text, SourceFormat::Yaml, "config.yml").unwrap();

        assert!(!config.sections.talks);
        assert!(!config.sections.writing);
        assert!(config.sections.social_links);
    }

    #[test]
    fn test_yaml_merge_key_values_are_validated() {
        let text = "base: &b\n  talks: \"no\"\nsections:\n  <<: *b\n";
        let result: Result<LegacySiteConfig, _> =
            load_config_from_str(text, SourceFormat::Yaml, "config.yml");

        match result.unwrap_err() {
            ConfigError::Validation { errors, .. } => {
                assert_eq!(errors.paths(), vec!["sections.talks"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_yaml_complex_key_is_a_parse_error() {
        let text = "? [a, b]\n: 1\nsections:\n  talks: false\n";
        let result: Result<LegacySiteConfig, _> =
            load_config_from_str(text, SourceFormat::Yaml, "config.yml");
        assert!(matches!(result.unwrap_err(), ConfigError::Parse { .. }));
    }

    #[test]
    fn test_empty_json_is_a_parse_error() {
        let result: Result<SiteConfig, _> = load_config_from_str("", SourceFormat::Json, "x.json");
        assert!(matches!(result.unwrap_err(), ConfigError::Parse { .. }));
    }

    #[test]
    fn test_embedded_source() {
        let source =
            ConfigSource::embedded("cvfolio.config.json", r#"{"layout": {"footer": false}}"#);

        assert_eq!(source.format(), SourceFormat::Json);
        assert_eq!(source.label(), "embedded:cvfolio.config.json");

        let config: SiteConfig = load_config(&source).unwrap();
        assert!(!config.layout.footer);
        assert_eq!(config.sections, DEFAULT_SITE_CONFIG.sections);
    }

    #[test]
    fn test_conventional_source_uses_profile_file_name() {
        match ConfigSource::conventional::<SiteConfig>() {
            ConfigSource::File(path) => assert!(path.ends_with("cvfolio.config.json")),
            other => panic!("unexpected source {other:?}"),
        }
        match ConfigSource::conventional::<LegacySiteConfig>() {
            ConfigSource::File(path) => assert!(path.ends_with("config.yml")),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_compute_config_hash() {
        let hash1 = compute_config_hash("test content");
        let hash2 = compute_config_hash("test content");

        // Same content should produce same hash
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 produces 64 hex characters
        assert_ne!(hash1, compute_config_hash("other content"));
    }

    #[test]
    fn test_load_config_with_hash() {
        let content = r#"{"sections": {"homepage": {"contact": false}}}"#;
        let file = create_temp_config(content, ".json");

        let (config, hash): (SiteConfig, String) =
            load_config_with_hash(&ConfigSource::file(file.path())).unwrap();

        assert!(!config.sections.homepage.contact);
        assert_eq!(hash, compute_config_hash(content));
    }
}
