//! Site configuration module
//!
//! This module handles loading, parsing, validating and merging the flag
//! files that decide which parts of the site get rendered. Two independent
//! profiles exist: [`SiteConfig`] (`cvfolio.config.json`) and
//! [`LegacySiteConfig`] (`config.yml`).
//!
//! # Example
//!
//! ```no_run
//! use cvfolio_config::config::{load_config, ConfigSource, SiteConfig};
//!
//! let config: SiteConfig = load_config(&ConfigSource::file("cvfolio.config.json")).unwrap();
//! println!("Theme switcher: {}", config.layout.theme_switcher);
//! ```

mod merge;
mod parser;
mod profile;
mod types;
mod validation;

// Re-export types
pub use types::{
    HomepageSections, LayoutConfig, LegacyElements, LegacySections, LegacySiteConfig,
    RawHomepage, RawLayout, RawLegacyConfig, RawLegacyElements, RawLegacySections, RawSections,
    RawSiteConfig, RawWriting, SectionsConfig, SiteConfig, WritingSections,
    DEFAULT_LEGACY_CONFIG, DEFAULT_SITE_CONFIG,
};

pub use merge::Overlay;
pub use profile::ConfigProfile;
pub use validation::{schema_shape, validate, ValidationErrors, ValidationIssue};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_from_str, load_config_with_hash,
    parse_document, ConfigSource, SourceFormat,
};
