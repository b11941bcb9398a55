//! Configuration profiles
//!
//! A profile ties one flag schema to its defaults, its raw input shape, and
//! the file name it is conventionally read from.

use crate::config::merge::Overlay;
use crate::config::types::{
    LegacySiteConfig, RawLegacyConfig, RawSiteConfig, SiteConfig, DEFAULT_LEGACY_CONFIG,
    DEFAULT_SITE_CONFIG,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A resolvable flag schema
pub trait ConfigProfile: Debug + Clone + PartialEq + Serialize + Send + Sync + 'static {
    /// All-optional input shape
    type Raw: Debug + DeserializeOwned;

    /// Short profile name used in log fields
    const NAME: &'static str;

    /// Conventional file name, relative to the working directory
    const FILE_NAME: &'static str;

    /// Fully-populated defaults
    fn defaults() -> Self;

    /// Overlays validated input onto the defaults
    fn merge(raw: &Self::Raw) -> Self;
}

impl ConfigProfile for SiteConfig {
    type Raw = RawSiteConfig;

    const NAME: &'static str = "site";
    const FILE_NAME: &'static str = "cvfolio.config.json";

    fn defaults() -> Self {
        DEFAULT_SITE_CONFIG
    }

    fn merge(raw: &RawSiteConfig) -> Self {
        DEFAULT_SITE_CONFIG.overlay(Some(raw))
    }
}

impl ConfigProfile for LegacySiteConfig {
    type Raw = RawLegacyConfig;

    const NAME: &'static str = "legacy";
    const FILE_NAME: &'static str = "config.yml";

    fn defaults() -> Self {
        DEFAULT_LEGACY_CONFIG
    }

    fn merge(raw: &RawLegacyConfig) -> Self {
        DEFAULT_LEGACY_CONFIG.overlay(Some(raw))
    }
}
