//! Memoizing configuration resolver
//!
//! [`ConfigResolver`] turns a [`ConfigSource`] into a fully-populated,
//! immutable configuration. Resolution never fails: a missing, unreadable,
//! malformed or invalid source is logged as a warning and replaced by the
//! profile defaults. The first result, successful or not, is cached and
//! handed out to every later caller until [`ConfigResolver::reset`].
//!
//! Process-wide resolvers for both profiles live behind [`site_resolver`] and
//! [`legacy_resolver`]; [`resolve`] and [`resolve_legacy`] are shorthands.

use crate::config::{
    compute_config_hash, load_config_from_str, ConfigProfile, ConfigSource, LegacySiteConfig,
    SiteConfig,
};
use crate::ConfigError;
use serde::Serialize;
use std::ops::Deref;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

/// Why a resolution used the defaults instead of the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum FallbackReason {
    /// The source does not exist
    NotFound,

    /// The source exists but could not be read
    Unreadable { message: String },

    /// The source is not well-formed JSON/YAML/TOML
    Malformed { message: String },

    /// At least one present field has the wrong type
    Invalid { paths: Vec<String> },

    /// Validated input could not be converted to the typed configuration
    Internal { message: String },
}

impl From<&ConfigError> for FallbackReason {
    fn from(error: &ConfigError) -> Self {
        match error {
            ConfigError::NotFound(_) => FallbackReason::NotFound,
            ConfigError::Io { source, .. } => FallbackReason::Unreadable {
                message: source.to_string(),
            },
            ConfigError::Parse { message, .. } => FallbackReason::Malformed {
                message: message.clone(),
            },
            ConfigError::Validation { errors, .. } => FallbackReason::Invalid {
                paths: errors.paths().into_iter().map(str::to_string).collect(),
            },
            ConfigError::Deserialize(message) | ConfigError::Schema(message) => {
                FallbackReason::Internal {
                    message: message.clone(),
                }
            }
        }
    }
}

/// Where a resolved configuration came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// Profile name (`site` or `legacy`)
    pub profile: &'static str,

    /// Source label: a file path or `embedded:<name>`
    pub source: String,

    /// SHA-256 of the source text, when it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// Set when the defaults were substituted for the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackReason>,
}

/// A fully-populated configuration plus its provenance
///
/// Dereferences to the flags so rendering code can read
/// `resolved.layout.header` directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig<P> {
    pub flags: P,
    pub provenance: Provenance,
}

impl<P> ResolvedConfig<P> {
    /// Whether the defaults were used in place of the source
    pub fn is_fallback(&self) -> bool {
        self.provenance.fallback.is_some()
    }
}

impl<P> Deref for ResolvedConfig<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.flags
    }
}

/// Resolves one configuration source at most once
///
/// The cache is guarded by a mutex held for the whole resolution, so racing
/// first callers read the source exactly once.
#[derive(Debug)]
pub struct ConfigResolver<P: ConfigProfile> {
    source: ConfigSource,
    cached: Mutex<Option<Arc<ResolvedConfig<P>>>>,
}

impl<P: ConfigProfile> ConfigResolver<P> {
    /// Creates a resolver for an explicit source
    pub fn new(source: ConfigSource) -> Self {
        Self {
            source,
            cached: Mutex::new(None),
        }
    }

    /// Creates a resolver for the profile's conventional file in the working directory
    pub fn conventional() -> Self {
        Self::new(ConfigSource::conventional::<P>())
    }

    /// The source this resolver reads
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Returns the resolved configuration, reading the source on first use
    pub fn resolve(&self) -> Arc<ResolvedConfig<P>> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(resolved) = cached.as_ref() {
            return Arc::clone(resolved);
        }

        let resolved = Arc::new(resolve_source::<P>(&self.source));
        *cached = Some(Arc::clone(&resolved));
        resolved
    }

    /// Whether a resolution is currently cached
    pub fn is_resolved(&self) -> bool {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drops the cached resolution so the next call reads the source again
    pub fn reset(&self) {
        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Runs one uncached resolution of `source`
fn resolve_source<P: ConfigProfile>(source: &ConfigSource) -> ResolvedConfig<P> {
    let label = source.label();

    let text = match source.read() {
        Ok(text) => text,
        Err(e) => return fallback(label, None, &e),
    };
    let digest = compute_config_hash(&text);

    match load_config_from_str::<P>(&text, source.format(), &label) {
        Ok(flags) => {
            tracing::debug!(
                profile = P::NAME,
                source = %label,
                digest = %digest,
                "Site configuration loaded"
            );
            ResolvedConfig {
                flags,
                provenance: Provenance {
                    profile: P::NAME,
                    source: label,
                    digest: Some(digest),
                    fallback: None,
                },
            }
        }
        Err(e) => fallback(label, Some(digest), &e),
    }
}

fn fallback<P: ConfigProfile>(
    label: String,
    digest: Option<String>,
    error: &ConfigError,
) -> ResolvedConfig<P> {
    match error {
        ConfigError::NotFound(_) => {
            tracing::warn!(
                profile = P::NAME,
                source = %label,
                "Config source not found, using defaults"
            );
        }
        ConfigError::Validation { errors, .. } => {
            tracing::warn!(
                profile = P::NAME,
                source = %label,
                fields = ?errors.paths(),
                "Invalid configuration detected, falling back to defaults:\n{}",
                errors
            );
        }
        other => {
            tracing::warn!(
                profile = P::NAME,
                source = %label,
                error = %other,
                "Unable to load configuration, falling back to defaults"
            );
        }
    }

    ResolvedConfig {
        flags: P::defaults(),
        provenance: Provenance {
            profile: P::NAME,
            source: label,
            digest,
            fallback: Some(FallbackReason::from(error)),
        },
    }
}

static SITE_RESOLVER: LazyLock<ConfigResolver<SiteConfig>> =
    LazyLock::new(ConfigResolver::conventional);

static LEGACY_RESOLVER: LazyLock<ConfigResolver<LegacySiteConfig>> =
    LazyLock::new(ConfigResolver::conventional);

/// Process-wide resolver for `cvfolio.config.json` in the working directory
pub fn site_resolver() -> &'static ConfigResolver<SiteConfig> {
    &SITE_RESOLVER
}

/// Process-wide resolver for `config.yml` in the working directory
pub fn legacy_resolver() -> &'static ConfigResolver<LegacySiteConfig> {
    &LEGACY_RESOLVER
}

/// Resolves the site configuration, cached for the life of the process
pub fn resolve() -> Arc<ResolvedConfig<SiteConfig>> {
    site_resolver().resolve()
}

/// Resolves the legacy configuration, cached for the life of the process
pub fn resolve_legacy() -> Arc<ResolvedConfig<LegacySiteConfig>> {
    legacy_resolver().resolve()
}
