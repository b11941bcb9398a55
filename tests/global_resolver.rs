//! Tests for the process-wide resolvers
//!
//! Kept in a single test so the working directory is set before the global
//! resolvers are first touched.

use cvfolio_config::config::{DEFAULT_LEGACY_CONFIG, DEFAULT_SITE_CONFIG};
use cvfolio_config::resolver::{legacy_resolver, site_resolver, FallbackReason};
use cvfolio_config::{resolve, resolve_legacy};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_global_resolvers_read_working_directory() {
    let dir = TempDir::new().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    // Nothing on disk yet
    let site = resolve();
    assert_eq!(site.flags, DEFAULT_SITE_CONFIG);
    assert_eq!(site.provenance.fallback, Some(FallbackReason::NotFound));
    assert!(Arc::ptr_eq(&site, &resolve()));

    let legacy = resolve_legacy();
    assert_eq!(legacy.flags, DEFAULT_LEGACY_CONFIG);

    // Writing files has no effect until reset
    std::fs::write(
        dir.path().join("cvfolio.config.json"),
        r#"{"layout": {"header": false}}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("config.yml"), "sections:\n  writing: false\n").unwrap();
    assert!(resolve().layout.header);
    assert!(resolve_legacy().sections.writing);

    site_resolver().reset();
    legacy_resolver().reset();

    let site = resolve();
    assert!(!site.layout.header);
    assert!(site.layout.footer);
    assert!(!site.is_fallback());

    let legacy = resolve_legacy();
    assert!(!legacy.sections.writing);
    assert!(legacy.sections.talks);
}
