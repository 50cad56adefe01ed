//! Tests for the service descriptor registry.

use courier_client::{AuthScheme, ServiceRegistry};
use courier_rate_limit::RateLimit;
use std::io::Write;

#[test]
fn test_load_bundled_defaults() {
    let registry = ServiceRegistry::load().unwrap();

    // Bundled descriptors ship with the library.
    assert!(registry.services.contains_key("zerobounce"));
    assert!(registry.services.contains_key("zoho_invoice"));

    let zerobounce = registry.get("zerobounce").unwrap();
    assert_eq!(zerobounce.base_url, "https://api.zerobounce.net/v2");
    assert_eq!(zerobounce.auth.scheme, AuthScheme::Header);
    assert_eq!(zerobounce.auth.header.as_deref(), Some("x-api-key"));
    assert_eq!(
        zerobounce.rate_limit,
        Some(RateLimit::SlidingWindow {
            max_requests: 3000,
            window_ms: 3_600_000
        })
    );
}

#[test]
fn test_bundled_zoho_descriptor_has_tenant_header() {
    let registry = ServiceRegistry::load().unwrap();
    let zoho = registry.get("zoho_invoice").unwrap();

    assert_eq!(zoho.auth.scheme, AuthScheme::Prefixed);
    assert_eq!(zoho.auth.prefix.as_deref(), Some("Zoho-oauthtoken"));
    assert_eq!(
        zoho.tenant_header.as_deref(),
        Some("X-com-zoho-invoice-organizationid")
    );
}

#[test]
fn test_from_file_parses_descriptor_table() {
    let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(
        file,
        r#"
[services.acme]
base_url = "https://api.acme.test"
env_key = "ACME_API_KEY"
auth = {{ scheme = "header", header = "x-acme-key" }}
rate_limit = {{ kind = "fixed_delay", min_interval_ms = 100 }}
"#
    )
    .unwrap();

    let registry = ServiceRegistry::from_file(file.path()).unwrap();
    let acme = registry.get("acme").unwrap();
    assert_eq!(acme.base_url, "https://api.acme.test");
    assert_eq!(acme.env_key.as_deref(), Some("ACME_API_KEY"));
    assert_eq!(
        acme.rate_limit,
        Some(RateLimit::FixedDelay {
            min_interval_ms: 100
        })
    );
}

#[test]
fn test_from_file_missing_path_is_config_error() {
    assert!(ServiceRegistry::from_file("/nonexistent/courier.toml").is_err());
}

#[test]
fn test_unknown_service_is_none() {
    let registry = ServiceRegistry::load().unwrap();
    assert!(registry.get("definitely-not-a-service").is_none());
}

#[test]
fn test_descriptor_defaults_to_bearer_auth() {
    let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(
        file,
        r#"
[services.minimal]
base_url = "https://api.minimal.test"
"#
    )
    .unwrap();

    let registry = ServiceRegistry::from_file(file.path()).unwrap();
    let minimal = registry.get("minimal").unwrap();
    assert_eq!(minimal.auth.scheme, AuthScheme::Bearer);
    assert!(minimal.rate_limit.is_none());
}
