//! Per-vendor service descriptors.
//!
//! A descriptor is the small data table that distinguishes one vendor
//! wrapper from another: base URL, auth header shape, pacing policy. The
//! registry loads descriptors from layered TOML:
//! - Bundled defaults (include_str! from courier.toml)
//! - User overrides (~/.config/courier/courier.toml, then ./courier.toml)
//! - Automatic merging with later sources taking precedence

use crate::AuthSpec;
use config::{Config, File, FileFormat};
use courier_error::{ConfigError, CourierError, CourierResult};
use courier_rate_limit::RateLimit;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Static description of one vendor API.
///
/// # Example
///
/// ```toml
/// [services.zerobounce]
/// base_url = "https://api.zerobounce.net/v2"
/// env_key = "ZEROBOUNCE_API_KEY"
/// auth = { scheme = "header", header = "x-api-key" }
/// rate_limit = { kind = "sliding_window", max_requests = 3000, window_ms = 3600000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Root URL all resource paths are joined to.
    pub base_url: String,

    /// How the credential is carried on the wire.
    #[serde(default)]
    pub auth: AuthSpec,

    /// Header naming the tenant/account, for vendors that scope requests to
    /// an organization (e.g. `X-com-zoho-invoice-organizationid`).
    #[serde(default)]
    pub tenant_header: Option<String>,

    /// Default pacing policy for clients of this service.
    #[serde(default)]
    pub rate_limit: Option<RateLimit>,

    /// Conventional environment variable holding the credential, for callers
    /// that resolve keys from the environment.
    #[serde(default)]
    pub env_key: Option<String>,
}

/// Catalog of service descriptors keyed by service name.
///
/// # Example
///
/// ```no_run
/// use courier_client::ServiceRegistry;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = ServiceRegistry::load()?;
/// let descriptor = registry.get("zerobounce").expect("bundled descriptor");
/// println!("base url: {}", descriptor.base_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceRegistry {
    /// Map of service name to descriptor.
    #[serde(default)]
    pub services: HashMap<String, ServiceDescriptor>,
}

impl ServiceRegistry {
    /// Load descriptors from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> CourierResult<Self> {
        debug!("Loading service descriptors from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                CourierError::from(ConfigError::new(format!(
                    "Failed to read service descriptors from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                CourierError::from(ConfigError::new(format!(
                    "Failed to parse service descriptors: {}",
                    e
                )))
            })
    }

    /// Load descriptors with precedence: user override > bundled default.
    ///
    /// Sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (courier.toml shipped with the library)
    /// 2. User config in home directory (~/.config/courier/courier.toml)
    /// 3. User config in current directory (./courier.toml)
    ///
    /// User files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> CourierResult<Self> {
        debug!("Loading service descriptors: current dir > home dir > bundled defaults");

        // Bundled default descriptors
        const DEFAULT_REGISTRY: &str = include_str!("../../../courier.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_REGISTRY, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/courier/courier.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("courier").required(false));

        builder
            .build()
            .map_err(|e| {
                CourierError::from(ConfigError::new(format!(
                    "Failed to build service registry: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                CourierError::from(ConfigError::new(format!(
                    "Failed to parse service descriptors: {}",
                    e
                )))
            })
    }

    /// Look up a descriptor by service name.
    #[instrument(skip(self))]
    pub fn get(&self, service: &str) -> Option<&ServiceDescriptor> {
        debug!(service, "Looking up service descriptor");
        self.services.get(service)
    }
}
