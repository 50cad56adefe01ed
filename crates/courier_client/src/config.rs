//! Client configuration.

use crate::{AuthSpec, Credential, RetryPolicy, ServiceDescriptor};
use courier_error::{ConfigError, CourierResult};
use courier_rate_limit::RateLimit;
use derive_getters::Getters;
use std::time::Duration;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default pacing when neither the descriptor nor the caller set one.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(250);

/// Immutable configuration for one client instance.
///
/// All parameters are resolved by the caller before construction; there are
/// no hidden environment lookups inside the client. Build either directly or
/// from a [`ServiceDescriptor`]:
///
/// ```
/// use courier_client::{ClientConfig, Credential};
/// use std::time::Duration;
///
/// # fn main() -> courier_error::CourierResult<()> {
/// let config = ClientConfig::new(
///     "freshbooks",
///     "https://api.freshbooks.com",
///     Credential::new("tok-123")?,
/// )?
/// .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.service(), "freshbooks");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Getters)]
pub struct ClientConfig {
    /// Service name, used for logging only.
    service: String,
    credential: Credential,
    base_url: reqwest::Url,
    auth: AuthSpec,
    timeout: Duration,
    /// Vendor-fixed tenant header name, if the service scopes requests.
    tenant_header: Option<String>,
    /// Caller-supplied tenant/organization identifier.
    tenant_id: Option<String>,
    rate_limit: RateLimit,
    retry: RetryPolicy,
}

impl ClientConfig {
    /// Create a configuration with bearer auth and default timeout, pacing,
    /// and retry policy.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the base URL does not parse.
    pub fn new(
        service: impl Into<String>,
        base_url: &str,
        credential: Credential,
    ) -> CourierResult<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| ConfigError::new(format!("Invalid base URL {}: {}", base_url, e)))?;

        Ok(Self {
            service: service.into(),
            credential,
            base_url,
            auth: AuthSpec::bearer(),
            timeout: DEFAULT_TIMEOUT,
            tenant_header: None,
            tenant_id: None,
            rate_limit: RateLimit::fixed_delay(DEFAULT_MIN_INTERVAL),
            retry: RetryPolicy::default(),
        })
    }

    /// Create a configuration from a service descriptor.
    ///
    /// The descriptor supplies the base URL, auth shape, tenant header name,
    /// and pacing policy; the caller supplies the credential (and the tenant
    /// id via [`ClientConfig::with_tenant_id`] when the vendor needs one).
    pub fn from_descriptor(
        service: impl Into<String>,
        descriptor: &ServiceDescriptor,
        credential: Credential,
    ) -> CourierResult<Self> {
        let mut config = Self::new(service, &descriptor.base_url, credential)?;
        config.auth = descriptor.auth.clone();
        config.tenant_header = descriptor.tenant_header.clone();
        if let Some(rate_limit) = descriptor.rate_limit {
            config.rate_limit = rate_limit;
        }
        Ok(config)
    }

    /// Override the base URL (e.g. for sandbox environments).
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the URL does not parse.
    pub fn with_base_url(mut self, base_url: &str) -> CourierResult<Self> {
        self.base_url = reqwest::Url::parse(base_url)
            .map_err(|e| ConfigError::new(format!("Invalid base URL {}: {}", base_url, e)))?;
        Ok(self)
    }

    /// Set the auth shape.
    pub fn with_auth(mut self, auth: AuthSpec) -> Self {
        self.auth = auth;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the tenant header name (for manual configurations; descriptors
    /// carry the name already).
    pub fn with_tenant_header(mut self, name: impl Into<String>) -> Self {
        self.tenant_header = Some(name.into());
        self
    }

    /// Set the tenant/organization identifier sent with every request.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no tenant header name is known.
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> CourierResult<Self> {
        if self.tenant_header.is_none() {
            Err(ConfigError::new(
                "Tenant id set but no tenant header name is configured for this service",
            ))?;
        }
        self.tenant_id = Some(tenant_id.into());
        Ok(self)
    }

    /// Set the pacing policy.
    pub fn with_rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the 429 retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Tenant header name/value pair, when both halves are configured.
    pub fn tenant_pair(&self) -> Option<(String, String)> {
        match (&self.tenant_header, &self.tenant_id) {
            (Some(name), Some(value)) => Some((name.clone(), value.clone())),
            _ => None,
        }
    }
}
