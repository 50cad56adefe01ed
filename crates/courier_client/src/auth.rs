//! Credentials and authentication header shapes.

use courier_error::{ConfigError, CourierResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a vendor expects the credential on the wire.
///
/// The header name is vendor-specific and fixed per service; the credential
/// value is always supplied by the caller at construction time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// `<header>: <token>`, e.g. `x-api-key`
    Header,
    /// `Authorization: <prefix> <token>`, e.g. `Zoho-oauthtoken`
    Prefixed,
}

/// Authentication shape for one service: scheme plus the vendor-specific
/// header name or token prefix the scheme needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthSpec {
    /// Wire shape for the credential.
    #[serde(default)]
    pub scheme: AuthScheme,
    /// Header name for [`AuthScheme::Header`].
    #[serde(default)]
    pub header: Option<String>,
    /// Token prefix for [`AuthScheme::Prefixed`].
    #[serde(default)]
    pub prefix: Option<String>,
}

impl AuthSpec {
    /// Standard `Authorization: Bearer` authentication.
    pub fn bearer() -> Self {
        Self::default()
    }

    /// Custom-header authentication, e.g. `x-api-key`.
    pub fn header(name: impl Into<String>) -> Self {
        Self {
            scheme: AuthScheme::Header,
            header: Some(name.into()),
            prefix: None,
        }
    }

    /// Prefixed `Authorization` authentication, e.g. `Zoho-oauthtoken`.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            scheme: AuthScheme::Prefixed,
            header: None,
            prefix: Some(prefix.into()),
        }
    }

    /// Resolve the header name/value pair carrying the credential.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the scheme requires a header name
    /// or prefix that was not provided.
    pub fn header_pair(&self, credential: &Credential) -> CourierResult<(String, String)> {
        match self.scheme {
            AuthScheme::Bearer => Ok((
                "Authorization".to_string(),
                format!("Bearer {}", credential.expose()),
            )),
            AuthScheme::Header => {
                let name = self.header.clone().ok_or_else(|| {
                    ConfigError::new("Auth scheme 'header' requires a header name")
                })?;
                Ok((name, credential.expose().to_string()))
            }
            AuthScheme::Prefixed => {
                let prefix = self.prefix.clone().ok_or_else(|| {
                    ConfigError::new("Auth scheme 'prefixed' requires a token prefix")
                })?;
                Ok((
                    "Authorization".to_string(),
                    format!("{} {}", prefix, credential.expose()),
                ))
            }
        }
    }
}

/// An API key or access token, validated non-empty at construction.
///
/// Environment-variable fallback is a caller decision: resolve it explicitly
/// with [`Credential::from_env`] rather than relying on hidden defaults
/// inside the client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw credential string.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the credential is empty or
    /// whitespace-only.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier_client::Credential;
    ///
    /// assert!(Credential::new("sk-123").is_ok());
    /// assert!(Credential::new("   ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> CourierResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            Err(ConfigError::new("Credential must not be empty"))?;
        }
        Ok(Self(raw))
    }

    /// Resolve a credential from an environment variable such as
    /// `<SERVICE>_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the variable is unset or empty.
    pub fn from_env(var: &str) -> CourierResult<Self> {
        let raw = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("Environment variable {} is not set", var)))?;
        Self::new(raw)
    }

    /// The raw credential value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of logs and debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header_pair() {
        let credential = Credential::new("tok-1").unwrap();
        let (name, value) = AuthSpec::bearer().header_pair(&credential).unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer tok-1");
    }

    #[test]
    fn test_custom_header_pair() {
        let credential = Credential::new("tok-2").unwrap();
        let (name, value) = AuthSpec::header("x-api-key")
            .header_pair(&credential)
            .unwrap();
        assert_eq!(name, "x-api-key");
        assert_eq!(value, "tok-2");
    }

    #[test]
    fn test_prefixed_header_pair() {
        let credential = Credential::new("tok-3").unwrap();
        let (name, value) = AuthSpec::prefixed("Zoho-oauthtoken")
            .header_pair(&credential)
            .unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Zoho-oauthtoken tok-3");
    }

    #[test]
    fn test_header_scheme_without_name_is_config_error() {
        let credential = Credential::new("tok-4").unwrap();
        let spec = AuthSpec {
            scheme: AuthScheme::Header,
            header: None,
            prefix: None,
        };
        assert!(spec.header_pair(&credential).is_err());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("super-secret").unwrap();
        assert_eq!(format!("{:?}", credential), "Credential(***)");
    }
}
