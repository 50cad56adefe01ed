//! HMAC signature verification.

use crate::{WebhookError, WebhookErrorKind, WebhookResult};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha512};
use tracing::{debug, instrument};

/// Digest algorithm for webhook signatures.
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
pub enum SignatureScheme {
    /// HMAC-SHA256 (the near-universal vendor default).
    #[default]
    Sha256,
    /// HMAC-SHA512.
    Sha512,
}

/// Verifies HMAC signatures over raw webhook bodies.
///
/// Vendors sign the exact bytes of the request body with a shared secret and
/// put the hex-encoded digest in a header (the header name varies per
/// vendor; resolving it is the receiver's concern). Verification recomputes
/// the digest and compares in constant time, so it must see the raw body;
/// re-serialized JSON will not match.
///
/// # Example
///
/// ```
/// use courier_webhook::WebhookVerifier;
///
/// let verifier = WebhookVerifier::sha256("shared-secret");
/// let body = br#"{"event_type": "invoice.paid"}"#;
///
/// let signature = verifier.sign(body);
/// assert!(verifier.verify(body, &signature).is_ok());
/// assert!(verifier.verify(b"tampered", &signature).is_err());
/// ```
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: Vec<u8>,
    scheme: SignatureScheme,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

impl WebhookVerifier {
    /// Create a verifier with the given secret and digest algorithm.
    pub fn new(secret: impl Into<Vec<u8>>, scheme: SignatureScheme) -> Self {
        Self {
            secret: secret.into(),
            scheme,
        }
    }

    /// Create an HMAC-SHA256 verifier (the common case).
    pub fn sha256(secret: impl Into<Vec<u8>>) -> Self {
        Self::new(secret, SignatureScheme::Sha256)
    }

    /// The digest algorithm in use.
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Hex-encode the HMAC of `body`, for senders and tests.
    pub fn sign(&self, body: &[u8]) -> String {
        match self.scheme {
            SignatureScheme::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
                    .expect("HMAC accepts keys of any length");
                mac.update(body);
                hex::encode(mac.finalize().into_bytes())
            }
            SignatureScheme::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(&self.secret)
                    .expect("HMAC accepts keys of any length");
                mac.update(body);
                hex::encode(mac.finalize().into_bytes())
            }
        }
    }

    /// Verify a hex-encoded signature against the raw body.
    ///
    /// A `<scheme>=` prefix on the signature (e.g. `sha256=...`) is
    /// tolerated, since vendor header formats vary. The digest comparison is
    /// constant time.
    ///
    /// # Errors
    ///
    /// Returns `MalformedSignature` when the value is not hex, and
    /// `InvalidSignature` when the digests do not match.
    #[instrument(skip(self, body, signature))]
    pub fn verify(&self, body: &[u8], signature: &str) -> WebhookResult<()> {
        let signature = signature
            .trim()
            .strip_prefix(&format!("{}=", self.scheme))
            .unwrap_or(signature.trim());

        let expected = hex::decode(signature).map_err(|e| {
            WebhookError::new(WebhookErrorKind::MalformedSignature(e.to_string()))
        })?;

        let outcome = match self.scheme {
            SignatureScheme::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
                    .expect("HMAC accepts keys of any length");
                mac.update(body);
                mac.verify_slice(&expected)
            }
            SignatureScheme::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(&self.secret)
                    .expect("HMAC accepts keys of any length");
                mac.update(body);
                mac.verify_slice(&expected)
            }
        };

        outcome.map_err(|_| {
            debug!("Signature digest mismatch");
            WebhookError::new(WebhookErrorKind::InvalidSignature)
        })
    }
}
