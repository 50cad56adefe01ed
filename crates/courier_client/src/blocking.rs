//! Blocking REST client.

use crate::retry::retry_after_of;
use crate::{ClientConfig, classify};
use courier_error::{ApiError, ConfigError, CourierResult};
use courier_rate_limit::BlockingRateLimiter;
use reqwest::{Method, StatusCode, header::HeaderMap};
use serde_json::Value;
use tracing::{instrument, warn};

/// Blocking rate-limited REST client for one service.
///
/// Same contract as [`crate::RestClient`] with thread-blocking waits: the
/// pacing gate sleeps the calling thread, and the 429 retry loop is an
/// explicit attempt counter rather than a retry combinator. Safe for
/// single-threaded callers; threads sharing one instance serialize through
/// the limiter's internal lock.
///
/// Must be constructed and used outside any async runtime.
pub struct BlockingRestClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
    limiter: BlockingRateLimiter,
}

impl std::fmt::Debug for BlockingRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingRestClient")
            .field("service", &self.config.service())
            .finish_non_exhaustive()
    }
}

impl BlockingRestClient {
    /// Create a client from an immutable configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP connection pool cannot be
    /// built.
    pub fn new(config: ClientConfig) -> CourierResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;
        let limiter = BlockingRateLimiter::new(*config.rate_limit());

        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET a resource, with query parameters for filters/pagination.
    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> CourierResult<Value> {
        self.execute_json(Method::GET, path, query, None)
    }

    /// POST a JSON body to create a resource.
    pub fn post(&self, path: &str, body: &Value) -> CourierResult<Value> {
        self.execute_json(Method::POST, path, &[], Some(body))
    }

    /// PUT a JSON body to replace a resource.
    pub fn put(&self, path: &str, body: &Value) -> CourierResult<Value> {
        self.execute_json(Method::PUT, path, &[], Some(body))
    }

    /// PATCH a JSON body to update a resource.
    pub fn patch(&self, path: &str, body: &Value) -> CourierResult<Value> {
        self.execute_json(Method::PATCH, path, &[], Some(body))
    }

    /// DELETE a resource. Bodyless responses yield an empty mapping.
    pub fn delete(&self, path: &str) -> CourierResult<Value> {
        self.execute_json(Method::DELETE, path, &[], None)
    }

    /// GET a binary resource (file downloads, exports).
    pub fn get_bytes(&self, path: &str, query: &[(&str, &str)]) -> CourierResult<Vec<u8>> {
        let policy = *self.config.retry();
        let mut attempt = 0;
        loop {
            let (status, headers, bytes) = self.send(Method::GET, path, query, None)?;
            match classify::classify_bytes(status, &headers, path, &bytes) {
                Err(err) if attempt < policy.max_retries => match retry_after_of(&err) {
                    Some(hint) => {
                        attempt += 1;
                        std::thread::sleep(policy.backoff(hint));
                    }
                    None => return Err(err),
                },
                other => return other,
            }
        }
    }

    /// One rate-limited round trip plus bounded 429 retry, returning JSON.
    ///
    /// The retry is an explicit counted loop: a repeated 429 causes at most
    /// `max_retries` re-sends, never unbounded re-entry.
    #[instrument(skip(self, body), fields(service = %self.config.service()))]
    fn execute_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> CourierResult<Value> {
        let policy = *self.config.retry();
        let mut attempt = 0;
        loop {
            let (status, headers, bytes) = self.send(method.clone(), path, query, body)?;
            match classify::classify_json(status, &headers, path, &bytes) {
                Err(err) if attempt < policy.max_retries => match retry_after_of(&err) {
                    Some(hint) => {
                        attempt += 1;
                        let wait = policy.backoff(hint);
                        warn!(
                            attempt,
                            wait_ms = wait.as_millis() as u64,
                            "Rate limited by vendor, retrying"
                        );
                        std::thread::sleep(wait);
                    }
                    None => return Err(err),
                },
                other => return other,
            }
        }
    }

    /// Pacing gate, request build, send, body read. No retry at this layer.
    fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> CourierResult<(StatusCode, HeaderMap, Vec<u8>)> {
        self.limiter.acquire();

        let url = self.join_url(path)?;
        let mut request = self.http.request(method, url);

        let (auth_name, auth_value) = self.config.auth().header_pair(self.config.credential())?;
        request = request.header(auth_name, auth_value);

        if let Some((tenant_name, tenant_value)) = self.config.tenant_pair() {
            request = request.header(tenant_name, tenant_value);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .map_err(|e| ApiError::transport(e.to_string()))?;

        Ok((status, headers, bytes.to_vec()))
    }

    fn join_url(&self, path: &str) -> CourierResult<reqwest::Url> {
        let base = self.config.base_url().as_str().trim_end_matches('/');
        let full = format!("{}/{}", base, path.trim_start_matches('/'));
        reqwest::Url::parse(&full)
            .map_err(|e| ConfigError::new(format!("Invalid request path {}: {}", path, e)).into())
    }
}
