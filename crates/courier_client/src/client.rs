//! Async REST client.

use crate::retry::retry_after_of;
use crate::{ClientConfig, classify};
use courier_error::{ApiError, ConfigError, CourierResult};
use courier_rate_limit::RateLimiter;
use reqwest::{Method, StatusCode, header::HeaderMap};
use serde_json::Value;
use tracing::{instrument, warn};

/// Async rate-limited REST client for one service.
///
/// Owns one persistent connection pool and one pacing gate. Every resource
/// call acquires the gate (which may suspend the caller), builds the request
/// from the configured auth shape, sends it, classifies the response, and
/// returns decoded JSON. The raw transport response never escapes.
///
/// A 429 response is retried up to the configured bound, honoring the
/// server's `Retry-After`; all other failures surface immediately as typed
/// errors.
///
/// Instances are independent: each owns its own pool and pacing state, so
/// constructing two clients from the same parameters yields two instances
/// whose timing does not interact.
///
/// # Example
///
/// ```rust,ignore
/// use courier_client::{ClientConfig, Credential, RestClient};
///
/// let config = ClientConfig::new(
///     "freshbooks",
///     "https://api.freshbooks.com",
///     Credential::from_env("FRESHBOOKS_API_KEY")?,
/// )?;
/// let client = RestClient::new(config)?;
///
/// let invoices = client.get("/invoices", &[("page", "1")]).await?;
/// let created = client.post("/invoices", &serde_json::json!({"amount": 100})).await?;
/// ```
pub struct RestClient {
    http: reqwest::Client,
    config: ClientConfig,
    limiter: RateLimiter,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("service", &self.config.service())
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a client from an immutable configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP connection pool cannot be
    /// built.
    pub fn new(config: ClientConfig) -> CourierResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;
        let limiter = RateLimiter::new(*config.rate_limit());

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
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> CourierResult<Value> {
        self.execute_json(Method::GET, path, query, None).await
    }

    /// POST a JSON body to create a resource.
    pub async fn post(&self, path: &str, body: &Value) -> CourierResult<Value> {
        self.execute_json(Method::POST, path, &[], Some(body)).await
    }

    /// PUT a JSON body to replace a resource.
    pub async fn put(&self, path: &str, body: &Value) -> CourierResult<Value> {
        self.execute_json(Method::PUT, path, &[], Some(body)).await
    }

    /// PATCH a JSON body to update a resource.
    pub async fn patch(&self, path: &str, body: &Value) -> CourierResult<Value> {
        self.execute_json(Method::PATCH, path, &[], Some(body))
            .await
    }

    /// DELETE a resource. Bodyless responses yield an empty mapping.
    pub async fn delete(&self, path: &str) -> CourierResult<Value> {
        self.execute_json(Method::DELETE, path, &[], None).await
    }

    /// GET a binary resource (file downloads, exports).
    pub async fn get_bytes(&self, path: &str, query: &[(&str, &str)]) -> CourierResult<Vec<u8>> {
        let policy = *self.config.retry();
        let mut attempt = 0;
        loop {
            let (status, headers, bytes) = self.send(Method::GET, path, query, None).await?;
            match classify::classify_bytes(status, &headers, path, &bytes) {
                Err(err) if attempt < policy.max_retries => match retry_after_of(&err) {
                    Some(hint) => {
                        attempt += 1;
                        tokio::time::sleep(policy.backoff(hint)).await;
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
    /// `max_retries` re-sends, and each retry waits for the server-indicated
    /// `Retry-After` (falling back to the policy's default backoff) before
    /// going through the pacing gate again.
    #[instrument(skip(self, body), fields(service = %self.config.service()))]
    async fn execute_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> CourierResult<Value> {
        let policy = *self.config.retry();
        let mut attempt = 0;
        loop {
            let (status, headers, bytes) = self.send(method.clone(), path, query, body).await?;
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
                        tokio::time::sleep(wait).await;
                    }
                    None => return Err(err),
                },
                other => return other,
            }
        }
    }

    /// Pacing gate, request build, send, body read. No retry at this layer.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> CourierResult<(StatusCode, HeaderMap, Vec<u8>)> {
        let _guard = self.limiter.acquire().await;

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
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        Ok((status, headers, bytes.to_vec()))
    }

    /// Join a resource path onto the configured base URL.
    fn join_url(&self, path: &str) -> CourierResult<reqwest::Url> {
        let base = self.config.base_url().as_str().trim_end_matches('/');
        let full = format!("{}/{}", base, path.trim_start_matches('/'));
        reqwest::Url::parse(&full)
            .map_err(|e| ConfigError::new(format!("Invalid request path {}: {}", path, e)).into())
    }
}
