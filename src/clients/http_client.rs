//! HTTP client for NetSuite API communication.
//!
//! This module provides the [`HttpClient`] type for making signed requests
//! to NetSuite with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use crate::auth::RequestSigner;
use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::NetsuiteConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Upper bound in seconds on a server-requested `Retry-After` wait.
pub const MAX_RETRY_WAIT_TIME: u64 = 60;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to NetSuite.
///
/// The client handles:
/// - URL construction against the SuiteTalk REST base URL
/// - Default headers including User-Agent and `Prefer: transient`
/// - OAuth 1.0a signing of every attempt
/// - Automatic retry logic for 429 and 5xx responses
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use netsuite_api::clients::{HttpClient, HttpMethod, HttpRequest};
/// use netsuite_api::NetsuiteConfig;
///
/// let config = NetsuiteConfig::from_env()?;
/// let client = HttpClient::new(&config);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "record/v1/customer/107")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://1234567.suitetalk.api.netsuite.com/services/rest`).
    base_uri: String,
    /// Signs each outgoing attempt.
    signer: RequestSigner,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the account in `config`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use netsuite_api::clients::HttpClient;
    /// use netsuite_api::{AccountId, ConsumerKey, ConsumerSecret, NetsuiteConfig, TokenId, TokenSecret};
    ///
    /// let config = NetsuiteConfig::builder()
    ///     .account_id(AccountId::new("1234567_SB1").unwrap())
    ///     .consumer_key(ConsumerKey::new("ck").unwrap())
    ///     .consumer_secret(ConsumerSecret::new("cs").unwrap())
    ///     .token_id(TokenId::new("tk").unwrap())
    ///     .token_secret(TokenSecret::new("ts").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config);
    /// assert_eq!(
    ///     client.base_uri(),
    ///     "https://1234567-sb1.suitetalk.api.netsuite.com/services/rest"
    /// );
    /// ```
    #[must_use]
    pub fn new(config: &NetsuiteConfig) -> Self {
        let base_uri = config.rest_base_url();

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}NetSuite API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Prefer".to_string(), "transient".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            signer: RequestSigner::new(config),
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the request signer.
    #[must_use]
    pub const fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Resolves the full URL for a request, query string included.
    ///
    /// Relative paths are joined to the base URI; an empty path becomes `*`.
    /// Absolute `http(s)://` paths are used as given.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the resulting URL is invalid.
    pub fn build_url(&self, request: &HttpRequest) -> Result<Url, url::ParseError> {
        let mut url = if request.is_absolute() {
            Url::parse(&request.path)?
        } else {
            let path = request.path.trim_start_matches('/');
            let path = if path.is_empty() { "*" } else { path };
            Url::parse(&format!("{}/{path}", self.base_uri))?
        };

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    /// Sends an HTTP request to NetSuite.
    ///
    /// This method handles:
    /// - Request validation
    /// - URL construction
    /// - Header merging
    /// - OAuth signing (fresh nonce and timestamp per attempt)
    /// - Response parsing
    /// - Retry logic for 429 and 5xx responses
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The URL cannot be built (`InvalidUrl`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.build_url(&request)?;
        let method = request.http_method;

        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            tracing::debug!(method = method.as_str(), %url, attempt = tries, "Sending NetSuite request");

            let mut req_builder = self
                .client
                .request(method.into(), url.clone())
                .header(
                    "Authorization",
                    self.signer.authorization_header(method.as_str(), &url),
                );

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();
            let body = Self::parse_body(body_text);

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            let error = HttpResponseError::from_body(code, &response.body);

            let should_retry = code == 429 || code >= 500;
            if !should_retry {
                return Err(HttpError::Response(error));
            }

            if tries >= request.tries {
                if request.tries <= 1 {
                    return Err(HttpError::Response(error));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error.message,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                code,
                attempt = tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "NetSuite request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses a response body as JSON, keeping non-JSON text as a string.
    fn parse_body(body_text: String) -> serde_json::Value {
        if body_text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(&body_text).unwrap_or(serde_json::Value::String(body_text))
    }

    /// Calculates the retry delay based on response and status code.
    ///
    /// A 429 honours `Retry-After`, capped at [`MAX_RETRY_WAIT_TIME`]. A value
    /// that does not fit in a [`Duration`] and every 5xx wait the fixed
    /// [`RETRY_WAIT_TIME`].
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        let fixed = Duration::from_secs(RETRY_WAIT_TIME);
        if status != 429 {
            return fixed;
        }
        response
            .retry_request_after
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
            .map_or(fixed, |delay| delay.min(Duration::from_secs(MAX_RETRY_WAIT_TIME)))
    }
}
