//! HTTP-specific error types for the NetSuite API client.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from NetSuite
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use netsuite_api::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("NetSuite error {}: {} ({:?})", e.code, e.message, e.error_code);
//!     }
//!     Err(HttpError::MaxRetries(e)) => {
//!         println!("Retries exhausted after {} tries", e.tries);
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message is taken from NetSuite's error body:
/// the first `o:errorDetails[].detail`, else the top-level `title`, else
/// `Request failed with status code {code}`.
///
/// # Example
///
/// ```rust
/// use netsuite_api::clients::HttpResponseError;
/// use serde_json::json;
///
/// let body = json!({
///     "type": "https://www.rfc-editor.org/rfc/rfc9110.html#section-15.5.1",
///     "title": "Bad Request",
///     "status": 400,
///     "o:errorDetails": [{
///         "detail": "Invalid search query.",
///         "o:errorCode": "INVALID_PARAMETER"
///     }]
/// });
///
/// let error = HttpResponseError::from_body(400, &body);
/// assert_eq!(error.to_string(), "Invalid search query.");
/// assert_eq!(error.error_code.as_deref(), Some("INVALID_PARAMETER"));
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human-readable error message.
    pub message: String,
    /// NetSuite error code (`o:errorCode`), if the body carried one.
    pub error_code: Option<String>,
}

impl HttpResponseError {
    /// Builds the error from a status code and a response body.
    #[must_use]
    pub fn from_body(code: u16, body: &serde_json::Value) -> Self {
        let detail = body
            .get("o:errorDetails")
            .and_then(serde_json::Value::as_array)
            .and_then(|details| details.first());

        let message = detail
            .and_then(|detail| detail.get("detail"))
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
            .or_else(|| body.get("title").and_then(serde_json::Value::as_str))
            .map_or_else(
                || format!("Request failed with status code {code}"),
                String::from,
            );

        let error_code = detail
            .and_then(|detail| detail.get("o:errorCode"))
            .and_then(serde_json::Value::as_str)
            .map(String::from);

        Self {
            code,
            message,
            error_code,
        }
    }
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with 429 or 5xx responses after all
/// configured attempts.
///
/// # Example
///
/// ```rust
/// use netsuite_api::clients::MaxHttpRetriesExceededError;
///
/// let error = MaxHttpRetriesExceededError {
///     code: 429,
///     tries: 3,
///     message: "Concurrency limit exceeded".to_string(),
/// };
///
/// assert!(error.to_string().starts_with("Exceeded maximum retry count of 3"));
/// ```
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
}

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request URL could not be built.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl HttpError {
    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }
}
