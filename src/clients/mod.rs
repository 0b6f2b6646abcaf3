//! HTTP client types for NetSuite API communication.
//!
//! This module provides the HTTP layer for making signed requests to
//! NetSuite. It handles request/response processing, OAuth signing, retry
//! logic and NetSuite error bodies.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`rest::RestClient`]: Higher-level REST API client
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Retry Behavior
//!
//! - **429 (Too Many Requests)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **5xx (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Each attempt is
//! signed with a fresh nonce and timestamp.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, MAX_RETRY_WAIT_TIME, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use rest::{MetadataOptions, RestClient, RestError};
