//! REST-specific error types for the NetSuite API client.
//!
//! # Error Handling
//!
//! - [`RestError::Http`]: Wraps underlying HTTP errors
//! - [`RestError::Deserialize`]: A response body did not match the expected shape
//! - [`RestError::Io`]: Metadata could not be written to disk
//!
//! # Example
//!
//! ```rust,ignore
//! use netsuite_api::clients::rest::RestError;
//!
//! match client.fetch_suiteql::<serde_json::Value>("SELECT id FROM customer", 0, 10).await {
//!     Ok(page) => println!("{} customers", page.items.len()),
//!     Err(RestError::Http(e)) => println!("HTTP error: {e}"),
//!     Err(RestError::Deserialize(e)) => println!("Unexpected response: {e}"),
//!     Err(RestError::Io(e)) => println!("I/O error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body could not be decoded.
    #[error("Failed to decode response body: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Writing metadata to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RestError {
    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}
