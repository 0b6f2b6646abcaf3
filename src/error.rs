//! Error types for the NetSuite API client.
//!
//! This module contains error types used throughout the crate for
//! configuration and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use netsuite_api::{ConsumerKey, ConfigError};
//!
//! let result = ConsumerKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyCredential { field: "consumer_key" })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A credential value was empty.
    #[error("Credential '{field}' cannot be empty. Please provide the value from your NetSuite integration record or access token.")]
    EmptyCredential {
        /// The name of the empty credential.
        field: &'static str,
    },

    /// Account id is invalid.
    #[error("Invalid account id '{account_id}'. Expected the NetSuite account id, e.g. '1234567' or '1234567_SB1'.")]
    InvalidAccountId {
        /// The invalid account id that was provided.
        account_id: String,
    },

    /// A base URL override is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// One or more required environment variables are not set.
    #[error("Missing required environment variables: {variables}. Set them in the environment or a .env file.")]
    MissingEnvironment {
        /// Comma-separated names of the missing variables.
        variables: String,
    },
}
