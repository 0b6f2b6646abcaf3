//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated NetSuite consumer key (from the integration record).
///
/// # Example
///
/// ```rust
/// use netsuite_api::ConsumerKey;
///
/// let key = ConsumerKey::new("my-consumer-key").unwrap();
/// assert_eq!(key.as_ref(), "my-consumer-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerKey(String);

impl ConsumerKey {
    /// Creates a new validated consumer key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        non_empty(key.into(), "consumer_key").map(Self)
    }
}

impl AsRef<str> for ConsumerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated NetSuite consumer secret.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ConsumerSecret(*****)`.
///
/// ```rust
/// use netsuite_api::ConsumerSecret;
///
/// let secret = ConsumerSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ConsumerSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerSecret(String);

impl ConsumerSecret {
    /// Creates a new validated consumer secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        non_empty(secret.into(), "consumer_secret").map(Self)
    }
}

impl AsRef<str> for ConsumerSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ConsumerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConsumerSecret(*****)")
    }
}

/// A validated token id (from the access token record).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenId(String);

impl TokenId {
    /// Creates a new validated token id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        non_empty(id.into(), "token_id").map(Self)
    }
}

impl AsRef<str> for TokenId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated token secret. Masked in `Debug` output like [`ConsumerSecret`].
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);

impl TokenSecret {
    /// Creates a new validated token secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        non_empty(secret.into(), "token_secret").map(Self)
    }
}

impl AsRef<str> for TokenSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(*****)")
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyCredential { field });
    }
    Ok(value)
}

/// A validated NetSuite account id.
///
/// NetSuite spells the same account two ways: the OAuth realm uses
/// uppercase with underscores (`1234567_SB1`), while hostnames use
/// lowercase with hyphens (`1234567-sb1`). Both forms are accepted on
/// construction and either can be retrieved.
///
/// # Serialization
///
/// `AccountId` serializes to and deserializes from its realm form:
///
/// ```rust
/// use netsuite_api::AccountId;
///
/// let account = AccountId::new("1234567-sb1").unwrap();
/// let json = serde_json::to_string(&account).unwrap();
/// assert_eq!(json, r#""1234567_SB1""#);
/// ```
///
/// # Example
///
/// ```rust
/// use netsuite_api::AccountId;
///
/// let account = AccountId::new("1234567_SB1").unwrap();
/// assert_eq!(account.realm(), "1234567_SB1");
/// assert_eq!(account.host_prefix(), "1234567-sb1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountId {
    realm: String,
    host_prefix: String,
}

impl AccountId {
    /// Creates a new validated account id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAccountId`] if the id is empty or
    /// contains characters other than ASCII letters, digits, `_` and `-`.
    pub fn new(account_id: impl Into<String>) -> Result<Self, ConfigError> {
        let account_id = account_id.into();
        let trimmed = account_id.trim();

        let valid = !trimmed.is_empty()
            && !trimmed.starts_with(['-', '_'])
            && !trimmed.ends_with(['-', '_'])
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigError::InvalidAccountId { account_id });
        }

        Ok(Self {
            realm: trimmed.to_ascii_uppercase().replace('-', "_"),
            host_prefix: trimmed.to_ascii_lowercase().replace('_', "-"),
        })
    }

    /// Returns the OAuth realm form (e.g. `1234567_SB1`).
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Returns the hostname form (e.g. `1234567-sb1`).
    #[must_use]
    pub fn host_prefix(&self) -> &str {
        &self.host_prefix
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.realm
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.realm)
    }
}

impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.realm)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated base URL used to override a NetSuite endpoint.
///
/// Trailing slashes are stripped so paths can be appended uniformly.
///
/// # Example
///
/// ```rust
/// use netsuite_api::BaseUrl;
///
/// let url = BaseUrl::new("http://127.0.0.1:8080/services/rest/").unwrap();
/// assert_eq!(url.as_ref(), "http://127.0.0.1:8080/services/rest");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse or
    /// has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        match url::Url::parse(trimmed) {
            Ok(parsed) if parsed.has_host() => Ok(Self(trimmed.to_string())),
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_reject_empty_strings() {
        assert!(matches!(
            ConsumerKey::new(""),
            Err(ConfigError::EmptyCredential {
                field: "consumer_key"
            })
        ));
        assert!(matches!(
            ConsumerSecret::new("   "),
            Err(ConfigError::EmptyCredential {
                field: "consumer_secret"
            })
        ));
        assert!(matches!(
            TokenId::new(""),
            Err(ConfigError::EmptyCredential { field: "token_id" })
        ));
        assert!(matches!(
            TokenSecret::new(""),
            Err(ConfigError::EmptyCredential {
                field: "token_secret"
            })
        ));
    }

    #[test]
    fn test_secrets_mask_value_in_debug() {
        let secret = ConsumerSecret::new("super-secret").unwrap();
        let debug_output = format!("{:?}", secret);
        assert_eq!(debug_output, "ConsumerSecret(*****)");
        assert!(!debug_output.contains("super-secret"));

        let token_secret = TokenSecret::new("token-secret").unwrap();
        assert_eq!(format!("{:?}", token_secret), "TokenSecret(*****)");
    }

    #[test]
    fn test_account_id_production_account() {
        let account = AccountId::new("3609571").unwrap();
        assert_eq!(account.realm(), "3609571");
        assert_eq!(account.host_prefix(), "3609571");
    }

    #[test]
    fn test_account_id_normalizes_sandbox_forms() {
        let from_realm = AccountId::new("1234567_SB1").unwrap();
        let from_host = AccountId::new("1234567-sb1").unwrap();

        assert_eq!(from_realm, from_host);
        assert_eq!(from_realm.realm(), "1234567_SB1");
        assert_eq!(from_realm.host_prefix(), "1234567-sb1");
        assert_eq!(from_realm.to_string(), "1234567_SB1");
    }

    #[test]
    fn test_account_id_rejects_invalid_values() {
        assert!(AccountId::new("").is_err());
        assert!(AccountId::new("123 456").is_err());
        assert!(AccountId::new("123.456").is_err());
        assert!(AccountId::new("_123").is_err());
        assert!(AccountId::new("123-").is_err());
        assert!(AccountId::new("  1234567  ").is_ok());
    }

    #[test]
    fn test_account_id_deserializes_from_string() {
        let account: AccountId = serde_json::from_str(r#""1234567-sb2""#).unwrap();
        assert_eq!(account.realm(), "1234567_SB2");

        let invalid: Result<AccountId, _> = serde_json::from_str(r#""not valid""#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_base_url_validates_and_strips_trailing_slash() {
        let url = BaseUrl::new("https://proxy.example.com/").unwrap();
        assert_eq!(url.as_ref(), "https://proxy.example.com");

        assert!(BaseUrl::new("proxy.example.com").is_err());
        assert!(BaseUrl::new("").is_err());
    }
}
