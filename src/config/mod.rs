//! Configuration types for the NetSuite API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for token-based authentication against a NetSuite account.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`NetsuiteConfig`]: The main configuration struct holding all client settings
//! - [`NetsuiteConfigBuilder`]: A builder for constructing [`NetsuiteConfig`] instances
//! - [`AccountId`]: A validated account id with realm and hostname forms
//! - [`ConsumerKey`], [`ConsumerSecret`]: Integration record credentials
//! - [`TokenId`], [`TokenSecret`]: Access token credentials
//! - [`BaseUrl`]: A validated endpoint override
//!
//! # Example
//!
//! ```rust
//! use netsuite_api::{NetsuiteConfig, AccountId, ConsumerKey, ConsumerSecret, TokenId, TokenSecret};
//!
//! let config = NetsuiteConfig::builder()
//!     .account_id(AccountId::new("1234567_SB1").unwrap())
//!     .consumer_key(ConsumerKey::new("consumer-key").unwrap())
//!     .consumer_secret(ConsumerSecret::new("consumer-secret").unwrap())
//!     .token_id(TokenId::new("token-id").unwrap())
//!     .token_secret(TokenSecret::new("token-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.rest_base_url(),
//!     "https://1234567-sb1.suitetalk.api.netsuite.com/services/rest"
//! );
//! ```

mod newtypes;

pub use newtypes::{AccountId, BaseUrl, ConsumerKey, ConsumerSecret, TokenId, TokenSecret};

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the account id.
pub const ENV_ACCOUNT_ID: &str = "ACCOUNT_ID";
/// Environment variable holding the consumer key.
pub const ENV_CONSUMER_KEY: &str = "CONSUMER_KEY";
/// Environment variable holding the consumer secret.
pub const ENV_CONSUMER_SECRET: &str = "CONSUMER_SECRET";
/// Environment variable holding the token id.
pub const ENV_TOKEN_ID: &str = "TOKEN_ID";
/// Environment variable holding the token secret.
pub const ENV_TOKEN_SECRET: &str = "TOKEN_SECRET";
/// Optional environment variable overriding the SuiteTalk REST base URL.
pub const ENV_REST_BASE_URL: &str = "NETSUITE_REST_BASE_URL";
/// Optional environment variable overriding the RESTlet endpoint URL.
pub const ENV_RESTLET_URL: &str = "NETSUITE_RESTLET_URL";

/// Configuration for the NetSuite API client.
///
/// Holds the account id and the four token-based authentication credentials,
/// plus optional endpoint overrides and HTTP settings.
///
/// # Thread Safety
///
/// `NetsuiteConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct NetsuiteConfig {
    account_id: AccountId,
    consumer_key: ConsumerKey,
    consumer_secret: ConsumerSecret,
    token_id: TokenId,
    token_secret: TokenSecret,
    rest_base_url: Option<BaseUrl>,
    restlet_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl NetsuiteConfig {
    /// Creates a new builder for constructing a `NetsuiteConfig`.
    #[must_use]
    pub fn builder() -> NetsuiteConfigBuilder {
        NetsuiteConfigBuilder::new()
    }

    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory (or any parent) is loaded
    /// first when present; variables already set in the environment win.
    /// Reads [`ENV_ACCOUNT_ID`], [`ENV_CONSUMER_KEY`], [`ENV_CONSUMER_SECRET`],
    /// [`ENV_TOKEN_ID`] and [`ENV_TOKEN_SECRET`], plus the optional
    /// [`ENV_REST_BASE_URL`] and [`ENV_RESTLET_URL`] overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvironment`] naming every required
    /// variable that is unset or empty, or the validation error of the
    /// first invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = [
            ENV_ACCOUNT_ID,
            ENV_CONSUMER_KEY,
            ENV_CONSUMER_SECRET,
            ENV_TOKEN_ID,
            ENV_TOKEN_SECRET,
        ];
        let values = required.map(|name| lookup(name).filter(|value| !value.trim().is_empty()));

        let missing: Vec<&str> = required
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingEnvironment {
                variables: missing.join(", "),
            });
        }

        let [account_id, consumer_key, consumer_secret, token_id, token_secret] =
            values.map(Option::unwrap_or_default);

        let mut builder = Self::builder()
            .account_id(AccountId::new(account_id)?)
            .consumer_key(ConsumerKey::new(consumer_key)?)
            .consumer_secret(ConsumerSecret::new(consumer_secret)?)
            .token_id(TokenId::new(token_id)?)
            .token_secret(TokenSecret::new(token_secret)?);

        if let Some(url) = lookup(ENV_REST_BASE_URL) {
            builder = builder.rest_base_url(BaseUrl::new(url)?);
        }
        if let Some(url) = lookup(ENV_RESTLET_URL) {
            builder = builder.restlet_url(BaseUrl::new(url)?);
        }

        builder.build()
    }

    /// Returns the account id.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Returns the consumer key.
    #[must_use]
    pub const fn consumer_key(&self) -> &ConsumerKey {
        &self.consumer_key
    }

    /// Returns the consumer secret.
    #[must_use]
    pub const fn consumer_secret(&self) -> &ConsumerSecret {
        &self.consumer_secret
    }

    /// Returns the token id.
    #[must_use]
    pub const fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    /// Returns the token secret.
    #[must_use]
    pub const fn token_secret(&self) -> &TokenSecret {
        &self.token_secret
    }

    /// Returns the SuiteTalk REST base URL, without a trailing slash.
    ///
    /// Defaults to `https://{account}.suitetalk.api.netsuite.com/services/rest`.
    #[must_use]
    pub fn rest_base_url(&self) -> String {
        self.rest_base_url.as_ref().map_or_else(
            || {
                format!(
                    "https://{}.suitetalk.api.netsuite.com/services/rest",
                    self.account_id.host_prefix()
                )
            },
            |url| url.as_ref().to_string(),
        )
    }

    /// Returns the RESTlet endpoint URL.
    ///
    /// Defaults to `https://{account}.restlets.api.netsuite.com/app/site/hosting/restlet.nl`.
    #[must_use]
    pub fn restlet_url(&self) -> String {
        self.restlet_url.as_ref().map_or_else(
            || {
                format!(
                    "https://{}.restlets.api.netsuite.com/app/site/hosting/restlet.nl",
                    self.account_id.host_prefix()
                )
            },
            |url| url.as_ref().to_string(),
        )
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify NetsuiteConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NetsuiteConfig>();
};

/// Builder for constructing [`NetsuiteConfig`] instances.
///
/// Required fields are the account id and the four credentials. All other
/// fields are optional.
///
/// # Defaults
///
/// - `rest_base_url`: derived from the account id
/// - `restlet_url`: derived from the account id
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no client-side timeout)
#[derive(Debug, Default)]
pub struct NetsuiteConfigBuilder {
    account_id: Option<AccountId>,
    consumer_key: Option<ConsumerKey>,
    consumer_secret: Option<ConsumerSecret>,
    token_id: Option<TokenId>,
    token_secret: Option<TokenSecret>,
    rest_base_url: Option<BaseUrl>,
    restlet_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl NetsuiteConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account id (required).
    #[must_use]
    pub fn account_id(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Sets the consumer key (required).
    #[must_use]
    pub fn consumer_key(mut self, key: ConsumerKey) -> Self {
        self.consumer_key = Some(key);
        self
    }

    /// Sets the consumer secret (required).
    #[must_use]
    pub fn consumer_secret(mut self, secret: ConsumerSecret) -> Self {
        self.consumer_secret = Some(secret);
        self
    }

    /// Sets the token id (required).
    #[must_use]
    pub fn token_id(mut self, id: TokenId) -> Self {
        self.token_id = Some(id);
        self
    }

    /// Sets the token secret (required).
    #[must_use]
    pub fn token_secret(mut self, secret: TokenSecret) -> Self {
        self.token_secret = Some(secret);
        self
    }

    /// Overrides the SuiteTalk REST base URL.
    ///
    /// Useful for proxies and mock servers.
    #[must_use]
    pub fn rest_base_url(mut self, url: BaseUrl) -> Self {
        self.rest_base_url = Some(url);
        self
    }

    /// Overrides the RESTlet endpoint URL.
    #[must_use]
    pub fn restlet_url(mut self, url: BaseUrl) -> Self {
        self.restlet_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`NetsuiteConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] naming the first
    /// required field that was not set.
    pub fn build(self) -> Result<NetsuiteConfig, ConfigError> {
        let account_id = self
            .account_id
            .ok_or(ConfigError::MissingRequiredField {
                field: "account_id",
            })?;
        let consumer_key = self
            .consumer_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "consumer_key",
            })?;
        let consumer_secret = self
            .consumer_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "consumer_secret",
            })?;
        let token_id = self
            .token_id
            .ok_or(ConfigError::MissingRequiredField { field: "token_id" })?;
        let token_secret = self
            .token_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "token_secret",
            })?;

        Ok(NetsuiteConfig {
            account_id,
            consumer_key,
            consumer_secret,
            token_id,
            token_secret,
            rest_base_url: self.rest_base_url,
            restlet_url: self.restlet_url,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_builder() -> NetsuiteConfigBuilder {
        NetsuiteConfig::builder()
            .account_id(AccountId::new("1234567").unwrap())
            .consumer_key(ConsumerKey::new("ck").unwrap())
            .consumer_secret(ConsumerSecret::new("cs").unwrap())
            .token_id(TokenId::new("tk").unwrap())
            .token_secret(TokenSecret::new("ts").unwrap())
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_builder_requires_account_id() {
        let result = NetsuiteConfigBuilder::new()
            .consumer_key(ConsumerKey::new("ck").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "account_id"
            })
        ));
    }

    #[test]
    fn test_builder_requires_token_secret() {
        let result = NetsuiteConfigBuilder::new()
            .account_id(AccountId::new("1234567").unwrap())
            .consumer_key(ConsumerKey::new("ck").unwrap())
            .consumer_secret(ConsumerSecret::new("cs").unwrap())
            .token_id(TokenId::new("tk").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "token_secret"
            })
        ));
    }

    #[test]
    fn test_default_endpoints_use_account_host_prefix() {
        let config = NetsuiteConfig::builder()
            .account_id(AccountId::new("1234567_SB1").unwrap())
            .consumer_key(ConsumerKey::new("ck").unwrap())
            .consumer_secret(ConsumerSecret::new("cs").unwrap())
            .token_id(TokenId::new("tk").unwrap())
            .token_secret(TokenSecret::new("ts").unwrap())
            .build()
            .unwrap();

        assert_eq!(
            config.rest_base_url(),
            "https://1234567-sb1.suitetalk.api.netsuite.com/services/rest"
        );
        assert_eq!(
            config.restlet_url(),
            "https://1234567-sb1.restlets.api.netsuite.com/app/site/hosting/restlet.nl"
        );
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_endpoint_overrides() {
        let config = full_builder()
            .rest_base_url(BaseUrl::new("http://localhost:9000/rest/").unwrap())
            .restlet_url(BaseUrl::new("http://localhost:9000/restlet").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(config.rest_base_url(), "http://localhost:9000/rest");
        assert_eq!(config.restlet_url(), "http://localhost:9000/restlet");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = NetsuiteConfig::from_lookup(lookup_from(&[
            ("ACCOUNT_ID", "3609571"),
            ("CONSUMER_KEY", "ck"),
            ("CONSUMER_SECRET", "cs"),
            ("TOKEN_ID", "tk"),
            ("TOKEN_SECRET", "ts"),
            ("NETSUITE_REST_BASE_URL", "http://127.0.0.1:1234"),
        ]))
        .unwrap();

        assert_eq!(config.account_id().realm(), "3609571");
        assert_eq!(config.consumer_key().as_ref(), "ck");
        assert_eq!(config.consumer_secret().as_ref(), "cs");
        assert_eq!(config.token_id().as_ref(), "tk");
        assert_eq!(config.token_secret().as_ref(), "ts");
        assert_eq!(config.rest_base_url(), "http://127.0.0.1:1234");
        assert!(config.restlet_url().contains("3609571.restlets"));
    }

    #[test]
    fn test_from_lookup_reports_every_missing_variable() {
        let result = NetsuiteConfig::from_lookup(lookup_from(&[
            ("ACCOUNT_ID", "3609571"),
            ("CONSUMER_KEY", "ck"),
            ("TOKEN_ID", ""),
        ]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvironment {
                variables: "CONSUMER_SECRET, TOKEN_ID, TOKEN_SECRET".to_string()
            }
        );
    }

    #[test]
    fn test_from_lookup_validates_account_id() {
        let result = NetsuiteConfig::from_lookup(lookup_from(&[
            ("ACCOUNT_ID", "not an account"),
            ("CONSUMER_KEY", "ck"),
            ("CONSUMER_SECRET", "cs"),
            ("TOKEN_ID", "tk"),
            ("TOKEN_SECRET", "ts"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidAccountId { .. })
        ));
    }

    #[test]
    fn test_config_is_clone_and_debug_masks_secrets() {
        let config = full_builder().build().unwrap();
        let cloned = config.clone();
        assert_eq!(cloned.account_id(), config.account_id());

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("NetsuiteConfig"));
        assert!(debug_str.contains("ConsumerSecret(*****)"));
        assert!(debug_str.contains("TokenSecret(*****)"));
    }
}
