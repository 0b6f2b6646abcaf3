//! OAuth 1.0a request signing for NetSuite token-based authentication.
//!
//! Every request to SuiteTalk REST or a RESTlet carries an `Authorization`
//! header built from the integration record (consumer key/secret) and the
//! access token (token id/secret), signed with HMAC-SHA256 over the
//! RFC 5849 signature base string.
//!
//! # Example
//!
//! ```rust
//! use netsuite_api::auth::oauth1::RequestSigner;
//! use netsuite_api::{NetsuiteConfig, AccountId, ConsumerKey, ConsumerSecret, TokenId, TokenSecret};
//!
//! let config = NetsuiteConfig::builder()
//!     .account_id(AccountId::new("1234567").unwrap())
//!     .consumer_key(ConsumerKey::new("ck").unwrap())
//!     .consumer_secret(ConsumerSecret::new("cs").unwrap())
//!     .token_id(TokenId::new("tk").unwrap())
//!     .token_secret(TokenSecret::new("ts").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let signer = RequestSigner::new(&config);
//! let url = url::Url::parse("https://1234567.suitetalk.api.netsuite.com/services/rest/*").unwrap();
//! let header = signer.authorization_header("OPTIONS", &url);
//! assert!(header.starts_with(r#"OAuth realm="1234567""#));
//! ```

use rand::distributions::Alphanumeric;
use rand::Rng;
use url::Url;

use crate::auth::hmac::compute_signature_base64;
use crate::config::{ConsumerKey, ConsumerSecret, NetsuiteConfig, TokenId, TokenSecret};

/// The only signature method NetSuite accepts for new integrations.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";

/// OAuth protocol version sent in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

const NONCE_LENGTH: usize = 32;

/// Signs outgoing requests with the configured token-based credentials.
///
/// The signer is cheap to clone and holds no mutable state; each call to
/// [`authorization_header`](Self::authorization_header) draws a fresh nonce
/// and timestamp.
#[derive(Clone, Debug)]
pub struct RequestSigner {
    realm: String,
    consumer_key: ConsumerKey,
    consumer_secret: ConsumerSecret,
    token_id: TokenId,
    token_secret: TokenSecret,
}

impl RequestSigner {
    /// Creates a signer from the credentials in `config`.
    #[must_use]
    pub fn new(config: &NetsuiteConfig) -> Self {
        Self {
            realm: config.account_id().realm().to_string(),
            consumer_key: config.consumer_key().clone(),
            consumer_secret: config.consumer_secret().clone(),
            token_id: config.token_id().clone(),
            token_secret: config.token_secret().clone(),
        }
    }

    /// Returns the OAuth realm (the account id in realm form).
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Builds the `Authorization` header for a request, using the current
    /// time and a random nonce.
    #[must_use]
    pub fn authorization_header(&self, method: &str, url: &Url) -> String {
        let timestamp = chrono::Utc::now().timestamp();
        self.authorization_header_with(method, url, timestamp, &generate_nonce())
    }

    /// Builds the `Authorization` header with an explicit timestamp and nonce.
    ///
    /// Deterministic; [`authorization_header`](Self::authorization_header)
    /// delegates here.
    #[must_use]
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &Url,
        timestamp: i64,
        nonce: &str,
    ) -> String {
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.consumer_key.as_ref().to_string()),
            ("oauth_token", self.token_id.as_ref().to_string()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ];

        let base_string = signature_base_string(method, url, &oauth_params);
        let signing_key = format!(
            "{}&{}",
            percent_encode(self.consumer_secret.as_ref()),
            percent_encode(self.token_secret.as_ref())
        );
        let signature = compute_signature_base64(base_string.as_bytes(), &signing_key);
        oauth_params.push(("oauth_signature", signature));

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(key, value)| format!(r#"{key}="{}""#, percent_encode(value)))
            .collect();

        format!(r#"OAuth realm="{}", {}"#, self.realm, fields.join(", "))
    }
}

/// Percent-encodes a value per RFC 3986, leaving only unreserved
/// characters (`A-Z a-z 0-9 - . _ ~`) as-is.
#[must_use]
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Returns the base string URI: scheme, lowercase host, non-default port
/// and path, with query and fragment removed.
#[must_use]
pub fn normalized_base_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let mut base = format!("{}://{host}", url.scheme());
    if let Some(port) = url.port() {
        base.push_str(&format!(":{port}"));
    }
    base.push_str(url.path());
    base
}

/// Builds the OAuth 1.0a signature base string.
///
/// Query parameters from `url` and the `oauth_*` parameters are encoded,
/// sorted by key then value, and joined into the normalized parameter
/// string.
#[must_use]
pub fn signature_base_string(method: &str, url: &Url, oauth_params: &[(&str, String)]) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (percent_encode(&key), percent_encode(&value)))
        .chain(
            oauth_params
                .iter()
                .map(|(key, value)| (percent_encode(key), percent_encode(value))),
        )
        .collect();
    pairs.sort();

    let normalized = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&normalized_base_url(url)),
        percent_encode(&normalized)
    )
}

/// Generates a random alphanumeric nonce.
#[must_use]
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}
