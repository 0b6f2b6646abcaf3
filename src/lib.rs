//! # NetSuite API Rust Client
//!
//! A Rust client for the NetSuite SuiteTalk REST API, providing type-safe
//! configuration, OAuth 1.0a token-based authentication, and a
//! cursor-following paginator for NetSuite's paged collection responses.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`NetsuiteConfig`] and [`NetsuiteConfigBuilder`]
//! - Validated newtypes for account ids and credentials
//! - OAuth 1.0a request signing with HMAC-SHA256 via [`auth::RequestSigner`]
//! - Async HTTP client with retry logic and NetSuite error parsing
//! - [`RestClient`] helpers for SuiteQL, RESTlets, record requests and metadata
//! - [`Paginator`], a generic stream of pages driven by an injected fetch function
//!
//! ## Quick Start
//!
//! ```rust
//! use netsuite_api::{NetsuiteConfig, AccountId, ConsumerKey, ConsumerSecret, TokenId, TokenSecret};
//!
//! let config = NetsuiteConfig::builder()
//!     .account_id(AccountId::new("1234567").unwrap())
//!     .consumer_key(ConsumerKey::new("consumer-key").unwrap())
//!     .consumer_secret(ConsumerSecret::new("consumer-secret").unwrap())
//!     .token_id(TokenId::new("token-id").unwrap())
//!     .token_secret(TokenSecret::new("token-secret").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! Or from the environment (a `.env` file is loaded when present):
//!
//! ```rust,ignore
//! let config = netsuite_api::NetsuiteConfig::from_env()?;
//! ```
//!
//! ## Paginating SuiteQL Results
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use netsuite_api::RestClient;
//!
//! let client = RestClient::new(&config);
//!
//! let stream = client.suiteql_stream::<serde_json::Value>("SELECT id, companyname FROM customer", 1000);
//! futures::pin_mut!(stream);
//! while let Some(page) = stream.try_next().await? {
//!     for customer in &page.items {
//!         println!("{}", customer["companyname"]);
//!     }
//! }
//! ```
//!
//! ## Paginating Anything
//!
//! [`Paginator`] does not know about HTTP. Any async function from
//! `(offset, limit)` to a [`Page`] drives it:
//!
//! ```rust
//! use futures::TryStreamExt;
//! use netsuite_api::{Page, Paginator};
//!
//! # tokio_test::block_on(async {
//! let mut paginator = Paginator::new(|offset: u64, _limit: u32| async move {
//!     Ok::<_, std::convert::Infallible>(Page::new(vec![offset], vec![]))
//! });
//!
//! let pages: Vec<Page<u64>> = paginator.run().try_collect().await.unwrap();
//! assert_eq!(pages.len(), 1);
//! # });
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Clients and configuration are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Lazy pagination**: Pages are fetched one at a time, only when polled

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod pagination;

// Re-export public types at crate root for convenience
pub use auth::RequestSigner;
pub use config::{
    AccountId, BaseUrl, ConsumerKey, ConsumerSecret, NetsuiteConfig, NetsuiteConfigBuilder,
    TokenId, TokenSecret,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, MetadataOptions,
    RestClient, RestError,
};

// Re-export pagination types
pub use pagination::{FetchPage, NavigationLink, Page, Paginator, DEFAULT_LIMIT};
