//! Authentication for the NetSuite API client.
//!
//! NetSuite token-based authentication (TBA) is OAuth 1.0a with
//! pre-issued tokens: there is no authorization flow, every request is
//! signed with the integration record's consumer credentials and an access
//! token's credentials.
//!
//! # Overview
//!
//! - [`RequestSigner`]: builds the `Authorization` header for a request
//! - [`hmac`]: the HMAC-SHA256 primitive used for signatures
//! - [`oauth1`]: signature base string construction and percent-encoding

pub mod hmac;
pub mod oauth1;

pub use oauth1::RequestSigner;
