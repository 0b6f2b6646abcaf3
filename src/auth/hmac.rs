//! HMAC-SHA256 signing for OAuth 1.0a request signatures.
//!
//! NetSuite token-based authentication signs every request with
//! HMAC-SHA256 and sends the digest base64-encoded.
//!
//! # Example
//!
//! ```rust
//! use netsuite_api::auth::hmac::compute_signature_base64;
//!
//! let sig = compute_signature_base64(b"POST&https%3A%2F%2Fexample.com&", "cs&ts");
//! assert_eq!(sig.len(), 44); // Base64 of 32 bytes
//! ```

use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes an HMAC-SHA256 signature for raw bytes, returning base64-encoded output.
///
/// # Arguments
///
/// * `message` - The bytes to sign (the OAuth signature base string)
/// * `key` - The signing key (`consumer_secret&token_secret`, both percent-encoded)
///
/// # Returns
///
/// A base64-encoded HMAC-SHA256 signature (RFC 4648 standard base64).
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature_base64(message: &[u8], key: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}
