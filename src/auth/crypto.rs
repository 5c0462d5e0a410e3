//! # Credential Encoding
//!
//! Basic-auth token handling and constant-time comparison.
//!
//! ## Invariants
//! - Secrets are always compared in constant time

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use subtle::ConstantTimeEq;

/// Encode `username:password` as a Basic-auth token
pub fn encode_basic(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{}:{}", username, password))
}

/// Decode a Basic-auth token into its raw `username:password` bytes.
///
/// Returns `None` for anything that is not valid base64.
pub fn decode_basic(token: &str) -> Option<Vec<u8>> {
    STANDARD.decode(token.trim()).ok()
}

/// Constant-time comparison of two byte slices
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
