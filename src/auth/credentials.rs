//! Pluggable credential verification.

use super::crypto::{constant_time_eq, decode_basic};

/// Decides whether an `Authorization` header grants access.
///
/// The HTTP layer only ever sees this trait, so where the secret lives can
/// change without touching request handling.
pub trait CredentialVerifier: Send + Sync {
    /// `header` is the raw `Authorization` value, if the request sent one.
    fn verify(&self, header: Option<&str>) -> bool;
}

/// A single static `username:password` pair checked via HTTP Basic auth
#[derive(Clone)]
pub struct BasicCredentials {
    expected: Vec<u8>,
}

impl BasicCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            expected: format!("{}:{}", username, password).into_bytes(),
        }
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials").finish_non_exhaustive()
    }
}

impl CredentialVerifier for BasicCredentials {
    fn verify(&self, header: Option<&str>) -> bool {
        header
            .and_then(|value| value.strip_prefix("Basic "))
            .and_then(decode_basic)
            .map_or(false, |presented| constant_time_eq(&presented, &self.expected))
    }
}
