//! # Authentication
//!
//! Static credential check guarding every HTTP request.
//!
//! ## Invariants
//! - Secrets are compared in constant time
//! - Error messages never say which part of a credential was wrong

pub mod credentials;
pub mod crypto;
pub mod errors;

pub use credentials::{BasicCredentials, CredentialVerifier};
pub use errors::{AuthError, AuthResult};

/// Run `verifier` over a request's `Authorization` header.
///
/// Distinguishes a missing header from a wrong one for logging; both are
/// rejected the same way.
pub fn authenticate(verifier: &dyn CredentialVerifier, header: Option<&str>) -> AuthResult<()> {
    if verifier.verify(header) {
        return Ok(());
    }
    match header {
        Some(value) if value.starts_with("Basic ") => Err(AuthError::InvalidCredentials),
        _ => Err(AuthError::MissingCredentials),
    }
}
