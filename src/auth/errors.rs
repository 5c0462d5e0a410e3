//! # Auth Errors

use thiserror::Error;

/// Result type for auth checks
pub type AuthResult<T> = Result<T, AuthError>;

/// Reasons a request is refused at the door.
///
/// Both variants render the same generic message so responses do not reveal
/// which part of the credential was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header, or not a Basic one
    #[error("Unauthorized")]
    MissingCredentials,

    /// Basic header present but the credential does not match
    #[error("Unauthorized")]
    InvalidCredentials,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        401
    }

    /// Short machine-readable reason, for logs only
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::InvalidCredentials => "invalid_credentials",
        }
    }
}
