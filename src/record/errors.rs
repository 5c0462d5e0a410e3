//! # Record Errors

use thiserror::Error;

/// Result type for record construction
pub type RecordResult<T> = Result<T, RecordError>;

/// Reasons a payload cannot become a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Payload is not a JSON object
    #[error("Invalid JSON")]
    NotAnObject,

    /// One or more required fields are absent
    #[error("Missing fields")]
    MissingFields(Vec<&'static str>),

    /// A required field is present with the wrong JSON type
    #[error("Invalid field: {0}")]
    InvalidField(&'static str),
}

impl RecordError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        400
    }
}
