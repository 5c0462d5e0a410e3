//! # Store Errors

use thiserror::Error;

use crate::persistence::PersistenceError;
use crate::record::RecordError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id
    #[error("Transaction not found")]
    NotFound(u64),

    /// Payload failed field validation; nothing was changed
    #[error(transparent)]
    Validation(#[from] RecordError),

    /// The gateway could not load or save; the mutation was rolled back
    #[error("Storage failure: {0}")]
    Persistence(#[from] PersistenceError),

    /// Every id up to `u64::MAX` has been handed out
    #[error("Id space exhausted")]
    IdsExhausted,

    /// Poisoned lock or similar
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Validation(e) => e.status_code(),
            StoreError::Persistence(_) => 500,
            StoreError::IdsExhausted => 500,
            StoreError::Internal(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    pub(crate) fn lock_poisoned() -> Self {
        StoreError::Internal("Lock poisoned".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StoreError::NotFound(1).status_code(), 404);
        assert_eq!(
            StoreError::from(RecordError::MissingFields(vec!["type"])).status_code(),
            400
        );
        assert_eq!(
            StoreError::from(PersistenceError::WriteRejected("disk full".into())).status_code(),
            500
        );
        assert_eq!(StoreError::lock_poisoned().status_code(), 500);
        assert_eq!(StoreError::IdsExhausted.status_code(), 500);
    }

    #[test]
    fn test_validation_message_is_transparent() {
        let err = StoreError::from(RecordError::NotAnObject);
        assert_eq!(err.to_string(), "Invalid JSON");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(StoreError::NotFound(9).to_string(), "Transaction not found");
    }
}
