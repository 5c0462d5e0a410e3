//! # Transaction Records
//!
//! The value type held by the store and the field rules every admitted
//! record satisfies.
//!
//! ## Invariants
//! - Every record carries `type`, `amount`, `sender`, `receiver` and `timestamp`
//! - `id` is owned by the store; payload ids are never trusted
//! - Fields outside the required set pass through untouched

mod errors;
mod transaction;
mod validation;

pub use errors::{RecordError, RecordResult};
pub use transaction::Record;
pub use validation::{is_valid, missing_fields, REQUIRED_FIELDS};
