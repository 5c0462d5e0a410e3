//! # Record Store
//!
//! Owns the authoritative set of transaction records: id assignment,
//! keyed lookup, ordered range listing and write-through persistence.
//!
//! One [`TransactionStore`] exists per process. It is opened over a
//! [`PersistenceGateway`](crate::persistence::PersistenceGateway), shared by
//! `Arc` with the HTTP layer, and closed on shutdown.

pub mod comparison;
pub mod errors;
mod filter;
mod transaction_store;

pub use comparison::{linear_search, run_comparison, ComparisonReport};
pub use errors::{StoreError, StoreResult};
pub use filter::TimestampRange;
pub use transaction_store::TransactionStore;
