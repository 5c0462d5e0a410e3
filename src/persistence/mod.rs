//! # Persistence Gateway
//!
//! Load/save boundary between the in-memory store and durable storage.
//!
//! The whole record set is read once at store open and rewritten in full
//! after every successful mutation. `save` is synchronous: the mutating call
//! that triggers it does not report success until the write has landed.

mod errors;
mod json_file;
mod memory;

pub use errors::{PersistenceError, PersistenceResult};
pub use json_file::JsonFileGateway;
pub use memory::MemoryGateway;

use crate::record::Record;

/// Durable backing for a record set
pub trait PersistenceGateway: Send + Sync {
    /// Read every persisted record.
    ///
    /// A backing store that does not exist yet yields an empty set.
    fn load(&self) -> PersistenceResult<Vec<Record>>;

    /// Replace the persisted set with `records`, in the given order.
    fn save(&self, records: &[&Record]) -> PersistenceResult<()>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for std::sync::Arc<G> {
    fn load(&self) -> PersistenceResult<Vec<Record>> {
        (**self).load()
    }

    fn save(&self, records: &[&Record]) -> PersistenceResult<()> {
        (**self).save(records)
    }
}
