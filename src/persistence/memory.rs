//! In-memory backend for tests and ephemeral stores.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use super::errors::{PersistenceError, PersistenceResult};
use super::PersistenceGateway;
use crate::record::Record;

/// Gateway that keeps the last saved snapshot in memory
#[derive(Debug, Default)]
pub struct MemoryGateway {
    snapshot: RwLock<Vec<Record>>,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `records` already persisted
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            snapshot: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Last successfully saved record set
    pub fn snapshot(&self) -> Vec<Record> {
        self.snapshot
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> PersistenceResult<Vec<Record>> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| PersistenceError::WriteRejected("Lock poisoned".to_string()))?;
        Ok(snapshot.clone())
    }

    fn save(&self, records: &[&Record]) -> PersistenceResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::WriteRejected(
                "simulated write failure".to_string(),
            ));
        }

        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| PersistenceError::WriteRejected("Lock poisoned".to_string()))?;
        *snapshot = records.iter().map(|record| (*record).clone()).collect();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
