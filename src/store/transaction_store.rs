//! # Transaction Store
//!
//! Authoritative in-memory record set with write-through persistence.
//!
//! ## Representation
//! Records live in one id-keyed ordered map. Ids are handed out by a
//! monotonic counter, so ascending id order is insertion order: the map
//! serves keyed lookup and ordered listing without a second structure to
//! keep in sync.
//!
//! ## Invariants
//! - `next_id` only grows; deleted ids are never handed out again
//! - A failed validation touches nothing and persists nothing
//! - A failed save rolls memory and `next_id` back to their prior values
//! - Mutations hold the write lock across apply + save; readers never see
//!   an unsaved or half-applied state

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use super::filter::TimestampRange;
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::persistence::{PersistenceError, PersistenceGateway};
use crate::record::{is_valid, missing_fields, Record, RecordError};

struct StoreState {
    records: BTreeMap<u64, Record>,
    next_id: u64,
}

impl StoreState {
    fn snapshot(&self) -> Vec<&Record> {
        self.records.values().collect()
    }
}

/// Process-wide record store
pub struct TransactionStore {
    state: RwLock<StoreState>,
    gateway: Box<dyn PersistenceGateway>,
}

impl TransactionStore {
    /// Load the persisted set through `gateway` and take ownership of it.
    ///
    /// The id counter resumes at `max(id) + 1`, or 1 for an empty set. A set
    /// already holding `u64::MAX` leaves no id to resume at and fails.
    pub fn open<G: PersistenceGateway + 'static>(gateway: G) -> StoreResult<Self> {
        let scope = ObservationScope::new("STORE_LOAD");
        let loaded = gateway.load()?;

        let mut records = BTreeMap::new();
        for record in loaded {
            let id = record.id;
            if records.insert(id, record).is_some() {
                return Err(PersistenceError::DuplicateId(id).into());
            }
        }
        let next_id = match records.keys().next_back() {
            Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted)?,
            None => 1,
        };

        let count = records.len().to_string();
        let next = next_id.to_string();
        scope.complete(&[("records", count.as_str())]);
        log_event_with_fields(
            Event::StoreOpened,
            &[("records", count.as_str()), ("next_id", next.as_str())],
        );

        Ok(Self {
            state: RwLock::new(StoreState { records, next_id }),
            gateway: Box::new(gateway),
        })
    }

    /// Flush the current set one last time and release the store.
    pub fn close(self) -> StoreResult<()> {
        let state = self.read()?;
        self.persist(&state)?;
        let count = state.records.len().to_string();
        log_event_with_fields(Event::StoreClosed, &[("records", count.as_str())]);
        Ok(())
    }

    /// Records in insertion order, restricted to `filter`
    pub fn list(&self, filter: &TimestampRange) -> StoreResult<Vec<Record>> {
        let state = self.read()?;
        Ok(state
            .records
            .values()
            .filter(|record| filter.contains(&record.timestamp))
            .cloned()
            .collect())
    }

    pub fn get(&self, id: u64) -> StoreResult<Record> {
        let state = self.read()?;
        state
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Validate `payload`, assign the next id, admit and persist.
    ///
    /// A client-supplied `id` is ignored.
    pub fn create(&self, payload: Value) -> StoreResult<Record> {
        if !is_valid(&payload) {
            let err = match payload.as_object() {
                Some(object) => RecordError::MissingFields(missing_fields(object)),
                None => RecordError::NotAnObject,
            };
            return Err(rejected("create", err));
        }
        let payload = into_object(payload)?;

        let mut state = self.write()?;
        let id = state.next_id;
        let next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let record = Record::from_payload(id, payload).map_err(|e| rejected("create", e))?;

        state.records.insert(id, record.clone());
        state.next_id = next_id;

        if let Err(e) = self.persist(&state) {
            state.records.remove(&id);
            state.next_id = id;
            return Err(e);
        }

        log_event_with_fields(Event::RecordCreated, &[("id", id.to_string().as_str())]);
        Ok(record)
    }

    /// Merge `partial` into record `id` and persist. `id` keys are ignored.
    ///
    /// An unknown id is reported before anything about `partial`.
    pub fn update(&self, id: u64, partial: Value) -> StoreResult<Record> {
        let mut state = self.write()?;
        let current = state.records.get(&id).ok_or(StoreError::NotFound(id))?;
        let partial = into_object(partial)?;
        let updated = current.merge(&partial).map_err(|e| rejected("update", e))?;

        let previous = state.records.insert(id, updated.clone());

        if let Err(e) = self.persist(&state) {
            if let Some(previous) = previous {
                state.records.insert(id, previous);
            }
            return Err(e);
        }

        log_event_with_fields(Event::RecordUpdated, &[("id", id.to_string().as_str())]);
        Ok(updated)
    }

    /// Remove record `id` and persist.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        let mut state = self.write()?;
        let removed = state.records.remove(&id).ok_or(StoreError::NotFound(id))?;

        if let Err(e) = self.persist(&state) {
            state.records.insert(id, removed);
            return Err(e);
        }

        log_event_with_fields(Event::RecordDeleted, &[("id", id.to_string().as_str())]);
        Ok(())
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.records.is_empty())
    }

    /// Id the next successful create will receive
    pub fn next_id(&self) -> StoreResult<u64> {
        Ok(self.read()?.next_id)
    }

    /// Admitted ids in ascending order
    pub fn ids(&self) -> StoreResult<Vec<u64>> {
        Ok(self.read()?.records.keys().copied().collect())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| StoreError::lock_poisoned())
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| StoreError::lock_poisoned())
    }

    fn persist(&self, state: &StoreState) -> StoreResult<()> {
        self.gateway.save(&state.snapshot()).map_err(|e| {
            log_event_with_fields(Event::PersistFailed, &[("reason", e.to_string().as_str())]);
            StoreError::from(e)
        })
    }
}

fn into_object(payload: Value) -> StoreResult<Map<String, Value>> {
    match payload {
        Value::Object(object) => Ok(object),
        _ => Err(RecordError::NotAnObject.into()),
    }
}

fn rejected(op: &str, err: RecordError) -> StoreError {
    let reason = err.to_string();
    log_event_with_fields(Event::RecordRejected, &[("op", op), ("reason", reason.as_str())]);
    err.into()
}
