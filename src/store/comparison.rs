//! Linear scan vs keyed lookup timing.
//!
//! Backs the `compare` CLI command: samples ids from a store and times
//! finding each one by scanning a listing against asking the store's index.

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;
use serde::Serialize;

use super::errors::StoreResult;
use super::filter::TimestampRange;
use super::transaction_store::TransactionStore;
use crate::record::Record;

/// Fixed so repeated runs over the same file time the same ids
const SAMPLE_SEED: u64 = 0x6d6f6d6f;

/// Outcome of one comparison run
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// Number of ids looked up by each strategy
    pub lookups: usize,
    /// Lookups the linear pass actually found
    pub linear_hits: usize,
    pub linear_ms: f64,
    pub indexed_ms: f64,
    /// `linear_ms / indexed_ms`; absent when the indexed pass was too fast to time
    pub speedup: Option<f64>,
}

/// Find a record by walking `records` front to back
pub fn linear_search(records: &[Record], id: u64) -> Option<&Record> {
    records.iter().find(|record| record.id == id)
}

/// Time `lookups` sampled ids (capped at the store size) both ways.
pub fn run_comparison(store: &TransactionStore, lookups: usize) -> StoreResult<ComparisonReport> {
    let listing = store.list(&TimestampRange::all())?;
    let count = lookups.min(listing.len());

    let mut rng = StdRng::seed_from_u64(SAMPLE_SEED);
    let targets: Vec<u64> = sample(&mut rng, listing.len(), count)
        .into_iter()
        .map(|index| listing[index].id)
        .collect();

    let started = Instant::now();
    let mut linear_hits = 0;
    for id in &targets {
        if black_box(linear_search(&listing, black_box(*id))).is_some() {
            linear_hits += 1;
        }
    }
    let linear = started.elapsed();

    let started = Instant::now();
    for id in &targets {
        black_box(store.get(black_box(*id))?);
    }
    let indexed = started.elapsed();

    Ok(ComparisonReport {
        lookups: count,
        linear_hits,
        linear_ms: millis(linear),
        indexed_ms: millis(indexed),
        speedup: (!indexed.is_zero()).then(|| linear.as_secs_f64() / indexed.as_secs_f64()),
    })
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
