//! Pending cargo pool.
//!
//! A per-state volume ledger seeded from all currently unassigned cargo
//! records. The allocation engine drains it in date order during a single
//! synchronous pass; it is rebuilt from scratch on every refresh and never
//! persisted.
//!
//! State keys are normalized (uppercase UF codes) on build and on every
//! lookup, so `sp`, `Sp`, and `SP` all address the same ledger entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{normalize_uf, CargoRecord};

/// Mutable ledger of unallocated volume per state (m³).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingCargoPool {
    remaining: BTreeMap<String, f64>,
}

impl PendingCargoPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the pool by summing cargo volume grouped by state.
    ///
    /// This is a pure reduction over the snapshot, with no filtering by any
    /// "already allocated" flag: the pool represents gross unassigned
    /// demand at build time.
    pub fn from_records(records: &[CargoRecord]) -> Self {
        let mut pool = Self::new();
        for record in records {
            *pool.remaining.entry(record.uf()).or_insert(0.0) += record.volume_m3;
        }
        pool
    }

    /// Adds volume for a state (test and manual-assembly convenience).
    pub fn with_volume(mut self, uf: impl AsRef<str>, volume_m3: f64) -> Self {
        *self
            .remaining
            .entry(normalize_uf(uf.as_ref()))
            .or_insert(0.0) += volume_m3;
        self
    }

    /// Remaining volume for a state, 0.0 if the state has no entry.
    pub fn available(&self, uf: &str) -> f64 {
        self.remaining.get(&normalize_uf(uf)).copied().unwrap_or(0.0)
    }

    /// Draws up to `want` m³ from a state's ledger entry.
    ///
    /// Returns the volume actually granted: `min(available, want)`, never
    /// negative. Underflow is not an error; a drained state simply grants
    /// 0.0 to every subsequent caller.
    pub fn consume(&mut self, uf: &str, want: f64) -> f64 {
        if want <= 0.0 {
            return 0.0;
        }
        let key = normalize_uf(uf);
        match self.remaining.get_mut(&key) {
            Some(available) if *available > 0.0 => {
                let granted = available.min(want);
                *available -= granted;
                granted
            }
            _ => 0.0,
        }
    }

    /// Total remaining volume across all states (m³).
    pub fn total_volume_m3(&self) -> f64 {
        self.remaining.values().sum()
    }

    /// Iterates `(state, remaining m³)` in state order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.remaining.iter().map(|(uf, v)| (uf.as_str(), *v))
    }

    /// Number of states with a ledger entry.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Whether the pool has no ledger entries.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
