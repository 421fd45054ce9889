//! FIFO load-allocation engine.
//!
//! # Algorithm
//!
//! 1. Keep only pool-consuming loadings (scheduled/confirmed).
//! 2. Stable-sort ascending by scheduled date; ties keep source order.
//! 3. For each loading in order, draw from each served state's ledger entry
//!    until the vehicle capacity is reached or the states are exhausted.
//!
//! The pool is shared and mutated across the whole sorted pass: volume
//! consumed by an earlier-dated loading is permanently unavailable to a
//! later one. This models a single physical cargo yard being drained by
//! successive trucks: first departure gets first claim.
//!
//! # Complexity
//! O(n log n + n * s) where n=loadings, s=served states per loading.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching (FIFO rule)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{Loading, PendingCargoPool, VehicleCatalog};

/// Allocated volume per loading id (m³).
///
/// The engine's sole output artifact for non-finalized loadings. Absent ids
/// resolve to 0.0: either not eligible for allocation or genuinely empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    allocated: BTreeMap<String, f64>,
}

impl AllocationResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocated volume for a loading, 0.0 if absent.
    pub fn volume_m3(&self, loading_id: &str) -> f64 {
        self.allocated.get(loading_id).copied().unwrap_or(0.0)
    }

    /// Whether the result holds an entry for the given loading.
    pub fn contains(&self, loading_id: &str) -> bool {
        self.allocated.contains_key(loading_id)
    }

    /// Total allocated volume across all loadings (m³).
    pub fn total_volume_m3(&self) -> f64 {
        self.allocated.values().sum()
    }

    /// Iterates `(loading id, allocated m³)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.allocated.iter().map(|(id, v)| (id.as_str(), *v))
    }

    /// Number of loadings with an entry.
    pub fn len(&self) -> usize {
        self.allocated.len()
    }

    /// Whether the result is empty.
    pub fn is_empty(&self) -> bool {
        self.allocated.is_empty()
    }

    fn record(&mut self, loading_id: &str, volume_m3: f64) {
        self.allocated.insert(loading_id.to_string(), volume_m3);
    }
}

/// Sequential, date-ordered, capacity-bounded allocator.
///
/// Stateless: every call operates only on the arguments. The pool argument
/// is drained in place so callers can inspect the remainder after the pass.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use loadplan::allocation::AllocationEngine;
/// use loadplan::models::{Loading, PendingCargoPool, VehicleCatalog, VehicleProfile};
///
/// let loadings = vec![
///     Loading::new("L1", NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), "CARRETA")
///         .with_served_state("SP"),
/// ];
/// let mut pool = PendingCargoPool::new().with_volume("SP", 30.0);
/// let catalog = VehicleCatalog::from_profiles(vec![VehicleProfile::new("CARRETA", 28.0)]);
///
/// let result = AllocationEngine::new().allocate(&loadings, &mut pool, &catalog);
/// assert!((result.volume_m3("L1") - 28.0).abs() < 1e-10);
/// assert!((pool.available("SP") - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllocationEngine;

impl AllocationEngine {
    /// Creates an engine.
    pub fn new() -> Self {
        Self
    }

    /// Runs one full allocation pass.
    ///
    /// Realized and cancelled loadings never consume the pool; their ids do
    /// not appear in the result. Every eligible loading gets an entry, even
    /// an explicit 0.0 (unknown profile, drained states, or no served
    /// states).
    ///
    /// Within a loading, served states are drawn from in the order given;
    /// the array order is part of the contract.
    pub fn allocate(
        &self,
        loadings: &[Loading],
        pool: &mut PendingCargoPool,
        catalog: &VehicleCatalog,
    ) -> AllocationResult {
        let mut order: Vec<usize> = (0..loadings.len())
            .filter(|&i| loadings[i].status.consumes_pool())
            .collect();
        // Stable by construction: equal dates keep source order
        order.sort_by_key(|&i| loadings[i].scheduled_date);

        let mut result = AllocationResult::new();
        for &i in &order {
            let loading = &loadings[i];
            let capacity = catalog.capacity_m3(&loading.vehicle_profile);

            let mut allocated = 0.0;
            if capacity > 0.0 {
                for state in &loading.served_states {
                    if allocated >= capacity {
                        break;
                    }
                    allocated += pool.consume(state, capacity - allocated);
                }
            }

            debug!(
                loading = %loading.id,
                date = %loading.scheduled_date,
                capacity_m3 = capacity,
                allocated_m3 = allocated,
                "allocated loading"
            );
            result.record(&loading.id, allocated);
        }

        result
    }
}
