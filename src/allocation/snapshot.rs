//! Board snapshot: atomic assemble/refresh plus the query surface the
//! presentation layer consumes.
//!
//! A snapshot owns one fetch cycle's worth of data. Assembling it rebuilds
//! the pending cargo pool from scratch and runs one full allocation pass;
//! refreshing replaces the whole snapshot wholesale. No incremental diffing
//! is attempted: the FIFO pool couples every loading's allocation to every
//! earlier one, so partial recomputation is unsafe by construction.

use chrono::NaiveDate;
use tracing::info;

use super::{AllocationEngine, AllocationResult, OccupancyMetrics, OccupancyProjector};
use crate::history::PerformanceHistory;
use crate::models::{CargoRecord, Loading, PendingCargoPool, VehicleCatalog};

/// One fetch cycle's data plus the allocation computed over it.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    loadings: Vec<Loading>,
    catalog: VehicleCatalog,
    history: PerformanceHistory,
    allocation: AllocationResult,
    initial_volume_m3: f64,
    remaining: PendingCargoPool,
}

impl BoardSnapshot {
    /// Assembles a snapshot: builds the pool, runs the allocation pass, and
    /// keeps the drained remainder for inspection.
    ///
    /// All four inputs must come from the same fetch cycle; the engine
    /// never runs against partially-refreshed data.
    pub fn assemble(
        cargo: Vec<CargoRecord>,
        loadings: Vec<Loading>,
        catalog: VehicleCatalog,
        history: PerformanceHistory,
    ) -> Self {
        let mut pool = PendingCargoPool::from_records(&cargo);
        let initial_volume_m3 = pool.total_volume_m3();
        let allocation = AllocationEngine::new().allocate(&loadings, &mut pool, &catalog);

        info!(
            loadings = loadings.len(),
            pool_states = pool.len(),
            initial_m3 = initial_volume_m3,
            allocated_m3 = allocation.total_volume_m3(),
            "assembled board snapshot"
        );

        Self {
            loadings,
            catalog,
            history,
            allocation,
            initial_volume_m3,
            remaining: pool,
        }
    }

    /// Atomically replaces this snapshot with a freshly assembled one.
    ///
    /// A superseding refresh discards the previous result wholesale; there
    /// is no cancellation of an in-flight pass because a pass is cheap and
    /// always runs to completion.
    pub fn refresh(
        &mut self,
        cargo: Vec<CargoRecord>,
        loadings: Vec<Loading>,
        catalog: VehicleCatalog,
        history: PerformanceHistory,
    ) {
        *self = Self::assemble(cargo, loadings, catalog, history);
    }

    /// Occupancy metrics for a loading id, `None` if the id is not on the
    /// board.
    pub fn occupancy(&self, loading_id: &str) -> Option<OccupancyMetrics> {
        self.loadings
            .iter()
            .find(|l| l.id == loading_id)
            .map(|l| self.occupancy_of(l))
    }

    /// Occupancy metrics for a loading.
    pub fn occupancy_of(&self, loading: &Loading) -> OccupancyMetrics {
        OccupancyProjector::new(&self.catalog, &self.history, &self.allocation)
            .occupancy(loading)
    }

    /// All loadings on the board.
    pub fn loadings(&self) -> &[Loading] {
        &self.loadings
    }

    /// Loadings departing on the given date (calendar-cell grouping).
    pub fn loadings_on(&self, date: NaiveDate) -> Vec<&Loading> {
        self.loadings
            .iter()
            .filter(|l| l.scheduled_date == date)
            .collect()
    }

    /// Loadings serving at least one of the given states.
    ///
    /// An empty filter returns everything.
    pub fn loadings_serving(&self, ufs: &[String]) -> Vec<&Loading> {
        if ufs.is_empty() {
            return self.loadings.iter().collect();
        }
        self.loadings
            .iter()
            .filter(|l| ufs.iter().any(|uf| l.serves(uf)))
            .collect()
    }

    /// The allocation computed for this snapshot.
    pub fn allocation(&self) -> &AllocationResult {
        &self.allocation
    }

    /// The pool as left by the allocation pass.
    pub fn remaining_pool(&self) -> &PendingCargoPool {
        &self.remaining
    }

    /// Total pending volume before the pass ran (m³).
    pub fn initial_volume_m3(&self) -> f64 {
        self.initial_volume_m3
    }

    /// The vehicle catalog this snapshot was assembled with.
    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    /// The performance history this snapshot was assembled with.
    pub fn history(&self) -> &PerformanceHistory {
        &self.history
    }
}
