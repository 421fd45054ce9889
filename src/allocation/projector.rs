//! Occupancy projector: the per-loading metrics query surface.
//!
//! Dispatches on loading status: realized loadings report historical truth
//! (zero-filled while the fiscal documents are pending), cancelled loadings
//! always report zeroed metrics, and everything else reports the allocation
//! engine's projection.

use serde::{Deserialize, Serialize};

use super::AllocationResult;
use crate::history::PerformanceHistory;
use crate::models::{Loading, LoadingStatus, VehicleCatalog};

/// Where a loading's reported figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricsSource {
    /// Projected by the allocation engine (scheduled/confirmed loading).
    Projected,
    /// Actuals from the historical aggregate.
    Realized,
    /// Realized loading whose aggregate has not been released yet;
    /// figures are zero-filled, not in error.
    RealizedPending,
    /// Cancelled loading; figures are zeroed regardless of any stored
    /// allocation.
    Cancelled,
}

impl MetricsSource {
    /// Whether the figures are placeholders awaiting released data.
    pub fn data_pending(self) -> bool {
        matches!(self, Self::RealizedPending)
    }
}

/// Per-loading occupancy and financial metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyMetrics {
    /// Carried (realized) or allocated (projected) volume (m³).
    pub volume_m3: f64,
    /// Vehicle capacity from the catalog (0.0 for unknown profiles).
    pub capacity_m3: f64,
    /// `volume / max(capacity, 1) * 100`, never clamped. Values above 100
    /// are valid and drive excess alerts downstream.
    pub occupancy_percent: f64,
    /// Net revenue (0.0 for projected loadings; only history carries money).
    pub net_revenue: f64,
    /// Net cost (0.0 for projected loadings).
    pub net_cost: f64,
    /// Provenance of the figures.
    pub source: MetricsSource,
}

impl OccupancyMetrics {
    /// Whether the loading exceeds its vehicle capacity.
    pub fn is_overloaded(&self) -> bool {
        self.occupancy_percent > 100.0
    }

    /// Occupancy capped at 100% for progress-bar style displays.
    pub fn display_percent(&self) -> f64 {
        self.occupancy_percent.min(100.0)
    }
}

/// Computes [`OccupancyMetrics`] for any loading.
///
/// Borrows the catalog, the history, and one allocation pass's result; a
/// fresh projector is built per snapshot, never cached across refreshes.
#[derive(Debug)]
pub struct OccupancyProjector<'a> {
    catalog: &'a VehicleCatalog,
    history: &'a PerformanceHistory,
    allocation: &'a AllocationResult,
}

impl<'a> OccupancyProjector<'a> {
    /// Creates a projector over one snapshot's artifacts.
    pub fn new(
        catalog: &'a VehicleCatalog,
        history: &'a PerformanceHistory,
        allocation: &'a AllocationResult,
    ) -> Self {
        Self {
            catalog,
            history,
            allocation,
        }
    }

    /// Metrics for a loading, dispatched on its status.
    pub fn occupancy(&self, loading: &Loading) -> OccupancyMetrics {
        let capacity_m3 = self.catalog.capacity_m3(&loading.vehicle_profile);

        let (volume_m3, net_revenue, net_cost, source) = match loading.status {
            LoadingStatus::Cancelled => (0.0, 0.0, 0.0, MetricsSource::Cancelled),
            LoadingStatus::Realized => match self.history.realized(&loading.id) {
                Some(m) => (
                    m.volume_m3,
                    m.net_revenue,
                    m.net_cost,
                    MetricsSource::Realized,
                ),
                None => (0.0, 0.0, 0.0, MetricsSource::RealizedPending),
            },
            LoadingStatus::Scheduled | LoadingStatus::Confirmed => (
                self.allocation.volume_m3(&loading.id),
                0.0,
                0.0,
                MetricsSource::Projected,
            ),
        };

        OccupancyMetrics {
            volume_m3,
            capacity_m3,
            // Denominator floored at 1 so an unknown profile yields a large
            // percentage flag instead of NaN/Infinity
            occupancy_percent: volume_m3 / capacity_m3.max(1.0) * 100.0,
            net_revenue,
            net_cost,
            source,
        }
    }
}
