//! Load allocation and occupancy projection.
//!
//! The heart of the crate: a sequential, date-ordered, capacity-bounded
//! allocator over a shared per-state cargo pool, plus the status-dispatched
//! occupancy query surface and the atomic snapshot/refresh container.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use loadplan::allocation::BoardSnapshot;
//! use loadplan::history::PerformanceHistory;
//! use loadplan::models::{CargoRecord, Loading, VehicleCatalog, VehicleProfile};
//!
//! let snapshot = BoardSnapshot::assemble(
//!     vec![CargoRecord::new("SP", 30.0)],
//!     vec![Loading::new("L1", NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), "CARRETA")
//!         .with_served_state("SP")],
//!     VehicleCatalog::from_profiles(vec![VehicleProfile::new("CARRETA", 28.0)]),
//!     PerformanceHistory::new(),
//! );
//! let metrics = snapshot.occupancy("L1").unwrap();
//! assert!((metrics.occupancy_percent - 100.0).abs() < 1e-10);
//! ```

mod engine;
mod projector;
mod snapshot;

pub use engine::{AllocationEngine, AllocationResult};
pub use projector::{MetricsSource, OccupancyMetrics, OccupancyProjector};
pub use snapshot::BoardSnapshot;
