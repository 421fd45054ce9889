//! Pending cargo model.
//!
//! A cargo record is the smallest unit of freight demand: volume waiting at
//! a state, with its associated revenue and box count. Records are an
//! immutable snapshot per fetch cycle; the allocation engine consumes them
//! virtually through the [`PendingCargoPool`](super::PendingCargoPool)
//! ledger, never destructively.

use serde::{Deserialize, Serialize};

/// Unassigned freight demand waiting at a state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoRecord {
    /// Two-letter UF code of the state the cargo waits in.
    pub state: String,
    /// Volumetric measure of the cargo (m³).
    pub volume_m3: f64,
    /// Gross revenue tied to this cargo.
    pub revenue: f64,
    /// Number of boxes (shipping units).
    pub box_count: i64,
}

impl CargoRecord {
    /// Creates a cargo record with the given state and volume.
    pub fn new(state: impl Into<String>, volume_m3: f64) -> Self {
        Self {
            state: state.into(),
            volume_m3,
            revenue: 0.0,
            box_count: 0,
        }
    }

    /// Sets the gross revenue.
    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = revenue;
        self
    }

    /// Sets the box count.
    pub fn with_box_count(mut self, box_count: i64) -> Self {
        self.box_count = box_count;
        self
    }

    /// The normalized (uppercased) UF code.
    pub fn uf(&self) -> String {
        super::normalize_uf(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cargo_builder() {
        let c = CargoRecord::new("SP", 12.5)
            .with_revenue(30_000.0)
            .with_box_count(480);

        assert_eq!(c.state, "SP");
        assert!((c.volume_m3 - 12.5).abs() < 1e-10);
        assert!((c.revenue - 30_000.0).abs() < 1e-10);
        assert_eq!(c.box_count, 480);
    }

    #[test]
    fn test_cargo_uf_normalized() {
        let c = CargoRecord::new("sp ", 1.0);
        assert_eq!(c.uf(), "SP");
    }
}
