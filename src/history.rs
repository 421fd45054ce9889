//! Realized performance history.
//!
//! Holds the precomputed historical aggregates supplied by the data layer:
//! one row per realized loading, plus an optional per-(loading, state)
//! breakdown. The allocation engine never produces these figures: once a
//! loading is realized, historical truth overrides projection
//! unconditionally.
//!
//! A missing aggregate for a realized loading means the fiscal documents
//! have not been released yet ("data not yet available"), not a
//! computational error; lookups return `None` and the projector zero-fills
//! downstream.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::normalize_uf;

/// Actual recorded figures for one realized loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealizedMetrics {
    /// Loading this row belongs to.
    pub loading_id: String,
    /// Total volume actually carried (m³).
    pub volume_m3: f64,
    /// Net revenue actually invoiced.
    pub net_revenue: f64,
    /// Net freight cost actually incurred.
    pub net_cost: f64,
}

impl RealizedMetrics {
    /// Creates a realized-metrics row.
    pub fn new(loading_id: impl Into<String>, volume_m3: f64) -> Self {
        Self {
            loading_id: loading_id.into(),
            volume_m3,
            net_revenue: 0.0,
            net_cost: 0.0,
        }
    }

    /// Sets the net revenue.
    pub fn with_net_revenue(mut self, net_revenue: f64) -> Self {
        self.net_revenue = net_revenue;
        self
    }

    /// Sets the net cost.
    pub fn with_net_cost(mut self, net_cost: f64) -> Self {
        self.net_cost = net_cost;
        self
    }
}

/// Per-state slice of a realized loading's performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateBreakdown {
    /// Loading this row belongs to.
    pub loading_id: String,
    /// UF code the slice refers to.
    pub state: String,
    /// Vehicle profile code the loading ran with.
    pub vehicle_profile: String,
    /// Number of delivery points served in this state.
    pub delivery_points: i64,
    /// Volume delivered in this state (m³).
    pub volume_m3: f64,
    /// Gross revenue for this state.
    pub gross_revenue: f64,
    /// Net revenue for this state.
    pub net_revenue: f64,
    /// Net freight cost attributed to this state.
    pub net_cost: f64,
    /// Historical net cost over net revenue for this slice.
    pub cost_revenue_ratio: f64,
}

/// Aggregated historical performance for one state.
///
/// Derived ratios are guarded: a zero denominator yields 0.0 rather than
/// `NaN`/`Infinity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatePerformance {
    /// UF code.
    pub state: String,
    /// Total delivery points across all loadings.
    pub delivery_points: i64,
    /// Total delivered volume (m³).
    pub volume_m3: f64,
    /// Total gross revenue.
    pub gross_revenue: f64,
    /// Total net revenue.
    pub net_revenue: f64,
    /// Total net cost.
    pub net_cost: f64,
    /// Average volume per delivery point (m³).
    pub drop_size_m3: f64,
    /// Gross revenue per delivered m³.
    pub revenue_per_m3: f64,
    /// Net cost over net revenue.
    pub cost_revenue_ratio: f64,
}

/// Lookup over the historical aggregates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceHistory {
    by_loading: HashMap<String, RealizedMetrics>,
    breakdowns: Vec<StateBreakdown>,
}

impl PerformanceHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from per-loading aggregate rows.
    ///
    /// Later rows with a duplicate loading id replace earlier ones.
    pub fn from_aggregates(rows: Vec<RealizedMetrics>) -> Self {
        let mut history = Self::new();
        for row in rows {
            history.by_loading.insert(row.loading_id.clone(), row);
        }
        history
    }

    /// Attaches the per-(loading, state) breakdown rows.
    pub fn with_breakdowns(mut self, rows: Vec<StateBreakdown>) -> Self {
        self.breakdowns = rows;
        self
    }

    /// Actual figures for a realized loading.
    ///
    /// `None` means the aggregate has not been released yet; the caller
    /// zero-fills and surfaces a "data not yet available" signal.
    pub fn realized(&self, loading_id: &str) -> Option<&RealizedMetrics> {
        self.by_loading.get(loading_id)
    }

    /// Breakdown rows for one loading.
    pub fn breakdown_for_loading(&self, loading_id: &str) -> Vec<&StateBreakdown> {
        self.breakdowns
            .iter()
            .filter(|b| b.loading_id == loading_id)
            .collect()
    }

    /// Breakdown rows for one state (case-insensitive UF match).
    pub fn breakdown_for_state(&self, uf: &str) -> Vec<&StateBreakdown> {
        let uf = normalize_uf(uf);
        self.breakdowns
            .iter()
            .filter(|b| normalize_uf(&b.state) == uf)
            .collect()
    }

    /// Aggregated performance for one state, `None` if it has no history.
    pub fn state_performance(&self, uf: &str) -> Option<StatePerformance> {
        let rows = self.breakdown_for_state(uf);
        if rows.is_empty() {
            return None;
        }

        let mut delivery_points: i64 = 0;
        let mut volume_m3 = 0.0;
        let mut gross_revenue = 0.0;
        let mut net_revenue = 0.0;
        let mut net_cost = 0.0;

        for row in &rows {
            delivery_points += row.delivery_points;
            volume_m3 += row.volume_m3;
            gross_revenue += row.gross_revenue;
            net_revenue += row.net_revenue;
            net_cost += row.net_cost;
        }

        Some(StatePerformance {
            state: normalize_uf(uf),
            delivery_points,
            volume_m3,
            gross_revenue,
            net_revenue,
            net_cost,
            drop_size_m3: if delivery_points > 0 {
                volume_m3 / delivery_points as f64
            } else {
                0.0
            },
            revenue_per_m3: if volume_m3 > 0.0 {
                gross_revenue / volume_m3
            } else {
                0.0
            },
            cost_revenue_ratio: if net_revenue > 0.0 {
                net_cost / net_revenue
            } else {
                0.0
            },
        })
    }

    /// Number of per-loading aggregate rows.
    pub fn len(&self) -> usize {
        self.by_loading.len()
    }

    /// Whether the history holds no aggregates.
    pub fn is_empty(&self) -> bool {
        self.by_loading.is_empty()
    }
}
