//! State/regional simulator.
//!
//! A read-only planning tool: given a selection of states and a vehicle
//! profile, it answers which transit point would consolidate the selection
//! at the lowest historical cost, what volume and revenue the selection
//! represents, and how efficiently comparable operations have run.
//!
//! It reuses the same cost and efficiency arithmetic as the occupancy
//! surface but never touches a [`PendingCargoPool`](crate::models::PendingCargoPool):
//! a simulation is a single best-of selection, not an optimization search:
//! no backtracking, no multi-leg routing.

use serde::{Deserialize, Serialize};

use crate::models::{normalize_uf, CargoRecord, VehicleCatalog};

/// Fraction of gross revenue left after taxes and deductions.
pub const NET_REVENUE_FACTOR: f64 = 0.85;

/// An intermediate consolidation hub serving a fixed set of states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitPoint {
    /// Stable identifier.
    pub id: i64,
    /// Hub name (matches the cost table's `transit_point` column).
    pub name: String,
    /// UF codes this hub serves.
    pub served_states: Vec<String>,
}

impl TransitPoint {
    /// Creates a transit point.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            served_states: Vec::new(),
        }
    }

    /// Adds a served state.
    pub fn with_served_state(mut self, uf: impl Into<String>) -> Self {
        self.served_states.push(uf.into());
        self
    }

    /// Whether this hub serves every one of the given states
    /// (intersection-complete, not partial coverage).
    pub fn serves_all(&self, ufs: &[String]) -> bool {
        ufs.iter().all(|uf| {
            let uf = normalize_uf(uf);
            self.served_states.iter().any(|s| normalize_uf(s) == uf)
        })
    }
}

/// Historical average cost of running a profile through a transit point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitCost {
    /// Hub name.
    pub transit_point: String,
    /// Vehicle profile code.
    pub vehicle_profile: String,
    /// Average net freight cost.
    pub avg_net_cost: f64,
    /// Average net cost as a fraction of gross revenue.
    pub avg_net_cost_ratio: f64,
}

/// Historical cost-over-revenue efficiency for a state and profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateEfficiency {
    /// UF code.
    pub state: String,
    /// Vehicle profile code.
    pub vehicle_profile: String,
    /// Net cost over net revenue for past operations.
    pub cost_revenue_ratio: f64,
}

/// The simulator's route verdict.
///
/// "No viable route" is a named result, never an error: consumers must
/// branch on it explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RouteChoice {
    /// The cheapest hub that serves every selected state.
    Selected {
        /// Hub name.
        transit_point: String,
        /// Historical average net cost through that hub.
        expected_cost: f64,
    },
    /// No hub serves the whole selection (or the selection is empty).
    NoViableRoute,
}

impl RouteChoice {
    /// Whether a route was found.
    pub fn is_viable(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }
}

/// Result of one simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Total pending volume across the selected states (m³).
    pub volume_m3: f64,
    /// Total box count across the selection.
    pub box_count: i64,
    /// Total gross revenue across the selection.
    pub gross_revenue: f64,
    /// Gross revenue after the standard deduction haircut.
    pub net_revenue: f64,
    /// Best transit point, or the explicit no-route verdict.
    pub route: RouteChoice,
    /// Mean historical cost-over-revenue for the selection, as a
    /// percentage; 0.0 with no matching history.
    pub efficiency_percent: f64,
    /// Capacity of the chosen profile (0.0 for unknown codes).
    pub capacity_m3: f64,
    /// Whether the selection exceeds the profile's capacity.
    pub overloaded: bool,
    /// Whether more than one hub could serve the whole selection.
    pub multiple_candidates: bool,
}

/// Read-only simulator over the reference tables.
#[derive(Debug, Clone, Default)]
pub struct RegionalSimulator {
    transit_points: Vec<TransitPoint>,
    costs: Vec<TransitCost>,
    efficiency: Vec<StateEfficiency>,
}

impl RegionalSimulator {
    /// Creates a simulator with no reference data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transit points.
    pub fn with_transit_points(mut self, transit_points: Vec<TransitPoint>) -> Self {
        self.transit_points = transit_points;
        self
    }

    /// Sets the historical per-hub cost table.
    pub fn with_costs(mut self, costs: Vec<TransitCost>) -> Self {
        self.costs = costs;
        self
    }

    /// Sets the historical per-state efficiency rows.
    pub fn with_efficiency(mut self, efficiency: Vec<StateEfficiency>) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// Simulates consolidating the selected states on the given profile.
    pub fn simulate(
        &self,
        cargo: &[CargoRecord],
        selected_states: &[String],
        profile_code: &str,
        catalog: &VehicleCatalog,
    ) -> SimulationOutcome {
        let selected: Vec<String> = selected_states.iter().map(|s| normalize_uf(s)).collect();
        let capacity_m3 = catalog.capacity_m3(profile_code);

        let mut volume_m3 = 0.0;
        let mut box_count: i64 = 0;
        let mut gross_revenue = 0.0;
        for record in cargo.iter().filter(|c| selected.contains(&c.uf())) {
            volume_m3 += record.volume_m3;
            box_count += record.box_count;
            gross_revenue += record.revenue;
        }

        let route = self.best_route(&selected, profile_code);
        let multiple_candidates = self.candidate_count(&selected) > 1;

        let matching: Vec<f64> = self
            .efficiency
            .iter()
            .filter(|e| {
                e.vehicle_profile == profile_code && selected.contains(&normalize_uf(&e.state))
            })
            .map(|e| e.cost_revenue_ratio)
            .collect();
        let efficiency_percent = if matching.is_empty() {
            0.0
        } else {
            matching.iter().sum::<f64>() / matching.len() as f64 * 100.0
        };

        SimulationOutcome {
            volume_m3,
            box_count,
            gross_revenue,
            net_revenue: gross_revenue * NET_REVENUE_FACTOR,
            route,
            efficiency_percent,
            capacity_m3,
            overloaded: capacity_m3 > 0.0 && volume_m3 > capacity_m3,
            multiple_candidates,
        }
    }

    fn candidate_count(&self, selected: &[String]) -> usize {
        if selected.is_empty() {
            return 0;
        }
        self.transit_points
            .iter()
            .filter(|tp| tp.serves_all(selected))
            .count()
    }

    /// Lowest historical average net cost among hubs serving the whole
    /// selection, for the given profile.
    fn best_route(&self, selected: &[String], profile_code: &str) -> RouteChoice {
        if selected.is_empty() {
            return RouteChoice::NoViableRoute;
        }

        let candidate_names: Vec<&str> = self
            .transit_points
            .iter()
            .filter(|tp| tp.serves_all(selected))
            .map(|tp| tp.name.as_str())
            .collect();
        if candidate_names.is_empty() {
            return RouteChoice::NoViableRoute;
        }

        self.costs
            .iter()
            .filter(|c| {
                c.vehicle_profile == profile_code
                    && candidate_names.contains(&c.transit_point.as_str())
            })
            .min_by(|a, b| {
                a.avg_net_cost
                    .partial_cmp(&b.avg_net_cost)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|c| RouteChoice::Selected {
                transit_point: c.transit_point.clone(),
                expected_cost: c.avg_net_cost,
            })
            .unwrap_or(RouteChoice::NoViableRoute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleProfile;

    fn catalog() -> VehicleCatalog {
        VehicleCatalog::from_profiles(vec![
            VehicleProfile::new("CARRETA", 28.0),
            VehicleProfile::new("TRUCK", 14.0),
        ])
    }

    fn sample_simulator() -> RegionalSimulator {
        RegionalSimulator::new()
            .with_transit_points(vec![
                TransitPoint::new(1, "Feira de Santana")
                    .with_served_state("BA")
                    .with_served_state("SE"),
                TransitPoint::new(2, "Aracaju")
                    .with_served_state("SE")
                    .with_served_state("AL"),
                TransitPoint::new(3, "Recife")
                    .with_served_state("BA")
                    .with_served_state("SE")
                    .with_served_state("AL"),
            ])
            .with_costs(vec![
                TransitCost {
                    transit_point: "Feira de Santana".into(),
                    vehicle_profile: "CARRETA".into(),
                    avg_net_cost: 4_200.0,
                    avg_net_cost_ratio: 0.12,
                },
                TransitCost {
                    transit_point: "Recife".into(),
                    vehicle_profile: "CARRETA".into(),
                    avg_net_cost: 5_100.0,
                    avg_net_cost_ratio: 0.16,
                },
                TransitCost {
                    transit_point: "Aracaju".into(),
                    vehicle_profile: "TRUCK".into(),
                    avg_net_cost: 2_300.0,
                    avg_net_cost_ratio: 0.10,
                },
            ])
            .with_efficiency(vec![
                StateEfficiency {
                    state: "BA".into(),
                    vehicle_profile: "CARRETA".into(),
                    cost_revenue_ratio: 0.14,
                },
                StateEfficiency {
                    state: "SE".into(),
                    vehicle_profile: "CARRETA".into(),
                    cost_revenue_ratio: 0.18,
                },
                StateEfficiency {
                    state: "SE".into(),
                    vehicle_profile: "TRUCK".into(),
                    cost_revenue_ratio: 0.30,
                },
            ])
    }

    fn sample_cargo() -> Vec<CargoRecord> {
        vec![
            CargoRecord::new("BA", 12.0).with_revenue(40_000.0).with_box_count(300),
            CargoRecord::new("SE", 6.0).with_revenue(18_000.0).with_box_count(150),
            CargoRecord::new("AL", 4.0).with_revenue(10_000.0).with_box_count(90),
        ]
    }

    #[test]
    fn test_best_route_lowest_cost_full_coverage() {
        let sim = sample_simulator();
        let outcome = sim.simulate(
            &sample_cargo(),
            &["BA".to_string(), "SE".to_string()],
            "CARRETA",
            &catalog(),
        );

        // Feira de Santana (4200) and Recife (5100) both cover {BA, SE};
        // the cheaper one wins
        assert_eq!(
            outcome.route,
            RouteChoice::Selected {
                transit_point: "Feira de Santana".into(),
                expected_cost: 4_200.0,
            }
        );
        assert!(outcome.multiple_candidates);
    }

    #[test]
    fn test_partial_coverage_is_not_viable() {
        let sim = sample_simulator();
        // Only Recife covers {BA, AL}; Aracaju covers AL but not BA and the
        // cost table has no TRUCK row for Recife → no route on TRUCK
        let outcome = sim.simulate(
            &sample_cargo(),
            &["BA".to_string(), "AL".to_string()],
            "TRUCK",
            &catalog(),
        );
        assert_eq!(outcome.route, RouteChoice::NoViableRoute);
        assert!(!outcome.route.is_viable());
    }

    #[test]
    fn test_empty_selection_has_no_route() {
        let sim = sample_simulator();
        let outcome = sim.simulate(&sample_cargo(), &[], "CARRETA", &catalog());

        assert_eq!(outcome.route, RouteChoice::NoViableRoute);
        assert!((outcome.volume_m3 - 0.0).abs() < 1e-10);
        assert!(!outcome.multiple_candidates);
    }

    #[test]
    fn test_volume_revenue_sums_and_net_factor() {
        let sim = sample_simulator();
        let outcome = sim.simulate(
            &sample_cargo(),
            &["BA".to_string(), "SE".to_string()],
            "CARRETA",
            &catalog(),
        );

        assert!((outcome.volume_m3 - 18.0).abs() < 1e-10);
        assert_eq!(outcome.box_count, 450);
        assert!((outcome.gross_revenue - 58_000.0).abs() < 1e-10);
        assert!((outcome.net_revenue - 58_000.0 * NET_REVENUE_FACTOR).abs() < 1e-10);
    }

    #[test]
    fn test_efficiency_is_mean_of_matching_rows() {
        let sim = sample_simulator();
        let outcome = sim.simulate(
            &sample_cargo(),
            &["BA".to_string(), "SE".to_string()],
            "CARRETA",
            &catalog(),
        );

        // Mean of BA (0.14) and SE (0.18) on CARRETA → 16%
        assert!((outcome.efficiency_percent - 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_efficiency_without_history_is_zero() {
        let sim = sample_simulator();
        let outcome = sim.simulate(
            &sample_cargo(),
            &["AL".to_string()],
            "CARRETA",
            &catalog(),
        );
        assert!((outcome.efficiency_percent - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_overload_flag() {
        let sim = sample_simulator();
        let cargo = vec![CargoRecord::new("SE", 20.0).with_revenue(50_000.0)];
        let outcome = sim.simulate(&cargo, &["SE".to_string()], "TRUCK", &catalog());

        assert!((outcome.capacity_m3 - 14.0).abs() < 1e-10);
        assert!(outcome.overloaded);
    }

    #[test]
    fn test_unknown_profile_never_overloads() {
        let sim = sample_simulator();
        let cargo = vec![CargoRecord::new("SE", 20.0)];
        let outcome = sim.simulate(&cargo, &["SE".to_string()], "VUC", &catalog());

        assert!((outcome.capacity_m3 - 0.0).abs() < 1e-10);
        assert!(!outcome.overloaded);
        assert_eq!(outcome.route, RouteChoice::NoViableRoute);
    }

    #[test]
    fn test_selection_is_case_insensitive() {
        let sim = sample_simulator();
        let outcome = sim.simulate(
            &sample_cargo(),
            &["ba".to_string(), "se".to_string()],
            "CARRETA",
            &catalog(),
        );
        assert!((outcome.volume_m3 - 18.0).abs() < 1e-10);
        assert!(outcome.route.is_viable());
    }

    #[test]
    fn test_serves_all() {
        let tp = TransitPoint::new(1, "Hub")
            .with_served_state("BA")
            .with_served_state("se");
        assert!(tp.serves_all(&["BA".to_string()]));
        assert!(tp.serves_all(&["ba".to_string(), "SE".to_string()]));
        assert!(!tp.serves_all(&["BA".to_string(), "AL".to_string()]));
        assert!(tp.serves_all(&[]));
    }
}
