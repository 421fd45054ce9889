//! Feed boundary: raw rows from the persistence layer.
//!
//! The data layer hands over loosely-shaped rows whose numeric fields may be
//! absent. Every numeric field here carries `#[serde(default)]` so missing
//! values become 0 before any arithmetic; the legacy column names are
//! accepted through `#[serde(alias = ...)]`. Conversion into domain models
//! is fail-fast: a malformed row aborts the whole batch, because the
//! allocation engine must never run against partially-converted data.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::history::{RealizedMetrics, StateBreakdown};
use crate::models::{CargoRecord, Loading, LoadingStatus, VehicleProfile};
use crate::simulator::{StateEfficiency, TransitCost, TransitPoint};

/// A row the boundary could not convert.
///
/// Reported upward as a retrieval failure: the engine does not retry, a
/// failed batch simply prevents a pass from running.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A loading row carried an unparseable schedule date.
    #[error("loading {id}: unparseable scheduled date {value:?}")]
    InvalidDate {
        /// Loading id the bad row belongs to.
        id: String,
        /// The raw date string as received.
        value: String,
    },
    /// A loading row arrived without an id.
    #[error("loading row without an id")]
    MissingId,
}

/// Raw pending-cargo row.
#[derive(Debug, Clone, Deserialize)]
pub struct CargoRow {
    /// UF code.
    #[serde(alias = "uf")]
    pub state: String,
    /// Volume (m³).
    #[serde(default, alias = "cubagem")]
    pub volume_m3: f64,
    /// Gross revenue.
    #[serde(default, alias = "faturamento")]
    pub revenue: f64,
    /// Box count.
    #[serde(default, alias = "volume_caixas")]
    pub box_count: i64,
}

impl CargoRow {
    /// Converts into a domain record.
    pub fn into_record(self) -> CargoRecord {
        CargoRecord::new(self.state, self.volume_m3)
            .with_revenue(self.revenue)
            .with_box_count(self.box_count)
    }
}

/// Raw loading row.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadingRow {
    /// Loading id.
    #[serde(default)]
    pub id: String,
    /// ISO date or timestamp of the scheduled departure.
    #[serde(alias = "data_carregamento")]
    pub scheduled_date: String,
    /// Vehicle profile code.
    #[serde(default, alias = "perfil")]
    pub vehicle_profile: String,
    /// Served UF codes.
    #[serde(default, alias = "estados_atendidos")]
    pub served_states: Vec<String>,
    /// Status label (legacy Portuguese or English).
    #[serde(default)]
    pub status: String,
    /// Destination UF code.
    #[serde(default, alias = "estado_destino")]
    pub destination_state: String,
    /// Transit point name, if assigned.
    #[serde(default)]
    pub transit_point: Option<String>,
    /// Carrier name, if assigned.
    #[serde(default, alias = "transportadora")]
    pub carrier: Option<String>,
}

impl LoadingRow {
    /// Converts into a domain loading, parsing the date and status label.
    ///
    /// The source column is an ISO datetime; only the date part orders the
    /// allocation, so anything after the first ten characters is ignored.
    pub fn into_loading(self) -> Result<Loading, FeedError> {
        if self.id.is_empty() {
            return Err(FeedError::MissingId);
        }

        let date_part = self.scheduled_date.get(..10).unwrap_or(&self.scheduled_date);
        let scheduled_date =
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| FeedError::InvalidDate {
                id: self.id.clone(),
                value: self.scheduled_date.clone(),
            })?;

        let mut loading = Loading::new(self.id, scheduled_date, self.vehicle_profile)
            .with_served_states(self.served_states)
            .with_status(LoadingStatus::from_label(&self.status))
            .with_destination(self.destination_state);
        loading.transit_point = self.transit_point;
        loading.carrier = self.carrier;
        Ok(loading)
    }
}

/// Raw vehicle-profile row.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    /// Fleet code.
    #[serde(alias = "codigo")]
    pub code: String,
    /// Capacity (m³).
    #[serde(default, alias = "capacidade_m3")]
    pub capacity_m3: f64,
}

impl ProfileRow {
    /// Converts into a domain profile.
    pub fn into_profile(self) -> VehicleProfile {
        VehicleProfile::new(self.code, self.capacity_m3)
    }
}

/// Raw per-loading historical aggregate row.
#[derive(Debug, Clone, Deserialize)]
pub struct RealizedRow {
    /// Loading id.
    #[serde(alias = "carregamento_id")]
    pub loading_id: String,
    /// Carried volume (m³).
    #[serde(default, alias = "cubagem_total")]
    pub volume_m3: f64,
    /// Net revenue.
    #[serde(default, alias = "fat_liq_total")]
    pub net_revenue: f64,
    /// Net cost.
    #[serde(default, alias = "custo_liquido_total")]
    pub net_cost: f64,
}

impl RealizedRow {
    /// Converts into a domain aggregate.
    pub fn into_metrics(self) -> RealizedMetrics {
        RealizedMetrics::new(self.loading_id, self.volume_m3)
            .with_net_revenue(self.net_revenue)
            .with_net_cost(self.net_cost)
    }
}

/// Raw per-(loading, state) breakdown row.
#[derive(Debug, Clone, Deserialize)]
pub struct StateBreakdownRow {
    /// Loading id.
    #[serde(alias = "carregamento_id")]
    pub loading_id: String,
    /// UF code.
    #[serde(alias = "estado")]
    pub state: String,
    /// Vehicle profile code.
    #[serde(default, alias = "modal")]
    pub vehicle_profile: String,
    /// Delivery-point count.
    #[serde(default, alias = "qtd_pdvs")]
    pub delivery_points: i64,
    /// Volume (m³).
    #[serde(default, alias = "cubagem_total")]
    pub volume_m3: f64,
    /// Gross revenue.
    #[serde(default, alias = "fat_bruto_total")]
    pub gross_revenue: f64,
    /// Net revenue.
    #[serde(default, alias = "fat_liq_total")]
    pub net_revenue: f64,
    /// Net cost.
    #[serde(default, alias = "custo_liquido_total")]
    pub net_cost: f64,
    /// Net cost over net revenue.
    #[serde(default, alias = "custo_liq_vs_fat_liq")]
    pub cost_revenue_ratio: f64,
}

impl StateBreakdownRow {
    /// Converts into a domain breakdown.
    pub fn into_breakdown(self) -> StateBreakdown {
        StateBreakdown {
            loading_id: self.loading_id,
            state: self.state,
            vehicle_profile: self.vehicle_profile,
            delivery_points: self.delivery_points,
            volume_m3: self.volume_m3,
            gross_revenue: self.gross_revenue,
            net_revenue: self.net_revenue,
            net_cost: self.net_cost,
            cost_revenue_ratio: self.cost_revenue_ratio,
        }
    }
}

/// Raw transit-point row.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitPointRow {
    /// Stable identifier.
    pub id: i64,
    /// Hub name.
    #[serde(alias = "local")]
    pub name: String,
    /// Served UF codes.
    #[serde(default, alias = "estados_atendidos")]
    pub served_states: Vec<String>,
}

impl TransitPointRow {
    /// Converts into a domain transit point.
    pub fn into_transit_point(self) -> TransitPoint {
        let mut tp = TransitPoint::new(self.id, self.name);
        tp.served_states = self.served_states;
        tp
    }
}

/// Raw per-hub historical cost row.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitCostRow {
    /// Hub name.
    pub transit_point: String,
    /// Vehicle profile code.
    #[serde(default, alias = "modal")]
    pub vehicle_profile: String,
    /// Average net cost.
    #[serde(default, alias = "media_custo_liq")]
    pub avg_net_cost: f64,
    /// Average net cost over gross revenue.
    #[serde(default, alias = "media_percentual_liq_bruto")]
    pub avg_net_cost_ratio: f64,
}

impl TransitCostRow {
    /// Converts into a domain cost row.
    pub fn into_cost(self) -> TransitCost {
        TransitCost {
            transit_point: self.transit_point,
            vehicle_profile: self.vehicle_profile,
            avg_net_cost: self.avg_net_cost,
            avg_net_cost_ratio: self.avg_net_cost_ratio,
        }
    }
}

/// Raw per-state efficiency row.
#[derive(Debug, Clone, Deserialize)]
pub struct StateEfficiencyRow {
    /// UF code.
    #[serde(alias = "estado")]
    pub state: String,
    /// Vehicle profile code.
    #[serde(default, alias = "modal")]
    pub vehicle_profile: String,
    /// Net cost over net revenue.
    #[serde(default, alias = "custo_liq_vs_fat_liq")]
    pub cost_revenue_ratio: f64,
}

impl StateEfficiencyRow {
    /// Converts into a domain efficiency row.
    pub fn into_efficiency(self) -> StateEfficiency {
        StateEfficiency {
            state: self.state,
            vehicle_profile: self.vehicle_profile,
            cost_revenue_ratio: self.cost_revenue_ratio,
        }
    }
}

/// Converts a batch of cargo rows.
pub fn cargo_records(rows: Vec<CargoRow>) -> Vec<CargoRecord> {
    rows.into_iter().map(CargoRow::into_record).collect()
}

/// Converts a batch of loading rows, failing on the first bad row.
pub fn loadings(rows: Vec<LoadingRow>) -> Result<Vec<Loading>, FeedError> {
    rows.into_iter().map(LoadingRow::into_loading).collect()
}
