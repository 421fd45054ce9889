//! Loading (scheduled departure) model.
//!
//! A loading is a scheduled truck departure that consolidates pending cargo
//! from one or more states toward a transit point. Its scheduled date
//! determines allocation priority: earlier-dated loadings get first claim on
//! the shared cargo pool.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle status of a loading.
///
/// Only `Scheduled` and `Confirmed` loadings consume the pending cargo pool.
/// `Realized` loadings report historical figures instead of projections, and
/// `Cancelled` loadings always report zeroed metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingStatus {
    /// Planned but not yet confirmed (source label: "previsto").
    Scheduled,
    /// Confirmed for departure (source label: "confirmado").
    Confirmed,
    /// Departed and collected; actuals available (source label: "coletado").
    Realized,
    /// Cancelled; never carries cargo (source label: "cancelado").
    Cancelled,
}

impl LoadingStatus {
    /// Parses a status label from the upstream feed.
    ///
    /// Accepts both the legacy Portuguese labels and the English names.
    /// Unknown labels degrade to `Scheduled`; the board treats anything it
    /// does not recognize as a plain planned loading.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "confirmado" | "confirmed" => Self::Confirmed,
            "coletado" | "realized" => Self::Realized,
            "cancelado" | "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Scheduled,
        }
    }

    /// Whether this status is terminal (realized or cancelled).
    pub fn is_finalized(self) -> bool {
        matches!(self, Self::Realized | Self::Cancelled)
    }

    /// Whether a loading in this status draws from the pending cargo pool.
    pub fn consumes_pool(self) -> bool {
        !self.is_finalized()
    }
}

/// A scheduled truck departure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loading {
    /// Unique loading identifier.
    pub id: String,
    /// Departure date; determines allocation priority (FIFO by date).
    pub scheduled_date: NaiveDate,
    /// Vehicle profile code, resolved against the [`VehicleCatalog`](super::VehicleCatalog).
    pub vehicle_profile: String,
    /// UF codes this loading collects cargo from, in allocation order.
    pub served_states: Vec<String>,
    /// Lifecycle status.
    pub status: LoadingStatus,
    /// Destination UF code.
    pub destination_state: String,
    /// Transit point this loading consolidates through, if assigned.
    pub transit_point: Option<String>,
    /// Carrier name, if assigned.
    pub carrier: Option<String>,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Loading {
    /// Creates a loading with the given id, date, and vehicle profile code.
    pub fn new(
        id: impl Into<String>,
        scheduled_date: NaiveDate,
        vehicle_profile: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            scheduled_date,
            vehicle_profile: vehicle_profile.into(),
            served_states: Vec::new(),
            status: LoadingStatus::Scheduled,
            destination_state: String::new(),
            transit_point: None,
            carrier: None,
            attributes: HashMap::new(),
        }
    }

    /// Adds a served state (UF code).
    pub fn with_served_state(mut self, uf: impl Into<String>) -> Self {
        self.served_states.push(uf.into());
        self
    }

    /// Replaces the served states.
    pub fn with_served_states(mut self, ufs: Vec<String>) -> Self {
        self.served_states = ufs;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: LoadingStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the destination state.
    pub fn with_destination(mut self, uf: impl Into<String>) -> Self {
        self.destination_state = uf.into();
        self
    }

    /// Sets the transit point.
    pub fn with_transit_point(mut self, name: impl Into<String>) -> Self {
        self.transit_point = Some(name.into());
        self
    }

    /// Sets the carrier.
    pub fn with_carrier(mut self, name: impl Into<String>) -> Self {
        self.carrier = Some(name.into());
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether this loading serves the given state (case-insensitive),
    /// either as destination or as one of its collection states.
    pub fn serves(&self, uf: &str) -> bool {
        let uf = super::normalize_uf(uf);
        super::normalize_uf(&self.destination_state) == uf
            || self
                .served_states
                .iter()
                .any(|s| super::normalize_uf(s) == uf)
    }
}
