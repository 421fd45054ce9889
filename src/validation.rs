//! Input validation for the load board.
//!
//! Checks structural integrity of loadings, cargo, and the vehicle catalog
//! before a snapshot is assembled. Detects:
//! - Duplicate loading IDs
//! - Pool-consuming loadings with no served states
//! - Loadings referencing a profile the catalog does not know
//! - Cargo records with negative or non-finite volume
//!
//! Validation is advisory: the allocation engine itself never rejects input
//! (an unknown profile simply allocates zero), but the consumer uses these
//! findings to flag loadings as awaiting configuration.

use std::collections::HashSet;

use crate::models::{CargoRecord, Loading, VehicleCatalog};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two loadings share the same ID.
    DuplicateId,
    /// A pool-consuming loading has no served states.
    EmptyServedStates,
    /// A loading references a vehicle profile the catalog does not know.
    UnknownVehicleProfile,
    /// A cargo record carries a negative or non-finite volume.
    InvalidVolume,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates one fetch cycle's input data.
///
/// Checks:
/// 1. No duplicate loading IDs
/// 2. Every pool-consuming loading serves at least one state
/// 3. Every loading's vehicle profile exists in the catalog
/// 4. Every cargo volume is finite and non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    loadings: &[Loading],
    cargo: &[CargoRecord],
    catalog: &VehicleCatalog,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut loading_ids = HashSet::new();
    for loading in loadings {
        if !loading_ids.insert(loading.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate loading ID: {}", loading.id),
            ));
        }

        if loading.status.consumes_pool() && loading.served_states.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyServedStates,
                format!("Loading '{}' serves no states", loading.id),
            ));
        }

        if !catalog.contains(&loading.vehicle_profile) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownVehicleProfile,
                format!(
                    "Loading '{}' references unknown vehicle profile '{}'",
                    loading.id, loading.vehicle_profile
                ),
            ));
        }
    }

    for record in cargo {
        if !record.volume_m3.is_finite() || record.volume_m3 < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidVolume,
                format!(
                    "Cargo at '{}' has invalid volume {}",
                    record.state, record.volume_m3
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoadingStatus, VehicleProfile};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_catalog() -> VehicleCatalog {
        VehicleCatalog::from_profiles(vec![
            VehicleProfile::new("CARRETA", 28.0),
            VehicleProfile::new("TRUCK", 14.0),
        ])
    }

    fn sample_loadings() -> Vec<Loading> {
        vec![
            Loading::new("L1", date("2025-03-10"), "CARRETA").with_served_state("SP"),
            Loading::new("L2", date("2025-03-11"), "TRUCK").with_served_state("MG"),
        ]
    }

    #[test]
    fn test_valid_input() {
        let cargo = vec![CargoRecord::new("SP", 10.0)];
        assert!(validate_input(&sample_loadings(), &cargo, &sample_catalog()).is_ok());
    }

    #[test]
    fn test_duplicate_loading_id() {
        let loadings = vec![
            Loading::new("L1", date("2025-03-10"), "CARRETA").with_served_state("SP"),
            Loading::new("L1", date("2025-03-11"), "TRUCK").with_served_state("MG"),
        ];

        let errors = validate_input(&loadings, &[], &sample_catalog()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_empty_served_states() {
        let loadings = vec![Loading::new("L1", date("2025-03-10"), "CARRETA")];

        let errors = validate_input(&loadings, &[], &sample_catalog()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyServedStates));
    }

    #[test]
    fn test_finalized_loading_may_serve_no_states() {
        // A realized loading reports history, not allocation; no states needed
        let loadings = vec![Loading::new("L1", date("2025-03-10"), "CARRETA")
            .with_status(LoadingStatus::Realized)];

        assert!(validate_input(&loadings, &[], &sample_catalog()).is_ok());
    }

    #[test]
    fn test_unknown_vehicle_profile() {
        let loadings =
            vec![Loading::new("L1", date("2025-03-10"), "VUC").with_served_state("SP")];

        let errors = validate_input(&loadings, &[], &sample_catalog()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownVehicleProfile));
    }

    #[test]
    fn test_invalid_volume() {
        let cargo = vec![
            CargoRecord::new("SP", -3.0),
            CargoRecord::new("MG", f64::NAN),
        ];

        let errors = validate_input(&[], &cargo, &sample_catalog()).unwrap_err();
        let invalid = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::InvalidVolume)
            .count();
        assert_eq!(invalid, 2);
    }

    #[test]
    fn test_multiple_errors() {
        let loadings = vec![
            Loading::new("L1", date("2025-03-10"), "VUC"), // Unknown profile + no states
        ];
        let cargo = vec![CargoRecord::new("SP", -1.0)];

        let errors = validate_input(&loadings, &cargo, &sample_catalog()).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
