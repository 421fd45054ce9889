//! Vehicle profile catalog.
//!
//! A vehicle profile maps a fleet code (e.g., "CARRETA", "TRUCK") to its
//! volumetric capacity. The catalog is a pure lookup: unknown codes resolve
//! to a capacity of 0 m³, which the allocation engine treats as "cannot
//! carry anything yet" rather than an error; the consumer flags such
//! loadings as awaiting configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A vehicle class with its volumetric capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Fleet code used by loadings to reference this profile.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Volumetric capacity (m³).
    pub capacity_m3: f64,
}

impl VehicleProfile {
    /// Creates a profile with the given code and capacity.
    pub fn new(code: impl Into<String>, capacity_m3: f64) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            capacity_m3,
        }
    }

    /// Sets the profile name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Lookup table of vehicle profiles by code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleCatalog {
    profiles: HashMap<String, VehicleProfile>,
}

impl VehicleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of profiles.
    ///
    /// Later entries with a duplicate code replace earlier ones.
    pub fn from_profiles(profiles: Vec<VehicleProfile>) -> Self {
        let mut catalog = Self::new();
        for p in profiles {
            catalog.insert(p);
        }
        catalog
    }

    /// Inserts or replaces a profile.
    pub fn insert(&mut self, profile: VehicleProfile) {
        self.profiles.insert(profile.code.clone(), profile);
    }

    /// Looks up a profile by code.
    pub fn get(&self, code: &str) -> Option<&VehicleProfile> {
        self.profiles.get(code)
    }

    /// Capacity for a profile code, 0.0 if unknown.
    pub fn capacity_m3(&self, code: &str) -> f64 {
        self.profiles.get(code).map(|p| p.capacity_m3).unwrap_or(0.0)
    }

    /// Whether the catalog knows the given code.
    pub fn contains(&self, code: &str) -> bool {
        self.profiles.contains_key(code)
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_builder() {
        let p = VehicleProfile::new("CARRETA", 28.0).with_name("Carreta Baú");
        assert_eq!(p.code, "CARRETA");
        assert_eq!(p.name, "Carreta Baú");
        assert!((p.capacity_m3 - 28.0).abs() < 1e-10);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = VehicleCatalog::from_profiles(vec![
            VehicleProfile::new("CARRETA", 28.0),
            VehicleProfile::new("TRUCK", 14.0),
        ]);

        assert_eq!(catalog.len(), 2);
        assert!((catalog.capacity_m3("CARRETA") - 28.0).abs() < 1e-10);
        assert!((catalog.capacity_m3("TRUCK") - 14.0).abs() < 1e-10);
        assert!(catalog.contains("TRUCK"));
    }

    #[test]
    fn test_catalog_unknown_code_is_zero() {
        let catalog = VehicleCatalog::new();
        assert!((catalog.capacity_m3("VUC") - 0.0).abs() < 1e-10);
        assert!(!catalog.contains("VUC"));
        assert!(catalog.get("VUC").is_none());
    }

    #[test]
    fn test_catalog_duplicate_code_replaces() {
        let catalog = VehicleCatalog::from_profiles(vec![
            VehicleProfile::new("TRUCK", 12.0),
            VehicleProfile::new("TRUCK", 14.0),
        ]);
        assert_eq!(catalog.len(), 1);
        assert!((catalog.capacity_m3("TRUCK") - 14.0).abs() < 1e-10);
    }
}
