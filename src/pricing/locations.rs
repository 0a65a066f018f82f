//! Pickup/dropoff areas and their delivery surcharges.
//!
//! The table is read-only reference data handed in by the config loader.
//! Unknown ids resolve to a zero surcharge so they never block a quote.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const BUILTIN_AREAS: &str = include_str!("../../config/areas.json");

/// A named pickup/dropoff location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: i64,
    pub name: String,
    #[serde(rename = "deliveryPrice", with = "rust_decimal::serde::str")]
    pub delivery_surcharge: Decimal,
}

impl Area {
    pub fn new(id: i64, name: impl Into<String>, delivery_surcharge: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            delivery_surcharge,
        }
    }
}

/// Area lookup by integer id
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    areas: Vec<Area>,
    by_id: HashMap<i64, usize>,
}

impl LocationCatalog {
    /// Build a catalog from a list of areas.
    ///
    /// On duplicate ids the first entry wins, same as a linear `find`.
    pub fn new(areas: Vec<Area>) -> Self {
        let mut by_id = HashMap::with_capacity(areas.len());
        for (idx, area) in areas.iter().enumerate() {
            by_id.entry(area.id).or_insert(idx);
        }
        Self { areas, by_id }
    }

    /// Built-in area table used when no areas file is configured.
    ///
    /// Compiled in from `config/areas.json`.
    pub fn builtin() -> Self {
        match serde_json::from_str::<Vec<Area>>(BUILTIN_AREAS) {
            Ok(areas) => Self::new(areas),
            Err(e) => {
                tracing::error!("Built-in area table is invalid: {}", e);
                Self::default()
            }
        }
    }

    pub fn get(&self, area_id: i64) -> Option<&Area> {
        self.by_id.get(&area_id).map(|&idx| &self.areas[idx])
    }

    pub fn name_of(&self, area_id: i64) -> Option<&str> {
        self.get(area_id).map(|a| a.name.as_str())
    }

    /// Delivery surcharge for an area; zero when the id is unknown
    pub fn surcharge_for(&self, area_id: i64) -> Decimal {
        match self.get(area_id) {
            Some(area) => area.delivery_surcharge,
            None => {
                tracing::warn!("Unknown area id {}, using zero delivery surcharge", area_id);
                Decimal::ZERO
            }
        }
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}
