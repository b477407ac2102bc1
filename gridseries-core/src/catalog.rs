use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RawRow;

const CODE: &[&str] = &["facility_code", "code"];
const NAME: &[&str] = &["facility_name", "name"];
const NETWORK: &[&str] = &["facility_network", "network"];
const NETWORK_REGION: &[&str] = &["facility_region", "network_region"];
const FUELTECH: &[&str] = &["unit_fueltech", "fueltech"];
const FUELTECH_GROUP: &[&str] = &["fueltech_group", "fueltechGroup"];
const STATUS: &[&str] = &["unit_status", "status"];
const CAPACITY: &[&str] = &["unit_capacity", "capacity"];
const LOCATION: &[&str] = &["location", "address"];

const RENEWABLE_MARKERS: [&str; 5] = ["solar", "wind", "hydro", "battery", "pumps"];

/// Renewable classification of a facility's fueltech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Renewable {
    /// Solar, wind, hydro, battery or pumped storage.
    Renewable,
    /// Anything else.
    NonRenewable,
}

impl Renewable {
    /// Classify a fueltech id by substring.
    #[must_use]
    pub fn classify(fueltech: &str) -> Self {
        let ft = fueltech.to_lowercase();
        if RENEWABLE_MARKERS.iter().any(|m| ft.contains(m)) {
            Self::Renewable
        } else {
            Self::NonRenewable
        }
    }
}

/// A facility rolled up from its unit rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Facility code.
    pub code: String,
    /// Display name.
    pub name: Option<String>,
    /// Network id.
    pub network: Option<String>,
    /// Network region.
    pub network_region: Option<String>,
    /// Fueltech of the first unit.
    pub fueltech: Option<String>,
    /// Fueltech group, reported or derived from the fueltech.
    pub fueltech_group: Option<String>,
    /// Unit status.
    pub status: Option<String>,
    /// Renewable classification, absent without a fueltech.
    pub renewable: Option<Renewable>,
    /// Summed unit capacity in MW.
    pub capacity: Option<Decimal>,
    /// Location as reported.
    pub location: Option<Value>,
}

impl Facility {
    /// Read one unit-level catalog row. Rows without a facility code yield `None`.
    #[must_use]
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let code = row.text(CODE)?;
        let fueltech = row.text(FUELTECH);
        let fueltech_group = row
            .text(FUELTECH_GROUP)
            .or_else(|| fueltech.as_deref().map(|ft| fueltech_group_for(ft).to_string()));
        Some(Self {
            code,
            name: row.text(NAME),
            network: row.text(NETWORK),
            network_region: row.text(NETWORK_REGION),
            renewable: fueltech.as_deref().map(Renewable::classify),
            fueltech,
            fueltech_group,
            status: row.text(STATUS),
            capacity: row.number(CAPACITY),
            location: row.first(LOCATION).cloned(),
        })
    }

    fn absorb(&mut self, unit: Self) {
        self.capacity = match (self.capacity, unit.capacity) {
            (Some(a), Some(b)) => Some(a.saturating_add(b)),
            (a, b) => a.or(b),
        };
        fill(&mut self.name, unit.name);
        fill(&mut self.network, unit.network);
        fill(&mut self.network_region, unit.network_region);
        fill(&mut self.status, unit.status);
        fill(&mut self.location, unit.location);
        if self.fueltech.is_none() {
            self.fueltech = unit.fueltech;
            self.fueltech_group = unit.fueltech_group;
            self.renewable = unit.renewable;
        }
    }
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// Coarse fueltech group of a fueltech id, by substring.
#[must_use]
pub fn fueltech_group_for(fueltech: &str) -> &'static str {
    let ft = fueltech.to_lowercase();
    if ft.contains("solar") {
        "solar"
    } else if ft.contains("wind") {
        "wind"
    } else if ft.contains("hydro") || ft.contains("water") {
        "hydro"
    } else if ft.contains("coal") {
        "coal"
    } else if ft.contains("gas") {
        "gas"
    } else if ft.contains("battery") || ft.contains("storage") {
        "storage"
    } else if ft.contains("oil") {
        "oil"
    } else {
        "other"
    }
}

/// Roll unit-level catalog rows up to one facility per code, sorted by code.
///
/// Capacity is summed across units; other attributes keep the first value seen.
#[must_use]
pub fn roll_up_facilities(rows: &[RawRow]) -> Vec<Facility> {
    let mut by_code: BTreeMap<String, Facility> = BTreeMap::new();
    for unit in rows.iter().filter_map(Facility::from_row) {
        match by_code.get_mut(&unit.code) {
            Some(existing) => existing.absorb(unit),
            None => {
                by_code.insert(unit.code.clone(), unit);
            }
        }
    }
    by_code.into_values().collect()
}
