use gridseries_core::{FacilityFilter, RawRow};

use super::facility::UNITS;

/// Catalog rows, one per unit, matching `filter`.
pub fn rows(filter: &FacilityFilter) -> Vec<RawRow> {
    UNITS
        .iter()
        .filter(|u| filter.status.is_empty() || filter.status.iter().any(|s| s == u.status))
        .filter(|u| {
            filter.fueltechs.is_empty() || filter.fueltechs.iter().any(|f| f == u.fueltech)
        })
        .filter(|_| filter.networks.is_empty() || filter.networks.iter().any(|n| n == "NEM"))
        .filter(|u| {
            filter
                .network_region
                .as_deref()
                .is_none_or(|r| r.eq_ignore_ascii_case(u.region))
        })
        .map(|u| {
            RawRow::new()
                .with("facility_code", u.facility)
                .with("facility_name", u.facility_name)
                .with("facility_network", "NEM")
                .with("facility_region", u.region)
                .with("unit_code", u.unit)
                .with("unit_fueltech", u.fueltech)
                .with("unit_status", u.status)
                .with("unit_capacity", u.capacity)
        })
        .collect()
}
