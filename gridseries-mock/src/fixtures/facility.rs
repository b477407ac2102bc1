use gridseries_core::{ProviderRequest, RawRow};

use super::{nem_time, timeline};

/// One generating unit of the fixture fleet.
pub struct Unit {
    pub facility: &'static str,
    pub facility_name: &'static str,
    pub unit: &'static str,
    pub region: &'static str,
    pub fueltech: &'static str,
    pub status: &'static str,
    pub capacity: f64,
}

const fn unit(
    facility: &'static str,
    facility_name: &'static str,
    unit: &'static str,
    region: &'static str,
    fueltech: &'static str,
    status: &'static str,
    capacity: f64,
) -> Unit {
    Unit {
        facility,
        facility_name,
        unit,
        region,
        fueltech,
        status,
        capacity,
    }
}

pub const UNITS: [Unit; 8] = [
    unit("BANGOWF", "Bango Wind Farm", "BANGOWF1", "NSW1", "wind", "operating", 159.0),
    unit("BANGOWF", "Bango Wind Farm", "BANGOWF2", "NSW1", "wind", "operating", 85.0),
    unit("ERARING", "Eraring", "ER01", "NSW1", "coal_black", "operating", 720.0),
    unit("ERARING", "Eraring", "ER02", "NSW1", "coal_black", "operating", 720.0),
    unit("HPRG", "Hornsdale Power Reserve", "HPRG1", "SA1", "battery_discharging", "operating", 150.0),
    unit("LIMOSF", "Limondale Solar Farm", "LIMOSF11", "NSW1", "solar_utility", "operating", 220.0),
    unit("LIMOSF", "Limondale Solar Farm", "LIMOSF21", "NSW1", "solar_utility", "operating", 29.0),
    unit("WSTWIND", "Western Wind", "WSTWIND1", "VIC1", "wind", "committed", 200.0),
];

/// Unit-level rows for the requested facilities. Unknown codes contribute nothing.
///
/// Rows carry `facility_code` only when it cannot be derived from the unit code;
/// only coal units report emissions and batteries report no market value.
pub fn rows(req: &ProviderRequest) -> Vec<RawRow> {
    let steps = timeline(req);
    let mut out = Vec::new();
    for (u, unit) in UNITS
        .iter()
        .enumerate()
        .filter(|(_, u)| req.facility_codes.iter().any(|c| c == u.facility))
    {
        for (i, t) in steps.iter().enumerate() {
            let energy = unit.capacity * 0.3 * 24.0 + i as f64;
            let mut row = RawRow::new()
                .with("interval", nem_time(*t))
                .with("unit_code", unit.unit)
                .with("network_region", unit.region)
                .with("energy", energy)
                .with("power", unit.capacity * 0.3 + u as f64);
            if !unit.unit.starts_with(unit.facility) {
                row = row.with("facility_code", unit.facility);
            }
            if unit.fueltech != "battery_discharging" {
                row = row.with("market_value", energy * 65.0);
            }
            if unit.fueltech.starts_with("coal") {
                row = row.with("emissions", energy * 0.9);
            }
            out.push(row);
        }
    }
    out
}
