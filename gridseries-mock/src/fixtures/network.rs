use gridseries_core::{ProviderRequest, RawRow};

use super::{REGIONS, nem_time, timeline};

const FUELTECHS: [&str; 3] = ["solar_utility", "wind", "coal_black"];
const GROUPS: [&str; 5] = ["coal", "gas", "hydro", "solar", "wind"];

/// Energy and market value per region and fueltech, honouring the fueltech filter.
///
/// The first wind row of SA1 reports energy without market value.
pub fn fueltech_rows(req: &ProviderRequest) -> Vec<RawRow> {
    let steps = timeline(req);
    let mut out = Vec::new();
    for (r, region) in REGIONS.iter().enumerate() {
        for (f, fueltech) in FUELTECHS.iter().enumerate() {
            if let Some(filter) = &req.fueltech_filter
                && !filter.iter().any(|ft| ft == fueltech)
            {
                continue;
            }
            for (i, t) in steps.iter().enumerate() {
                let energy = 100 * (f as i64 + 1) + i as i64;
                let price = 30 + 5 * f as i64 + r as i64;
                let market_value = if *region == "SA1" && *fueltech == "wind" && i == 0 {
                    0
                } else {
                    energy * price
                };
                out.push(
                    RawRow::new()
                        .with("interval", nem_time(*t))
                        .with("network_region", *region)
                        .with("fueltech", *fueltech)
                        .with("energy", energy)
                        .with("market_value", market_value),
                );
            }
        }
    }
    out
}

/// Energy per region and fueltech group. TAS1 only reports hydro and wind.
pub fn supply_rows(req: &ProviderRequest) -> Vec<RawRow> {
    let steps = timeline(req);
    let mut out = Vec::new();
    for (r, region) in REGIONS.iter().enumerate() {
        for (g, group) in GROUPS.iter().enumerate() {
            if *region == "TAS1" && !matches!(*group, "hydro" | "wind") {
                continue;
            }
            for (i, t) in steps.iter().enumerate() {
                out.push(
                    RawRow::new()
                        .with("interval", nem_time(*t))
                        .with("region", *region)
                        .with("fueltech_group", *group)
                        .with("energy", 50_000 * (g as i64 + 1) + 1_000 * r as i64 + i as i64),
                );
            }
        }
    }
    out
}
