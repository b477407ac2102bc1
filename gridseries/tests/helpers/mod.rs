// Re-export helpers so tests can `use crate::helpers::*;`
pub mod mock_connector;

pub use mock_connector::MockConnector;

use chrono::{DateTime, NaiveDate, Utc};
use gridseries_core::RawRow;

/// Region constants used across tests.
pub const NSW1: &str = "NSW1";
pub const SA1: &str = "SA1";
#[allow(dead_code)]
pub const VIC1: &str = "VIC1";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hh, mm, 0))
        .expect("valid test instant")
        .and_utc()
}

/// Fixed "now" for deterministic ranges: 2024-06-15T00:00Z.
pub fn as_of() -> DateTime<Utc> {
    dt(2024, 6, 15, 0, 0)
}

/// First-of-month instant in NEM time, as the upstream API reports it.
pub fn month(y: i32, m: u32) -> String {
    format!("{y}-{m:02}-01T00:00:00+10:00")
}

#[allow(dead_code)]
pub fn price_row(ts: &str, region: &str, price: f64) -> RawRow {
    RawRow::new()
        .with("interval", ts)
        .with("region", region)
        .with("price", price)
}

#[allow(dead_code)]
pub fn fueltech_row(ts: &str, region: &str, fueltech: &str, energy: i64, market_value: i64) -> RawRow {
    RawRow::new()
        .with("interval", ts)
        .with("network_region", region)
        .with("fueltech", fueltech)
        .with("energy", energy)
        .with("market_value", market_value)
}

#[allow(dead_code)]
pub fn demand_row(ts: &str, region: &str, demand: i64) -> RawRow {
    RawRow::new()
        .with("interval", ts)
        .with("region", region)
        .with("demand", demand)
}

#[allow(dead_code)]
pub fn supply_row(ts: &str, region: &str, group: &str, energy: i64) -> RawRow {
    RawRow::new()
        .with("interval", ts)
        .with("region", region)
        .with("fueltech_group", group)
        .with("energy", energy)
}

#[allow(dead_code)]
pub fn unit_row(ts: &str, unit: &str, energy: i64) -> RawRow {
    RawRow::new()
        .with("interval", ts)
        .with("unit_code", unit)
        .with("energy", energy)
}
