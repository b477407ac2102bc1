use gridseries_core::{Metric, ProviderRequest, RawRow};
use serde_json::Value;

use super::{REGIONS, nem_time, timeline};

/// Regional market rows carrying every requested metric.
///
/// Odd regions report under `network_region`, even ones under `region`.
pub fn rows(req: &ProviderRequest) -> Vec<RawRow> {
    let steps = timeline(req);
    let mut out = Vec::with_capacity(steps.len() * REGIONS.len());
    for (r, region) in REGIONS.iter().enumerate() {
        let region_key = if r % 2 == 0 { "region" } else { "network_region" };
        for (i, t) in steps.iter().enumerate() {
            let mut row = RawRow::new()
                .with("interval", nem_time(*t))
                .with(region_key, *region);
            for metric in &req.metrics {
                if let Some(v) = value(*metric, r, i) {
                    row = row.with(metric.provider_name(), v);
                }
            }
            out.push(row);
        }
    }
    out
}

fn value(metric: Metric, r: usize, i: usize) -> Option<Value> {
    let (r, i) = (r as i64, i as i64);
    let v = match metric {
        Metric::Price => Value::from(40.0 + 10.0 * r as f64 + 2.5 * (i % 5) as f64),
        Metric::Demand => Value::from(1000 * (r + 1) + 10 * i),
        // SA1 does not report demand energy.
        Metric::DemandEnergy if r == 2 => return None,
        Metric::DemandEnergy => Value::from((1000 * (r + 1) + 10 * i) * 720),
        Metric::CurtailmentSolar => Value::from(2 * (r + 1) + i % 3),
        Metric::CurtailmentWind => Value::from(r + i % 2),
        Metric::CurtailmentTotal => Value::from(2 * (r + 1) + i % 3 + r + i % 2),
        _ => return None,
    };
    Some(v)
}
