use std::sync::Arc;

use chrono::{DateTime, Utc};
use gridseries::{GridConnector, GroupSeries, SeriesReport};

/// Return a connector for examples.
///
/// Only the fixture connector ships with the workspace; an Open Electricity
/// connector plugs in here.
#[must_use]
pub fn get_connector() -> Arc<dyn GridConnector> {
    println!("--- (Using Mock Connector) ---");
    Arc::new(gridseries_mock::MockConnector::new())
}

/// Fixed "now" (2024-06-15T00:00Z) so example output is stable across runs.
#[must_use]
pub fn as_of() -> DateTime<Utc> {
    DateTime::from_timestamp(1_718_409_600, 0).unwrap_or_default()
}

/// Print the warnings and row accounting of a report.
pub fn print_summary(report: &SeriesReport) {
    println!(
        "{} {} {}..{} ({} months)",
        report.mode,
        report.interval,
        report.date_range.start,
        report.date_range.end,
        report.effective_months
    );
    for w in &report.warnings {
        println!("  warning: {w}");
    }
    let d = &report.diagnostics;
    println!(
        "  rows: {} received, {} accepted, {} dropped",
        d.rows_received,
        d.rows_accepted,
        d.total_dropped()
    );
    for (reason, n) in &d.dropped {
        println!("    {reason:?}: {n}");
    }
}

/// Print the number of points per group.
pub fn print_groups(report: &SeriesReport) {
    for (group, series) in &report.regions {
        match series {
            GroupSeries::Flat(points) => println!("  {group}: {} points", points.len()),
            GroupSeries::ByFueltech(map) => {
                for (ft, points) in map {
                    println!("  {group}/{ft}: {} points", points.len());
                }
            }
        }
    }
}
