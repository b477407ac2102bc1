use chrono::{Datelike, Months, NaiveDateTime, NaiveTime, TimeDelta};
use gridseries_core::{Interval, ProviderRequest};

pub mod catalog;
pub mod facility;
pub mod market;
pub mod network;

/// Regions served by the fixtures.
pub const REGIONS: [&str; 5] = ["NSW1", "QLD1", "SA1", "TAS1", "VIC1"];

const MAX_POINTS: usize = 24;

enum Step {
    Months(u32),
    Fixed(TimeDelta),
}

const fn step(interval: Interval) -> Step {
    match interval {
        Interval::FiveMinutes => Step::Fixed(TimeDelta::minutes(5)),
        Interval::Hour => Step::Fixed(TimeDelta::hours(1)),
        Interval::Day => Step::Fixed(TimeDelta::days(1)),
        Interval::Week => Step::Fixed(TimeDelta::days(7)),
        Interval::Month => Step::Months(1),
        Interval::Quarter | Interval::Season => Step::Months(3),
        Interval::Year | Interval::FinancialYear => Step::Months(12),
    }
}

/// Interval-aligned instants within the request range, the latest `MAX_POINTS` of them.
pub fn timeline(req: &ProviderRequest) -> Vec<NaiveDateTime> {
    let start = req.date_start.and_time(NaiveTime::MIN);
    let end = req.date_end.and_time(NaiveTime::MIN);
    let mut out = Vec::new();
    match step(req.interval) {
        Step::Fixed(delta) => {
            let mut t = end;
            while t >= start && out.len() < MAX_POINTS {
                out.push(t);
                t -= delta;
            }
            out.reverse();
        }
        Step::Months(n) => {
            let mut t = start
                .date()
                .with_day(1)
                .map_or(start, |d| d.and_time(NaiveTime::MIN));
            if t < start
                && let Some(next) = t.checked_add_months(Months::new(1))
            {
                t = next;
            }
            while t <= end {
                out.push(t);
                match t.checked_add_months(Months::new(n)) {
                    Some(next) => t = next,
                    None => break,
                }
            }
            let skip = out.len().saturating_sub(MAX_POINTS);
            out.drain(..skip);
        }
    }
    out
}

/// Render an instant in NEM time the way the upstream API does.
pub fn nem_time(t: NaiveDateTime) -> String {
    format!("{}+10:00", t.format("%Y-%m-%dT%H:%M:%S"))
}
