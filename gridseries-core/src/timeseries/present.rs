use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, SecondsFormat, Timelike, Utc};
use chrono_tz::Tz;

use super::derive::DerivedSeries;
use super::strategy::{ModeStrategy, Nesting};
use crate::types::{GridConfig, GroupSeries, Interval, LabelLocale, PointValues, SeriesPoint};

const EN_AU_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "June", "July", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Granularity of a period label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Month and year.
    Month,
    /// Day, month and year.
    Day,
    /// Day, month, year, hour and minute.
    Minute,
}

impl LabelStyle {
    /// Label granularity for `interval`.
    #[must_use]
    pub const fn for_interval(interval: Interval) -> Self {
        if interval.is_calendar_period() {
            Self::Month
        } else if interval.is_sub_daily() {
            Self::Minute
        } else {
            Self::Day
        }
    }
}

/// Presented series for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedSeries {
    /// Ordered series per output group.
    pub regions: BTreeMap<String, GroupSeries>,
    /// Sorted fueltech groups seen on the supply side.
    pub fueltech_groups: Vec<String>,
}

/// Sorts derived points chronologically and labels them in market time.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    tz: Tz,
    locale: LabelLocale,
}

impl Presenter {
    /// Presenter rendering calendar fields in `tz` with `locale` labels.
    #[must_use]
    pub const fn new(tz: Tz, locale: LabelLocale) -> Self {
        Self { tz, locale }
    }

    /// Presenter for the configured market zone and label locale.
    #[must_use]
    pub const fn from_config(cfg: &GridConfig) -> Self {
        Self::new(cfg.market_timezone, cfg.label_locale)
    }

    /// Period label for `ts`.
    #[must_use]
    pub fn label(&self, ts: DateTime<Utc>, style: LabelStyle) -> String {
        let local = ts.with_timezone(&self.tz);
        if self.locale == LabelLocale::Iso {
            let fmt = match style {
                LabelStyle::Month => "%Y-%m",
                LabelStyle::Day => "%Y-%m-%d",
                LabelStyle::Minute => "%Y-%m-%d %H:%M",
            };
            return local.format(fmt).to_string();
        }

        let month = EN_AU_MONTHS[local.month0() as usize];
        match style {
            LabelStyle::Month => format!("{month} {}", local.year()),
            LabelStyle::Day => format!("{} {month} {}", local.day(), local.year()),
            LabelStyle::Minute => {
                let (pm, hour) = local.hour12();
                format!(
                    "{} {month} {}, {hour:02}:{:02} {}",
                    local.day(),
                    local.year(),
                    local.minute(),
                    if pm { "pm" } else { "am" }
                )
            }
        }
    }

    /// Build one output point.
    #[must_use]
    pub fn point(&self, ts: DateTime<Utc>, style: LabelStyle, values: PointValues) -> SeriesPoint {
        let local = ts.with_timezone(&self.tz);
        SeriesPoint {
            timestamp: ts,
            date: ts.to_rfc3339_opts(SecondsFormat::Millis, true),
            label: self.label(ts, style),
            month: self.label(ts, LabelStyle::Month),
            year: local.year(),
            month_num: local.month(),
            day: local.day(),
            values,
        }
    }

    /// Emit the ordered series of every group.
    ///
    /// Points are ordered by their full instant at every interval.
    #[must_use]
    pub fn present(&self, series: DerivedSeries, interval: Interval) -> PresentedSeries {
        let strategy = ModeStrategy::for_mode(series.mode);
        let style = strategy.label_style(interval);
        let mut regions: BTreeMap<String, GroupSeries> = BTreeMap::new();

        for (key, derived) in series.groups {
            let mut points: Vec<SeriesPoint> = derived
                .into_iter()
                .map(|p| self.point(p.timestamp, style, p.values))
                .collect();
            points.sort_by_key(|p| p.timestamp);

            let group = key.group().to_string();
            match (strategy.nesting, key.fueltech()) {
                (Nesting::ByFueltech, Some(fueltech)) => {
                    let entry = regions
                        .entry(group)
                        .or_insert_with(|| GroupSeries::ByFueltech(BTreeMap::new()));
                    if let GroupSeries::ByFueltech(map) = entry {
                        map.entry(fueltech.to_string()).or_default().extend(points);
                    }
                }
                _ => match regions.entry(group).or_insert_with(|| GroupSeries::Flat(Vec::new())) {
                    GroupSeries::Flat(existing) => {
                        existing.extend(points);
                        existing.sort_by_key(|p| p.timestamp);
                    }
                    GroupSeries::ByFueltech(_) => {}
                },
            }
        }

        PresentedSeries {
            regions,
            fueltech_groups: series.fueltech_groups.into_iter().collect(),
        }
    }
}
