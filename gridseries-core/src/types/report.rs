use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gridseries_types::{GridError, Interval, QueryMode};

use super::DropReason;
use crate::timeseries::range::DateRange;

/// Row accounting for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Raw rows seen across all fetches.
    pub rows_received: u64,
    /// Rows that produced a canonical record.
    pub rows_accepted: u64,
    /// Dropped rows by reason.
    pub dropped: BTreeMap<DropReason, u64>,
}

impl Diagnostics {
    /// Count one accepted row.
    pub const fn accept(&mut self) {
        self.rows_received += 1;
        self.rows_accepted += 1;
    }

    /// Count one dropped row.
    pub fn drop_row(&mut self, reason: DropReason) {
        self.rows_received += 1;
        *self.dropped.entry(reason).or_insert(0) += 1;
    }

    /// Dropped rows for `reason`.
    #[must_use]
    pub fn dropped(&self, reason: DropReason) -> u64 {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }

    /// Total dropped rows.
    #[must_use]
    pub fn total_dropped(&self) -> u64 {
        self.dropped.values().sum()
    }
}

/// Metric values of one output point, shaped per query mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PointValues {
    /// Regional price.
    Market {
        /// Price in $/MWh.
        price: Option<Decimal>,
    },
    /// Generation-weighted price of one fueltech in one region.
    #[serde(rename_all = "camelCase")]
    Fueltech {
        /// Weighted average price (`Σ market value / Σ energy`, zero without energy).
        price: Decimal,
        /// `price / baseload × 100`, absent without a positive baseload.
        percentage_of_baseload: Option<Decimal>,
        /// Regional price at the same instant.
        baseload_price: Option<Decimal>,
        /// Summed energy.
        total_energy: Decimal,
        /// Summed market value.
        total_market_value: Decimal,
    },
    /// Regional demand and supply by fueltech group.
    #[serde(rename_all = "camelCase")]
    DemandSupply {
        /// Demand in MW.
        demand: Option<Decimal>,
        /// Demand energy in MWh.
        demand_energy: Option<Decimal>,
        /// Energy per fueltech group.
        supply: BTreeMap<String, Decimal>,
    },
    /// Regional curtailment.
    #[serde(rename_all = "camelCase")]
    Curtailment {
        /// Curtailed utility solar.
        curtailment_solar: Option<Decimal>,
        /// Curtailed wind.
        curtailment_wind: Option<Decimal>,
        /// Total curtailment.
        curtailment_total: Option<Decimal>,
    },
    /// Facility totals across units.
    #[serde(rename_all = "camelCase")]
    Generator {
        /// Energy in MWh.
        energy: Option<Decimal>,
        /// Market value in dollars.
        market_value: Option<Decimal>,
        /// Power in MW.
        power: Option<Decimal>,
        /// Emissions.
        emissions: Option<Decimal>,
        /// Region of the facility, when any unit reported one.
        region: Option<String>,
        /// Unit-level rows folded into this point.
        unit_count: u32,
    },
}

/// One presented observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Instant the point describes.
    #[serde(skip)]
    pub timestamp: DateTime<Utc>,
    /// UTC instant, millisecond precision, `Z` suffix.
    pub date: String,
    /// Period label at the interval's granularity.
    pub label: String,
    /// Month label regardless of interval.
    pub month: String,
    /// Calendar year in market time.
    pub year: i32,
    /// Calendar month (1-12) in market time.
    pub month_num: u32,
    /// Day of month in market time.
    pub day: u32,
    /// Metric values.
    #[serde(flatten)]
    pub values: PointValues,
}

/// Output series of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupSeries {
    /// One ordered series.
    Flat(Vec<SeriesPoint>),
    /// One ordered series per fueltech.
    ByFueltech(BTreeMap<String, Vec<SeriesPoint>>),
}

impl GroupSeries {
    /// The flat series, if this group is not nested.
    #[must_use]
    pub fn as_flat(&self) -> Option<&[SeriesPoint]> {
        match self {
            Self::Flat(points) => Some(points),
            Self::ByFueltech(_) => None,
        }
    }

    /// The series of one fueltech, if this group is nested.
    #[must_use]
    pub fn fueltech(&self, fueltech: &str) -> Option<&[SeriesPoint]> {
        match self {
            Self::ByFueltech(map) => map.get(fueltech).map(Vec::as_slice),
            Self::Flat(_) => None,
        }
    }

    /// Number of points across all nested series.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(points) => points.len(),
            Self::ByFueltech(map) => map.values().map(Vec::len).sum(),
        }
    }

    /// True when the group holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result envelope of a series request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesReport {
    /// Always `true`; failures are returned as `Err`.
    pub success: bool,
    /// Query mode served.
    #[serde(rename = "type")]
    pub mode: QueryMode,
    /// Interval served.
    pub interval: Interval,
    /// Resolved (possibly clamped) calendar range.
    pub date_range: DateRange,
    /// Lookback actually covered, in whole months.
    pub effective_months: u32,
    /// Series per region, or per facility code in generator mode.
    pub regions: BTreeMap<String, GroupSeries>,
    /// Fueltech groups seen on the supply side (demand/supply mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fueltech_groups: Option<Vec<String>>,
    /// Non-fatal issues: no data, degraded secondary fetches, clamped ranges.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<GridError>,
    /// Row accounting.
    pub diagnostics: Diagnostics,
}

impl SeriesReport {
    /// Flat series for `group`, if present and not nested.
    #[must_use]
    pub fn series(&self, group: &str) -> Option<&[SeriesPoint]> {
        self.regions.get(group).and_then(GroupSeries::as_flat)
    }

    /// True when no group holds any point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.values().all(GroupSeries::is_empty)
    }
}
