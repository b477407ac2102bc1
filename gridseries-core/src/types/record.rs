use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gridseries_types::{Metric, MetricSet, QueryMode};

/// Region code used when a row names no region.
pub const UNKNOWN_REGION: &str = "UNKNOWN";

/// Upstream stream a raw row arrived on. Selects the drop policy applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Regional market price rows.
    Market,
    /// Network energy/value rows split by fueltech.
    Fueltech,
    /// Regional price rows used as the baseload denominator.
    Baseload,
    /// Regional demand rows.
    Demand,
    /// Network energy rows split by fueltech group.
    Supply,
    /// Regional curtailment rows.
    Curtailment,
    /// Unit-level facility rows.
    Generator,
}

impl RowKind {
    /// The kind of the rows a mode's primary fetch returns.
    #[must_use]
    pub const fn primary(mode: QueryMode) -> Self {
        match mode {
            QueryMode::Market => Self::Market,
            QueryMode::Fueltech => Self::Fueltech,
            QueryMode::DemandSupply => Self::Demand,
            QueryMode::Curtailment => Self::Curtailment,
            QueryMode::Generator => Self::Generator,
        }
    }

    /// Metrics read from rows of this kind.
    #[must_use]
    pub const fn metrics(self) -> MetricSet {
        match self {
            Self::Market | Self::Baseload => MetricSet::PRICE,
            Self::Fueltech => MetricSet::ENERGY.union(MetricSet::MARKET_VALUE),
            Self::Demand => MetricSet::DEMAND.union(MetricSet::DEMAND_ENERGY),
            Self::Supply => MetricSet::ENERGY,
            Self::Curtailment => QueryMode::Curtailment.metrics(),
            Self::Generator => QueryMode::Generator.metrics(),
        }
    }
}

/// Why a raw row produced no canonical record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum DropReason {
    /// No parseable timestamp.
    MissingTimestamp,
    /// A region was required but absent.
    MissingRegion,
    /// The kind's required metric was absent.
    MissingMetric,
    /// Energy and market value were both zero or negative.
    NoGeneration,
    /// Exactly one of energy and market value was positive.
    InconsistentPair,
    /// The fueltech was absent or not one of the tracked technologies.
    UntrackedFueltech,
    /// No facility code could be resolved.
    MissingFacility,
    /// None of the kind's metrics were reported.
    NoMetrics,
}

/// Sparse per-metric values.
///
/// `None` means the metric was never reported, which is distinct from a
/// reported zero. Used both for a single record and for a bucket's running sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricValues {
    /// Energy in MWh.
    pub energy: Option<Decimal>,
    /// Market value in dollars.
    pub market_value: Option<Decimal>,
    /// Power in MW.
    pub power: Option<Decimal>,
    /// Emissions.
    pub emissions: Option<Decimal>,
    /// Price in $/MWh.
    pub price: Option<Decimal>,
    /// Demand in MW.
    pub demand: Option<Decimal>,
    /// Demand energy in MWh.
    pub demand_energy: Option<Decimal>,
    /// Curtailed utility solar.
    pub curtailment_solar: Option<Decimal>,
    /// Curtailed wind.
    pub curtailment_wind: Option<Decimal>,
    /// Total curtailment.
    pub curtailment_total: Option<Decimal>,
}

impl MetricValues {
    /// Value of one metric.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> Option<Decimal> {
        match metric {
            Metric::Energy => self.energy,
            Metric::MarketValue => self.market_value,
            Metric::Power => self.power,
            Metric::Emissions => self.emissions,
            Metric::Price => self.price,
            Metric::Demand => self.demand,
            Metric::DemandEnergy => self.demand_energy,
            Metric::CurtailmentSolar => self.curtailment_solar,
            Metric::CurtailmentWind => self.curtailment_wind,
            Metric::CurtailmentTotal => self.curtailment_total,
        }
    }

    fn slot_mut(&mut self, metric: Metric) -> &mut Option<Decimal> {
        match metric {
            Metric::Energy => &mut self.energy,
            Metric::MarketValue => &mut self.market_value,
            Metric::Power => &mut self.power,
            Metric::Emissions => &mut self.emissions,
            Metric::Price => &mut self.price,
            Metric::Demand => &mut self.demand,
            Metric::DemandEnergy => &mut self.demand_energy,
            Metric::CurtailmentSolar => &mut self.curtailment_solar,
            Metric::CurtailmentWind => &mut self.curtailment_wind,
            Metric::CurtailmentTotal => &mut self.curtailment_total,
        }
    }

    /// Overwrite one metric.
    pub fn set(&mut self, metric: Metric, value: Option<Decimal>) {
        *self.slot_mut(metric) = value;
    }

    /// Add `value` into the running total for `metric`, marking it present.
    ///
    /// Sums saturate at the decimal range instead of overflowing.
    pub fn add(&mut self, metric: Metric, value: Decimal) {
        let slot = self.slot_mut(metric);
        *slot = Some(slot.map_or(value, |sum| sum.saturating_add(value)));
    }

    /// Add every present metric of `other` into `self`.
    pub fn absorb(&mut self, other: &Self) {
        for metric in Metric::ALL {
            if let Some(v) = other.get(metric) {
                self.add(metric, v);
            }
        }
    }

    /// The set of metrics that have been reported.
    #[must_use]
    pub fn present(&self) -> MetricSet {
        Metric::ALL
            .into_iter()
            .filter(|m| self.get(*m).is_some())
            .collect()
    }

    /// True when no metric has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}

/// One normalized observation.
///
/// Created once per raw row and consumed immediately by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    /// Stream the row came from.
    pub kind: RowKind,
    /// Uppercased region code, or [`UNKNOWN_REGION`].
    pub region: String,
    /// Facility code (generator rows).
    pub facility_code: Option<String>,
    /// Unit code when the row was unit-level (generator rows).
    pub unit_code: Option<String>,
    /// Fueltech (fueltech rows) or fueltech group (supply rows).
    pub fueltech: Option<String>,
    /// Observation instant, truncated to milliseconds.
    pub timestamp: DateTime<Utc>,
    /// Reported metrics.
    pub metrics: MetricValues,
}

impl CanonicalRecord {
    /// Value of `metric` on this record.
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> Option<Decimal> {
        self.metrics.get(metric)
    }
}
