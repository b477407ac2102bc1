use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::aggregate::{AggregatedSeries, Bucket, GroupKey};
use super::strategy::ModeStrategy;
use crate::types::{CanonicalRecord, PointValues, QueryMode, RowKind};

/// Regional price by instant, used as the percentage-of-baseload denominator.
///
/// Built once per request from the baseload fetch and read-only afterwards.
/// Duplicate quotes for the same region and instant are averaged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseloadLookup {
    prices: BTreeMap<String, BTreeMap<DateTime<Utc>, (Decimal, u32)>>,
}

impl BaseloadLookup {
    /// Empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a price for `region` at `timestamp`.
    pub fn insert(&mut self, region: &str, timestamp: DateTime<Utc>, price: Decimal) {
        let (sum, n) = self
            .prices
            .entry(region.to_string())
            .or_default()
            .entry(timestamp)
            .or_insert((Decimal::ZERO, 0));
        *sum = sum.saturating_add(price);
        *n += 1;
    }

    /// Record a normalized baseload row. Other kinds are ignored.
    pub fn record(&mut self, record: &CanonicalRecord) {
        if record.kind != RowKind::Baseload {
            return;
        }
        if let Some(price) = record.metrics.price {
            self.insert(&record.region, record.timestamp, price);
        }
    }

    /// Price for an exact `(region, timestamp)` match.
    #[must_use]
    pub fn get(&self, region: &str, timestamp: DateTime<Utc>) -> Option<Decimal> {
        let (sum, n) = self.prices.get(region)?.get(&timestamp)?;
        match n {
            0 => None,
            1 => Some(*sum),
            n => sum.checked_div(Decimal::from(*n)),
        }
    }

    /// Number of `(region, instant)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.values().map(BTreeMap::len).sum()
    }

    /// True when no price was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Generation-weighted average price: `Σ market value / Σ energy`.
///
/// Zero when there is no positive energy.
#[must_use]
pub fn weighted_average_price(total_market_value: Decimal, total_energy: Decimal) -> Decimal {
    if total_energy > Decimal::ZERO {
        total_market_value
            .checked_div(total_energy)
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// `avg_price / baseload × 100`, or `None` without a positive baseload.
#[must_use]
pub fn percentage_of_baseload(avg_price: Decimal, baseload: Option<Decimal>) -> Option<Decimal> {
    baseload
        .filter(|b| *b > Decimal::ZERO)
        .and_then(|b| avg_price.checked_div(b))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}

/// One point with its final metric values, before labelling.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedPoint {
    /// Instant of the point.
    pub timestamp: DateTime<Utc>,
    /// Metric values.
    pub values: PointValues,
}

/// Derived points per group.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    /// Mode the points were built for.
    pub mode: QueryMode,
    /// Points per group, in bucket order.
    pub groups: BTreeMap<GroupKey, Vec<DerivedPoint>>,
    /// Fueltech groups seen on the supply side.
    pub fueltech_groups: BTreeSet<String>,
}

/// Compute derived quantities once aggregation is complete.
#[must_use]
pub fn derive_series(series: AggregatedSeries, baseload: Option<&BaseloadLookup>) -> DerivedSeries {
    let strategy = ModeStrategy::for_mode(series.mode);
    let groups = series
        .buckets
        .into_iter()
        .map(|(key, times)| {
            let points = times
                .into_values()
                .map(|bucket| DerivedPoint {
                    timestamp: bucket.timestamp,
                    values: strategy.values(&key, &bucket, baseload),
                })
                .collect();
            (key, points)
        })
        .collect();
    DerivedSeries {
        mode: series.mode,
        groups,
        fueltech_groups: series.fueltech_groups,
    }
}

pub(crate) fn market_values(_: &GroupKey, b: &Bucket, _: Option<&BaseloadLookup>) -> PointValues {
    PointValues::Market {
        price: b.mean_price(),
    }
}

pub(crate) fn fueltech_values(
    key: &GroupKey,
    b: &Bucket,
    baseload: Option<&BaseloadLookup>,
) -> PointValues {
    let total_energy = b.sums.energy.unwrap_or(Decimal::ZERO);
    let total_market_value = b.sums.market_value.unwrap_or(Decimal::ZERO);
    let price = weighted_average_price(total_market_value, total_energy);
    let baseload_price = baseload
        .zip(key.region())
        .and_then(|(lookup, region)| lookup.get(region, b.timestamp));
    PointValues::Fueltech {
        price,
        percentage_of_baseload: percentage_of_baseload(price, baseload_price),
        baseload_price,
        total_energy,
        total_market_value,
    }
}

pub(crate) fn demand_supply_values(
    _: &GroupKey,
    b: &Bucket,
    _: Option<&BaseloadLookup>,
) -> PointValues {
    PointValues::DemandSupply {
        demand: b.sums.demand,
        demand_energy: b.sums.demand_energy,
        supply: b.supply.clone(),
    }
}

pub(crate) fn curtailment_values(
    _: &GroupKey,
    b: &Bucket,
    _: Option<&BaseloadLookup>,
) -> PointValues {
    PointValues::Curtailment {
        curtailment_solar: b.sums.curtailment_solar,
        curtailment_wind: b.sums.curtailment_wind,
        curtailment_total: b.sums.curtailment_total,
    }
}

pub(crate) fn generator_values(
    _: &GroupKey,
    b: &Bucket,
    _: Option<&BaseloadLookup>,
) -> PointValues {
    PointValues::Generator {
        energy: b.sums.energy,
        market_value: b.sums.market_value,
        power: b.sums.power,
        emissions: b.sums.emissions,
        region: b.region.clone(),
        unit_count: b.unit_count,
    }
}
