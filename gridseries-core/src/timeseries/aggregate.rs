use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::strategy::ModeStrategy;
use crate::types::{CanonicalRecord, MetricValues, QueryMode, RowKind, UNKNOWN_REGION};

/// Composite grouping key, one shape per query mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    /// Market prices by region.
    Market {
        /// Region code.
        region: String,
    },
    /// Fueltech energy/value by region, then fueltech.
    Fueltech {
        /// Region code.
        region: String,
        /// Tracked fueltech.
        fueltech: String,
    },
    /// Demand (and attached supply) by region.
    DemandSupply {
        /// Region code.
        region: String,
    },
    /// Curtailment by region.
    Curtailment {
        /// Region code.
        region: String,
    },
    /// Generation by facility.
    Generator {
        /// Facility code.
        facility: String,
    },
}

impl GroupKey {
    /// Top-level output group: the region, or the facility code in generator mode.
    #[must_use]
    pub fn group(&self) -> &str {
        match self {
            Self::Market { region }
            | Self::Fueltech { region, .. }
            | Self::DemandSupply { region }
            | Self::Curtailment { region } => region,
            Self::Generator { facility } => facility,
        }
    }

    /// Region of regional keys.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        match self {
            Self::Generator { .. } => None,
            other => Some(other.group()),
        }
    }

    /// Fueltech of fueltech keys.
    #[must_use]
    pub fn fueltech(&self) -> Option<&str> {
        match self {
            Self::Fueltech { fueltech, .. } => Some(fueltech),
            _ => None,
        }
    }
}

/// Running totals for one `(group, instant)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Instant of the bucket.
    pub timestamp: DateTime<Utc>,
    /// Summed metrics; `None` where no row reported the metric.
    pub sums: MetricValues,
    /// Supply energy by fueltech group (demand/supply mode).
    pub supply: BTreeMap<String, Decimal>,
    /// Rows that carried a unit identifier.
    pub unit_count: u32,
    /// Rows that carried a price; `sums.price` is divided by this.
    pub price_quotes: u32,
    /// Region reported by the contributing rows, if any.
    pub region: Option<String>,
    /// Rows folded into this bucket.
    pub rows: u32,
}

impl Bucket {
    /// Empty bucket at `timestamp`.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            sums: MetricValues {
                energy: None,
                market_value: None,
                power: None,
                emissions: None,
                price: None,
                demand: None,
                demand_energy: None,
                curtailment_solar: None,
                curtailment_wind: None,
                curtailment_total: None,
            },
            supply: BTreeMap::new(),
            unit_count: 0,
            price_quotes: 0,
            region: None,
            rows: 0,
        }
    }

    /// Fold one record into the bucket.
    pub fn add(&mut self, record: &CanonicalRecord) {
        self.sums.absorb(&record.metrics);
        self.rows += 1;
        if record.unit_code.is_some() {
            self.unit_count += 1;
        }
        if record.metrics.price.is_some() {
            self.price_quotes += 1;
        }
        if record.region != UNKNOWN_REGION {
            self.note_region(&record.region);
        }
    }

    /// Add supply energy for a fueltech group.
    pub fn add_supply(&mut self, group: &str, energy: Decimal) {
        let slot = self.supply.entry(group.to_string()).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(energy);
    }

    /// Fold another bucket for the same key into this one.
    pub fn merge(&mut self, other: &Self) {
        self.sums.absorb(&other.sums);
        for (group, energy) in &other.supply {
            self.add_supply(group, *energy);
        }
        self.unit_count += other.unit_count;
        self.price_quotes += other.price_quotes;
        self.rows += other.rows;
        if let Some(region) = &other.region {
            self.note_region(region);
        }
    }

    /// Mean of the prices folded into this bucket.
    ///
    /// Prices are rates, so duplicate quotes for one instant are averaged
    /// rather than summed.
    #[must_use]
    pub fn mean_price(&self) -> Option<Decimal> {
        let sum = self.sums.price?;
        match self.price_quotes {
            0 | 1 => Some(sum),
            n => sum.checked_div(Decimal::from(n)),
        }
    }

    // Units of one facility may disagree; the smallest code wins so the
    // outcome does not depend on row order.
    fn note_region(&mut self, region: &str) {
        match &self.region {
            Some(current) if current.as_str() <= region => {}
            _ => self.region = Some(region.to_string()),
        }
    }
}

type TimeBuckets = BTreeMap<DateTime<Utc>, Bucket>;

/// Accumulates canonical records into buckets keyed by group and instant.
///
/// The state is owned by one request; nothing here is shared.
#[derive(Debug, Clone)]
pub struct Aggregator {
    strategy: &'static ModeStrategy,
    buckets: BTreeMap<GroupKey, TimeBuckets>,
    supply: BTreeMap<String, BTreeMap<DateTime<Utc>, BTreeMap<String, Decimal>>>,
    fueltech_groups: BTreeSet<String>,
}

impl Aggregator {
    /// Empty aggregator for `mode`.
    #[must_use]
    pub fn new(mode: QueryMode) -> Self {
        Self {
            strategy: ModeStrategy::for_mode(mode),
            buckets: BTreeMap::new(),
            supply: BTreeMap::new(),
            fueltech_groups: BTreeSet::new(),
        }
    }

    /// Fold `record` into its bucket.
    ///
    /// Supply records go to the parallel supply map. Baseload records are
    /// not aggregated (see [`super::derive::BaseloadLookup`]).
    pub fn accumulate(&mut self, record: &CanonicalRecord) {
        match record.kind {
            RowKind::Supply => self.accumulate_supply(record),
            RowKind::Baseload => {}
            _ => {
                let Some(key) = self.strategy.group_key(record) else {
                    return;
                };
                self.buckets
                    .entry(key)
                    .or_default()
                    .entry(record.timestamp)
                    .or_insert_with(|| Bucket::new(record.timestamp))
                    .add(record);
            }
        }
    }

    fn accumulate_supply(&mut self, record: &CanonicalRecord) {
        let (Some(group), Some(energy)) = (record.fueltech.as_deref(), record.metrics.energy) else {
            return;
        };
        self.fueltech_groups.insert(group.to_string());
        let slot = self
            .supply
            .entry(record.region.clone())
            .or_default()
            .entry(record.timestamp)
            .or_default()
            .entry(group.to_string())
            .or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(energy);
    }

    /// Number of buckets so far.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.values().map(BTreeMap::len).sum()
    }

    /// Finish accumulation, attaching supply to the demand bucket at the same
    /// region and instant. Supply without a matching demand bucket is discarded.
    #[must_use]
    pub fn finish(mut self) -> AggregatedSeries {
        for (key, times) in &mut self.buckets {
            let GroupKey::DemandSupply { region } = key else {
                continue;
            };
            let Some(region_supply) = self.supply.get_mut(region) else {
                continue;
            };
            for (ts, bucket) in times.iter_mut() {
                if let Some(groups) = region_supply.remove(ts) {
                    for (group, energy) in &groups {
                        bucket.add_supply(group, *energy);
                    }
                }
            }
        }
        AggregatedSeries {
            mode: self.strategy.mode,
            buckets: self.buckets,
            fueltech_groups: self.fueltech_groups,
        }
    }
}

/// Completed buckets of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedSeries {
    /// Mode the buckets were built for.
    pub mode: QueryMode,
    /// Buckets by group, then instant.
    pub buckets: BTreeMap<GroupKey, BTreeMap<DateTime<Utc>, Bucket>>,
    /// Every fueltech group seen on the supply side.
    pub fueltech_groups: BTreeSet<String>,
}

impl AggregatedSeries {
    /// Bucket at `key` and `timestamp`.
    #[must_use]
    pub fn bucket(&self, key: &GroupKey, timestamp: DateTime<Utc>) -> Option<&Bucket> {
        self.buckets.get(key).and_then(|t| t.get(&timestamp))
    }

    /// Total number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.values().map(BTreeMap::len).sum()
    }
}
