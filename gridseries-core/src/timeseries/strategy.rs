use super::aggregate::{Bucket, GroupKey};
use super::derive::{
    BaseloadLookup, curtailment_values, demand_supply_values, fueltech_values, generator_values,
    market_values,
};
use super::present::LabelStyle;
use crate::types::{
    CanonicalRecord, Capability, Grouping, Interval, Metric, MetricSet, PointValues, QueryMode,
    RowKind,
};

/// How a failed fetch affects the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRole {
    /// Failure fails the request; "no data" yields an empty result.
    Primary,
    /// "No data" yields empty rows with a warning; other failures fail the request.
    Paired,
    /// Any failure yields empty rows with a warning; dependent metrics degrade to null.
    Optional,
}

/// One upstream fetch a mode needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    /// Provider role that serves the fetch.
    pub capability: Capability,
    /// Kind of the rows it returns.
    pub kind: RowKind,
    /// Metrics requested.
    pub metrics: &'static [Metric],
    /// Primary grouping, when the endpoint takes one.
    pub primary_grouping: Option<Grouping>,
    /// Secondary grouping.
    pub secondary_grouping: Option<Grouping>,
    /// Restrict upstream rows to the tracked fueltechs.
    pub filter_fueltechs: bool,
    /// Failure handling.
    pub role: FetchRole,
}

/// Shape of a mode's output groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// One series per group.
    Flat,
    /// One series per group and fueltech.
    ByFueltech,
}

type KeyFn = fn(&CanonicalRecord) -> Option<GroupKey>;
type ValuesFn = fn(&GroupKey, &Bucket, Option<&BaseloadLookup>) -> PointValues;

/// Everything that varies by query mode, selected once per request.
#[derive(Debug, Clone, Copy)]
pub struct ModeStrategy {
    /// Mode described.
    pub mode: QueryMode,
    /// Canonical metrics populated.
    pub metrics: MetricSet,
    /// Fetch producing the aggregated rows.
    pub primary: FetchPlan,
    /// Companion fetch, if any.
    pub secondary: Option<FetchPlan>,
    /// Output shape.
    pub nesting: Nesting,
    /// Requests must name facility codes.
    pub requires_facilities: bool,
    group_key: KeyFn,
    values: ValuesFn,
}

const REGION_MARKET_PRICE: FetchPlan = FetchPlan {
    capability: Capability::MarketData,
    kind: RowKind::Market,
    metrics: &[Metric::Price],
    primary_grouping: Some(Grouping::NetworkRegion),
    secondary_grouping: None,
    filter_fueltechs: false,
    role: FetchRole::Primary,
};

static STRATEGIES: [ModeStrategy; 5] = [
    ModeStrategy {
        mode: QueryMode::Market,
        metrics: QueryMode::Market.metrics(),
        primary: REGION_MARKET_PRICE,
        secondary: None,
        nesting: Nesting::Flat,
        requires_facilities: false,
        group_key: |r| {
            Some(GroupKey::Market {
                region: r.region.clone(),
            })
        },
        values: market_values,
    },
    ModeStrategy {
        mode: QueryMode::Fueltech,
        metrics: QueryMode::Fueltech.metrics(),
        primary: FetchPlan {
            capability: Capability::NetworkData,
            kind: RowKind::Fueltech,
            metrics: &[Metric::Energy, Metric::MarketValue],
            primary_grouping: Some(Grouping::NetworkRegion),
            secondary_grouping: Some(Grouping::Fueltech),
            filter_fueltechs: true,
            role: FetchRole::Primary,
        },
        secondary: Some(FetchPlan {
            kind: RowKind::Baseload,
            role: FetchRole::Optional,
            ..REGION_MARKET_PRICE
        }),
        nesting: Nesting::ByFueltech,
        requires_facilities: false,
        group_key: |r| {
            r.fueltech.as_ref().map(|ft| GroupKey::Fueltech {
                region: r.region.clone(),
                fueltech: ft.clone(),
            })
        },
        values: fueltech_values,
    },
    ModeStrategy {
        mode: QueryMode::DemandSupply,
        metrics: QueryMode::DemandSupply.metrics(),
        primary: FetchPlan {
            kind: RowKind::Demand,
            metrics: &[Metric::Demand, Metric::DemandEnergy],
            ..REGION_MARKET_PRICE
        },
        secondary: Some(FetchPlan {
            capability: Capability::NetworkData,
            kind: RowKind::Supply,
            metrics: &[Metric::Energy],
            primary_grouping: Some(Grouping::NetworkRegion),
            secondary_grouping: Some(Grouping::FueltechGroup),
            filter_fueltechs: false,
            role: FetchRole::Paired,
        }),
        nesting: Nesting::Flat,
        requires_facilities: false,
        group_key: |r| {
            Some(GroupKey::DemandSupply {
                region: r.region.clone(),
            })
        },
        values: demand_supply_values,
    },
    ModeStrategy {
        mode: QueryMode::Curtailment,
        metrics: QueryMode::Curtailment.metrics(),
        primary: FetchPlan {
            kind: RowKind::Curtailment,
            metrics: &[
                Metric::CurtailmentSolar,
                Metric::CurtailmentWind,
                Metric::CurtailmentTotal,
            ],
            ..REGION_MARKET_PRICE
        },
        secondary: None,
        nesting: Nesting::Flat,
        requires_facilities: false,
        group_key: |r| {
            Some(GroupKey::Curtailment {
                region: r.region.clone(),
            })
        },
        values: curtailment_values,
    },
    ModeStrategy {
        mode: QueryMode::Generator,
        metrics: QueryMode::Generator.metrics(),
        primary: FetchPlan {
            capability: Capability::FacilityData,
            kind: RowKind::Generator,
            metrics: &[
                Metric::Energy,
                Metric::MarketValue,
                Metric::Power,
                Metric::Emissions,
            ],
            primary_grouping: None,
            secondary_grouping: None,
            filter_fueltechs: false,
            role: FetchRole::Primary,
        },
        secondary: None,
        nesting: Nesting::Flat,
        requires_facilities: true,
        group_key: |r| {
            r.facility_code
                .as_ref()
                .map(|f| GroupKey::Generator { facility: f.clone() })
        },
        values: generator_values,
    },
];

impl ModeStrategy {
    /// The strategy for `mode`.
    #[must_use]
    pub fn for_mode(mode: QueryMode) -> &'static Self {
        match mode {
            QueryMode::Market => &STRATEGIES[0],
            QueryMode::Fueltech => &STRATEGIES[1],
            QueryMode::DemandSupply => &STRATEGIES[2],
            QueryMode::Curtailment => &STRATEGIES[3],
            QueryMode::Generator => &STRATEGIES[4],
        }
    }

    /// Grouping key of a record, or `None` when it lacks the dimension this mode groups by.
    #[must_use]
    pub fn group_key(&self, record: &CanonicalRecord) -> Option<GroupKey> {
        (self.group_key)(record)
    }

    /// Final metric values of one bucket.
    #[must_use]
    pub fn values(
        &self,
        key: &GroupKey,
        bucket: &Bucket,
        baseload: Option<&BaseloadLookup>,
    ) -> PointValues {
        (self.values)(key, bucket, baseload)
    }

    /// Label granularity for `interval`; shared by every mode.
    #[must_use]
    pub const fn label_style(&self, interval: Interval) -> LabelStyle {
        LabelStyle::for_interval(interval)
    }

    /// Primary and secondary plans, in fetch order.
    pub fn plans(&self) -> impl Iterator<Item = &FetchPlan> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }
}
