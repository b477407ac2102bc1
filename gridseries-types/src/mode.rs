use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::GridError;

/// Query mode: which upstream data a request needs and how it is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Regional market price.
    #[default]
    Market,
    /// Energy and market value per region and tracked fueltech.
    Fueltech,
    /// Regional demand alongside supply split by fueltech group.
    DemandSupply,
    /// Curtailed solar and wind energy per region.
    Curtailment,
    /// Unit-level generation rolled up to facilities.
    Generator,
}

impl QueryMode {
    /// All query modes.
    pub const ALL: [Self; 5] = [
        Self::Market,
        Self::Fueltech,
        Self::DemandSupply,
        Self::Curtailment,
        Self::Generator,
    ];

    /// Stable snake-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Fueltech => "fueltech",
            Self::DemandSupply => "demand_supply",
            Self::Curtailment => "curtailment",
            Self::Generator => "generator",
        }
    }

    /// Canonical metrics populated for this mode.
    #[must_use]
    pub const fn metrics(self) -> MetricSet {
        match self {
            Self::Market => MetricSet::PRICE,
            Self::Fueltech => MetricSet::ENERGY.union(MetricSet::MARKET_VALUE),
            Self::DemandSupply => MetricSet::DEMAND
                .union(MetricSet::DEMAND_ENERGY)
                .union(MetricSet::ENERGY),
            Self::Curtailment => MetricSet::CURTAILMENT_SOLAR
                .union(MetricSet::CURTAILMENT_WIND)
                .union(MetricSet::CURTAILMENT_TOTAL),
            Self::Generator => MetricSet::ENERGY
                .union(MetricSet::MARKET_VALUE)
                .union(MetricSet::POWER)
                .union(MetricSet::EMISSIONS),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryMode {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| GridError::invalid_arg(format!("invalid type '{s}'")))
    }
}

/// Canonical metric carried by a normalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Energy in MWh.
    Energy,
    /// Market value in dollars.
    MarketValue,
    /// Power in MW.
    Power,
    /// Emissions in tCO2e.
    Emissions,
    /// Spot price in $/MWh.
    Price,
    /// Demand in MW.
    Demand,
    /// Demand energy in MWh.
    DemandEnergy,
    /// Curtailed utility solar energy.
    CurtailmentSolar,
    /// Curtailed wind energy.
    CurtailmentWind,
    /// Total curtailed energy.
    CurtailmentTotal,
}

impl Metric {
    /// All metrics in canonical order.
    pub const ALL: [Self; 10] = [
        Self::Energy,
        Self::MarketValue,
        Self::Power,
        Self::Emissions,
        Self::Price,
        Self::Demand,
        Self::DemandEnergy,
        Self::CurtailmentSolar,
        Self::CurtailmentWind,
        Self::CurtailmentTotal,
    ];

    /// Metric name the provider expects in a fetch.
    #[must_use]
    pub const fn provider_name(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::MarketValue => "market_value",
            Self::Power => "power",
            Self::Emissions => "emissions",
            Self::Price => "price",
            Self::Demand => "demand",
            Self::DemandEnergy => "demand_energy",
            Self::CurtailmentSolar => "curtailment_solar_utility_energy",
            Self::CurtailmentWind => "curtailment_wind_energy",
            Self::CurtailmentTotal => "curtailment_energy",
        }
    }

    /// The single-bit set for this metric.
    #[must_use]
    pub const fn flag(self) -> MetricSet {
        match self {
            Self::Energy => MetricSet::ENERGY,
            Self::MarketValue => MetricSet::MARKET_VALUE,
            Self::Power => MetricSet::POWER,
            Self::Emissions => MetricSet::EMISSIONS,
            Self::Price => MetricSet::PRICE,
            Self::Demand => MetricSet::DEMAND,
            Self::DemandEnergy => MetricSet::DEMAND_ENERGY,
            Self::CurtailmentSolar => MetricSet::CURTAILMENT_SOLAR,
            Self::CurtailmentWind => MetricSet::CURTAILMENT_WIND,
            Self::CurtailmentTotal => MetricSet::CURTAILMENT_TOTAL,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.provider_name())
    }
}

bitflags! {
    /// Set of canonical metrics.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MetricSet: u16 {
        /// Energy in MWh.
        const ENERGY = 1 << 0;
        /// Market value in dollars.
        const MARKET_VALUE = 1 << 1;
        /// Power in MW.
        const POWER = 1 << 2;
        /// Emissions in tCO2e.
        const EMISSIONS = 1 << 3;
        /// Spot price.
        const PRICE = 1 << 4;
        /// Demand in MW.
        const DEMAND = 1 << 5;
        /// Demand energy in MWh.
        const DEMAND_ENERGY = 1 << 6;
        /// Curtailed utility solar energy.
        const CURTAILMENT_SOLAR = 1 << 7;
        /// Curtailed wind energy.
        const CURTAILMENT_WIND = 1 << 8;
        /// Total curtailed energy.
        const CURTAILMENT_TOTAL = 1 << 9;
    }
}

impl MetricSet {
    /// Iterate the metrics in this set in canonical order.
    pub fn metrics(self) -> impl Iterator<Item = Metric> {
        Metric::ALL.into_iter().filter(move |m| self.contains(m.flag()))
    }
}

impl From<Metric> for MetricSet {
    fn from(m: Metric) -> Self {
        m.flag()
    }
}

impl FromIterator<Metric> for MetricSet {
    fn from_iter<T: IntoIterator<Item = Metric>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), |acc, m| acc | m.flag())
    }
}
