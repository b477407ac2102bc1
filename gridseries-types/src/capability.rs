use core::fmt;
use serde::{Deserialize, Serialize};

/// Upstream roles a connector can fill, used for routing, errors and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Market metrics grouped by network region (price, demand, curtailment).
    MarketData,
    /// Network energy metrics with a secondary fueltech grouping.
    NetworkData,
    /// Per-unit facility metrics.
    FacilityData,
    /// Facility and unit listing.
    FacilityCatalog,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MarketData => "market-data",
            Self::NetworkData => "network-data",
            Self::FacilityData => "facility-data",
            Self::FacilityCatalog => "facility-catalog",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
