use async_trait::async_trait;

pub use crate::types::ConnectorKey;
use crate::types::{Capability, FacilityFilter, GridError, ProviderRequest, RawRow};

/// Focused role trait for connectors that serve market metrics grouped by region
/// (price, demand, curtailment).
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch market rows for `req`.
    ///
    /// An empty range is reported as `GridError::NotFound` or as an empty vector;
    /// both are treated as "no data".
    async fn market(&self, req: &ProviderRequest) -> Result<Vec<RawRow>, GridError>;
}

/// Focused role trait for connectors that serve network energy metrics with a
/// secondary fueltech grouping.
#[async_trait]
pub trait NetworkDataProvider: Send + Sync {
    /// Fetch network rows for `req`, honouring `req.fueltech_filter` when set.
    async fn network_data(&self, req: &ProviderRequest) -> Result<Vec<RawRow>, GridError>;
}

/// Focused role trait for connectors that serve unit-level facility metrics.
#[async_trait]
pub trait FacilityDataProvider: Send + Sync {
    /// Fetch unit rows for the facilities in `req.facility_codes`.
    async fn facility_data(&self, req: &ProviderRequest) -> Result<Vec<RawRow>, GridError>;
}

/// Focused role trait for connectors that list facilities and their units.
#[async_trait]
pub trait FacilityCatalogProvider: Send + Sync {
    /// Fetch unit-level catalog rows matching `filter`.
    async fn facilities(&self, filter: &FacilityFilter) -> Result<Vec<RawRow>, GridError>;
}

/// Main connector trait implemented by provider adapters.
///
/// Capabilities are advertised by returning trait objects from the `as_*`
/// methods; the orchestrator routes each fetch to the first connector that
/// advertises the role. Transport, authentication and retries stay inside the
/// connector.
pub trait GridConnector: Send + Sync {
    /// A stable identifier (e.g. "gridseries-openelectricity").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// If implemented, returns a trait object for market metrics.
    fn as_market_provider(&self) -> Option<&dyn MarketDataProvider> {
        None
    }
    /// If implemented, returns a trait object for network energy metrics.
    fn as_network_provider(&self) -> Option<&dyn NetworkDataProvider> {
        None
    }
    /// If implemented, returns a trait object for facility metrics.
    fn as_facility_provider(&self) -> Option<&dyn FacilityDataProvider> {
        None
    }
    /// If implemented, returns a trait object for the facility catalog.
    fn as_catalog_provider(&self) -> Option<&dyn FacilityCatalogProvider> {
        None
    }

    /// Whether this connector advertises `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::MarketData => self.as_market_provider().is_some(),
            Capability::NetworkData => self.as_network_provider().is_some(),
            Capability::FacilityData => self.as_facility_provider().is_some(),
            Capability::FacilityCatalog => self.as_catalog_provider().is_some(),
            _ => false,
        }
    }
}
