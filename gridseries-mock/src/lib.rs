//! Deterministic fixture connector for gridseries tests and examples.
//!
//! Serves every provider role from static fixtures generated over the
//! requested date range. Special inputs trigger failure paths:
//! - network `FAIL` (or facility code `FAIL`): provider failure with status 502
//! - network `EMPTY`: "no data in range"
//! - network `SLOW`: normal data after a short delay
use async_trait::async_trait;
use gridseries_core::connector::{
    FacilityCatalogProvider, FacilityDataProvider, GridConnector, MarketDataProvider,
    NetworkDataProvider,
};
use gridseries_core::{FacilityFilter, GridError, Grouping, ProviderRequest, RawRow};

mod fixtures;

pub use fixtures::REGIONS;

const NAME: &str = "gridseries-mock";

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// A connector serving the NEM fixtures.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail(trigger: &str, capability: &'static str) -> Result<(), GridError> {
        match trigger {
            "FAIL" => Err(GridError::provider(
                NAME,
                Some(502),
                format!("forced failure: {capability}"),
            )),
            "EMPTY" => Err(GridError::not_found(format!("{capability} rows in range"))),
            "SLOW" => {
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn non_empty(rows: Vec<RawRow>, what: &str) -> Result<Vec<RawRow>, GridError> {
        if rows.is_empty() {
            Err(GridError::not_found(what.to_string()))
        } else {
            Ok(rows)
        }
    }
}

impl GridConnector for MockConnector {
    fn name(&self) -> &'static str {
        NAME
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_market_provider(&self) -> Option<&dyn MarketDataProvider> {
        Some(self as &dyn MarketDataProvider)
    }
    fn as_network_provider(&self) -> Option<&dyn NetworkDataProvider> {
        Some(self as &dyn NetworkDataProvider)
    }
    fn as_facility_provider(&self) -> Option<&dyn FacilityDataProvider> {
        Some(self as &dyn FacilityDataProvider)
    }
    fn as_catalog_provider(&self) -> Option<&dyn FacilityCatalogProvider> {
        Some(self as &dyn FacilityCatalogProvider)
    }
}

#[async_trait]
impl MarketDataProvider for MockConnector {
    async fn market(&self, req: &ProviderRequest) -> Result<Vec<RawRow>, GridError> {
        Self::maybe_fail(&req.network, "market").await?;
        Self::non_empty(fixtures::market::rows(req), "market rows in range")
    }
}

#[async_trait]
impl NetworkDataProvider for MockConnector {
    async fn network_data(&self, req: &ProviderRequest) -> Result<Vec<RawRow>, GridError> {
        Self::maybe_fail(&req.network, "network").await?;
        let rows = match req.secondary_grouping {
            Some(Grouping::FueltechGroup) => fixtures::network::supply_rows(req),
            _ => fixtures::network::fueltech_rows(req),
        };
        Self::non_empty(rows, "network rows in range")
    }
}

#[async_trait]
impl FacilityDataProvider for MockConnector {
    async fn facility_data(&self, req: &ProviderRequest) -> Result<Vec<RawRow>, GridError> {
        Self::maybe_fail(&req.network, "facility").await?;
        for code in &req.facility_codes {
            Self::maybe_fail(code, "facility").await?;
        }
        Self::non_empty(
            fixtures::facility::rows(req),
            &format!("facility rows for {}", req.facility_codes.join(",")),
        )
    }
}

#[async_trait]
impl FacilityCatalogProvider for MockConnector {
    async fn facilities(&self, filter: &FacilityFilter) -> Result<Vec<RawRow>, GridError> {
        for network in &filter.networks {
            Self::maybe_fail(network, "catalog").await?;
        }
        Ok(fixtures::catalog::rows(filter))
    }
}
