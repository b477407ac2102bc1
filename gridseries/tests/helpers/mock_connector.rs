#![allow(dead_code)]
#![allow(clippy::type_complexity)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]

use std::sync::Arc;

use async_trait::async_trait;
use gridseries_core::connector::{
    FacilityCatalogProvider, FacilityDataProvider, GridConnector, MarketDataProvider,
    NetworkDataProvider,
};
use gridseries_core::{FacilityFilter, GridError, ProviderRequest, RawRow};
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};

type RowsFn = Arc<dyn Fn(&ProviderRequest) -> Result<Vec<RawRow>, GridError> + Send + Sync>;
type CatalogFn = Arc<dyn Fn(&FacilityFilter) -> Result<Vec<RawRow>, GridError> + Send + Sync>;

/// Scriptable in-memory connector used by integration tests.
///
/// A role is advertised only when a closure for it was provided. Every call is
/// recorded as `"<role>:start"` / `"<role>:end"` together with the request.
pub struct MockConnector {
    pub name: &'static str,
    pub delay_ms: u64,
    pub market_fn: Option<RowsFn>,
    pub network_fn: Option<RowsFn>,
    pub facility_fn: Option<RowsFn>,
    pub catalog_fn: Option<CatalogFn>,
    log: Mutex<Vec<String>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }

    /// Recorded call events, in order.
    pub async fn log(&self) -> Vec<String> {
        self.log.lock().await.clone()
    }

    /// Recorded provider requests, in call order.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    async fn serve(
        &self,
        role: &str,
        f: Option<&RowsFn>,
        req: &ProviderRequest,
    ) -> Result<Vec<RawRow>, GridError> {
        self.log.lock().await.push(format!("{role}:start"));
        self.requests.lock().await.push(req.clone());
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        let out = f.map_or_else(|| Err(GridError::unsupported(role.to_string())), |f| (f)(req));
        self.log.lock().await.push(format!("{role}:end"));
        out
    }
}

impl GridConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_market_provider(&self) -> Option<&dyn MarketDataProvider> {
        if self.market_fn.is_some() {
            Some(self as &dyn MarketDataProvider)
        } else {
            None
        }
    }

    fn as_network_provider(&self) -> Option<&dyn NetworkDataProvider> {
        if self.network_fn.is_some() {
            Some(self as &dyn NetworkDataProvider)
        } else {
            None
        }
    }

    fn as_facility_provider(&self) -> Option<&dyn FacilityDataProvider> {
        if self.facility_fn.is_some() {
            Some(self as &dyn FacilityDataProvider)
        } else {
            None
        }
    }

    fn as_catalog_provider(&self) -> Option<&dyn FacilityCatalogProvider> {
        if self.catalog_fn.is_some() {
            Some(self as &dyn FacilityCatalogProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl MarketDataProvider for MockConnector {
    async fn market(&self, req: &ProviderRequest) -> Result<Vec<RawRow>, GridError> {
        self.serve("market", self.market_fn.as_ref(), req).await
    }
}

#[async_trait]
impl NetworkDataProvider for MockConnector {
    async fn network_data(&self, req: &ProviderRequest) -> Result<Vec<RawRow>, GridError> {
        self.serve("network", self.network_fn.as_ref(), req).await
    }
}

#[async_trait]
impl FacilityDataProvider for MockConnector {
    async fn facility_data(&self, req: &ProviderRequest) -> Result<Vec<RawRow>, GridError> {
        self.serve("facility", self.facility_fn.as_ref(), req).await
    }
}

#[async_trait]
impl FacilityCatalogProvider for MockConnector {
    async fn facilities(&self, filter: &FacilityFilter) -> Result<Vec<RawRow>, GridError> {
        self.log.lock().await.push("catalog:start".to_string());
        let out = self
            .catalog_fn
            .as_ref()
            .map_or_else(|| Err(GridError::unsupported("catalog")), |f| (f)(filter));
        self.log.lock().await.push("catalog:end".to_string());
        out
    }
}

pub struct MockConnectorBuilder {
    name: &'static str,
    delay_ms: u64,
    market_fn: Option<RowsFn>,
    network_fn: Option<RowsFn>,
    facility_fn: Option<RowsFn>,
    catalog_fn: Option<CatalogFn>,
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            name: "mock",
            delay_ms: 0,
            market_fn: None,
            network_fn: None,
            facility_fn: None,
            catalog_fn: None,
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.delay_ms = d.as_millis() as u64;
        self
    }

    pub fn with_market_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ProviderRequest) -> Result<Vec<RawRow>, GridError> + Send + Sync + 'static,
    {
        self.market_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_market_rows(mut self, rows: Vec<RawRow>) -> Self {
        self.market_fn = Some(Arc::new(move |_| Ok(rows.clone())));
        self
    }

    pub fn with_network_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ProviderRequest) -> Result<Vec<RawRow>, GridError> + Send + Sync + 'static,
    {
        self.network_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_network_rows(mut self, rows: Vec<RawRow>) -> Self {
        self.network_fn = Some(Arc::new(move |_| Ok(rows.clone())));
        self
    }

    pub fn with_facility_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ProviderRequest) -> Result<Vec<RawRow>, GridError> + Send + Sync + 'static,
    {
        self.facility_fn = Some(Arc::new(f));
        self
    }

    pub fn with_catalog_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&FacilityFilter) -> Result<Vec<RawRow>, GridError> + Send + Sync + 'static,
    {
        self.catalog_fn = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            delay_ms: self.delay_ms,
            market_fn: self.market_fn,
            network_fn: self.network_fn,
            facility_fn: self.facility_fn,
            catalog_fn: self.catalog_fn,
            log: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }
}
