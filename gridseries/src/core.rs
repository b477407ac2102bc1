use std::sync::Arc;

use chrono_tz::Tz;
use gridseries_core::{Capability, GridConnector, GridError};
use gridseries_types::{FetchStrategy, GridConfig, Interval, LabelLocale};

/// Orchestrator that resolves ranges, routes fetches to registered providers and
/// runs the series pipeline over the returned rows.
pub struct GridSeries {
    pub(crate) connectors: Vec<Arc<dyn GridConnector>>,
    pub(crate) cfg: GridConfig,
}

/// Builder for constructing a `GridSeries` orchestrator with custom configuration.
pub struct GridSeriesBuilder {
    connectors: Vec<Arc<dyn GridConnector>>,
    cfg: GridConfig,
}

impl Default for GridSeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSeriesBuilder {
    /// Create a new builder with the default NEM configuration.
    ///
    /// Starts with no connectors; at least one must be registered via
    /// [`with_connector`](Self::with_connector).
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: GridConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Each fetch goes to the first registered connector advertising the role it
    /// needs, so registration order is the routing priority.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn GridConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: GridConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Network code passed to every upstream fetch.
    #[must_use]
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.cfg.network = network.into();
        self
    }

    /// Zone used for naive timestamps, calendar fields and labels.
    #[must_use]
    pub const fn market_timezone(mut self, tz: Tz) -> Self {
        self.cfg.market_timezone = tz;
        self
    }

    /// Locale of period labels.
    #[must_use]
    pub const fn label_locale(mut self, locale: LabelLocale) -> Self {
        self.cfg.label_locale = locale;
        self
    }

    /// Fueltechs retained in fueltech mode.
    #[must_use]
    pub fn tracked_fueltechs<I, S>(mut self, fueltechs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.tracked_fueltechs = fueltechs.into_iter().map(Into::into).collect();
        self
    }

    /// Issue paired fetches concurrently or one after another.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Retry a failed filtered fueltech fetch once without the filter.
    #[must_use]
    pub const fn fueltech_filter_fallback(mut self, yes: bool) -> Self {
        self.cfg.fueltech_filter_fallback = yes;
        self
    }

    /// Interval used when a request names none.
    #[must_use]
    pub const fn default_interval(mut self, interval: Interval) -> Self {
        self.cfg.default_interval = interval;
        self
    }

    /// Lookback in months used when a request names none.
    #[must_use]
    pub const fn default_months(mut self, months: u32) -> Self {
        self.cfg.default_months = months;
        self
    }

    /// Build the `GridSeries` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered, or if no
    /// fueltech is tracked.
    pub fn build(self) -> Result<GridSeries, GridError> {
        if self.connectors.is_empty() {
            return Err(GridError::invalid_arg(
                "no connectors registered; add at least one via with_connector(...)",
            ));
        }
        if self.cfg.tracked_fueltechs.is_empty() {
            return Err(GridError::invalid_arg(
                "tracked_fueltechs must name at least one fueltech",
            ));
        }

        Ok(GridSeries {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Attribute a connector failure to the connector that produced it.
///
/// No-data, provider and capability errors pass through unchanged; anything
/// else becomes a `Provider` error without a status.
pub(crate) fn tag_err(connector: &str, e: GridError) -> GridError {
    match e {
        e @ (GridError::NotFound { .. }
        | GridError::Provider { .. }
        | GridError::Unsupported { .. }
        | GridError::AllProvidersFailed(_)) => e,
        other => GridError::provider(connector, None, other.to_string()),
    }
}

impl GridSeries {
    /// Start building a new `GridSeries` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use gridseries::{GridSeries, FetchStrategy};
    ///
    /// let grid = GridSeries::builder()
    ///     .with_connector(Arc::new(MyOpenElectricityConnector::new(api_key)))
    ///     .fetch_strategy(FetchStrategy::Sequential)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> GridSeriesBuilder {
        GridSeriesBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.cfg
    }

    /// First registered connector advertising `capability`.
    pub(crate) fn connector_for(
        &self,
        capability: Capability,
    ) -> Result<&Arc<dyn GridConnector>, GridError> {
        self.connectors
            .iter()
            .find(|c| c.supports(capability))
            .ok_or_else(|| GridError::unsupported(capability.as_str()))
    }
}
