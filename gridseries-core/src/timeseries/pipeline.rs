use std::collections::BTreeMap;

use super::aggregate::Aggregator;
use super::derive::{BaseloadLookup, derive_series};
use super::normalize::RowNormalizer;
use super::present::Presenter;
use super::strategy::ModeStrategy;
use crate::types::{
    Diagnostics, GridConfig, GroupSeries, Interval, QueryMode, RawRow, RowKind,
};

/// Raw rows returned by a request's fetches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedRows {
    /// Rows of the mode's primary fetch.
    pub primary: Vec<RawRow>,
    /// Rows of the mode's secondary fetch (baseload prices or supply), if any.
    pub secondary: Vec<RawRow>,
}

/// Presented series plus row accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Ordered series per output group.
    pub regions: BTreeMap<String, GroupSeries>,
    /// Sorted supply-side fueltech groups (demand/supply mode only).
    pub fueltech_groups: Option<Vec<String>>,
    /// Row accounting across both fetches.
    pub diagnostics: Diagnostics,
}

/// Normalize → aggregate → derive → present over already-fetched rows.
///
/// Pure and synchronous: the same rows in any order give the same output.
#[derive(Debug, Clone)]
pub struct SeriesPipeline {
    strategy: &'static ModeStrategy,
    interval: Interval,
    normalizer: RowNormalizer,
    presenter: Presenter,
}

impl SeriesPipeline {
    /// Pipeline for `mode` at `interval` using the configured zone, locale and tracked fueltechs.
    #[must_use]
    pub fn new(mode: QueryMode, interval: Interval, cfg: &GridConfig) -> Self {
        Self {
            strategy: ModeStrategy::for_mode(mode),
            interval,
            normalizer: RowNormalizer::from_config(cfg),
            presenter: Presenter::from_config(cfg),
        }
    }

    /// The mode strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> &'static ModeStrategy {
        self.strategy
    }

    /// Run every stage over `rows`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridseries_core::pipeline::run",
            skip(self, rows),
            fields(
                mode = %self.strategy.mode,
                interval = %self.interval,
                primary = rows.primary.len(),
                secondary = rows.secondary.len()
            ),
        )
    )]
    #[must_use]
    pub fn run(&self, rows: &FetchedRows) -> PipelineOutput {
        let mut diagnostics = Diagnostics::default();
        let mut aggregator = Aggregator::new(self.strategy.mode);
        let mut baseload = self
            .strategy
            .secondary
            .filter(|plan| plan.kind == RowKind::Baseload)
            .map(|_| BaseloadLookup::new());

        for row in &rows.primary {
            match self.normalizer.normalize_as(self.strategy.primary.kind, row) {
                Ok(record) => {
                    diagnostics.accept();
                    aggregator.accumulate(&record);
                }
                Err(reason) => diagnostics.drop_row(reason),
            }
        }

        if let Some(plan) = &self.strategy.secondary {
            for row in &rows.secondary {
                match self.normalizer.normalize_as(plan.kind, row) {
                    Ok(record) => {
                        diagnostics.accept();
                        match baseload.as_mut() {
                            Some(lookup) => lookup.record(&record),
                            None => aggregator.accumulate(&record),
                        }
                    }
                    Err(reason) => diagnostics.drop_row(reason),
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            received = diagnostics.rows_received,
            accepted = diagnostics.rows_accepted,
            buckets = aggregator.bucket_count(),
            "rows aggregated"
        );

        let derived = derive_series(aggregator.finish(), baseload.as_ref());
        let presented = self.presenter.present(derived, self.interval);

        PipelineOutput {
            regions: presented.regions,
            fueltech_groups: (self.strategy.mode == QueryMode::DemandSupply)
                .then_some(presented.fueltech_groups),
            diagnostics,
        }
    }
}
