//! gridseries-core
//!
//! Core types, traits, and the synchronous series pipeline shared across the
//! gridseries ecosystem.
//!
//! - `connector`: the `GridConnector` trait and provider role traits.
//! - `types`: raw upstream rows, provider requests, canonical records and reports.
//! - `timeseries`: range resolution, row normalization, bucketing, metric
//!   derivation and presentation, wired together by `timeseries::pipeline`.
//! - `catalog`: roll-up of unit-level catalog rows into facilities.
//!
//! Data flows strictly one way through `timeseries`:
//! `range` → (provider fetch) → `normalize` → `aggregate` → `derive` → `present`.
#![warn(missing_docs)]

/// Facility catalog roll-up.
pub mod catalog;
/// Connector capability traits and the primary `GridConnector` interface.
pub mod connector;
/// The series pipeline stages.
pub mod timeseries;
pub mod types;

pub use catalog::{Facility, Renewable, fueltech_group_for, roll_up_facilities};
pub use connector::GridConnector;
pub use timeseries::aggregate::{AggregatedSeries, Aggregator, Bucket, GroupKey};
pub use timeseries::derive::{BaseloadLookup, percentage_of_baseload, weighted_average_price};
pub use timeseries::normalize::RowNormalizer;
pub use timeseries::pipeline::{FetchedRows, PipelineOutput, SeriesPipeline};
pub use timeseries::present::{LabelStyle, Presenter};
pub use timeseries::range::{DateRange, ResolvedRange, resolve_range};
pub use timeseries::strategy::{FetchPlan, FetchRole, ModeStrategy, Nesting};
pub use types::*;
