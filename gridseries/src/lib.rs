//! gridseries turns raw energy-market rows from pluggable providers into clean,
//! grouped time series with derived financial metrics.
//!
//! Overview
//! - Routes each upstream fetch to the first connector implementing the
//!   `gridseries_core` role it needs (market, network, facility, catalog).
//! - Resolves the requested lookback against the interval's maximum span,
//!   clamping to that span and reporting the months actually served.
//! - Runs the synchronous normalize → aggregate → derive → present pipeline over
//!   the fetched rows and wraps the result in a `SeriesReport` envelope.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `Concurrent`: a mode's primary and companion fetches run together; lowest
//!     latency, two requests in flight.
//!   - `Sequential`: one after another; gentler on rate-limited providers.
//! - Partial failure: "no data" is never an error. The fueltech baseload fetch may
//!   fail outright and only `percentageOfBaseload` degrades to null; the
//!   demand/supply supply fetch tolerates "no data" only.
//! - Filter fallback: a filtered fueltech fetch that fails is retried once
//!   unfiltered and the tracked fueltechs are applied in code instead.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use gridseries::{GridSeries, Interval, QueryMode, SeriesRequest};
//!
//! let grid = GridSeries::builder()
//!     .with_connector(Arc::new(MyConnector::new(api_key)))
//!     .build()?;
//!
//! let report = grid
//!     .series(&SeriesRequest::new(QueryMode::Fueltech).interval(Interval::Month).months(24))
//!     .await?;
//! for (region, series) in &report.regions {
//!     println!("{region}: {} points", series.len());
//! }
//! ```
//!
//! Query-string callers can use [`SeriesRequest::from_query`]:
//! ```rust,ignore
//! let req = gridseries::SeriesRequest::from_query([("type", "generator"), ("facility_codes", "BANGOWF")])?;
//! let report = grid.series(&req).await?;
//! ```
//!
//! See the `gridseries-demos` crate for runnable demonstrations against the mock connector.
#![warn(missing_docs)]

pub(crate) mod core;
mod request;
mod router;

pub use core::{GridSeries, GridSeriesBuilder};
pub use request::SeriesRequest;

pub use gridseries_types::{FetchStrategy, GridConfig, LabelLocale};

// Re-export core types for convenience
pub use gridseries_core::{
    Capability, DateRange, Decimal, Diagnostics, DropReason, Facility, FacilityFilter,
    GridConnector, GridError, GroupSeries, Interval, Metric, PointValues, QueryMode, RawRow,
    Renewable, SeriesPoint, SeriesReport,
};
