//! Shared gridseries vocabulary: the workspace error type, engine configuration,
//! sampling intervals, query modes and the metric catalogue.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod error;
mod interval;
mod mode;

pub use capability::Capability;
pub use config::{FetchStrategy, GridConfig, LabelLocale};
pub use connector::ConnectorKey;
pub use error::GridError;
pub use interval::Interval;
pub use mode::{Metric, MetricSet, QueryMode};
