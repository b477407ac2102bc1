//! Row, request, record and report types, plus re-exports of `gridseries-types`.

mod record;
mod report;
mod request;
mod row;

pub use gridseries_types::{
    Capability, ConnectorKey, FetchStrategy, GridConfig, GridError, Interval, LabelLocale, Metric,
    MetricSet, QueryMode,
};

pub use record::{CanonicalRecord, DropReason, MetricValues, RowKind, UNKNOWN_REGION};
pub use report::{Diagnostics, GroupSeries, PointValues, SeriesPoint, SeriesReport};
pub use request::{FacilityFilter, Grouping, ProviderRequest, split_list};
pub use row::{Field, RawRow};

pub use rust_decimal::Decimal;
