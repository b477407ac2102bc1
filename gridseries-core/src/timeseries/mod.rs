//! Series pipeline stages.
//!
//! Modules include:
//! - `range`: resolve a lookback window against an interval's provider limit
//! - `normalize`: map heterogeneous raw rows to canonical records
//! - `aggregate`: bucket records by group and instant
//! - `derive`: compute weighted prices and baseload percentages
//! - `present`: sort, label and emit per-group series
//! - `strategy`: the per-mode table tying the stages together
//! - `pipeline`: run the stages over fetched rows

/// Bucketing of canonical records.
pub mod aggregate;
/// Derived metrics computed after aggregation.
pub mod derive;
/// Raw row to canonical record mapping.
pub mod normalize;
/// Synchronous normalize → aggregate → derive → present run.
pub mod pipeline;
/// Sorting and labelling of output series.
pub mod present;
/// Date range resolution and clamping.
pub mod range;
/// Per-mode fetch plans, grouping keys and value shaping.
pub mod strategy;
