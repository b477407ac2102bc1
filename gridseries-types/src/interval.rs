use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GridError;

/// Sampling granularity of a requested series.
///
/// Every interval carries the provider's maximum lookback span, which bounds
/// the date range a request may cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Interval {
    /// Five-minute dispatch intervals.
    #[serde(rename = "5m")]
    FiveMinutes,
    /// Hourly.
    #[serde(rename = "1h")]
    Hour,
    /// Daily.
    #[serde(rename = "1d")]
    Day,
    /// Weekly.
    #[serde(rename = "7d")]
    Week,
    /// Calendar month.
    #[default]
    #[serde(rename = "1M")]
    Month,
    /// Calendar quarter.
    #[serde(rename = "3M")]
    Quarter,
    /// Meteorological season.
    #[serde(rename = "season")]
    Season,
    /// Calendar year.
    #[serde(rename = "1y")]
    Year,
    /// Financial year.
    #[serde(rename = "fy")]
    FinancialYear,
}

impl Interval {
    /// All intervals, finest first.
    pub const ALL: [Self; 9] = [
        Self::FiveMinutes,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Season,
        Self::Year,
        Self::FinancialYear,
    ];

    /// Wire identifier used by the provider and in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5m",
            Self::Hour => "1h",
            Self::Day => "1d",
            Self::Week => "7d",
            Self::Month => "1M",
            Self::Quarter => "3M",
            Self::Season => "season",
            Self::Year => "1y",
            Self::FinancialYear => "fy",
        }
    }

    /// Maximum lookback span in days the provider accepts for this interval.
    #[must_use]
    pub const fn max_days(self) -> u32 {
        match self {
            Self::FiveMinutes => 8,
            Self::Hour => 32,
            Self::Day | Self::Week => 366,
            Self::Month => 732,
            Self::Quarter | Self::Season => 1830,
            Self::Year | Self::FinancialYear => 3700,
        }
    }

    /// True for intervals finer than one day.
    #[must_use]
    pub const fn is_sub_daily(self) -> bool {
        matches!(self, Self::FiveMinutes | Self::Hour)
    }

    /// True for intervals of one month or coarser.
    #[must_use]
    pub const fn is_calendar_period(self) -> bool {
        matches!(
            self,
            Self::Month | Self::Quarter | Self::Season | Self::Year | Self::FinancialYear
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| {
                GridError::invalid_arg(format!(
                    "invalid interval '{s}', expected one of 5m, 1h, 1d, 7d, 1M, 3M, season, 1y, fy"
                ))
            })
    }
}
