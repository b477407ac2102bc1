use chrono::{DateTime, Days, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use gridseries_types::Interval;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Calendar range echoed to callers and sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, `YYYY-MM-DD`.
    pub start: NaiveDate,
    /// Last day, `YYYY-MM-DD`.
    pub end: NaiveDate,
}

/// Window chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end ("now").
    pub end: DateTime<Utc>,
    /// Lookback the caller asked for, in months.
    pub requested_months: u32,
    /// Lookback actually covered, in whole months.
    pub effective_months: u32,
    /// True when the request exceeded the interval's limit and was shortened.
    pub clamped: bool,
}

impl ResolvedRange {
    /// Length of the window in days, rounded up.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        ceil_days(self.end - self.start)
    }

    /// Calendar dates (UTC) of the window.
    #[must_use]
    pub fn date_range(&self) -> DateRange {
        DateRange {
            start: self.start.date_naive(),
            end: self.end.date_naive(),
        }
    }
}

fn ceil_days(d: Duration) -> i64 {
    let ms = d.num_milliseconds();
    ms.div_euclid(MILLIS_PER_DAY) + i64::from(ms.rem_euclid(MILLIS_PER_DAY) != 0)
}

/// Resolve a lookback of `requested_months` ending at `now` for `interval`.
///
/// `5m` with a zero lookback means "the interval's maximum span" (eight days).
/// A window longer than [`Interval::max_days`] is not an error: it is
/// shortened to exactly the maximum and `effective_months` reports the
/// whole calendar months that still fit, which is never more than
/// `floor(days / 30)` and always less than the request.
#[must_use]
pub fn resolve_range(interval: Interval, requested_months: u32, now: DateTime<Utc>) -> ResolvedRange {
    let end = now;
    let max_days = interval.max_days();
    let naive_start = if interval == Interval::FiveMinutes && requested_months == 0 {
        end.checked_sub_days(Days::new(u64::from(max_days)))
    } else {
        end.checked_sub_months(Months::new(requested_months))
    };

    if let Some(start) = naive_start
        && ceil_days(end - start) <= i64::from(max_days)
    {
        return ResolvedRange {
            start,
            end,
            requested_months,
            effective_months: requested_months,
            clamped: false,
        };
    }

    let start = end - Duration::days(i64::from(max_days));
    // Calendar months, not days / 30: the latter can exceed the months requested.
    let effective_months = whole_months_within(start, end, max_days / 30);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        interval = %interval,
        requested_months,
        effective_months,
        max_days,
        "requested range exceeds interval limit; clamped"
    );

    ResolvedRange {
        start,
        end,
        requested_months,
        effective_months,
        clamped: true,
    }
}

/// Largest `m <= cap` such that `end - m months` does not precede `start`.
fn whole_months_within(start: DateTime<Utc>, end: DateTime<Utc>, cap: u32) -> u32 {
    (0..=cap)
        .rev()
        .find(|m| {
            end.checked_sub_months(Months::new(*m))
                .is_some_and(|s| s >= start)
        })
        .unwrap_or(0)
}
