use chrono::{DateTime, Utc};
use gridseries_core::{GridError, Interval, QueryMode, split_list};

/// A series request as received from a caller.
///
/// `interval` and `months` fall back to the orchestrator's configured defaults
/// when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    /// Query mode.
    pub mode: QueryMode,
    /// Sampling interval.
    pub interval: Option<Interval>,
    /// Lookback in months.
    pub months: Option<u32>,
    /// Facilities to fetch (generator mode).
    pub facility_codes: Vec<String>,
    /// Pinned "now"; the wall clock when `None`.
    pub as_of: Option<DateTime<Utc>>,
}

impl SeriesRequest {
    /// Request for `mode` with configured defaults.
    #[must_use]
    pub const fn new(mode: QueryMode) -> Self {
        Self {
            mode,
            interval: None,
            months: None,
            facility_codes: Vec::new(),
            as_of: None,
        }
    }

    /// Set the sampling interval.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Set the lookback in months.
    #[must_use]
    pub const fn months(mut self, months: u32) -> Self {
        self.months = Some(months);
        self
    }

    /// Set the facility codes.
    #[must_use]
    pub fn facility_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facility_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Pin "now" for the range resolution.
    #[must_use]
    pub const fn as_of(mut self, now: DateTime<Utc>) -> Self {
        self.as_of = Some(now);
        self
    }

    /// Parse `type`, `interval`, `months` and `facility_codes` from string query pairs.
    ///
    /// Blank values count as absent; unknown keys are ignored.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unknown `type` or `interval`, or a `months`
    /// value that is not a non-negative integer.
    pub fn from_query<'a, I>(pairs: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut req = Self::new(QueryMode::Market);
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "type" => req.mode = value.parse()?,
                "interval" => req.interval = Some(value.parse()?),
                "months" => {
                    let months = value.parse::<u32>().map_err(|_| {
                        GridError::invalid_arg(format!(
                            "months must be a non-negative integer, got '{value}'"
                        ))
                    })?;
                    req.months = Some(months);
                }
                "facility_codes" => req.facility_codes = split_list(value),
                _ => {}
            }
        }
        Ok(req)
    }

    /// Reject requests that cannot be served before anything is fetched.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a generator request without facility codes.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.mode == QueryMode::Generator && self.facility_codes.is_empty() {
            return Err(GridError::invalid_arg(
                "facility_codes is required for generator queries",
            ));
        }
        Ok(())
    }
}
