use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use gridseries_types::{GridError, Interval, Metric};

/// Dimension a provider groups rows by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// One row per network region.
    NetworkRegion,
    /// One row per fine-grained fueltech.
    Fueltech,
    /// One row per fueltech group.
    FueltechGroup,
}

impl Grouping {
    /// Provider-side grouping name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkRegion => "network_region",
            Self::Fueltech => "fueltech",
            Self::FueltechGroup => "fueltech_group",
        }
    }
}

/// Parameters of one upstream fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// Network code, e.g. `NEM`.
    pub network: String,
    /// Metrics to fetch.
    pub metrics: Vec<Metric>,
    /// Sampling interval.
    pub interval: Interval,
    /// First calendar day of the range.
    pub date_start: NaiveDate,
    /// Last calendar day of the range.
    pub date_end: NaiveDate,
    /// Primary grouping, when the endpoint takes one.
    pub primary_grouping: Option<Grouping>,
    /// Secondary grouping.
    pub secondary_grouping: Option<Grouping>,
    /// Restrict rows to these fueltechs.
    pub fueltech_filter: Option<Vec<String>>,
    /// Facility codes (facility endpoint only).
    pub facility_codes: Vec<String>,
}

impl ProviderRequest {
    /// A request over `[date_start, date_end]` with no metrics or grouping yet.
    pub fn new(
        network: impl Into<String>,
        interval: Interval,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Self {
        Self {
            network: network.into(),
            metrics: Vec::new(),
            interval,
            date_start,
            date_end,
            primary_grouping: None,
            secondary_grouping: None,
            fueltech_filter: None,
            facility_codes: Vec::new(),
        }
    }

    /// Set the metrics to fetch.
    #[must_use]
    pub fn metrics(mut self, metrics: impl IntoIterator<Item = Metric>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    /// Set the primary grouping.
    #[must_use]
    pub const fn primary_grouping(mut self, g: Grouping) -> Self {
        self.primary_grouping = Some(g);
        self
    }

    /// Set the secondary grouping.
    #[must_use]
    pub const fn secondary_grouping(mut self, g: Grouping) -> Self {
        self.secondary_grouping = Some(g);
        self
    }

    /// Restrict to the given fueltechs.
    #[must_use]
    pub fn fueltech_filter(mut self, fueltechs: Vec<String>) -> Self {
        self.fueltech_filter = Some(fueltechs);
        self
    }

    /// Set the facility codes.
    #[must_use]
    pub fn facility_codes(mut self, codes: Vec<String>) -> Self {
        self.facility_codes = codes;
        self
    }

    /// Provider metric names, in request order.
    #[must_use]
    pub fn metric_names(&self) -> Vec<&'static str> {
        self.metrics.iter().map(|m| m.provider_name()).collect()
    }

    /// Zone-aware midnight opening the range.
    ///
    /// # Errors
    /// Returns `InvalidArg` when midnight does not exist in `tz` on that day.
    pub fn start_at(&self, tz: Tz) -> Result<DateTime<Tz>, GridError> {
        local_midnight(self.date_start, tz)
    }

    /// Zone-aware midnight closing the range.
    ///
    /// # Errors
    /// Returns `InvalidArg` when midnight does not exist in `tz` on that day.
    pub fn end_at(&self, tz: Tz) -> Result<DateTime<Tz>, GridError> {
        local_midnight(self.date_end, tz)
    }
}

fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Tz>, GridError> {
    date.and_hms_opt(0, 0, 0)
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .ok_or_else(|| GridError::invalid_arg(format!("no local midnight on {date} in {tz}")))
}

/// Filters for a facility catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityFilter {
    /// Unit status ids, e.g. `operating`.
    pub status: Vec<String>,
    /// Fueltech ids.
    pub fueltechs: Vec<String>,
    /// Network ids.
    pub networks: Vec<String>,
    /// Single network region.
    pub network_region: Option<String>,
}

impl FacilityFilter {
    /// Parse `status_id`, `fueltech_id`, `network_id` (comma-separated) and
    /// `network_region` from query pairs. Unknown keys are ignored.
    pub fn from_query<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            match key {
                "status_id" => filter.status = split_list(value),
                "fueltech_id" => filter.fueltechs = split_list(value),
                "network_id" => filter.networks = split_list(value),
                "network_region" if !value.trim().is_empty() => {
                    filter.network_region = Some(value.trim().to_string());
                }
                _ => {}
            }
        }
        filter
    }
}

/// Split a comma-separated query value, trimming and dropping empty entries.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
