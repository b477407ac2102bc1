//! Configuration types shared by the orchestrator and the pipeline.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::Interval;

/// How the orchestrator issues the paired upstream fetches a mode needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Issue paired fetches together and wait for both.
    #[default]
    Concurrent,
    /// Issue the primary fetch, then the secondary one.
    Sequential,
}

/// Locale used to render period labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LabelLocale {
    /// Australian English: "Mar 2024", "15 Mar 2024", "15 Mar 2024, 02:30 pm".
    #[default]
    EnAu,
    /// ISO-like numeric labels: "2024-03", "2024-03-15", "2024-03-15 14:30".
    Iso,
}

/// Global configuration for the `GridSeries` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Network code passed to every upstream fetch.
    pub network: String,
    /// Zone for naive row timestamps, calendar fields and labels.
    pub market_timezone: Tz,
    /// Locale for period labels.
    pub label_locale: LabelLocale,
    /// Fueltechs retained in fueltech mode; everything else is dropped.
    pub tracked_fueltechs: Vec<String>,
    /// How paired fetches are issued.
    pub fetch_strategy: FetchStrategy,
    /// Retry a failed filtered fueltech fetch once without the filter.
    pub fueltech_filter_fallback: bool,
    /// Interval applied when a request names none.
    pub default_interval: Interval,
    /// Lookback in months applied when a request names none.
    pub default_months: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            network: "NEM".to_string(),
            market_timezone: chrono_tz::Australia::Brisbane,
            label_locale: LabelLocale::EnAu,
            tracked_fueltechs: vec!["solar_utility".to_string(), "wind".to_string()],
            fetch_strategy: FetchStrategy::Concurrent,
            fueltech_filter_fallback: true,
            default_interval: Interval::Month,
            default_months: 12,
        }
    }
}
