use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use gridseries_types::{GridError, Metric};

/// Canonical field of an upstream row together with the names it may appear under.
///
/// Providers report the same quantity under different column names depending on
/// the endpoint and grouping; the alias list is the single place that mapping lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Observation instant.
    Timestamp,
    /// Network region code.
    Region,
    /// Facility code.
    FacilityCode,
    /// Generating unit code.
    UnitCode,
    /// Fine-grained fueltech (e.g. `solar_utility`).
    Fueltech,
    /// Coarse fueltech group, falling back to the fine-grained fueltech.
    FueltechGroup,
    /// A metric column.
    Metric(Metric),
}

impl Field {
    /// Upstream column names for this field, in order of preference.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Timestamp => &["interval", "timestamp", "date"],
            Self::Region => &["region", "network_region"],
            Self::FacilityCode => &["facility_code", "code", "facility"],
            Self::UnitCode => &["unit_code", "unit"],
            Self::Fueltech => &["fueltech"],
            Self::FueltechGroup => &["fueltech_group", "fueltech"],
            Self::Metric(m) => metric_aliases(m),
        }
    }
}

const fn metric_aliases(m: Metric) -> &'static [&'static str] {
    match m {
        Metric::Energy => &["energy"],
        Metric::MarketValue => &["market_value", "marketValue"],
        Metric::Power => &["power"],
        Metric::Emissions => &["emissions"],
        Metric::Price => &["price"],
        Metric::Demand => &["demand"],
        Metric::DemandEnergy => &["demand_energy", "demandEnergy"],
        Metric::CurtailmentSolar => &[
            "curtailment_solar_utility_energy",
            "curtailment_solar_utility",
        ],
        Metric::CurtailmentWind => &["curtailment_wind_energy", "curtailment_wind"],
        Metric::CurtailmentTotal => &["curtailment_energy", "curtailment"],
    }
}

/// One untyped row as returned by a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(Map<String, Value>);

impl RawRow {
    /// Empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a column.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw access to a column by exact name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the row, returning the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// First non-null value among `aliases`.
    #[must_use]
    pub fn first(&self, aliases: &[&str]) -> Option<&Value> {
        aliases
            .iter()
            .filter_map(|k| self.0.get(*k))
            .find(|v| !v.is_null())
    }

    /// First non-blank textual value among `aliases`, trimmed.
    ///
    /// Numeric codes are accepted and rendered as text.
    #[must_use]
    pub fn text(&self, aliases: &[&str]) -> Option<String> {
        aliases.iter().filter_map(|k| self.0.get(*k)).find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Numeric value of the first non-null alias.
    ///
    /// JSON numbers and numeric strings are accepted; anything else (including
    /// non-finite or unparseable text) is treated as absent.
    #[must_use]
    pub fn number(&self, aliases: &[&str]) -> Option<Decimal> {
        match self.first(aliases)? {
            Value::Number(n) => decimal_from_number(n),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        }
    }

    /// Metric value resolved through the metric's alias list.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<Decimal> {
        self.number(Field::Metric(metric).aliases())
    }

    /// Observation instant of the row.
    ///
    /// Strings may be RFC 3339 instants or naive ISO date-times/dates, the latter
    /// interpreted in `tz`. Integers are epoch milliseconds.
    #[must_use]
    pub fn timestamp(&self, tz: Tz) -> Option<DateTime<Utc>> {
        match self.first(Field::Timestamp.aliases())? {
            Value::String(s) => parse_timestamp(s.trim(), tz),
            Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawRow {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RawRow {
    type Error = GridError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(GridError::Data(format!(
                "expected an object row, got {}",
                json_kind(&other)
            ))),
        }
    }
}

const fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn decimal_from_number(n: &Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    // Shortest round-trip text keeps values such as 0.1 exact.
    parse_decimal(&n.to_string()).or_else(|| n.as_f64().and_then(Decimal::from_f64))
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn parse_timestamp(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
