use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::types::{
    CanonicalRecord, DropReason, Field, GridConfig, MetricValues, QueryMode, RawRow, RowKind,
    UNKNOWN_REGION,
};

/// Maps raw provider rows to canonical records, applying each row kind's drop policy.
#[derive(Debug, Clone)]
pub struct RowNormalizer {
    tz: Tz,
    tracked_fueltechs: Vec<String>,
}

impl RowNormalizer {
    /// Normalizer interpreting naive timestamps in `tz` and keeping only
    /// `tracked_fueltechs` for fueltech rows.
    pub fn new<I, S>(tz: Tz, tracked_fueltechs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tz,
            tracked_fueltechs: tracked_fueltechs.into_iter().map(Into::into).collect(),
        }
    }

    /// Normalizer for the configured market zone and tracked fueltechs.
    #[must_use]
    pub fn from_config(cfg: &GridConfig) -> Self {
        Self::new(cfg.market_timezone, cfg.tracked_fueltechs.iter().cloned())
    }

    /// Normalize a row from `mode`'s primary fetch.
    ///
    /// # Errors
    /// Returns the [`DropReason`] when the row must be excluded.
    pub fn normalize(&self, mode: QueryMode, row: &RawRow) -> Result<CanonicalRecord, DropReason> {
        self.normalize_as(RowKind::primary(mode), row)
    }

    /// Normalize a row of an explicit kind.
    ///
    /// # Errors
    /// Returns the [`DropReason`] when the row must be excluded.
    pub fn normalize_as(&self, kind: RowKind, row: &RawRow) -> Result<CanonicalRecord, DropReason> {
        let timestamp = row
            .timestamp(self.tz)
            .map(truncate_to_millis)
            .ok_or(DropReason::MissingTimestamp)?;
        let region = row
            .text(Field::Region.aliases())
            .map(|r| r.to_uppercase());

        let mut record = CanonicalRecord {
            kind,
            region: region.clone().unwrap_or_else(|| UNKNOWN_REGION.to_string()),
            facility_code: None,
            unit_code: None,
            fueltech: None,
            timestamp,
            metrics: read_metrics(kind, row),
        };

        match kind {
            RowKind::Market => {
                require(record.metrics.price)?;
            }
            RowKind::Baseload => {
                if region.is_none() {
                    return Err(DropReason::MissingRegion);
                }
                require(record.metrics.price)?;
            }
            RowKind::Demand | RowKind::Curtailment => {}
            RowKind::Supply => {
                require(record.metrics.energy)?;
                record.fueltech = Some(
                    row.text(Field::FueltechGroup.aliases())
                        .unwrap_or_else(|| "other".to_string()),
                );
            }
            RowKind::Fueltech => {
                let fueltech = row
                    .text(Field::Fueltech.aliases())
                    .ok_or(DropReason::UntrackedFueltech)?;
                let energy = require(record.metrics.energy)?;
                let market_value = require(record.metrics.market_value)?;
                check_generation_pair(&record.region, &fueltech, energy, market_value)?;
                if !self.tracked_fueltechs.iter().any(|t| *t == fueltech) {
                    return Err(DropReason::UntrackedFueltech);
                }
                record.fueltech = Some(fueltech);
            }
            RowKind::Generator => {
                let unit_code = row.text(Field::UnitCode.aliases());
                let facility = row
                    .text(Field::FacilityCode.aliases())
                    .or_else(|| unit_code.as_deref().and_then(facility_from_unit))
                    .filter(|code| code != UNKNOWN_REGION)
                    .ok_or(DropReason::MissingFacility)?;
                if record.metrics.is_empty() {
                    return Err(DropReason::NoMetrics);
                }
                record.facility_code = Some(facility);
                record.unit_code = unit_code;
            }
        }

        Ok(record)
    }
}

fn read_metrics(kind: RowKind, row: &RawRow) -> MetricValues {
    let mut values = MetricValues::default();
    for metric in kind.metrics().metrics() {
        values.set(metric, row.metric(metric));
    }
    values
}

const fn require(value: Option<Decimal>) -> Result<Decimal, DropReason> {
    match value {
        Some(v) => Ok(v),
        None => Err(DropReason::MissingMetric),
    }
}

/// Energy and market value must either both be positive or the row carries no generation.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn check_generation_pair(
    region: &str,
    fueltech: &str,
    energy: Decimal,
    market_value: Decimal,
) -> Result<(), DropReason> {
    let energy_pos = energy > Decimal::ZERO;
    let value_pos = market_value > Decimal::ZERO;
    match (energy_pos, value_pos) {
        (false, false) => Err(DropReason::NoGeneration),
        (true, true) => Ok(()),
        _ => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                region,
                fueltech,
                energy = %energy,
                market_value = %market_value,
                "inconsistent energy/market value pair; row dropped"
            );
            Err(DropReason::InconsistentPair)
        }
    }
}

/// Facility code of a unit code: the unit code without its trailing digits.
///
/// `"BANGOWF1"` → `"BANGOWF"`. Returns `None` when nothing remains.
#[must_use]
pub fn facility_from_unit(unit: &str) -> Option<String> {
    let stem = unit.trim_end_matches(|c: char| c.is_ascii_digit());
    (!stem.is_empty()).then(|| stem.to_string())
}

fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(ts)
}
