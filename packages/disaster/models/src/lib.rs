#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disaster event record types and property-damage aggregation.
//!
//! A [`Disaster`] is one row of the hazard loss dataset. Damage amounts
//! arrive as free text, so they are coerced explicitly into a
//! [`DamageAmount`] that is either a number or an [`DamageAmount::Invalid`]
//! marker. How invalid amounts affect sums and means is controlled by
//! [`InvalidDamagePolicy`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// `chrono` format used for the start-month grouping key (`"YYYY-MM"`).
pub const START_MONTH_FORMAT: &str = "%Y-%m";

/// Start-month key assigned to disasters whose hazard-begin date could
/// not be parsed.
pub const INVALID_START_MONTH: &str = "invalid";

/// Date-only formats accepted for `HAZARD_BEGIN_DATE`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Date-time formats accepted for `HAZARD_BEGIN_DATE`. The time part is
/// discarded.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Offset-qualified date-time formats. The date is taken in the offset
/// the value was written in.
const ZONED_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// The only spelling of an unbounded amount that counts as numeric.
const INFINITY_SPELLING: &str = "Infinity";

/// A property-damage amount coerced from its textual form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageAmount {
    /// A parsed numeric amount in dollars.
    Amount(f64),
    /// The source text was not a number.
    Invalid,
}

impl DamageAmount {
    /// Coerces raw text into a damage amount.
    ///
    /// Surrounding whitespace is ignored. Blank text counts as zero
    /// damage. Anything that does not parse as a number, including a
    /// literal `NaN`, is [`Self::Invalid`]. Of the named infinities only
    /// `Infinity`, optionally signed, is accepted.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Self::Amount(0.0);
        }

        let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
        if unsigned.starts_with(|c: char| c.is_ascii_alphabetic())
            && unsigned != INFINITY_SPELLING
        {
            return Self::Invalid;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if !value.is_nan() => Self::Amount(value),
            _ => Self::Invalid,
        }
    }

    /// Returns the amount as a number, with [`Self::Invalid`] mapped to
    /// NaN.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Amount(value) => value,
            Self::Invalid => f64::NAN,
        }
    }

    /// Whether this amount was coerced successfully.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Amount(_))
    }
}

/// How invalid damage amounts participate in sums and means.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvalidDamagePolicy {
    /// Invalid amounts count as NaN, so any invalid record turns the
    /// aggregate into NaN and the problem stays visible.
    #[default]
    Propagate,
    /// Invalid amounts are left out of both the sum and the mean's
    /// denominator.
    Skip,
}

/// One disaster event as read from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Disaster {
    /// County name exactly as it appears in the dataset's `NAME` column.
    pub county_name: String,
    /// Coerced `PROPERTY_DAMAGE` value.
    pub property_damage: DamageAmount,
    /// Parsed `HAZARD_BEGIN_DATE`, if it was recognizable.
    pub hazard_begin_date: Option<NaiveDate>,
    /// Start month (`"YYYY-MM"`), attached once by
    /// [`Disaster::attach_start_month`].
    pub start: Option<String>,
}

impl Disaster {
    /// Creates a disaster without a start month attached.
    #[must_use]
    pub fn new(
        county_name: impl Into<String>,
        property_damage: DamageAmount,
        hazard_begin_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            county_name: county_name.into(),
            property_damage,
            hazard_begin_date,
            start: None,
        }
    }

    /// Formats the hazard-begin date as a start-month key.
    ///
    /// Returns [`INVALID_START_MONTH`] when the date is missing.
    #[must_use]
    pub fn start_month(&self) -> String {
        self.hazard_begin_date.map_or_else(
            || INVALID_START_MONTH.to_string(),
            |date| date.format(START_MONTH_FORMAT).to_string(),
        )
    }

    /// Computes and stores the start month if it is not attached yet,
    /// returning the attached key.
    pub fn attach_start_month(&mut self) -> &str {
        if self.start.is_none() {
            self.start = Some(self.start_month());
        }

        self.start.as_deref().unwrap_or(INVALID_START_MONTH)
    }
}

/// Parses a `HAZARD_BEGIN_DATE` value in any of the supported formats.
#[must_use]
pub fn parse_hazard_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_TIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(trimmed, format)
                    .ok()
                    .map(|dt| dt.date())
            })
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .or_else(|| {
                    ZONED_DATE_TIME_FORMATS
                        .iter()
                        .find_map(|format| DateTime::parse_from_str(trimmed, format).ok())
                })
                .map(|dt| dt.date_naive())
        })
}

/// Sum and mean of the property damage over a set of disasters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageSummary {
    /// Sum of the considered amounts.
    pub total: f64,
    /// Mean of the considered amounts, or 0 when nothing was considered.
    pub mean: f64,
    /// Number of amounts that went into the mean.
    pub count: usize,
}

impl DamageSummary {
    /// An empty summary: zero total, zero mean.
    pub const ZERO: Self = Self {
        total: 0.0,
        mean: 0.0,
        count: 0,
    };

    /// Aggregates the damage of `disasters` under `policy`.
    #[must_use]
    pub fn from_disasters<'a>(
        disasters: impl IntoIterator<Item = &'a Disaster>,
        policy: InvalidDamagePolicy,
    ) -> Self {
        let mut total = 0.0;
        let mut count = 0_usize;

        for disaster in disasters {
            let amount = disaster.property_damage;
            if policy == InvalidDamagePolicy::Skip && !amount.is_valid() {
                continue;
            }
            total += amount.value();
            count += 1;
        }

        if count == 0 {
            return Self::ZERO;
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = total / count as f64;

        Self { total, mean, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn disaster(damage: &str) -> Disaster {
        Disaster::new("Fulton", DamageAmount::parse(damage), None)
    }

    #[test]
    fn parses_numeric_damage() {
        assert_eq!(
            DamageAmount::parse("300000"),
            DamageAmount::Amount(300_000.0)
        );
        assert_eq!(DamageAmount::parse(" 12.5 "), DamageAmount::Amount(12.5));
        assert_eq!(DamageAmount::parse("1e3"), DamageAmount::Amount(1000.0));
    }

    #[test]
    fn blank_damage_is_zero() {
        assert_eq!(DamageAmount::parse(""), DamageAmount::Amount(0.0));
        assert_eq!(DamageAmount::parse("   "), DamageAmount::Amount(0.0));
    }

    #[test]
    fn non_numeric_damage_is_invalid() {
        assert_eq!(DamageAmount::parse("1,000"), DamageAmount::Invalid);
        assert_eq!(DamageAmount::parse("$500"), DamageAmount::Invalid);
        assert_eq!(DamageAmount::parse("NaN"), DamageAmount::Invalid);
        assert!(DamageAmount::Invalid.value().is_nan());
    }

    #[test]
    fn only_exact_infinity_spelling_is_numeric() {
        for raw in ["inf", "INFINITY", "infinity", "+inf", "-INF", "nan"] {
            assert_eq!(DamageAmount::parse(raw), DamageAmount::Invalid, "{raw:?}");
        }

        assert_eq!(
            DamageAmount::parse("Infinity"),
            DamageAmount::Amount(f64::INFINITY)
        );
        assert_eq!(
            DamageAmount::parse("+Infinity"),
            DamageAmount::Amount(f64::INFINITY)
        );
        assert_eq!(
            DamageAmount::parse(" -Infinity "),
            DamageAmount::Amount(f64::NEG_INFINITY)
        );
        assert_eq!(DamageAmount::parse("-12"), DamageAmount::Amount(-12.0));
    }

    #[test]
    fn parses_supported_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2011, 5, 10);
        assert_eq!(parse_hazard_date("2011-05-10"), expected);
        assert_eq!(parse_hazard_date("5/10/2011"), expected);
        assert_eq!(parse_hazard_date("2011-05-10 13:45:00"), expected);
        assert_eq!(parse_hazard_date("2011-05-10T13:45:00"), expected);
        assert_eq!(parse_hazard_date("2011-05-10T13:45:00Z"), expected);
        assert_eq!(parse_hazard_date("2011-05-10T13:45:00.250Z"), expected);
        assert_eq!(parse_hazard_date("2011-05-10T13:45:00-04:00"), expected);
        assert_eq!(parse_hazard_date("2011-05-10T13:45:00-0400"), expected);
        assert_eq!(parse_hazard_date("not a date"), None);
        assert_eq!(parse_hazard_date(""), None);
    }

    #[test]
    fn attaches_start_month_once() {
        let mut d = Disaster::new(
            "Fulton",
            DamageAmount::Amount(1.0),
            NaiveDate::from_ymd_opt(2011, 7, 1),
        );
        assert_eq!(d.attach_start_month(), "2011-07");

        d.hazard_begin_date = NaiveDate::from_ymd_opt(2012, 1, 1);
        assert_eq!(d.attach_start_month(), "2011-07");
    }

    #[test]
    fn zoned_timestamp_groups_into_its_month() {
        let mut d = Disaster::new(
            "Fulton",
            DamageAmount::Amount(1.0),
            parse_hazard_date("2011-05-10T13:45:00Z"),
        );
        assert_eq!(d.attach_start_month(), "2011-05");
    }

    #[test]
    fn missing_date_gets_invalid_start_month() {
        let mut d = disaster("1");
        assert_eq!(d.attach_start_month(), INVALID_START_MONTH);
    }

    #[test]
    fn summary_of_empty_set_is_zero() {
        let summary =
            DamageSummary::from_disasters(std::iter::empty(), InvalidDamagePolicy::Propagate);
        assert_eq!(summary, DamageSummary::ZERO);
    }

    #[test]
    fn summary_computes_total_and_mean() {
        let disasters = vec![disaster("300000"), disaster("150000")];
        let summary = DamageSummary::from_disasters(&disasters, InvalidDamagePolicy::Propagate);
        assert!((summary.total - 450_000.0).abs() < f64::EPSILON);
        assert!((summary.mean - 225_000.0).abs() < f64::EPSILON);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn propagate_policy_turns_aggregates_into_nan() {
        let disasters = vec![disaster("100"), disaster("oops")];
        let summary = DamageSummary::from_disasters(&disasters, InvalidDamagePolicy::Propagate);
        assert!(summary.total.is_nan());
        assert!(summary.mean.is_nan());
    }

    #[test]
    fn skip_policy_ignores_invalid_amounts() {
        let disasters = vec![disaster("100"), disaster("oops"), disaster("300")];
        let summary = DamageSummary::from_disasters(&disasters, InvalidDamagePolicy::Skip);
        assert!((summary.total - 400.0).abs() < f64::EPSILON);
        assert!((summary.mean - 200.0).abs() < f64::EPSILON);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn policy_round_trips_through_strings() {
        assert_eq!(
            InvalidDamagePolicy::from_str("skip").unwrap(),
            InvalidDamagePolicy::Skip
        );
        assert_eq!(InvalidDamagePolicy::Propagate.to_string(), "propagate");
    }
}
