//! Product shelf-life calculation.
//!
//! Takes a production date typed as `DD.MM.YYYY`, a shelf life in days,
//! weeks, months or years, and reports the expiration date together with a
//! freshness [`Status`] relative to today.
//!
//! All calendar arithmetic is done here on the proleptic Gregorian calendar;
//! no platform calendar engine is consulted.

mod calculator;
mod consts;
mod duration;
mod form;
mod mask;
mod prelude;
mod status;
mod types;

pub use calculator::{Calculator, CalculatorConfig, ExpirationResult, compute};
pub use consts::*;
pub use duration::{
    Amount, CalcError, Duration, OverflowPolicy, Unit, add_duration, add_duration_with,
};
pub use form::ExpirationForm;
pub use mask::{filter_duration_input, format_date_input};
pub use status::{Classification, Status, classify, classify_text, classify_within};
pub use types::{Day, Month, Year, civil_from_days, days_from_civil, days_in_month, is_leap_year};

use crate::consts::NORMALIZE_YEAR_LIMIT;
use crate::prelude::*;
use std::str::FromStr;

/// Raw `{day, month, year}` triple as typed by the user.
///
/// Nothing is range-checked here: `31.02.2024` and `00.13.2024` are both
/// representable. Use [`RawDate::normalize`] to obtain a real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{day:02}.{month:02}.{year:04}")]
pub struct RawDate {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid date format: expected DD.MM.YYYY, got {_0:?}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid number in date: {_0:?}")]
    InvalidNumber(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { day: u8, month: u8, year: u16 },
    #[display(fmt = "Date falls outside years 1-{}", MAX_YEAR)]
    OutOfRange,
}

impl std::error::Error for ParseError {}

/// Parses `DD.MM.YYYY` into its raw components.
///
/// # Errors
/// Returns `ParseError` unless the text has exactly three dot-separated
/// base-10 integer segments.
pub fn parse_date(text: &str) -> Result<RawDate, ParseError> {
    text.parse()
}

impl FromStr for RawDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        };

        Ok(Self {
            day: parse_segment(day)?,
            month: parse_segment(month)?,
            year: parse_segment(year)?,
        })
    }
}

fn parse_segment(s: &str) -> Result<i32, ParseError> {
    s.parse::<i32>()
        .map_err(|_| ParseError::InvalidNumber(s.to_owned()))
}

impl RawDate {
    /// Rolls impossible field values over into a real date.
    ///
    /// # Errors
    /// Returns `ParseError::OutOfRange` if the result leaves years 1-9999.
    pub fn normalize(self) -> Result<CalendarDate, ParseError> {
        CalendarDate::normalize(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
        )
    }
}

/// A real day in years 1-9999, rendered as `DD.MM.YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{day}.{month}.{year}")]
pub struct CalendarDate {
    // field order matters for the derived chronological Ord
    year: Year,
    month: Month,
    day: Day,
}

impl CalendarDate {
    /// Builds a date only if it exists exactly as given.
    ///
    /// # Errors
    /// Returns the matching `ParseError` variant for the first bad field.
    pub fn strict(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
            day: Day::new(day, year, month)?,
        })
    }

    /// Lenient construction: month overflow carries into the year, then the
    /// day is counted forward (or backward) from the first of that month.
    ///
    /// `normalize(2024, 2, 30)` is 01.03.2024, `normalize(2024, 13, 1)` is
    /// 01.01.2025 and `normalize(2024, 3, 0)` is 29.02.2024.
    ///
    /// # Errors
    /// Returns `ParseError::OutOfRange` if the result leaves years 1-9999.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn normalize(year: i64, month: i64, day: i64) -> Result<Self, ParseError> {
        let months = year
            .checked_mul(MONTHS_PER_YEAR)
            .and_then(|m| m.checked_add(month))
            .and_then(|m| m.checked_sub(1))
            .ok_or(ParseError::OutOfRange)?;
        let year = months.div_euclid(MONTHS_PER_YEAR);
        if year.unsigned_abs() > NORMALIZE_YEAR_LIMIT {
            return Err(ParseError::OutOfRange);
        }
        // rem_euclid keeps this in 1..=12
        let month = (months.rem_euclid(MONTHS_PER_YEAR) + 1) as u8;
        let days = days_from_civil(year, month, MIN_DAY)
            .checked_add(day)
            .and_then(|d| d.checked_sub(1))
            .ok_or(ParseError::OutOfRange)?;
        Self::from_days(days)
    }

    /// Date for a day count since 1970-01-01.
    ///
    /// # Errors
    /// Returns `ParseError::OutOfRange` if the count lies outside years 1-9999.
    pub fn from_days(days: i64) -> Result<Self, ParseError> {
        if !(MIN_EPOCH_DAY..=MAX_EPOCH_DAY).contains(&days) {
            return Err(ParseError::OutOfRange);
        }
        let (year, month, day) = civil_from_days(days);
        let year = u16::try_from(year).map_err(|_| ParseError::OutOfRange)?;
        Self::strict(year, month, day)
    }

    /// Day count since 1970-01-01.
    pub const fn to_days(self) -> i64 {
        days_from_civil(self.year.get() as i64, self.month.get(), self.day.get())
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Signed number of calendar days from `self` to `other`.
    pub const fn days_until(self, other: Self) -> i64 {
        other.to_days() - self.to_days()
    }

    /// Today's date on the local wall clock.
    ///
    /// # Errors
    /// Returns `ParseError::OutOfRange` only if the system clock is set
    /// outside years 1-9999.
    pub fn today() -> Result<Self, ParseError> {
        chrono::Local::now().date_naive().try_into()
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Lenient parse: `31.04.2024` becomes 01.05.2024.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<RawDate>()?.normalize()
    }
}

impl From<CalendarDate> for chrono::NaiveDate {
    fn from(date: CalendarDate) -> Self {
        // Every CalendarDate lies inside chrono's supported range
        Self::from_ymd_opt(
            i32::from(date.year()),
            u32::from(date.month()),
            u32::from(date.day()),
        )
        .unwrap_or_default()
    }
}

impl TryFrom<chrono::NaiveDate> for CalendarDate {
    type Error = ParseError;

    #[allow(clippy::cast_possible_truncation)]
    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;

        let year = u16::try_from(date.year()).map_err(|_| ParseError::OutOfRange)?;
        Self::strict(year, date.month() as u8, date.day() as u8)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        let raw: RawDate = s.parse().map_err(serde::de::Error::custom)?;
        let year = u16::try_from(raw.year).map_err(serde::de::Error::custom)?;
        let month = u8::try_from(raw.month).map_err(serde::de::Error::custom)?;
        let day = u8::try_from(raw.day).map_err(serde::de::Error::custom)?;
        Self::strict(year, month, day).map_err(serde::de::Error::custom)
    }
}
