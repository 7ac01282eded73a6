use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, DAYS_PER_WEEK, MAX_DURATION, MAX_YEAR, MONTHS_PER_YEAR, ParseError,
    days_in_month, prelude::*,
};

/// Unit a shelf life is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    #[display(fmt = "days")]
    Days,
    #[display(fmt = "weeks")]
    Weeks,
    #[display(fmt = "months")]
    Months,
    #[display(fmt = "years")]
    Years,
}

impl Unit {
    pub const ALL: [Self; 4] = [Self::Days, Self::Weeks, Self::Months, Self::Years];

    /// Label shown in the unit selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Days => "Дни",
            Self::Weeks => "Недели",
            Self::Months => "Месяцы",
            Self::Years => "Года",
        }
    }
}

/// How month and year additions treat a day-of-month the target month lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Snap to the last day of the target month:
    /// 31.01.2023 + 1 month = 28.02.2023, 29.02.2020 + 1 year = 28.02.2021.
    #[default]
    Clamp,
    /// Carry the excess days into the following month:
    /// 31.01.2023 + 1 month = 03.03.2023, 29.02.2020 + 1 year = 01.03.2021.
    Roll,
}

/// Error type for shelf-life arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// Amount is not a whole number in `0..=MAX_DURATION`.
    #[error("Invalid shelf life {0:?}: expected a whole number 0-{max}", max = MAX_DURATION)]
    InvalidAmount(String),

    /// Result would fall after 31.12.9999.
    #[error("Expiration date falls after year {}", MAX_YEAR)]
    OutOfRange,

    /// Error parsing the production date.
    #[error(transparent)]
    Date(#[from] ParseError),
}

/// Shelf-life amount, bounded to four digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Into)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
#[display(fmt = "{_0}")]
pub struct Amount(u16);

impl Amount {
    /// # Errors
    /// Returns `CalcError::InvalidAmount` if the value exceeds `MAX_DURATION`.
    pub fn new(value: u16) -> Result<Self, CalcError> {
        if value > MAX_DURATION {
            return Err(CalcError::InvalidAmount(value.to_string()));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Amount {
    type Error = CalcError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Amount {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .parse::<u16>()
            .map_err(|_| CalcError::InvalidAmount(s.to_owned()))?;
        Self::new(value).map_err(|_| CalcError::InvalidAmount(s.to_owned()))
    }
}

/// A shelf life: an amount of some [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{amount} {unit}")]
pub struct Duration {
    pub amount: Amount,
    pub unit: Unit,
}

impl Duration {
    /// # Errors
    /// Returns `CalcError::InvalidAmount` if `amount` exceeds `MAX_DURATION`.
    pub fn new(amount: u16, unit: Unit) -> Result<Self, CalcError> {
        Ok(Self {
            amount: Amount::new(amount)?,
            unit,
        })
    }

    /// Parses the amount as typed into the duration field.
    ///
    /// # Errors
    /// Returns `CalcError::InvalidAmount` for blank, signed, non-numeric or
    /// oversized input.
    pub fn parse(amount: &str, unit: Unit) -> Result<Self, CalcError> {
        Ok(Self {
            amount: amount.parse()?,
            unit,
        })
    }
}

/// Adds `duration` to `date` under the default [`OverflowPolicy::Clamp`].
///
/// # Errors
/// Returns `CalcError::OutOfRange` if the result falls after year 9999.
pub fn add_duration(date: CalendarDate, duration: Duration) -> Result<CalendarDate, CalcError> {
    add_duration_with(date, duration, OverflowPolicy::default())
}

/// Adds `duration` to `date`.
///
/// Days and weeks count calendar days. Months and years move the month
/// field and keep the day-of-month, resolving days the target month lacks
/// according to `policy`.
///
/// # Errors
/// Returns `CalcError::OutOfRange` if the result falls after year 9999.
pub fn add_duration_with(
    date: CalendarDate,
    duration: Duration,
    policy: OverflowPolicy,
) -> Result<CalendarDate, CalcError> {
    let amount = i64::from(duration.amount.get());
    let result = match duration.unit {
        Unit::Days => add_days(date, amount),
        Unit::Weeks => add_days(date, amount * DAYS_PER_WEEK),
        Unit::Months => add_months(date, amount, policy),
        Unit::Years => add_months(date, amount * MONTHS_PER_YEAR, policy),
    };
    tracing::trace!(%date, %duration, ?policy, ?result, "added shelf life");
    result
}

fn add_days(date: CalendarDate, days: i64) -> Result<CalendarDate, CalcError> {
    CalendarDate::from_days(date.to_days() + days).map_err(|_| CalcError::OutOfRange)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn add_months(
    date: CalendarDate,
    months: i64,
    policy: OverflowPolicy,
) -> Result<CalendarDate, CalcError> {
    let total = i64::from(date.year()) * MONTHS_PER_YEAR + i64::from(date.month()) - 1 + months;
    let year = total.div_euclid(MONTHS_PER_YEAR);
    // rem_euclid keeps this in 1..=12
    let month = (total.rem_euclid(MONTHS_PER_YEAR) + 1) as u8;
    let year = u16::try_from(year)
        .ok()
        .filter(|y| *y <= MAX_YEAR)
        .ok_or(CalcError::OutOfRange)?;

    match policy {
        OverflowPolicy::Clamp => {
            let day = date.day().min(days_in_month(i64::from(year), month));
            CalendarDate::strict(year, month, day).map_err(|_| CalcError::OutOfRange)
        },
        OverflowPolicy::Roll => {
            CalendarDate::normalize(i64::from(year), i64::from(month), i64::from(date.day()))
                .map_err(|_| CalcError::OutOfRange)
        },
    }
}
