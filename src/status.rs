use serde::{Deserialize, Serialize};

use crate::{CalendarDate, EXPIRING_WINDOW_DAYS, prelude::*};

/// Freshness of a product relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// More than the expiring window remains
    #[display(fmt = "Свежий")]
    Fresh,
    /// Expires today or within the expiring window
    #[display(fmt = "Скоро истечет")]
    Expiring,
    /// Expiration date has passed
    #[display(fmt = "Истек")]
    Expired,
}

impl Status {
    /// Status for a signed day count, `window` being the last day still
    /// reported as [`Status::Expiring`].
    pub fn from_days_remaining(days_remaining: i64, window: u32) -> Self {
        if days_remaining < 0 {
            Self::Expired
        } else if days_remaining <= i64::from(window) {
            Self::Expiring
        } else {
            Self::Fresh
        }
    }
}

/// Status plus the signed number of days left (negative once overdue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    pub status: Status,
    pub days_remaining: i64,
}

impl Classification {
    /// Returned when an expiration date cannot be read back.
    pub const SENTINEL: Self = Self {
        status: Status::Expired,
        days_remaining: -1,
    };
}

/// Classifies `expiration` against `today` with the default 7-day window.
pub fn classify(expiration: CalendarDate, today: CalendarDate) -> Classification {
    classify_within(expiration, today, EXPIRING_WINDOW_DAYS)
}

/// Classifies `expiration` against `today`.
///
/// Both dates are whole days, so the difference is already the number of
/// calendar days rounded up: an expiration later today counts as 0.
pub fn classify_within(expiration: CalendarDate, today: CalendarDate, window: u32) -> Classification {
    let days_remaining = today.days_until(expiration);
    Classification {
        status: Status::from_days_remaining(days_remaining, window),
        days_remaining,
    }
}

/// Classifies a rendered `DD.MM.YYYY` expiration date.
///
/// Unreadable text degrades to [`Classification::SENTINEL`] instead of an error.
pub fn classify_text(expiration: &str, today: CalendarDate) -> Classification {
    match expiration.parse::<CalendarDate>() {
        Ok(date) => classify(date, today),
        Err(err) => {
            tracing::warn!(%err, expiration, "unreadable expiration date, reporting as expired");
            Classification::SENTINEL
        },
    }
}
