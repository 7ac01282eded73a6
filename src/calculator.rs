use serde::{Deserialize, Serialize};

use crate::{
    CalcError, CalendarDate, Classification, Duration, EXPIRING_WINDOW_DAYS, OverflowPolicy,
    Status, Unit, add_duration_with, classify_within,
};

/// Tunables for [`Calculator`]. The defaults reproduce the mobile app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// How month and year additions resolve missing days
    pub overflow: OverflowPolicy,
    /// Last day count (inclusive) reported as expiring
    pub expiring_window_days: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::Clamp,
            expiring_window_days: EXPIRING_WINDOW_DAYS,
        }
    }
}

/// Outcome of one complete calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpirationResult {
    pub expiration_date: CalendarDate,
    pub status: Status,
    pub days_remaining: i64,
}

impl ExpirationResult {
    fn new(expiration_date: CalendarDate, classification: Classification) -> Self {
        Self {
            expiration_date,
            status: classification.status,
            days_remaining: classification.days_remaining,
        }
    }

    /// Remaining or overdue days, phrased for the result card.
    pub fn remaining_text(&self) -> String {
        if self.days_remaining >= 0 {
            format!("Осталось: {} дн.", self.days_remaining)
        } else {
            format!("Просрочен на: {} дн.", self.days_remaining.unsigned_abs())
        }
    }
}

/// Stateless facade chaining parse, shelf-life addition and classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calculator {
    config: CalculatorConfig,
}

impl Calculator {
    pub const fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Computes against today's local date.
    ///
    /// Returns `None` while the inputs are incomplete or unusable.
    pub fn compute(&self, raw_date: &str, raw_duration: &str, unit: Unit) -> Option<ExpirationResult> {
        let today = match CalendarDate::today() {
            Ok(today) => today,
            Err(err) => {
                tracing::warn!(%err, "system clock outside supported range");
                return None;
            },
        };
        self.compute_on(raw_date, raw_duration, unit, today)
    }

    /// Computes against an explicit `today`.
    ///
    /// A blank date or a duration that is not a whole number means "no
    /// result yet"; malformed dates and dates pushed past year 9999 are
    /// suppressed the same way.
    pub fn compute_on(
        &self,
        raw_date: &str,
        raw_duration: &str,
        unit: Unit,
        today: CalendarDate,
    ) -> Option<ExpirationResult> {
        if raw_date.trim().is_empty() {
            tracing::debug!("no production date yet");
            return None;
        }

        match self.try_compute(raw_date, raw_duration, unit, today) {
            Ok(result) => {
                tracing::trace!(
                    raw_date,
                    raw_duration,
                    %unit,
                    expiration = %result.expiration_date,
                    status = ?result.status,
                    days_remaining = result.days_remaining,
                    "computed expiration"
                );
                Some(result)
            },
            Err(err) => {
                tracing::debug!(%err, raw_date, raw_duration, %unit, "suppressing result");
                None
            },
        }
    }

    fn try_compute(
        &self,
        raw_date: &str,
        raw_duration: &str,
        unit: Unit,
        today: CalendarDate,
    ) -> Result<ExpirationResult, CalcError> {
        let duration = Duration::parse(raw_duration, unit)?;
        let production: CalendarDate = raw_date.parse()?;
        let expiration = add_duration_with(production, duration, self.config.overflow)?;
        let classification = classify_within(expiration, today, self.config.expiring_window_days);
        Ok(ExpirationResult::new(expiration, classification))
    }
}

/// [`Calculator::compute`] with the default configuration.
pub fn compute(raw_date: &str, raw_duration: &str, unit: Unit) -> Option<ExpirationResult> {
    Calculator::default().compute(raw_date, raw_duration, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> CalendarDate {
        CalendarDate::strict(2024, 1, 10).unwrap()
    }

    fn compute_on(raw_date: &str, raw_duration: &str, unit: Unit) -> Option<ExpirationResult> {
        Calculator::default().compute_on(raw_date, raw_duration, unit, today())
    }

    #[test]
    fn test_incomplete_inputs_give_no_result() {
        assert_eq!(compute_on("", "10", Unit::Days), None);
        assert_eq!(compute_on("   ", "10", Unit::Days), None);
        assert_eq!(compute_on("01.01.2024", "", Unit::Days), None);
        assert_eq!(compute_on("01.01.2024", "abc", Unit::Days), None);
    }

    #[test]
    fn test_public_compute_gives_no_result_for_incomplete_inputs() {
        assert_eq!(compute("", "10", Unit::Days), None);
        assert_eq!(compute("01.01.2024", "", Unit::Days), None);
        assert_eq!(compute("01.01.2024", "abc", Unit::Days), None);
    }

    #[test]
    fn test_malformed_dates_give_no_result() {
        assert_eq!(compute_on("01.01", "10", Unit::Days), None);
        assert_eq!(compute_on("01.01.", "10", Unit::Days), None);
        assert_eq!(compute_on("01.01.0000", "10", Unit::Days), None);
        assert_eq!(compute_on("31.12.9999", "1", Unit::Days), None);
    }

    #[test]
    fn test_oversized_or_signed_duration_gives_no_result() {
        assert_eq!(compute_on("01.01.2024", "10000", Unit::Days), None);
        assert_eq!(compute_on("01.01.2024", "-3", Unit::Days), None);
    }

    #[test]
    fn test_expiring_result() {
        let result = compute_on("01.01.2024", "10", Unit::Days).unwrap();
        assert_eq!(result.expiration_date.to_string(), "11.01.2024");
        assert_eq!(result.days_remaining, 1);
        assert_eq!(result.status, Status::Expiring);
    }

    #[test]
    fn test_fresh_result() {
        let result = compute_on("01.01.2024", "1", Unit::Months).unwrap();
        assert_eq!(result.expiration_date.to_string(), "01.02.2024");
        assert_eq!(result.days_remaining, 22);
        assert_eq!(result.status, Status::Fresh);
    }

    #[test]
    fn test_expired_result() {
        let result = compute_on("01.12.2023", "2", Unit::Weeks).unwrap();
        assert_eq!(result.expiration_date.to_string(), "15.12.2023");
        assert_eq!(result.days_remaining, -26);
        assert_eq!(result.status, Status::Expired);
    }

    #[test]
    fn test_impossible_production_date_rolls_over() {
        let result = compute_on("31.04.2024", "0", Unit::Days).unwrap();
        assert_eq!(result.expiration_date.to_string(), "01.05.2024");
    }

    #[test]
    fn test_config_overflow_policy() {
        let roll = Calculator::new(CalculatorConfig {
            overflow: OverflowPolicy::Roll,
            ..CalculatorConfig::default()
        });
        let result = roll.compute_on("29.02.2020", "1", Unit::Years, today()).unwrap();
        assert_eq!(result.expiration_date.to_string(), "01.03.2021");

        let clamp = compute_on("29.02.2020", "1", Unit::Years).unwrap();
        assert_eq!(clamp.expiration_date.to_string(), "28.02.2021");
    }

    #[test]
    fn test_config_window() {
        let narrow = Calculator::new(CalculatorConfig {
            expiring_window_days: 0,
            ..CalculatorConfig::default()
        });
        let result = narrow.compute_on("01.01.2024", "10", Unit::Days, today()).unwrap();
        assert_eq!(result.status, Status::Fresh);
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: CalculatorConfig = serde_json::from_str(r#"{"overflow":"roll"}"#).unwrap();
        assert_eq!(config.overflow, OverflowPolicy::Roll);
        assert_eq!(config.expiring_window_days, EXPIRING_WINDOW_DAYS);

        let config: CalculatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CalculatorConfig::default());

        assert!(serde_json::from_str::<CalculatorConfig>(r#"{"window":3}"#).is_err());
    }

    #[test]
    fn test_remaining_text() {
        let mut result = compute_on("01.01.2024", "10", Unit::Days).unwrap();
        assert_eq!(result.remaining_text(), "Осталось: 1 дн.");
        result.days_remaining = -4;
        assert_eq!(result.remaining_text(), "Просрочен на: 4 дн.");
    }

    #[test]
    fn test_result_serde() {
        let result = compute_on("01.01.2024", "10", Unit::Days).unwrap();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "expiration_date": "11.01.2024",
                "status": "expiring",
                "days_remaining": 1
            })
        );
    }
}
