use crate::{Calculator, CalendarDate, ExpirationResult, Unit, filter_duration_input, format_date_input};

/// Input state for one calculator screen.
///
/// Owns the production date text, shelf-life text and unit, and recomputes
/// the result synchronously on every change. The previous result is always
/// replaced or cleared, never patched.
#[derive(Debug, Clone, Default)]
pub struct ExpirationForm {
    calculator: Calculator,
    production_date: String,
    duration: String,
    unit: Unit,
    today: Option<CalendarDate>,
    result: Option<ExpirationResult>,
}

impl ExpirationForm {
    pub fn new(calculator: Calculator) -> Self {
        Self {
            calculator,
            ..Self::default()
        }
    }

    /// Pins "today" instead of reading the local clock on each recompute.
    #[must_use]
    pub fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today);
        self.recalculate();
        self
    }

    /// Accepts raw keystrokes and stores them masked as `DD.MM.YYYY`.
    pub fn update_production_date(&mut self, raw: &str) {
        self.production_date = format_date_input(raw);
        self.recalculate();
    }

    /// Accepts raw keystrokes and keeps up to four digits.
    pub fn update_duration(&mut self, raw: &str) {
        self.duration = filter_duration_input(raw);
        self.recalculate();
    }

    pub fn update_unit(&mut self, unit: Unit) {
        self.unit = unit;
        self.recalculate();
    }

    pub fn production_date(&self) -> &str {
        &self.production_date
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub const fn unit(&self) -> Unit {
        self.unit
    }

    pub const fn result(&self) -> Option<&ExpirationResult> {
        self.result.as_ref()
    }

    /// Both fields are filled in yet nothing could be computed, e.g. a
    /// half-typed date. Screens use this to ask the user to check the input.
    pub fn needs_attention(&self) -> bool {
        self.result.is_none() && !self.production_date.is_empty() && !self.duration.is_empty()
    }

    fn recalculate(&mut self) {
        self.result = match self.today {
            Some(today) => {
                self.calculator
                    .compute_on(&self.production_date, &self.duration, self.unit, today)
            },
            None => self
                .calculator
                .compute(&self.production_date, &self.duration, self.unit),
        };
    }
}
