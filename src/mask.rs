//! Input masks applied while the user types.

use crate::{DATE_SEPARATOR, MAX_DATE_DIGITS, MAX_DURATION_DIGITS};

/// Masks raw keystrokes into `DD.MM.YYYY` as they are typed.
///
/// Non-digits are dropped and at most eight digits are kept, so the mask
/// can be reapplied to its own output:
///
/// ```
/// use shelf_life::format_date_input;
///
/// assert_eq!(format_date_input("123"), "12.3");
/// assert_eq!(format_date_input("12345678"), "12.34.5678");
/// assert_eq!(format_date_input("12.34.5678xx"), "12.34.5678");
/// ```
pub fn format_date_input(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DATE_DIGITS)
        .collect();

    // ASCII digits only, so byte offsets are char offsets
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}{DATE_SEPARATOR}{}", &digits[..2], &digits[2..]),
        _ => format!(
            "{}{DATE_SEPARATOR}{}{DATE_SEPARATOR}{}",
            &digits[..2],
            &digits[2..4],
            &digits[4..]
        ),
    }
}

/// Keeps only the digits of a shelf-life entry, at most four of them.
pub fn filter_duration_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DURATION_DIGITS)
        .collect()
}
