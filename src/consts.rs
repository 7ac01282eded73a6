/// Maximum valid year (inclusive), the largest four-digit year
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Days in one full 400-year Gregorian cycle
pub(crate) const DAYS_PER_ERA: i64 = 146_097;
/// Offset from 0000-03-01 to the Unix epoch, in days
pub(crate) const EPOCH_SHIFT: i64 = 719_468;

pub const MONTHS_PER_YEAR: i64 = 12;
pub const DAYS_PER_WEEK: i64 = 7;

/// Largest shelf-life amount accepted (four digits)
pub const MAX_DURATION: u16 = 9999;
/// Digits kept by the duration input filter
pub const MAX_DURATION_DIGITS: usize = 4;
/// Digits kept by the date input mask (`DDMMYYYY`)
pub const MAX_DATE_DIGITS: usize = 8;

/// Days before expiration (inclusive) that count as "expiring"
pub const EXPIRING_WINDOW_DAYS: u32 = 7;

/// Date component separator (`DD.MM.YYYY`)
pub const DATE_SEPARATOR: char = '.';

/// Day count (since 1970-01-01) of 0001-01-01
pub const MIN_EPOCH_DAY: i64 = -719_162;
/// Day count (since 1970-01-01) of 9999-12-31
pub const MAX_EPOCH_DAY: i64 = 2_932_896;
/// Intermediate years beyond this are rejected before day arithmetic
pub(crate) const NORMALIZE_YEAR_LIMIT: u64 = 1 << 32;
