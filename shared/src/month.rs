use chrono::{Datelike, NaiveDate};

/// English month names in calendar order
pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Get month name from number (1-based)
pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTH_NAMES[(month - 1) as usize]),
        _ => None,
    }
}

/// Resolve a month entry to its 1-based number.
///
/// Accepts either a number ("7") or a month name ("July", case-insensitive).
/// Numbers are returned as parsed, so callers still range-check them.
pub fn parse_month(input: &str) -> Option<u32> {
    let input = input.trim();
    if let Ok(number) = input.parse::<u32>() {
        return Some(number);
    }

    MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(input))
        .map(|index| index as u32 + 1)
}

/// Day choices offered by the form
pub fn day_options() -> impl Iterator<Item = u32> {
    1..=31
}

/// Year choices offered by the form, newest first
pub fn year_options(today: NaiveDate, span: u32) -> Vec<i32> {
    let current = today.year();
    (0..span as i32).map(|offset| current - offset).collect()
}
