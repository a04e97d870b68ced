//! Whole-year age arithmetic.
//!
//! Age is derived on demand from the birth date and "today", never stored,
//! so a long-lived page rolls over correctly at the birthday.

use chrono::{Datelike, NaiveDate};

/// Completed years between `date_of_birth` and `today`.
///
/// The year difference is reduced by one while this year's birthday is still
/// ahead. Birth dates after `today` give 0 rather than a negative age.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - date_of_birth.year();

    let birthday_pending = (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day());
    if birthday_pending {
        years -= 1;
    }

    years.max(0) as u32
}

/// Whether `today` is the birthday.
///
/// Leap-day birthdays are celebrated on February 28 in common years.
pub fn is_birthday(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    let leap_year = NaiveDate::from_ymd_opt(today.year(), 2, 29).is_some();
    if date_of_birth.month() == 2 && date_of_birth.day() == 29 && !leap_year {
        return today.month() == 2 && today.day() == 28;
    }

    today.month() == date_of_birth.month() && today.day() == date_of_birth.day()
}
