use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::config::CelebrationConfig;
use crate::error::{Field, ValidationError};
use crate::month::parse_month;
use crate::{BirthRecord, CelebrationData, FieldErrors};

/// Validator for the name and date-of-birth form.
///
/// Every field is checked independently and all failures are reported
/// together, so the form can highlight each offending input at once.
#[derive(Debug, Clone, PartialEq)]
pub struct DateOfBirthValidator {
    min_year: i32,
    min_name_length: usize,
}

impl Default for DateOfBirthValidator {
    fn default() -> Self {
        Self {
            min_year: 1900,
            min_name_length: 2,
        }
    }
}

impl DateOfBirthValidator {
    pub fn new(min_year: i32, min_name_length: usize) -> Self {
        Self {
            min_year,
            min_name_length,
        }
    }

    pub fn from_config(config: &CelebrationConfig) -> Self {
        Self::new(config.min_year, config.min_name_length)
    }

    /// Validate a raw form record against `today`.
    ///
    /// Returns the trimmed name and the constructed birth date, or every
    /// field error found.
    pub fn validate(&self, record: &BirthRecord, today: NaiveDate) -> Result<CelebrationData, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = record.name.trim();
        if let Some(error) = self.check_name(name) {
            errors.insert(Field::Name, error);
        }

        let date_of_birth = self.check_date(record, today, &mut errors);

        match date_of_birth {
            Some(date_of_birth) if errors.is_empty() => {
                debug!("Birth record accepted: name={}, date_of_birth={}", name, date_of_birth);
                Ok(CelebrationData::new(name, date_of_birth))
            }
            _ => {
                debug!("Birth record rejected with {} field error(s)", errors.len());
                Err(errors)
            }
        }
    }

    fn check_name(&self, name: &str) -> Option<ValidationError> {
        if name.is_empty() {
            return Some(ValidationError::MissingField { field: Field::Name });
        }

        if name.chars().count() < self.min_name_length {
            return Some(ValidationError::TooShort {
                field: Field::Name,
                min: self.min_name_length,
            });
        }

        None
    }

    fn check_date(&self, record: &BirthRecord, today: NaiveDate, errors: &mut FieldErrors) -> Option<NaiveDate> {
        let day = record.day.trim();
        let month = record.month.trim();
        let year = record.year.trim();

        if day.is_empty() || month.is_empty() || year.is_empty() {
            errors.insert(Field::Date, ValidationError::IncompleteDate);
            return None;
        }

        let day = day.parse::<u32>().ok().filter(|d| (1..=31).contains(d));
        if day.is_none() {
            errors.insert(Field::Day, ValidationError::OutOfRange { field: Field::Day });
        }

        let month = parse_month(month).filter(|m| (1..=12).contains(m));
        if month.is_none() {
            errors.insert(Field::Month, ValidationError::OutOfRange { field: Field::Month });
        }

        let year = year
            .parse::<i32>()
            .ok()
            .filter(|y| (self.min_year..=today.year()).contains(y));
        if year.is_none() {
            errors.insert(Field::Year, ValidationError::OutOfRange { field: Field::Year });
        }

        let (Some(day), Some(month), Some(year)) = (day, month, year) else {
            return None;
        };

        // Overflowing days (Feb 30, Apr 31, Feb 29 in a common year) do not construct
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            errors.insert(Field::Date, ValidationError::ImpossibleDate);
            return None;
        };
        debug_assert_eq!((date.year(), date.month(), date.day()), (year, month, day));

        if date > today {
            errors.insert(Field::Date, ValidationError::FutureDate);
            return None;
        }

        Some(date)
    }
}

/// Validate with the default rules (years from 1900, names of 2+ characters)
pub fn validate_birth_record(record: &BirthRecord, today: NaiveDate) -> Result<CelebrationData, FieldErrors> {
    DateOfBirthValidator::default().validate(record, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 13).unwrap()
    }

    fn record(name: &str, day: &str, month: &str, year: &str) -> BirthRecord {
        BirthRecord::new(name, day, month, year)
    }

    fn errors_for(record: &BirthRecord) -> FieldErrors {
        validate_birth_record(record, today()).expect_err("expected validation to fail")
    }

    #[test]
    fn test_valid_record() {
        let data = validate_birth_record(&record("  Ada  ", "10", "December", "1990"), today()).unwrap();

        assert_eq!(data.name, "Ada");
        assert_eq!(data.date_of_birth, NaiveDate::from_ymd_opt(1990, 12, 10).unwrap());
    }

    #[test]
    fn test_numeric_month_entry() {
        let data = validate_birth_record(&record("Ada", "10", "12", "1990"), today()).unwrap();
        assert_eq!(data.date_of_birth.month(), 12);
    }

    #[test]
    fn test_missing_name_only() {
        let errors = errors_for(&record("", "1", "1", "2000"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(Field::Name).as_deref(), Some("Name is required"));
        assert!(!errors.contains(Field::Date));
    }

    #[test]
    fn test_whitespace_name_is_missing() {
        let errors = errors_for(&record("   ", "1", "1", "2000"));
        assert_eq!(
            errors.get(Field::Name),
            Some(&ValidationError::MissingField { field: Field::Name })
        );
    }

    #[test]
    fn test_short_name() {
        let errors = errors_for(&record(" A ", "1", "1", "2000"));
        assert_eq!(
            errors.message(Field::Name).as_deref(),
            Some("Name must be at least 2 characters")
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        assert!(validate_birth_record(&record("Zoë", "1", "1", "2000"), today()).is_ok());
        assert!(validate_birth_record(&record("李", "1", "1", "2000"), today()).is_err());
    }

    #[test]
    fn test_incomplete_date_only() {
        let errors = errors_for(&record("Ada", "", "", ""));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Date), Some(&ValidationError::IncompleteDate));
        assert!(!errors.contains(Field::Day));
        assert!(!errors.contains(Field::Month));
        assert!(!errors.contains(Field::Year));
    }

    #[test]
    fn test_partially_filled_date_is_incomplete() {
        let errors = errors_for(&record("Ada", "12", "", "1990"));
        assert_eq!(errors.get(Field::Date), Some(&ValidationError::IncompleteDate));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_name_and_date_errors_are_independent() {
        let errors = errors_for(&record("", "", "March", ""));

        assert_eq!(errors.len(), 2);
        assert!(errors.contains(Field::Name));
        assert!(errors.contains(Field::Date));
    }

    #[test]
    fn test_each_component_range_checked() {
        let errors = errors_for(&record("Ada", "32", "Smarch", "1899"));

        assert_eq!(errors.message(Field::Day).as_deref(), Some("Invalid day"));
        assert_eq!(errors.message(Field::Month).as_deref(), Some("Invalid month"));
        assert_eq!(errors.message(Field::Year).as_deref(), Some("Invalid year"));
        // No calendar construction when a component is out of range
        assert!(!errors.contains(Field::Date));
    }

    #[test]
    fn test_non_numeric_components() {
        let errors = errors_for(&record("Ada", "ten", "0", "19x0"));

        assert!(errors.contains(Field::Day));
        assert!(errors.contains(Field::Month));
        assert!(errors.contains(Field::Year));
    }

    #[test]
    fn test_single_bad_component() {
        let errors = errors_for(&record("Ada", "0", "5", "1990"));

        assert_eq!(errors.len(), 1);
        assert!(errors.contains(Field::Day));
    }

    #[test]
    fn test_year_bounds() {
        assert!(validate_birth_record(&record("Ada", "1", "1", "1900"), today()).is_ok());
        assert!(validate_birth_record(&record("Ada", "1", "1", "2025"), today()).is_ok());

        let errors = errors_for(&record("Ada", "1", "1", "2026"));
        assert_eq!(errors.get(Field::Year), Some(&ValidationError::OutOfRange { field: Field::Year }));
    }

    #[test]
    fn test_february_30_is_impossible() {
        let errors = errors_for(&record("Ada", "30", "2", "2000"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Date), Some(&ValidationError::ImpossibleDate));
        assert_eq!(errors.message(Field::Date).as_deref(), Some("Invalid date (e.g., Feb 30)"));
    }

    #[test]
    fn test_leap_years() {
        assert!(validate_birth_record(&record("Ada", "29", "February", "2000"), today()).is_ok());
        assert!(validate_birth_record(&record("Ada", "29", "February", "2024"), today()).is_ok());

        let errors = errors_for(&record("Ada", "29", "February", "1900"));
        assert_eq!(errors.get(Field::Date), Some(&ValidationError::ImpossibleDate));
    }

    #[test]
    fn test_thirty_one_in_short_month() {
        let errors = errors_for(&record("Ada", "31", "April", "2010"));
        assert_eq!(errors.get(Field::Date), Some(&ValidationError::ImpossibleDate));
    }

    #[test]
    fn test_future_date_this_year() {
        let errors = errors_for(&record("Ada", "14", "6", "2025"));
        assert_eq!(errors.get(Field::Date), Some(&ValidationError::FutureDate));
        assert_eq!(
            errors.message(Field::Date).as_deref(),
            Some("Birth date cannot be in the future")
        );
    }

    #[test]
    fn test_born_today_is_accepted() {
        let data = validate_birth_record(&record("Ada", "13", "6", "2025"), today()).unwrap();
        assert_eq!(data.date_of_birth, today());
        assert_eq!(data.age_on(today()), 0);
    }

    #[test]
    fn test_configured_rules() {
        let config = CelebrationConfig {
            min_year: 1950,
            min_name_length: 3,
            ..CelebrationConfig::default()
        };
        let validator = DateOfBirthValidator::from_config(&config);

        let errors = validator.validate(&record("Al", "1", "1", "1949"), today()).unwrap_err();
        assert!(errors.contains(Field::Name));
        assert!(errors.contains(Field::Year));
        assert!(validator.validate(&record("Ada", "1", "1", "1950"), today()).is_ok());
    }

    proptest! {
        #[test]
        fn real_past_dates_round_trip(days_back in 0i64..45_000) {
            let date = today() - chrono::Duration::days(days_back);
            prop_assume!(date.year() >= 1900);

            let input = record(
                "Ada",
                &date.day().to_string(),
                &date.month().to_string(),
                &date.year().to_string(),
            );
            let data = validate_birth_record(&input, today()).unwrap();

            prop_assert_eq!(data.date_of_birth.year(), date.year());
            prop_assert_eq!(data.date_of_birth.month(), date.month());
            prop_assert_eq!(data.date_of_birth.day(), date.day());
        }

        #[test]
        fn named_and_numeric_months_agree(month in 1u32..=12, day in 1u32..=28, year in 1900i32..=2024) {
            let numeric = record("Ada", &day.to_string(), &month.to_string(), &year.to_string());
            let named = record(
                "Ada",
                &day.to_string(),
                crate::month::month_name(month).unwrap(),
                &year.to_string(),
            );

            prop_assert_eq!(
                validate_birth_record(&numeric, today()),
                validate_birth_record(&named, today())
            );
        }
    }
}
