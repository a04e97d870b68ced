use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

pub mod age;
pub mod config;
pub mod error;
pub mod month;
pub mod scene;
pub mod validation;
pub mod view_state;

pub use age::{age_on, is_birthday};
pub use config::CelebrationConfig;
pub use error::{ConfigError, Field, ValidationError};
pub use month::{month_name, parse_month, MONTH_NAMES};
pub use validation::{validate_birth_record, DateOfBirthValidator};
pub use view_state::{CelebrationController, ViewState};

/// Raw birthday form input, exactly as typed or selected.
///
/// Nothing here is trusted until it has been through [`DateOfBirthValidator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthRecord {
    pub name: String,
    /// Day of month as text, empty when not chosen
    pub day: String,
    /// Month number ("7") or month name ("July"), empty when not chosen
    pub month: String,
    /// Four digit year as text, empty when not chosen
    pub year: String,
}

impl BirthRecord {
    pub fn new(
        name: impl Into<String>,
        day: impl Into<String>,
        month: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }
}

/// Validated name and birth date handed to the celebration view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrationData {
    /// Trimmed display name
    pub name: String,
    pub date_of_birth: NaiveDate,
}

impl CelebrationData {
    pub fn new(name: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date_of_birth,
        }
    }

    /// Whole years lived as of `today`
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age::age_on(self.date_of_birth, today)
    }

    /// e.g. "Ada is 36 years old!"
    pub fn age_headline(&self, today: NaiveDate) -> String {
        format!("{} is {} years old!", self.name, self.age_on(today))
    }

    /// e.g. "Happy Birthday, Ada!"
    pub fn greeting(&self) -> String {
        format!("Happy Birthday, {}!", self.name)
    }
}

/// Field-attributed validation errors. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error, replacing any earlier one for the same field
    pub fn insert(&mut self, field: Field, error: ValidationError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// User-facing message for a field, if it is invalid
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, error) in &self.errors {
            map.serialize_entry(field.key(), &error.to_string())?;
        }
        map.end()
    }
}
