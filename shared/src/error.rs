use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Form field an error is attributed to.
///
/// `Date` covers errors that span all three date components at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Day,
    Month,
    Year,
    Date,
}

impl Field {
    /// Lower-case key used in error maps and element ids
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
            Field::Date => "date",
        }
    }

    /// Capitalized label used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Day => "Day",
            Field::Month => "Month",
            Field::Year => "Year",
            Field::Date => "Date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Specific validation errors for the birthday form.
///
/// The `Display` output is the message shown next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("{} is required", .field.label())]
    MissingField { field: Field },

    #[error("{} must be at least {min} characters", .field.label())]
    TooShort { field: Field, min: usize },

    #[error("Invalid {field}")]
    OutOfRange { field: Field },

    #[error("Please select a complete date")]
    IncompleteDate,

    #[error("Birth date cannot be in the future")]
    FutureDate,

    #[error("Invalid date (e.g., Feb 30)")]
    ImpossibleDate,
}

/// Errors raised while loading celebration settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed celebration config: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid celebration config: {0}")]
    Invalid(String),
}
