use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::CelebrationData;

/// Which top-level view is showing. Exactly one is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    /// Collecting name and date of birth
    #[default]
    Form,
    /// Celebrating a validated submission
    Celebration(CelebrationData),
}

impl ViewState {
    /// State after a successful form submission. Replaces any prior celebration.
    pub fn submitted(name: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        ViewState::Celebration(CelebrationData::new(name, date_of_birth))
    }

    /// State after the user goes back to the form
    pub fn reset() -> Self {
        ViewState::Form
    }

    pub fn celebration(&self) -> Option<&CelebrationData> {
        match self {
            ViewState::Form => None,
            ViewState::Celebration(data) => Some(data),
        }
    }

    pub fn is_celebrating(&self) -> bool {
        matches!(self, ViewState::Celebration(_))
    }
}

/// Owner of the single top-level view state.
///
/// The caller is trusted to have validated the data before `submit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CelebrationController {
    state: ViewState,
}

impl CelebrationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, name: impl Into<String>, date_of_birth: NaiveDate) {
        let name = name.into();
        info!("Starting celebration: name={}, date_of_birth={}", name, date_of_birth);
        self.state = ViewState::submitted(name, date_of_birth);
    }

    pub fn reset(&mut self) {
        info!("Returning to birthday form");
        self.state = ViewState::reset();
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn celebration(&self) -> Option<&CelebrationData> {
        self.state.celebration()
    }

    pub fn is_celebrating(&self) -> bool {
        self.state.is_celebrating()
    }
}
