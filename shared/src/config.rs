use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the form and the celebration page.
///
/// Every field has a default, so a partial JSON override is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    /// Earliest accepted birth year
    pub min_year: i32,
    /// Minimum trimmed name length in characters
    pub min_name_length: usize,
    /// Number of years listed in the year selector
    pub year_span: u32,
    /// Song played on the celebration page
    pub audio_src: String,
    /// Delay before attempting playback
    pub autoplay_delay_ms: u32,
    /// FFT size for the audio analyser (power of two, 32..=32768)
    pub fft_size: u32,
    pub particle_count: usize,
    pub sparkle_count: usize,
    pub confetti_count: usize,
    pub confetti_duration_ms: u32,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            min_year: 1900,
            min_name_length: 2,
            year_span: 121,
            audio_src: "/audio/happy-birthday.mp3".to_string(),
            autoplay_delay_ms: 1000,
            fft_size: 32,
            particle_count: 15,
            sparkle_count: 60,
            confetti_count: 100,
            confetti_duration_ms: 5000,
        }
    }
}

impl CelebrationConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(ConfigError::Invalid(format!(
                "fft_size must be a power of two between 32 and 32768, got {}",
                self.fft_size
            )));
        }

        if self.year_span == 0 {
            return Err(ConfigError::Invalid("year_span must be at least 1".to_string()));
        }

        if self.min_name_length == 0 {
            return Err(ConfigError::Invalid("min_name_length must be at least 1".to_string()));
        }

        Ok(())
    }
}
