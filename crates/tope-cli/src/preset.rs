//! TOML limiter presets.
//!
//! A preset holds the five user-facing limiter parameters. Validation is
//! performed on load and before processing, so configuration mistakes are
//! reported at the command line instead of being silently clamped deep in
//! the DSP path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tope_core::Sample;
use tope_dynamics::Limiter;

/// Errors that can occur while loading, saving, or validating a preset.
#[derive(Debug, Error)]
pub enum PresetError {
    /// Failed to read a preset file
    #[error("failed to read preset '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a preset file
    #[error("failed to write preset '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A parameter is outside its valid domain
    #[error("invalid parameter '{param}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        param: &'static str,
        /// Description of why the value is invalid.
        reason: String,
    },
}

/// The five user-facing limiter parameters.
///
/// Times are seconds, levels are decibels, matching the
/// [`Limiter`](tope_dynamics::Limiter) setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimiterPreset {
    /// Input drive in dB.
    pub pre_gain_db: f64,
    /// Attack time (and look-ahead window) in seconds.
    pub attack_time: f64,
    /// Extra peak-hold in seconds.
    pub hold_time: f64,
    /// Release time in seconds.
    pub release_time: f64,
    /// Output ceiling in dB.
    pub threshold_db: f64,
}

impl Default for LimiterPreset {
    fn default() -> Self {
        Self {
            pre_gain_db: 0.0,
            attack_time: 0.01,
            hold_time: 0.0,
            release_time: 0.05,
            threshold_db: -0.3,
        }
    }
}

impl LimiterPreset {
    /// Load and validate a preset from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PresetError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let preset: Self = toml::from_str(&text)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Save the preset as TOML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PresetError> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| PresetError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check every parameter against its domain.
    pub fn validate(&self) -> Result<(), PresetError> {
        fn finite(param: &'static str, value: f64) -> Result<(), PresetError> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(PresetError::InvalidParameter {
                    param,
                    reason: format!("must be finite, got {value}"),
                })
            }
        }

        finite("pre_gain_db", self.pre_gain_db)?;
        finite("threshold_db", self.threshold_db)?;
        finite("attack_time", self.attack_time)?;
        finite("hold_time", self.hold_time)?;
        finite("release_time", self.release_time)?;

        if self.attack_time <= 0.0 {
            return Err(PresetError::InvalidParameter {
                param: "attack_time",
                reason: format!("must be positive, got {}", self.attack_time),
            });
        }
        if self.hold_time < 0.0 {
            return Err(PresetError::InvalidParameter {
                param: "hold_time",
                reason: format!("must be non-negative, got {}", self.hold_time),
            });
        }
        if self.release_time <= 0.0 {
            return Err(PresetError::InvalidParameter {
                param: "release_time",
                reason: format!("must be positive, got {}", self.release_time),
            });
        }
        Ok(())
    }

    /// Build a limiter at the given sample rate from this preset.
    pub fn build_limiter<R: Sample>(&self, sample_rate: f64) -> Limiter<R> {
        Limiter::with_config(
            R::from_f64(sample_rate),
            R::from_f64(self.pre_gain_db),
            R::from_f64(self.attack_time),
            R::from_f64(self.hold_time),
            R::from_f64(self.release_time),
            R::from_f64(self.threshold_db),
        )
    }
}
