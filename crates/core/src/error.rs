//! Configuration errors
//!
//! The per-frame engine cannot fail; every anomaly in weather input is
//! absorbed as a degraded visual. Configuration is the only place a caller
//! can hand the engine something unusable.

use std::fmt;

/// Reason an [`EngineConfig`](crate::EngineConfig) was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The ensemble must hold at least one particle
    EmptyEnsemble,

    /// A `min..max` band is inverted, empty, non-finite or starts at/below zero
    InvalidBand {
        /// Name of the offending field (e.g. `"radius_range"`)
        field: &'static str,
        /// Lower bound as configured
        min: f32,
        /// Upper bound as configured
        max: f32,
    },

    /// `max_frame_dt` must be positive and finite
    InvalidMaxDt(f32),

    /// Alarm duration must be non-negative and finite
    InvalidAlarmDuration(f64),
}

impl ConfigError {
    /// Create error for an unusable `min..max` band
    pub fn invalid_band(field: &'static str, min: f32, max: f32) -> Self {
        ConfigError::InvalidBand { field, min, max }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyEnsemble => write!(f, "particle_count must be at least 1"),
            ConfigError::InvalidBand { field, min, max } => {
                write!(f, "{field} must satisfy 0 < min < max, got {min}..{max}")
            }
            ConfigError::InvalidMaxDt(dt) => {
                write!(f, "max_frame_dt must be positive and finite, got {dt}")
            }
            ConfigError::InvalidAlarmDuration(ms) => {
                write!(f, "alarm_duration_ms must be non-negative, got {ms}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
