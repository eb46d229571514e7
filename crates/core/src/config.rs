//! Engine configuration and per-frame scene toggles

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Static engine parameters
///
/// Loaded once at startup (the demo reads it from JSON); unknown or missing
/// fields fall back to [`EngineConfig::default`].
///
/// # Example
/// ```
/// use weather_drift_core::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.particle_count, 99);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Particles created per (re)initialization
    pub particle_count: usize,

    /// Radius band in pixels, `min..max`
    pub radius_range: Range<f32>,

    /// Speed multiplier band, `min..max`
    pub speed_range: Range<f32>,

    /// Largest elapsed time a single frame may integrate (seconds)
    ///
    /// Protects against teleporting particles after the host suspends the
    /// frame loop (backgrounded tab, laptop sleep).
    pub max_frame_dt: f32,

    /// Ring duration used by the schedule and the test trigger (milliseconds)
    pub alarm_duration_ms: f64,

    /// Seed for ensemble initialization; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            particle_count: 99,
            radius_range: 8.0..24.0,
            speed_range: 0.4..2.0,
            max_frame_dt: 0.1,
            alarm_duration_ms: 30_000.0,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Check every parameter the engine relies on
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found: an empty ensemble, an unusable
    /// radius or speed band, a non-positive `max_frame_dt` or a negative alarm
    /// duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyEnsemble);
        }
        check_band("radius_range", &self.radius_range)?;
        check_band("speed_range", &self.speed_range)?;
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(ConfigError::InvalidMaxDt(self.max_frame_dt));
        }
        if !(self.alarm_duration_ms.is_finite() && self.alarm_duration_ms >= 0.0) {
            return Err(ConfigError::InvalidAlarmDuration(self.alarm_duration_ms));
        }
        Ok(())
    }
}

fn check_band(field: &'static str, band: &Range<f32>) -> Result<(), ConfigError> {
    let valid = band.start.is_finite()
        && band.end.is_finite()
        && band.start > 0.0
        && band.start < band.end;
    if valid {
        Ok(())
    } else {
        Err(ConfigError::invalid_band(field, band.start, band.end))
    }
}

/// UI toggles read every frame
///
/// Owned by the host UI and passed explicitly into the integrator, the color
/// mapper and the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneToggles {
    /// Force the night palette and motion regardless of the real daylight flag
    pub night_override: bool,

    /// Whether the scheduled alarm may fire
    pub alarm_enabled: bool,

    /// Whether a ringing alarm should also play a tone (host-side synthesis)
    pub alarm_sound: bool,
}
