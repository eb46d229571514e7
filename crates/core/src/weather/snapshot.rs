//! Environmental snapshot consumed by the engine each frame
//!
//! A snapshot is an immutable copy of the provider's readings. The engine
//! never mutates one; the provider replaces it wholesale (see
//! [`SharedWeather`](super::SharedWeather)).

use crate::core_types::units::{Celsius, Degrees, MetersPerSecond, MillimetersPerHour, Percent};
use crate::core_types::{clamp01, Vec2};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Rain rate that saturates `rain_norm` (mm/h)
pub const RAIN_SATURATION: f32 = 10.0;

/// Wind speed that saturates `wind_norm` (m/s)
pub const WIND_SATURATION: f32 = 12.0;

/// Weather readings as delivered by the external provider
///
/// Missing fields deserialize to [`WeatherSnapshot::default`] values, so a
/// feed without a fog reading still produces a defined snapshot.
///
/// # Example
/// ```
/// use weather_drift_core::WeatherSnapshot;
///
/// let json = r#"{ "temperature": 18.0, "cloud_cover": 40.0, "is_day": true }"#;
/// let snapshot: WeatherSnapshot = serde_json::from_str(json).unwrap();
/// assert_eq!(snapshot.fog, 0.0);
/// assert!((snapshot.cloud_norm() - 0.4).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    /// Ambient air temperature
    pub temperature: Celsius,

    /// Cloud cover (0-100%)
    pub cloud_cover: Percent,

    /// Precipitation rate (>= 0)
    pub rain: MillimetersPerHour,

    /// Wind speed (>= 0)
    pub wind_speed: MetersPerSecond,

    /// Direction the wind pushes particles toward, `[0, 360)`
    pub wind_direction: Degrees,

    /// Fog density (0-1)
    pub fog: f32,

    /// Whether the provider reports daylight at the observed location
    pub is_day: bool,
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        WeatherSnapshot {
            temperature: Celsius::new(15.0),
            cloud_cover: Percent::new(0.0),
            rain: MillimetersPerHour::new(0.0),
            wind_speed: MetersPerSecond::new(0.0),
            wind_direction: Degrees::new(0.0),
            fog: 0.0,
            is_day: true,
        }
    }
}

impl WeatherSnapshot {
    /// Create a snapshot from raw readings
    ///
    /// # Arguments
    /// * `temperature` - Air temperature in °C
    /// * `cloud_cover` - Cloud cover in %
    /// * `rain` - Precipitation in mm/h
    /// * `wind_speed` - Wind speed in m/s
    /// * `wind_direction` - Wind direction in degrees
    /// * `fog` - Fog density (0-1)
    /// * `is_day` - Daylight flag
    #[must_use]
    pub fn new(
        temperature: f32,
        cloud_cover: f32,
        rain: f32,
        wind_speed: f32,
        wind_direction: f32,
        fog: f32,
        is_day: bool,
    ) -> Self {
        WeatherSnapshot {
            temperature: Celsius::new(temperature),
            cloud_cover: Percent::new(cloud_cover),
            rain: MillimetersPerHour::new(rain),
            wind_speed: MetersPerSecond::new(wind_speed),
            wind_direction: Degrees::new(wind_direction),
            fog,
            is_day,
        }
    }

    /// Return a copy with every field inside its declared range
    ///
    /// Non-finite readings fall back to the default snapshot's value; finite
    /// out-of-range readings are clamped. Logs a warning when anything had
    /// to be repaired.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = WeatherSnapshot::default();
        let mut repaired: Vec<&'static str> = Vec::new();

        let mut finite_or = |value: f32, fallback: f32, field: &'static str| {
            if value.is_finite() {
                value
            } else {
                repaired.push(field);
                fallback
            }
        };

        let temperature = finite_or(*self.temperature, *defaults.temperature, "temperature");
        let cloud = finite_or(*self.cloud_cover, *defaults.cloud_cover, "cloud_cover");
        let rain = finite_or(*self.rain, *defaults.rain, "rain");
        let wind = finite_or(*self.wind_speed, *defaults.wind_speed, "wind_speed");
        let direction = finite_or(
            *self.wind_direction,
            *defaults.wind_direction,
            "wind_direction",
        );
        let fog = finite_or(self.fog, defaults.fog, "fog");

        if !repaired.is_empty() {
            warn!(
                "Weather snapshot had non-finite readings, using defaults for: {}",
                repaired.join(", ")
            );
        }

        WeatherSnapshot {
            temperature: Celsius::new(temperature),
            cloud_cover: Percent::new(cloud.clamp(0.0, 100.0)),
            rain: MillimetersPerHour::new(rain.max(0.0)),
            wind_speed: MetersPerSecond::new(wind.max(0.0)),
            wind_direction: Degrees::new(direction).normalized(),
            fog: fog.clamp(0.0, 1.0),
            is_day: self.is_day,
        }
    }

    /// Temperature mapped onto the palette range: -15°C → 0, 50°C → 1
    #[inline]
    #[must_use]
    pub fn temp_norm(&self) -> f32 {
        let min = *Celsius::PALETTE_MIN;
        let max = *Celsius::PALETTE_MAX;
        clamp01((*self.temperature - min) / (max - min))
    }

    /// Rain intensity, saturating at 10 mm/h
    #[inline]
    #[must_use]
    pub fn rain_norm(&self) -> f32 {
        clamp01(*self.rain / RAIN_SATURATION)
    }

    /// Wind intensity, saturating at 12 m/s
    #[inline]
    #[must_use]
    pub fn wind_norm(&self) -> f32 {
        clamp01(*self.wind_speed / WIND_SATURATION)
    }

    /// Fog density clamped to `[0, 1]`
    #[inline]
    #[must_use]
    pub fn fog_norm(&self) -> f32 {
        clamp01(self.fog)
    }

    /// Cloud cover as a fraction
    #[inline]
    #[must_use]
    pub fn cloud_norm(&self) -> f32 {
        clamp01(self.cloud_cover.to_fraction())
    }

    /// Daylight after applying the night override toggle
    #[inline]
    #[must_use]
    pub fn effective_is_day(&self, night_override: bool) -> bool {
        !night_override && self.is_day
    }

    /// Unit vector the wind pushes along, `(cos θ, sin θ)`
    ///
    /// A non-finite direction yields the +x axis.
    #[must_use]
    pub fn wind_unit(&self) -> Vec2 {
        let theta = self.wind_direction.to_radians();
        if theta.is_finite() {
            Vec2::new(theta.cos(), theta.sin())
        } else {
            Vec2::new(1.0, 0.0)
        }
    }
}
