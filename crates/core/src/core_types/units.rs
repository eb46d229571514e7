//! Semantic unit types for weather readings
//!
//! Newtype wrappers keep the provider's readings from being mixed up
//! (a wind speed passed where a rain rate is expected, degrees where a
//! percentage is expected).
//!
//! # Design
//! - All readings are `f32`; the engine works in canvas space where `f32` is ample
//! - `Deref` to the raw value for arithmetic, explicit constructors for intent
//! - Total ordering via `total_cmp` (NaN sorts above every value)
//! - Serialized transparently, so a JSON snapshot reads `"temperature": 18.0`
//!
//! # Usage
//! ```
//! use weather_drift_core::core_types::units::{Celsius, Degrees};
//!
//! let t = Celsius::new(18.0);
//! assert_eq!(*t, 18.0);
//!
//! let heading = Degrees::new(-90.0).normalized();
//! assert_eq!(*heading, 270.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Shared boilerplate for `f32` reading newtypes: ordering, deref and
/// conversions. Unit-specific constructors and helpers live on each type.
macro_rules! reading_newtype {
    ($name:ident, $suffix:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f32;
            #[inline]
            fn deref(&self) -> &f32 {
                &self.0
            }
        }

        impl From<f32> for $name {
            fn from(v: f32) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f32 {
            fn from(v: $name) -> f32 {
                v.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.1}{}", self.0, $suffix)
            }
        }
    };
}

/// Air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f32);

reading_newtype!(Celsius, "°C");

impl Celsius {
    /// Coldest temperature the palette distinguishes
    pub const PALETTE_MIN: Celsius = Celsius(-15.0);

    /// Hottest temperature the palette distinguishes
    pub const PALETTE_MAX: Celsius = Celsius(50.0);

    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Celsius(value)
    }
}

/// Percentage (0-100), used for cloud cover
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f32);

reading_newtype!(Percent, "%");

impl Percent {
    /// Create a new percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Percent(value)
    }

    /// Convert to a fraction (0-1), unclamped
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f32 {
        self.0 / 100.0
    }
}

/// Precipitation rate in millimetres per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MillimetersPerHour(f32);

reading_newtype!(MillimetersPerHour, " mm/h");

impl MillimetersPerHour {
    /// Create a new precipitation rate
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        MillimetersPerHour(value)
    }
}

/// Wind speed in metres per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f32);

reading_newtype!(MetersPerSecond, " m/s");

impl MetersPerSecond {
    /// Create a new wind speed
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        MetersPerSecond(value)
    }
}

/// Compass angle in degrees (0=+x axis on the canvas, clockwise because y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f32);

reading_newtype!(Degrees, "°");

impl Degrees {
    /// Create a new angle
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Degrees(value)
    }

    /// Wrap into `[0, 360)`
    #[inline]
    #[must_use]
    pub fn normalized(self) -> Self {
        let wrapped = self.0.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        Degrees(if wrapped >= 360.0 { 0.0 } else { wrapped })
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f32 {
        self.0.to_radians()
    }
}
