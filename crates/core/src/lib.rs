//! Weather Drift Core Library
//!
//! A frame-driven animation engine: an ensemble of drifting circles whose
//! motion and palette follow live weather readings, with an alarm that
//! shakes the whole scene while it rings.
//!
//! ## Pipeline
//!
//! - [`weather`]: snapshot of the provider's readings, normalized on demand
//! - [`particle`]: fixed-size ensemble, replaced on every canvas resize
//! - [`motion`]: per-frame integration (sun/rain regimes, wind, vibration, wrap)
//! - [`alarm`]: idle/ringing timer plus a daily schedule
//! - [`color`]: background and stroke colors
//! - [`frame`]: the per-tick driver that ties it together
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use weather_drift_core::{
//!     AlarmTimer, DrawSurface, EngineConfig, FrameDriver, Hsla, Rgb, SceneToggles,
//!     SharedWeather, Vec2, WeatherSnapshot,
//! };
//!
//! struct Null;
//! impl DrawSurface for Null {
//!     fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: Rgb) {}
//!     fn stroke_circle(&mut self, _: Vec2, _: f32, _: Hsla) {}
//! }
//!
//! let weather = SharedWeather::new(WeatherSnapshot::new(18.0, 40.0, 0.0, 1.0, 0.0, 0.1, true));
//! let mut driver = FrameDriver::new(EngineConfig::default());
//! driver.resize(800.0, 600.0, &mut StdRng::seed_from_u64(7));
//!
//! let mut alarm = AlarmTimer::new();
//! for frame in 0..3 {
//!     let snapshot = weather.current();
//!     let now_ms = f64::from(frame) * 16.0;
//!     driver.tick(now_ms, &snapshot, SceneToggles::default(), &mut alarm, &mut Null);
//! }
//! assert_eq!(driver.frame_count(), 3);
//! ```

// Core types and utilities
pub mod core_types;

pub mod alarm;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod motion;
pub mod particle;
pub mod weather;

// Re-export core types
pub use core_types::{Celsius, Degrees, MetersPerSecond, MillimetersPerHour, Percent, Vec2};

// Re-export engine types
pub use alarm::{AlarmSchedule, AlarmState, AlarmTimer};
pub use color::{background, stroke_color, Hsla, Rgb};
pub use config::{EngineConfig, SceneToggles};
pub use error::ConfigError;
pub use frame::{DrawSurface, FrameDriver, FrameStats};
pub use motion::{step, MotionMode};
pub use particle::{Ensemble, Particle};
pub use weather::{Season, SharedWeather, WeatherSnapshot};
