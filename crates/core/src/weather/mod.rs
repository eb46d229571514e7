//! Environmental state driving the animation
//!
//! The provider publishes whole [`WeatherSnapshot`]s through a
//! [`SharedWeather`] handle; the frame loop reads one snapshot per frame and
//! derives every normalized quantity from it on demand.

pub mod season;
pub mod shared;
pub mod snapshot;

pub use season::Season;
pub use shared::SharedWeather;
pub use snapshot::WeatherSnapshot;
