//! Core types and utilities

pub mod math;
pub mod units;
pub mod vec2;

pub use math::{clamp01, lerp, lerp_rgb};
pub use units::*;
pub use vec2::Vec2;
