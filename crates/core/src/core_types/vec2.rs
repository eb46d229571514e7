//! Vector type alias for 2D canvas positions and directions.

use nalgebra::Vector2;

/// 2D vector type for canvas positions and wind directions.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used for particle
/// centers (canvas space, y grows downward) and unit wind vectors.
pub type Vec2 = Vector2<f32>;
