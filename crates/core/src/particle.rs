//! Particle ensemble
//!
//! A fixed-size batch of independent circular particles. The ensemble is
//! replaced wholesale whenever the canvas changes size; particles are never
//! added or removed one at a time.

use crate::config::EngineConfig;
use crate::core_types::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Range;
use tracing::info;

/// A single drifting circle
///
/// `radius`, `speed` and `hue` are fixed at creation. `phase` only grows and
/// drives the trigonometric motion terms. It is never wrapped (the terms have
/// periods 2π and 2π²) and is held in `f64` so a frame's increment still
/// registers after weeks of uptime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Center in canvas space (pixels, y grows downward)
    pub position: Vec2,

    /// Radius in pixels
    pub radius: f32,

    /// Phase accumulator (radians)
    pub phase: f64,

    /// Speed multiplier modulating the phase rate
    pub speed: f32,

    /// Hue offset in degrees `[0, 360)`; also seeds the vibration phase
    pub hue: f32,
}

impl Particle {
    /// Phase a slot starts with: `(index + 1)·π`
    ///
    /// Deterministic per slot, so a fresh ensemble is spread over the cycle
    /// without relying on the random generator.
    #[inline]
    #[must_use]
    pub fn initial_phase(index: usize) -> f64 {
        (index as f64 + 1.0) * PI
    }
}

/// The exclusively owned particle batch
#[derive(Debug, Clone, Default)]
pub struct Ensemble {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    radius_range: Range<f32>,
    speed_range: Range<f32>,
}

impl Ensemble {
    /// Create an empty ensemble using the radius and speed bands of `config`
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Ensemble {
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            radius_range: config.radius_range.clone(),
            speed_range: config.speed_range.clone(),
        }
    }

    /// Wrap existing particles (replays and tests)
    #[must_use]
    pub fn with_particles(particles: Vec<Particle>, width: f32, height: f32) -> Self {
        let defaults = EngineConfig::default();
        Ensemble {
            particles,
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            radius_range: defaults.radius_range,
            speed_range: defaults.speed_range,
        }
    }

    /// Discard every particle and create `count` new ones inside `width × height`
    ///
    /// # Arguments
    /// * `width`, `height` - Canvas size in pixels; non-positive or non-finite
    ///   extents collapse to 0 and place every particle on that edge
    /// * `count` - Number of particles to create
    /// * `rng` - Random source; pass a seeded generator for reproducible layouts
    pub fn initialize<R: Rng>(&mut self, width: f32, height: f32, count: usize, rng: &mut R) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);

        let particles: Vec<Particle> = (0..count)
            .map(|index| Particle {
                position: Vec2::new(
                    sample(rng, 0.0..self.width),
                    sample(rng, 0.0..self.height),
                ),
                radius: sample(rng, self.radius_range.clone()),
                phase: Particle::initial_phase(index),
                speed: sample(rng, self.speed_range.clone()),
                hue: sample(rng, 0.0..360.0),
            })
            .collect();
        self.particles = particles;

        info!(
            "Ensemble initialized: {} particles on {:.0}x{:.0} canvas",
            count, self.width, self.height
        );
    }

    /// Canvas size the ensemble was created for
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Number of particles
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the ensemble has not been initialized (or was created empty)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of every particle
    #[inline]
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Iterate particles in slot order
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Mutable access for the integrator
    #[inline]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

impl<'a> IntoIterator for &'a Ensemble {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

/// Canvas extent as the ensemble stores it: non-positive or non-finite becomes 0
pub(crate) fn sanitize_extent(extent: f32) -> f32 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

/// Uniform sample from `band`, or its start when the band is empty
fn sample<R: Rng>(rng: &mut R, band: Range<f32>) -> f32 {
    if band.start < band.end {
        rng.random_range(band)
    } else {
        band.start
    }
}
