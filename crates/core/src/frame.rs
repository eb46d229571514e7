//! Frame orchestration
//!
//! [`FrameDriver`] is called once per rendering tick by the host scheduler.
//! It measures elapsed time, runs the motion integrator, then paints the
//! background and every particle onto a [`DrawSurface`].

use crate::alarm::AlarmTimer;
use crate::color::{background, stroke_color, Hsla, Rgb};
use crate::config::{EngineConfig, SceneToggles};
use crate::core_types::Vec2;
use crate::motion::{self, MotionMode};
use crate::particle::{sanitize_extent, Ensemble};
use crate::weather::WeatherSnapshot;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rendering surface supplied by the host
///
/// Only two primitives are needed: a filled rectangle for the backdrop and
/// a stroked circle per particle.
pub trait DrawSurface {
    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb);

    /// Stroke a circle outline
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Hsla);
}

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Seconds integrated this frame after clamping
    pub dt: f32,
    /// Motion regime used
    pub mode: MotionMode,
    /// Alarm state after the step (expiry already applied)
    pub alarm_ringing: bool,
    /// Whether the host should be playing the alarm tone
    pub sound_requested: bool,
    /// Particles drawn
    pub particles: usize,
    /// Background painted
    pub background: Rgb,
}

/// Per-frame orchestration of integrator, color mapper and surface
#[derive(Debug)]
pub struct FrameDriver {
    config: EngineConfig,
    ensemble: Ensemble,
    last_clock_ms: Option<f64>,
    frame: u64,
}

impl FrameDriver {
    /// Create a driver with an empty ensemble; call [`resize`](Self::resize) before the first tick
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let ensemble = Ensemble::new(&config);
        FrameDriver {
            config,
            ensemble,
            last_clock_ms: None,
            frame: 0,
        }
    }

    /// Match the ensemble to the surface size
    ///
    /// Re-initializes (full replacement) when the size differs from the
    /// current ensemble or no ensemble exists yet. Degenerate extents compare
    /// as 0, the same way the ensemble stores them. Returns whether it did.
    pub fn resize<R: Rng>(&mut self, width: f32, height: f32, rng: &mut R) -> bool {
        let requested = (sanitize_extent(width), sanitize_extent(height));
        let unchanged = !self.ensemble.is_empty() && self.ensemble.bounds() == requested;
        if unchanged {
            return false;
        }
        self.ensemble
            .initialize(width, height, self.config.particle_count, rng);
        true
    }

    /// Clamp the elapsed time between two clock readings into `[0, max_frame_dt]` seconds
    #[must_use]
    pub fn frame_dt(&self, previous_ms: Option<f64>, now_ms: f64) -> f32 {
        let Some(previous) = previous_ms else {
            return 0.0;
        };
        let elapsed = ((now_ms - previous) / 1000.0) as f32;
        if elapsed.is_finite() {
            elapsed.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        }
    }

    /// Advance and paint one frame
    ///
    /// # Arguments
    /// * `now_ms` - Monotonic clock reading
    /// * `weather` - Snapshot for this frame (read once, held for the whole frame)
    /// * `toggles` - UI toggles
    /// * `alarm` - Shared alarm timer (may expire during the step)
    /// * `surface` - Where to draw
    pub fn tick<S: DrawSurface + ?Sized>(
        &mut self,
        now_ms: f64,
        weather: &WeatherSnapshot,
        toggles: SceneToggles,
        alarm: &mut AlarmTimer,
        surface: &mut S,
    ) -> FrameStats {
        let dt = self.frame_dt(self.last_clock_ms, now_ms);
        if let Some(previous) = self.last_clock_ms {
            let raw = (now_ms - previous) / 1000.0;
            if raw - f64::from(dt) > 1e-6 {
                debug!("Frame dt clamped from {:.3}s to {:.3}s", raw, dt);
            }
        }
        self.last_clock_ms = Some(now_ms);
        self.frame += 1;

        let mode = motion::step(&mut self.ensemble, weather, toggles, dt, now_ms, alarm);

        let backdrop = background(weather, toggles.night_override);
        let (width, height) = self.ensemble.bounds();
        surface.fill_rect(0.0, 0.0, width, height, backdrop);

        let is_day = weather.effective_is_day(toggles.night_override);
        for particle in &self.ensemble {
            surface.stroke_circle(
                particle.position,
                particle.radius,
                stroke_color(particle, weather, is_day),
            );
        }

        let alarm_ringing = alarm.is_ringing();
        let stats = FrameStats {
            frame: self.frame,
            dt,
            mode,
            alarm_ringing,
            sound_requested: alarm_ringing && toggles.alarm_sound,
            particles: self.ensemble.len(),
            background: backdrop,
        };
        debug!(
            "Frame {}: dt={:.4}s mode={:?} alarm={} particles={}",
            stats.frame, stats.dt, stats.mode, stats.alarm_ringing, stats.particles
        );
        stats
    }

    /// Current ensemble
    #[must_use]
    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    /// Frames ticked so far
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Engine configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
