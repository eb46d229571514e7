//! Per-frame motion integration
//!
//! Advances every particle one time step. The motion is composed of:
//!
//! 1. **Phase advance** - common base angular rate, nudged by each particle's speed
//! 2. **Mode term** - sun mode (orbit, thermal rise, recentering) or rain mode (fall, jitter)
//! 3. **Wind drift** - uniform bias along the wind direction
//! 4. **Vibration** - high-frequency shake while the alarm rings
//! 5. **Toroidal wrap** - leaving one edge re-enters at the opposite one
//!
//! Nothing here is random; given the same inputs, [`step`] produces the same
//! positions.

use crate::alarm::AlarmTimer;
use crate::config::SceneToggles;
use crate::core_types::{lerp, Vec2};
use crate::particle::{Ensemble, Particle};
use crate::weather::WeatherSnapshot;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Base angular rate of the phase accumulator (rad/s)
pub const PHASE_RATE: f64 = PI * 0.22;

/// Extra phase rate per unit of particle speed (rad/s)
pub const PHASE_SPEED_GAIN: f64 = 0.02;

/// Rain intensity below which a daytime scene counts as dry
pub const DRY_RAIN_THRESHOLD: f32 = 0.02;

/// Sun mode: horizontal orbit amplitude (px/s per unit of `hx`)
pub const SUN_ORBIT_X: f32 = 22.0;

/// Sun mode: vertical orbit amplitude (px/s per unit of `hy`)
pub const SUN_ORBIT_Y: f32 = 14.0;

/// Sun mode: upward drift at the hottest temperature (px/s)
pub const SUN_RISE: f32 = 26.0;

/// Sun mode: fraction of the canvas height particles are pulled toward
pub const SUN_REST_HEIGHT: f32 = 0.35;

/// Sun mode: mean-reversion rate toward the rest height (1/s)
pub const SUN_RECENTER: f32 = 0.12;

/// Fall speed at the coldest / hottest temperature (px/s)
pub const FALL_SPEED_COLD: f32 = 12.0;
/// See [`FALL_SPEED_COLD`]
pub const FALL_SPEED_HOT: f32 = 65.0;

/// Rain mode: horizontal jitter amplitude (px/s per unit of `hx`)
pub const RAIN_JITTER: f32 = 10.0;

/// Motion regime selected from daylight and rain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionMode {
    /// Dry daylight: orbiting particles rising on thermals
    Sun,
    /// Rain, night or both: particles fall and jitter
    Rain,
}

impl MotionMode {
    /// Pick the regime for a frame
    #[must_use]
    pub fn select(effective_is_day: bool, rain_norm: f32) -> Self {
        if effective_is_day && rain_norm < DRY_RAIN_THRESHOLD {
            MotionMode::Sun
        } else {
            MotionMode::Rain
        }
    }
}

/// Frame-wide quantities derived once from the snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTerms {
    /// Regime for this frame
    pub mode: MotionMode,
    /// Normalized temperature
    pub temp_norm: f32,
    /// Normalized rain
    pub rain_norm: f32,
    /// Normalized wind
    pub wind_norm: f32,
    /// Temperature-driven baseline speed (px/s)
    pub base: f32,
    /// Amplitude of the `hx`/`hy` modulation
    pub amplitude: f32,
    /// Wind displacement per second, already scaled
    pub wind_velocity: Vec2,
    /// Vibration strength while the alarm rings
    pub vibration: f32,
}

impl MotionTerms {
    /// Derive the frame terms from a snapshot and the UI toggles
    #[must_use]
    pub fn new(weather: &WeatherSnapshot, toggles: SceneToggles) -> Self {
        let temp_norm = weather.temp_norm();
        let rain_norm = weather.rain_norm();
        let wind_norm = weather.wind_norm();
        let base = lerp(FALL_SPEED_COLD, FALL_SPEED_HOT, temp_norm);
        let mode = MotionMode::select(weather.effective_is_day(toggles.night_override), rain_norm);

        MotionTerms {
            mode,
            temp_norm,
            rain_norm,
            wind_norm,
            base,
            amplitude: 0.8 + 1.6 * (1.0 - rain_norm),
            wind_velocity: weather.wind_unit() * (wind_norm * base * (0.5 + 1.2 * wind_norm)),
            vibration: 3.5 + 6.0 * rain_norm,
        }
    }
}

/// Advance every particle by `dt` seconds
///
/// # Arguments
/// * `ensemble` - Particles to move in place
/// * `weather` - Snapshot for this frame
/// * `toggles` - UI toggles (night override)
/// * `dt` - Elapsed seconds. Precondition `dt ≥ 0`; callers should also cap it
///   (the frame driver uses `max_frame_dt`, 0.1s by default). Negative or
///   non-finite values integrate as 0.
/// * `clock_ms` - Monotonic clock reading, drives the vibration and alarm expiry
/// * `alarm` - Shared alarm timer; goes idle here once `clock_ms` passes its end
///
/// # Returns
/// The motion regime every particle used this frame.
pub fn step(
    ensemble: &mut Ensemble,
    weather: &WeatherSnapshot,
    toggles: SceneToggles,
    dt: f32,
    clock_ms: f64,
    alarm: &mut AlarmTimer,
) -> MotionMode {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    let terms = MotionTerms::new(weather, toggles);
    let (width, height) = ensemble.bounds();
    let ringing = alarm.is_ringing();

    for particle in ensemble.particles_mut() {
        advance(particle, &terms, dt, height);
        if ringing {
            vibrate(particle, terms.vibration, dt, clock_ms);
        }
        wrap_toroidal(particle, width, height);
    }

    alarm.expire(clock_ms);
    terms.mode
}

/// Phase, mode and wind terms for one particle
fn advance(particle: &mut Particle, terms: &MotionTerms, dt: f32, height: f32) {
    let rate = PHASE_RATE + f64::from(particle.speed) * PHASE_SPEED_GAIN;
    particle.phase += f64::from(dt) * rate;

    let hx = particle.phase.sin() as f32 * terms.amplitude;
    let hy = (particle.phase / PI).cos() as f32 * terms.amplitude;

    match terms.mode {
        MotionMode::Sun => {
            particle.position.x += hx * SUN_ORBIT_X * dt;
            particle.position.y += hy * SUN_ORBIT_Y * dt;
            particle.position.y -= SUN_RISE * terms.temp_norm * dt;
            let rest = SUN_REST_HEIGHT * height;
            particle.position.y += (rest - particle.position.y) * SUN_RECENTER * dt;
        }
        MotionMode::Rain => {
            particle.position.y += terms.base * (0.3 + 2.0 * terms.rain_norm) * dt;
            particle.position.x += hx * RAIN_JITTER * dt;
        }
    }

    particle.position += terms.wind_velocity * dt;
}

/// Alarm shake; the hue offsets the phase so particles do not move in lockstep
fn vibrate(particle: &mut Particle, strength: f32, dt: f32, clock_ms: f64) {
    let seed = f64::from(particle.hue);
    let shake_x = (clock_ms / 35.0 + seed).sin() as f32;
    let shake_y = (clock_ms / 41.0 + seed).cos() as f32;
    particle.position.x += shake_x * strength * dt * 60.0;
    particle.position.y += shake_y * strength * dt * 60.0;
}

/// Re-enter at the opposite edge once the whole circle has left the canvas
pub fn wrap_toroidal(particle: &mut Particle, width: f32, height: f32) {
    let r = particle.radius;
    if particle.position.x > width + r {
        particle.position.x = -r;
    } else if particle.position.x < -r {
        particle.position.x = width + r;
    }
    if particle.position.y > height + r {
        particle.position.y = -r;
    } else if particle.position.y < -r {
        particle.position.y = height + r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            radius: 10.0,
            phase: PI,
            speed: 1.0,
            hue: 90.0,
        }
    }

    fn sunny() -> WeatherSnapshot {
        WeatherSnapshot::new(18.0, 40.0, 0.0, 1.0, 0.0, 0.1, true)
    }

    fn rainy() -> WeatherSnapshot {
        WeatherSnapshot::new(10.0, 90.0, 5.0, 0.0, 0.0, 0.3, true)
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(MotionMode::select(true, 0.0), MotionMode::Sun);
        assert_eq!(MotionMode::select(true, 0.019), MotionMode::Sun);
        assert_eq!(MotionMode::select(true, 0.02), MotionMode::Rain);
        assert_eq!(MotionMode::select(false, 0.0), MotionMode::Rain);
    }

    #[test]
    fn test_night_override_forces_rain_mode() {
        let mut ensemble = Ensemble::with_particles(vec![particle_at(100.0, 100.0)], 400.0, 300.0);
        let mut alarm = AlarmTimer::new();
        let toggles = SceneToggles {
            night_override: true,
            ..SceneToggles::default()
        };
        let mode = step(&mut ensemble, &sunny(), toggles, 1.0 / 60.0, 0.0, &mut alarm);
        assert_eq!(mode, MotionMode::Rain);
    }

    #[test]
    fn test_wrap_all_edges() {
        let mut p = particle_at(411.0, 150.0);
        wrap_toroidal(&mut p, 400.0, 300.0);
        assert_eq!(p.position.x, -10.0);

        let mut p = particle_at(-10.5, 150.0);
        wrap_toroidal(&mut p, 400.0, 300.0);
        assert_eq!(p.position.x, 410.0);

        let mut p = particle_at(200.0, 310.5);
        wrap_toroidal(&mut p, 400.0, 300.0);
        assert_eq!(p.position.y, -10.0);

        let mut p = particle_at(200.0, -11.0);
        wrap_toroidal(&mut p, 400.0, 300.0);
        assert_eq!(p.position.y, 310.0);
    }

    #[test]
    fn test_wrap_leaves_partially_visible_particles() {
        let mut p = particle_at(408.0, -9.0);
        wrap_toroidal(&mut p, 400.0, 300.0);
        assert_eq!(p.position, Vec2::new(408.0, -9.0));
    }

    #[test]
    fn test_rain_mode_falls() {
        let weather = rainy();
        let mut ensemble = Ensemble::with_particles(vec![particle_at(200.0, 100.0)], 400.0, 300.0);
        let mut alarm = AlarmTimer::new();
        let dt = 0.05;
        step(&mut ensemble, &weather, SceneToggles::default(), dt, 0.0, &mut alarm);

        let t = weather.temp_norm();
        let rain = weather.rain_norm();
        let base = lerp(FALL_SPEED_COLD, FALL_SPEED_HOT, t);
        let expected_dy = base * (0.3 + 2.0 * rain) * dt;
        assert_relative_eq!(
            ensemble.particles()[0].position.y,
            100.0 + expected_dy,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_wind_drift_follows_direction() {
        // Night, dry, no jitter influence on y: only the fall and wind move y
        let calm = WeatherSnapshot::new(20.0, 0.0, 0.0, 0.0, 0.0, 0.0, false);
        let windy = WeatherSnapshot::new(20.0, 0.0, 0.0, 12.0, 90.0, 0.0, false);
        let mut a = Ensemble::with_particles(vec![particle_at(200.0, 100.0)], 400.0, 300.0);
        let mut b = a.clone();
        let mut alarm = AlarmTimer::new();
        step(&mut a, &calm, SceneToggles::default(), 0.05, 0.0, &mut alarm);
        step(&mut b, &windy, SceneToggles::default(), 0.05, 0.0, &mut alarm);

        let base = lerp(FALL_SPEED_COLD, FALL_SPEED_HOT, windy.temp_norm());
        let expected = base * (0.5 + 1.2) * 0.05;
        let dy = b.particles()[0].position.y - a.particles()[0].position.y;
        let dx = b.particles()[0].position.x - a.particles()[0].position.x;
        assert_relative_eq!(dy, expected, epsilon = 1e-3);
        assert!(dx.abs() < 1e-3);
    }

    #[test]
    fn test_vibration_only_while_ringing() {
        let weather = rainy();
        let start = Ensemble::with_particles(vec![particle_at(200.0, 100.0)], 400.0, 300.0);
        let mut quiet = start.clone();
        let mut shaking = start.clone();

        let mut idle = AlarmTimer::new();
        let mut ringing = AlarmTimer::new();
        ringing.start(0.0, 10_000.0);

        let clock = 1_234.0;
        let dt = 0.02;
        step(&mut quiet, &weather, SceneToggles::default(), dt, clock, &mut idle);
        step(&mut shaking, &weather, SceneToggles::default(), dt, clock, &mut ringing);

        let vibr = 3.5 + 6.0 * weather.rain_norm();
        let seed = 90.0_f64;
        let expected_dx = (clock / 35.0 + seed).sin() as f32 * vibr * dt * 60.0;
        let expected_dy = (clock / 41.0 + seed).cos() as f32 * vibr * dt * 60.0;
        let q = quiet.particles()[0].position;
        let s = shaking.particles()[0].position;
        assert_relative_eq!(s.x - q.x, expected_dx, epsilon = 1e-3);
        assert_relative_eq!(s.y - q.y, expected_dy, epsilon = 1e-3);
        assert!(ringing.is_ringing());
    }

    #[test]
    fn test_step_expires_alarm() {
        let mut ensemble = Ensemble::with_particles(vec![particle_at(200.0, 100.0)], 400.0, 300.0);
        let mut alarm = AlarmTimer::new();
        alarm.start(0.0, 1_000.0);

        step(&mut ensemble, &sunny(), SceneToggles::default(), 0.016, 999.0, &mut alarm);
        assert!(alarm.is_ringing());
        step(&mut ensemble, &sunny(), SceneToggles::default(), 0.016, 1_000.0, &mut alarm);
        assert!(!alarm.is_ringing());
    }

    #[test]
    fn test_invalid_dt_does_not_move() {
        let start = Ensemble::with_particles(vec![particle_at(200.0, 100.0)], 400.0, 300.0);
        let mut alarm = AlarmTimer::new();
        for dt in [-0.5, f32::NAN, f32::INFINITY, 0.0] {
            let mut ensemble = start.clone();
            step(&mut ensemble, &rainy(), SceneToggles::default(), dt, 0.0, &mut alarm);
            assert_eq!(ensemble.particles(), start.particles(), "dt={dt}");
        }
    }

    #[test]
    fn test_malformed_snapshot_keeps_positions_finite() {
        let nan = f32::NAN;
        let broken = WeatherSnapshot::new(nan, nan, nan, nan, nan, nan, true);
        let mut ensemble = Ensemble::with_particles(vec![particle_at(200.0, 100.0)], 400.0, 300.0);
        let mut alarm = AlarmTimer::new();
        alarm.start(0.0, 5_000.0);
        for frame in 0..120 {
            let clock = f64::from(frame) * 16.0;
            step(&mut ensemble, &broken, SceneToggles::default(), 0.016, clock, &mut alarm);
        }
        let p = ensemble.particles()[0];
        assert!(p.position.x.is_finite() && p.position.y.is_finite());
        assert!(p.phase.is_finite());
    }

    #[test]
    fn test_phase_keeps_advancing_after_days_of_uptime() {
        // About 110 hours at the base rate
        let mut p = particle_at(200.0, 100.0);
        p.phase = 110.0 * 3600.0 * (PHASE_RATE + PHASE_SPEED_GAIN);
        let start_phase = p.phase;
        let mut ensemble = Ensemble::with_particles(vec![p], 400.0, 300.0);
        let mut alarm = AlarmTimer::new();

        let dt = 1.0 / 60.0;
        let mut previous = start_phase;
        for frame in 0..600 {
            let clock = f64::from(frame) * 16.0;
            step(&mut ensemble, &sunny(), SceneToggles::default(), dt, clock, &mut alarm);
            let phase = ensemble.particles()[0].phase;
            assert!(phase > previous, "phase stalled at frame {frame}: {phase}");
            previous = phase;
        }

        let expected = 600.0 * f64::from(dt) * (PHASE_RATE + PHASE_SPEED_GAIN);
        assert_relative_eq!(previous - start_phase, expected, epsilon = 1e-6);
    }
}
