//! Color mapping from weather to pixels
//!
//! Both mappings are pure: identical inputs give identical colors.

use crate::core_types::{clamp01, lerp, lerp_rgb};
use crate::particle::Particle;
use crate::weather::WeatherSnapshot;
use serde::{Deserialize, Serialize};

/// Background used whenever the night override is on
pub const NIGHT_OVERRIDE_BACKGROUND: Rgb = Rgb::new(6, 8, 18);

/// Sky tint with no blue component (overcast or night)
const SKY_LOW: [f32; 3] = [14.0, 18.0, 34.0];
/// Sky tint of a clear day
const SKY_HIGH: [f32; 3] = [92.0, 150.0, 214.0];
/// Haze the sky fades into at night
const HAZE_NIGHT: [f32; 3] = [38.0, 42.0, 54.0];
/// Haze the sky fades into by day (fog, cloud)
const HAZE_DAY: [f32; 3] = [178.0, 184.0, 192.0];

/// Stroke saturation (%)
const STROKE_SATURATION: f32 = 70.0;
/// Stroke opacity
const STROKE_ALPHA: f32 = 0.9;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from channels
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Round float channels (0-255) to a color
    fn from_channels(channels: [f32; 3]) -> Self {
        Rgb::new(
            to_byte(channels[0]),
            to_byte(channels[1]),
            to_byte(channels[2]),
        )
    }

    /// CSS hex notation, e.g. `#0a1b2c`
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSL color with alpha, as handed to the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    /// Hue in degrees `[0, 360)`
    pub hue: f32,
    /// Saturation in percent
    pub saturation: f32,
    /// Lightness in percent
    pub lightness: f32,
    /// Opacity (0-1)
    pub alpha: f32,
}

impl Hsla {
    /// Convert to RGB plus alpha
    ///
    /// Standard HSL → RGB conversion (CSS Color 3). Out-of-range saturation
    /// and lightness are clamped.
    #[must_use]
    pub fn to_rgba(self) -> (Rgb, f32) {
        let sat = clamp01(self.saturation / 100.0);
        let light = clamp01(self.lightness / 100.0);
        let hue = self.hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * light - 1.0).abs()) * sat;
        let second = chroma * (1.0 - (hue % 2.0 - 1.0).abs());
        let lift = light - chroma / 2.0;

        let (red, green, blue) = match hue as u32 {
            0 => (chroma, second, 0.0),
            1 => (second, chroma, 0.0),
            2 => (0.0, chroma, second),
            3 => (0.0, second, chroma),
            4 => (second, 0.0, chroma),
            _ => (chroma, 0.0, second),
        };

        let rgb = Rgb::from_channels([
            (red + lift) * 255.0,
            (green + lift) * 255.0,
            (blue + lift) * 255.0,
        ]);
        (rgb, clamp01(self.alpha))
    }

    /// CSS `hsla()` notation
    #[must_use]
    pub fn to_css(self) -> String {
        format!(
            "hsla({:.1}, {:.0}%, {:.1}%, {:.2})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Background fill for the frame
///
/// With the night override set this is [`NIGHT_OVERRIDE_BACKGROUND`].
/// Otherwise a sky tint (blue by clear day) is faded into haze by fog, cloud
/// and darkness.
#[must_use]
pub fn background(weather: &WeatherSnapshot, night_override: bool) -> Rgb {
    if night_override {
        return NIGHT_OVERRIDE_BACKGROUND;
    }

    let fog = weather.fog_norm();
    let cloud = weather.cloud_norm();
    let day = if weather.is_day { 1.0 } else { 0.0 };

    let grey = clamp01(0.10 + 0.65 * fog + 0.25 * cloud + (1.0 - day) * 0.35);
    let blue = clamp01(day * (1.0 - 0.6 * cloud));

    let tint = lerp_rgb(SKY_LOW, SKY_HIGH, blue);
    let haze = lerp_rgb(HAZE_NIGHT, HAZE_DAY, day);
    Rgb::from_channels(lerp_rgb(tint, haze, grey))
}

/// Stroke color of one particle
///
/// Cold scenes lean blue/violet, hot scenes warm; each particle's hue offset
/// spreads the ensemble around the wheel. Night lowers the lightness band.
#[must_use]
pub fn stroke_color(
    particle: &Particle,
    weather: &WeatherSnapshot,
    effective_is_day: bool,
) -> Hsla {
    let t = weather.temp_norm();
    let offset = if particle.hue.is_finite() { particle.hue } else { 0.0 };
    let hue = (lerp(220.0, 25.0, t) + offset).rem_euclid(360.0);
    let lightness = if effective_is_day {
        lerp(52.0, 72.0, t)
    } else {
        lerp(40.0, 58.0, t)
    };

    Hsla {
        hue: if hue >= 360.0 { 0.0 } else { hue },
        saturation: STROKE_SATURATION,
        lightness,
        alpha: STROKE_ALPHA,
    }
}

fn to_byte(channel: f32) -> u8 {
    if channel.is_nan() {
        0
    } else {
        channel.round().clamp(0.0, 255.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Vec2;

    fn particle_with_hue(hue: f32) -> Particle {
        Particle {
            position: Vec2::new(0.0, 0.0),
            radius: 12.0,
            phase: 0.0,
            speed: 1.0,
            hue,
        }
    }

    fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Hsla {
        Hsla {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    #[test]
    fn test_night_override_background_is_fixed() {
        let stormy = WeatherSnapshot::new(5.0, 100.0, 8.0, 10.0, 0.0, 1.0, true);
        assert_eq!(background(&stormy, true), NIGHT_OVERRIDE_BACKGROUND);
        assert_eq!(background(&WeatherSnapshot::default(), true), NIGHT_OVERRIDE_BACKGROUND);
    }

    #[test]
    fn test_clear_day_background() {
        // grey = 0.10, blue = 1.0
        let clear = WeatherSnapshot::new(20.0, 0.0, 0.0, 0.0, 0.0, 0.0, true);
        let expected = Rgb::new(
            (92.0_f32 + (178.0 - 92.0) * 0.1).round() as u8,
            (150.0_f32 + (184.0 - 150.0) * 0.1).round() as u8,
            (214.0_f32 + (192.0 - 214.0) * 0.1).round() as u8,
        );
        assert_eq!(background(&clear, false), expected);
    }

    #[test]
    fn test_fog_greys_out_the_sky() {
        let clear = WeatherSnapshot::new(20.0, 0.0, 0.0, 0.0, 0.0, 0.0, true);
        let foggy = WeatherSnapshot::new(20.0, 0.0, 0.0, 0.0, 0.0, 1.0, true);
        let clear_bg = background(&clear, false);
        let foggy_bg = background(&foggy, false);
        // Haze is less saturated: the blue-red gap shrinks
        let gap = |c: Rgb| i32::from(c.b) - i32::from(c.r);
        assert!(gap(foggy_bg) < gap(clear_bg));
    }

    #[test]
    fn test_night_is_darker_than_day() {
        let day = WeatherSnapshot::new(20.0, 30.0, 0.0, 0.0, 0.0, 0.2, true);
        let night = WeatherSnapshot { is_day: false, ..day };
        let luma = |c: Rgb| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
        assert!(luma(background(&night, false)) < luma(background(&day, false)));
    }

    #[test]
    fn test_stroke_hue_tracks_temperature() {
        let p = particle_with_hue(0.0);
        let cold = WeatherSnapshot::new(-30.0, 0.0, 0.0, 0.0, 0.0, 0.0, true);
        let hot = WeatherSnapshot::new(60.0, 0.0, 0.0, 0.0, 0.0, 0.0, true);
        assert_eq!(stroke_color(&p, &cold, true).hue, 220.0);
        assert_eq!(stroke_color(&p, &hot, true).hue, 25.0);
    }

    #[test]
    fn test_stroke_hue_wraps_with_offset() {
        let p = particle_with_hue(200.0);
        let cold = WeatherSnapshot::new(-15.0, 0.0, 0.0, 0.0, 0.0, 0.0, true);
        assert_eq!(stroke_color(&p, &cold, true).hue, 60.0);
    }

    #[test]
    fn test_stroke_lightness_bands() {
        let p = particle_with_hue(10.0);
        let cold = WeatherSnapshot::new(-15.0, 0.0, 0.0, 0.0, 0.0, 0.0, true);
        let hot = WeatherSnapshot::new(50.0, 0.0, 0.0, 0.0, 0.0, 0.0, true);
        assert_eq!(stroke_color(&p, &cold, true).lightness, 52.0);
        assert_eq!(stroke_color(&p, &hot, true).lightness, 72.0);
        assert_eq!(stroke_color(&p, &cold, false).lightness, 40.0);
        assert_eq!(stroke_color(&p, &hot, false).lightness, 58.0);

        let color = stroke_color(&p, &hot, true);
        assert_eq!(color.saturation, 70.0);
        assert_eq!(color.alpha, 0.9);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let weather = WeatherSnapshot::new(18.0, 40.0, 0.0, 1.0, 0.0, 0.1, true);
        let p = particle_with_hue(123.4);
        assert_eq!(background(&weather, false), background(&weather, false));
        assert_eq!(stroke_color(&p, &weather, true), stroke_color(&p, &weather, true));
    }

    #[test]
    fn test_malformed_snapshot_degrades_gracefully() {
        let broken = WeatherSnapshot::new(f32::NAN, f32::NAN, f32::NAN, 0.0, 0.0, f32::NAN, true);
        let bg = background(&broken, false);
        let clear = WeatherSnapshot::new(-15.0, 0.0, 0.0, 0.0, 0.0, 0.0, true);
        assert_eq!(bg, background(&clear, false));
        let stroke = stroke_color(&particle_with_hue(f32::NAN), &broken, true);
        assert!(stroke.hue.is_finite() && stroke.lightness.is_finite());
    }

    #[test]
    fn test_hsl_conversion() {
        let red = hsla(0.0, 100.0, 50.0, 1.0);
        assert_eq!(red.to_rgba(), (Rgb::new(255, 0, 0), 1.0));

        let blue = hsla(240.0, 100.0, 50.0, 0.5);
        assert_eq!(blue.to_rgba(), (Rgb::new(0, 0, 255), 0.5));

        let grey = hsla(90.0, 0.0, 50.0, 1.0);
        assert_eq!(grey.to_rgba().0, Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_css_notation() {
        assert_eq!(Rgb::new(10, 27, 44).to_hex(), "#0a1b2c");
        let c = hsla(25.0, 70.0, 72.0, 0.9);
        assert_eq!(c.to_css(), "hsla(25.0, 70%, 72.0%, 0.90)");
    }
}
