//! Colorspace conversions and perceptual distance.
//!
//! Conversions go through `palette`: sRGB is decoded to linear light, then to
//! XYZ (D65) and CIE-LAB. Distance is CIE76 ΔE, the plain Euclidean distance
//! in LAB space.

use palette::{convert::FromColorUnclamped, Hsl, Lab, Srgb};
use serde::{Deserialize, Serialize};

use crate::types::Rgb;

/// HSL with hue in degrees `[0, 360)` and saturation/lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// CIE-LAB under D65.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabColor {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

fn to_srgb(rgb: Rgb) -> Srgb {
    Srgb::new(
        rgb.r as f32 / 255.0,
        rgb.g as f32 / 255.0,
        rgb.b as f32 / 255.0,
    )
}

fn from_srgb(srgb: Srgb) -> Rgb {
    let clamp = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb::new(clamp(srgb.red), clamp(srgb.green), clamp(srgb.blue))
}

pub fn rgb_to_hsl(rgb: Rgb) -> HslColor {
    let hsl: Hsl = Hsl::from_color_unclamped(to_srgb(rgb));
    let hue = hsl.hue.into_positive_degrees();
    HslColor {
        // Achromatic colors come back with an undefined hue; pin it to 0.
        hue: if hue.is_finite() && hue < 360.0 { hue } else { 0.0 },
        saturation: hsl.saturation.clamp(0.0, 1.0),
        lightness: hsl.lightness.clamp(0.0, 1.0),
    }
}

pub fn hsl_to_rgb(hsl: HslColor) -> Rgb {
    let hsl: Hsl = Hsl::new(
        hsl.hue.rem_euclid(360.0),
        hsl.saturation.clamp(0.0, 1.0),
        hsl.lightness.clamp(0.0, 1.0),
    );
    from_srgb(Srgb::from_color_unclamped(hsl))
}

pub fn rgb_to_lab(rgb: Rgb) -> LabColor {
    let lab: Lab = Lab::from_color_unclamped(to_srgb(rgb));
    LabColor {
        l: lab.l,
        a: lab.a,
        b: lab.b,
    }
}

pub fn lab_to_rgb(lab: LabColor) -> Rgb {
    let lab: Lab = Lab::new(lab.l, lab.a, lab.b);
    from_srgb(Srgb::from_color_unclamped(lab))
}

fn lab_distance2(a: LabColor, b: LabColor) -> f32 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    dl * dl + da * da + db * db
}

/// CIE76 ΔE between two sRGB colors. 0 for identical colors; roughly 2.3 is a
/// just-noticeable difference.
pub fn perceptual_distance(a: Rgb, b: Rgb) -> f32 {
    lab_distance2(rgb_to_lab(a), rgb_to_lab(b)).sqrt()
}

/// Coarse hue families used to fill the semantic color slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HueBand {
    Red,
    Yellow,
    Green,
    Blue,
}

/// Classify a hue angle. Hues between the bands (orange, cyan, purple,
/// magenta) return `None`.
pub fn hue_band(hue: f32) -> Option<HueBand> {
    let hue = hue.rem_euclid(360.0);
    if !(15.0..345.0).contains(&hue) {
        Some(HueBand::Red)
    } else if (30.0..70.0).contains(&hue) {
        Some(HueBand::Yellow)
    } else if (90.0..165.0).contains(&hue) {
        Some(HueBand::Green)
    } else if (190.0..250.0).contains(&hue) {
        Some(HueBand::Blue)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn hsl_of_primaries() {
        let red = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert!(close(red.hue, 0.0, 0.5));
        assert!(close(red.saturation, 1.0, 1e-4));
        assert!(close(red.lightness, 0.5, 1e-4));

        let blue = rgb_to_hsl(Rgb::new(0, 0, 255));
        assert!(close(blue.hue, 240.0, 0.5));

        let grey = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert!(close(grey.saturation, 0.0, 1e-4));
        assert!(close(grey.hue, 0.0, 1e-4));
    }

    #[test]
    fn hsl_round_trips_through_rgb() {
        for rgb in [
            Rgb::new(124, 58, 237),
            Rgb::new(16, 185, 129),
            Rgb::new(250, 250, 249),
        ] {
            assert_eq!(hsl_to_rgb(rgb_to_hsl(rgb)), rgb);
        }
    }

    #[test]
    fn lab_of_white_and_black() {
        let white = rgb_to_lab(Rgb::new(255, 255, 255));
        assert!(close(white.l, 100.0, 0.1));
        assert!(close(white.a, 0.0, 0.1));
        assert!(close(white.b, 0.0, 0.1));

        let black = rgb_to_lab(Rgb::new(0, 0, 0));
        assert!(close(black.l, 0.0, 0.1));
        assert_eq!(lab_to_rgb(black), Rgb::new(0, 0, 0));
    }

    #[test]
    fn perceptual_distance_is_small_for_near_colors() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(perceptual_distance(red, red), 0.0);
        assert!(perceptual_distance(red, Rgb::new(255, 1, 1)) < 10.0);
        assert!(perceptual_distance(red, Rgb::new(0, 0, 255)) > 100.0);
        assert!(close(
            perceptual_distance(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)),
            100.0,
            0.1
        ));
    }

    #[test]
    fn hue_bands_cover_fixed_ranges() {
        assert_eq!(hue_band(0.0), Some(HueBand::Red));
        assert_eq!(hue_band(350.0), Some(HueBand::Red));
        assert_eq!(hue_band(45.0), Some(HueBand::Yellow));
        assert_eq!(hue_band(120.0), Some(HueBand::Green));
        assert_eq!(hue_band(220.0), Some(HueBand::Blue));
        assert_eq!(hue_band(20.0), None);
        assert_eq!(hue_band(180.0), None);
        assert_eq!(hue_band(270.0), None);
        assert_eq!(hue_band(-10.0), Some(HueBand::Red));
    }
}
