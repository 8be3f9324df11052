//! Hex / RGB / HSL conversions and lightness adjustments.

use crate::domain::model::{Hsl, Rgb};
use rand::Rng;

/// Canonical `#rrggbb` form of a 3- or 6-digit hex color (`#` optional).
pub fn normalize_hex(hex: &str) -> Option<String> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_lowercase()))
}

pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let normalized = normalize_hex(hex)?;
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&normalized[range], 16).ok();
    Some(Rgb::new(channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h * 60.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let gray = to_byte(l);
        return Rgb::new(gray, gray, gray);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgb::new(
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn shift_lightness(hex: &str, delta: f64) -> Option<String> {
    let mut hsl = rgb_to_hsl(hex_to_rgb(hex)?);
    hsl.l = (hsl.l + delta).clamp(0.0, 100.0);
    Some(rgb_to_hex(hsl_to_rgb(hsl)))
}

/// Raises HSL lightness by `percent` points.
pub fn lighten(hex: &str, percent: f64) -> Option<String> {
    shift_lightness(hex, percent)
}

pub fn darken(hex: &str, percent: f64) -> Option<String> {
    shift_lightness(hex, -percent)
}

/// Black or white, whichever reads better on `hex` (YIQ luminance).
pub fn contrast_color(hex: &str) -> Option<String> {
    let rgb = hex_to_rgb(hex)?;
    let yiq = (u32::from(rgb.r) * 299 + u32::from(rgb.g) * 587 + u32::from(rgb.b) * 114) / 1000;
    Some(if yiq >= 128 { "#000000" } else { "#ffffff" }.to_string())
}

pub fn random_color() -> String {
    let mut rng = rand::thread_rng();
    rgb_to_hex(Rgb::new(rng.gen(), rng.gen(), rng.gen()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_short_and_long_hex() {
        assert_eq!(normalize_hex("#FFF").as_deref(), Some("#ffffff"));
        assert_eq!(normalize_hex("1a2B3c").as_deref(), Some("#1a2b3c"));
        assert_eq!(normalize_hex("#12345"), None);
        assert_eq!(normalize_hex("#ggg"), None);
    }

    #[test]
    fn hex_rgb_round_trip() {
        assert_eq!(hex_to_rgb("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(rgb_to_hex(Rgb::new(255, 128, 0)), "#ff8000");
        assert_eq!(hex_to_rgb("nope"), None);
    }

    #[test]
    fn rgb_hsl_conversions() {
        let red = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert_eq!((red.h, red.s, red.l), (0.0, 100.0, 50.0));

        let teal = rgb_to_hsl(Rgb::new(0, 128, 128));
        assert!((teal.h - 180.0).abs() < 1e-9);
        assert_eq!(hsl_to_rgb(teal), Rgb::new(0, 128, 128));

        let gray = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_eq!(gray.s, 0.0);
        assert_eq!(hsl_to_rgb(gray), Rgb::new(128, 128, 128));

        assert_eq!(hsl_to_rgb(Hsl { h: 240.0, s: 100.0, l: 50.0 }), Rgb::new(0, 0, 255));
    }

    #[test]
    fn lighten_and_darken_clamp() {
        assert_eq!(lighten("#000000", 100.0).as_deref(), Some("#ffffff"));
        assert_eq!(darken("#ff0000", 25.0).as_deref(), Some("#800000"));
        assert_eq!(darken("#ffffff", 200.0).as_deref(), Some("#000000"));
        assert_eq!(lighten("bad", 10.0), None);
    }

    #[test]
    fn contrast_and_random() {
        assert_eq!(contrast_color("#ffff00").as_deref(), Some("#000000"));
        assert_eq!(contrast_color("#000080").as_deref(), Some("#ffffff"));
        assert!(normalize_hex(&random_color()).is_some());
    }
}
