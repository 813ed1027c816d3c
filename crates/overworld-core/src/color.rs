//! Renderer-agnostic colors.
//!
//! Node identity colors come from the world file either as a palette name,
//! a `#rrggbb` hex string or an `[r, g, b]` triple. The state projection
//! darkens completed nodes in HSV space, so [`Rgba`] carries a round-trip
//! through [`Hsv`].

use serde::{Deserialize, Serialize};

/// Linear 0..=1 RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

/// Hue/saturation/value, all in 0..=1 (hue wraps).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const LIGHT_GRAY: Rgba = Rgba::rgb(0.75, 0.75, 0.75);
    pub const GRAY: Rgba = Rgba::rgb(0.5, 0.5, 0.5);
    pub const DARK_GRAY: Rgba = Rgba::rgb(0.25, 0.25, 0.25);
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const GOLD: Rgba = Rgba::rgb(1.0, 0.8, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_hsv(self) -> Hsv {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let h = if delta <= f32::EPSILON {
            0.0
        } else if max == self.r {
            ((self.g - self.b) / delta).rem_euclid(6.0) / 6.0
        } else if max == self.g {
            ((self.b - self.r) / delta + 2.0) / 6.0
        } else {
            ((self.r - self.g) / delta + 4.0) / 6.0
        };
        let s = if max <= f32::EPSILON { 0.0 } else { delta / max };

        Hsv { h, s, v: max }
    }

    pub fn from_hsv(hsv: Hsv, a: f32) -> Self {
        let h = hsv.h.rem_euclid(1.0);
        let c = hsv.v * hsv.s;
        let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
        let m = hsv.v - c;

        let (r, g, b) = match (h * 6.0) as i32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self {
            r: r + m,
            g: g + m,
            b: b + m,
            a,
        }
    }

    /// Multiply the HSV value channel, keeping hue, saturation and alpha.
    pub fn scale_value(self, factor: f32) -> Self {
        let mut hsv = self.to_hsv();
        hsv.v = (hsv.v * factor).clamp(0.0, 1.0);
        Self::from_hsv(hsv, self.a)
    }

    /// Component-wise comparison with a small tolerance.
    pub fn approx_eq(self, other: Rgba) -> bool {
        const TOLERANCE: f32 = 1e-3;
        (self.r - other.r).abs() < TOLERANCE
            && (self.g - other.g).abs() < TOLERANCE
            && (self.b - other.b).abs() < TOLERANCE
            && (self.a - other.a).abs() < TOLERANCE
    }
}

/// Look up a palette color by name.
pub fn named(name: &str) -> Option<Rgba> {
    let color = match name.to_ascii_lowercase().as_str() {
        "white" => Rgba::WHITE,
        "light_gray" | "light_grey" => Rgba::LIGHT_GRAY,
        "gray" | "grey" => Rgba::GRAY,
        "dark_gray" | "dark_grey" => Rgba::DARK_GRAY,
        "black" => Rgba::BLACK,
        "red" => Rgba::rgb(1.0, 0.0, 0.0),
        "orange" => Rgba::rgb(1.0, 0.5, 0.0),
        "yellow" => Rgba::rgb(1.0, 1.0, 0.0),
        "gold" => Rgba::GOLD,
        "olive" => Rgba::rgb(0.6, 0.6, 0.0),
        "lime" => Rgba::rgb(0.5, 1.0, 0.0),
        "green" => Rgba::rgb(0.0, 1.0, 0.0),
        "turquoise" => Rgba::rgb(0.0, 1.0, 0.5),
        "cyan" => Rgba::rgb(0.0, 1.0, 1.0),
        "azure" => Rgba::rgb(0.0, 0.5, 1.0),
        "blue" => Rgba::rgb(0.0, 0.0, 1.0),
        "violet" => Rgba::rgb(0.5, 0.0, 1.0),
        "magenta" => Rgba::rgb(1.0, 0.0, 1.0),
        "pink" => Rgba::rgb(1.0, 0.0, 0.5),
        "brown" => Rgba::rgb(0.647, 0.165, 0.165),
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    Some(Rgba::rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// A color as written in a world file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette name (`"gold"`) or hex string (`"#ffcc00"`).
    Named(String),
    /// Explicit `[r, g, b]` in 0..=1.
    Rgb([f32; 3]),
}

impl ColorSpec {
    /// Resolve to a concrete color. `None` for unknown names or malformed hex.
    pub fn resolve(&self) -> Option<Rgba> {
        match self {
            ColorSpec::Named(name) if name.starts_with('#') => parse_hex(name),
            ColorSpec::Named(name) => named(name),
            ColorSpec::Rgb([r, g, b]) => Some(Rgba::rgb(*r, *g, *b)),
        }
    }

    /// Whether this resolves to the bonus-level gold.
    pub fn is_gold(&self) -> bool {
        self.resolve().is_some_and(|c| c.approx_eq(Rgba::GOLD))
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        ColorSpec::Named(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_round_trip_preserves_color() {
        for color in [
            Rgba::GOLD,
            Rgba::rgb(0.5, 1.0, 0.0),
            Rgba::rgb(0.0, 0.0, 1.0),
            Rgba::rgb(0.6, 0.6, 0.0),
            Rgba::GRAY,
        ] {
            let back = Rgba::from_hsv(color.to_hsv(), color.a);
            assert!(back.approx_eq(color), "{color:?} came back as {back:?}");
        }
    }

    #[test]
    fn scale_value_darkens_without_shifting_hue() {
        let red = Rgba::rgb(1.0, 0.0, 0.0);
        let dark = red.scale_value(0.7);
        assert!(dark.approx_eq(Rgba::rgb(0.7, 0.0, 0.0)));

        let before = Rgba::GOLD.to_hsv();
        let after = Rgba::GOLD.scale_value(0.7).to_hsv();
        assert!((before.h - after.h).abs() < 1e-4);
        assert!((before.s - after.s).abs() < 1e-4);
        assert!((after.v - 0.7).abs() < 1e-4);
    }

    #[test]
    fn resolve_palette_hex_and_triple() {
        assert_eq!(ColorSpec::from("lime").resolve(), Some(Rgba::rgb(0.5, 1.0, 0.0)));
        assert!(
            ColorSpec::from("#ff0000")
                .resolve()
                .unwrap()
                .approx_eq(Rgba::rgb(1.0, 0.0, 0.0))
        );
        assert_eq!(
            ColorSpec::Rgb([0.1, 0.2, 0.3]).resolve(),
            Some(Rgba::rgb(0.1, 0.2, 0.3))
        );
        assert_eq!(ColorSpec::from("chartreuse-ish").resolve(), None);
        assert_eq!(ColorSpec::from("#12345").resolve(), None);
    }

    #[test]
    fn gold_detection_accepts_any_spelling() {
        assert!(ColorSpec::from("gold").is_gold());
        assert!(ColorSpec::from("GOLD").is_gold());
        assert!(ColorSpec::from("#ffcc00").is_gold());
        assert!(!ColorSpec::from("yellow").is_gold());
    }

    #[test]
    fn color_spec_deserializes_untagged() {
        let named: ColorSpec = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(named, ColorSpec::from("red"));
        let triple: ColorSpec = serde_json::from_str("[1.0, 0.5, 0.0]").unwrap();
        assert_eq!(triple, ColorSpec::Rgb([1.0, 0.5, 0.0]));
    }
}
