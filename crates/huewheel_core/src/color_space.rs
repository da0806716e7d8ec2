//! Conversions between RGB, HSV and hex color representations.
//!
//! [`Hsv`] is the canonical representation used by the picker. [`Rgb`] and the
//! `#rrggbb` hex string are derived from it and only ever flow in the other
//! direction as construction input.
//!
//! All conversions are total: out-of-range HSV components are normalized and
//! malformed hex strings yield `None` rather than panicking.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::{HUE_MAX, RGB_MAX, SV_MAX};
use crate::error::ColorError;

/// Wrap a hue into `[0, 360)`. Non-finite input becomes 0.
pub fn normalize_hue(h: f32) -> f32 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(HUE_MAX);
    // rem_euclid of a tiny negative number rounds up to exactly 360.0,
    // and -0.0 stays negative
    if wrapped >= HUE_MAX || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamp a saturation/value component into `[0, 100]`. Non-finite input becomes 0.
pub fn clamp_percent(x: f32) -> f32 {
    if x.is_finite() {
        x.clamp(0.0, SV_MAX)
    } else {
        0.0
    }
}

// =============================================================================
// Hsv
// =============================================================================

/// A hue/saturation/value color.
///
/// Hue is in degrees `[0, 360)`, saturation and value are percentages
/// `[0, 100]`. Every constructor normalizes, so a `Hsv` is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsv {
    h: f32,
    s: f32,
    v: f32,
}

impl Hsv {
    /// White: no saturation, full value.
    pub const WHITE: Hsv = Hsv {
        h: 0.0,
        s: 0.0,
        v: SV_MAX,
    };

    /// Create a color, wrapping the hue and clamping saturation and value.
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_percent(s),
            v: clamp_percent(v),
        }
    }

    /// Parse a `#rrggbb` string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        hex_to_hsv(hex)
    }

    pub fn h(&self) -> f32 {
        self.h
    }

    pub fn s(&self) -> f32 {
        self.s
    }

    pub fn v(&self) -> f32 {
        self.v
    }

    pub fn with_hue(self, h: f32) -> Self {
        Self::new(h, self.s, self.v)
    }

    pub fn with_saturation(self, s: f32) -> Self {
        Self::new(self.h, s, self.v)
    }

    pub fn with_value(self, v: f32) -> Self {
        Self::new(self.h, self.s, v)
    }

    /// The display swatch: same hue and saturation at full value.
    pub fn swatch(self) -> Self {
        self.with_value(SV_MAX)
    }

    pub fn to_rgb(self) -> Rgb {
        let sector = self.h / 60.0;
        let s = self.s / SV_MAX;
        let v = self.v / SV_MAX;

        let i = sector.floor();
        let f = sector - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match (i as u32) % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Rgb::new(to_byte(r), to_byte(g), to_byte(b))
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

impl Default for Hsv {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Rgb> for Hsv {
    fn from(rgb: Rgb) -> Self {
        rgb_to_hsv(rgb.r, rgb.g, rgb.b)
    }
}

fn to_byte(unit: f32) -> u8 {
    (unit * RGB_MAX).round().clamp(0.0, RGB_MAX) as u8
}

// =============================================================================
// Rgb
// =============================================================================

/// An 8-bit RGB triple. Internal to the picker; only hex crosses the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsv(self) -> Hsv {
        Hsv::from(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Parse `#rrggbb` with case-insensitive hex digits.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidHex {
            input: input.to_string(),
        };

        let digits = input.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel =
            |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).map_err(|_| invalid());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

// =============================================================================
// Free-standing conversions
// =============================================================================

/// Decompose an RGB triple into HSV.
///
/// Hue is rounded to whole degrees, saturation and value to whole percent.
/// Achromatic input (all channels equal) has hue 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let (rf, gf, bf) = (
        f32::from(r) / RGB_MAX,
        f32::from(g) / RGB_MAX,
        f32::from(b) / RGB_MAX,
    );
    let max_f = f32::from(max) / RGB_MAX;
    let chroma = f32::from(max - min) / RGB_MAX;

    let saturation = if max == 0 { 0.0 } else { chroma / max_f };

    let sextant = if max == min {
        0.0
    } else if max == r {
        (gf - bf) / chroma + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (bf - rf) / chroma + 2.0
    } else {
        (rf - gf) / chroma + 4.0
    };

    Hsv::new(
        (sextant * 60.0).round(),
        (saturation * SV_MAX).round(),
        (max_f * SV_MAX).round(),
    )
}

/// Convert HSV components to RGB. The hue is wrapped before use.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    Hsv::new(h, s, v).to_rgb()
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    Rgb::new(r, g, b).to_hex()
}

/// Parse `#rrggbb`, returning `None` for anything else so the caller can keep
/// its last valid color.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    hex.parse().ok()
}

pub fn hsv_to_hex(h: f32, s: f32, v: f32) -> String {
    hsv_to_rgb(h, s, v).to_hex()
}

pub fn hex_to_hsv(hex: &str) -> Option<Hsv> {
    hex_to_rgb(hex).map(Hsv::from)
}
