//! Display colors for map entities.
//!
//! Robots are told apart on screen by color alone, so the color for a name
//! must be stable across runs and across snapshot copies. Rather than store
//! a palette, a color is derived on demand: the name seeds a small PRNG,
//! the PRNG picks a hue, and saturation and lightness are pinned to values
//! that stay readable on a light canvas.

use std::hash::Hasher;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHasher;

/// Saturation used for generated robot colors.
const NAME_SATURATION: f64 = 0.65;
/// Lightness used for generated robot colors.
const NAME_LIGHTNESS: f64 = 0.55;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The stable color for a named entity.
    ///
    /// The same name always yields the same color, on any run and any
    /// platform: `FxHasher` and `SmallRng` are both fully deterministic for
    /// a given seed.
    pub fn for_name(name: &str) -> Self {
        let mut rng = SmallRng::seed_from_u64(name_seed(name));
        let hue = rng.gen_range(0.0..360.0);
        Self::from_hsl(hue, NAME_SATURATION, NAME_LIGHTNESS)
    }

    /// Convert an HSL triple to sRGB.
    ///
    /// `hue` is in degrees and wraps; `saturation` and `lightness` are
    /// clamped to `[0, 1]`.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h {
            h if h < 1.0 => (chroma, x, 0.0),
            h if h < 2.0 => (x, chroma, 0.0),
            h if h < 3.0 => (0.0, chroma, x),
            h if h < 4.0 => (0.0, x, chroma),
            h if h < 5.0 => (x, 0.0, chroma),
            _            => (chroma, 0.0, x),
        };

        let m = l - chroma / 2.0;
        Self {
            r: channel(r1 + m),
            g: channel(g1 + m),
            b: channel(b1 + m),
        }
    }
}

impl std::fmt::Display for Color {
    /// CSS hex form, `#rrggbb`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[inline]
fn channel(v: f64) -> u8 {
    (v * 255.0).round() as u8
}

/// Stable 64-bit seed for a name. `FxHasher` is not DoS-resistant, which is
/// fine here: the hash picks a color, it guards nothing.
fn name_seed(name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(name.as_bytes());
    hasher.finish()
}
