use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Clamp an opacity to `[0, 1]`. NaN becomes fully transparent.
fn unit_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

fn deserialize_alpha<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(unit_alpha)
}

/// An opaque base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an opacity, clamped to `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: unit_alpha(alpha),
        }
    }
}

/// RGBA color. Formats as a CSS `rgba(...)` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Clamped to `[0, 1]` when read from a file.
    #[serde(deserialize_with = "deserialize_alpha")]
    pub a: f64,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// The game's color set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Base for the grid, trail, HUD and text. Opacity is chosen per use.
    pub primary: Rgb,
    pub player: Rgba,
    pub star: Rgba,
    pub background: Rgba,
}

impl Palette {
    pub fn primary(&self, opacity: f64) -> Rgba {
        self.primary.with_alpha(opacity)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb::new(200, 160, 230),
            player: Rgba::opaque(200, 160, 230),
            star: Rgba::opaque(250, 130, 130),
            background: Rgba::opaque(0, 0, 34),
        }
    }
}
