// color.rs - Hex Color Handling
//
// Colors are stored in the config as "#rrggbb" strings. Parsing also accepts
// "#rgb" shorthand and a handful of named colors so hand-edited configs work.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail};

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unit floats (0.0..=1.0), as color pickers report them
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Components as unit floats
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Lowercase "#rrggbb"
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn named(name: &str) -> Option<Self> {
        let rgb = match name.to_ascii_lowercase().as_str() {
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "red" => Self::new(255, 0, 0),
            "green" => Self::new(0, 128, 0),
            "lime" => Self::new(0, 255, 0),
            "blue" => Self::new(0, 0, 255),
            "yellow" => Self::new(255, 255, 0),
            "cyan" => Self::new(0, 255, 255),
            "magenta" => Self::new(255, 0, 255),
            "gray" | "grey" => Self::new(128, 128, 128),
            "orange" => Self::new(255, 165, 0),
            _ => return None,
        };
        Some(rgb)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rgb) = Self::named(s) {
            return Ok(rgb);
        }

        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| anyhow!("color {s:?} is neither a name nor #hex"))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("color {s:?} contains non-hex characters");
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| anyhow!("invalid hex digits {digits:?} in {s:?}"))
        };

        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // "#abc" expands to "#aabbcc"
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => bail!("color {s:?} must have 3 or 6 hex digits"),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
