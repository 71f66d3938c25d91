use std::fmt;
use std::str::FromStr;

use crate::error::{PaintError, PaintResult};

/// One stored pixel of the raster, straight (non-premultiplied) RGBA.
pub type Rgba = image::Rgba<u8>;

/// Swatches offered by the palette, in display order.
pub const PALETTE: [&str; 20] = [
    "#000000", "#ffffff", "#e63946", "#f4a261", "#e9c46a", "#2a9d8f", "#264653", "#457b9d",
    "#a8dadc", "#6d6875", "#c77dff", "#ff6b6b", "#ffd166", "#06d6a0", "#118ab2", "#ef476f",
    "#ffc43d", "#1b998b", "#3a86ff", "#8338ec",
];

/// A paint color: 8-bit RGB plus a compositing alpha in `[0, 1]`.
///
/// The alpha here is separate from the alpha channel stored in the raster;
/// it only controls how strongly the color is blended over what is there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Parse `#RGB` or `#RRGGBB` (hex digits in either case).
    pub fn from_hex(input: &str) -> PaintResult<Self> {
        let invalid = || PaintError::InvalidColorFormat(input.to_owned());

        let digits = input.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let nibble = |i: usize| -> u8 {
            // Every byte is an ASCII hex digit at this point.
            (digits.as_bytes()[i] as char).to_digit(16).unwrap_or(0) as u8
        };

        match digits.len() {
            3 => Ok(Self::rgb(nibble(0) * 17, nibble(1) * 17, nibble(2) * 17)),
            6 => Ok(Self::rgb(
                nibble(0) << 4 | nibble(1),
                nibble(2) << 4 | nibble(3),
                nibble(4) << 4 | nibble(5),
            )),
            _ => Err(invalid()),
        }
    }

    /// The same color with alpha forced into `[0, 1]`. A NaN alpha is
    /// treated as opaque.
    pub fn normalized(self) -> Self {
        let alpha = if self.alpha.is_nan() { 1.0 } else { self.alpha.clamp(0.0, 1.0) };
        Self { alpha, ..self }
    }

    /// Lowercase `#rrggbb`, alpha dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Canonical CSS-style `rgba(r,g,b,a)` with the given alpha.
    pub fn to_rgba_string(&self, alpha: f32) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, clamp_unit(alpha))
    }

    /// The stored pixel this color produces when written without blending.
    pub fn to_pixel(&self) -> Rgba {
        image::Rgba([self.r, self.g, self.b, unit_to_byte(self.alpha)])
    }

    /// The pixel's RGB as an opaque paint color (stored alpha is ignored).
    pub fn from_pixel(pixel: Rgba) -> Self {
        let [r, g, b, _] = pixel.0;
        Self::rgb(r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Serde adapter storing a [`Color`] as `#rrggbb`.
pub mod hex {
    use super::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Alpha-over blend of `src` onto `dst` with strength `src_alpha`.
///
/// Every channel is `src * a + dst * (1 - a)`, rounded and clamped; the
/// source contributes a fully opaque alpha channel.
pub fn composite(dst: Rgba, src: Color, src_alpha: f32) -> Rgba {
    let a = clamp_unit(src_alpha);
    let blend = |s: u8, d: u8| -> u8 {
        let out = s as f32 * a + d as f32 * (1.0 - a);
        out.round().clamp(0.0, 255.0) as u8
    };

    let [dr, dg, db, da] = dst.0;
    image::Rgba([
        blend(src.r, dr),
        blend(src.g, dg),
        blend(src.b, db),
        blend(255, da),
    ])
}

/// Destination-out with strength `amount`: scales the stored alpha down,
/// and a pixel that ends fully transparent is zeroed.
pub fn erase(dst: Rgba, amount: f32) -> Rgba {
    let a = clamp_unit(amount);
    let [r, g, b, da] = dst.0;
    let alpha = (da as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
    if alpha == 0 {
        image::Rgba([0, 0, 0, 0])
    } else {
        image::Rgba([r, g, b, alpha])
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

fn unit_to_byte(value: f32) -> u8 {
    (clamp_unit(value) * 255.0).round() as u8
}
