// ABOUTME: Color representation and conversion utilities.
// ABOUTME: Parses hex strings from config and converts sRGB to linear for the GPU.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),

    #[error("Color must have 3, 6 or 8 hex digits: {0}")]
    BadLength(String),

    #[error("Invalid hex digit in color: {0}")]
    BadDigit(String),
}

/// RGBA color, components in 0.0..=1.0 (sRGB encoded)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const RED: Self = Self::from_rgb8(0xef, 0x44, 0x44);
    pub const BLUE: Self = Self::from_rgb8(0x3b, 0x82, 0xf6);
    pub const GREEN: Self = Self::from_rgb8(0x22, 0xc5, 0x5e);
    pub const YELLOW: Self = Self::from_rgb8(0xea, 0xb3, 0x08);
    pub const VIOLET: Self = Self::from_rgb8(0x8b, 0x5c, 0xf6);
    pub const SLATE: Self = Self::from_rgb8(0x4b, 0x55, 0x63);

    /// Lavender highlight shown on a hovered or dragged divider
    pub const LAVENDER: Self = Self::from_rgb8(0xad, 0x9c, 0xff);

    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(s.to_string()));
        }

        let channel = |i: usize, width: usize| -> Result<f32, ColorError> {
            let part = &digits[i * width..(i + 1) * width];
            let value =
                u8::from_str_radix(part, 16).map_err(|_| ColorError::BadDigit(s.to_string()))?;
            // #rgb shorthand doubles each digit: "f" -> "ff"
            let value = if width == 1 { value * 17 } else { value };
            Ok(value as f32 / 255.0)
        };

        match digits.len() {
            3 => Ok(Self::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Self::rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            8 => Ok(Self::rgba(
                channel(0, 2)?,
                channel(1, 2)?,
                channel(2, 2)?,
                channel(3, 2)?,
            )),
            _ => Err(ColorError::BadLength(s.to_string())),
        }
    }

    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if byte(self.a) == 255 {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                byte(self.a)
            )
        }
    }

    /// Linear-light RGBA for an sRGB render target
    pub fn to_linear(&self) -> [f32; 4] {
        let decode = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [decode(self.r), decode(self.g), decode(self.b), self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::SLATE
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_form() {
        let c = Color::from_hex("#ad9cff").unwrap();
        assert_eq!(c, Color::LAVENDER);
        assert_eq!(c.to_hex(), "#ad9cff");
    }

    #[test]
    fn parses_short_form() {
        let c = Color::from_hex("#f00").unwrap();
        assert_eq!(c, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn parses_alpha() {
        let c = Color::from_hex("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 0.001);
        assert_eq!(c.to_hex(), "#00000080");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(Color::from_hex("ad9cff"), Err(ColorError::MissingHash(_))));
        assert!(matches!(Color::from_hex("#ad9c"), Err(ColorError::BadLength(_))));
        assert!(matches!(Color::from_hex("#zz9cff"), Err(ColorError::BadDigit(_))));
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(Color::rgb(0.0, 1.0, 0.0).to_linear(), [0.0, 1.0, 0.0, 1.0]);
        let mid = Color::rgb(0.5, 0.5, 0.5).to_linear();
        assert!(mid[0] > 0.2 && mid[0] < 0.22);
    }
}
