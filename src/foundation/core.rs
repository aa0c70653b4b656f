use crate::foundation::error::{BoothError, BoothResult};

pub use kurbo::{Affine, Point, Vec2};

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as `#RRGGBB` when opaque and `#AARRGGBB` otherwise, the same
/// forms accepted by [`Rgba8::from_hex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Android's `LTGRAY`, used for soft drop shadows.
    pub const LIGHT_GRAY: Self = Self::rgb(0xCC, 0xCC, 0xCC);

    /// Construct from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from `[r, g, b, a]`.
    pub const fn from_array(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    /// Premultiplied `[r, g, b, a]`.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { ((u16::from(c) * a + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }

    /// Parse `#RRGGBB` or `#AARRGGBB` (leading `#` optional).
    pub fn from_hex(s: &str) -> BoothResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let parse = |i: usize| -> BoothResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| BoothError::validation(format!("invalid hex color '{s}'")))
        };
        if !hex.is_ascii() {
            return Err(BoothError::validation(format!("invalid hex color '{s}'")));
        }
        match hex.len() {
            6 => Ok(Self::rgb(parse(0)?, parse(2)?, parse(4)?)),
            8 => Ok(Self::new(parse(2)?, parse(4)?, parse(6)?, parse(0)?)),
            _ => Err(BoothError::validation(format!(
                "hex color '{s}' must be #RRGGBB or #AARRGGBB"
            ))),
        }
    }

    /// Hex form accepted by [`Rgba8::from_hex`].
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.a, self.r, self.g, self.b
            )
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = BoothError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        f64::from(self.x) + f64::from(self.width) / 2.0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        f64::from(self.y) + f64::from(self.height) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
