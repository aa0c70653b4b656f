use crate::{
    buffer::pixel::PixelBuffer,
    foundation::core::Rgba8,
    foundation::error::{BoothError, BoothResult},
};

/// Arrangement of photos on the composite canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Single,
    #[serde(rename = "strip_1x2")]
    Strip1x2,
    #[serde(rename = "strip_1x3")]
    Strip1x3,
    #[serde(rename = "strip_1x4")]
    Strip1x4,
    #[default]
    #[serde(rename = "grid_2x2")]
    Grid2x2,
}

impl Layout {
    pub const ALL: [Layout; 5] = [
        Layout::Single,
        Layout::Strip1x2,
        Layout::Strip1x3,
        Layout::Strip1x4,
        Layout::Grid2x2,
    ];

    pub fn required_photo_count(self) -> usize {
        match self {
            Layout::Single => 1,
            Layout::Strip1x2 => 2,
            Layout::Strip1x3 => 3,
            Layout::Strip1x4 | Layout::Grid2x2 => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::Single => "single",
            Layout::Strip1x2 => "strip_1x2",
            Layout::Strip1x3 => "strip_1x3",
            Layout::Strip1x4 => "strip_1x4",
            Layout::Grid2x2 => "grid_2x2",
        }
    }

    /// `(columns, rows)` of photo slots.
    pub fn grid(self) -> (u32, u32) {
        match self {
            Layout::Grid2x2 => (2, 2),
            other => (1, other.required_photo_count() as u32),
        }
    }

    pub fn check_count(self, actual: usize) -> BoothResult<()> {
        let expected = self.required_photo_count();
        if actual != expected {
            return Err(BoothError::WrongPhotoCount {
                layout: self.name().to_owned(),
                expected,
                actual,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePattern {
    #[default]
    Solid,
    /// Vertical two-color linear gradient.
    Gradient,
    Dots,
    /// Vertical stripes.
    Stripes,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub background_color: Rgba8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<Rgba8>,
    #[serde(default)]
    pub pattern: ThemePattern,
}

impl Theme {
    fn builtin(id: &str, name: &str, bg: u32, accent: Option<u32>, pattern: ThemePattern) -> Self {
        let rgb = |v: u32| Rgba8::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8);
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            background_color: rgb(bg),
            accent_color: accent.map(rgb),
            pattern,
        }
    }

    /// Accent used by the pattern when none is set.
    pub fn effective_accent(&self) -> Rgba8 {
        match (self.accent_color, self.pattern) {
            (Some(c), _) => c,
            (None, ThemePattern::Gradient | ThemePattern::Solid) => self.background_color,
            (None, ThemePattern::Dots | ThemePattern::Stripes) => Rgba8::WHITE,
        }
    }
}

/// Built-in frame themes in display order.
pub fn builtin_themes() -> Vec<Theme> {
    use ThemePattern::*;
    vec![
        Theme::builtin("classic_white", "Classic White", 0xFFFFFF, None, Solid),
        Theme::builtin("retro_beige", "Retro Beige", 0xF5E6D3, None, Solid),
        Theme::builtin("sunset", "Sunset", 0xFF6B6B, Some(0xFFD93D), Gradient),
        Theme::builtin("ocean", "Ocean", 0x4ECDC4, Some(0x1A535C), Gradient),
        Theme::builtin("pastel_pink", "Pastel Pink", 0xFFB6C1, Some(0xFFC0CB), Dots),
        Theme::builtin("neon_purple", "Neon Purple", 0x9D4EDD, Some(0xC77DFF), Gradient),
        Theme::builtin("mint", "Mint Green", 0x98FF98, None, Solid),
        Theme::builtin("dark_vintage", "Dark Vintage", 0x2C2C2C, Some(0x404040), Stripes),
    ]
}

pub fn theme_by_id(id: &str) -> BoothResult<Theme> {
    builtin_themes()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| BoothError::validation(format!("unknown theme id \"{id}\"")))
}

/// What actually gets painted behind the photos.
#[derive(Clone, Debug, PartialEq)]
pub enum Background<'a> {
    Image(&'a PixelBuffer),
    Theme(&'a Theme),
    White,
}

impl Background<'_> {
    pub fn is_image(&self) -> bool {
        matches!(self, Background::Image(_))
    }
}

/// Pick the background for one composition: an image beats a theme, and
/// with neither the canvas is flat white.
pub fn resolve_background<'a>(
    image: Option<&'a PixelBuffer>,
    theme: Option<&'a Theme>,
) -> Background<'a> {
    match (image, theme) {
        (Some(img), _) => Background::Image(img),
        (None, Some(t)) => Background::Theme(t),
        (None, None) => Background::White,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
