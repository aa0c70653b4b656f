use crate::{
    foundation::core::PixelRect,
    foundation::error::{BoothError, BoothResult},
    layout::model::Layout,
};

/// Fixed spacing constants of a composite, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub padding: u32,
    pub spacing: u32,
    /// Height reserved at the bottom for the caption.
    pub caption_band: u32,
    pub caption_font_px: u32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            padding: 40,
            spacing: 20,
            caption_band: 120,
            caption_font_px: 40,
        }
    }
}

impl LayoutMetrics {
    /// Default metrics multiplied by a display density, truncated to whole pixels.
    pub fn scaled(density: f32) -> BoothResult<Self> {
        if !density.is_finite() || density <= 0.0 {
            return Err(BoothError::validation(format!(
                "density must be finite and > 0, got {density}"
            )));
        }
        let d = Self::default();
        let s = |v: u32| (v as f32 * density) as u32;
        Ok(Self {
            padding: s(d.padding),
            spacing: s(d.spacing),
            caption_band: s(d.caption_band),
            caption_font_px: s(d.caption_font_px),
        })
    }
}

/// Canvas size and slot placement for one composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub width: u32,
    pub height: u32,
    /// One slot per photo, row-major.
    pub slots: Vec<PixelRect>,
    pub caption_band: PixelRect,
}

impl CanvasGeometry {
    pub fn compute(
        layout: Layout,
        photo_width: u32,
        photo_height: u32,
        metrics: &LayoutMetrics,
    ) -> BoothResult<Self> {
        if photo_width == 0 || photo_height == 0 {
            return Err(BoothError::validation("photo dimensions must be > 0"));
        }
        let (cols, rows) = layout.grid();
        let overflow = || BoothError::validation("canvas size overflows u32");
        let span = |count: u32, size: u32| -> Option<u32> {
            size.checked_mul(count)?
                .checked_add(metrics.spacing.checked_mul(count - 1)?)?
                .checked_add(metrics.padding.checked_mul(2)?)
        };
        let width = span(cols, photo_width).ok_or_else(overflow)?;
        let height = span(rows, photo_height)
            .and_then(|h| h.checked_add(metrics.caption_band))
            .ok_or_else(overflow)?;

        let mut slots = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                slots.push(PixelRect {
                    x: metrics.padding + col * (photo_width + metrics.spacing),
                    y: metrics.padding + row * (photo_height + metrics.spacing),
                    width: photo_width,
                    height: photo_height,
                });
            }
        }

        Ok(Self {
            width,
            height,
            slots,
            caption_band: PixelRect {
                x: 0,
                y: height - metrics.caption_band,
                width,
                height: metrics.caption_band,
            },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
