use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    buffer::pixel::PixelBuffer,
    foundation::core::{Affine, Rgba8},
    foundation::error::BoothResult,
    text::renderer::{TextRenderer, TextShadow, TextStyle},
};

static NEXT_OVERLAY_ID: AtomicU64 = AtomicU64::new(1);

const STICKER_SIZE_PX: f32 = 80.0;
const TEXT_SIZE_PX: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// Emoji or glyph sticker drawn in black.
    Sticker,
    /// White caption text over a dark halo.
    Text,
}

impl OverlayKind {
    pub fn style(self) -> TextStyle {
        match self {
            OverlayKind::Sticker => TextStyle::plain(STICKER_SIZE_PX, Rgba8::BLACK),
            OverlayKind::Text => {
                TextStyle::plain(TEXT_SIZE_PX, Rgba8::WHITE).with_shadow(TextShadow::HALO)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickerOverlay {
    pub id: u64,
    pub kind: OverlayKind,
    pub content: String,
    pub offset_x: f32,
    pub offset_y: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub rotation_degrees: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl StickerOverlay {
    /// New overlay at the origin with a process-unique id.
    pub fn new(kind: OverlayKind, content: impl Into<String>) -> Self {
        Self {
            id: NEXT_OVERLAY_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            content: content.into(),
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            rotation_degrees: 0.0,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Translate, then rotate, then scale around the content centre.
    pub fn transform(&self) -> Affine {
        Affine::translate((f64::from(self.offset_x), f64::from(self.offset_y)))
            * Affine::rotate(f64::from(self.rotation_degrees).to_radians())
            * Affine::scale(f64::from(self.scale))
    }
}

/// Caller-owned overlays in paint order; later entries draw on top.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OverlayList {
    items: Vec<StickerOverlay>,
}

impl OverlayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append on top; returns the overlay id.
    pub fn add(&mut self, overlay: StickerOverlay) -> u64 {
        let id = overlay.id;
        self.items.push(overlay);
        id
    }

    pub fn remove(&mut self, id: u64) -> Option<StickerOverlay> {
        let pos = self.items.iter().position(|o| o.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Move, scale and rotate an overlay in place. Returns whether `id` matched.
    pub fn update(&mut self, id: u64, x: f32, y: f32, scale: f32, rotation_degrees: f32) -> bool {
        let Some(o) = self.items.iter_mut().find(|o| o.id == id) else {
            return false;
        };
        o.offset_x = x;
        o.offset_y = y;
        o.scale = scale;
        o.rotation_degrees = rotation_degrees;
        true
    }

    pub fn get(&self, id: u64) -> Option<&StickerOverlay> {
        self.items.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StickerOverlay> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a OverlayList {
    type Item = &'a StickerOverlay;
    type IntoIter = std::slice::Iter<'a, StickerOverlay>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Draw every overlay in list order onto a copy of `buffer`.
#[tracing::instrument(skip_all, fields(overlays = overlays.len()))]
pub fn apply_overlays(
    buffer: &PixelBuffer,
    overlays: &OverlayList,
    text: &mut TextRenderer,
) -> BoothResult<PixelBuffer> {
    let mut out = buffer.copy();
    for overlay in overlays {
        text.draw_centered(
            &mut out,
            &overlay.content,
            &overlay.kind.style(),
            overlay.transform(),
        )?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/overlay.rs"]
mod tests;
