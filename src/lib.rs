//! boothfx is a photobooth composition and effects engine.
//!
//! It takes decoded photos as RGBA8 [`PixelBuffer`]s and turns them into a
//! single printable composite, or into a looping GIF.
//!
//! # Pipeline overview
//!
//! 1. **Normalize** (optional): rotate/mirror/crop captures and fit them to one size
//!    ([`normalize_capture`], [`fit_photos`]).
//! 2. **Effects** (optional, per photo): color matrices, tone curves, sharpening and
//!    procedural film effects, applied in caller order by an [`EffectChain`].
//! 3. **Compose**: [`Composer::compose`] validates the photo count, computes the
//!    canvas, paints the background, places the photos through the selected
//!    filter and stamps the timestamp caption.
//! 4. **Decorate** (optional): [`apply_overlays`] for stickers and text,
//!    [`polaroid_frame`] for an instant-film card.
//! 5. **Export**: [`encode_png`] or [`encode_gif`].
//!
//! Every transform takes a buffer by reference and returns a new one; the only
//! mutable state a caller keeps between calls is its own [`OverlayList`].
#![forbid(unsafe_code)]

mod buffer;
mod color;
mod effects;
mod encode;
mod foundation;
mod layout;
mod render;
mod text;

pub use buffer::capture::{Orientation, downscale_to_width, fit_photos, normalize_capture};
pub use buffer::decode::{decode_image, decode_image_at, encode_png};
pub use buffer::pixel::{BlitPaint, PixelBuffer};
pub use color::matrix::ColorMatrix;
pub use color::presets::{FilterChoice, ImageFilter, Preset, preset_by_name};
pub use effects::convolution::{highlight, shadow, sharpen};
pub use effects::fx::{Effect, EffectChain, EffectInstance, normalize_effects, parse_effect};
pub use effects::overlay::{OverlayKind, OverlayList, StickerOverlay, apply_overlays};
pub use effects::procedural::{
    chromatic_aberration, distortion, grain, light_leak, scratch, vignette,
};
pub use encode::gif::{DroppedFrame, GifFrame, GifOptions, GifOutput, GifRepeat, encode_gif};
pub use foundation::core::{Affine, PixelRect, Point, Rgba8, Vec2};
pub use foundation::error::{BoothError, BoothResult};
pub use layout::compose::{
    CAPTION_FORMAT, CaptionOptions, ComposeOptions, ComposeStage, Composer, draw_background,
};
pub use layout::geometry::{CanvasGeometry, LayoutMetrics};
pub use layout::model::{
    Background, Layout, Theme, ThemePattern, builtin_themes, resolve_background, theme_by_id,
};
pub use layout::polaroid::{POLAROID_DATE_FORMAT, PolaroidOptions, polaroid_frame};
pub use render::raster::Layer;
pub use text::renderer::{TextBrush, TextRenderer, TextShadow, TextStyle};
