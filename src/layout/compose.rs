use crate::{
    buffer::pixel::{BlitPaint, PixelBuffer},
    color::presets::FilterChoice,
    foundation::core::{Affine, Rgba8},
    foundation::error::{BoothError, BoothResult},
    layout::geometry::{CanvasGeometry, LayoutMetrics},
    layout::model::{Background, Layout, Theme, ThemePattern, resolve_background},
    render::raster::Layer,
    text::renderer::{TextRenderer, TextShadow, TextStyle},
};

pub const CAPTION_FORMAT: &str = "%d/%m/%Y %H:%M";

const DOT_RADIUS: f64 = 10.0;
const DOT_SPACING: usize = 30;
const DOT_ALPHA: u8 = 100;
const STRIPE_WIDTH: f64 = 40.0;
const STRIPE_SPACING: usize = 80;
const STRIPE_ALPHA: u8 = 80;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionOptions {
    pub enabled: bool,
    /// Fixed time to print; local now when unset.
    pub timestamp: Option<chrono::NaiveDateTime>,
}

impl Default for CaptionOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            timestamp: None,
        }
    }
}

impl CaptionOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            timestamp: None,
        }
    }

    pub fn text(&self) -> String {
        let ts = self
            .timestamp
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        ts.format(CAPTION_FORMAT).to_string()
    }
}

/// Per-call composition settings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    pub layout: Layout,
    pub filter: FilterChoice,
    pub theme: Option<Theme>,
    pub caption: CaptionOptions,
    pub metrics: LayoutMetrics,
}

/// Stages of one composition, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComposeStage {
    Validate,
    ComputeGeometry,
    DrawBackground,
    PlacePhotos,
    DrawCaption,
}

/// Lays photos out on a themed or image background and stamps the caption.
#[derive(Debug, Default)]
pub struct Composer {
    text: Option<TextRenderer>,
}

impl Composer {
    /// Composer that loads the bundled font the first time it draws a caption.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(font_bytes: Vec<u8>) -> BoothResult<Self> {
        Ok(Self {
            text: Some(TextRenderer::from_font_bytes(font_bytes)?),
        })
    }

    pub fn text_renderer(&mut self) -> Option<&mut TextRenderer> {
        self.text.as_mut()
    }

    fn caption_renderer(&mut self) -> BoothResult<&mut TextRenderer> {
        let renderer = match self.text.take() {
            Some(r) => r,
            None => TextRenderer::bundled()?,
        };
        Ok(self.text.insert(renderer))
    }

    /// Compose `photos` into one canvas.
    ///
    /// Photos must all share one size and match the layout's count. When
    /// both `background_image` and a theme are given, the image wins.
    #[tracing::instrument(skip_all, fields(layout = options.layout.name(), photos = photos.len()))]
    pub fn compose(
        &mut self,
        photos: &[PixelBuffer],
        background_image: Option<&PixelBuffer>,
        options: &ComposeOptions,
    ) -> BoothResult<PixelBuffer> {
        tracing::debug!(stage = ?ComposeStage::Validate);
        let (pw, ph) = validate(photos, options)?;
        let matrix = options.filter.resolve()?;
        if options.caption.enabled {
            self.caption_renderer()?;
        }

        tracing::debug!(stage = ?ComposeStage::ComputeGeometry);
        let geometry = CanvasGeometry::compute(options.layout, pw, ph, &options.metrics)?;

        tracing::debug!(stage = ?ComposeStage::DrawBackground);
        let background = resolve_background(background_image, options.theme.as_ref());
        let mut canvas = draw_background(&background, geometry.width, geometry.height)?;

        tracing::debug!(stage = ?ComposeStage::PlacePhotos);
        let paint = (!matrix.is_identity()).then(|| BlitPaint::with_matrix(matrix));
        for (photo, slot) in photos.iter().zip(&geometry.slots) {
            canvas.blit(photo, i64::from(slot.x), i64::from(slot.y), paint.as_ref())?;
        }

        if options.caption.enabled {
            tracing::debug!(stage = ?ComposeStage::DrawCaption);
            let style = caption_style(&background, options.metrics.caption_font_px);
            let anchor = Affine::translate((
                geometry.caption_band.center_x(),
                geometry.caption_band.center_y(),
            ));
            let text = options.caption.text();
            self.caption_renderer()?
                .draw_centered(&mut canvas, &text, &style, anchor)?;
        }

        tracing::debug!(width = canvas.width(), height = canvas.height(), "composed");
        Ok(canvas)
    }
}

fn validate(photos: &[PixelBuffer], options: &ComposeOptions) -> BoothResult<(u32, u32)> {
    options.layout.check_count(photos.len())?;
    let (pw, ph) = photos
        .first()
        .map(PixelBuffer::dimensions)
        .ok_or_else(|| BoothError::validation("no photos supplied"))?;
    if let Some((i, p)) = photos
        .iter()
        .enumerate()
        .find(|(_, p)| p.dimensions() != (pw, ph))
    {
        return Err(BoothError::validation(format!(
            "photo {i} is {}x{}, expected {pw}x{ph}",
            p.width(),
            p.height()
        )));
    }
    Ok((pw, ph))
}

fn caption_style(background: &Background<'_>, font_px: u32) -> TextStyle {
    if background.is_image() {
        TextStyle::plain(font_px as f32, Rgba8::WHITE).with_shadow(TextShadow::HALO)
    } else {
        TextStyle::plain(font_px as f32, Rgba8::BLACK)
    }
}

/// Fresh canvas painted with the resolved background.
pub fn draw_background(background: &Background<'_>, width: u32, height: u32) -> BoothResult<PixelBuffer> {
    match background {
        Background::White => PixelBuffer::filled(width, height, Rgba8::WHITE),
        Background::Image(img) => img.resize_exact(width, height),
        Background::Theme(theme) => draw_theme(theme, width, height),
    }
}

fn draw_theme(theme: &Theme, width: u32, height: u32) -> BoothResult<PixelBuffer> {
    let mut canvas = PixelBuffer::filled(width, height, theme.background_color)?;
    let accent = theme.effective_accent();
    match theme.pattern {
        ThemePattern::Solid => {}
        ThemePattern::Gradient => {
            let (top, bottom) = (theme.background_color.to_array(), accent.to_array());
            let stride = canvas.stride();
            for (y, row) in canvas.as_raw_mut().chunks_exact_mut(stride).enumerate() {
                let t = (y as f32 + 0.5) / height as f32;
                let c: [u8; 4] = std::array::from_fn(|i| {
                    let (a, b) = (f32::from(top[i]), f32::from(bottom[i]));
                    (a + (b - a) * t).round() as u8
                });
                for px in row.chunks_exact_mut(4) {
                    px.copy_from_slice(&c);
                }
            }
        }
        ThemePattern::Dots => {
            let mut layer = Layer::for_buffer(&canvas)?;
            let color = accent.with_alpha(DOT_ALPHA);
            for y in (0..height as usize).step_by(DOT_SPACING) {
                for x in (0..width as usize).step_by(DOT_SPACING) {
                    layer.fill_circle(x as f64, y as f64, DOT_RADIUS, color);
                }
            }
            layer.composite_onto(&mut canvas)?;
        }
        ThemePattern::Stripes => {
            let mut layer = Layer::for_buffer(&canvas)?;
            let color = accent.with_alpha(STRIPE_ALPHA);
            for x in (0..width as usize).step_by(STRIPE_SPACING) {
                let x = x as f64;
                layer.fill_rect(x, 0.0, x + STRIPE_WIDTH, f64::from(height), color);
            }
            layer.composite_onto(&mut canvas)?;
        }
    }
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/compose.rs"]
mod tests;
