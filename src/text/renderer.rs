use crate::{
    buffer::pixel::PixelBuffer,
    foundation::core::{Affine, Rgba8, Vec2},
    foundation::error::{BoothError, BoothResult},
    render::{blur::gaussian_blur_premul, composite::over_layer_in_place, raster::Layer},
};

/// DejaVu Sans, used when the caller supplies no font.
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Blurred copy of the glyphs painted under the text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextShadow {
    pub color: Rgba8,
    pub blur_radius: u32,
    pub offset: Vec2,
}

impl TextShadow {
    /// Opaque black glow centred under the glyphs, blurred by 5 px.
    pub const HALO: Self = Self {
        color: Rgba8::BLACK,
        blur_radius: 5,
        offset: Vec2::ZERO,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: Rgba8,
    pub shadow: Option<TextShadow>,
}

impl TextStyle {
    pub fn plain(size_px: f32, color: Rgba8) -> Self {
        Self {
            size_px,
            color,
            shadow: None,
        }
    }

    pub fn with_shadow(mut self, shadow: TextShadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// Shapes text with one caller-supplied font and rasterizes it onto buffers.
pub struct TextRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl TextRenderer {
    /// Register a TrueType/OpenType font from raw bytes.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> BoothResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BoothError::text("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BoothError::text("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
        })
    }

    /// Renderer over the bundled DejaVu Sans face.
    pub fn bundled() -> BoothResult<Self> {
        Self::from_font_bytes(BUNDLED_FONT.to_vec())
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Single-line layout of `text` at `size_px`.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> BoothResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BoothError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::from(color)));
        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Width and height of the laid-out text in pixels.
    pub fn measure(&mut self, text: &str, size_px: f32) -> BoothResult<(f32, f32)> {
        let layout = self.layout(text, size_px, Rgba8::BLACK)?;
        Ok((layout.width(), layout.height()))
    }

    /// Draw `text` centred on the origin of `transform`.
    ///
    /// With a shadow, a blurred offset copy is composited first.
    pub fn draw_centered(
        &mut self,
        target: &mut PixelBuffer,
        text: &str,
        style: &TextStyle,
        transform: Affine,
    ) -> BoothResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = self.layout(text, style.size_px, style.color)?;
        let centre = Affine::translate((
            -f64::from(layout.width()) / 2.0,
            -f64::from(layout.height()) / 2.0,
        ));
        let local = transform * centre;

        if let Some(shadow) = &style.shadow {
            let mut layer = Layer::for_buffer(target)?;
            let shifted = Affine::translate(shadow.offset) * local;
            self.paint_glyphs(&mut layer, &layout, shifted, Some(shadow.color));
            let premul = layer.finish();
            let blurred =
                gaussian_blur_premul(&premul, target.width(), target.height(), shadow.blur_radius)?;
            over_layer_in_place(target, &blurred, 1.0)?;
        }

        let mut layer = Layer::for_buffer(target)?;
        self.paint_glyphs(&mut layer, &layout, local, None);
        layer.composite_onto(target)
    }

    fn paint_glyphs(
        &self,
        layer: &mut Layer,
        layout: &parley::Layout<TextBrush>,
        transform: Affine,
        color_override: Option<Rgba8>,
    ) {
        layer.set_transform(transform);
        let ctx = layer.ctx_mut();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = match color_override {
                    Some(c) => TextBrush::from(c),
                    None => run.style().brush,
                };
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/renderer.rs"]
mod tests;
