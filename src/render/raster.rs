use vello_cpu::kurbo::{self as cpu_kurbo, Shape as _};

use crate::{
    buffer::pixel::PixelBuffer,
    foundation::core::{Affine, Rgba8},
    foundation::error::{BoothError, BoothResult},
    render::composite,
};

/// Transparent vector drawing surface, rasterized with `vello_cpu`.
///
/// Shapes and glyphs are recorded into a fresh layer and resolved to
/// premultiplied RGBA8 on [`Layer::finish`]; callers composite the result onto
/// a [`PixelBuffer`] so the target never round-trips through the rasterizer.
pub struct Layer {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl Layer {
    pub fn new(width: u32, height: u32) -> BoothResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| BoothError::validation("layer width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| BoothError::validation("layer height exceeds u16"))?;
        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
        })
    }

    /// Layer matching the size of `target`.
    pub fn for_buffer(target: &PixelBuffer) -> BoothResult<Self> {
        Self::new(target.width(), target.height())
    }

    pub(crate) fn ctx_mut(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    pub(crate) fn set_transform(&mut self, transform: Affine) {
        self.ctx.set_transform(affine_to_cpu(transform));
    }

    fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_paint_transform(cpu_kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba8) {
        self.set_color(color);
        self.ctx.fill_rect(&cpu_kurbo::Rect::new(x0, y0, x1, y1));
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba8) {
        self.set_color(color);
        let path = cpu_kurbo::Circle::new((cx, cy), radius).to_path(0.1);
        self.ctx.fill_path(&path);
    }

    /// Straight line segment of the given width with butt caps.
    pub fn fill_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba8) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = dx.hypot(dy);
        if len <= f64::EPSILON || width <= 0.0 {
            return;
        }
        let (nx, ny) = (-dy / len * width / 2.0, dx / len * width / 2.0);
        let mut path = cpu_kurbo::BezPath::new();
        path.move_to((from.0 + nx, from.1 + ny));
        path.line_to((to.0 + nx, to.1 + ny));
        path.line_to((to.0 - nx, to.1 - ny));
        path.line_to((from.0 - nx, from.1 - ny));
        path.close_path();
        self.set_color(color);
        self.ctx.fill_path(&path);
    }

    /// Rasterize everything recorded so far into premultiplied RGBA8 bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap.data_as_u8_slice().to_vec()
    }

    /// Rasterize and composite source-over onto `target`.
    pub fn composite_onto(self, target: &mut PixelBuffer) -> BoothResult<()> {
        if (u32::from(self.width), u32::from(self.height)) != target.dimensions() {
            return Err(BoothError::validation(
                "layer size does not match composite target",
            ));
        }
        let premul = self.finish();
        composite::over_layer_in_place(target, &premul, 1.0)
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> cpu_kurbo::Affine {
    cpu_kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
