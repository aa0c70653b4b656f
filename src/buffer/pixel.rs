use crate::{
    color::matrix::ColorMatrix,
    foundation::core::Rgba8,
    foundation::error::{BoothError, BoothResult},
    render::composite,
};

/// Owned rectangular grid of straight RGBA8 pixels, row-major, tightly packed.
///
/// Invariant: `pixels.len() == width * height * 4` and both dimensions are
/// non-zero. Every transform in the crate takes a `&PixelBuffer` and returns a
/// new buffer; nothing retains buffers between calls.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Optional paint applied by [`PixelBuffer::blit`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlitPaint {
    /// Color transform applied to each source pixel before blending.
    pub matrix: Option<ColorMatrix>,
    /// Overall opacity in `[0, 1]`.
    pub opacity: f32,
}

impl Default for BlitPaint {
    fn default() -> Self {
        Self {
            matrix: None,
            opacity: 1.0,
        }
    }
}

impl BlitPaint {
    /// Paint that filters source pixels through `matrix`.
    pub fn with_matrix(matrix: ColorMatrix) -> Self {
        Self {
            matrix: Some(matrix),
            opacity: 1.0,
        }
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> BoothResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BoothError::validation("pixel buffer size overflow"))
}

impl PixelBuffer {
    /// Transparent black buffer.
    pub fn new(width: u32, height: u32) -> BoothResult<Self> {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    /// Buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> BoothResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoothError::validation(format!(
                "pixel buffer dimensions must be > 0, got {width}x{height}"
            )));
        }
        let len = byte_len(width, height)?;
        let pixels = color.to_array().repeat(len / 4);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap existing bytes; fails unless `pixels.len() == width * height * 4`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> BoothResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoothError::validation(format!(
                "pixel buffer dimensions must be > 0, got {width}x{height}"
            )));
        }
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(BoothError::validation(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Take ownership of an `image` RGBA buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> BoothResult<Self> {
        let (w, h) = img.dimensions();
        Self::from_raw(w, h, img.into_raw())
    }

    /// Convert into an `image` RGBA buffer.
    pub fn into_rgba_image(self) -> BoothResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
            .ok_or_else(|| BoothError::validation("pixel buffer does not fit an RgbaImage"))
    }

    /// Copy into an `image` RGBA buffer.
    pub fn to_rgba_image(&self) -> BoothResult<image::RgbaImage> {
        self.copy().into_rgba_image()
    }

    /// Independent copy of this buffer.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw straight RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Byte length of one row.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    fn checked_index(&self, x: i64, y: i64) -> BoothResult<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return Err(BoothError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(x as u32, y as u32))
    }

    /// Byte offset of pixel `(x, y)`; caller guarantees bounds.
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub(crate) fn px(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> BoothResult<Rgba8> {
        let i = self.checked_index(i64::from(x), i64::from(y))?;
        Ok(Rgba8::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) -> BoothResult<()> {
        let i = self.checked_index(i64::from(x), i64::from(y))?;
        self.pixels[i..i + 4].copy_from_slice(&color.to_array());
        Ok(())
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_array();
        for d in self.pixels.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Source-over `src` with its top-left corner at `(dst_x, dst_y)`.
    ///
    /// The optional paint filters source pixels through a color matrix and
    /// scales their opacity. Parts of `src` outside this buffer are clipped;
    /// a source that misses the buffer entirely is [`BoothError::OutOfBounds`].
    pub fn blit(
        &mut self,
        src: &PixelBuffer,
        dst_x: i64,
        dst_y: i64,
        paint: Option<&BlitPaint>,
    ) -> BoothResult<()> {
        let x0 = dst_x.max(0);
        let y0 = dst_y.max(0);
        let x1 = (dst_x + i64::from(src.width)).min(i64::from(self.width));
        let y1 = (dst_y + i64::from(src.height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return Err(BoothError::OutOfBounds {
                x: dst_x,
                y: dst_y,
                width: self.width,
                height: self.height,
            });
        }

        let paint = paint.copied().unwrap_or_default();
        let opacity = paint.opacity.clamp(0.0, 1.0);
        for y in y0..y1 {
            let sy = (y - dst_y) as u32;
            for x in x0..x1 {
                let sx = (x - dst_x) as u32;
                let mut s = src.px(sx, sy);
                if let Some(m) = &paint.matrix {
                    s = m.map_pixel(s);
                }
                let di = self.index(x as u32, y as u32);
                let d = [
                    self.pixels[di],
                    self.pixels[di + 1],
                    self.pixels[di + 2],
                    self.pixels[di + 3],
                ];
                let out = composite::over_straight(d, s, opacity);
                self.pixels[di..di + 4].copy_from_slice(&out);
            }
        }
        Ok(())
    }

    /// Resample to exactly `width` x `height` with a triangle filter.
    pub fn resize_exact(&self, width: u32, height: u32) -> BoothResult<PixelBuffer> {
        if width == 0 || height == 0 {
            return Err(BoothError::validation(format!(
                "resize target must be > 0, got {width}x{height}"
            )));
        }
        if (width, height) == self.dimensions() {
            return Ok(self.copy());
        }
        let img = self.to_rgba_image()?;
        let out = image::imageops::resize(
            &img,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        Self::from_rgba_image(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/pixel.rs"]
mod tests;
