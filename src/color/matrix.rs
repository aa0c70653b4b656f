use rayon::prelude::*;

use crate::{
    buffer::pixel::PixelBuffer,
    foundation::core::Rgba8,
    foundation::error::BoothResult,
    foundation::math::clamp_channel,
};

const SAT_R: f32 = 0.213;
const SAT_G: f32 = 0.715;
const SAT_B: f32 = 0.072;

/// Row-major 4x5 affine color transform over straight RGBA in 0..=255 units.
///
/// Row `c` computes `out[c] = m[c][0]*r + m[c][1]*g + m[c][2]*b + m[c][3]*a + m[c][4]`.
/// Results are truncated and clamped per channel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColorMatrix(pub [f32; 20]);

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ColorMatrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_rows(rows: [[f32; 5]; 4]) -> Self {
        let mut m = [0.0; 20];
        for (r, row) in rows.iter().enumerate() {
            m[r * 5..r * 5 + 5].copy_from_slice(row);
        }
        Self(m)
    }

    /// Diagonal scale with zero offsets.
    pub fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        let mut m = [0.0; 20];
        m[0] = r;
        m[6] = g;
        m[12] = b;
        m[18] = a;
        Self(m)
    }

    /// Scales RGB by `1 + b`; `b = 0` is identity.
    pub fn brightness(b: f32) -> Self {
        let s = 1.0 + b;
        Self::scale(s, s, s, 1.0)
    }

    /// Scales RGB by `1 + c` without offset; `c = 0` is identity.
    pub fn contrast(c: f32) -> Self {
        let s = 1.0 + c;
        Self::scale(s, s, s, 1.0)
    }

    /// Luminance-preserving saturation at factor `1 + s`.
    pub fn saturation(s: f32) -> Self {
        Self::saturation_factor(1.0 + s)
    }

    /// Saturation matrix for an absolute factor; `0` is greyscale.
    pub fn saturation_factor(sat: f32) -> Self {
        let inv = 1.0 - sat;
        let (r, g, b) = (SAT_R * inv, SAT_G * inv, SAT_B * inv);
        Self::from_rows([
            [r + sat, g, b, 0.0, 0.0],
            [r, g + sat, b, 0.0, 0.0],
            [r, g, b + sat, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Diagonal `[w, 1, 2 - w]`; `w > 1` warms, `w < 1` cools.
    pub fn temperature(w: f32) -> Self {
        Self::scale(w, 1.0, 2.0 - w, 1.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `post` applied after `self`.
    pub fn post_concat(&self, post: &ColorMatrix) -> ColorMatrix {
        let a = &post.0;
        let b = &self.0;
        let mut out = [0.0; 20];
        for r in 0..4 {
            for c in 0..5 {
                let mut v = 0.0;
                for k in 0..4 {
                    v += a[r * 5 + k] * b[k * 5 + c];
                }
                if c == 4 {
                    v += a[r * 5 + 4];
                }
                out[r * 5 + c] = v;
            }
        }
        ColorMatrix(out)
    }

    /// Transform one straight RGBA pixel.
    pub fn map_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        let m = &self.0;
        let [r, g, b, a] = px.map(f32::from);
        let mut out = [0u8; 4];
        for (c, o) in out.iter_mut().enumerate() {
            let row = &m[c * 5..c * 5 + 5];
            *o = clamp_channel(row[0] * r + row[1] * g + row[2] * b + row[3] * a + row[4]);
        }
        out
    }

    pub fn map_color(&self, color: Rgba8) -> Rgba8 {
        Rgba8::from_array(self.map_pixel(color.to_array()))
    }

    /// New buffer with every pixel passed through this matrix.
    pub fn apply(&self, buffer: &PixelBuffer) -> BoothResult<PixelBuffer> {
        let mut out = buffer.copy();
        if self.is_identity() {
            return Ok(out);
        }
        let stride = out.stride();
        out.as_raw_mut().par_chunks_mut(stride).for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                let mapped = self.map_pixel([px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&mapped);
            }
        });
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/matrix.rs"]
mod tests;
