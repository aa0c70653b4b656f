use rayon::prelude::*;

use crate::{
    buffer::pixel::PixelBuffer,
    foundation::math::{clamp_channel, luminance},
};

const SHARPEN: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

/// 3x3 sharpen blended with the original by `intensity` in `[0, 1]`.
///
/// Border pixels and alpha are copied unchanged.
pub fn sharpen(buffer: &PixelBuffer, intensity: f32) -> PixelBuffer {
    let t = intensity.clamp(0.0, 1.0);
    let mut out = buffer.copy();
    let (w, h) = buffer.dimensions();
    if t == 0.0 || w < 3 || h < 3 {
        return out;
    }

    let stride = out.stride();
    out.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .filter(|(y, _)| *y > 0 && *y + 1 < h as usize)
        .for_each(|(y, row)| {
            let y = y as u32;
            for x in 1..w - 1 {
                let mut acc = [0.0f32; 3];
                for (ky, krow) in SHARPEN.iter().enumerate() {
                    for (kx, &k) in krow.iter().enumerate() {
                        if k == 0.0 {
                            continue;
                        }
                        let s = buffer.px(x + kx as u32 - 1, y + ky as u32 - 1);
                        for c in 0..3 {
                            acc[c] += f32::from(s[c]) * k;
                        }
                    }
                }
                let orig = buffer.px(x, y);
                let i = x as usize * 4;
                for c in 0..3 {
                    let sharp = acc[c].clamp(0.0, 255.0);
                    let o = f32::from(orig[c]);
                    row[i + c] = clamp_channel(o + (sharp - o) * t);
                }
            }
        });
    out
}

fn tone_curve(buffer: &PixelBuffer, factor: impl Fn(f32) -> Option<f32> + Sync) -> PixelBuffer {
    let mut out = buffer.copy();
    let stride = out.stride();
    out.as_raw_mut().par_chunks_mut(stride).for_each(|row| {
        for px in row.chunks_exact_mut(4) {
            let l = luminance(px[0], px[1], px[2]);
            if let Some(f) = factor(l) {
                for c in &mut px[..3] {
                    *c = clamp_channel(f32::from(*c) * f);
                }
            }
        }
    });
    out
}

/// Scale pixels brighter than mid-grey by `1 + amount * (L - 0.5) * 2`.
pub fn highlight(buffer: &PixelBuffer, amount: f32) -> PixelBuffer {
    let amount = amount.clamp(-1.0, 1.0);
    if amount == 0.0 {
        return buffer.copy();
    }
    tone_curve(buffer, |l| (l > 0.5).then(|| 1.0 + amount * (l - 0.5) * 2.0))
}

/// Scale pixels darker than mid-grey by `1 + amount * (0.5 - L) * 2`.
pub fn shadow(buffer: &PixelBuffer, amount: f32) -> PixelBuffer {
    let amount = amount.clamp(-1.0, 1.0);
    if amount == 0.0 {
        return buffer.copy();
    }
    tone_curve(buffer, |l| (l < 0.5).then(|| 1.0 + amount * (0.5 - l) * 2.0))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/convolution.rs"]
mod tests;
