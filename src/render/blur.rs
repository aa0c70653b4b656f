use rayon::prelude::*;

use crate::foundation::error::{BoothError, BoothResult};

/// Separable Gaussian blur over a premultiplied RGBA8 layer.
///
/// Soft shadows under text and photos go through here. `radius == 0` returns
/// the input unchanged; samples past an edge repeat the edge pixel.
pub fn gaussian_blur_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
) -> BoothResult<Vec<u8>> {
    let expected_len = crate::buffer::pixel::byte_len(width, height)?;
    if src.len() != expected_len {
        return Err(BoothError::validation(
            "gaussian_blur_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel(radius);
    let (w, h) = (width as usize, height as usize);
    let stride = w * 4;

    let mut horizontal = vec![0u8; expected_len];
    horizontal
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let line = &src[y * stride..(y + 1) * stride];
            for x in 0..w {
                let px = convolve(&kernel, move |d| {
                    let sx = (x as isize + d).clamp(0, w as isize - 1) as usize;
                    &line[sx * 4..sx * 4 + 4]
                });
                row[x * 4..x * 4 + 4].copy_from_slice(&px);
            }
        });

    let horizontal = &horizontal[..];
    let mut out = vec![0u8; expected_len];
    out.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let px = convolve(&kernel, move |d| {
                let sy = (y as isize + d).clamp(0, h as isize - 1) as usize;
                let i = sy * stride + x * 4;
                &horizontal[i..i + 4]
            });
            row[x * 4..x * 4 + 4].copy_from_slice(&px);
        }
    });
    Ok(out)
}

/// Weights for offsets `-radius..=radius`, sigma `radius / 2`, summing to 1.
fn gaussian_kernel(radius: u32) -> Vec<f32> {
    let r = radius as i32;
    let sigma = radius as f32 / 2.0;
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f32> = (-r..=r).map(|i| (-((i * i) as f32) / denom).exp()).collect();
    let sum: f32 = raw.iter().sum();
    raw.into_iter().map(|v| v / sum).collect()
}

fn convolve<'a>(kernel: &[f32], sample: impl Fn(isize) -> &'a [u8]) -> [u8; 4] {
    let radius = (kernel.len() / 2) as isize;
    let mut acc = [0f32; 4];
    for (k, &weight) in kernel.iter().enumerate() {
        let px = sample(k as isize - radius);
        for (a, &c) in acc.iter_mut().zip(px) {
            *a += weight * f32::from(c);
        }
    }
    acc.map(|v| v.round().clamp(0.0, 255.0) as u8)
}
