use rand::Rng;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::{
    buffer::pixel::PixelBuffer,
    foundation::core::Rgba8,
    foundation::error::BoothResult,
    foundation::math::{clamp_channel, seeded_rng},
    render::composite::screen_straight,
    render::raster::Layer,
};

const MAX_ABERRATION_PX: f32 = 20.0;
const GRAIN_DELTA: i16 = 25;
const SCRATCH_COLOR: Rgba8 = Rgba8::new(255, 255, 255, 150);
const SCRATCH_WIDTH: f64 = 2.0;
const VIGNETTE_ALPHA: f32 = 180.0;
const VIGNETTE_RADIUS: f32 = 0.7;

/// Split RGB horizontally: red samples from the right, blue from the left.
pub fn chromatic_aberration(buffer: &PixelBuffer, intensity: f32) -> PixelBuffer {
    let shift = (MAX_ABERRATION_PX * intensity.clamp(0.0, 1.0)).round() as i64;
    channel_shift(buffer, shift)
}

/// Chromatic aberration with a shift of 10 px per the label's trailing digit.
pub fn distortion(buffer: &PixelBuffer, label: &str) -> PixelBuffer {
    let digit = label
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .unwrap_or(1);
    channel_shift(buffer, i64::from(digit) * 10)
}

fn channel_shift(buffer: &PixelBuffer, shift: i64) -> PixelBuffer {
    if shift == 0 {
        return buffer.copy();
    }
    let (w, _) = buffer.dimensions();
    let sample = |x: i64, y: u32, c: usize| -> (u8, u8) {
        if x < 0 || x >= i64::from(w) {
            return (0, 0);
        }
        let px = buffer.px(x as u32, y);
        (px[c], px[3])
    };

    let mut out = buffer.copy();
    let stride = out.stride();
    out.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for x in 0..w {
                let xi = i64::from(x);
                let (r, ra) = sample(xi + shift, y, 0);
                let (g, ga) = sample(xi, y, 1);
                let (b, ba) = sample(xi - shift, y, 2);
                let i = x as usize * 4;
                row[i..i + 4].copy_from_slice(&[r, g, b, ra.max(ga).max(ba)]);
            }
        });
    out
}

fn gradient_at(stops: &[(f32, [f32; 4])], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 1.0 };
            return std::array::from_fn(|i| c0[i] + (c1[i] - c0[i]) * f);
        }
    }
    stops.last().map(|s| s.1).unwrap_or([0.0; 4])
}

/// Warm radial glow from a corner picked by the label, screen-blended.
///
/// The same label always yields the same corner and radius.
pub fn light_leak(buffer: &PixelBuffer, label: &str) -> PixelBuffer {
    let mut rng = seeded_rng(label);
    let (w, h) = buffer.dimensions();
    let cx = if rng.random::<bool>() { 0.0 } else { w as f32 };
    let cy = if rng.random::<bool>() { 0.0 } else { h as f32 };
    let k = rng.random_range(0..5u32);
    let radius = (w.max(h) as f32) * (0.5 + k as f32 / 10.0);

    let stops = [
        (0.0, [255.0, 200.0, 0.0, 150.0]),
        (0.5, [255.0, 100.0, 0.0, 100.0]),
        (1.0, [255.0, 100.0, 0.0, 0.0]),
    ];

    let mut out = buffer.copy();
    let stride = out.stride();
    out.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let py = y as f32 + 0.5;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let d = (x as f32 + 0.5 - cx).hypot(py - cy);
                let c = gradient_at(&stops, d / radius).map(clamp_channel);
                let blended = screen_straight([px[0], px[1], px[2], px[3]], c);
                px.copy_from_slice(&blended);
            }
        });
    out
}

/// 20 to 49 translucent white strokes placed by the label's random stream.
pub fn scratch(buffer: &PixelBuffer, label: &str) -> BoothResult<PixelBuffer> {
    let mut rng = seeded_rng(label);
    let (w, h) = (f64::from(buffer.width()), f64::from(buffer.height()));
    let count = 20 + rng.random_range(0..30u32);

    let mut out = buffer.copy();
    let mut layer = Layer::for_buffer(&out)?;
    for _ in 0..count {
        let x0 = rng.random::<f64>() * w;
        let y0 = rng.random::<f64>() * h;
        let x1 = x0 + (rng.random::<f64>() - 0.5) * 100.0;
        let y1 = y0 + (rng.random::<f64>() - 0.5) * 100.0;
        layer.fill_line((x0, y0), (x1, y1), SCRATCH_WIDTH, SCRATCH_COLOR);
    }
    layer.composite_onto(&mut out)?;
    Ok(out)
}

/// Per-pixel noise: with probability `intensity`, each channel moves by up to ±25.
///
/// `seed` fixes the noise for reproducible output; `None` draws from the
/// thread-local generator.
pub fn grain(buffer: &PixelBuffer, intensity: f32, seed: Option<u64>) -> PixelBuffer {
    match seed {
        Some(s) => grain_with(buffer, intensity, &mut StdRng::seed_from_u64(s)),
        None => grain_with(buffer, intensity, &mut rand::rng()),
    }
}

fn grain_with(buffer: &PixelBuffer, intensity: f32, rng: &mut impl Rng) -> PixelBuffer {
    let p = intensity.clamp(0.0, 1.0);
    let mut out = buffer.copy();
    if p == 0.0 {
        return out;
    }
    for px in out.as_raw_mut().chunks_exact_mut(4) {
        if rng.random::<f32>() >= p {
            continue;
        }
        for c in &mut px[..3] {
            let delta = rng.random_range(-GRAIN_DELTA..=GRAIN_DELTA);
            *c = (i16::from(*c) + delta).clamp(0, 255) as u8;
        }
    }
    out
}

/// Darken towards the edges with a centred radial gradient.
///
/// `intensity` moves the clear centre outwards as it drops and scales the
/// edge opacity; `0` leaves the buffer unchanged.
pub fn vignette(buffer: &PixelBuffer, intensity: f32) -> PixelBuffer {
    let k = intensity.clamp(0.0, 1.0);
    let mut out = buffer.copy();
    if k == 0.0 {
        return out;
    }
    let (w, h) = buffer.dimensions();
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    let radius = (h as f32 * VIGNETTE_RADIUS).max(1.0);
    let inner = 1.0 - k;
    let edge_alpha = VIGNETTE_ALPHA * k / 255.0;

    let stride = out.stride();
    out.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let py = y as f32 + 0.5;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let t = ((x as f32 + 0.5 - cx).hypot(py - cy) / radius).min(1.0);
                if t <= inner {
                    continue;
                }
                let a = edge_alpha * (t - inner) / (1.0 - inner);
                for c in &mut px[..3] {
                    *c = clamp_channel(f32::from(*c) * (1.0 - a));
                }
            }
        });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/procedural.rs"]
mod tests;
