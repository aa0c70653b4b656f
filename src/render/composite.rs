use crate::{
    buffer::pixel::PixelBuffer,
    foundation::error::{BoothError, BoothResult},
    foundation::math::mul_div255,
};

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    let src = src.map(|c| mul_div255(u16::from(c), op));
    if src[3] == 0 {
        return dst;
    }
    let keep = 255 - u16::from(src[3]);
    std::array::from_fn(|i| src[i].saturating_add(mul_div255(u16::from(dst[i]), keep)))
}

pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    if a == 255 {
        return px;
    }
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 255 {
        return px;
    }
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

/// Source-over for straight-alpha pixels.
pub fn over_straight(dst: [u8; 4], src: [u8; 4], opacity: f32) -> [u8; 4] {
    if src[3] == 255 && opacity >= 1.0 {
        return src;
    }
    unpremultiply(over(premultiply(dst), premultiply(src), opacity))
}

/// Screen blend of a straight-alpha source onto a straight-alpha destination.
///
/// Each color channel becomes `d + s*a - d*s*a` with `a` the source alpha;
/// destination alpha is kept.
pub fn screen_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let mut out = dst;
    for i in 0..3 {
        let s = u16::from(mul_div255(u16::from(src[i]), sa));
        let d = u16::from(dst[i]);
        out[i] = (d + s - u16::from(mul_div255(d, s))).min(255) as u8;
    }
    out
}

/// Composite a premultiplied layer of the same size over a straight buffer.
pub fn over_layer_in_place(dst: &mut PixelBuffer, layer: &[u8], opacity: f32) -> BoothResult<()> {
    if dst.as_raw().len() != layer.len() {
        return Err(BoothError::validation(
            "over_layer_in_place expects a layer matching the destination size",
        ));
    }
    for (d, s) in dst.as_raw_mut().chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let dp = premultiply([d[0], d[1], d[2], d[3]]);
        let out = unpremultiply(over(dp, [s[0], s[1], s[2], s[3]], opacity));
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
