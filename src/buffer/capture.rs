use rayon::prelude::*;

use crate::{
    buffer::pixel::PixelBuffer,
    foundation::error::{BoothError, BoothResult},
};

/// Clockwise rotation needed to bring a capture upright.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    #[default]
    Up,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    pub fn from_degrees(deg: i32) -> BoothResult<Self> {
        match deg.rem_euclid(360) {
            0 => Ok(Self::Up),
            90 => Ok(Self::Rotate90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Rotate270),
            _ => Err(BoothError::validation(format!(
                "rotation must be a multiple of 90 degrees, got {deg}"
            ))),
        }
    }
}

/// Rotate upright, mirror if requested, then centre-crop to 4:3 landscape.
pub fn normalize_capture(
    buffer: &PixelBuffer,
    orientation: Orientation,
    mirror: bool,
) -> BoothResult<PixelBuffer> {
    let img = buffer.to_rgba_image()?;
    let mut img = match orientation {
        Orientation::Up => img,
        Orientation::Rotate90 => image::imageops::rotate90(&img),
        Orientation::Rotate180 => image::imageops::rotate180(&img),
        Orientation::Rotate270 => image::imageops::rotate270(&img),
    };
    if mirror {
        image::imageops::flip_horizontal_in_place(&mut img);
    }

    let (w, h) = img.dimensions();
    let (cw, ch) = if u64::from(w) * 3 > u64::from(h) * 4 {
        ((u64::from(h) * 4 / 3) as u32, h)
    } else {
        (w, (u64::from(w) * 3 / 4) as u32)
    };
    let (cw, ch) = (cw.max(1), ch.max(1));
    let cropped =
        image::imageops::crop_imm(&img, (w - cw) / 2, (h - ch) / 2, cw, ch).to_image();
    PixelBuffer::from_rgba_image(cropped)
}

/// Resize every photo to `width` x `height`, preserving order.
pub fn fit_photos(photos: &[PixelBuffer], width: u32, height: u32) -> BoothResult<Vec<PixelBuffer>> {
    photos
        .par_iter()
        .map(|p| p.resize_exact(width, height))
        .collect()
}

/// Shrink to at most `max_width` wide, keeping the aspect ratio.
pub fn downscale_to_width(buffer: &PixelBuffer, max_width: u32) -> BoothResult<PixelBuffer> {
    if max_width == 0 {
        return Err(BoothError::validation("max_width must be > 0"));
    }
    let (w, h) = buffer.dimensions();
    if w <= max_width {
        return Ok(buffer.copy());
    }
    let nh = ((u64::from(h) * u64::from(max_width) + u64::from(w) / 2) / u64::from(w)).max(1);
    buffer.resize_exact(max_width, nh as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/capture.rs"]
mod tests;
