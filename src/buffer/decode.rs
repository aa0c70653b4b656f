use std::io::Cursor;

use anyhow::Context as _;

use crate::{
    buffer::pixel::PixelBuffer,
    foundation::error::{BoothError, BoothResult},
};

/// Decode any format `image` recognizes into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> BoothResult<PixelBuffer> {
    decode_image_at(0, bytes)
}

/// Like [`decode_image`], tagging failures with the input's position.
pub fn decode_image_at(index: usize, bytes: &[u8]) -> BoothResult<PixelBuffer> {
    let img = image::load_from_memory(bytes).map_err(|e| BoothError::decode(index, e.to_string()))?;
    PixelBuffer::from_rgba_image(img.to_rgba8()).map_err(|e| BoothError::decode(index, e.to_string()))
}

pub fn encode_png(buffer: &PixelBuffer) -> BoothResult<Vec<u8>> {
    let img = buffer.to_rgba_image()?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .context("png encode failed")?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/decode.rs"]
mod tests;
