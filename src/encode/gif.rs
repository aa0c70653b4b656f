use gif::Repeat;
use rayon::prelude::*;

use crate::{
    buffer::capture::downscale_to_width,
    buffer::decode::decode_image_at,
    buffer::pixel::PixelBuffer,
    foundation::error::{BoothError, BoothResult},
};

const QUANTIZE_SPEED: i32 = 10;

/// One animation input: already decoded, or still encoded bytes.
#[derive(Clone, Debug)]
pub enum GifFrame {
    Decoded(PixelBuffer),
    Encoded(Vec<u8>),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GifRepeat {
    #[default]
    Infinite,
    Finite(u16),
}

impl GifRepeat {
    /// `0` loops forever.
    pub fn from_loop_count(n: u16) -> Self {
        if n == 0 { Self::Infinite } else { Self::Finite(n) }
    }

    fn to_gif(self) -> Repeat {
        match self {
            GifRepeat::Infinite => Repeat::Infinite,
            GifRepeat::Finite(n) => Repeat::Finite(n),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifOptions {
    pub delay_ms: u32,
    pub repeat: GifRepeat,
    pub max_width: u32,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            delay_ms: 500,
            repeat: GifRepeat::Infinite,
            max_width: 480,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedFrame {
    pub index: usize,
    pub reason: String,
}

/// Encoded animation plus the frames that could not be used.
#[derive(Clone, Debug)]
pub struct GifOutput {
    pub bytes: Vec<u8>,
    pub frames_encoded: usize,
    pub dropped: Vec<DroppedFrame>,
}

impl GifOutput {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// GIF delays are whole centiseconds.
fn delay_centis(delay_ms: u32) -> u16 {
    (delay_ms.saturating_add(5) / 10).min(u32::from(u16::MAX)) as u16
}

fn gif_dim(v: u32) -> BoothResult<u16> {
    u16::try_from(v).map_err(|_| BoothError::encode(format!("gif dimension {v} exceeds 65535")))
}

/// Decode, downscale and quantize one input into a GIF frame at its own size.
fn prepare_frame(
    index: usize,
    frame: &GifFrame,
    options: &GifOptions,
) -> BoothResult<gif::Frame<'static>> {
    let scaled = match frame {
        GifFrame::Decoded(buf) => downscale_to_width(buf, options.max_width)?,
        GifFrame::Encoded(bytes) => {
            downscale_to_width(&decode_image_at(index, bytes)?, options.max_width)?
        }
    };
    let (w, h) = (gif_dim(scaled.width())?, gif_dim(scaled.height())?);
    let mut rgba = scaled.into_raw();
    let mut out = gif::Frame::from_rgba_speed(w, h, &mut rgba, QUANTIZE_SPEED);
    out.delay = delay_centis(options.delay_ms);
    out.dispose = gif::DisposalMethod::Background;
    Ok(out)
}

/// Encode frames in order into a looping GIF.
///
/// Frames that fail to decode or scale are skipped and reported in
/// [`GifOutput::dropped`]; if none survive the call fails with
/// [`BoothError::NoFramesProcessed`].
#[tracing::instrument(skip_all, fields(frames = frames.len(), max_width = options.max_width))]
pub fn encode_gif(frames: &[GifFrame], options: &GifOptions) -> BoothResult<GifOutput> {
    if frames.is_empty() {
        return Err(BoothError::validation("gif needs at least one frame"));
    }
    if options.max_width == 0 {
        return Err(BoothError::validation("gif max_width must be > 0"));
    }

    let prepared: Vec<BoothResult<gif::Frame<'static>>> = frames
        .par_iter()
        .enumerate()
        .map(|(i, f)| prepare_frame(i, f, options))
        .collect();

    let mut images = Vec::with_capacity(prepared.len());
    let mut dropped = Vec::new();
    for (index, result) in prepared.into_iter().enumerate() {
        match result {
            Ok(img) => images.push(img),
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping gif frame");
                dropped.push(DroppedFrame {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }
    if images.is_empty() {
        return Err(BoothError::NoFramesProcessed {
            attempted: frames.len(),
        });
    }

    // The logical screen spans the largest frame; each frame keeps its own size.
    let screen_w = images.iter().map(|f| f.width).fold(0, u16::max);
    let screen_h = images.iter().map(|f| f.height).fold(0, u16::max);

    let frames_encoded = images.len();
    let mut bytes = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut bytes, screen_w, screen_h, &[])
            .map_err(|e| BoothError::encode(e.to_string()))?;
        encoder
            .set_repeat(options.repeat.to_gif())
            .map_err(|e| BoothError::encode(e.to_string()))?;
        for frame in &images {
            encoder
                .write_frame(frame)
                .map_err(|e| BoothError::encode(e.to_string()))?;
        }
    }

    if !dropped.is_empty() {
        tracing::warn!(
            dropped = dropped.len(),
            encoded = frames_encoded,
            "gif encoded with dropped frames"
        );
    }
    Ok(GifOutput {
        bytes,
        frames_encoded,
        dropped,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
