use rand::rngs::StdRng;
use rand::{Rng, SeedableRng as _};

use crate::{
    buffer::pixel::PixelBuffer,
    foundation::core::{Affine, Rgba8},
    foundation::error::{BoothError, BoothResult},
    render::{blur::gaussian_blur_premul, composite::over_layer_in_place, raster::Layer},
    text::renderer::{TextRenderer, TextStyle},
};

pub const POLAROID_DATE_FORMAT: &str = "%d.%m.%Y";

const TEXTURE_DOTS: usize = 201;
const TEXTURE_MAX_RADIUS: f64 = 2.0;
const TEXTURE_ALPHA: u8 = 5;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PolaroidOptions {
    pub margin: u32,
    pub bottom_margin: u32,
    pub shadow_blur: u32,
    /// Date printed in the bottom margin.
    pub date: Option<chrono::NaiveDate>,
    pub date_font_px: u32,
    /// Sprinkle faint dark specks over the finished card.
    pub texture: bool,
    /// Fixed seed for the speck pattern; fresh entropy when unset.
    pub texture_seed: Option<u64>,
}

impl Default for PolaroidOptions {
    fn default() -> Self {
        Self {
            margin: 100,
            bottom_margin: 300,
            shadow_blur: 15,
            date: None,
            date_font_px: 160,
            texture: true,
            texture_seed: None,
        }
    }
}

fn card_size(photo: &PixelBuffer, options: &PolaroidOptions) -> BoothResult<(u32, u32)> {
    let sides = options
        .margin
        .checked_mul(2)
        .ok_or_else(|| BoothError::validation("polaroid margin overflows u32"))?;
    let width = photo
        .width()
        .checked_add(sides)
        .ok_or_else(|| BoothError::validation("polaroid width overflows u32"))?;
    let height = sides
        .checked_add(options.bottom_margin)
        .and_then(|v| v.checked_add(photo.height()))
        .ok_or_else(|| BoothError::validation("polaroid height overflows u32"))?;
    Ok((width, height))
}

/// Put `photo` on a white instant-film card with a soft shadow.
///
/// A date is drawn with `text`, or with the bundled font when `text` is `None`.
#[tracing::instrument(skip_all, fields(width = photo.width(), height = photo.height()))]
pub fn polaroid_frame(
    photo: &PixelBuffer,
    options: &PolaroidOptions,
    text: Option<&mut TextRenderer>,
) -> BoothResult<PixelBuffer> {
    let m = options.margin;
    let (width, height) = card_size(photo, options)?;

    let mut card = PixelBuffer::filled(width, height, Rgba8::WHITE)?;

    let mut shadow = Layer::for_buffer(&card)?;
    shadow.fill_rect(
        f64::from(m),
        f64::from(m),
        f64::from(width - m),
        f64::from(height - options.bottom_margin),
        Rgba8::LIGHT_GRAY,
    );
    let blurred = gaussian_blur_premul(&shadow.finish(), width, height, options.shadow_blur)?;
    over_layer_in_place(&mut card, &blurred, 1.0)?;

    card.blit(photo, i64::from(m), i64::from(m), None)?;

    if let Some(date) = options.date {
        let mut bundled;
        let renderer = match text {
            Some(r) => r,
            None => {
                bundled = TextRenderer::bundled()?;
                &mut bundled
            }
        };
        let label = date.format(POLAROID_DATE_FORMAT).to_string();
        let band_top = f64::from(height - options.bottom_margin);
        let anchor = Affine::translate((
            f64::from(width) / 2.0,
            band_top + f64::from(options.bottom_margin) / 2.0,
        ));
        renderer.draw_centered(
            &mut card,
            &label,
            &TextStyle::plain(options.date_font_px as f32, Rgba8::BLACK),
            anchor,
        )?;
    }

    if options.texture {
        match options.texture_seed {
            Some(s) => add_texture(&mut card, &mut StdRng::seed_from_u64(s))?,
            None => add_texture(&mut card, &mut rand::rng())?,
        }
    }

    Ok(card)
}

fn add_texture(card: &mut PixelBuffer, rng: &mut impl Rng) -> BoothResult<()> {
    let (w, h) = (f64::from(card.width()), f64::from(card.height()));
    let color = Rgba8::BLACK.with_alpha(TEXTURE_ALPHA);
    let mut layer = Layer::for_buffer(card)?;
    for _ in 0..TEXTURE_DOTS {
        let x = rng.random::<f64>() * w;
        let y = rng.random::<f64>() * h;
        let r = rng.random::<f64>() * TEXTURE_MAX_RADIUS;
        layer.fill_circle(x, y, r, color);
    }
    layer.composite_onto(card)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/polaroid.rs"]
mod tests;
