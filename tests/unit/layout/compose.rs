use chrono::NaiveDate;

use super::*;
use crate::color::presets::ImageFilter;
use crate::layout::model::theme_by_id;

fn photos(n: usize, w: u32, h: u32, color: Rgba8) -> Vec<PixelBuffer> {
    (0..n)
        .map(|_| PixelBuffer::filled(w, h, color).unwrap())
        .collect()
}

fn no_caption(layout: Layout) -> ComposeOptions {
    ComposeOptions {
        layout,
        caption: CaptionOptions::disabled(),
        ..ComposeOptions::default()
    }
}

fn font() -> Vec<u8> {
    std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/fonts/DejaVuSans.ttf"
    ))
    .unwrap()
}

#[test]
fn caption_text_uses_day_month_year() {
    let c = CaptionOptions {
        enabled: true,
        timestamp: NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|d| d.and_hms_opt(9, 5, 0)),
    };
    assert_eq!(c.text(), "07/03/2024 09:05");
}

#[test]
fn wrong_count_fails_before_drawing() {
    let mut c = Composer::new();
    let err = c
        .compose(&photos(3, 10, 10, Rgba8::BLACK), None, &no_caption(Layout::Grid2x2))
        .unwrap_err();
    assert!(matches!(
        err,
        BoothError::WrongPhotoCount {
            expected: 4,
            actual: 3,
            ..
        }
    ));
}

#[test]
fn default_options_stamp_caption_with_bundled_font() {
    let mut c = Composer::new();
    assert!(c.text_renderer().is_none());
    let out = c
        .compose(&photos(4, 60, 40, Rgba8::rgb(0, 255, 0)), None, &ComposeOptions::default())
        .unwrap();
    assert_eq!(out.dimensions(), (2 * 60 + 80 + 20, 2 * 40 + 80 + 20 + 120));
    assert_eq!(c.text_renderer().unwrap().family_name(), "DejaVu Sans");

    let band_top = out.height() - 120;
    let darkest = (band_top..out.height())
        .flat_map(|y| (0..out.width()).map(move |x| (x, y)))
        .map(|(x, y)| out.get_pixel(x, y).unwrap().r)
        .min()
        .unwrap();
    assert!(darkest < 60);
}

#[test]
fn mismatched_photo_sizes_are_rejected() {
    let mut ps = photos(2, 10, 10, Rgba8::BLACK);
    ps[1] = PixelBuffer::filled(11, 10, Rgba8::BLACK).unwrap();
    let err = Composer::new()
        .compose(&ps, None, &no_caption(Layout::Strip1x2))
        .unwrap_err();
    assert!(matches!(err, BoothError::Validation(_)));
}

#[test]
fn photos_land_in_their_slots_on_white() {
    let out = Composer::new()
        .compose(
            &photos(2, 30, 20, Rgba8::rgb(255, 0, 0)),
            None,
            &no_caption(Layout::Strip1x2),
        )
        .unwrap();
    assert_eq!(out.dimensions(), (30 + 80, 2 * 20 + 20 + 80 + 120));
    assert_eq!(out.get_pixel(0, 0).unwrap(), Rgba8::WHITE);
    assert_eq!(out.get_pixel(40, 40).unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(out.get_pixel(40, 40 + 20 + 20).unwrap(), Rgba8::rgb(255, 0, 0));
    // spacing between the two photos stays background
    assert_eq!(out.get_pixel(45, 65).unwrap(), Rgba8::WHITE);
}

#[test]
fn filter_applies_to_every_photo() {
    let opts = ComposeOptions {
        filter: FilterChoice::Image(ImageFilter::BlackAndWhite),
        ..no_caption(Layout::Grid2x2)
    };
    let out = Composer::new()
        .compose(&photos(4, 10, 10, Rgba8::rgb(200, 20, 20)), None, &opts)
        .unwrap();
    for (x, y) in [(40, 40), (70, 40), (40, 70), (70, 70)] {
        let px = out.get_pixel(x, y).unwrap();
        assert!(px.r.abs_diff(px.g) <= 1, "slot at {x},{y} not grey: {px:?}");
    }
}

#[test]
fn image_background_beats_theme() {
    let bg = PixelBuffer::filled(5, 5, Rgba8::rgb(0, 0, 255)).unwrap();
    let opts = ComposeOptions {
        theme: Some(theme_by_id("retro_beige").unwrap()),
        ..no_caption(Layout::Single)
    };
    let out = Composer::new()
        .compose(&photos(1, 10, 10, Rgba8::BLACK), Some(&bg), &opts)
        .unwrap();
    assert_eq!(out.get_pixel(2, 2).unwrap(), Rgba8::rgb(0, 0, 255));
}

#[test]
fn theme_used_without_image() {
    let opts = ComposeOptions {
        theme: Some(theme_by_id("retro_beige").unwrap()),
        ..no_caption(Layout::Single)
    };
    let out = Composer::new()
        .compose(&photos(1, 10, 10, Rgba8::BLACK), None, &opts)
        .unwrap();
    assert_eq!(out.get_pixel(2, 2).unwrap(), Rgba8::rgb(0xF5, 0xE6, 0xD3));
}

#[test]
fn gradient_runs_top_to_bottom() {
    let theme = theme_by_id("ocean").unwrap();
    let out = draw_background(&Background::Theme(&theme), 4, 100).unwrap();
    let top = out.get_pixel(0, 0).unwrap();
    let bottom = out.get_pixel(0, 99).unwrap();
    assert!(top.g.abs_diff(0xCD) <= 2);
    assert!(bottom.g.abs_diff(0x53) <= 2);
}

#[test]
fn dots_and_stripes_use_translucent_accent() {
    let stripes = theme_by_id("dark_vintage").unwrap();
    let out = draw_background(&Background::Theme(&stripes), 160, 10).unwrap();
    let on = out.get_pixel(20, 5).unwrap();
    let off = out.get_pixel(60, 5).unwrap();
    assert_eq!(off, Rgba8::rgb(0x2C, 0x2C, 0x2C));
    assert!(on.r > off.r && on.r < 0x40);

    let dots = theme_by_id("pastel_pink").unwrap();
    let out = draw_background(&Background::Theme(&dots), 61, 61).unwrap();
    assert_ne!(out.get_pixel(30, 30).unwrap(), dots.background_color);
    assert_eq!(out.get_pixel(15, 15).unwrap(), dots.background_color);
}

#[test]
fn caption_is_black_without_image_background() {
    let mut c = Composer::with_font(font()).unwrap();
    let opts = ComposeOptions {
        layout: Layout::Single,
        caption: CaptionOptions {
            enabled: true,
            timestamp: NaiveDate::from_ymd_opt(2025, 1, 2).and_then(|d| d.and_hms_opt(3, 4, 0)),
        },
        ..ComposeOptions::default()
    };
    let out = c
        .compose(&photos(1, 300, 100, Rgba8::rgb(0, 255, 0)), None, &opts)
        .unwrap();
    let band_top = out.height() - 120;
    let darkest = (band_top..out.height())
        .flat_map(|y| (0..out.width()).map(move |x| (x, y)))
        .map(|(x, y)| out.get_pixel(x, y).unwrap().r)
        .min()
        .unwrap();
    assert!(darkest < 60);
}

#[test]
fn caption_is_white_over_image_background() {
    let mut c = Composer::with_font(font()).unwrap();
    let bg = PixelBuffer::filled(4, 4, Rgba8::rgb(128, 128, 128)).unwrap();
    let opts = ComposeOptions {
        layout: Layout::Single,
        caption: CaptionOptions {
            enabled: true,
            timestamp: NaiveDate::from_ymd_opt(2025, 1, 2).and_then(|d| d.and_hms_opt(3, 4, 0)),
        },
        ..ComposeOptions::default()
    };
    let out = c
        .compose(&photos(1, 300, 100, Rgba8::rgb(0, 255, 0)), Some(&bg), &opts)
        .unwrap();
    let band_top = out.height() - 120;
    let brightest = (band_top..out.height())
        .flat_map(|y| (0..out.width()).map(move |x| (x, y)))
        .map(|(x, y)| out.get_pixel(x, y).unwrap().r)
        .max()
        .unwrap();
    assert!(brightest > 220);
}
