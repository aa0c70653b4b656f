use super::*;
use crate::foundation::core::Rgba8;

fn checker(w: u32, h: u32) -> PixelBuffer {
    let mut b = PixelBuffer::new(w, h).unwrap();
    for y in 0..h {
        for x in 0..w {
            let v = if (x + y) % 2 == 0 { 60 } else { 180 };
            b.set_pixel(x, y, Rgba8::new(v, v, v, 255)).unwrap();
        }
    }
    b
}

#[test]
fn sharpen_zero_is_unchanged() {
    let b = checker(6, 5);
    assert_eq!(sharpen(&b, 0.0), b);
}

#[test]
fn sharpen_full_changes_interior_and_keeps_border() {
    let b = checker(6, 5);
    let out = sharpen(&b, 1.0);
    assert_ne!(out.get_pixel(2, 2).unwrap(), b.get_pixel(2, 2).unwrap());
    for x in 0..6 {
        assert_eq!(out.get_pixel(x, 0).unwrap(), b.get_pixel(x, 0).unwrap());
        assert_eq!(out.get_pixel(x, 4).unwrap(), b.get_pixel(x, 4).unwrap());
    }
    for y in 0..5 {
        assert_eq!(out.get_pixel(0, y).unwrap(), b.get_pixel(0, y).unwrap());
        assert_eq!(out.get_pixel(5, y).unwrap(), b.get_pixel(5, y).unwrap());
    }
}

#[test]
fn sharpen_full_matches_kernel() {
    let b = checker(3, 3);
    let out = sharpen(&b, 1.0);
    // centre is 60 with four 180 neighbours: 5*60 - 4*180 < 0
    assert_eq!(out.get_pixel(1, 1).unwrap(), Rgba8::new(0, 0, 0, 255));
}

#[test]
fn sharpen_half_blends() {
    let b = checker(3, 3);
    let out = sharpen(&b, 0.5);
    assert_eq!(out.get_pixel(1, 1).unwrap().r, 30);
}

#[test]
fn sharpen_flat_image_is_stable() {
    let b = PixelBuffer::filled(5, 5, Rgba8::rgb(90, 90, 90)).unwrap();
    assert_eq!(sharpen(&b, 1.0), b);
}

#[test]
fn highlight_only_touches_bright_pixels() {
    let mut b = PixelBuffer::new(2, 1).unwrap();
    b.set_pixel(0, 0, Rgba8::rgb(200, 200, 200)).unwrap();
    b.set_pixel(1, 0, Rgba8::rgb(50, 50, 50)).unwrap();
    let out = highlight(&b, 0.5);
    assert!(out.get_pixel(0, 0).unwrap().r > 200);
    assert_eq!(out.get_pixel(1, 0).unwrap(), Rgba8::rgb(50, 50, 50));
}

#[test]
fn shadow_only_touches_dark_pixels() {
    let mut b = PixelBuffer::new(2, 1).unwrap();
    b.set_pixel(0, 0, Rgba8::rgb(200, 200, 200)).unwrap();
    b.set_pixel(1, 0, Rgba8::rgb(50, 50, 50)).unwrap();
    let out = shadow(&b, -0.5);
    assert_eq!(out.get_pixel(0, 0).unwrap(), Rgba8::rgb(200, 200, 200));
    assert!(out.get_pixel(1, 0).unwrap().r < 50);
}

#[test]
fn tone_curves_keep_alpha() {
    let b = PixelBuffer::filled(2, 2, Rgba8::new(240, 240, 240, 77)).unwrap();
    assert_eq!(highlight(&b, 1.0).get_pixel(1, 1).unwrap().a, 77);
}
