use super::*;

#[test]
fn new_is_transparent_and_sized() {
    let b = PixelBuffer::new(3, 2).unwrap();
    assert_eq!(b.dimensions(), (3, 2));
    assert_eq!(b.as_raw().len(), 3 * 2 * 4);
    assert!(b.as_raw().iter().all(|&v| v == 0));
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(PixelBuffer::new(0, 4).is_err());
    assert!(PixelBuffer::from_raw(2, 0, Vec::new()).is_err());
}

#[test]
fn from_raw_checks_length() {
    assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_err());
    assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn get_and_set_round_trip() {
    let mut b = PixelBuffer::new(4, 4).unwrap();
    let c = Rgba8::new(1, 2, 3, 4);
    b.set_pixel(3, 2, c).unwrap();
    assert_eq!(b.get_pixel(3, 2).unwrap(), c);
    assert_eq!(b.get_pixel(2, 3).unwrap(), Rgba8::TRANSPARENT);
}

#[test]
fn out_of_bounds_access_fails() {
    let mut b = PixelBuffer::new(4, 4).unwrap();
    assert!(matches!(
        b.get_pixel(4, 0),
        Err(BoothError::OutOfBounds { x: 4, y: 0, .. })
    ));
    assert!(matches!(
        b.set_pixel(0, 9, Rgba8::WHITE),
        Err(BoothError::OutOfBounds { .. })
    ));
}

#[test]
fn copy_is_independent() {
    let a = PixelBuffer::filled(2, 2, Rgba8::WHITE).unwrap();
    let mut b = a.copy();
    b.set_pixel(0, 0, Rgba8::BLACK).unwrap();
    assert_eq!(a.get_pixel(0, 0).unwrap(), Rgba8::WHITE);
    assert_ne!(a, b);
}

#[test]
fn blit_places_opaque_source() {
    let mut dst = PixelBuffer::filled(4, 4, Rgba8::WHITE).unwrap();
    let src = PixelBuffer::filled(2, 2, Rgba8::rgb(255, 0, 0)).unwrap();
    dst.blit(&src, 1, 1, None).unwrap();
    assert_eq!(dst.get_pixel(0, 0).unwrap(), Rgba8::WHITE);
    assert_eq!(dst.get_pixel(1, 1).unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(dst.get_pixel(2, 2).unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(dst.get_pixel(3, 3).unwrap(), Rgba8::WHITE);
}

#[test]
fn blit_clips_partial_overlap_and_rejects_miss() {
    let mut dst = PixelBuffer::filled(4, 4, Rgba8::WHITE).unwrap();
    let src = PixelBuffer::filled(3, 3, Rgba8::BLACK).unwrap();
    dst.blit(&src, -2, -2, None).unwrap();
    assert_eq!(dst.get_pixel(0, 0).unwrap(), Rgba8::BLACK);
    assert_eq!(dst.get_pixel(1, 0).unwrap(), Rgba8::WHITE);

    assert!(matches!(
        dst.blit(&src, 10, 0, None),
        Err(BoothError::OutOfBounds { .. })
    ));
}

#[test]
fn blit_paint_applies_matrix() {
    let mut dst = PixelBuffer::filled(2, 1, Rgba8::WHITE).unwrap();
    let src = PixelBuffer::filled(1, 1, Rgba8::rgb(100, 150, 200)).unwrap();
    let paint = BlitPaint::with_matrix(ColorMatrix::saturation(-1.0));
    dst.blit(&src, 0, 0, Some(&paint)).unwrap();
    let px = dst.get_pixel(0, 0).unwrap();
    assert_eq!(px.r, px.g);
    assert_eq!(px.g, px.b);
}

#[test]
fn blit_half_opacity_mixes() {
    let mut dst = PixelBuffer::filled(1, 1, Rgba8::WHITE).unwrap();
    let src = PixelBuffer::filled(1, 1, Rgba8::BLACK).unwrap();
    let paint = BlitPaint {
        matrix: None,
        opacity: 0.5,
    };
    dst.blit(&src, 0, 0, Some(&paint)).unwrap();
    let px = dst.get_pixel(0, 0).unwrap();
    assert!((126..=129).contains(&px.r), "got {px:?}");
    assert_eq!(px.a, 255);
}

#[test]
fn resize_exact_changes_dimensions() {
    let b = PixelBuffer::filled(8, 6, Rgba8::rgb(10, 20, 30)).unwrap();
    let r = b.resize_exact(4, 3).unwrap();
    assert_eq!(r.dimensions(), (4, 3));
    assert_eq!(r.get_pixel(1, 1).unwrap(), Rgba8::rgb(10, 20, 30));
}

#[test]
fn rgba_image_round_trip_preserves_bytes() {
    let b = PixelBuffer::filled(3, 2, Rgba8::new(9, 8, 7, 6)).unwrap();
    let img = b.to_rgba_image().unwrap();
    let back = PixelBuffer::from_rgba_image(img).unwrap();
    assert_eq!(back, b);
}

#[test]
fn fill_overwrites_every_pixel() {
    let mut b = PixelBuffer::new(2, 2).unwrap();
    b.fill(Rgba8::rgb(9, 8, 7));
    assert!(b.as_raw().chunks_exact(4).all(|px| px == [9, 8, 7, 255]));
}
