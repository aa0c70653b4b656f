use super::*;

#[test]
fn zero_opacity_keeps_destination() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn transparent_source_keeps_destination() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn empty_destination_takes_source() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn premultiply_round_trip_is_close() {
    let px = [200, 100, 50, 128];
    let back = unpremultiply(premultiply(px));
    for i in 0..3 {
        assert!((i32::from(back[i]) - i32::from(px[i])).abs() <= 2);
    }
    assert_eq!(back[3], 128);
    assert_eq!(premultiply([9, 9, 9, 0]), [0, 0, 0, 0]);
}

#[test]
fn screen_with_black_or_transparent_source_is_noop() {
    let dst = [40, 80, 120, 255];
    assert_eq!(screen_straight(dst, [0, 0, 0, 255]), dst);
    assert_eq!(screen_straight(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn screen_never_darkens() {
    let dst = [40, 80, 120, 255];
    let out = screen_straight(dst, [255, 200, 0, 150]);
    for i in 0..3 {
        assert!(out[i] >= dst[i]);
    }
    assert_eq!(screen_straight(dst, [255, 255, 255, 255]), [255, 255, 255, 255]);
}

#[test]
fn over_layer_requires_matching_size() {
    let mut dst = PixelBuffer::new(2, 2).unwrap();
    assert!(over_layer_in_place(&mut dst, &[0; 8], 1.0).is_err());
    over_layer_in_place(&mut dst, &[255; 16], 1.0).unwrap();
    assert!(dst.as_raw().iter().all(|&v| v == 255));
}

#[test]
fn half_opacity_white_over_black_is_mid_grey() {
    assert_eq!(over([0, 0, 0, 255], [255, 255, 255, 255], 0.5), [128, 128, 128, 255]);
    assert_eq!(over([0, 0, 0, 255], [255, 255, 255, 255], f32::NAN), [0, 0, 0, 255]);
}
