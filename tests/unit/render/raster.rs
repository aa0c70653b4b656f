use super::*;

fn alpha_at(bytes: &[u8], width: u32, x: u32, y: u32) -> u8 {
    bytes[((y * width + x) * 4 + 3) as usize]
}

#[test]
fn empty_layer_is_transparent() {
    let layer = Layer::new(8, 8).unwrap();
    let out = layer.finish();
    assert_eq!(out.len(), 8 * 8 * 4);
    assert!(out.iter().all(|&v| v == 0));
}

#[test]
fn fill_rect_covers_only_its_area() {
    let mut layer = Layer::new(8, 8).unwrap();
    layer.fill_rect(2.0, 2.0, 6.0, 6.0, Rgba8::WHITE);
    let out = layer.finish();
    assert_eq!(alpha_at(&out, 8, 3, 3), 255);
    assert_eq!(alpha_at(&out, 8, 0, 0), 0);
    assert_eq!(alpha_at(&out, 8, 7, 7), 0);
}

#[test]
fn fill_circle_is_round() {
    let mut layer = Layer::new(21, 21).unwrap();
    layer.fill_circle(10.5, 10.5, 8.0, Rgba8::BLACK);
    let out = layer.finish();
    assert_eq!(alpha_at(&out, 21, 10, 10), 255);
    assert_eq!(alpha_at(&out, 21, 0, 0), 0);
}

#[test]
fn degenerate_line_draws_nothing() {
    let mut layer = Layer::new(4, 4).unwrap();
    layer.fill_line((1.0, 1.0), (1.0, 1.0), 2.0, Rgba8::WHITE);
    assert!(layer.finish().iter().all(|&v| v == 0));
}

#[test]
fn composite_onto_paints_target() {
    let mut target = PixelBuffer::filled(4, 4, Rgba8::BLACK).unwrap();
    let mut layer = Layer::for_buffer(&target).unwrap();
    layer.fill_rect(0.0, 0.0, 2.0, 4.0, Rgba8::WHITE);
    layer.composite_onto(&mut target).unwrap();
    assert_eq!(target.get_pixel(0, 0).unwrap(), Rgba8::WHITE);
    assert_eq!(target.get_pixel(3, 0).unwrap(), Rgba8::BLACK);
}

#[test]
fn oversized_layer_is_rejected() {
    assert!(Layer::new(70_000, 1).is_err());
}
