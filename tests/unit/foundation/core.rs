use super::*;

#[test]
fn hex_parses_rgb_and_argb() {
    assert_eq!(
        Rgba8::from_hex("#F5E6D3").unwrap(),
        Rgba8::rgb(0xF5, 0xE6, 0xD3)
    );
    assert_eq!(
        Rgba8::from_hex("80FF0000").unwrap(),
        Rgba8::new(255, 0, 0, 0x80)
    );
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#GG0000").is_err());
}

#[test]
fn hex_round_trips_through_serde() {
    let c = Rgba8::new(10, 20, 30, 40);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#280A141E\"");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}

#[test]
fn premul_scales_color_by_alpha() {
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
    assert_eq!(Rgba8::new(200, 100, 0, 0).to_premul(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::new(255, 255, 255, 128).to_premul(), [128, 128, 128, 128]);
}

#[test]
fn pixel_rect_centers() {
    let r = PixelRect {
        x: 0,
        y: 700,
        width: 900,
        height: 120,
    };
    assert_eq!(r.center_x(), 450.0);
    assert_eq!(r.center_y(), 760.0);
}
