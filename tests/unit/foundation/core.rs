use super::*;

#[test]
fn viewport_degenerate_when_any_dimension_is_zero() {
    assert!(Viewport::new(0, 0).is_degenerate());
    assert!(Viewport::new(640, 0).is_degenerate());
    assert!(Viewport::new(0, 480).is_degenerate());
    assert!(!Viewport::new(1, 1).is_degenerate());
}

#[test]
fn viewport_center_and_dims() {
    let vp = Viewport::new(800, 600);
    assert_eq!(vp.center(), Point::new(400.0, 300.0));
    assert_eq!(vp.max_dim(), 800.0);
    assert_eq!(vp.min_dim(), 600.0);
    assert_eq!(vp.pixel_count(), 480_000);
}

#[test]
fn viewport_to_u16_rejects_oversized() {
    assert_eq!(Viewport::new(64, 32).to_u16().unwrap(), (64, 32));
    assert!(Viewport::new(70_000, 32).to_u16().is_err());
}

#[test]
fn rgba_from_hex_splits_channels() {
    let c = Rgba8::from_hex(0x8B00FF);
    assert_eq!(c, Rgba8::new(0x8B, 0x00, 0xFF, 255));
}

#[test]
fn with_opacity_rounds_and_clamps() {
    let c = Rgba8::from_hex(0xFFD700);
    assert_eq!(c.with_opacity(0.5).a, 128);
    assert_eq!(c.with_opacity(2.0).a, 255);
    assert_eq!(c.with_opacity(-1.0).a, 0);
    assert_eq!(c.with_opacity(f64::NAN).a, 0);
}

#[test]
fn premul_scales_color_by_alpha() {
    assert_eq!(Rgba8::new(255, 128, 0, 0).to_premul(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::new(255, 128, 0, 255).to_premul(), [255, 128, 0, 255]);
    let half = Rgba8::new(200, 100, 50, 128).to_premul();
    assert_eq!(half[3], 128);
    assert!((i32::from(half[0]) - 100).abs() <= 1);
}
