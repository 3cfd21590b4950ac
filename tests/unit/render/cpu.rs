use super::*;
use crate::foundation::core::{Point, Vec2};

fn surface(w: u32, h: u32) -> CpuSurface {
    CpuSurface::new(Viewport::new(w, h)).unwrap()
}

#[test]
fn rejects_degenerate_viewport() {
    assert!(CpuSurface::new(Viewport::new(0, 10)).is_err());
    assert!(CpuSurface::new(Viewport::new(10, 0)).is_err());
}

#[test]
fn clear_fills_every_pixel() {
    let mut s = surface(8, 4);
    s.draw(DrawCmd::Clear(Rgba8::new(10, 20, 30, 255)));
    let frame = s.finish();
    assert_eq!(frame.data.len(), 8 * 4 * 4);
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, &[10, 20, 30, 255]);
    }
}

#[test]
fn clear_discards_previous_draws() {
    let mut s = surface(16, 16);
    s.draw(DrawCmd::Circle {
        center: Point::new(8.0, 8.0),
        radius: 6.0,
        color: Rgba8::WHITE,
    });
    s.draw(DrawCmd::Clear(Rgba8::TRANSPARENT));
    assert_eq!(s.encoded(), 1);
    let frame = s.finish();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn circle_covers_center_not_corner() {
    let mut s = surface(32, 32);
    s.draw(DrawCmd::Circle {
        center: Point::new(16.0, 16.0),
        radius: 8.0,
        color: Rgba8::new(255, 0, 0, 255),
    });
    let frame = s.finish();
    assert_eq!(frame.pixel(16, 16), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn radial_gradient_fades_toward_edge() {
    let mut s = surface(64, 64);
    s.draw(DrawCmd::RadialGradient {
        center: Point::new(32.0, 32.0),
        radius: 30.0,
        stops: vec![
            GradientStop::new(0.0, Rgba8::new(255, 255, 255, 255)),
            GradientStop::new(1.0, Rgba8::TRANSPARENT),
        ],
        blend: Blend::Normal,
    });
    let frame = s.finish();
    let center = frame.pixel(32, 32).unwrap()[3];
    let near_edge = frame.pixel(32, 58).unwrap()[3];
    assert!(center > near_edge);
    assert_eq!(frame.pixel(0, 0).unwrap()[3], 0);
}

#[test]
fn additive_glow_brightens_existing_pixels() {
    let mut s = surface(16, 16);
    s.draw(DrawCmd::Clear(Rgba8::new(40, 40, 40, 255)));
    s.draw(DrawCmd::RadialGradient {
        center: Point::new(8.0, 8.0),
        radius: 8.0,
        stops: vec![
            GradientStop::new(0.0, Rgba8::new(100, 100, 100, 255)),
            GradientStop::new(1.0, Rgba8::new(100, 100, 100, 255)),
        ],
        blend: Blend::Additive,
    });
    let frame = s.finish();
    let px = frame.pixel(8, 8).unwrap();
    assert!(px[0] > 100, "additive result {px:?}");
}

#[test]
fn strokes_and_rects_draw_something() {
    let mut s = surface(64, 64);
    s.draw(DrawCmd::StrokeEllipse {
        center: Point::new(32.0, 32.0),
        radii: Vec2::new(20.0, 10.0),
        rotation: 0.3,
        width: 2.0,
        color: Rgba8::WHITE,
        dash: Some([3.0, 5.0]),
    });
    s.draw(DrawCmd::Line {
        from: Point::new(0.0, 60.0),
        to: Point::new(64.0, 60.0),
        width: 2.0,
        color: Rgba8::WHITE,
    });
    s.draw(DrawCmd::FillRect {
        origin: Point::new(0.0, 0.0),
        size: Vec2::new(4.0, 4.0),
        color: Rgba8::WHITE,
    });
    let frame = s.finish();
    assert_eq!(frame.pixel(1, 1), Some([255, 255, 255, 255]));
    assert!(frame.pixel(32, 60).unwrap()[3] > 0);
    let lit = frame.data.chunks_exact(4).filter(|px| px[3] > 0).count();
    assert!(lit > 16 + 64);
}

#[test]
fn invisible_commands_are_skipped() {
    let mut s = surface(8, 8);
    s.draw(DrawCmd::Circle {
        center: Point::new(4.0, 4.0),
        radius: 0.0,
        color: Rgba8::WHITE,
    });
    s.draw(DrawCmd::Circle {
        center: Point::new(4.0, 4.0),
        radius: 2.0,
        color: Rgba8::TRANSPARENT,
    });
    assert_eq!(s.encoded(), 0);
}
