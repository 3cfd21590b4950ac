use crate::foundation::core::{Point, Rgba8, Vec2};
use crate::palette::Palette;
use crate::render::surface::{DrawCmd, GradientStop, Surface};

/// Thin progress indicator anchored to the bottom center of the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressBar {
    /// Track width in pixels.
    pub width: f64,
    /// Track height in pixels.
    pub height: f64,
    /// Distance from the bottom edge.
    pub bottom_margin: f64,
    /// Unfilled track color.
    pub track: Rgba8,
    /// Fill gradient, left to right.
    pub fill: [Rgba8; 3],
}

impl ProgressBar {
    /// Bar tinted with the palette's progress colors.
    pub fn new(palette: &Palette) -> Self {
        Self {
            width: 192.0,
            height: 2.0,
            bottom_margin: 32.0,
            track: Rgba8::WHITE.with_opacity(0.1),
            fill: palette.progress,
        }
    }

    /// Draw the bar at `progress` in `[0, 1]`.
    pub fn render(&self, progress: f64, surface: &mut dyn Surface) {
        let vp = surface.viewport();
        if vp.is_degenerate() {
            return;
        }
        let origin = Point::new(
            (f64::from(vp.width) - self.width) / 2.0,
            f64::from(vp.height) - self.bottom_margin - self.height,
        );
        surface.draw(DrawCmd::FillRect {
            origin,
            size: Vec2::new(self.width, self.height),
            color: self.track,
        });

        let filled = self.width * progress.clamp(0.0, 1.0);
        if filled <= 0.0 {
            return;
        }
        surface.draw(DrawCmd::LinearGradientRect {
            origin,
            size: Vec2::new(filled, self.height),
            stops: vec![
                GradientStop::new(0.0, self.fill[0]),
                GradientStop::new(0.5, self.fill[1]),
                GradientStop::new(1.0, self.fill[2]),
            ],
        });
    }
}
