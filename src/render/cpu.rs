use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Rgba8, Viewport};
use crate::foundation::error::{KosmosError, KosmosResult};
use crate::render::frame::FrameRGBA;
use crate::render::surface::{Blend, DrawCmd, GradientStop, Surface};

const PATH_TOLERANCE: f64 = 0.1;

/// CPU raster surface powered by `vello_cpu`.
///
/// Commands are encoded as they arrive and rasterized by [`CpuSurface::finish`]. A
/// [`DrawCmd::Clear`] discards everything encoded so far, so each frame is a full repaint.
pub struct CpuSurface {
    viewport: Viewport,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    encoded: usize,
}

impl CpuSurface {
    /// Allocate a surface. Degenerate or oversized viewports are rejected.
    pub fn new(viewport: Viewport) -> KosmosResult<Self> {
        if viewport.is_degenerate() {
            return Err(KosmosError::render(format!(
                "cannot allocate a {}x{} surface",
                viewport.width, viewport.height
            )));
        }
        let (w, h) = viewport.to_u16()?;
        Ok(Self {
            viewport,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            encoded: 0,
        })
    }

    /// Drop all encoded commands; the next frame starts from transparent.
    pub fn reset(&mut self) {
        self.ctx.reset();
        self.encoded = 0;
    }

    /// Number of commands encoded since the last reset or clear.
    pub fn encoded(&self) -> usize {
        self.encoded
    }

    /// Rasterize the encoded commands and read back premultiplied pixels.
    ///
    /// The encoded scene is kept; call [`CpuSurface::reset`] or draw a clear to start over.
    pub fn finish(&mut self) -> FrameRGBA {
        self.ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: self.viewport.width,
            height: self.viewport.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
        }
    }

    fn full_rect(&self) -> vello_cpu::kurbo::Rect {
        vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        )
    }
}

impl Surface for CpuSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn draw(&mut self, cmd: DrawCmd) {
        if let DrawCmd::Clear(_) = cmd {
            self.reset();
        }

        let full = self.full_rect();
        let ctx = &mut self.ctx;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());

        match cmd {
            DrawCmd::Clear(color) => {
                if color.a > 0 {
                    ctx.set_paint(color_to_cpu(color));
                    ctx.fill_rect(&full);
                }
            }
            DrawCmd::RadialGradient {
                center,
                radius,
                stops,
                blend,
            } => {
                if !is_positive(radius) || stops.is_empty() {
                    return;
                }
                ctx.set_blend_mode(blend_to_cpu(blend));
                let center = point_to_cpu(center);
                let gradient = vello_cpu::peniko::Gradient::new_radial(center, radius as f32)
                    .with_stops(stops_to_cpu(&stops).as_slice());
                ctx.set_paint(gradient);
                let circle = vello_cpu::kurbo::Circle::new(center, radius);
                ctx.fill_path(&circle.to_path(PATH_TOLERANCE));
            }
            DrawCmd::LinearGradientRect {
                origin,
                size,
                stops,
            } => {
                if size.x <= 0.0 || size.y <= 0.0 || stops.is_empty() {
                    return;
                }
                let rect = rect_to_cpu(origin, size);
                let gradient =
                    vello_cpu::peniko::Gradient::new_linear((rect.x0, rect.y0), (rect.x1, rect.y0))
                        .with_stops(stops_to_cpu(&stops).as_slice());
                ctx.set_paint(gradient);
                ctx.fill_rect(&rect);
            }
            DrawCmd::FillRect {
                origin,
                size,
                color,
            } => {
                if size.x <= 0.0 || size.y <= 0.0 || color.a == 0 {
                    return;
                }
                ctx.set_paint(color_to_cpu(color));
                ctx.fill_rect(&rect_to_cpu(origin, size));
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => {
                if !is_positive(radius) || color.a == 0 {
                    return;
                }
                ctx.set_paint(color_to_cpu(color));
                let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
                ctx.fill_path(&circle.to_path(PATH_TOLERANCE));
            }
            DrawCmd::StrokeEllipse {
                center,
                radii,
                rotation,
                width,
                color,
                dash,
            } => {
                if !is_positive(width) || color.a == 0 || radii.x <= 0.0 || radii.y <= 0.0 {
                    return;
                }
                let mut stroke = vello_cpu::kurbo::Stroke::new(width);
                if let Some(pattern) = dash {
                    stroke = stroke.with_dashes(0.0, pattern);
                }
                ctx.set_stroke(stroke);
                ctx.set_paint(color_to_cpu(color));
                let center = point_to_cpu(center);
                let ellipse = vello_cpu::kurbo::Ellipse::new(center, (radii.x, radii.y), rotation);
                ctx.stroke_path(&ellipse.to_path(PATH_TOLERANCE));
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => {
                if !is_positive(width) || color.a == 0 {
                    return;
                }
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
                ctx.set_paint(color_to_cpu(color));
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(from));
                path.line_to(point_to_cpu(to));
                ctx.stroke_path(&path);
            }
        }
        self.encoded += 1;
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn point_to_cpu(p: crate::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(origin: crate::Point, size: crate::Vec2) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn stops_to_cpu(stops: &[GradientStop]) -> Vec<(f32, vello_cpu::peniko::Color)> {
    stops
        .iter()
        .map(|s| (s.offset.clamp(0.0, 1.0), color_to_cpu(s.color)))
        .collect()
}

fn blend_to_cpu(blend: Blend) -> vello_cpu::peniko::BlendMode {
    match blend {
        Blend::Normal => vello_cpu::peniko::BlendMode::default(),
        Blend::Additive => vello_cpu::peniko::BlendMode::new(
            vello_cpu::peniko::Mix::Normal,
            vello_cpu::peniko::Compose::Plus,
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
