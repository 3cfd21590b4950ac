use crate::animation::ease::Ease;
use crate::foundation::core::{Point, Rgba8, Vec2};
use crate::foundation::error::KosmosResult;
use crate::foundation::math::smoothstep;
use crate::glyph::descriptor::{GlyphDescriptor, GlyphPreset, NodeStyle};
use crate::palette::Palette;
use crate::render::surface::{Blend, DrawCmd, GradientStop, Surface};
use crate::timeline::phase::Phase;

/// Progress of the glyph's own reveal: follows the singularity phase, then holds at 1.
pub fn glyph_progress(phase: Phase, phase_progress: f64) -> f64 {
    match phase {
        Phase::Singularity => phase_progress.clamp(0.0, 1.0),
        Phase::Revelation | Phase::Complete => 1.0,
        Phase::Void | Phase::Stardust | Phase::Convergence => 0.0,
    }
}

/// Orbital emblem: rotated rings around a horizontal chain of nodes.
///
/// Drawing is a pure function of the inputs to [`OrbitalGlyph::render`] and the internal `time`
/// accumulator advanced by [`OrbitalGlyph::tick`].
#[derive(Clone, Debug)]
pub struct OrbitalGlyph {
    descriptor: GlyphDescriptor,
    color: Rgba8,
    glow: Rgba8,
    time: f64,
}

impl OrbitalGlyph {
    /// Build a glyph from a preset, colored by `palette`.
    pub fn new(preset: GlyphPreset, palette: &Palette) -> KosmosResult<Self> {
        Self::from_descriptor(preset.descriptor(), palette)
    }

    /// Build a glyph from a custom descriptor.
    pub fn from_descriptor(descriptor: GlyphDescriptor, palette: &Palette) -> KosmosResult<Self> {
        descriptor.validate()?;
        Ok(Self {
            descriptor,
            color: palette.glyph,
            glow: palette.glyph_glow,
            time: 0.0,
        })
    }

    /// Geometry and motion constants.
    pub fn descriptor(&self) -> &GlyphDescriptor {
        &self.descriptor
    }

    /// Accumulated animation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advance the time accumulator by one frame of `dt_secs`.
    pub fn tick(&mut self, dt_secs: f64) {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.time += self.descriptor.motion.time_step * dt_secs * 60.0;
        }
    }

    /// Draw the glyph centered on `center` at `size` pixels.
    pub fn render(
        &self,
        phase: Phase,
        phase_progress: f64,
        size: f64,
        center: Point,
        surface: &mut dyn Surface,
    ) {
        let pp = glyph_progress(phase, phase_progress);
        let opacity = smoothstep(0.0, 0.3, pp);
        if opacity <= 0.0 || !(size.is_finite() && size > 0.0) {
            return;
        }

        let d = &self.descriptor;
        let m = &d.motion;
        let scale = size / d.reference_size;
        let reveal = Ease::OutExpo.apply(pp);

        for (i, orbit) in d.orbits.iter().enumerate() {
            let start = i as f64 * m.orbit_stagger;
            let alpha = smoothstep(start, start + m.orbit_window, reveal) * orbit.opacity * opacity;
            if alpha <= 0.0 {
                continue;
            }
            let jitter = (self.time * m.jitter_freq + i as f64 * m.jitter_index_phase).sin()
                * m.jitter_amplitude_deg;
            surface.draw(DrawCmd::StrokeEllipse {
                center,
                radii: Vec2::new(orbit.rx * scale, orbit.ry * scale),
                rotation: (orbit.rotation_deg + jitter).to_radians(),
                width: if orbit.dotted { 0.8 } else { 1.2 },
                color: self.color.with_opacity(alpha),
                dash: orbit.dotted.then_some(m.dash),
            });
        }

        let half = d.line_half_length * scale;
        let line_alpha = smoothstep(0.2, 0.5, reveal) * 0.6 * opacity;
        if line_alpha > 0.0 {
            surface.draw(DrawCmd::Line {
                from: Point::new(center.x - half, center.y),
                to: Point::new(center.x + half, center.y),
                width: 1.2,
                color: self.color.with_opacity(line_alpha),
            });
        }

        let node_reveal = smoothstep(0.3, 0.7, reveal);
        for (i, node) in d.nodes.iter().enumerate() {
            let start = i as f64 * m.node_stagger;
            let a = smoothstep(start, start + m.node_window, node_reveal) * opacity;
            if a <= 0.0 {
                continue;
            }
            let at = Point::new(center.x + node.offset * half, center.y);
            let radius = node.size * scale;
            let inner = node.inner_size.map(|s| s * scale);

            match node.style {
                NodeStyle::Core => {
                    surface.draw(DrawCmd::RadialGradient {
                        center: at,
                        radius: radius * 2.0,
                        stops: vec![
                            GradientStop::new(0.0, self.glow.with_opacity(0.15 * a)),
                            GradientStop::new(1.0, Rgba8::TRANSPARENT),
                        ],
                        blend: Blend::Normal,
                    });
                    surface.draw(DrawCmd::ring(at, radius, 2.0, self.color.with_opacity(0.8 * a)));
                    let pulse = 0.85 + (self.time * m.pulse_freq).sin() * 0.15;
                    if let Some(inner) = inner {
                        surface.draw(DrawCmd::Circle {
                            center: at,
                            radius: inner,
                            color: self.color.with_opacity(pulse * a),
                        });
                    }
                }
                NodeStyle::Filled => surface.draw(DrawCmd::Circle {
                    center: at,
                    radius,
                    color: self.color.with_opacity(0.9 * a),
                }),
                NodeStyle::Ring => {
                    surface.draw(DrawCmd::ring(at, radius, 1.0, self.color.with_opacity(0.6 * a)));
                    if let Some(inner) = inner {
                        surface.draw(DrawCmd::Circle {
                            center: at,
                            radius: inner,
                            color: self.color.with_opacity(0.9 * a),
                        });
                    }
                }
            }

            if node.has_ring {
                surface.draw(DrawCmd::ring(
                    at,
                    radius + 5.0 * scale,
                    0.6,
                    self.color.with_opacity(0.25 * a),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/renderer.rs"]
mod tests;
