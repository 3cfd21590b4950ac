use crate::foundation::core::{Point, Rgba8};
use crate::foundation::math::{Rng64, smoothstep};
use crate::palette::Palette;
use crate::particles::particle::orbit_point;
use crate::render::surface::{Blend, DrawCmd, GradientStop, Surface};
use crate::timeline::phase::Phase;

/// Number of clouds spawned around the center.
pub const NEBULA_COUNT: usize = 6;

/// Static background cloud. Only its opacity changes, driven by the phase.
#[derive(Clone, Debug, PartialEq)]
pub struct NebulaCloud {
    /// Cloud center.
    pub center: Point,
    /// Gradient radius.
    pub radius: f64,
    /// Inner gradient color.
    pub inner: Rgba8,
    /// Mid gradient color.
    pub outer: Rgba8,
    /// Orientation, radians. Carried for hosts drawing textured clouds.
    pub rotation: f64,
    /// Size multiplier. Carried for hosts drawing textured clouds.
    pub scale: f64,
}

/// Spawn the ring of clouds around `center`.
pub fn spawn_nebulae(center: Point, palette: &Palette, rng: &mut Rng64) -> Vec<NebulaCloud> {
    (0..NEBULA_COUNT)
        .map(|i| {
            let angle = (i as f64 / NEBULA_COUNT as f64) * std::f64::consts::TAU;
            let distance = rng.next_f64_01() * 200.0 + 150.0;
            let radius = rng.next_f64_01() * 150.0 + 100.0;
            NebulaCloud {
                center: orbit_point(center, distance, angle),
                radius,
                inner: palette.nebula_inner,
                outer: if i % 2 == 0 {
                    palette.nebula_outer_even
                } else {
                    palette.nebula_outer_odd
                },
                rotation: rng.next_f64_01() * std::f64::consts::PI,
                scale: rng.next_f64_01() * 0.5 + 0.5,
            }
        })
        .collect()
}

/// Cloud opacity for a phase: hidden in the void, otherwise ramping to 0.3.
pub fn nebula_opacity(phase: Phase, phase_progress: f64) -> f64 {
    match phase {
        Phase::Void => 0.0,
        _ => smoothstep(0.0, 0.3, phase_progress) * 0.3,
    }
}

impl NebulaCloud {
    /// Draw the cloud at `opacity`; nothing is drawn when fully transparent.
    pub fn render(&self, opacity: f64, surface: &mut dyn Surface) {
        if opacity <= 0.0 {
            return;
        }
        surface.draw(DrawCmd::RadialGradient {
            center: self.center,
            radius: self.radius,
            stops: vec![
                GradientStop::new(0.0, self.inner.with_opacity(opacity)),
                GradientStop::new(0.5, self.outer.with_opacity(opacity * 0.5)),
                GradientStop::new(1.0, Rgba8::TRANSPARENT),
            ],
            blend: Blend::Normal,
        });
    }
}
