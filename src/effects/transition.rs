//! Closing transition toward a solid color, driven by its own progress uniform.

use crate::animation::ease::Ease;
use crate::config::{TransitionConfig, TransitionKind};
use crate::effects::pass::{ColorBuffer, PassKind, SceneInputs, ShaderPass, map_pixels};
use crate::effects::passes::{mix, pass_accessors, smoothstep32};
use crate::effects::uniforms::{UniformValue, Uniforms};
use crate::foundation::error::KosmosResult;

/// Largest pixelation block, in pixels, reached at full progress.
const MAX_BLOCK_PX: f32 = 100.0;

/// Fade, radial wipe, pixelate or glitch toward `color` over `duration` seconds.
///
/// The pass stays idle until global progress reaches `start_at`, then `progress` advances in
/// [`ShaderPass::update`]. An unknown `transition_type` passes through.
#[derive(Clone, Debug)]
pub struct TransitionPass {
    uniforms: Uniforms,
    start_at: f32,
    armed: bool,
}

impl TransitionPass {
    /// Build from configuration, starting at zero progress.
    pub fn new(config: &TransitionConfig) -> Self {
        Self {
            uniforms: Uniforms::new()
                .with("progress", UniformValue::Float(0.0))
                .with("transition_type", UniformValue::Int(config.kind.code()))
                .with("color", UniformValue::Vec3(config.color))
                .with("time", UniformValue::Float(0.0))
                .with("duration", UniformValue::Float(config.duration_secs)),
            start_at: config.start_at,
            armed: false,
        }
    }

    /// Whether the start point has been reached.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Current eased coverage in `[0, 1]`.
    pub fn eased_progress(&self) -> f32 {
        let p = self.uniforms.float_or("progress", 0.0);
        Ease::InOutCubic.apply(f64::from(p)) as f32
    }

    /// Restart from zero coverage.
    pub fn restart(&mut self) {
        self.uniforms.set("progress", UniformValue::Float(0.0));
    }
}

fn over_color(c: [f32; 4], color: [f32; 3], t: f32) -> [f32; 4] {
    [
        mix(c[0], color[0], t),
        mix(c[1], color[1], t),
        mix(c[2], color[2], t),
        mix(c[3], 1.0, t),
    ]
}

impl ShaderPass for TransitionPass {
    pass_accessors!("transition", PassKind::Transition);

    fn track_progress(&mut self, global_progress: f32) {
        if !self.armed && global_progress >= self.start_at {
            self.armed = true;
            self.restart();
        }
    }

    fn update(&mut self, dt: f32) {
        self.uniforms.advance_time(dt);
        let duration = self.uniforms.float_or("duration", 0.0);
        if self.armed && duration > 0.0 && self.uniforms.contains("progress") {
            let p = self.uniforms.float_or("progress", 0.0);
            let next = (p + dt / duration).clamp(0.0, 1.0);
            self.uniforms.set("progress", UniformValue::Float(next));
        }
    }

    fn apply(
        &self,
        src: &ColorBuffer,
        _scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let p = self.eased_progress();
        let color = self.uniforms.vec3_or("color", [0.0; 3]);
        let time = self.uniforms.float_or("time", 0.0);
        let kind = TransitionKind::from_code(self.uniforms.int_or("transition_type", 0));

        match kind {
            Some(TransitionKind::Fade) => {
                map_pixels(src, dst, |_, _, _, c| over_color(c, color, p))
            }
            Some(TransitionKind::RadialWipe) => map_pixels(src, dst, |_, _, (u, v), c| {
                let dist = ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt();
                let wipe = smoothstep32(p * 1.5 - 0.5, p * 1.5, dist);
                over_color(c, color, 1.0 - wipe)
            }),
            Some(TransitionKind::Pixelate) => {
                let block = mix(1.0, MAX_BLOCK_PX, p).max(1.0);
                map_pixels(src, dst, |x, y, _, _| {
                    let bx = ((x as f32 / block).floor() * block + block * 0.5).floor();
                    let by = ((y as f32 / block).floor() * block + block * 0.5).floor();
                    over_color(src.get(bx as i64, by as i64), color, p)
                })
            }
            Some(TransitionKind::Glitch) => map_pixels(src, dst, |_, _, (u, v), _| {
                let glitch = (v * 100.0 + time * 10.0).sin() * 0.5 + 0.5;
                let strength = p * glitch;
                over_color(src.sample_uv(u + strength * 0.1, v), color, strength)
            }),
            None => map_pixels(src, dst, |_, _, _, c| c),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transition.rs"]
mod tests;
