//! Quantum depth grade: a three-wave interference field tinting the scene.

use crate::effects::pass::{ColorBuffer, PassKind, SceneInputs, ShaderPass, map_pixels};
use crate::effects::passes::{mix, pass_accessors};
use crate::effects::uniforms::{UniformValue, Uniforms};
use crate::foundation::error::KosmosResult;

/// Interference-driven tint between a near and a far color.
#[derive(Clone, Debug)]
pub struct QuantumDepthPass {
    uniforms: Uniforms,
}

impl QuantumDepthPass {
    /// Grade at `intensity` with the stock colors and wave shape.
    pub fn new(intensity: f32) -> Self {
        Self {
            uniforms: Uniforms::new()
                .with("intensity", UniformValue::Float(intensity))
                .with("time", UniformValue::Float(0.0))
                .with("near_color", UniformValue::Vec3([0.9, 0.95, 1.0]))
                .with("far_color", UniformValue::Vec3([0.7, 0.8, 1.0]))
                .with("wave_frequency", UniformValue::Float(10.0))
                .with("wave_amplitude", UniformValue::Float(0.02)),
        }
    }
}

/// Mean of three traveling waves at `uv`; bounded by `amplitude`.
pub fn interference(u: f32, v: f32, time: f32, frequency: f32, amplitude: f32) -> f32 {
    let w1 = (u * frequency + time).sin() * amplitude;
    let w2 = (v * frequency * 0.7 + time * 1.3).cos() * amplitude;
    let w3 = ((u + v) * frequency * 0.5 + time * 0.8).sin() * amplitude;
    (w1 + w2 + w3) / 3.0
}

impl ShaderPass for QuantumDepthPass {
    pass_accessors!("quantum-depth", PassKind::QuantumDepth);

    fn wgsl_source(&self) -> Option<&'static str> {
        Some(include_str!("../shaders/quantum.wgsl"))
    }

    fn apply(
        &self,
        src: &ColorBuffer,
        _scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let u = &self.uniforms;
        let intensity = u.float_or("intensity", 0.1);
        let time = u.float_or("time", 0.0);
        let near = u.vec3_or("near_color", [0.9, 0.95, 1.0]);
        let far = u.vec3_or("far_color", [0.7, 0.8, 1.0]);
        let freq = u.float_or("wave_frequency", 10.0);
        let amp = u.float_or("wave_amplitude", 0.02);

        map_pixels(src, dst, |_, _, (x, y), c| {
            let t = interference(x, y, time, freq, amp) + 0.5;
            let mut out = c;
            for ch in 0..3 {
                let tint = mix(near[ch], far[ch], t);
                out[ch] = mix(c[ch], c[ch] * tint, intensity);
            }
            out
        })
    }
}
