//! Luminance-aware film grain.

use crate::effects::pass::{ColorBuffer, PassKind, SceneInputs, ShaderPass, luma, map_pixels};
use crate::effects::passes::{mix, pass_accessors};
use crate::effects::uniforms::{UniformValue, Uniforms};
use crate::foundation::error::KosmosResult;
use crate::foundation::math::hash21;

/// Animated grain, attenuated in bright regions.
#[derive(Clone, Debug)]
pub struct FilmGrainPass {
    uniforms: Uniforms,
}

impl FilmGrainPass {
    /// Grain of the given strength, with unit response and half luminance attenuation.
    pub fn new(intensity: f32) -> Self {
        Self {
            uniforms: Uniforms::new()
                .with("intensity", UniformValue::Float(intensity))
                .with("time", UniformValue::Float(0.0))
                .with("response", UniformValue::Float(1.0))
                .with("lum_amount", UniformValue::Float(0.5)),
        }
    }
}

/// Signed grain value in `[-0.5, 0.5)` for a pixel at `uv` and `time`.
pub fn grain_at(u: f32, v: f32, time: f32) -> f32 {
    let v = v * hash21(v, time);
    hash21(u, v) - 0.5
}

impl ShaderPass for FilmGrainPass {
    pass_accessors!("film-grain", PassKind::FilmGrain);

    fn wgsl_source(&self) -> Option<&'static str> {
        Some(include_str!("../shaders/grain.wgsl"))
    }

    fn apply(
        &self,
        src: &ColorBuffer,
        _scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let intensity = self.uniforms.float_or("intensity", 0.05);
        let time = self.uniforms.float_or("time", 0.0);
        let response = self.uniforms.float_or("response", 1.0);
        let lum_amount = self.uniforms.float_or("lum_amount", 0.5);

        map_pixels(src, dst, |_, _, (u, v), c| {
            let amount = mix(intensity, intensity * 0.5, luma(c) * lum_amount);
            let g = grain_at(u, v, time) * amount * response;
            [c[0] + g, c[1] + g, c[2] + g, c[3]]
        })
    }
}
