//! Standard passes: the stock effects that surround the custom ones.

use crate::config::KernelSize;
use crate::effects::blur::blur_separable;
use crate::effects::pass::{
    ColorBuffer, PassKind, SceneInputs, ShaderPass, ensure_same_size, luma, map_pixels,
};
use crate::effects::uniforms::{UniformValue, Uniforms};
use crate::foundation::error::KosmosResult;
use crate::foundation::math::hash21;

/// Implements the accessor half of [`ShaderPass`] for a struct with a `uniforms` field.
macro_rules! pass_accessors {
    ($name:literal, $kind:expr) => {
        fn name(&self) -> &'static str {
            $name
        }

        fn kind(&self) -> PassKind {
            $kind
        }

        fn uniforms(&self) -> &Uniforms {
            &self.uniforms
        }

        fn uniforms_mut(&mut self) -> &mut Uniforms {
            &mut self.uniforms
        }
    };
}
pub(crate) use pass_accessors;

pub(crate) fn smoothstep32(edge0: f32, edge1: f32, x: f32) -> f32 {
    crate::foundation::math::smoothstep(f64::from(edge0), f64::from(edge1), f64::from(x)) as f32
}

pub(crate) fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Luma edge detection; blends high-contrast pixels toward their neighborhood.
#[derive(Clone, Debug)]
pub struct AntiAliasPass {
    uniforms: Uniforms,
}

impl AntiAliasPass {
    /// Default thresholds.
    pub fn new() -> Self {
        Self {
            uniforms: Uniforms::new()
                .with("edge_threshold", UniformValue::Float(0.1))
                .with("strength", UniformValue::Float(0.75)),
        }
    }
}

impl Default for AntiAliasPass {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderPass for AntiAliasPass {
    pass_accessors!("anti-alias", PassKind::AntiAlias);

    fn apply(
        &self,
        src: &ColorBuffer,
        _scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let threshold = self.uniforms.float_or("edge_threshold", 0.1);
        let strength = self.uniforms.float_or("strength", 0.75);
        map_pixels(src, dst, |x, y, _, c| {
            let (x, y) = (i64::from(x), i64::from(y));
            let n = [
                src.get(x, y - 1),
                src.get(x, y + 1),
                src.get(x - 1, y),
                src.get(x + 1, y),
            ];
            let l = luma(c);
            let (lo, hi) = n
                .iter()
                .map(|p| luma(*p))
                .fold((l, l), |(lo, hi), v| (lo.min(v), hi.max(v)));
            let contrast = hi - lo;
            if contrast < threshold {
                return c;
            }
            let ramp = (contrast - threshold) / (1.0 - threshold).max(1e-6);
            let k = strength * ramp.clamp(0.0, 1.0);
            let mut out = c;
            for ch in 0..3 {
                let avg = n.iter().map(|p| p[ch]).sum::<f32>() / 4.0;
                out[ch] = mix(c[ch], avg, k * 0.5);
            }
            out
        })
    }
}

/// Thresholded highlights, Gaussian-blurred and added back.
#[derive(Clone, Debug)]
pub struct BloomPass {
    uniforms: Uniforms,
}

impl BloomPass {
    /// Bloom with the given strength, threshold ramp and kernel class.
    pub fn new(intensity: f32, threshold: f32, smoothing: f32, kernel: KernelSize) -> Self {
        Self {
            uniforms: Uniforms::new()
                .with("intensity", UniformValue::Float(intensity))
                .with("luminance_threshold", UniformValue::Float(threshold))
                .with("luminance_smoothing", UniformValue::Float(smoothing))
                .with("kernel_radius", UniformValue::Int(kernel.radius() as i32)),
        }
    }
}

impl ShaderPass for BloomPass {
    pass_accessors!("bloom", PassKind::Bloom);

    fn apply(
        &self,
        src: &ColorBuffer,
        _scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        ensure_same_size(src, dst)?;
        let intensity = self.uniforms.float_or("intensity", 0.5);
        let threshold = self.uniforms.float_or("luminance_threshold", 0.8);
        let smoothing = self.uniforms.float_or("luminance_smoothing", 0.3);
        let radius = self.uniforms.int_or("kernel_radius", 7).max(0) as u32;

        let mut bright = ColorBuffer::new(src.width(), src.height());
        map_pixels(src, &mut bright, |_, _, _, c| {
            let k = smoothstep32(threshold, threshold + smoothing, luma(c)) * c[3];
            [c[0] * k, c[1] * k, c[2] * k, 1.0]
        })?;
        let sigma = (radius as f32 * 0.5).max(0.5);
        let glow = blur_separable(&bright, radius, sigma)?;

        let glow = glow.pixels();
        map_pixels(src, dst, |x, y, _, c| {
            let g = glow[(y * src.width() + x) as usize];
            [
                c[0] + g[0] * intensity,
                c[1] + g[1] * intensity,
                c[2] + g[2] * intensity,
                c[3],
            ]
        })
    }
}

/// Depth-driven box blur. Passes its input through without a depth buffer.
#[derive(Clone, Debug)]
pub struct DepthOfFieldPass {
    uniforms: Uniforms,
}

impl DepthOfFieldPass {
    /// Focus at `focus_distance` with blur ramping over `focal_length`, up to `bokeh_scale` px.
    pub fn new(focus_distance: f32, focal_length: f32, bokeh_scale: f32) -> Self {
        Self {
            uniforms: Uniforms::new()
                .with("focus_distance", UniformValue::Float(focus_distance))
                .with("focal_length", UniformValue::Float(focal_length))
                .with("bokeh_scale", UniformValue::Float(bokeh_scale)),
        }
    }
}

impl ShaderPass for DepthOfFieldPass {
    pass_accessors!("depth-of-field", PassKind::DepthOfField);

    fn apply(
        &self,
        src: &ColorBuffer,
        scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let Some(depth) = scene.depth_for(src.width(), src.height()) else {
            return map_pixels(src, dst, |_, _, _, c| c);
        };
        let focus = self.uniforms.float_or("focus_distance", 0.01);
        let focal = self.uniforms.float_or("focal_length", 0.02).max(1e-6);
        let bokeh = self.uniforms.float_or("bokeh_scale", 2.0).max(0.0);

        map_pixels(src, dst, |x, y, _, c| {
            let d = depth[(y * src.width() + x) as usize];
            let coc = ((d - focus).abs() / focal).min(1.0) * bokeh;
            let r = coc.round() as i64;
            if r <= 0 {
                return c;
            }
            let (x, y) = (i64::from(x), i64::from(y));
            let mut acc = [0f32; 4];
            let mut n = 0f32;
            for dy in -r..=r {
                for dx in -r..=r {
                    let p = src.get(x + dx, y + dy);
                    for ch in 0..4 {
                        acc[ch] += p[ch];
                    }
                    n += 1.0;
                }
            }
            acc.map(|v| v / n)
        })
    }
}

/// Red and blue sampled at opposite UV offsets.
#[derive(Clone, Debug)]
pub struct ChromaticAberrationPass {
    uniforms: Uniforms,
}

impl ChromaticAberrationPass {
    /// Offset applied on both axes, in UV units.
    pub fn new(offset: f32) -> Self {
        Self {
            uniforms: Uniforms::new().with("offset", UniformValue::Vec2([offset, offset])),
        }
    }
}

impl ShaderPass for ChromaticAberrationPass {
    pass_accessors!("chromatic-aberration", PassKind::ChromaticAberration);

    fn apply(
        &self,
        src: &ColorBuffer,
        _scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let [ox, oy] = self.uniforms.vec2_or("offset", [0.001, 0.001]);
        map_pixels(src, dst, |_, _, (u, v), c| {
            let r = src.sample_uv(u + ox, v + oy)[0];
            let b = src.sample_uv(u - ox, v - oy)[2];
            [r, c[1], b, c[3]]
        })
    }
}

/// Radial darkening toward the corners.
#[derive(Clone, Debug)]
pub struct VignettePass {
    uniforms: Uniforms,
}

impl VignettePass {
    /// Vignette with the given darkness and offset.
    pub fn new(darkness: f32, offset: f32) -> Self {
        Self {
            uniforms: Uniforms::new()
                .with("darkness", UniformValue::Float(darkness))
                .with("offset", UniformValue::Float(offset)),
        }
    }
}

impl ShaderPass for VignettePass {
    pass_accessors!("vignette", PassKind::Vignette);

    fn apply(
        &self,
        src: &ColorBuffer,
        _scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let darkness = self.uniforms.float_or("darkness", 0.4);
        let offset = self.uniforms.float_or("offset", 0.3);
        map_pixels(src, dst, |_, _, (u, v), c| {
            let d = ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt();
            let k = smoothstep32(0.8, offset * 0.799, d * (darkness + offset));
            [c[0] * k, c[1] * k, c[2] * k, c[3]]
        })
    }
}

/// ACES filmic curve (Narkowicz fit).
pub fn aces(x: f32) -> f32 {
    let x = x.max(0.0);
    ((x * (2.51 * x + 0.03)) / (x * (2.43 * x + 0.59) + 0.14)).clamp(0.0, 1.0)
}

/// ACES filmic tone mapping.
#[derive(Clone, Debug)]
pub struct ToneMappingPass {
    uniforms: Uniforms,
}

impl ToneMappingPass {
    /// Unit exposure.
    pub fn new() -> Self {
        Self {
            uniforms: Uniforms::new().with("exposure", UniformValue::Float(1.0)),
        }
    }
}

impl Default for ToneMappingPass {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderPass for ToneMappingPass {
    pass_accessors!("tone-mapping", PassKind::ToneMapping);

    fn apply(
        &self,
        src: &ColorBuffer,
        _scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let exposure = self.uniforms.float_or("exposure", 1.0);
        map_pixels(src, dst, |_, _, _, c| {
            [
                aces(c[0] * exposure),
                aces(c[1] * exposure),
                aces(c[2] * exposure),
                c[3],
            ]
        })
    }
}

fn overlay(base: f32, blend: f32) -> f32 {
    if base < 0.5 {
        2.0 * base * blend
    } else {
        1.0 - 2.0 * (1.0 - base) * (1.0 - blend)
    }
}

/// Faint animated noise, overlay-blended.
#[derive(Clone, Debug)]
pub struct NoisePass {
    uniforms: Uniforms,
}

impl NoisePass {
    /// Noise at `opacity`.
    pub fn new(opacity: f32) -> Self {
        Self {
            uniforms: Uniforms::new()
                .with("opacity", UniformValue::Float(opacity))
                .with("time", UniformValue::Float(0.0)),
        }
    }
}

impl ShaderPass for NoisePass {
    pass_accessors!("noise", PassKind::Noise);

    fn apply(
        &self,
        src: &ColorBuffer,
        _scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let opacity = self.uniforms.float_or("opacity", 0.02);
        let time = self.uniforms.float_or("time", 0.0);
        map_pixels(src, dst, |x, y, _, c| {
            let n = hash21(x as f32 + time * 61.0, y as f32 + time * 37.0);
            let mut out = c;
            for ch in 0..3 {
                out[ch] = mix(c[ch], overlay(c[ch], n), opacity);
            }
            out
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/passes.rs"]
mod tests;
