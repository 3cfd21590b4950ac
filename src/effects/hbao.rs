//! Horizon-based ambient occlusion with a multi-bounce color correction.

use crate::effects::pass::{ColorBuffer, PassKind, SceneInputs, ShaderPass, map_pixels};
use crate::effects::passes::{mix, pass_accessors, smoothstep32};
use crate::effects::uniforms::{UniformValue, Uniforms};
use crate::foundation::error::KosmosResult;
use crate::foundation::math::hash21;

/// Maximum sample count; the length of [`POISSON_DISK`].
pub const MAX_SAMPLES: u32 = 32;

/// Low-discrepancy sample offsets in the unit disk.
pub const POISSON_DISK: [[f32; 2]; 32] = [
    [-0.942_016_24, -0.399_062_16],
    [0.945_586_09, -0.768_907_25],
    [-0.094_184_101, -0.929_388_7],
    [0.344_959_38, 0.293_877_6],
    [-0.915_885_81, 0.457_714_32],
    [-0.815_442_32, -0.879_124_64],
    [-0.382_775_43, 0.276_768_45],
    [0.974_843_98, 0.756_483_79],
    [0.443_233_25, -0.975_115_54],
    [0.537_429_81, -0.473_734_2],
    [-0.264_969_11, -0.418_930_23],
    [0.791_975_14, 0.190_901_88],
    [-0.241_888_4, 0.997_065_07],
    [-0.814_099_55, 0.914_375_9],
    [0.199_841_26, 0.786_413_67],
    [0.143_831_61, -0.141_007_9],
    [-0.444_511_71, -0.780_199_03],
    [0.696_599_25, 0.576_595_89],
    [-0.571_105_59, 0.715_725_78],
    [0.355_109_2, 0.932_635_37],
    [-0.724_443_38, -0.277_200_7],
    [0.805_439_41, -0.220_339_86],
    [-0.151_715_04, 0.568_798_72],
    [-0.595_049_2, -0.106_609_8],
    [0.075_999_21, 0.393_389_17],
    [0.524_601_1, 0.106_955_8],
    [-0.327_077_92, 0.134_869_47],
    [0.916_808_53, 0.389_302_09],
    [-0.038_943_5, -0.648_490_61],
    [0.672_678_92, -0.704_706_67],
    [-0.916_964_11, 0.084_290_23],
    [0.274_085_55, -0.306_348_99],
];

/// Parameters fixed at construction; everything else lives in the uniform map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HbaoParams {
    /// Sampling radius in pixels.
    pub radius: f32,
    /// Occlusion strength.
    pub intensity: f32,
    /// Minimum horizon cosine that counts as occluding.
    pub bias: f32,
    /// View distance where occlusion fades out.
    pub falloff: f32,
    /// Sample count, at most [`MAX_SAMPLES`].
    pub samples: u32,
    /// Blend toward the multi-bounce approximation.
    pub multi_bounce: f32,
    /// Tint of occluded regions.
    pub color: [f32; 3],
}

impl Default for HbaoParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            intensity: 1.0,
            bias: 0.025,
            falloff: 100.0,
            samples: MAX_SAMPLES,
            multi_bounce: 0.5,
            color: [0.8, 0.8, 1.0],
        }
    }
}

/// Horizon ambient occlusion. Passes its input through without a depth buffer.
///
/// Camera planes come from the host's [`SceneInputs`], not from the uniform map.
#[derive(Clone, Debug)]
pub struct HbaoPass {
    uniforms: Uniforms,
}

impl HbaoPass {
    /// Build the pass for a `width`x`height` target.
    pub fn new(params: HbaoParams, width: u32, height: u32) -> Self {
        let samples = params.samples.clamp(1, MAX_SAMPLES) as i32;
        Self {
            uniforms: Uniforms::new()
                .with("ao_radius", UniformValue::Float(params.radius))
                .with("ao_intensity", UniformValue::Float(params.intensity))
                .with("ao_bias", UniformValue::Float(params.bias))
                .with("ao_falloff", UniformValue::Float(params.falloff))
                .with("ao_samples", UniformValue::Int(samples))
                .with("ao_multi_bounce", UniformValue::Float(params.multi_bounce))
                .with("ao_color", UniformValue::Vec3(params.color))
                .with("resolution", UniformValue::Vec2([width as f32, height as f32]))
                .with("time", UniformValue::Float(0.0)),
        }
    }

    /// Effective sample count.
    pub fn samples(&self) -> u32 {
        self.uniforms.int_or("ao_samples", MAX_SAMPLES as i32).clamp(1, MAX_SAMPLES as i32) as u32
    }
}

/// Perspective depth in `[0, 1]` to linear view distance.
pub fn linearize_depth(depth: f32, near: f32, far: f32) -> f32 {
    let z = depth * 2.0 - 1.0;
    (2.0 * near * far) / (far + near - z * (far - near))
}

/// Cubic fit of multi-bounce occlusion for a given albedo.
pub fn multi_bounce(ao: f32, albedo: [f32; 3]) -> [f32; 3] {
    albedo.map(|al| {
        let a = 2.0404 * al - 0.3324;
        let b = -4.7951 * al + 0.6417;
        let c = 2.7552 * al + 0.6903;
        (((ao * a + b) * ao + c) * ao).max(ao)
    })
}

struct View<'a> {
    depth: &'a [f32],
    width: u32,
    height: u32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl View<'_> {
    fn position(&self, u: f32, v: f32) -> [f32; 3] {
        let x = ((u * self.width as f32).floor() as i64).clamp(0, i64::from(self.width) - 1);
        let y = ((v * self.height as f32).floor() as i64).clamp(0, i64::from(self.height) - 1);
        let d = self.depth[y as usize * self.width as usize + x as usize];
        let lin = linearize_depth(d, self.near, self.far);
        let (nx, ny) = (u * 2.0 - 1.0, v * 2.0 - 1.0);
        [nx * self.aspect * lin, ny * lin, -lin]
    }
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

impl ShaderPass for HbaoPass {
    pass_accessors!("hbao", PassKind::Hbao);

    fn wgsl_source(&self) -> Option<&'static str> {
        Some(include_str!("../shaders/hbao.wgsl"))
    }

    fn apply(
        &self,
        src: &ColorBuffer,
        scene: &SceneInputs,
        dst: &mut ColorBuffer,
    ) -> KosmosResult<()> {
        let (w, h) = (src.width(), src.height());
        let Some(depth) = scene.depth_for(w, h) else {
            return map_pixels(src, dst, |_, _, _, c| c);
        };
        let normals = scene.normals_for(w, h);

        let u = &self.uniforms;
        let radius = u.float_or("ao_radius", 0.5);
        let intensity = u.float_or("ao_intensity", 1.0);
        let bias = u.float_or("ao_bias", 0.025);
        let falloff = u.float_or("ao_falloff", 100.0);
        let samples = self.samples() as usize;
        let bounce = u.float_or("ao_multi_bounce", 0.5);
        let tint = u.vec3_or("ao_color", [0.8, 0.8, 1.0]);
        let [res_x, res_y] = u.vec2_or("resolution", [w as f32, h as f32]);
        let view = View {
            depth,
            width: w,
            height: h,
            near: scene.camera_near,
            far: scene.camera_far,
            aspect: res_x / res_y.max(1.0),
        };

        map_pixels(src, dst, |x, y, (su, sv), c| {
            let p = view.position(su, sv);
            let normal = match normals {
                Some(n) => n[(y * w + x) as usize].map(|v| v * 2.0 - 1.0),
                None => [0.0, 0.0, 1.0],
            };

            let angle = hash21(su, sv) * std::f32::consts::TAU;
            let (s, co) = angle.sin_cos();
            let mut occlusion = 0.0;
            for d in POISSON_DISK.iter().take(samples) {
                let dir = [co * d[0] + s * d[1], -s * d[0] + co * d[1]];
                let q = view.position(su + dir[0] * radius / res_x, sv + dir[1] * radius / res_y);
                let v = [q[0] - p[0], q[1] - p[1], q[2] - p[2]];
                let dist = dot(v, v).sqrt();
                if dist <= 1e-6 {
                    continue;
                }
                let cos_h = dot(normal, v.map(|e| e / dist));
                let fall = 1.0 - smoothstep32(0.0, radius, dist);
                occlusion += (cos_h - bias).max(0.0) * fall * fall;
            }
            let mut ao = 1.0 - (occlusion / samples as f32) * intensity;
            let dist = dot(p, p).sqrt();
            ao = mix(ao, 1.0, smoothstep32(falloff * 0.5, falloff, dist));

            let mb = multi_bounce(ao, [c[0], c[1], c[2]]);
            let mut out = c;
            for ch in 0..3 {
                let shaded = c[ch] * mix(ao, mb[ch], bounce);
                out[ch] = mix(shaded, shaded * tint[ch], (1.0 - ao) * 0.3);
            }
            out
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/hbao.rs"]
mod tests;
