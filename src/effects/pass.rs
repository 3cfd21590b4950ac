use std::fmt;

use crate::effects::uniforms::Uniforms;
use crate::foundation::core::Viewport;
use crate::foundation::error::{KosmosError, KosmosResult};
use crate::render::frame::FrameRGBA;

/// Identifies a pass; the variant order is the pipeline's fixed composition order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PassKind {
    /// Luma edge anti-aliasing.
    AntiAlias,
    /// Thresholded Gaussian bloom.
    Bloom,
    /// Depth-driven blur.
    DepthOfField,
    /// Per-channel UV offset.
    ChromaticAberration,
    /// Edge darkening.
    Vignette,
    /// Luminance-aware grain.
    FilmGrain,
    /// Wave interference tint.
    QuantumDepth,
    /// Horizon ambient occlusion.
    Hbao,
    /// ACES filmic curve.
    ToneMapping,
    /// Faint overlay noise.
    Noise,
    /// Closing transition.
    Transition,
}

impl PassKind {
    /// All kinds in composition order.
    pub const ALL: [PassKind; 11] = [
        PassKind::AntiAlias,
        PassKind::Bloom,
        PassKind::DepthOfField,
        PassKind::ChromaticAberration,
        PassKind::Vignette,
        PassKind::FilmGrain,
        PassKind::QuantumDepth,
        PassKind::Hbao,
        PassKind::ToneMapping,
        PassKind::Noise,
        PassKind::Transition,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::AntiAlias => "anti_alias",
            Self::Bloom => "bloom",
            Self::DepthOfField => "depth_of_field",
            Self::ChromaticAberration => "chromatic_aberration",
            Self::Vignette => "vignette",
            Self::FilmGrain => "film_grain",
            Self::QuantumDepth => "quantum_depth",
            Self::Hbao => "hbao",
            Self::ToneMapping => "tone_mapping",
            Self::Noise => "noise",
            Self::Transition => "transition",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Straight-alpha RGBA working buffer, one `[f32; 4]` per pixel in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    data: Vec<[f32; 4]>,
}

impl ColorBuffer {
    /// Transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![[0.0; 4]; width as usize * height as usize],
        }
    }

    /// Buffer filled with one color.
    pub fn filled(width: u32, height: u32, color: [f32; 4]) -> Self {
        Self {
            width,
            height,
            data: vec![color; width as usize * height as usize],
        }
    }

    /// Decode a premultiplied frame.
    pub fn from_frame(frame: &FrameRGBA) -> Self {
        let data = frame
            .data
            .chunks_exact(4)
            .map(|px| {
                let a = f32::from(px[3]) / 255.0;
                if a <= 0.0 {
                    return [0.0; 4];
                }
                [
                    (f32::from(px[0]) / 255.0 / a).min(1.0),
                    (f32::from(px[1]) / 255.0 / a).min(1.0),
                    (f32::from(px[2]) / 255.0 / a).min(1.0),
                    a,
                ]
            })
            .collect();
        Self {
            width: frame.width,
            height: frame.height,
            data,
        }
    }

    /// Encode as a premultiplied frame, clamping out-of-range values.
    pub fn to_frame(&self) -> KosmosResult<FrameRGBA> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for px in &self.data {
            let a = sanitize(px[3]);
            for c in &px[..3] {
                out.push(to_u8(sanitize(*c) * a));
            }
            out.push(to_u8(a));
        }
        FrameRGBA::from_premul(self.width, self.height, out)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a viewport.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.data
    }

    /// Mutable pixels, row-major.
    pub fn pixels_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.data
    }

    /// Pixel at integer coordinates, clamped to the edge.
    pub fn get(&self, x: i64, y: i64) -> [f32; 4] {
        if self.data.is_empty() {
            return [0.0; 4];
        }
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        self.data[y * self.width as usize + x]
    }

    /// Nearest sample at normalized `uv`, clamped to the edge.
    pub fn sample_uv(&self, u: f32, v: f32) -> [f32; 4] {
        let x = (u * self.width as f32).floor() as i64;
        let y = (v * self.height as f32).floor() as i64;
        self.get(x, y)
    }

    /// Normalized coordinates of a pixel center.
    pub fn uv(&self, x: u32, y: u32) -> (f32, f32) {
        (
            (x as f32 + 0.5) / self.width.max(1) as f32,
            (y as f32 + 0.5) / self.height.max(1) as f32,
        )
    }

    pub(crate) fn same_size(&self, other: &ColorBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round() as u8
}

/// Rec. 601 luma, as used by the grain and bloom passes.
pub fn luma(rgb: [f32; 4]) -> f32 {
    rgb[0] * 0.299 + rgb[1] * 0.587 + rgb[2] * 0.114
}

/// Scene buffers supplied by a 3D host. 2D hosts pass [`SceneInputs::flat`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneInputs {
    /// Non-linear depth in `[0, 1]`, one value per pixel.
    pub depth: Option<Vec<f32>>,
    /// View normals encoded into `[0, 1]`, one per pixel.
    pub normals: Option<Vec<[f32; 3]>>,
    /// Camera near plane.
    pub camera_near: f32,
    /// Camera far plane.
    pub camera_far: f32,
}

impl SceneInputs {
    /// No depth or normals; depth-based passes pass their input through.
    pub fn flat() -> Self {
        Self {
            depth: None,
            normals: None,
            camera_near: 0.1,
            camera_far: 1000.0,
        }
    }

    /// Depth buffer if present and sized for `width * height`.
    pub fn depth_for(&self, width: u32, height: u32) -> Option<&[f32]> {
        self.depth
            .as_deref()
            .filter(|d| d.len() == width as usize * height as usize)
    }

    /// Normal buffer if present and sized for `width * height`.
    pub fn normals_for(&self, width: u32, height: u32) -> Option<&[[f32; 3]]> {
        self.normals
            .as_deref()
            .filter(|n| n.len() == width as usize * height as usize)
    }
}

impl Default for SceneInputs {
    fn default() -> Self {
        Self::flat()
    }
}

/// A post-processing pass: named uniforms plus a fragment program.
///
/// Each pass owns its uniforms exclusively. `apply` is the CPU reference of the fragment program;
/// `wgsl_source` is the GPU version where one exists.
pub trait ShaderPass: fmt::Debug {
    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Kind, which fixes the pass's position in the pipeline.
    fn kind(&self) -> PassKind;

    /// Current uniforms.
    fn uniforms(&self) -> &Uniforms;

    /// Mutable uniforms.
    fn uniforms_mut(&mut self) -> &mut Uniforms;

    /// WGSL fragment program, if the pass has a GPU implementation.
    fn wgsl_source(&self) -> Option<&'static str> {
        None
    }

    /// Advance time-dependent uniforms once per rendered frame.
    ///
    /// Uniforms missing from the map are skipped; this never fails.
    fn update(&mut self, dt: f32) {
        self.uniforms_mut().advance_time(dt);
    }

    /// Observe the run's global progress, once per tick before [`ShaderPass::update`].
    fn track_progress(&mut self, _global_progress: f32) {}

    /// Run the fragment program over every pixel of `src` into `dst`.
    fn apply(&self, src: &ColorBuffer, scene: &SceneInputs, dst: &mut ColorBuffer)
    -> KosmosResult<()>;
}

/// Shared precondition of every `apply`.
pub(crate) fn ensure_same_size(src: &ColorBuffer, dst: &ColorBuffer) -> KosmosResult<()> {
    if !src.same_size(dst) {
        return Err(KosmosError::effect(format!(
            "pass buffers differ in size: {}x{} vs {}x{}",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    Ok(())
}

/// Run `f(x, y, uv, src_pixel)` for every pixel and store the result in `dst`.
pub(crate) fn map_pixels(
    src: &ColorBuffer,
    dst: &mut ColorBuffer,
    mut f: impl FnMut(u32, u32, (f32, f32), [f32; 4]) -> [f32; 4],
) -> KosmosResult<()> {
    ensure_same_size(src, dst)?;
    let w = src.width();
    for y in 0..src.height() {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            let uv = src.uv(x, y);
            dst.data[idx] = f(x, y, uv, src.data[idx]);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pass.rs"]
mod tests;
