//! Intro configuration: JSON-deserializable blocks with documented defaults.
//!
//! Every block is `#[serde(default)]`, so a partial document only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{KosmosError, KosmosResult};
use crate::glyph::descriptor::GlyphPreset;
use crate::palette::Variant;
use crate::particles::field::{DEFAULT_TRAIL_LEN, SpawnPlan};
use crate::timeline::phase::{PhaseSpan, PhaseTable};

/// Rendering quality; caps sample counts and sizes the bloom kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// 8 AO samples, small bloom kernel.
    Low,
    /// 16 AO samples, medium bloom kernel.
    Medium,
    /// 24 AO samples, large bloom kernel, 4x MSAA.
    #[default]
    High,
    /// 32 AO samples, huge bloom kernel, 8x MSAA.
    Ultra,
}

/// Bloom blur kernel size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelSize {
    /// Radius 2.
    Small,
    /// Radius 4.
    Medium,
    /// Radius 7.
    Large,
    /// Radius 11.
    Huge,
}

impl KernelSize {
    /// Gaussian radius in pixels.
    pub fn radius(self) -> u32 {
        match self {
            Self::Small => 2,
            Self::Medium => 4,
            Self::Large => 7,
            Self::Huge => 11,
        }
    }
}

impl QualityTier {
    /// Upper bound on horizon AO samples.
    pub fn ao_samples(self) -> u32 {
        match self {
            Self::Low => 8,
            Self::Medium => 16,
            Self::High => 24,
            Self::Ultra => 32,
        }
    }

    /// Bloom kernel class.
    pub fn bloom_kernel(self) -> KernelSize {
        match self {
            Self::Low => KernelSize::Small,
            Self::Medium => KernelSize::Medium,
            Self::High => KernelSize::Large,
            Self::Ultra => KernelSize::Huge,
        }
    }

    /// Multisample count requested from a GPU compositor; 0 disables MSAA.
    pub fn msaa_samples(self) -> u32 {
        match self {
            Self::Ultra => 8,
            Self::High => 4,
            Self::Low | Self::Medium => 0,
        }
    }
}

/// Particle pool sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Ambient particles spread across the viewport.
    pub ambient: usize,
    /// Particles orbiting close to the center.
    pub singularity: usize,
    /// Trail points kept per energy particle.
    pub trail_len: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            ambient: 400,
            singularity: 100,
            trail_len: DEFAULT_TRAIL_LEN,
        }
    }
}

impl ParticleConfig {
    /// Spawn plan for the particle field.
    pub fn plan(&self) -> SpawnPlan {
        SpawnPlan {
            ambient: self.ambient,
            singularity: self.singularity,
            trail_len: self.trail_len,
        }
    }
}

/// Orbital glyph settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// Draw the glyph at all.
    pub enabled: bool,
    /// Constant set.
    pub preset: GlyphPreset,
    /// Glyph size as a fraction of the smaller viewport dimension (valid range: 0.0-1.0).
    pub size_fraction: f64,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            preset: GlyphPreset::Rising,
            size_fraction: 0.5,
        }
    }
}

/// Toggle for passes without parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    /// Pass enabled.
    pub enabled: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Bloom settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    /// Pass enabled.
    pub enabled: bool,
    /// Additive strength of the blurred highlights (valid range: 0.0-3.0).
    pub intensity: f32,
    /// Luminance where highlights start.
    pub luminance_threshold: f32,
    /// Width of the threshold ramp.
    pub luminance_smoothing: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 0.5,
            luminance_threshold: 0.8,
            luminance_smoothing: 0.3,
        }
    }
}

/// Horizon ambient occlusion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HbaoConfig {
    /// Pass enabled.
    pub enabled: bool,
    /// Sampling radius.
    pub radius: f32,
    /// Occlusion strength.
    pub intensity: f32,
    /// Requested samples; capped by the quality tier (valid range: 1-32).
    pub samples: u32,
}

impl Default for HbaoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 0.5,
            intensity: 1.0,
            samples: 32,
        }
    }
}

/// Chromatic aberration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaticConfig {
    /// Pass enabled.
    pub enabled: bool,
    /// Channel offset in UV units.
    pub offset: f32,
}

impl Default for ChromaticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: 0.001,
        }
    }
}

/// Vignette settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteConfig {
    /// Pass enabled.
    pub enabled: bool,
    /// Edge darkening.
    pub darkness: f32,
    /// Falloff offset.
    pub offset: f32,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            darkness: 0.4,
            offset: 0.3,
        }
    }
}

/// Film grain settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmGrainConfig {
    /// Pass enabled.
    pub enabled: bool,
    /// Grain strength (valid range: 0.0-1.0).
    pub intensity: f32,
}

impl Default for FilmGrainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 0.03,
        }
    }
}

/// Quantum depth grade settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantumDepthConfig {
    /// Pass enabled.
    pub enabled: bool,
    /// Tint mix (valid range: 0.0-1.0).
    pub intensity: f32,
}

impl Default for QuantumDepthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.05,
        }
    }
}

/// Depth of field settings. Needs a depth buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DofConfig {
    /// Pass enabled.
    pub enabled: bool,
    /// Normalized depth in focus.
    pub focus_distance: f32,
    /// Depth range over which blur ramps up.
    pub focal_length: f32,
    /// Maximum blur radius in pixels.
    pub bokeh_scale: f32,
}

impl Default for DofConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            focus_distance: 0.01,
            focal_length: 0.02,
            bokeh_scale: 2.0,
        }
    }
}

/// Overlay noise settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Pass enabled.
    pub enabled: bool,
    /// Overlay opacity.
    pub opacity: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 0.02,
        }
    }
}

/// Shape of the closing transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Cross-fade to a solid color.
    #[default]
    Fade,
    /// Color grows from the center outward.
    RadialWipe,
    /// Blocks grow while fading to color.
    Pixelate,
    /// Scanline tearing toward color.
    Glitch,
}

impl TransitionKind {
    /// Integer code carried in the `transition_type` uniform.
    pub fn code(self) -> i32 {
        match self {
            Self::Fade => 0,
            Self::RadialWipe => 1,
            Self::Pixelate => 2,
            Self::Glitch => 3,
        }
    }

    /// Inverse of [`TransitionKind::code`].
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Fade),
            1 => Some(Self::RadialWipe),
            2 => Some(Self::Pixelate),
            3 => Some(Self::Glitch),
            _ => None,
        }
    }
}

/// Closing transition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Pass enabled.
    pub enabled: bool,
    /// Transition shape.
    pub kind: TransitionKind,
    /// Seconds from 0 to full coverage.
    pub duration_secs: f32,
    /// Global progress in `[0, 1]` at which coverage starts to build.
    pub start_at: f32,
    /// Target color, linear RGB.
    pub color: [f32; 3],
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: TransitionKind::Fade,
            duration_secs: 1.0,
            start_at: 0.8,
            color: [0.0, 0.0, 0.0],
        }
    }
}

/// Master post-processing configuration.
///
/// `enabled = false` bypasses the whole pipeline regardless of individual toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Master toggle.
    pub enabled: bool,
    /// Edge anti-aliasing.
    pub anti_alias: ToggleConfig,
    /// Bloom.
    pub bloom: BloomConfig,
    /// Depth of field.
    pub dof: DofConfig,
    /// Chromatic aberration.
    pub chromatic: ChromaticConfig,
    /// Vignette.
    pub vignette: VignetteConfig,
    /// Film grain.
    pub film_grain: FilmGrainConfig,
    /// Quantum depth grade.
    pub quantum_depth: QuantumDepthConfig,
    /// Horizon ambient occlusion.
    pub hbao: HbaoConfig,
    /// ACES tone mapping.
    pub tone_mapping: ToggleConfig,
    /// Overlay noise.
    pub noise: NoiseConfig,
    /// Closing transition.
    pub transition: TransitionConfig,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            anti_alias: ToggleConfig::default(),
            bloom: BloomConfig::default(),
            dof: DofConfig::default(),
            chromatic: ChromaticConfig::default(),
            vignette: VignetteConfig::default(),
            film_grain: FilmGrainConfig::default(),
            quantum_depth: QuantumDepthConfig::default(),
            hbao: HbaoConfig::default(),
            tone_mapping: ToggleConfig::default(),
            noise: NoiseConfig::default(),
            transition: TransitionConfig::default(),
        }
    }
}

impl EffectsConfig {
    /// Reject non-finite parameters and out-of-range sample counts.
    pub fn validate(&self) -> KosmosResult<()> {
        let named = [
            ("bloom.intensity", self.bloom.intensity),
            ("bloom.luminance_threshold", self.bloom.luminance_threshold),
            ("bloom.luminance_smoothing", self.bloom.luminance_smoothing),
            ("dof.focus_distance", self.dof.focus_distance),
            ("dof.focal_length", self.dof.focal_length),
            ("dof.bokeh_scale", self.dof.bokeh_scale),
            ("chromatic.offset", self.chromatic.offset),
            ("vignette.darkness", self.vignette.darkness),
            ("vignette.offset", self.vignette.offset),
            ("film_grain.intensity", self.film_grain.intensity),
            ("quantum_depth.intensity", self.quantum_depth.intensity),
            ("hbao.radius", self.hbao.radius),
            ("hbao.intensity", self.hbao.intensity),
            ("noise.opacity", self.noise.opacity),
            ("transition.duration_secs", self.transition.duration_secs),
            ("transition.start_at", self.transition.start_at),
        ];
        for (name, v) in named {
            if !v.is_finite() {
                return Err(KosmosError::validation(format!(
                    "effects.{name} must be finite"
                )));
            }
        }
        if self.transition.color.iter().any(|c| !c.is_finite()) {
            return Err(KosmosError::validation(
                "effects.transition.color must be finite",
            ));
        }
        if !(0.0..=1.0).contains(&self.transition.start_at) {
            return Err(KosmosError::validation(
                "effects.transition.start_at must be in [0, 1]",
            ));
        }
        if self.hbao.samples == 0 || self.hbao.samples > 32 {
            return Err(KosmosError::validation(
                "effects.hbao.samples must be in 1..=32",
            ));
        }
        if self.dof.bokeh_scale < 0.0 {
            return Err(KosmosError::validation(
                "effects.dof.bokeh_scale must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Top-level intro configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Total running time; `<= 0` means the intro is already complete.
    pub duration_ms: f64,
    /// Allow [`crate::IntroSession::skip`].
    pub skip_enabled: bool,
    /// Draw the progress bar.
    pub show_progress: bool,
    /// Palette selection.
    pub variant: Variant,
    /// Sample caps and kernel sizes.
    pub quality: QualityTier,
    /// Seed for particle and cloud spawning.
    pub seed: u64,
    /// Particle pool sizing.
    pub particles: ParticleConfig,
    /// Orbital glyph.
    pub glyph: GlyphConfig,
    /// Custom phase table; the cinematic table when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<PhaseSpan>>,
    /// Post-processing.
    pub effects: EffectsConfig,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            duration_ms: 4500.0,
            skip_enabled: true,
            show_progress: true,
            variant: Variant::Cosmic,
            quality: QualityTier::High,
            seed: 0x4b4f_434d_4f43,
            particles: ParticleConfig::default(),
            glyph: GlyphConfig::default(),
            phases: None,
            effects: EffectsConfig::default(),
        }
    }
}

impl IntroConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> KosmosResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| KosmosError::serde(format!("intro config JSON parse failed: {e}")))
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> KosmosResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            KosmosError::serde(format!("read intro config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> KosmosResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| KosmosError::serde(format!("intro config JSON encode failed: {e}")))
    }

    /// Check every field that cannot be honored.
    ///
    /// A non-positive duration is accepted: the session completes on its first tick.
    pub fn validate(&self) -> KosmosResult<()> {
        if self.duration_ms.is_nan() || self.duration_ms.is_infinite() {
            return Err(KosmosError::validation("duration_ms must be finite"));
        }
        if self.particles.ambient + self.particles.singularity == 0 {
            return Err(KosmosError::validation(
                "particle pool must contain at least one particle",
            ));
        }
        let f = self.glyph.size_fraction;
        if !(f.is_finite() && (0.0..=1.0).contains(&f)) {
            return Err(KosmosError::validation(
                "glyph.size_fraction must be in [0, 1]",
            ));
        }
        self.effects.validate()?;
        self.effective_phase_table()?;
        Ok(())
    }

    /// The phase table to drive the timeline with, validated.
    pub fn effective_phase_table(&self) -> KosmosResult<PhaseTable> {
        match &self.phases {
            Some(spans) => PhaseTable::new(spans.clone()),
            None => Ok(PhaseTable::cinematic()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
