//! Kosmos is a procedural cinematic intro engine.
//!
//! A run is driven by an [`IntroSession`]:
//!
//! - A [`Timeline`] turns host frame deltas into a phase and its progress
//! - A [`ParticleField`] simulates and paints a fixed pool of particles for that phase
//! - An [`OrbitalGlyph`] reveals the brand mark over the field
//! - An [`EffectPipeline`] post-processes the composited frame
//!
//! Drawing goes through the [`Surface`] trait, so every renderer can be exercised against an
//! in-memory [`DrawList`] as well as the `vello_cpu` raster surface.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub mod config;
pub mod effects;
pub mod glyph;
mod intro;
pub mod palette;
pub mod particles;
pub mod render;
pub mod timeline;

pub use crate::foundation::core::{Point, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{KosmosError, KosmosResult};
pub use crate::foundation::math::{Rng64, lerp, noise2d, smoothstep};

pub use crate::animation::ease::Ease;
pub use crate::config::{EffectsConfig, IntroConfig, QualityTier};
pub use crate::effects::pass::{ColorBuffer, PassKind, SceneInputs, ShaderPass};
pub use crate::effects::pipeline::EffectPipeline;
pub use crate::effects::uniforms::{UniformValue, Uniforms};
pub use crate::glyph::descriptor::GlyphPreset;
pub use crate::glyph::renderer::OrbitalGlyph;
pub use crate::intro::{FrameOutcome, IntroSession, SKIP_AFFORDANCE_DELAY_MS};
pub use crate::palette::{Palette, Variant};
pub use crate::particles::field::ParticleField;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::surface::{DrawCmd, DrawList, Surface};
pub use crate::timeline::driver::{
    Completion, Timeline, TimelineSample, TimelineState, TimelineTick,
};
pub use crate::timeline::phase::{Phase, PhaseSpan, PhaseTable};
