use crate::config::{EffectsConfig, QualityTier};
use crate::effects::grain::FilmGrainPass;
use crate::effects::hbao::{HbaoParams, HbaoPass};
use crate::effects::pass::{ColorBuffer, PassKind, SceneInputs, ShaderPass};
use crate::effects::passes::{
    AntiAliasPass, BloomPass, ChromaticAberrationPass, DepthOfFieldPass, NoisePass,
    ToneMappingPass, VignettePass,
};
use crate::effects::quantum::QuantumDepthPass;
use crate::effects::transition::TransitionPass;
use crate::effects::uniforms::UniformValue;
use crate::foundation::core::Viewport;
use crate::foundation::error::KosmosResult;
use crate::render::frame::FrameRGBA;

#[derive(Debug)]
struct Slot {
    pass: Box<dyn ShaderPass>,
    enabled: bool,
}

/// Ordered post-processing chain.
///
/// Every pass is built up front in [`PassKind`] order; configuration only decides which ones
/// start enabled. Toggling a pass never reorders or rebuilds the chain.
#[derive(Debug)]
pub struct EffectPipeline {
    active: bool,
    quality: QualityTier,
    slots: Vec<Slot>,
}

impl EffectPipeline {
    /// Build the full chain for `viewport` from configuration and quality tier.
    #[tracing::instrument(skip(config))]
    pub fn from_config(
        config: &EffectsConfig,
        quality: QualityTier,
        viewport: Viewport,
    ) -> KosmosResult<Self> {
        config.validate()?;

        let hbao = HbaoParams {
            radius: config.hbao.radius,
            intensity: config.hbao.intensity,
            samples: config.hbao.samples.min(quality.ao_samples()),
            ..HbaoParams::default()
        };

        let slots: Vec<Slot> = vec![
            slot(AntiAliasPass::new(), config.anti_alias.enabled),
            slot(
                BloomPass::new(
                    config.bloom.intensity,
                    config.bloom.luminance_threshold,
                    config.bloom.luminance_smoothing,
                    quality.bloom_kernel(),
                ),
                config.bloom.enabled,
            ),
            slot(
                DepthOfFieldPass::new(
                    config.dof.focus_distance,
                    config.dof.focal_length,
                    config.dof.bokeh_scale,
                ),
                config.dof.enabled,
            ),
            slot(
                ChromaticAberrationPass::new(config.chromatic.offset),
                config.chromatic.enabled,
            ),
            slot(
                VignettePass::new(config.vignette.darkness, config.vignette.offset),
                config.vignette.enabled,
            ),
            slot(
                FilmGrainPass::new(config.film_grain.intensity),
                config.film_grain.enabled,
            ),
            slot(
                QuantumDepthPass::new(config.quantum_depth.intensity),
                config.quantum_depth.enabled,
            ),
            slot(
                HbaoPass::new(hbao, viewport.width, viewport.height),
                config.hbao.enabled,
            ),
            slot(ToneMappingPass::new(), config.tone_mapping.enabled),
            slot(NoisePass::new(config.noise.opacity), config.noise.enabled),
            slot(
                TransitionPass::new(&config.transition),
                config.transition.enabled,
            ),
        ];
        debug_assert!(
            slots
                .iter()
                .map(|s| s.pass.kind())
                .eq(PassKind::ALL.iter().copied())
        );

        tracing::debug!(
            enabled = slots.iter().filter(|s| s.enabled).count(),
            master = config.enabled,
            "effect pipeline built"
        );
        Ok(Self {
            active: config.enabled,
            quality,
            slots,
        })
    }

    /// Master toggle from configuration.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flip the master toggle.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Quality tier the chain was built for.
    pub fn quality(&self) -> QualityTier {
        self.quality
    }

    /// Multisample count a GPU compositor should request.
    pub fn msaa_samples(&self) -> u32 {
        self.quality.msaa_samples()
    }

    /// Enable or disable one pass; returns the previous state.
    pub fn set_enabled(&mut self, kind: PassKind, enabled: bool) -> bool {
        match self.slot_mut(kind) {
            Some(s) => std::mem::replace(&mut s.enabled, enabled),
            None => false,
        }
    }

    /// Whether `kind` runs on [`EffectPipeline::apply`].
    pub fn is_enabled(&self, kind: PassKind) -> bool {
        self.slots.iter().any(|s| s.enabled && s.pass.kind() == kind)
    }

    /// Enabled passes, in execution order.
    pub fn enabled_kinds(&self) -> Vec<PassKind> {
        self.slots
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.pass.kind())
            .collect()
    }

    /// Borrow a pass.
    pub fn pass(&self, kind: PassKind) -> Option<&dyn ShaderPass> {
        self.slots
            .iter()
            .find(|s| s.pass.kind() == kind)
            .map(|s| s.pass.as_ref())
    }

    /// Mutably borrow a pass, e.g. to edit its uniforms.
    pub fn pass_mut(&mut self, kind: PassKind) -> Option<&mut (dyn ShaderPass + 'static)> {
        self.slot_mut(kind).map(|s| s.pass.as_mut())
    }

    fn slot_mut(&mut self, kind: PassKind) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.pass.kind() == kind)
    }

    /// Advance time-dependent uniforms of every pass, enabled or not.
    pub fn update(&mut self, dt_secs: f32) {
        for s in &mut self.slots {
            s.pass.update(dt_secs);
        }
    }

    /// Hand the run's global progress to every pass, enabled or not.
    pub fn track_progress(&mut self, global_progress: f32) {
        for s in &mut self.slots {
            s.pass.track_progress(global_progress);
        }
    }

    /// Track a new target size.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(p) = self.pass_mut(PassKind::Hbao) {
            p.uniforms_mut().set(
                "resolution",
                UniformValue::Vec2([viewport.width as f32, viewport.height as f32]),
            );
        }
    }

    /// Run the enabled passes in order over `frame`.
    ///
    /// Returns an unchanged copy when the master toggle is off or nothing is enabled.
    pub fn apply(&self, frame: &FrameRGBA, scene: &SceneInputs) -> KosmosResult<FrameRGBA> {
        if !self.active || !self.slots.iter().any(|s| s.enabled) {
            return Ok(frame.clone());
        }

        let mut src = ColorBuffer::from_frame(frame);
        let mut dst = ColorBuffer::new(frame.width, frame.height);
        for s in self.slots.iter().filter(|s| s.enabled) {
            s.pass.apply(&src, scene, &mut dst)?;
            std::mem::swap(&mut src, &mut dst);
            tracing::trace!(pass = s.pass.name(), "pass applied");
        }
        src.to_frame()
    }
}

fn slot(pass: impl ShaderPass + 'static, enabled: bool) -> Slot {
    Slot {
        pass: Box::new(pass),
        enabled,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pipeline.rs"]
mod tests;
