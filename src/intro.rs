//! The intro session: one timeline driving the particle field, the glyph and the effect chain.

use crate::config::IntroConfig;
use crate::effects::pass::SceneInputs;
use crate::effects::pipeline::EffectPipeline;
use crate::foundation::core::Viewport;
use crate::foundation::error::KosmosResult;
use crate::glyph::renderer::OrbitalGlyph;
use crate::palette::Palette;
use crate::particles::field::ParticleField;
use crate::render::composite::over_in_place;
use crate::render::cpu::CpuSurface;
use crate::render::frame::FrameRGBA;
use crate::render::overlay::ProgressBar;
use crate::timeline::driver::{Timeline, TimelineSample, TimelineState};

/// Elapsed time after which the skip affordance is offered.
pub const SKIP_AFFORDANCE_DELAY_MS: f64 = 1000.0;

/// What a [`IntroSession::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// The session is finished or cancelled; nothing moved.
    Idle,
    /// The run advanced and is still going.
    Advanced(TimelineSample),
    /// This tick completed the run; the completion callback has fired.
    Completed(TimelineSample),
}

struct Surfaces {
    scene: CpuSurface,
    overlay: CpuSurface,
}

impl Surfaces {
    fn for_viewport(viewport: Viewport) -> KosmosResult<Option<Self>> {
        if viewport.is_degenerate() {
            return Ok(None);
        }
        Ok(Some(Self {
            scene: CpuSurface::new(viewport)?,
            overlay: CpuSurface::new(viewport)?,
        }))
    }
}

/// A single run of the intro.
///
/// The host calls [`IntroSession::tick`] once per display refresh with the time since the
/// previous call, then [`IntroSession::render`] to obtain the frame. Completion is reported
/// exactly once, through the callback and as [`FrameOutcome::Completed`].
pub struct IntroSession {
    config: IntroConfig,
    viewport: Viewport,
    timeline: Timeline,
    field: ParticleField,
    glyph: Option<OrbitalGlyph>,
    effects: EffectPipeline,
    progress_bar: ProgressBar,
    scene: SceneInputs,
    surfaces: Option<Surfaces>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for IntroSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntroSession")
            .field("viewport", &self.viewport)
            .field("timeline", &self.timeline)
            .field("particles", &self.field.len())
            .field("glyph", &self.glyph.is_some())
            .field("effects", &self.effects.enabled_kinds())
            .finish_non_exhaustive()
    }
}

impl IntroSession {
    /// Validate `config` and build every component for `viewport`.
    #[tracing::instrument(skip(config), fields(duration_ms = config.duration_ms))]
    pub fn new(config: IntroConfig, viewport: Viewport) -> KosmosResult<Self> {
        config.validate()?;
        let table = config.effective_phase_table()?;
        let palette = Palette::for_variant(config.variant);

        let field = ParticleField::spawn(
            config.particles.plan(),
            viewport,
            palette.clone(),
            config.seed,
        );
        let glyph = if config.glyph.enabled {
            Some(OrbitalGlyph::new(config.glyph.preset, &palette)?)
        } else {
            None
        };
        let effects = EffectPipeline::from_config(&config.effects, config.quality, viewport)?;

        tracing::debug!(
            particles = field.len(),
            variant = ?config.variant,
            quality = ?config.quality,
            "intro session created"
        );
        Ok(Self {
            timeline: Timeline::new(config.duration_ms, table),
            field,
            glyph,
            effects,
            progress_bar: ProgressBar::new(&palette),
            scene: SceneInputs::flat(),
            surfaces: Surfaces::for_viewport(viewport)?,
            on_complete: None,
            viewport,
            config,
        })
    }

    /// Register the completion callback, replacing any previous one.
    pub fn on_complete(&mut self, callback: impl FnOnce() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    fn fire_complete(&mut self) {
        if let Some(cb) = self.on_complete.take() {
            cb();
        }
    }

    /// Configuration the session was built from.
    pub fn config(&self) -> &IntroConfig {
        &self.config
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The particle field.
    pub fn particles(&self) -> &ParticleField {
        &self.field
    }

    /// The glyph, if enabled.
    pub fn glyph(&self) -> Option<&OrbitalGlyph> {
        self.glyph.as_ref()
    }

    /// The effect chain.
    pub fn effects(&self) -> &EffectPipeline {
        &self.effects
    }

    /// Mutable effect chain, for toggling passes.
    pub fn effects_mut(&mut self) -> &mut EffectPipeline {
        &mut self.effects
    }

    /// Replace the depth/normal buffers handed to the effect chain.
    pub fn set_scene_inputs(&mut self, scene: SceneInputs) {
        self.scene = scene;
    }

    /// Whether ticks still advance the run.
    pub fn is_running(&self) -> bool {
        self.timeline.is_running()
    }

    /// Advance by `delta_ms` of host time.
    pub fn tick(&mut self, delta_ms: f64) -> FrameOutcome {
        let Some(tick) = self.timeline.tick(delta_ms) else {
            return FrameOutcome::Idle;
        };
        let sample = tick.sample;

        let animating = self.timeline.duration_ms() > 0.0;
        if animating && !self.viewport.is_degenerate() {
            let dt_secs = if delta_ms.is_finite() {
                delta_ms.max(0.0) / 1000.0
            } else {
                0.0
            };
            self.field.step(sample.phase, sample.phase_progress, dt_secs);
            if let Some(glyph) = &mut self.glyph {
                glyph.tick(dt_secs);
            }
            self.effects.track_progress(sample.global_progress as f32);
            self.effects.update(dt_secs as f32);
        }
        tracing::trace!(
            phase = %sample.phase,
            phase_progress = sample.phase_progress,
            global = sample.global_progress,
            "tick"
        );

        match tick.completion {
            Some(_) => {
                tracing::debug!("intro complete");
                self.fire_complete();
                FrameOutcome::Completed(sample)
            }
            None => FrameOutcome::Advanced(sample),
        }
    }

    /// Render the current state. `None` for a zero-sized viewport.
    pub fn render(&mut self) -> KosmosResult<Option<FrameRGBA>> {
        let sample = self.timeline.current();
        let glyph_size = self.glyph_size();
        let center = self.viewport.center();
        let Some(surfaces) = self.surfaces.as_mut() else {
            return Ok(None);
        };

        surfaces.scene.reset();
        self.field.render(&mut surfaces.scene);
        let mut frame = surfaces.scene.finish();

        if let Some(glyph) = &self.glyph {
            surfaces.overlay.reset();
            glyph.render(
                sample.phase,
                sample.phase_progress,
                glyph_size,
                center,
                &mut surfaces.overlay,
            );
            if surfaces.overlay.encoded() > 0 {
                over_in_place(&mut frame.data, &surfaces.overlay.finish().data, 1.0)?;
            }
        }

        if self.effects.is_active() {
            frame = self.effects.apply(&frame, &self.scene)?;
        }

        if self.config.show_progress {
            surfaces.overlay.reset();
            self.progress_bar.render(sample.global_progress, &mut surfaces.overlay);
            over_in_place(&mut frame.data, &surfaces.overlay.finish().data, 1.0)?;
        }

        Ok(Some(frame))
    }

    /// Jump to the end and report completion.
    ///
    /// Returns `false`, with no effect, when skipping is disabled or the run already ended.
    pub fn skip(&mut self) -> bool {
        if !self.config.skip_enabled {
            return false;
        }
        if !self.timeline.skip() {
            return false;
        }
        tracing::debug!("intro skipped");
        self.fire_complete();
        true
    }

    /// Stop the run without reporting completion. Idempotent.
    pub fn cancel(&mut self) -> bool {
        let first = self.timeline.cancel();
        if first {
            self.on_complete = None;
            tracing::debug!("intro cancelled");
        }
        first
    }

    /// Adopt a new viewport, respawning the particles and reallocating surfaces.
    pub fn resize(&mut self, viewport: Viewport) -> KosmosResult<()> {
        if viewport == self.viewport {
            return Ok(());
        }
        self.surfaces = Surfaces::for_viewport(viewport)?;
        self.field.resize(viewport);
        self.effects.resize(viewport);
        self.viewport = viewport;
        tracing::debug!(width = viewport.width, height = viewport.height, "intro resized");
        Ok(())
    }

    /// Global progress for the on-screen indicator, when it is shown.
    pub fn progress_indicator(&self) -> Option<f64> {
        self.config
            .show_progress
            .then(|| self.timeline.current().global_progress)
    }

    /// Whether the host should offer a skip control now.
    pub fn skip_affordance_visible(&self) -> bool {
        self.config.skip_enabled
            && self.timeline.state() == TimelineState::Running
            && self.timeline.elapsed_ms() >= SKIP_AFFORDANCE_DELAY_MS
    }

    fn glyph_size(&self) -> f64 {
        self.viewport.min_dim() * self.config.glyph.size_fraction
    }
}
