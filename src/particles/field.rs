use crate::animation::ease::Ease;
use crate::foundation::core::{Point, Rgba8, Vec2, Viewport};
use crate::foundation::math::{Rng64, derive_seed, lerp, rate_per_frame, smoothstep};
use crate::palette::Palette;
use crate::particles::nebula::{NebulaCloud, nebula_opacity, spawn_nebulae};
use crate::particles::particle::{Particle, ParticleKind, TrailPoint, orbit_point};
use crate::render::surface::{Blend, DrawCmd, GradientStop, Surface};
use crate::timeline::phase::Phase;

/// Motion constants are expressed per frame at this rate and rescaled for other frame times.
pub const REFERENCE_FRAME_SECS: f64 = 1.0 / 60.0;

/// Default number of trail points kept by energy particles.
pub const DEFAULT_TRAIL_LEN: usize = 15;

const STARDUST_SMOOTHING: f64 = 0.02;
const CONVERGENCE_SPEED: f64 = 0.05;
const CONVERGENCE_RADIUS_FLOOR: f64 = 50.0;
const SINGULARITY_RADIUS_FLOOR: f64 = 30.0;
const SINGULARITY_SMOOTHING: f64 = 0.05;
const ENERGY_BURST_MULTIPLIER: f64 = 3.0;

/// How many particles of each population to spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnPlan {
    /// Ambient particles spread across the viewport.
    pub ambient: usize,
    /// Small fast particles near the center.
    pub singularity: usize,
    /// Trail capacity for energy particles.
    pub trail_len: usize,
}

impl SpawnPlan {
    /// Split `count` 4:1 between ambient and singularity populations.
    pub fn split(count: usize) -> Self {
        let singularity = count / 5;
        Self {
            ambient: count - singularity,
            singularity,
            trail_len: DEFAULT_TRAIL_LEN,
        }
    }

    /// Total pool size.
    pub fn total(self) -> usize {
        self.ambient + self.singularity
    }
}

impl Default for SpawnPlan {
    fn default() -> Self {
        Self {
            ambient: 400,
            singularity: 100,
            trail_len: DEFAULT_TRAIL_LEN,
        }
    }
}

/// Fixed-size particle pool plus background clouds.
///
/// The pool length is fixed by [`ParticleField::spawn`]; stepping only mutates particle
/// attributes. A resize respawns everything.
#[derive(Clone, Debug)]
pub struct ParticleField {
    viewport: Viewport,
    plan: SpawnPlan,
    palette: Palette,
    seed: u64,
    particles: Vec<Particle>,
    nebulae: Vec<NebulaCloud>,
    time: f64,
    phase: Phase,
    phase_progress: f64,
}

impl ParticleField {
    /// Spawn `count` particles for `viewport`, split 4:1 ambient to singularity.
    pub fn initialize(count: usize, viewport: Viewport, palette: Palette, seed: u64) -> Self {
        Self::spawn(SpawnPlan::split(count), viewport, palette, seed)
    }

    /// Spawn a pool following `plan`.
    #[tracing::instrument(skip(palette))]
    pub fn spawn(plan: SpawnPlan, viewport: Viewport, palette: Palette, seed: u64) -> Self {
        let mut field = Self {
            viewport,
            plan,
            palette,
            seed,
            particles: Vec::with_capacity(plan.total()),
            nebulae: Vec::new(),
            time: 0.0,
            phase: Phase::Void,
            phase_progress: 0.0,
        };
        field.respawn();
        field
    }

    fn respawn(&mut self) {
        let center = self.viewport.center();
        let max_dim = self.viewport.max_dim();
        let mut rng = Rng64::new(derive_seed(self.seed, b"particles"));
        let mut particles = Vec::with_capacity(self.plan.total());

        for i in 0..self.plan.ambient {
            let angle = rng.next_f64_01() * std::f64::consts::TAU;
            let distance = rng.next_f64_01() * max_dim * 0.8 + max_dim * 0.1;
            let kind = if rng.next_f64_01() > 0.7 {
                ParticleKind::Energy
            } else if rng.next_f64_01() > 0.4 {
                ParticleKind::Dust
            } else {
                ParticleKind::Star
            };
            let z = rng.next_symmetric(100.0);
            let velocity = Vec2::new(rng.next_symmetric(0.15), rng.next_symmetric(0.15));
            let vz = rng.next_symmetric(0.1);
            let size = match kind {
                ParticleKind::Energy => rng.next_f64_01() * 4.0 + 2.0,
                _ => rng.next_f64_01() * 2.0 + 0.5,
            };
            let opacity = rng.next_f64_01() * 0.8 + 0.2;
            let color = pick(&self.palette.particles, &mut rng);
            let orbit_speed = (rng.next_f64_01() - 0.5) * 0.002;
            let pulse_phase = rng.next_f64_01() * std::f64::consts::TAU;

            let mut p = Particle::on_orbit(
                i as u32,
                kind,
                center,
                distance,
                angle,
                orbit_speed,
                size,
                opacity,
                color,
                pulse_phase,
                self.plan.trail_len,
            );
            p.z = z;
            p.velocity = velocity;
            p.vz = vz;
            particles.push(p);
        }

        for i in 0..self.plan.singularity {
            let angle = rng.next_f64_01() * std::f64::consts::TAU;
            let distance = rng.next_f64_01() * 100.0 + 50.0;
            let z = rng.next_symmetric(25.0);
            let size = rng.next_f64_01() * 1.5 + 0.3;
            let opacity = rng.next_f64_01() * 0.6 + 0.4;
            let color = if rng.next_f64_01() > 0.5 {
                self.palette.singularity[0]
            } else {
                self.palette.singularity[1]
            };
            let direction = if rng.next_f64_01() > 0.5 { 1.0 } else { -1.0 };
            let orbit_speed = direction * (rng.next_f64_01() * 0.01 + 0.005);
            let pulse_phase = rng.next_f64_01() * std::f64::consts::TAU;

            let mut p = Particle::on_orbit(
                (self.plan.ambient + i) as u32,
                ParticleKind::Singularity,
                center,
                distance,
                angle,
                orbit_speed,
                size,
                opacity,
                color,
                pulse_phase,
                self.plan.trail_len,
            );
            p.z = z;
            particles.push(p);
        }

        let mut nebula_rng = Rng64::new(derive_seed(self.seed, b"nebulae"));
        self.nebulae = spawn_nebulae(center, &self.palette, &mut nebula_rng);
        self.particles = particles;
    }

    /// Discard the pool and respawn it for a new viewport. Pool size is preserved.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "respawning particle field"
        );
        self.viewport = viewport;
        self.respawn();
    }

    /// Particles in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Background clouds.
    pub fn nebulae(&self) -> &[NebulaCloud] {
        &self.nebulae
    }

    /// Pool size.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` for an empty pool.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Viewport the pool was spawned for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Spawn plan in effect.
    pub fn plan(&self) -> SpawnPlan {
        self.plan
    }

    /// Seconds of simulated time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advance the simulation by `dt_secs` under the rules of `phase`.
    ///
    /// A degenerate viewport makes this a no-op.
    pub fn step(&mut self, phase: Phase, phase_progress: f64, dt_secs: f64) {
        if self.viewport.is_degenerate() {
            return;
        }
        let dt = if dt_secs.is_finite() && dt_secs > 0.0 {
            dt_secs
        } else {
            0.0
        };
        let frames = dt / REFERENCE_FRAME_SECS;
        let progress = phase_progress.clamp(0.0, 1.0);

        self.time += dt;
        self.phase = phase;
        self.phase_progress = progress;

        let center = self.viewport.center();
        let max_dim = self.viewport.max_dim();

        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            let to_center = center - p.position;

            match phase {
                Phase::Void | Phase::Stardust => {
                    p.orbit_angle += p.orbit_speed * frames;
                    let target = orbit_point(center, p.orbit_radius, p.orbit_angle);
                    p.position = p
                        .position
                        .lerp(target, rate_per_frame(STARDUST_SMOOTHING, frames));
                }
                Phase::Convergence => {
                    let speed = Ease::InOutCubic.apply(progress) * CONVERGENCE_SPEED;
                    p.velocity = to_center * speed;
                    p.position += to_center * rate_per_frame(speed, frames);
                    p.orbit_radius = lerp(
                        p.orbit_radius,
                        CONVERGENCE_RADIUS_FLOOR,
                        rate_per_frame(STARDUST_SMOOTHING, frames),
                    );
                }
                Phase::Singularity => {
                    let multiplier = 3.0 + progress * 5.0;
                    p.orbit_angle += p.orbit_speed * multiplier * frames;
                    p.orbit_radius = lerp(
                        p.orbit_radius,
                        SINGULARITY_RADIUS_FLOOR,
                        rate_per_frame(SINGULARITY_SMOOTHING, frames),
                    );
                    p.position = orbit_point(center, p.orbit_radius, p.orbit_angle);
                }
                Phase::Revelation => {
                    let force = Ease::OutElastic.apply(progress) * 2.0;
                    let outward = to_center.atan2() + std::f64::consts::PI;
                    let boost = if p.kind() == ParticleKind::Energy {
                        ENERGY_BURST_MULTIPLIER
                    } else {
                        1.0
                    };
                    p.velocity = Vec2::from_angle(outward) * force * boost;
                    p.position += p.velocity * frames;
                }
                Phase::Complete => {}
            }

            if p.kind() == ParticleKind::Energy
                && matches!(phase, Phase::Convergence | Phase::Singularity)
            {
                let position = p.position;
                let opacity = self.opacity_of(i, center, max_dim);
                self.particles[i].trail.push(TrailPoint { position, opacity });
            }
        }
        tracing::trace!(phase = %phase, progress, time = self.time, "particle step");
    }

    fn opacity_of(&self, index: usize, center: Point, max_dim: f64) -> f64 {
        let p = &self.particles[index];
        let progress = self.phase_progress;
        let factor = match self.phase {
            Phase::Void => smoothstep(0.0, 0.5, progress),
            Phase::Convergence => 1.0 - (p.position.distance(center) / max_dim) * 0.3,
            Phase::Singularity => 0.7 + (self.time * 10.0 + p.pulse_phase).sin() * 0.3,
            Phase::Revelation => 1.0 - progress * 0.5,
            Phase::Stardust | Phase::Complete => 1.0,
        };
        (p.base_opacity * factor).clamp(0.0, 1.0)
    }

    /// Current phase-modulated opacity of the particle at `index`.
    pub fn particle_opacity(&self, index: usize) -> Option<f64> {
        if index >= self.particles.len() || self.viewport.is_degenerate() {
            return None;
        }
        Some(self.opacity_of(
            index,
            self.viewport.center(),
            self.viewport.max_dim(),
        ))
    }

    /// Repaint the whole field: background, clouds, particles, then the central flare.
    pub fn render(&self, surface: &mut dyn Surface) {
        if self.viewport.is_degenerate() || surface.viewport().is_degenerate() {
            return;
        }
        let center = self.viewport.center();
        let max_dim = self.viewport.max_dim();

        surface.draw(DrawCmd::Clear(self.palette.void));
        surface.draw(DrawCmd::RadialGradient {
            center,
            radius: max_dim * 0.7,
            stops: vec![
                GradientStop::new(0.0, self.palette.nebula_core),
                GradientStop::new(0.5, self.palette.deep_space),
                GradientStop::new(1.0, self.palette.void),
            ],
            blend: Blend::Normal,
        });

        let cloud_opacity = nebula_opacity(self.phase, self.phase_progress);
        for cloud in &self.nebulae {
            cloud.render(cloud_opacity, surface);
        }

        let trails_visible = matches!(self.phase, Phase::Convergence | Phase::Singularity);
        for (i, p) in self.particles.iter().enumerate() {
            let opacity = self.opacity_of(i, center, max_dim);
            let size = p.size * (1.0 + (self.time * 3.0 + p.pulse_phase).sin() * 0.2);

            if p.kind().has_glow() {
                surface.draw(DrawCmd::RadialGradient {
                    center: p.position,
                    radius: size * 4.0,
                    stops: vec![
                        GradientStop::new(0.0, p.color.with_opacity(opacity * 0.6)),
                        GradientStop::new(1.0, Rgba8::TRANSPARENT),
                    ],
                    blend: Blend::Additive,
                });
            }

            surface.draw(DrawCmd::Circle {
                center: p.position,
                radius: size,
                color: p.color.with_opacity(opacity),
            });

            if trails_visible && p.kind() == ParticleKind::Energy {
                let len = p.trail.len() as f64;
                for (j, point) in p.trail.iter().enumerate() {
                    let frac = j as f64 / len;
                    if frac <= 0.0 {
                        continue;
                    }
                    surface.draw(DrawCmd::Circle {
                        center: point.position,
                        radius: size * frac,
                        color: p.color.with_opacity(frac * point.opacity * 0.5),
                    });
                }
            }
        }

        if let Some((radius, opacity)) = flare(self.phase, self.phase_progress) {
            surface.draw(DrawCmd::RadialGradient {
                center,
                radius,
                stops: vec![
                    GradientStop::new(0.0, Rgba8::WHITE.with_opacity(opacity * 0.8)),
                    GradientStop::new(0.2, self.palette.flare[0].with_opacity(opacity * 0.5)),
                    GradientStop::new(0.5, self.palette.flare[1].with_opacity(opacity * 0.3)),
                    GradientStop::new(1.0, Rgba8::TRANSPARENT),
                ],
                blend: Blend::Normal,
            });
        }
    }
}

/// Central flare `(radius, opacity)` for phases that show it.
fn flare(phase: Phase, progress: f64) -> Option<(f64, f64)> {
    match phase {
        Phase::Singularity => Some((50.0, smoothstep(0.3, 0.8, progress))),
        Phase::Revelation => Some((50.0 + progress * 200.0, 1.0 - progress)),
        _ => None,
    }
}

fn pick(colors: &[Rgba8], rng: &mut Rng64) -> Rgba8 {
    if colors.is_empty() {
        return crate::palette::swatch::GLOW_VIOLET;
    }
    colors[rng.next_index(colors.len())]
}

#[cfg(test)]
#[path = "../../tests/unit/particles/field.rs"]
mod tests;
