use std::collections::VecDeque;

use crate::foundation::core::{Point, Rgba8, Vec2};

/// Motion and rendering profile of a particle. Fixed at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Small ambient point.
    Star,
    /// Small ambient point, denser population.
    Dust,
    /// Large glowing particle that leaves a trail and bursts hardest.
    Energy,
    /// Small fast orbiter near the center.
    Singularity,
}

impl ParticleKind {
    /// Whether the particle gets an additive glow underlay.
    pub fn has_glow(self) -> bool {
        matches!(self, Self::Energy | Self::Singularity)
    }
}

/// One recorded trail position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    /// Position at record time.
    pub position: Point,
    /// Opacity the particle had at record time.
    pub opacity: f64,
}

/// Bounded FIFO of recent positions, oldest first.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl Trail {
    /// Empty trail holding at most `capacity` points.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest when full.
    pub fn push(&mut self, point: TrailPoint) {
        if self.capacity == 0 {
            return;
        }
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Points oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when no points are stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of stored points.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// A single simulated particle.
///
/// Identity and kind are read-only; everything else is mutated by the simulator each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    id: u32,
    kind: ParticleKind,
    /// Screen position.
    pub position: Point,
    /// Depth, carried for hosts that project the field in 3D.
    pub z: f64,
    /// Screen velocity, in pixels per 60 Hz frame.
    pub velocity: Vec2,
    /// Depth velocity.
    pub vz: f64,
    /// Distance of the reference orbit from the viewport center.
    pub orbit_radius: f64,
    /// Current angle on the reference orbit, radians.
    pub orbit_angle: f64,
    /// Angular speed, radians per 60 Hz frame.
    pub orbit_speed: f64,
    /// Base dot radius.
    pub size: f64,
    /// Opacity before phase modulation.
    pub base_opacity: f64,
    /// Dot color.
    pub color: Rgba8,
    /// Per-particle oscillation offset, radians.
    pub pulse_phase: f64,
    /// Recent positions (energy particles only).
    pub trail: Trail,
}

impl Particle {
    /// Construct a particle at rest on its orbit.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn on_orbit(
        id: u32,
        kind: ParticleKind,
        center: Point,
        orbit_radius: f64,
        orbit_angle: f64,
        orbit_speed: f64,
        size: f64,
        base_opacity: f64,
        color: Rgba8,
        pulse_phase: f64,
        trail_capacity: usize,
    ) -> Self {
        Self {
            id,
            kind,
            position: orbit_point(center, orbit_radius, orbit_angle),
            z: 0.0,
            velocity: Vec2::ZERO,
            vz: 0.0,
            orbit_radius,
            orbit_angle,
            orbit_speed,
            size,
            base_opacity,
            color,
            pulse_phase,
            trail: Trail::new(trail_capacity),
        }
    }

    /// Stable identifier, unique within a pool.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Kind chosen at spawn.
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }
}

/// Point on a circle of `radius` around `center` at `angle` radians.
pub(crate) fn orbit_point(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}
