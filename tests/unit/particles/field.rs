use super::*;
use crate::render::surface::DrawList;

fn field(count: usize) -> ParticleField {
    ParticleField::initialize(count, Viewport::new(800, 600), Palette::default(), 7)
}

fn mean_distance(f: &ParticleField) -> f64 {
    let c = f.viewport().center();
    let sum: f64 = f.particles().iter().map(|p| p.position.distance(c)).sum();
    sum / f.len() as f64
}

#[test]
fn split_is_four_to_one() {
    let plan = SpawnPlan::split(500);
    assert_eq!(plan.ambient, 400);
    assert_eq!(plan.singularity, 100);
    assert_eq!(plan.total(), 500);
    assert_eq!(SpawnPlan::split(7).total(), 7);
}

#[test]
fn pool_size_is_constant_across_phases() {
    let mut f = field(120);
    assert_eq!(f.len(), 120);
    for phase in Phase::ALL {
        for i in 0..30 {
            f.step(phase, i as f64 / 30.0, REFERENCE_FRAME_SECS);
        }
        assert_eq!(f.len(), 120);
    }
    let ids: Vec<u32> = f.particles().iter().map(|p| p.id()).collect();
    assert_eq!(ids, (0..120).collect::<Vec<_>>());
}

#[test]
fn degenerate_viewport_keeps_pool_and_does_not_move() {
    let mut f = ParticleField::initialize(100, Viewport::new(0, 0), Palette::default(), 1);
    assert_eq!(f.len(), 100);
    let before: Vec<Point> = f.particles().iter().map(|p| p.position).collect();
    for phase in Phase::ALL {
        f.step(phase, 0.5, REFERENCE_FRAME_SECS);
    }
    let after: Vec<Point> = f.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
    assert_eq!(f.len(), 100);

    let mut list = DrawList::new(Viewport::new(0, 0));
    f.render(&mut list);
    assert!(list.is_empty());
}

#[test]
fn same_seed_spawns_same_pool() {
    let a = field(50);
    let b = field(50);
    let c = ParticleField::initialize(50, Viewport::new(800, 600), Palette::default(), 8);
    let pos = |f: &ParticleField| f.particles().iter().map(|p| p.position).collect::<Vec<_>>();
    assert_eq!(pos(&a), pos(&b));
    assert_ne!(pos(&a), pos(&c));
}

#[test]
fn spawn_distributions() {
    let f = field(500);
    let vp = f.viewport();
    for p in f.particles() {
        match p.kind() {
            ParticleKind::Singularity => {
                assert!((50.0..=150.0).contains(&p.orbit_radius));
                assert!(p.orbit_speed.abs() >= 0.005 && p.orbit_speed.abs() <= 0.015);
                assert!(p.size <= 1.8);
            }
            kind => {
                assert!(p.orbit_radius >= vp.max_dim() * 0.1 - 1e-9);
                assert!(p.orbit_radius <= vp.max_dim() * 0.9 + 1e-9);
                assert!(p.orbit_speed.abs() <= 0.001);
                if kind == ParticleKind::Energy {
                    assert!((2.0..=6.0).contains(&p.size));
                } else {
                    assert!(p.size <= 2.5);
                }
            }
        }
        assert!((0.2..=1.0).contains(&p.base_opacity));
    }
    let singular = f
        .particles()
        .iter()
        .filter(|p| p.kind() == ParticleKind::Singularity)
        .count();
    assert_eq!(singular, 100);
    assert!(f.particles()[400..].iter().all(|p| p.kind() == ParticleKind::Singularity));
    assert_eq!(f.nebulae().len(), 6);
}

#[test]
fn stardust_advances_orbit_angle() {
    let mut f = field(20);
    let before: Vec<f64> = f.particles().iter().map(|p| p.orbit_angle).collect();
    f.step(Phase::Stardust, 0.5, REFERENCE_FRAME_SECS);
    for (p, a) in f.particles().iter().zip(before) {
        assert!((p.orbit_angle - (a + p.orbit_speed)).abs() < 1e-12);
    }
}

#[test]
fn step_is_frame_rate_independent() {
    let mut one = field(20);
    let mut two = one.clone();
    one.step(Phase::Stardust, 0.5, REFERENCE_FRAME_SECS);
    two.step(Phase::Stardust, 0.5, REFERENCE_FRAME_SECS / 2.0);
    two.step(Phase::Stardust, 0.5, REFERENCE_FRAME_SECS / 2.0);
    for (a, b) in one.particles().iter().zip(two.particles()) {
        assert!((a.orbit_angle - b.orbit_angle).abs() < 1e-9);
        assert!(a.position.distance(b.position) < 0.05);
    }
}

#[test]
fn convergence_pulls_inward() {
    let mut f = field(100);
    let start = mean_distance(&f);
    for i in 0..60 {
        f.step(Phase::Convergence, 0.3 + i as f64 / 120.0, REFERENCE_FRAME_SECS);
    }
    assert!(mean_distance(&f) < start);
    let r = f.particles()[0].orbit_radius;
    assert!(r < field(100).particles()[0].orbit_radius);
}

#[test]
fn convergence_at_zero_progress_holds_positions() {
    let mut f = field(10);
    let before: Vec<Point> = f.particles().iter().map(|p| p.position).collect();
    f.step(Phase::Convergence, 0.0, REFERENCE_FRAME_SECS);
    for (p, b) in f.particles().iter().zip(before) {
        assert!(p.position.distance(b) < 1e-9);
    }
}

#[test]
fn singularity_keeps_particles_on_shrinking_orbits() {
    let mut f = field(50);
    for _ in 0..400 {
        f.step(Phase::Singularity, 0.5, REFERENCE_FRAME_SECS);
    }
    let c = f.viewport().center();
    for p in f.particles() {
        assert!((p.position.distance(c) - p.orbit_radius).abs() < 1e-6);
        assert!((p.orbit_radius - 30.0).abs() < 1.0);
    }
}

#[test]
fn revelation_bursts_outward_with_energy_faster() {
    let mut f = field(200);
    let c = f.viewport().center();
    let before: Vec<f64> = f.particles().iter().map(|p| p.position.distance(c)).collect();
    f.step(Phase::Revelation, 0.5, REFERENCE_FRAME_SECS);
    for (p, d) in f.particles().iter().zip(&before) {
        assert!(p.position.distance(c) > *d);
        let speed = p.velocity.hypot();
        let force = Ease::OutElastic.apply(0.5) * 2.0;
        let expected = if p.kind() == ParticleKind::Energy { force * 3.0 } else { force };
        assert!((speed - expected).abs() < 1e-9);
    }
}

#[test]
fn complete_holds_still() {
    let mut f = field(30);
    let before: Vec<Point> = f.particles().iter().map(|p| p.position).collect();
    f.step(Phase::Complete, 1.0, REFERENCE_FRAME_SECS);
    let after: Vec<Point> = f.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
}

#[test]
fn trails_only_grow_for_energy_during_inward_phases() {
    let mut f = field(100);
    for _ in 0..5 {
        f.step(Phase::Stardust, 0.5, REFERENCE_FRAME_SECS);
    }
    assert!(f.particles().iter().all(|p| p.trail.is_empty()));

    for _ in 0..40 {
        f.step(Phase::Singularity, 0.5, REFERENCE_FRAME_SECS);
    }
    for p in f.particles() {
        if p.kind() == ParticleKind::Energy {
            assert_eq!(p.trail.len(), DEFAULT_TRAIL_LEN);
        } else {
            assert!(p.trail.is_empty());
        }
    }
}

#[test]
fn opacity_follows_phase() {
    let mut f = field(10);
    f.step(Phase::Void, 0.0, REFERENCE_FRAME_SECS);
    assert_eq!(f.particle_opacity(0), Some(0.0));
    f.step(Phase::Void, 1.0, REFERENCE_FRAME_SECS);
    let base = f.particles()[0].base_opacity;
    assert!((f.particle_opacity(0).unwrap_or_default() - base).abs() < 1e-12);
    f.step(Phase::Revelation, 1.0, 0.0);
    assert!((f.particle_opacity(0).unwrap_or_default() - base * 0.5).abs() < 1e-12);
    assert_eq!(f.particle_opacity(10), None);
}

#[test]
fn render_order_background_then_particles_then_flare() {
    let mut f = field(40);
    f.step(Phase::Singularity, 0.9, REFERENCE_FRAME_SECS);
    let mut list = DrawList::new(f.viewport());
    f.render(&mut list);
    let cmds = list.cmds();
    assert!(matches!(cmds[0], DrawCmd::Clear(_)));
    assert!(matches!(cmds[1], DrawCmd::RadialGradient { blend: Blend::Normal, .. }));
    match cmds.last() {
        Some(DrawCmd::RadialGradient { stops, center, .. }) => {
            assert_eq!(stops.len(), 4);
            assert_eq!(*center, f.viewport().center());
        }
        other => panic!("expected flare, got {other:?}"),
    }
    let glows = list.count(|c| matches!(c, DrawCmd::RadialGradient { blend: Blend::Additive, .. }));
    let glowing = f.particles().iter().filter(|p| p.kind().has_glow()).count();
    assert_eq!(glows, glowing);
}

#[test]
fn void_render_has_no_clouds_or_flare() {
    let mut f = field(10);
    f.step(Phase::Void, 0.5, REFERENCE_FRAME_SECS);
    let mut list = DrawList::new(f.viewport());
    f.render(&mut list);
    let normal_gradients =
        list.count(|c| matches!(c, DrawCmd::RadialGradient { blend: Blend::Normal, .. }));
    assert_eq!(normal_gradients, 1);
}

#[test]
fn resize_respawns_around_new_center() {
    let mut f = field(60);
    for _ in 0..10 {
        f.step(Phase::Singularity, 0.5, REFERENCE_FRAME_SECS);
    }
    f.resize(Viewport::new(200, 100));
    assert_eq!(f.len(), 60);
    assert_eq!(f.viewport(), Viewport::new(200, 100));
    let c = Point::new(100.0, 50.0);
    for p in f.particles() {
        assert!((p.position.distance(c) - p.orbit_radius).abs() < 1e-9);
        assert!(p.trail.is_empty());
    }
}
