use super::*;
use crate::foundation::core::Viewport;
use crate::render::surface::DrawList;

fn glyph(preset: GlyphPreset) -> OrbitalGlyph {
    OrbitalGlyph::new(preset, &Palette::default()).unwrap()
}

fn draw(g: &OrbitalGlyph, phase: Phase, progress: f64) -> DrawList {
    let mut list = DrawList::new(Viewport::new(400, 400));
    g.render(phase, progress, 400.0, Point::new(200.0, 200.0), &mut list);
    list
}

fn is_ellipse(c: &DrawCmd) -> bool {
    matches!(c, DrawCmd::StrokeEllipse { rotation, .. } if *rotation != 0.0)
}

#[test]
fn progress_mapping_per_phase() {
    assert_eq!(glyph_progress(Phase::Convergence, 0.9), 0.0);
    assert_eq!(glyph_progress(Phase::Singularity, 0.4), 0.4);
    assert_eq!(glyph_progress(Phase::Revelation, 0.0), 1.0);
    assert_eq!(glyph_progress(Phase::Complete, 0.2), 1.0);
}

#[test]
fn hidden_before_singularity() {
    let g = glyph(GlyphPreset::Rising);
    for phase in [Phase::Void, Phase::Stardust, Phase::Convergence] {
        assert!(draw(&g, phase, 0.8).is_empty());
    }
    assert!(draw(&g, Phase::Singularity, 0.0).is_empty());
}

#[test]
fn fully_revealed_draws_everything() {
    let g = glyph(GlyphPreset::Rising);
    let list = draw(&g, Phase::Revelation, 0.5);
    assert_eq!(list.count(is_ellipse), 5);
    assert_eq!(list.count(|c| matches!(c, DrawCmd::Line { .. })), 1);
    // One core glow, no other gradients.
    assert_eq!(list.count(|c| matches!(c, DrawCmd::RadialGradient { .. })), 1);
    // Four filled nodes, two inner dots and the core center.
    assert_eq!(list.count(|c| matches!(c, DrawCmd::Circle { .. })), 7);
}

#[test]
fn dotted_orbits_are_dashed() {
    let g = glyph(GlyphPreset::Rising);
    let list = draw(&g, Phase::Complete, 1.0);
    let dashes: Vec<Option<[f64; 2]>> = list
        .cmds()
        .iter()
        .filter(|c| is_ellipse(c))
        .map(|c| match c {
            DrawCmd::StrokeEllipse { dash, .. } => *dash,
            _ => None,
        })
        .collect();
    assert_eq!(
        dashes,
        vec![None, Some([3.0, 5.0]), Some([3.0, 5.0]), None, Some([3.0, 5.0])]
    );
}

#[test]
fn reveal_is_staggered() {
    let g = glyph(GlyphPreset::Rising);
    let early = draw(&g, Phase::Singularity, 0.05);
    let late = draw(&g, Phase::Singularity, 0.6);
    assert!(early.count(is_ellipse) < late.count(is_ellipse));
    assert_eq!(early.count(|c| matches!(c, DrawCmd::Circle { .. })), 0);
}

#[test]
fn line_spans_scaled_half_length() {
    let g = glyph(GlyphPreset::Rising);
    let mut list = DrawList::new(Viewport::new(200, 200));
    g.render(Phase::Complete, 1.0, 200.0, Point::new(100.0, 100.0), &mut list);
    let line = list.cmds().iter().find_map(|c| match c {
        DrawCmd::Line { from, to, .. } => Some((*from, *to)),
        _ => None,
    });
    let (from, to) = line.unwrap();
    assert!((from.x - 35.0).abs() < 1e-9);
    assert!((to.x - 165.0).abs() < 1e-9);
}

#[test]
fn tick_advances_by_preset_step() {
    let mut g = glyph(GlyphPreset::Rising);
    g.tick(1.0 / 60.0);
    assert!((g.time() - 0.012).abs() < 1e-12);
    g.tick(-1.0);
    g.tick(f64::NAN);
    assert!((g.time() - 0.012).abs() < 1e-12);

    let mut p = glyph(GlyphPreset::Premium);
    p.tick(2.0 / 60.0);
    assert!((p.time() - 0.012).abs() < 1e-12);
}

#[test]
fn jitter_rotates_orbits_over_time() {
    let mut g = glyph(GlyphPreset::Rising);
    let rotations = |g: &OrbitalGlyph| -> Vec<f64> {
        draw(g, Phase::Complete, 1.0)
            .cmds()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::StrokeEllipse { rotation, .. } if *rotation != 0.0 => Some(*rotation),
                _ => None,
            })
            .collect()
    };
    let before = rotations(&g);
    for _ in 0..30 {
        g.tick(1.0 / 60.0);
    }
    assert_ne!(before, rotations(&g));
}

#[test]
fn degenerate_size_draws_nothing() {
    let g = glyph(GlyphPreset::Premium);
    let mut list = DrawList::new(Viewport::new(10, 10));
    g.render(Phase::Complete, 1.0, 0.0, Point::ORIGIN, &mut list);
    g.render(Phase::Complete, 1.0, f64::NAN, Point::ORIGIN, &mut list);
    assert!(list.is_empty());
}

#[test]
fn premium_core_has_outer_ring() {
    let g = glyph(GlyphPreset::Premium);
    let list = draw(&g, Phase::Complete, 1.0);
    let scale = 400.0 / 300.0;
    let core_ring = 20.0 * scale + 5.0 * scale;
    let found = list.cmds().iter().any(|c| {
        matches!(c, DrawCmd::StrokeEllipse { radii, center, .. }
            if (radii.x - core_ring).abs() < 1e-9 && *center == Point::new(200.0, 200.0))
    });
    assert!(found);
}
