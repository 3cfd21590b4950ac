use super::*;

fn span(phase: Phase, start: f64, end: f64) -> PhaseSpan {
    PhaseSpan::new(phase, start, end)
}

#[test]
fn cinematic_table_is_a_partition() {
    let t = PhaseTable::cinematic();
    let spans = t.spans();
    assert_eq!(spans[0].start, 0.0);
    for pair in spans.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(spans[spans.len() - 1].end, 1.0);
    assert_eq!(PhaseTable::new(spans.to_vec()).unwrap(), t);
}

#[test]
fn rejects_empty_table() {
    assert!(PhaseTable::new(vec![]).is_err());
}

#[test]
fn rejects_gap_and_overlap() {
    let gap = PhaseTable::new(vec![
        span(Phase::Void, 0.0, 0.4),
        span(Phase::Complete, 0.5, 1.0),
    ])
    .unwrap_err();
    assert!(gap.to_string().contains("gap"));

    let overlap = PhaseTable::new(vec![
        span(Phase::Void, 0.0, 0.6),
        span(Phase::Complete, 0.5, 1.0),
    ])
    .unwrap_err();
    assert!(overlap.to_string().contains("overlap"));
}

#[test]
fn rejects_bad_endpoints() {
    assert!(PhaseTable::new(vec![span(Phase::Void, 0.1, 1.0)]).is_err());
    assert!(PhaseTable::new(vec![span(Phase::Void, 0.0, 0.9)]).is_err());
    assert!(PhaseTable::new(vec![span(Phase::Void, 0.0, 1.2)]).is_err());
}

#[test]
fn rejects_empty_span_and_duplicates() {
    assert!(
        PhaseTable::new(vec![
            span(Phase::Void, 0.0, 0.0),
            span(Phase::Complete, 0.0, 1.0),
        ])
        .is_err()
    );
    assert!(
        PhaseTable::new(vec![
            span(Phase::Void, 0.0, 0.5),
            span(Phase::Void, 0.5, 1.0),
        ])
        .is_err()
    );
}

#[test]
fn rejects_non_finite_bounds() {
    assert!(
        PhaseTable::new(vec![
            span(Phase::Void, 0.0, f64::NAN),
            span(Phase::Complete, 0.5, 1.0),
        ])
        .is_err()
    );
}

#[test]
fn tolerates_float_roundoff() {
    let t = PhaseTable::new(vec![
        span(Phase::Void, 0.0, 0.1 + 0.2),
        span(Phase::Complete, 0.3, 1.0),
    ]);
    assert!(t.is_ok());
}

#[test]
fn resolve_mid_run() {
    let t = PhaseTable::cinematic();
    let (idx, p) = t.resolve(0.2);
    assert_eq!(t.spans()[idx].phase, Phase::Stardust);
    assert!((p - 0.25).abs() < 1e-12);
}

#[test]
fn resolve_boundaries_start_new_phase_at_zero() {
    let t = PhaseTable::cinematic();
    let (idx, p) = t.resolve(0.35);
    assert_eq!(t.spans()[idx].phase, Phase::Convergence);
    assert_eq!(p, 0.0);

    let (idx, p) = t.resolve(0.0);
    assert_eq!(t.spans()[idx].phase, Phase::Void);
    assert_eq!(p, 0.0);
}

#[test]
fn resolve_terminal_holds_at_one() {
    let t = PhaseTable::cinematic();
    for g in [1.0, 1.5, f64::INFINITY] {
        let (idx, p) = t.resolve(g);
        assert_eq!(t.spans()[idx].phase, Phase::Complete);
        assert_eq!(p, 1.0);
    }
}

#[test]
fn phase_names_are_lowercase() {
    for phase in Phase::ALL {
        assert_eq!(phase.name(), phase.to_string());
        assert_eq!(phase.name(), phase.name().to_lowercase());
    }
}
