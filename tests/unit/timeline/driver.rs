use super::*;

fn timeline(duration_ms: f64) -> Timeline {
    Timeline::new(duration_ms, PhaseTable::cinematic())
}

#[test]
fn mid_run_phase_resolution() {
    let t = timeline(1000.0);
    let s = t.sample_at(200.0);
    assert!((s.global_progress - 0.2).abs() < 1e-12);
    assert_eq!(s.phase, Phase::Stardust);
    assert!((s.phase_progress - 0.25).abs() < 1e-9);
}

#[test]
fn progress_is_monotonic_and_bounded() {
    let mut t = timeline(1000.0);
    let mut prev = 0.0;
    for delta in [16.0, -40.0, f64::NAN, 33.3, 0.0, 500.0, 900.0] {
        let Some(tick) = t.tick(delta) else { break };
        let g = tick.sample.global_progress;
        assert!((0.0..=1.0).contains(&g));
        assert!(g >= prev);
        prev = g;
    }
}

#[test]
fn every_phase_entered_once_in_order() {
    let mut t = timeline(1000.0);
    let mut seen = Vec::new();
    while let Some(tick) = t.tick(16.0) {
        seen.extend(tick.entered);
    }
    assert_eq!(seen, Phase::ALL.to_vec());
}

#[test]
fn long_frame_reports_crossed_phases() {
    let mut t = timeline(1000.0);
    let first = t.tick(10.0).unwrap();
    assert_eq!(first.entered, vec![Phase::Void]);
    let jump = t.tick(600.0).unwrap();
    assert_eq!(
        jump.entered,
        vec![Phase::Stardust, Phase::Convergence, Phase::Singularity]
    );
}

#[test]
fn completion_fires_exactly_once() {
    let mut t = timeline(100.0);
    let mut completions = 0;
    for _ in 0..50 {
        if let Some(tick) = t.tick(16.0)
            && tick.completion.is_some()
        {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(t.state(), TimelineState::Finished(Completion::Natural));
    assert!(!t.skip());
}

#[test]
fn completing_tick_reports_terminal_phase() {
    let mut t = timeline(100.0);
    let tick = t.tick(250.0).unwrap();
    assert_eq!(tick.completion, Some(Completion::Natural));
    assert_eq!(tick.sample.phase, Phase::Complete);
    assert_eq!(tick.sample.phase_progress, 1.0);
    assert_eq!(tick.sample.global_progress, 1.0);
}

#[test]
fn skip_at_zero_completes_immediately() {
    let mut t = timeline(4500.0);
    assert!(t.skip());
    let s = t.current();
    assert_eq!(s.global_progress, 1.0);
    assert_eq!(s.phase, Phase::Complete);
    assert!(t.tick(16.0).is_none());
    assert!(!t.skip());
}

#[test]
fn degenerate_duration_completes_on_first_tick() {
    for d in [0.0, -5.0, f64::NAN] {
        let mut t = timeline(d);
        let tick = t.tick(16.0).unwrap();
        assert_eq!(tick.completion, Some(Completion::Natural));
        assert_eq!(tick.sample.global_progress, 1.0);
        assert!(t.tick(16.0).is_none());
    }
}

#[test]
fn cancel_is_idempotent_and_silences_ticks() {
    let mut t = timeline(1000.0);
    t.tick(100.0);
    assert!(t.cancel());
    assert!(!t.cancel());
    assert!(t.tick(100.0).is_none());
    assert!(!t.skip());
    assert_eq!(t.state(), TimelineState::Cancelled);
}

#[test]
fn reset_rewinds() {
    let mut t = timeline(100.0);
    t.tick(500.0);
    t.reset();
    assert!(t.is_running());
    assert_eq!(t.elapsed_ms(), 0.0);
    assert_eq!(t.tick(1.0).unwrap().entered, vec![Phase::Void]);
}
