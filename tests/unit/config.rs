use super::*;
use crate::timeline::phase::Phase;

#[test]
fn defaults_match_documented_values() {
    let c = IntroConfig::default();
    assert_eq!(c.duration_ms, 4500.0);
    assert!(c.skip_enabled);
    assert!(c.show_progress);
    assert_eq!(c.variant, Variant::Cosmic);
    assert_eq!(c.quality, QualityTier::High);
    assert_eq!(c.particles.plan().total(), 500);
    assert_eq!(c.glyph.preset, GlyphPreset::Rising);
    assert!(!c.effects.enabled);
    assert!(!c.effects.dof.enabled);
    assert!(!c.effects.quantum_depth.enabled);
    c.validate().unwrap();
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = IntroConfig::from_json_str(
        r#"{ "duration_ms": 1000, "variant": "nebula", "effects": { "bloom": { "intensity": 1.5 } } }"#,
    )
    .unwrap();
    assert_eq!(c.duration_ms, 1000.0);
    assert_eq!(c.variant, Variant::Nebula);
    assert_eq!(c.effects.bloom.intensity, 1.5);
    assert_eq!(c.effects.bloom.luminance_threshold, 0.8);
    assert_eq!(c.particles, ParticleConfig::default());
}

#[test]
fn round_trips_through_pretty_json() {
    let c = IntroConfig::default();
    let back = IntroConfig::from_json_str(&c.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, c);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = IntroConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, KosmosError::Serde(_)));
    assert!(err.to_string().starts_with("serialization error:"));
}

#[test]
fn missing_file_is_reported() {
    let err = IntroConfig::from_path("target/definitely/missing.json").unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn non_positive_duration_is_accepted() {
    let c = IntroConfig {
        duration_ms: 0.0,
        ..IntroConfig::default()
    };
    c.validate().unwrap();
    let c = IntroConfig {
        duration_ms: -5.0,
        ..IntroConfig::default()
    };
    c.validate().unwrap();
}

#[test]
fn rejects_unusable_values() {
    let c = IntroConfig {
        duration_ms: f64::NAN,
        ..IntroConfig::default()
    };
    assert!(c.validate().is_err());

    let mut c = IntroConfig::default();
    c.particles.ambient = 0;
    c.particles.singularity = 0;
    assert!(c.validate().is_err());

    let mut c = IntroConfig::default();
    c.effects.bloom.intensity = f32::INFINITY;
    let err = c.validate().unwrap_err();
    assert!(err.to_string().contains("bloom.intensity"));

    let mut c = IntroConfig::default();
    c.effects.hbao.samples = 0;
    assert!(c.validate().is_err());

    let mut c = IntroConfig::default();
    c.effects.transition.start_at = 1.5;
    let err = c.validate().unwrap_err();
    assert!(err.to_string().contains("transition.start_at"));
}

#[test]
fn custom_phase_table_is_validated() {
    let mut c = IntroConfig::default();
    c.phases = Some(vec![
        PhaseSpan::new(Phase::Void, 0.0, 0.5),
        PhaseSpan::new(Phase::Complete, 0.6, 1.0),
    ]);
    assert!(c.validate().is_err());

    c.phases = Some(vec![
        PhaseSpan::new(Phase::Void, 0.0, 0.5),
        PhaseSpan::new(Phase::Complete, 0.5, 1.0),
    ]);
    assert_eq!(c.effective_phase_table().unwrap().len(), 2);
}

#[test]
fn quality_tier_tables() {
    let tiers = [
        QualityTier::Low,
        QualityTier::Medium,
        QualityTier::High,
        QualityTier::Ultra,
    ];
    let samples: Vec<u32> = tiers.iter().map(|t| t.ao_samples()).collect();
    assert_eq!(samples, vec![8, 16, 24, 32]);
    let msaa: Vec<u32> = tiers.iter().map(|t| t.msaa_samples()).collect();
    assert_eq!(msaa, vec![0, 0, 4, 8]);
    assert_eq!(QualityTier::Ultra.bloom_kernel(), KernelSize::Huge);
    assert!(KernelSize::Small.radius() < KernelSize::Huge.radius());
}

#[test]
fn transition_codes_round_trip() {
    for kind in [
        TransitionKind::Fade,
        TransitionKind::RadialWipe,
        TransitionKind::Pixelate,
        TransitionKind::Glitch,
    ] {
        assert_eq!(TransitionKind::from_code(kind.code()), Some(kind));
    }
    assert_eq!(TransitionKind::from_code(9), None);
}
