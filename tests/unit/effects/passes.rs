use super::*;

fn run(pass: &dyn ShaderPass, src: &ColorBuffer, scene: &SceneInputs) -> ColorBuffer {
    let mut dst = ColorBuffer::new(src.width(), src.height());
    pass.apply(src, scene, &mut dst).unwrap();
    dst
}

fn close(a: [f32; 4], b: [f32; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
}

fn split_image() -> ColorBuffer {
    let mut buf = ColorBuffer::filled(8, 8, [0.0, 0.0, 0.0, 1.0]);
    for y in 0..8 {
        for x in 4..8 {
            buf.pixels_mut()[y * 8 + x] = [1.0, 1.0, 1.0, 1.0];
        }
    }
    buf
}

#[test]
fn flat_image_passes_through_spatial_passes() {
    let flat = ColorBuffer::filled(6, 6, [0.3, 0.4, 0.5, 1.0]);
    let scene = SceneInputs::flat();
    let passes: Vec<Box<dyn ShaderPass>> = vec![
        Box::new(AntiAliasPass::new()),
        Box::new(ChromaticAberrationPass::new(0.05)),
        Box::new(DepthOfFieldPass::new(0.0, 0.02, 2.0)),
    ];
    for pass in &passes {
        let out = run(pass.as_ref(), &flat, &scene);
        for (a, b) in out.pixels().iter().zip(flat.pixels()) {
            assert!(close(*a, *b), "{} changed a flat image", pass.name());
        }
    }
}

#[test]
fn anti_alias_softens_hard_edges() {
    let src = split_image();
    let out = run(&AntiAliasPass::new(), &src, &SceneInputs::flat());
    let edge = out.get(4, 3)[0];
    assert!(edge < 1.0 && edge > 0.5);
    assert_eq!(out.get(0, 0), src.get(0, 0));
}

#[test]
fn bloom_spreads_highlights_only() {
    let mut src = ColorBuffer::filled(9, 9, [0.1, 0.1, 0.1, 1.0]);
    src.pixels_mut()[40] = [1.0, 1.0, 1.0, 1.0];
    let bloom = BloomPass::new(1.0, 0.8, 0.1, KernelSize::Small);
    let out = run(&bloom, &src, &SceneInputs::flat());
    assert!(out.get(5, 4)[0] > 0.1);
    assert!(close(out.get(0, 0), src.get(0, 0)));

    let dark = ColorBuffer::filled(4, 4, [0.2, 0.2, 0.2, 1.0]);
    let out = run(&bloom, &dark, &SceneInputs::flat());
    assert!(close(out.get(1, 1), dark.get(1, 1)));
}

#[test]
fn bloom_without_intensity_uses_default() {
    let mut src = ColorBuffer::filled(5, 5, [0.0, 0.0, 0.0, 1.0]);
    src.pixels_mut()[12] = [1.0; 4];
    let mut bloom = BloomPass::new(0.5, 0.8, 0.3, KernelSize::Small);
    let with = run(&bloom, &src, &SceneInputs::flat());
    bloom.uniforms_mut().remove("intensity");
    let without = run(&bloom, &src, &SceneInputs::flat());
    assert_eq!(with, without);
}

#[test]
fn depth_of_field_blurs_out_of_focus_pixels() {
    let src = split_image();
    let scene = SceneInputs {
        depth: Some(vec![0.9; 64]),
        ..SceneInputs::flat()
    };
    let out = run(&DepthOfFieldPass::new(0.01, 0.02, 2.0), &src, &scene);
    let px = out.get(4, 4)[0];
    assert!(px > 0.0 && px < 1.0);

    let focused = SceneInputs {
        depth: Some(vec![0.01; 64]),
        ..SceneInputs::flat()
    };
    let out = run(&DepthOfFieldPass::new(0.01, 0.02, 2.0), &src, &focused);
    assert_eq!(out, src);
}

#[test]
fn chromatic_aberration_shifts_red_and_blue() {
    let src = split_image();
    let out = run(
        &ChromaticAberrationPass::new(1.0 / 8.0),
        &src,
        &SceneInputs::flat(),
    );
    let px = out.get(3, 3);
    assert_eq!(px[0], 1.0);
    assert_eq!(px[1], 0.0);
    assert_eq!(px[2], 0.0);
}

#[test]
fn vignette_keeps_center_and_darkens_corners() {
    let src = ColorBuffer::filled(9, 9, [1.0, 1.0, 1.0, 1.0]);
    let out = run(&VignettePass::new(0.4, 0.3), &src, &SceneInputs::flat());
    assert!(close(out.get(4, 4), [1.0; 4]));
    let corner = out.get(0, 0)[0];
    assert!(corner < 0.9 && corner > 0.3);
    assert_eq!(out.get(0, 0)[3], 1.0);
}

#[test]
fn aces_is_bounded_and_monotonic() {
    assert_eq!(aces(0.0), 0.0);
    let mut prev = 0.0;
    for i in 1..50 {
        let v = aces(i as f32 * 0.2);
        assert!(v >= prev);
        assert!(v <= 1.0);
        prev = v;
    }
    assert!(aces(-1.0) == 0.0);
}

#[test]
fn noise_opacity_zero_is_identity_and_time_advances() {
    let src = ColorBuffer::filled(4, 4, [0.5, 0.2, 0.8, 1.0]);
    let mut noise = NoisePass::new(0.0);
    assert_eq!(run(&noise, &src, &SceneInputs::flat()), src);
    noise.update(0.5);
    noise.update(0.25);
    assert_eq!(noise.uniforms().float("time"), Some(0.75));
}

#[test]
fn noise_is_subtle() {
    let src = ColorBuffer::filled(8, 8, [0.5, 0.5, 0.5, 1.0]);
    let out = run(&NoisePass::new(0.02), &src, &SceneInputs::flat());
    for px in out.pixels() {
        assert!((px[0] - 0.5).abs() <= 0.02);
    }
}
