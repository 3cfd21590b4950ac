use super::*;

const W: u32 = 16;
const H: u32 = 16;

fn pass(radius: f32) -> HbaoPass {
    HbaoPass::new(
        HbaoParams {
            radius,
            ..HbaoParams::default()
        },
        W,
        H,
    )
}

fn gray() -> ColorBuffer {
    ColorBuffer::filled(W, H, [0.6, 0.6, 0.6, 1.0])
}

fn run(p: &HbaoPass, scene: &SceneInputs) -> ColorBuffer {
    let src = gray();
    let mut dst = ColorBuffer::new(W, H);
    p.apply(&src, scene, &mut dst).unwrap();
    dst
}

#[test]
fn depth_linearization_hits_planes() {
    assert!((linearize_depth(0.0, 0.1, 1000.0) - 0.1).abs() < 1e-4);
    assert!((linearize_depth(1.0, 0.1, 1000.0) - 1000.0).abs() < 1e-1);
}

#[test]
fn multi_bounce_endpoints() {
    assert_eq!(multi_bounce(0.0, [0.5, 0.5, 0.5]), [0.0; 3]);
    for v in multi_bounce(1.0, [0.2, 0.5, 1.0]) {
        assert!((v - 1.0).abs() < 1e-3);
    }
    let mb = multi_bounce(0.5, [0.9, 0.9, 0.9]);
    assert!(mb[0] > 0.5);
}

#[test]
fn without_depth_input_passes_through() {
    let out = run(&pass(4.0), &SceneInputs::flat());
    assert_eq!(out, gray());
}

#[test]
fn flat_depth_has_no_occlusion() {
    let scene = SceneInputs {
        depth: Some(vec![0.5; (W * H) as usize]),
        ..SceneInputs::flat()
    };
    let out = run(&pass(4.0), &scene);
    for px in out.pixels() {
        assert!((px[0] - 0.6).abs() < 1e-3);
    }
}

#[test]
fn step_in_depth_darkens_the_far_side() {
    let mut depth = vec![0.9f32; (W * H) as usize];
    for y in 0..H {
        for x in 0..W / 2 {
            depth[(y * W + x) as usize] = 0.5;
        }
    }
    let scene = SceneInputs {
        depth: Some(depth),
        ..SceneInputs::flat()
    };
    let out = run(&pass(4.0), &scene);
    let far_edge = out.get(i64::from(W / 2), 8)[0];
    let far_away = out.get(i64::from(W) - 1, 8)[0];
    assert!(far_edge < 0.6 - 1e-3, "edge {far_edge}");
    assert!(far_edge < far_away);
}

#[test]
fn samples_are_capped() {
    let p = HbaoPass::new(
        HbaoParams {
            samples: 99,
            ..HbaoParams::default()
        },
        4,
        4,
    );
    assert_eq!(p.samples(), MAX_SAMPLES);
    let mut p = pass(1.0);
    p.uniforms_mut().set("ao_samples", UniformValue::Int(8));
    assert_eq!(p.samples(), 8);
}

#[test]
fn update_advances_time_only() {
    let mut p = pass(2.0);
    let before = p.uniforms().clone();
    p.update(0.016);
    assert_eq!(p.uniforms().float("time"), Some(0.016));
    for (name, value) in before.iter().filter(|(n, _)| *n != "time") {
        assert_eq!(p.uniforms().get(name), Some(value));
    }
    assert!(p.wgsl_source().is_some_and(|s| s.contains("fs_main")));
}

#[test]
fn camera_planes_come_from_the_scene() {
    let mut depth = vec![0.9f32; (W * H) as usize];
    for y in 0..H {
        for x in 0..W / 2 {
            depth[(y * W + x) as usize] = 0.5;
        }
    }
    let wide = SceneInputs {
        depth: Some(depth.clone()),
        ..SceneInputs::flat()
    };
    let tight = SceneInputs {
        depth: Some(depth),
        camera_near: 1.0,
        camera_far: 5.0,
        ..SceneInputs::flat()
    };
    let p = pass(4.0);
    assert!(!p.uniforms().contains("camera_near"));
    assert_ne!(run(&p, &wide), run(&p, &tight));
}
