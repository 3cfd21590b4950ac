use super::*;

#[test]
fn opaque_frame_survives_decode_encode() {
    let data = vec![10, 20, 30, 255, 200, 100, 0, 255];
    let frame = FrameRGBA::from_premul(2, 1, data.clone()).unwrap();
    let buf = ColorBuffer::from_frame(&frame);
    assert_eq!(buf.get(1, 0)[0], 200.0 / 255.0);
    assert_eq!(buf.to_frame().unwrap().data, data);
}

#[test]
fn translucent_pixels_are_unpremultiplied() {
    let frame = FrameRGBA::from_premul(1, 1, vec![64, 0, 0, 128]).unwrap();
    let buf = ColorBuffer::from_frame(&frame);
    let px = buf.get(0, 0);
    assert!((px[0] - 0.5).abs() < 0.01);
    assert!((px[3] - 128.0 / 255.0).abs() < 1e-6);
    let back = buf.to_frame().unwrap();
    assert!((i32::from(back.data[0]) - 64).abs() <= 1);
}

#[test]
fn encode_clamps_and_drops_nan() {
    let mut buf = ColorBuffer::new(1, 1);
    buf.pixels_mut()[0] = [2.0, f32::NAN, -1.0, 1.0];
    assert_eq!(buf.to_frame().unwrap().data, vec![255, 0, 0, 255]);
}

#[test]
fn sampling_clamps_to_edges() {
    let mut buf = ColorBuffer::new(2, 2);
    buf.pixels_mut()[3] = [1.0, 1.0, 1.0, 1.0];
    assert_eq!(buf.get(5, 5), [1.0; 4]);
    assert_eq!(buf.get(-3, -3), [0.0; 4]);
    assert_eq!(buf.sample_uv(0.99, 0.99), [1.0; 4]);
    assert_eq!(buf.uv(0, 1), (0.25, 0.75));
}

#[test]
fn mismatched_buffers_rejected() {
    let src = ColorBuffer::new(2, 2);
    let mut dst = ColorBuffer::new(3, 2);
    let err = map_pixels(&src, &mut dst, |_, _, _, px| px).unwrap_err();
    assert!(err.to_string().starts_with("effect error:"));
}

#[test]
fn scene_buffers_must_match_frame() {
    let scene = SceneInputs {
        depth: Some(vec![0.5; 4]),
        ..SceneInputs::flat()
    };
    assert!(scene.depth_for(2, 2).is_some());
    assert!(scene.depth_for(3, 2).is_none());
    assert!(scene.normals_for(2, 2).is_none());
}

#[test]
fn kinds_are_listed_in_composition_order() {
    let mut sorted = PassKind::ALL;
    sorted.sort();
    assert_eq!(sorted, PassKind::ALL);
    assert_eq!(PassKind::Hbao.to_string(), "hbao");
}
