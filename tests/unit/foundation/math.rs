use super::*;

#[test]
fn fnv_hash_is_stable_across_chunking() {
    let mut single = Fnv1a64::new_default();
    single.write_bytes(b"a");
    assert_eq!(single.finish(), 0xaf63_dc4c_8601_ec8c);

    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"kosmos");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"kos");
    b.write_bytes(b"mos");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn derived_seeds_differ_per_stream() {
    assert_ne!(derive_seed(7, b"particles"), derive_seed(7, b"nebulae"));
    assert_eq!(derive_seed(7, b"particles"), derive_seed(7, b"particles"));
}

#[test]
fn rng_is_deterministic_and_in_unit_range() {
    let mut a = Rng64::new(42);
    let mut b = Rng64::new(42);
    for _ in 0..1000 {
        let x = a.next_f64_01();
        assert_eq!(x, b.next_f64_01());
        assert!((0.0..1.0).contains(&x));
    }
}

#[test]
fn rng_symmetric_and_index_bounds() {
    let mut r = Rng64::new(3);
    for _ in 0..1000 {
        let s = r.next_symmetric(0.15);
        assert!((-0.15..0.15).contains(&s));
        assert!(r.next_index(7) < 7);
    }
}

#[test]
fn smoothstep_edges_and_midpoint() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-12);
    assert_eq!(smoothstep(0.3, 0.3, 0.2), 0.0);
    assert_eq!(smoothstep(0.3, 0.3, 0.3), 1.0);
}

#[test]
fn noise_stays_in_unit_range() {
    for i in 0..200 {
        let v = noise2d(f64::from(i) * 0.37, f64::from(i) * 1.91);
        assert!((0.0..1.0).contains(&v));
        let h = hash21(i as f32 * 0.01, i as f32 * 0.02);
        assert!((0.0..1.0).contains(&h));
    }
}

#[test]
fn rate_per_frame_compounds() {
    assert!((rate_per_frame(0.02, 1.0) - 0.02).abs() < 1e-12);
    let half = rate_per_frame(0.02, 0.5);
    let two_halves = 1.0 - (1.0 - half) * (1.0 - half);
    assert!((two_halves - 0.02).abs() < 1e-12);
    assert_eq!(rate_per_frame(0.02, 0.0), 0.0);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}
