#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Derive an independent stream seed from a run seed and a stream tag.
pub(crate) fn derive_seed(seed: u64, stream: &[u8]) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(seed);
    h.write_bytes(stream);
    h.finish()
}

/// Seeded SplitMix64 generator.
///
/// Spawning is the only consumer of randomness, so a run is fully reproducible from its seed.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[-half_width, half_width)`.
    pub fn next_symmetric(&mut self, half_width: f64) -> f64 {
        (self.next_f64_01() - 0.5) * 2.0 * half_width
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        ((self.next_f64_01() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Linear interpolation `a + (b - a) * t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Hermite smoothstep between `edge0` and `edge1`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 == edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fractional part, always in `[0, 1)`.
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Classic sine hash of a 2D coordinate into `[0, 1)`.
pub fn noise2d(x: f64, y: f64) -> f64 {
    fract((x * 12.9898 + y * 78.233).sin() * 43_758.545_3)
}

/// `f32` variant of [`noise2d`] used by per-pixel passes.
pub(crate) fn hash21(x: f32, y: f32) -> f32 {
    let v = ((x * 12.9898 + y * 78.233).sin() * 43_758.547).fract();
    if v < 0.0 { v + 1.0 } else { v }
}

/// Per-frame smoothing factor rescaled for a frame of `frames` 60 Hz ticks.
///
/// `rate_per_frame(0.02, 1.0) == 0.02`; two half frames compound to the same result as one.
pub(crate) fn rate_per_frame(rate: f64, frames: f64) -> f64 {
    if frames <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - rate.clamp(0.0, 1.0)).powf(frames)
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
