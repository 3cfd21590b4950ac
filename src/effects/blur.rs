use crate::effects::pass::ColorBuffer;
use crate::foundation::error::{KosmosError, KosmosResult};

/// Separable Gaussian blur of every channel, clamping at the edges.
pub fn blur_separable(src: &ColorBuffer, radius: u32, sigma: f32) -> KosmosResult<ColorBuffer> {
    if radius == 0 {
        return Ok(src.clone());
    }
    let kernel = gaussian_kernel(radius, sigma)?;
    let mut tmp = ColorBuffer::new(src.width(), src.height());
    let mut out = ColorBuffer::new(src.width(), src.height());
    horizontal_pass(src, &mut tmp, &kernel);
    vertical_pass(&tmp, &mut out, &kernel);
    Ok(out)
}

/// Normalized weights for offsets `-radius..=radius`.
pub fn gaussian_kernel(radius: u32, sigma: f32) -> KosmosResult<Vec<f32>> {
    if radius == 0 {
        return Ok(vec![1.0]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(KosmosError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return Err(KosmosError::effect("gaussian kernel sum is zero"));
    }
    Ok(weights.into_iter().map(|w| (w / sum) as f32).collect())
}

fn horizontal_pass(src: &ColorBuffer, dst: &mut ColorBuffer, k: &[f32]) {
    let radius = (k.len() / 2) as i64;
    let w = src.width() as usize;
    for y in 0..src.height() as i64 {
        for x in 0..w as i64 {
            let mut acc = [0f32; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let px = src.get(x + ki as i64 - radius, y);
                for c in 0..4 {
                    acc[c] += kw * px[c];
                }
            }
            dst.pixels_mut()[y as usize * w + x as usize] = acc;
        }
    }
}

fn vertical_pass(src: &ColorBuffer, dst: &mut ColorBuffer, k: &[f32]) {
    let radius = (k.len() / 2) as i64;
    let w = src.width() as usize;
    for y in 0..src.height() as i64 {
        for x in 0..w as i64 {
            let mut acc = [0f32; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let px = src.get(x, y + ki as i64 - radius);
                for c in 0..4 {
                    acc[c] += kw * px[c];
                }
            }
            dst.pixels_mut()[y as usize * w + x as usize] = acc;
        }
    }
}
