use crate::foundation::error::{KosmosError, KosmosResult};
use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Point, Vec2};

/// Size of a drawing target in device pixels.
///
/// A viewport with a zero dimension is *degenerate* (hidden tab, detached layout); simulation and
/// rendering treat it as a no-op frame.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport from pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` when either dimension is zero.
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Center point in surface coordinates.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// The larger of the two dimensions.
    pub fn max_dim(self) -> f64 {
        f64::from(self.width.max(self.height))
    }

    /// The smaller of the two dimensions.
    pub fn min_dim(self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// Number of pixels covered by the viewport.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Dimensions narrowed to the `u16` range required by the CPU rasterizer.
    pub fn to_u16(self) -> KosmosResult<(u16, u16)> {
        let w: u16 = self.width.try_into().map_err(|_| {
            KosmosError::render(format!("surface width exceeds u16: {}", self.width))
        })?;
        let h: u16 = self.height.try_into().map_err(|_| {
            KosmosError::render(format!("surface height exceeds u16: {}", self.height))
        })?;
        Ok((w, h))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Construct from explicit channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    /// Same color with alpha replaced by `opacity` in `[0, 1]` (clamped, rounded to 1/255).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = if opacity.is_finite() {
            (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            0
        };
        Self { a, ..self }
    }

    /// Alpha as a `[0, 1]` fraction.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Premultiplied RGBA8 bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }

    /// Normalized RGB triple.
    pub fn rgb_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
