//! Color palettes for the visual variants.
//!
//! A variant only re-tints the scene; motion and structure are identical across variants.

use crate::foundation::core::Rgba8;

/// Visual variant requested by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Violet, gold and plasma pink over deep space.
    #[default]
    Cosmic,
    /// Gold and silver dominant.
    Singularity,
    /// Pink and rose dominant.
    Nebula,
    /// Blue and violet dominant.
    Quantum,
}

/// Named colors consumed by the particle field, glyph and overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Outermost background stop.
    pub void: Rgba8,
    /// Mid background stop.
    pub deep_space: Rgba8,
    /// Background center stop.
    pub nebula_core: Rgba8,
    /// Inner color of even and odd nebula clouds.
    pub nebula_inner: Rgba8,
    /// Outer color of even nebula clouds.
    pub nebula_outer_even: Rgba8,
    /// Outer color of odd nebula clouds.
    pub nebula_outer_odd: Rgba8,
    /// Colors drawn at random for ambient particles.
    pub particles: Vec<Rgba8>,
    /// Colors drawn at random for singularity particles.
    pub singularity: [Rgba8; 2],
    /// Flare stops after the white core.
    pub flare: [Rgba8; 2],
    /// Glyph stroke and fill color.
    pub glyph: Rgba8,
    /// Glyph core glow color.
    pub glyph_glow: Rgba8,
    /// Progress bar gradient stops.
    pub progress: [Rgba8; 3],
}

/// Base swatches of the cosmic palette.
pub mod swatch {
    use crate::foundation::core::Rgba8;

    /// `#000000`
    pub const VOID: Rgba8 = Rgba8::from_hex(0x000000);
    /// `#050510`
    pub const DEEP_SPACE: Rgba8 = Rgba8::from_hex(0x050510);
    /// `#2D1B4E`
    pub const NEBULA_PURPLE: Rgba8 = Rgba8::from_hex(0x2D1B4E);
    /// `#8B00FF`
    pub const VIOLET_ELECTRIC: Rgba8 = Rgba8::from_hex(0x8B00FF);
    /// `#4B0082`
    pub const INDIGO_COSMIC: Rgba8 = Rgba8::from_hex(0x4B0082);
    /// `#FFD700`
    pub const GOLD_PREMIUM: Rgba8 = Rgba8::from_hex(0xFFD700);
    /// `#C0C0C0`
    pub const SILVER_STAR: Rgba8 = Rgba8::from_hex(0xC0C0C0);
    /// `#FF1493`
    pub const PLASMA_PINK: Rgba8 = Rgba8::from_hex(0xFF1493);
    /// `#FF6B9D`
    pub const ROSE_NEBULA: Rgba8 = Rgba8::from_hex(0xFF6B9D);
    /// `#FEAE42`
    pub const WARM_AMBER: Rgba8 = Rgba8::from_hex(0xFEAE42);
    /// `#C084FC`
    pub const GLOW_VIOLET: Rgba8 = Rgba8::from_hex(0xC084FC);
    /// `#1E3A8A`
    pub const DEEP_BLUE: Rgba8 = Rgba8::from_hex(0x1E3A8A);
    /// `#7C3AED`
    pub const ROYAL_PURPLE: Rgba8 = Rgba8::from_hex(0x7C3AED);
}

impl Palette {
    /// Palette for `variant`.
    pub fn for_variant(variant: Variant) -> Self {
        use swatch::*;

        let cosmic = Self {
            void: VOID,
            deep_space: DEEP_SPACE,
            nebula_core: NEBULA_PURPLE,
            nebula_inner: VIOLET_ELECTRIC,
            nebula_outer_even: PLASMA_PINK,
            nebula_outer_odd: INDIGO_COSMIC,
            particles: vec![
                VIOLET_ELECTRIC,
                GOLD_PREMIUM,
                GLOW_VIOLET,
                PLASMA_PINK,
                SILVER_STAR,
                ROSE_NEBULA,
                WARM_AMBER,
            ],
            singularity: [GOLD_PREMIUM, SILVER_STAR],
            flare: [VIOLET_ELECTRIC, GOLD_PREMIUM],
            glyph: SILVER_STAR,
            glyph_glow: VIOLET_ELECTRIC,
            progress: [VIOLET_ELECTRIC, GOLD_PREMIUM, PLASMA_PINK],
        };

        match variant {
            Variant::Cosmic => cosmic,
            Variant::Singularity => Self {
                nebula_inner: GOLD_PREMIUM,
                nebula_outer_even: WARM_AMBER,
                nebula_outer_odd: NEBULA_PURPLE,
                particles: vec![GOLD_PREMIUM, SILVER_STAR, WARM_AMBER, GOLD_PREMIUM, GLOW_VIOLET],
                flare: [GOLD_PREMIUM, WARM_AMBER],
                glyph_glow: GOLD_PREMIUM,
                progress: [WARM_AMBER, GOLD_PREMIUM, SILVER_STAR],
                ..cosmic
            },
            Variant::Nebula => Self {
                nebula_inner: PLASMA_PINK,
                nebula_outer_even: ROSE_NEBULA,
                nebula_outer_odd: ROYAL_PURPLE,
                particles: vec![PLASMA_PINK, ROSE_NEBULA, GLOW_VIOLET, WARM_AMBER, SILVER_STAR],
                flare: [PLASMA_PINK, ROSE_NEBULA],
                glyph_glow: PLASMA_PINK,
                progress: [ROYAL_PURPLE, PLASMA_PINK, ROSE_NEBULA],
                ..cosmic
            },
            Variant::Quantum => Self {
                nebula_core: DEEP_BLUE,
                nebula_inner: ROYAL_PURPLE,
                nebula_outer_even: DEEP_BLUE,
                nebula_outer_odd: INDIGO_COSMIC,
                particles: vec![DEEP_BLUE, ROYAL_PURPLE, GLOW_VIOLET, SILVER_STAR, VIOLET_ELECTRIC],
                flare: [ROYAL_PURPLE, GLOW_VIOLET],
                glyph_glow: ROYAL_PURPLE,
                progress: [DEEP_BLUE, ROYAL_PURPLE, GLOW_VIOLET],
                ..cosmic
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_variant(Variant::Cosmic)
    }
}
