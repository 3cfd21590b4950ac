use serde::{Deserialize, Serialize};

use crate::foundation::error::{KosmosError, KosmosResult};

/// Decorative elliptical ring, dimensions in reference units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Horizontal semi-axis.
    pub rx: f64,
    /// Vertical semi-axis.
    pub ry: f64,
    /// Fixed rotation, degrees.
    pub rotation_deg: f64,
    /// Dashed stroke.
    pub dotted: bool,
    /// Peak stroke opacity.
    pub opacity: f64,
}

impl Orbit {
    const fn new(rx: f64, ry: f64, rotation_deg: f64, dotted: bool, opacity: f64) -> Self {
        Self {
            rx,
            ry,
            rotation_deg,
            dotted,
            opacity,
        }
    }
}

/// How a chain node is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStyle {
    /// Solid dot.
    Filled,
    /// Stroked circle with an optional inner dot.
    Ring,
    /// Glow, ring and pulsing center.
    Core,
}

/// Node on the horizontal chain line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphNode {
    /// Position along the line in `[-1, 1]`.
    pub offset: f64,
    /// Radius in reference units.
    pub size: f64,
    /// Drawing style.
    pub style: NodeStyle,
    /// Inner dot radius in reference units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_size: Option<f64>,
    /// Faint outer ring.
    #[serde(default)]
    pub has_ring: bool,
}

impl GlyphNode {
    const fn filled(offset: f64, size: f64) -> Self {
        Self {
            offset,
            size,
            style: NodeStyle::Filled,
            inner_size: None,
            has_ring: false,
        }
    }

    const fn ring(offset: f64, size: f64, inner: f64, has_ring: bool) -> Self {
        Self {
            offset,
            size,
            style: NodeStyle::Ring,
            inner_size: Some(inner),
            has_ring,
        }
    }

    const fn core(offset: f64, size: f64, inner: f64, has_ring: bool) -> Self {
        Self {
            offset,
            size,
            style: NodeStyle::Core,
            inner_size: Some(inner),
            has_ring,
        }
    }
}

/// Time-dependent tuning of a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphMotion {
    /// Time accumulated per 60 Hz frame.
    pub time_step: f64,
    /// Frequency of the orbit rotation jitter.
    pub jitter_freq: f64,
    /// Phase offset per orbit index.
    pub jitter_index_phase: f64,
    /// Jitter amplitude, degrees.
    pub jitter_amplitude_deg: f64,
    /// Frequency of the core pulse.
    pub pulse_freq: f64,
    /// Reveal delay between consecutive orbits.
    pub orbit_stagger: f64,
    /// Reveal window of one orbit.
    pub orbit_window: f64,
    /// Reveal delay between consecutive nodes.
    pub node_stagger: f64,
    /// Reveal window of one node.
    pub node_window: f64,
    /// `[dash, gap]` of dotted orbits.
    pub dash: [f64; 2],
}

/// Complete geometric and motion description of an orbital glyph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphDescriptor {
    /// Glyph size at which reference units equal pixels.
    pub reference_size: f64,
    /// Half-length of the chain line in reference units.
    pub line_half_length: f64,
    /// Rings, outermost first.
    pub orbits: Vec<Orbit>,
    /// Chain nodes, left to right.
    pub nodes: Vec<GlyphNode>,
    /// Motion constants.
    pub motion: GlyphMotion,
}

impl GlyphDescriptor {
    /// Reject descriptors that cannot be drawn: non-positive reference size, non-finite
    /// dimensions, or anything other than exactly one core node.
    pub fn validate(&self) -> KosmosResult<()> {
        if !(self.reference_size.is_finite() && self.reference_size > 0.0) {
            return Err(KosmosError::validation(
                "glyph reference_size must be finite and > 0",
            ));
        }
        if !self.line_half_length.is_finite() {
            return Err(KosmosError::validation(
                "glyph line_half_length must be finite",
            ));
        }
        for (i, o) in self.orbits.iter().enumerate() {
            if ![o.rx, o.ry, o.rotation_deg, o.opacity]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(KosmosError::validation(format!(
                    "glyph orbit {i} has a non-finite field"
                )));
            }
        }
        let cores = self
            .nodes
            .iter()
            .filter(|n| n.style == NodeStyle::Core)
            .count();
        if cores != 1 {
            return Err(KosmosError::validation(format!(
                "glyph must have exactly one core node, found {cores}"
            )));
        }
        Ok(())
    }
}

/// Built-in glyph constant sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphPreset {
    /// Five rings, wide chain line.
    #[default]
    Rising,
    /// Four rings, slower motion and a compact chain.
    Premium,
}

impl GlyphPreset {
    /// The preset's descriptor.
    pub fn descriptor(self) -> GlyphDescriptor {
        match self {
            Self::Rising => GlyphDescriptor {
                reference_size: 400.0,
                line_half_length: 130.0,
                orbits: vec![
                    Orbit::new(120.0, 50.0, -30.0, false, 0.4),
                    Orbit::new(105.0, 45.0, 25.0, true, 0.3),
                    Orbit::new(90.0, 38.0, -15.0, true, 0.35),
                    Orbit::new(75.0, 32.0, 40.0, false, 0.3),
                    Orbit::new(60.0, 26.0, -8.0, true, 0.25),
                ],
                nodes: vec![
                    GlyphNode::filled(-1.0, 4.0),
                    GlyphNode::ring(-0.65, 8.0, 3.0, false),
                    GlyphNode::filled(-0.35, 4.0),
                    GlyphNode::core(0.0, 22.0, 10.0, false),
                    GlyphNode::filled(0.35, 4.0),
                    GlyphNode::ring(0.65, 10.0, 4.0, true),
                    GlyphNode::filled(1.0, 4.0),
                ],
                motion: GlyphMotion {
                    time_step: 0.012,
                    jitter_freq: 1.0,
                    jitter_index_phase: 0.7,
                    jitter_amplitude_deg: 2.0,
                    pulse_freq: 3.0,
                    orbit_stagger: 0.12,
                    orbit_window: 0.25,
                    node_stagger: 0.08,
                    node_window: 0.2,
                    dash: [3.0, 5.0],
                },
            },
            Self::Premium => GlyphDescriptor {
                reference_size: 300.0,
                line_half_length: 95.0,
                orbits: vec![
                    Orbit::new(95.0, 38.0, -25.0, false, 0.5),
                    Orbit::new(82.0, 32.0, 30.0, true, 0.35),
                    Orbit::new(70.0, 28.0, -45.0, true, 0.3),
                    Orbit::new(58.0, 24.0, 15.0, false, 0.25),
                ],
                nodes: vec![
                    GlyphNode::filled(-1.0, 3.0),
                    GlyphNode::ring(-0.62, 7.0, 3.0, false),
                    GlyphNode::filled(-0.32, 3.0),
                    GlyphNode::core(0.0, 20.0, 9.0, true),
                    GlyphNode::filled(0.32, 3.0),
                    GlyphNode::ring(0.62, 8.0, 4.0, true),
                    GlyphNode::filled(1.0, 3.0),
                ],
                motion: GlyphMotion {
                    time_step: 0.006,
                    jitter_freq: 0.5,
                    jitter_index_phase: 0.8,
                    jitter_amplitude_deg: 3.0,
                    pulse_freq: 2.5,
                    orbit_stagger: 0.1,
                    orbit_window: 0.3,
                    node_stagger: 0.05,
                    node_window: 0.3,
                    dash: [3.0, 6.0],
                },
            },
        }
    }
}
