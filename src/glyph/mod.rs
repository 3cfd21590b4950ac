//! Orbital glyph: the emblem revealed at the center during the singularity.

/// Orbit and node tables plus the built-in presets.
pub mod descriptor;
/// Reveal and drawing.
pub mod renderer;
