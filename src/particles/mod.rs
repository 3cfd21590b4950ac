//! Particle simulation: a fixed pool of stars, dust and energy particles plus background clouds.
//!
//! Motion rules are chosen per [`Phase`](crate::timeline::phase::Phase) and are expressed per
//! 60 Hz frame, rescaled by the real frame time so that the same wall-clock duration produces
//! the same motion at any frame rate.

/// The particle pool and its phase-driven step and render.
pub mod field;
/// Background clouds.
pub mod nebula;
/// Particle and trail types.
pub mod particle;
