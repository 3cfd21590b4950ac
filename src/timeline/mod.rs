//! Timeline driver: elapsed host time to `(phase, phase progress, global progress)`.

/// Elapsed-time accumulation, completion and skip handling.
pub mod driver;
/// Phase kinds and validated phase tables.
pub mod phase;
