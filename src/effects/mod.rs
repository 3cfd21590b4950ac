//! Post-processing: named-uniform shader passes chained in a fixed order.
//!
//! Every pass has a CPU reference implementation over [`pass::ColorBuffer`]; the three custom
//! passes also ship WGSL, run by [`gpu`] when the `gpu` feature is enabled.

/// Separable Gaussian blur shared by bloom.
pub mod blur;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod grain;
pub mod hbao;
/// Pass trait, pass kinds and the float working buffer.
pub mod pass;
pub mod passes;
/// The ordered pass chain.
pub mod pipeline;
pub mod quantum;
pub mod transition;
/// Named uniform values.
pub mod uniforms;
