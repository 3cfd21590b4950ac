//! Drawing surfaces: the command vocabulary, an in-memory recorder and the CPU rasterizer.

pub(crate) mod composite;
/// `vello_cpu`-backed raster surface.
pub mod cpu;
/// Rendered frame buffers.
pub mod frame;
/// Screen-space overlays drawn above the scene.
pub mod overlay;
/// Drawing commands and the [`surface::Surface`] trait.
pub mod surface;
