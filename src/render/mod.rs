//! Caption rasterization and the frame pipeline.

/// Rendered frame buffers.
pub mod frame;
/// Blur, brighten and compositing kernels.
pub mod glow;
/// Planning + rasterization + sink orchestration.
pub mod pipeline;
/// Caption style and the glow rasterizer.
pub mod raster;
/// Parley text layout.
pub mod text;
