//! CPU rasterization of composed frames.

/// Rendered frame type.
pub mod backend;
/// Premultiplied RGBA8 blending helpers.
pub mod composite;
/// Layer-stack rasterizer.
pub mod cpu;
/// Render sessions: one scene, many frames.
pub mod pipeline;
