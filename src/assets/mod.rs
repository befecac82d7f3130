//! Asset loading: image/audio source resolution, cover-fitted image store, overlay raster.
//!
//! All IO happens here, before any frame is produced. Renderers only read prepared buffers.

/// Overlay text box rasterized through an SVG document.
pub mod overlay;
/// Source strings (`data:` URLs, remote URLs, local paths) to bytes.
pub mod source;
/// Decoded, cover-fitted images keyed by source string.
pub mod store;
