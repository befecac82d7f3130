//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are fed by `RenderSession::render_range`.

/// `ffmpeg`-based MP4 sink.
pub mod ffmpeg;
/// Frame sink trait and the in-memory sink.
pub mod sink;
