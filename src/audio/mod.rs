//! Scene audio: normalization before a render job is packaged, materialization for the encoder.

/// Writes an audio source to a file `ffmpeg` can read.
pub mod input;
/// Remote audio URL to inline `data:` URL.
pub mod normalize;
