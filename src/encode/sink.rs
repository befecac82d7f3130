use std::path::PathBuf;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::RevealResult;
use crate::render::backend::FrameRGBA;

/// Audio track for the encoded file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioInput {
    /// Any container/codec `ffmpeg` can demux.
    File(PathBuf),
    /// Generated stereo silence, so the output always carries an audio stream.
    Silent,
}

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Clone, Debug)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Frames per second; may be fractional.
    pub fps: f64,
    /// Exact output duration; audio is trimmed to it.
    pub duration_secs: f64,
    /// Audio track.
    pub audio: AudioInput,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RevealResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RevealResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> RevealResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` was called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RevealResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RevealResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RevealResult<()> {
        self.ended = true;
        Ok(())
    }
}
