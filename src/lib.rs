//! slidereveal renders "slider reveal" comparison videos: a top photo wiped across a bottom
//! photo, one segment per photo pair, with a text overlay and an optional audio track.
//!
//! The pipeline is deterministic and frame-independent:
//!
//! - Describe the video as a [`SceneDescription`] (usually JSON from an editor)
//! - Sample a [`Timeline`] and build each frame's layer stack with [`compose_frame`]
//! - Rasterize frames in a [`RenderSession`] and stream them into a [`FrameSink`]
//!
//! Exports go through an [`Orchestrator`], which validates the scene, prepares a private scratch
//! directory and renders either in process or in an isolated `slidereveal-worker` process.
//! Scenes are checked up front with [`crate::validate_scene`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Easing curves and playback directions.
pub mod animation;
/// Image, audio and overlay asset preparation.
pub mod assets;
pub mod audio;
pub mod compose;
pub mod encode;
pub mod orchestrate;
pub mod render;
/// Scene data model, compositions and the photo-pair list.
pub mod scene;
pub mod server;
/// Frame-to-progress mapping.
pub mod timeline;

pub use crate::foundation::core::{Canvas, FrameIndex, FrameRange, Point, Rect, Rgba8};
pub use crate::foundation::error::{RevealError, RevealResult};

pub use crate::animation::ease::{Direction, Easing, shape_progress};
pub use crate::assets::overlay::{OverlayLayer, build_fontdb};
pub use crate::assets::store::ImageStore;
pub use crate::audio::normalize::{AudioFetcher, FetchedAudio, HttpAudioFetcher, normalize_audio};
pub use crate::compose::frame::{FrameComposition, ImageContent, Layer, compose_frame};
pub use crate::compose::mask::{Divider, RevealMask};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{AudioInput, FrameSink, InMemorySink, SinkConfig};
pub use crate::orchestrate::engine::RenderBundle;
pub use crate::orchestrate::orchestrator::{
    Orchestrator, OrchestratorOpts, RenderMode, RenderedVideo,
};
pub use crate::orchestrate::protocol::{WorkerResponse, parse_worker_stdout};
pub use crate::orchestrate::scratch::ScratchDir;
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::pipeline::{RenderOpts, RenderSession, RenderStats};
pub use crate::scene::model::{
    AnimationSpec, BorderStyle, CompareSpec, Orientation, OverlaySpec, SceneDescription,
    TextAlign,
};
pub use crate::scene::pairs::{PairList, PhotoPair};
pub use crate::scene::preset::{
    CompositionDef, DEFAULT_VIDEO_NAME, LANDSCAPE_COMPOSITION_ID, PORTRAIT_COMPOSITION_ID,
    RenderPreset, builtin_compositions, find_composition,
};
pub use crate::scene::validate::{MAX_TOTAL_FRAMES, validate_scene};
pub use crate::server::export::{ExportResponse, handle_export};
pub use crate::timeline::segments::{SegmentSample, Timeline};
