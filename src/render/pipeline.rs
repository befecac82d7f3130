use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::overlay::OverlayLayer;
use crate::assets::store::ImageStore;
use crate::compose::frame::{FrameComposition, compose_frame_with, overlay_safe_zone};
use crate::encode::sink::{AudioInput, FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex, FrameRange};
use crate::foundation::error::{RevealError, RevealResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuRasterizer;
use crate::scene::model::SceneDescription;
use crate::scene::preset::CompositionDef;
use crate::timeline::segments::Timeline;

/// Threading and chunking controls for range rendering.
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Frames rendered in parallel before being pushed to the sink.
    pub chunk_size: u64,
    /// Explicit worker thread count; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            threads: None,
        }
    }
}

/// Aggregated counters from [`RenderSession::render_range`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Parallel chunks processed.
    pub chunks: u64,
}

/// A scene bound to a composition, with every asset prepared.
///
/// Preparation (image decode, cover fitting, overlay raster) happens once in [`RenderSession::new`];
/// frames are then pure functions of the frame index.
#[derive(Debug)]
pub struct RenderSession {
    def: CompositionDef,
    scene: SceneDescription,
    timeline: Timeline,
    images: ImageStore,
    overlay: OverlayLayer,
}

impl RenderSession {
    /// Validate `scene` against `def` and prepare its assets.
    ///
    /// Relative image paths resolve against `base_dir`.
    #[tracing::instrument(skip_all, fields(composition = def.id))]
    pub fn new(
        def: CompositionDef,
        scene: SceneDescription,
        fontdb: Arc<usvg::fontdb::Database>,
        base_dir: &Path,
    ) -> RevealResult<Self> {
        def.validate_scene(&scene)?;
        let timeline = Timeline::for_composition(&def, &scene)?;
        let images = ImageStore::prepare(&scene, def.canvas, base_dir);
        let overlay =
            OverlayLayer::render(&scene.overlay, def.canvas, overlay_safe_zone(def.canvas), fontdb)?;
        tracing::debug!(
            frames = timeline.total_frames(),
            segments = timeline.segment_count(),
            "render session ready"
        );
        Ok(Self {
            def,
            scene,
            timeline,
            images,
            overlay,
        })
    }

    /// Composition this session renders.
    pub fn composition(&self) -> &CompositionDef {
        &self.def
    }

    /// Stage size.
    pub fn canvas(&self) -> Canvas {
        self.def.canvas
    }

    /// Frame-to-progress mapping.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Total output frames.
    pub fn total_frames(&self) -> u64 {
        self.timeline.total_frames()
    }

    /// Output duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.total_frames() as f64 / self.scene.animation.frame_rate
    }

    /// Full frame range of the output.
    pub fn full_range(&self) -> RevealResult<FrameRange> {
        FrameRange::new(FrameIndex(0), FrameIndex(self.total_frames()))
    }

    /// Sink configuration for the whole output with `audio`.
    pub fn sink_config(&self, audio: AudioInput) -> SinkConfig {
        SinkConfig {
            width: self.def.canvas.width,
            height: self.def.canvas.height,
            fps: self.scene.animation.frame_rate,
            duration_secs: self.duration_secs(),
            audio,
        }
    }

    /// Layer stack for `frame`. Images that failed to decode count as missing.
    pub fn compose(&self, frame: FrameIndex) -> FrameComposition {
        compose_frame_with(
            &self.scene,
            &self.timeline,
            self.def.canvas,
            frame,
            |src| self.images.contains(src),
        )
    }

    /// Compose and rasterize one frame.
    pub fn render_frame(&self, frame: FrameIndex) -> RevealResult<FrameRGBA> {
        if frame.0 >= self.total_frames() {
            return Err(RevealError::evaluation(format!(
                "frame {} out of range (0..{})",
                frame.0,
                self.total_frames()
            )));
        }
        CpuRasterizer::new(&self.images, &self.overlay)?.render(&self.compose(frame))
    }

    /// Render `range` into `sink`.
    ///
    /// Frames inside a chunk are rendered in parallel; chunks are pushed in order, so the sink
    /// sees strictly increasing frame indices.
    #[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0))]
    pub fn render_range(
        &self,
        range: FrameRange,
        sink_cfg: SinkConfig,
        sink: &mut dyn FrameSink,
        opts: &RenderOpts,
    ) -> RevealResult<RenderStats> {
        if range.is_empty() {
            return Err(RevealError::evaluation("render range must be non-empty"));
        }
        if range.end.0 > self.total_frames() {
            return Err(RevealError::evaluation(format!(
                "render range end {} exceeds {} frames",
                range.end.0,
                self.total_frames()
            )));
        }
        if opts.chunk_size == 0 {
            return Err(RevealError::evaluation("render chunk_size must be >= 1"));
        }

        let pool = build_thread_pool(opts.threads)?;
        let rasterizer = CpuRasterizer::new(&self.images, &self.overlay)?;
        let mut stats = RenderStats::default();

        sink.begin(sink_cfg)?;
        for chunk in range.chunks(opts.chunk_size) {
            let indices: Vec<u64> = (chunk.start.0..chunk.end.0).collect();
            let frames: Vec<FrameRGBA> = pool.install(|| {
                indices
                    .par_iter()
                    .map(|&f| rasterizer.render(&self.compose(FrameIndex(f))))
                    .collect::<RevealResult<Vec<_>>>()
            })?;
            for (f, frame) in indices.iter().zip(&frames) {
                sink.push_frame(FrameIndex(*f), frame)?;
            }
            stats.frames += frames.len() as u64;
            stats.chunks += 1;
        }
        sink.end()?;

        tracing::info!(frames = stats.frames, chunks = stats.chunks, "range rendered");
        Ok(stats)
    }
}

fn build_thread_pool(threads: Option<usize>) -> RevealResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RevealError::evaluation(
            "render threads must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RevealError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
