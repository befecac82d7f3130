use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::overlay::build_fontdb;
use crate::audio::input::materialize_audio;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, has_audio_stream};
use crate::encode::sink::AudioInput;
use crate::foundation::error::{RevealError, RevealResult};
use crate::render::pipeline::{RenderOpts, RenderSession, RenderStats};
use crate::scene::model::SceneDescription;
use crate::scene::preset::{CompositionDef, builtin_compositions};

/// Everything the engine needs before it can render any scene: the composition registry and the
/// font database. Loading fonts is the expensive part, so a bundle is built once and reused.
#[derive(Clone, Debug)]
pub struct RenderBundle {
    compositions: Vec<CompositionDef>,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl RenderBundle {
    /// Built-in compositions with system fonts.
    #[tracing::instrument]
    pub fn load() -> Self {
        Self::with_fontdb(build_fontdb(&[]))
    }

    /// Built-in compositions with a caller-provided font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self {
            compositions: builtin_compositions().to_vec(),
            fontdb,
        }
    }

    /// Registered compositions.
    pub fn compositions(&self) -> &[CompositionDef] {
        &self.compositions
    }

    /// Look up a composition by id.
    pub fn resolve(&self, id: &str) -> RevealResult<CompositionDef> {
        self.compositions
            .iter()
            .find(|c| c.id == id)
            .copied()
            .ok_or_else(|| RevealError::composition_not_found(id))
    }

    /// Prepare a render session for `scene` under composition `id`.
    pub fn session(
        &self,
        id: &str,
        scene: SceneDescription,
        base_dir: &Path,
    ) -> RevealResult<RenderSession> {
        let def = self.resolve(id)?;
        RenderSession::new(def, scene, Arc::clone(&self.fontdb), base_dir)
    }

    /// Render `scene` to an MP4 at `out_path`.
    ///
    /// Audio that cannot be materialized or decoded is logged and replaced by silence. The audio
    /// file is written to a directory next to `out_path`.
    #[tracing::instrument(skip(self, scene, opts), fields(out = %out_path.display()))]
    pub fn render_media(
        &self,
        id: &str,
        scene: SceneDescription,
        out_path: &Path,
        base_dir: &Path,
        opts: &RenderOpts,
    ) -> RevealResult<RenderStats> {
        let audio_src = scene.audio.clone();
        let session = self.session(id, scene, base_dir)?;

        let work_dir = work_dir_for(out_path);
        ensure_parent_dir(out_path)?;
        let audio_dir = tempfile::Builder::new()
            .prefix("slider-audio-")
            .tempdir_in(work_dir)
            .with_context(|| format!("create audio directory in '{}'", work_dir.display()))?;
        let audio = match audio_src.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(src) => match materialize_audio(src, audio_dir.path(), base_dir) {
                Ok(path) if has_audio_stream(&path) => AudioInput::File(path),
                Ok(path) => {
                    tracing::warn!(path = %path.display(), "audio not decodable, encoding silence");
                    AudioInput::Silent
                }
                Err(e) => {
                    tracing::warn!(error = %e, "audio unusable, encoding silence");
                    AudioInput::Silent
                }
            },
            None => AudioInput::Silent,
        };

        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path));
        let stats = session.render_range(
            session.full_range()?,
            session.sink_config(audio),
            &mut sink,
            opts,
        )?;
        tracing::info!(frames = stats.frames, "video encoded");
        Ok(stats)
    }
}

/// Directory render-side files for `out_path` go into.
fn work_dir_for(out_path: &Path) -> &Path {
    out_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrate/engine.rs"]
mod tests;
