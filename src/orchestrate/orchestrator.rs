use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::audio::normalize::{AudioFetcher, HttpAudioFetcher, normalize_audio};
use crate::foundation::error::{RevealError, RevealResult};
use crate::orchestrate::engine::RenderBundle;
use crate::orchestrate::scratch::ScratchDir;
use crate::orchestrate::worker::{WorkerJob, run_worker};
use crate::render::pipeline::RenderOpts;
use crate::scene::model::SceneDescription;
use crate::scene::preset::{DEFAULT_VIDEO_NAME, PORTRAIT_COMPOSITION_ID, find_composition};

/// Where the heavy rendering runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Render on the calling thread with a bundle built once per orchestrator.
    InProcess,
    /// Spawn `exe` once per export and talk to it through files and its stdout.
    IsolatedWorker {
        /// Worker executable (usually `slidereveal-worker`).
        exe: PathBuf,
    },
}

/// Orchestrator configuration.
#[derive(Clone, Debug)]
pub struct OrchestratorOpts {
    /// Execution mode.
    pub mode: RenderMode,
    /// Composition every export uses.
    pub composition_id: String,
    /// Parent of the per-export scratch directories; system temp dir when `None`.
    pub scratch_root: Option<PathBuf>,
    /// File name reported with the rendered video.
    pub file_name: String,
    /// Directory relative image/audio paths resolve against.
    pub assets_root: PathBuf,
    /// Frame threading for in-process renders.
    pub render: RenderOpts,
}

impl Default for OrchestratorOpts {
    fn default() -> Self {
        Self {
            mode: RenderMode::InProcess,
            composition_id: PORTRAIT_COMPOSITION_ID.to_string(),
            scratch_root: None,
            file_name: DEFAULT_VIDEO_NAME.to_string(),
            assets_root: PathBuf::from("."),
            render: RenderOpts::default(),
        }
    }
}

/// An encoded video, fully read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedVideo {
    /// Suggested download name.
    pub file_name: String,
    /// MP4 bytes.
    pub bytes: Vec<u8>,
}

/// Turns scene descriptions into encoded videos.
///
/// Each [`Orchestrator::export`] call is independent: its own scratch directory, its own worker
/// process. The orchestrator may be shared across threads.
pub struct Orchestrator {
    opts: OrchestratorOpts,
    fetcher: Arc<dyn AudioFetcher>,
    bundle: OnceLock<RenderBundle>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("opts", &self.opts)
            .field("bundle_loaded", &self.bundle.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Orchestrator fetching remote audio over HTTP.
    pub fn new(opts: OrchestratorOpts) -> Self {
        Self::with_fetcher(opts, Arc::new(HttpAudioFetcher))
    }

    /// Orchestrator with a custom audio fetcher.
    pub fn with_fetcher(opts: OrchestratorOpts, fetcher: Arc<dyn AudioFetcher>) -> Self {
        Self {
            opts,
            fetcher,
            bundle: OnceLock::new(),
        }
    }

    /// Active configuration.
    pub fn opts(&self) -> &OrchestratorOpts {
        &self.opts
    }

    /// Engine bundle, loaded on first use.
    pub fn bundle(&self) -> &RenderBundle {
        self.bundle.get_or_init(RenderBundle::load)
    }

    /// Render `scene` and return the encoded file.
    ///
    /// The scene is validated before any directory is created or process spawned. The scratch
    /// directory is removed on every exit path.
    #[tracing::instrument(skip_all, fields(composition = %self.opts.composition_id))]
    pub fn export(&self, scene: &SceneDescription) -> RevealResult<RenderedVideo> {
        let def = find_composition(&self.opts.composition_id)?;
        def.validate_scene(scene)?;

        let scratch = ScratchDir::create(self.opts.scratch_root.as_deref())?;
        let scene = normalize_audio(scene.clone(), self.fetcher.as_ref());

        let output = match &self.opts.mode {
            RenderMode::InProcess => self.render_in_process(scene, &scratch)?,
            RenderMode::IsolatedWorker { exe } => self.render_in_worker(exe, &scene, &scratch)?,
        };

        let bytes = scratch
            .read_output(&output)
            .map_err(|e| unreadable_output(&self.opts.mode, &output, &e))?;
        if let Err(e) = scratch.close() {
            tracing::warn!(error = %e, "scratch cleanup failed");
        }

        tracing::info!(bytes = bytes.len(), "export finished");
        Ok(RenderedVideo {
            file_name: self.opts.file_name.clone(),
            bytes,
        })
    }

    fn render_in_process(
        &self,
        scene: SceneDescription,
        scratch: &ScratchDir,
    ) -> RevealResult<PathBuf> {
        let out = scratch.output_path(&self.opts.file_name)?;
        self.bundle()
            .render_media(
                &self.opts.composition_id,
                scene,
                &out,
                &self.opts.assets_root,
                &self.opts.render,
            )
            .map_err(into_render_failure)?;
        Ok(out)
    }

    fn render_in_worker(
        &self,
        exe: &Path,
        scene: &SceneDescription,
        scratch: &ScratchDir,
    ) -> RevealResult<PathBuf> {
        let expected = absolute_or_self(scratch.output_path(&self.opts.file_name)?);
        let payload = scratch.write_payload(scene)?;
        let assets_root = absolute_or_self(self.opts.assets_root.clone());
        let reported = run_worker(&WorkerJob {
            exe,
            payload: &payload,
            file_name: &self.opts.file_name,
            composition_id: &self.opts.composition_id,
            assets_root: &assets_root,
        })?;
        if reported != expected {
            return Err(RevealError::worker_protocol(format!(
                "worker reported '{}', expected '{}'",
                reported.display(),
                expected.display()
            )));
        }
        Ok(reported)
    }
}

/// A missing output is the worker's broken promise, or the in-process engine's own failure.
fn unreadable_output(mode: &RenderMode, path: &Path, e: &RevealError) -> RevealError {
    match mode {
        RenderMode::InProcess => RevealError::render_failed(format!(
            "rendered output '{}' is unreadable: {e}",
            path.display()
        )),
        RenderMode::IsolatedWorker { .. } => RevealError::worker_protocol(format!(
            "reported output '{}' is unreadable: {e}",
            path.display()
        )),
    }
}

fn absolute_or_self(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

/// Engine errors reach callers as render failures; payload errors keep their kind.
fn into_render_failure(e: RevealError) -> RevealError {
    match e {
        RevealError::InvalidPayload(_)
        | RevealError::CompositionNotFound(_)
        | RevealError::RenderFailed(_) => e,
        other => RevealError::render_failed(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrate/orchestrator.rs"]
mod tests;
