use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{RevealError, RevealResult};
use crate::orchestrate::protocol::parse_worker_stdout;

/// Arguments for one isolated worker run.
#[derive(Clone, Debug)]
pub struct WorkerJob<'a> {
    /// Worker executable.
    pub exe: &'a Path,
    /// Serialized scene.
    pub payload: &'a Path,
    /// Output file name, created next to the payload.
    pub file_name: &'a str,
    /// Composition id.
    pub composition_id: &'a str,
    /// Directory relative image/audio paths resolve against.
    pub assets_root: &'a Path,
}

impl WorkerJob<'_> {
    /// Command line passed to the worker.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.exe);
        cmd.arg(self.payload)
            .arg(self.file_name)
            .arg("--composition")
            .arg(self.composition_id)
            .arg("--assets-root")
            .arg(self.assets_root)
            .stdin(Stdio::null());
        cmd
    }
}

/// Spawn the worker and block until it exits.
///
/// Non-zero exit is [`RevealError::RenderFailed`] carrying the worker's stderr. Exit 0 is decoded
/// with [`parse_worker_stdout`].
#[tracing::instrument(skip_all, fields(exe = %job.exe.display()))]
pub fn run_worker(job: &WorkerJob<'_>) -> RevealResult<PathBuf> {
    let output = job.command().output().map_err(|e| {
        RevealError::render_failed(format!(
            "failed to spawn worker '{}': {e}",
            job.exe.display()
        ))
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        tracing::warn!(status = %output.status, "worker failed");
        return Err(RevealError::render_failed(format!(
            "worker exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    if !stderr.trim().is_empty() {
        tracing::debug!(stderr = %stderr.trim(), "worker diagnostics");
    }
    parse_worker_stdout(&String::from_utf8_lossy(&output.stdout))
}
