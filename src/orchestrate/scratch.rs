use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{RevealError, RevealResult};
use crate::scene::model::SceneDescription;

/// Directory name prefix for scratch directories.
pub const SCRATCH_PREFIX: &str = "slider-render-";
/// File name of the serialized scene inside a scratch directory.
pub const PAYLOAD_FILE: &str = "payload.json";

/// Private directory for one render job.
///
/// The directory and everything in it is removed by [`ScratchDir::close`] or, on any other exit
/// path, when the value is dropped.
#[derive(Debug)]
pub struct ScratchDir {
    dir: tempfile::TempDir,
}

impl ScratchDir {
    /// Create `slider-render-XXXX` under `root`, or under the system temp directory.
    pub fn create(root: Option<&Path>) -> RevealResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)
                    .with_context(|| format!("create scratch root '{}'", root.display()))?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .context("create scratch directory")?;
        tracing::debug!(path = %dir.path().display(), "scratch directory created");
        Ok(Self { dir })
    }

    /// Absolute path of the directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where the serialized scene goes.
    pub fn payload_path(&self) -> PathBuf {
        self.dir.path().join(PAYLOAD_FILE)
    }

    /// Path for an output file called `name`. Only plain file names are accepted.
    pub fn output_path(&self, name: &str) -> RevealResult<PathBuf> {
        let plain = Path::new(name)
            .file_name()
            .is_some_and(|f| f == std::ffi::OsStr::new(name));
        if !plain || name == PAYLOAD_FILE {
            return Err(RevealError::invalid_payload(format!(
                "invalid output file name '{name}'"
            )));
        }
        Ok(self.dir.path().join(name))
    }

    /// Serialize `scene` to [`ScratchDir::payload_path`].
    pub fn write_payload(&self, scene: &SceneDescription) -> RevealResult<PathBuf> {
        let path = self.payload_path();
        let json = serde_json::to_vec(scene).context("serialize scene payload")?;
        std::fs::write(&path, json)
            .with_context(|| format!("write payload '{}'", path.display()))?;
        Ok(path)
    }

    /// Read a finished output file.
    pub fn read_output(&self, path: &Path) -> RevealResult<Vec<u8>> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read render output '{}'", path.display()))?;
        Ok(bytes)
    }

    /// Remove the directory tree. A tree that is already gone is not an error.
    pub fn close(self) -> RevealResult<()> {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "scratch directory removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove scratch directory '{}'", path.display()))
                .into()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrate/scratch.rs"]
mod tests;
