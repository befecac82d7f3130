use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::error::{RevealError, RevealResult};

/// The single JSON line a worker prints as the last line of stdout.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum WorkerResponse {
    /// Render finished; the file is at `output_path`.
    Ok {
        /// Absolute path of the encoded video.
        #[serde(rename = "outputPath")]
        output_path: PathBuf,
    },
    /// Render failed.
    Error {
        /// Human-readable diagnostic.
        message: String,
    },
}

impl WorkerResponse {
    /// Serialize as one line (no trailing newline).
    pub fn to_line(&self) -> RevealResult<String> {
        Ok(serde_json::to_string(self).context("serialize worker response")?)
    }
}

/// Extract the output path from the stdout of a worker that exited with status 0.
///
/// The last non-empty line must be an `ok` [`WorkerResponse`] naming an absolute path; anything
/// else is a [`RevealError::WorkerProtocol`] error.
pub fn parse_worker_stdout(stdout: &str) -> RevealResult<PathBuf> {
    let Some(line) = stdout.lines().map(str::trim).rfind(|l| !l.is_empty()) else {
        return Err(RevealError::worker_protocol("worker printed no response line"));
    };
    let resp: WorkerResponse = serde_json::from_str(line).map_err(|e| {
        RevealError::worker_protocol(format!("unparsable response line '{line}': {e}"))
    })?;
    match resp {
        WorkerResponse::Ok { output_path } if output_path.is_absolute() => Ok(output_path),
        WorkerResponse::Ok { output_path } => Err(RevealError::worker_protocol(format!(
            "output path '{}' is not absolute",
            output_path.display()
        ))),
        WorkerResponse::Error { message } => Err(RevealError::worker_protocol(format!(
            "worker exited successfully but reported an error: {message}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrate/protocol.rs"]
mod tests;
