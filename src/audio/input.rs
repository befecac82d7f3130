use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::source::{SourceKind, classify, decode_data_url, load_source_bytes};
use crate::audio::normalize::guess_audio_type;
use crate::foundation::error::{RevealError, RevealResult};

/// Make `src` available as a file for the encoder.
///
/// Existing local files are used in place (relative paths resolve against `base_dir`); inline and
/// remote sources are written into `dir`.
pub fn materialize_audio(src: &str, dir: &Path, base_dir: &Path) -> RevealResult<PathBuf> {
    let (ext, bytes) = match classify(src) {
        SourceKind::Local(path) => {
            let path = if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            };
            if !path.is_file() {
                return Err(RevealError::evaluation(format!(
                    "audio file '{}' not found",
                    path.display()
                )));
            }
            return Ok(path);
        }
        SourceKind::DataUrl { .. } => {
            let (mime, bytes) = decode_data_url(src)?;
            (extension_for(&mime), bytes)
        }
        SourceKind::Remote(url) => (
            extension_for(guess_audio_type(url)),
            load_source_bytes(src, base_dir)?,
        ),
        SourceKind::Blob(_) => {
            return Err(RevealError::evaluation(
                "blob audio URL cannot be resolved outside the browser",
            ));
        }
    };

    if bytes.is_empty() {
        return Err(RevealError::evaluation("audio source is empty"));
    }
    let path = dir.join(format!("audio.{ext}"));
    std::fs::write(&path, &bytes)
        .with_context(|| format!("write audio to '{}'", path.display()))?;
    tracing::debug!(bytes = bytes.len(), path = %path.display(), "audio materialized");
    Ok(path)
}

fn extension_for(mime: &str) -> &'static str {
    match mime.trim().to_ascii_lowercase().as_str() {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/mp4" | "audio/x-m4a" | "audio/m4a" => "m4a",
        "audio/aac" => "aac",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/ogg" => "ogg",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/webm" => "webm",
        _ => "bin",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/input.rs"]
mod tests;
