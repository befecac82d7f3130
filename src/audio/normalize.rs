use crate::assets::source::{SourceKind, classify, encode_data_url, fetch_remote};
use crate::assets::store::abbreviate;
use crate::foundation::error::{RevealError, RevealResult};
use crate::scene::model::SceneDescription;

/// Bytes and declared media type of a fetched audio resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedAudio {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// `Content-Type` reported by the server, if any.
    pub content_type: Option<String>,
}

/// Retrieves remote audio so it can be inlined into a render payload.
pub trait AudioFetcher: Send + Sync {
    /// Fetch `url`. Errors are reported as [`RevealError::AudioFetch`].
    fn fetch(&self, url: &str) -> RevealResult<FetchedAudio>;
}

/// Blocking HTTP fetcher backed by `ureq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAudioFetcher;

impl AudioFetcher for HttpAudioFetcher {
    fn fetch(&self, url: &str) -> RevealResult<FetchedAudio> {
        let (bytes, content_type) =
            fetch_remote(url).map_err(|e| RevealError::audio_fetch(e.to_string()))?;
        Ok(FetchedAudio {
            bytes,
            content_type,
        })
    }
}

/// Replace remote audio with an inline `data:` URL so the render job is self-contained.
///
/// Local paths and `data:` URLs pass through. A fetch failure, a `blob:` URL or a blank string
/// drops the audio track; the render then continues with silence.
#[tracing::instrument(skip_all)]
pub fn normalize_audio(scene: SceneDescription, fetcher: &dyn AudioFetcher) -> SceneDescription {
    let Some(src) = scene.audio.clone() else {
        return scene;
    };
    if src.trim().is_empty() {
        return scene.with_audio(None);
    }

    match classify(&src) {
        SourceKind::Remote(url) => match fetcher.fetch(url) {
            Ok(fetched) => {
                let ct = fetched
                    .content_type
                    .as_deref()
                    .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_string())
                    .filter(|ct| !ct.is_empty())
                    .unwrap_or_else(|| guess_audio_type(url).to_string());
                tracing::debug!(bytes = fetched.bytes.len(), content_type = %ct, "audio inlined");
                let inline = encode_data_url(&ct, &fetched.bytes);
                scene.with_audio(Some(inline))
            }
            Err(e) => {
                tracing::warn!(url = %abbreviate(url), error = %e, "audio fetch failed, rendering without audio");
                scene.with_audio(None)
            }
        },
        SourceKind::Blob(url) => {
            tracing::warn!(url = %abbreviate(url), "blob audio URL cannot be resolved, rendering without audio");
            scene.with_audio(None)
        }
        SourceKind::DataUrl { .. } | SourceKind::Local(_) => scene,
    }
}

/// Media type implied by a file extension, defaulting to MPEG audio.
pub fn guess_audio_type(name: &str) -> &'static str {
    let path = name.split(['?', '#']).next().unwrap_or(name);
    let ext = path
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "m4a" | "mp4" => "audio/mp4",
        "aac" => "audio/aac",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "webm" => "audio/webm",
        _ => "audio/mpeg",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/normalize.rs"]
mod tests;
