use std::path::{Path, PathBuf};

use anyhow::Context as _;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::foundation::error::{RevealError, RevealResult};

/// Upper bound for a single fetched resource.
pub const MAX_REMOTE_BYTES: u64 = 256 * 1024 * 1024;

/// Where a source string points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind<'a> {
    /// Inline `data:<mime>[;base64],<payload>` URL.
    DataUrl {
        /// Declared media type (may be empty).
        mime: &'a str,
        /// `true` when the payload is base64 encoded.
        base64: bool,
        /// Raw payload after the comma.
        payload: &'a str,
    },
    /// `http://` or `https://` URL.
    Remote(&'a str),
    /// Browser-only object URL; cannot be resolved outside the page that created it.
    Blob(&'a str),
    /// Filesystem path (optionally `file://`-prefixed), resolved against a base directory.
    Local(PathBuf),
}

/// Classify a source string.
pub fn classify(src: &str) -> SourceKind<'_> {
    let s = src.trim();
    if let Some(rest) = s.strip_prefix("data:")
        && let Some((meta, payload)) = rest.split_once(',')
    {
        let (mime, base64) = match meta.strip_suffix(";base64") {
            Some(m) => (m, true),
            None => (meta, false),
        };
        return SourceKind::DataUrl {
            mime,
            base64,
            payload,
        };
    }
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return SourceKind::Remote(s);
    }
    if lower.starts_with("blob:") {
        return SourceKind::Blob(s);
    }
    SourceKind::Local(PathBuf::from(s.strip_prefix("file://").unwrap_or(s)))
}

/// Encode bytes as `data:<content_type>;base64,<payload>`.
pub fn encode_data_url(content_type: &str, bytes: &[u8]) -> String {
    let ct = if content_type.trim().is_empty() {
        "application/octet-stream"
    } else {
        content_type.trim()
    };
    format!("data:{ct};base64,{}", BASE64_STANDARD.encode(bytes))
}

/// Decode a `data:` URL into `(mime, bytes)`.
pub fn decode_data_url(src: &str) -> RevealResult<(String, Vec<u8>)> {
    match classify(src) {
        SourceKind::DataUrl {
            mime,
            base64,
            payload,
        } => {
            let bytes = if base64 {
                BASE64_STANDARD
                    .decode(payload.trim())
                    .map_err(|e| RevealError::evaluation(format!("invalid base64 data URL: {e}")))?
            } else {
                payload.as_bytes().to_vec()
            };
            Ok((mime.to_string(), bytes))
        }
        _ => Err(RevealError::evaluation("not a data URL")),
    }
}

/// Fetch a remote resource, returning its bytes and `Content-Type` header.
#[tracing::instrument(skip_all, fields(url = %url))]
pub fn fetch_remote(url: &str) -> RevealResult<(Vec<u8>, Option<String>)> {
    let mut resp = ureq::get(url)
        .call()
        .map_err(|e| RevealError::evaluation(format!("GET {url} failed: {e}")))?;
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let bytes = resp
        .body_mut()
        .with_config()
        .limit(MAX_REMOTE_BYTES)
        .read_to_vec()
        .map_err(|e| RevealError::evaluation(format!("read body of {url} failed: {e}")))?;
    tracing::debug!(bytes = bytes.len(), "fetched remote resource");
    Ok((bytes, content_type))
}

/// Load the bytes behind any source string. Relative local paths resolve against `base_dir`.
pub fn load_source_bytes(src: &str, base_dir: &Path) -> RevealResult<Vec<u8>> {
    match classify(src) {
        SourceKind::DataUrl { .. } => decode_data_url(src).map(|(_, bytes)| bytes),
        SourceKind::Remote(url) => fetch_remote(url).map(|(bytes, _)| bytes),
        SourceKind::Blob(url) => Err(RevealError::evaluation(format!(
            "blob URL '{url}' cannot be resolved outside the browser; send a data URL instead"
        ))),
        SourceKind::Local(path) => {
            let path = if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            };
            std::fs::read(&path)
                .with_context(|| format!("read source bytes from '{}'", path.display()))
                .map_err(RevealError::from)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
