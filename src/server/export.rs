use crate::foundation::error::RevealError;
use crate::orchestrate::orchestrator::Orchestrator;
use crate::scene::model::SceneDescription;

/// Route served by the export endpoint.
pub const EXPORT_ROUTE: &str = "/api/render";

/// Transport-independent HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Vec<u8>,
}

impl ExportResponse {
    /// `{"message": ...}` JSON response.
    pub fn message(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "message": message }).to_string().into_bytes();
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
        }
    }

    /// Error response; payload problems are `400`, everything else `500`.
    pub fn from_error(e: &RevealError) -> Self {
        let status = if e.is_client_error() { 400 } else { 500 };
        Self::message(status, &e.to_string())
    }

    /// Value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Parse `body` as a scene, export it, and build the download response.
#[tracing::instrument(skip_all, fields(body_len = body.len()))]
pub fn handle_export(body: &[u8], orchestrator: &Orchestrator) -> ExportResponse {
    let result = SceneDescription::from_json_slice(body).and_then(|scene| orchestrator.export(&scene));
    match result {
        Ok(video) => ExportResponse {
            status: 200,
            headers: vec![
                ("Content-Type".to_string(), "video/mp4".to_string()),
                (
                    "Content-Disposition".to_string(),
                    format!("attachment; filename={}", video.file_name),
                ),
                ("Content-Length".to_string(), video.bytes.len().to_string()),
            ],
            body: video.bytes,
        },
        Err(e) => {
            tracing::error!(error = %e, "export failed");
            ExportResponse::from_error(&e)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/server/export.rs"]
mod tests;
