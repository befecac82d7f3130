use std::io::Read as _;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{RevealError, RevealResult};
use crate::orchestrate::orchestrator::Orchestrator;
use crate::server::export::{EXPORT_ROUTE, ExportResponse, handle_export};

/// Largest accepted request body (scenes carry inline images).
pub const MAX_BODY_BYTES: u64 = 512 * 1024 * 1024;

/// Serve the export endpoint on `addr` until the listener fails.
///
/// Every request runs on its own thread; requests share nothing but the orchestrator.
pub fn serve(addr: &str, orchestrator: Arc<Orchestrator>) -> RevealResult<()> {
    let server = tiny_http::Server::http(addr)
        .map_err(|e| anyhow::anyhow!("bind {addr}: {e}"))
        .map_err(RevealError::from)?;
    tracing::info!(%addr, "listening");

    for request in server.incoming_requests() {
        let orchestrator = Arc::clone(&orchestrator);
        std::thread::spawn(move || respond(request, &orchestrator));
    }
    Ok(())
}

fn respond(mut request: tiny_http::Request, orchestrator: &Orchestrator) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let response = match read_body(&mut request) {
        Ok(body) => dispatch(&method, &url, &body, orchestrator),
        Err(e) => ExportResponse::message(400, &e.to_string()),
    };
    tracing::info!(%method, %url, status = response.status, "request handled");

    let mut out = tiny_http::Response::from_data(response.body).with_status_code(response.status);
    for (name, value) in &response.headers {
        // tiny_http derives Content-Length from the body.
        if name.eq_ignore_ascii_case("content-length") {
            continue;
        }
        match tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(h) => out.add_header(h),
            Err(()) => tracing::warn!(%name, "invalid response header dropped"),
        }
    }
    if let Err(e) = request.respond(out) {
        tracing::warn!(error = %e, "failed to send response");
    }
}

fn read_body(request: &mut tiny_http::Request) -> RevealResult<Vec<u8>> {
    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut body)
        .context("read request body")?;
    Ok(body)
}

/// Route one request.
pub fn dispatch(
    method: &tiny_http::Method,
    url: &str,
    body: &[u8],
    orchestrator: &Orchestrator,
) -> ExportResponse {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    if path != EXPORT_ROUTE {
        return ExportResponse::message(404, &format!("no route for {path}"));
    }
    if *method != tiny_http::Method::Post {
        let mut resp = ExportResponse::message(405, &format!("{method} not allowed"));
        resp.headers.push(("Allow".to_string(), "POST".to_string()));
        return resp;
    }
    handle_export(body, orchestrator)
}

#[cfg(test)]
#[path = "../../tests/unit/server/http.rs"]
mod tests;
