//! HTTP front-end for video export.

/// Request-to-response mapping for the export endpoint.
pub mod export;
/// `tiny_http` server loop.
pub mod http;
