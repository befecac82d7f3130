//! Render orchestration: validate, package, render (in process or in a worker), collect, clean up.

/// In-process rendering engine shared by the orchestrator and the worker binary.
pub mod engine;
/// Orchestrator entry point and modes.
pub mod orchestrator;
/// Worker response framing.
pub mod protocol;
/// Per-render scratch directories.
pub mod scratch;
/// Worker process invocation.
pub mod worker;
