//! Per-frame composition: reveal-mask geometry and the ordered layer stack.
//!
//! Everything here is pure. Pixels are produced later by [`crate::render`].

/// Layer stack for one frame.
pub mod frame;
/// Reveal-mask polygon and divider geometry.
pub mod mask;
