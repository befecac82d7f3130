//! Scene description boundary model.
//!
//! A [`model::SceneDescription`] is the complete, immutable input to one render request. The render
//! core never reads editor state; it only sees values of these types.

/// JSON-facing scene model.
pub mod model;
/// Editable photo-pair list that produces the scene's parallel image arrays.
pub mod pairs;
/// Named render targets (portrait sequence, landscape loop).
pub mod preset;
pub(crate) mod validate;
