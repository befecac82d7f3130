/// Segment indexing and per-frame progress.
pub mod segments;
