/// Easing curves and playback directions.
pub mod ease;
