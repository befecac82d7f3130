use crate::foundation::error::{RevealError, RevealResult};
use crate::scene::model::SceneDescription;

/// Upper bound on frames in one render (ten hours at 60 fps).
pub const MAX_TOTAL_FRAMES: u64 = 2_160_000;

/// Check the structural invariants of a scene before any render work is started.
///
/// - `topImages` and `bottomImages` have equal length
/// - at least one pair
/// - `durationMs` and `frameRate` are finite and positive
/// - one segment per pair stays within [`MAX_TOTAL_FRAMES`]
pub fn validate_scene(scene: &SceneDescription) -> RevealResult<()> {
    let top = scene.top_images.len();
    let bottom = scene.bottom_images.len();
    if top != bottom {
        return Err(RevealError::invalid_payload(format!(
            "top and bottom photo counts must match (top={top}, bottom={bottom})"
        )));
    }
    if top == 0 {
        return Err(RevealError::invalid_payload(
            "add at least one photo pair before rendering",
        ));
    }

    let anim = &scene.animation;
    if !anim.duration_ms.is_finite() || anim.duration_ms <= 0.0 {
        return Err(RevealError::invalid_payload(format!(
            "animation.durationMs must be > 0 (got {})",
            anim.duration_ms
        )));
    }
    if !anim.frame_rate.is_finite() || anim.frame_rate <= 0.0 {
        return Err(RevealError::invalid_payload(format!(
            "animation.frameRate must be > 0 (got {})",
            anim.frame_rate
        )));
    }

    check_frame_budget(anim.frames_per_segment(), top as u64)?;

    let overlay = &scene.overlay;
    if !overlay.font_size_px.is_finite() || overlay.font_size_px <= 0.0 {
        return Err(RevealError::invalid_payload("overlay.fontSizePx must be > 0"));
    }
    if !overlay.max_width_pct.is_finite() || overlay.max_width_pct <= 0.0 {
        return Err(RevealError::invalid_payload(
            "overlay.maxWidthPct must be > 0",
        ));
    }

    Ok(())
}

/// Reject `segments` segments of `frames_per_segment` frames when the total overflows or exceeds
/// [`MAX_TOTAL_FRAMES`].
pub(crate) fn check_frame_budget(frames_per_segment: u64, segments: u64) -> RevealResult<u64> {
    match frames_per_segment.checked_mul(segments) {
        Some(total) if total <= MAX_TOTAL_FRAMES => Ok(total),
        _ => Err(RevealError::invalid_payload(format!(
            "video too long: {segments} segment(s) of {frames_per_segment} frames exceed {MAX_TOTAL_FRAMES} frames"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/validate.rs"]
mod tests;
