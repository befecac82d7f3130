use crate::animation::ease::{Direction, Easing, shape_progress};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RevealError, RevealResult};
use crate::scene::model::{AnimationSpec, SceneDescription};
use crate::scene::preset::{CompositionDef, RenderPreset};

/// Sequential, equal-length segments (one per photo pair) sharing one easing/direction.
///
/// Sampling is pure: the result for frame `f` never depends on any other frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    frames_per_segment: u64,
    segment_count: u64,
    easing: Easing,
    direction: Direction,
}

/// Timeline state at one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSample {
    /// Active segment, clamped to the last segment past the end.
    pub segment_index: usize,
    /// Frame offset inside the active segment, in `[0, frames_per_segment - 1]`.
    pub frame_within_segment: u64,
    /// Eased, direction-adjusted reveal progress in `[0, 1]`.
    pub progress: f64,
}

impl Timeline {
    /// Create a timeline of `segment_count` segments of `frames_per_segment` frames each.
    pub fn new(
        frames_per_segment: u64,
        segment_count: u64,
        easing: Easing,
        direction: Direction,
    ) -> RevealResult<Self> {
        if segment_count == 0 {
            return Err(RevealError::invalid_payload(
                "timeline needs at least one segment",
            ));
        }
        let frames_per_segment = frames_per_segment.max(1);
        if frames_per_segment.checked_mul(segment_count).is_none() {
            return Err(RevealError::invalid_payload(format!(
                "{segment_count} segments of {frames_per_segment} frames overflow the frame counter"
            )));
        }
        Ok(Self {
            frames_per_segment,
            segment_count,
            easing,
            direction,
        })
    }

    /// One segment per photo pair, each `animation.durationMs` long.
    pub fn for_scene(animation: &AnimationSpec, segment_count: usize) -> RevealResult<Self> {
        Self::new(
            animation.frames_per_segment(),
            segment_count as u64,
            animation.easing,
            animation.direction,
        )
    }

    /// Single-segment mode: normalized time runs across the whole scene duration.
    pub fn single(duration_frames: u64, easing: Easing, direction: Direction) -> Self {
        Self {
            frames_per_segment: duration_frames.max(1),
            segment_count: 1,
            easing,
            direction,
        }
    }

    /// Timeline used when rendering `scene` with composition `def`.
    pub fn for_composition(def: &CompositionDef, scene: &SceneDescription) -> RevealResult<Self> {
        match def.preset {
            RenderPreset::LandscapeLoop => Ok(Self::single(
                def.duration_frames(scene),
                scene.animation.easing,
                scene.animation.direction,
            )),
            RenderPreset::PortraitSequence => {
                Self::for_scene(&scene.animation, scene.segment_count())
            }
        }
    }

    /// Frames in one segment.
    pub fn frames_per_segment(&self) -> u64 {
        self.frames_per_segment
    }

    /// Number of segments.
    pub fn segment_count(&self) -> u64 {
        self.segment_count
    }

    /// `frames_per_segment * segment_count`.
    pub fn total_frames(&self) -> u64 {
        self.frames_per_segment.saturating_mul(self.segment_count)
    }

    /// Sample segment index and progress at `frame`.
    pub fn sample(&self, frame: FrameIndex) -> SegmentSample {
        let fps = self.frames_per_segment;
        let segment = (frame.0 / fps).min(self.segment_count - 1);
        let within = frame.0.saturating_sub(segment * fps).min(fps - 1);

        let progress = if fps <= 1 {
            1.0
        } else {
            let t = within as f64 / (fps - 1) as f64;
            shape_progress(self.easing, self.direction, t)
        };

        SegmentSample {
            segment_index: segment as usize,
            frame_within_segment: within,
            progress,
        }
    }

    /// Shorthand for `sample(frame).progress`.
    pub fn progress(&self, frame: FrameIndex) -> f64 {
        self.sample(frame).progress
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/segments.rs"]
mod tests;
