use crate::foundation::core::Canvas;
use crate::foundation::error::{RevealError, RevealResult};
use crate::scene::model::{SceneDescription, frames_for_duration};
use crate::scene::validate::check_frame_budget;

/// Id of the portrait multi-pair composition.
pub const PORTRAIT_COMPOSITION_ID: &str = "slider-reveal";
/// Id of the landscape single-pair loop composition.
pub const LANDSCAPE_COMPOSITION_ID: &str = "slider-reveal-landscape";
/// Loop length of the landscape preset.
pub const LANDSCAPE_LOOP_MS: f64 = 3000.0;
/// File name used when the caller does not choose one.
pub const DEFAULT_VIDEO_NAME: &str = "slider-reveal.mp4";

/// The two fixed render presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPreset {
    /// 1920x1080, exactly one pair, the reveal spans the whole fixed-length loop.
    LandscapeLoop,
    /// 1080x1920, one segment per pair, each `animation.durationMs` long.
    PortraitSequence,
}

/// A named render target registered in the render bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositionDef {
    /// Lookup id.
    pub id: &'static str,
    /// Timeline/validation behavior.
    pub preset: RenderPreset,
    /// Output stage size.
    pub canvas: Canvas,
}

impl CompositionDef {
    /// Check preset-specific constraints on top of [`SceneDescription::validate`].
    pub fn validate_scene(&self, scene: &SceneDescription) -> RevealResult<()> {
        scene.validate()?;
        if self.preset == RenderPreset::LandscapeLoop && scene.segment_count() != 1 {
            return Err(RevealError::invalid_payload(format!(
                "composition '{}' renders exactly one photo pair (got {})",
                self.id,
                scene.segment_count()
            )));
        }
        if self.preset == RenderPreset::LandscapeLoop {
            check_frame_budget(self.duration_frames(scene), 1)?;
        }
        Ok(())
    }

    /// Total duration of `scene` rendered with this composition, in frames.
    pub fn duration_frames(&self, scene: &SceneDescription) -> u64 {
        match self.preset {
            RenderPreset::LandscapeLoop => {
                frames_for_duration(LANDSCAPE_LOOP_MS, scene.animation.frame_rate)
            }
            RenderPreset::PortraitSequence => {
                scene
                    .animation
                    .frames_per_segment()
                    .saturating_mul(scene.segment_count() as u64)
            }
        }
    }
}

/// All compositions known to the render engine.
pub fn builtin_compositions() -> [CompositionDef; 2] {
    [
        CompositionDef {
            id: PORTRAIT_COMPOSITION_ID,
            preset: RenderPreset::PortraitSequence,
            canvas: Canvas {
                width: 1080,
                height: 1920,
            },
        },
        CompositionDef {
            id: LANDSCAPE_COMPOSITION_ID,
            preset: RenderPreset::LandscapeLoop,
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
        },
    ]
}

/// Look up a built-in composition by id.
pub fn find_composition(id: &str) -> RevealResult<CompositionDef> {
    builtin_compositions()
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| RevealError::composition_not_found(id))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/preset.rs"]
mod tests;
