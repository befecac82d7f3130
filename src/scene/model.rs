use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::{Direction, Easing};
use crate::foundation::error::{RevealError, RevealResult};

/// Complete render-time scene: photo pairs, compare settings, overlay, animation and audio.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    /// Top-layer image sources, parallel to `bottom_images`.
    pub top_images: Vec<String>,
    /// Bottom-layer image sources.
    pub bottom_images: Vec<String>,
    /// Optional audio source: local path, remote URL or inline `data:` URL.
    #[serde(default)]
    pub audio: Option<String>,
    /// Reveal orientation and divider toggle.
    #[serde(default)]
    pub compare: CompareSpec,
    /// Styled text overlay.
    #[serde(default)]
    pub overlay: OverlaySpec,
    /// Per-segment animation settings.
    #[serde(default)]
    pub animation: AnimationSpec,
}

impl SceneDescription {
    /// Parse a scene from JSON bytes. Parse failures are payload errors.
    pub fn from_json_slice(bytes: &[u8]) -> RevealResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| RevealError::invalid_payload(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RevealResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RevealError::invalid_payload(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| RevealError::invalid_payload(format!("parse scene JSON: {e}")))
    }

    /// Check structural invariants. See [`crate::validate_scene`].
    pub fn validate(&self) -> RevealResult<()> {
        crate::scene::validate::validate_scene(self)
    }

    /// Number of photo-pair segments.
    pub fn segment_count(&self) -> usize {
        self.top_images.len().min(self.bottom_images.len())
    }

    /// Return a copy with a different audio source.
    pub fn with_audio(mut self, audio: Option<String>) -> Self {
        self.audio = audio;
        self
    }
}

/// Axis along which the reveal moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Reveal left to right; the divider is a vertical line.
    #[default]
    Vertical,
    /// Reveal top to bottom; the divider is a horizontal line.
    Horizontal,
}

/// Compare settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSpec {
    /// Reveal axis.
    pub orientation: Orientation,
    /// Draw a divider line at the reveal edge.
    pub show_divider: bool,
}

impl Default for CompareSpec {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            show_divider: true,
        }
    }
}

/// Horizontal alignment of overlay text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    /// Left aligned.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Right aligned.
    Right,
}

/// Text stroke style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    /// No stroke.
    #[default]
    None,
    /// Solid stroke.
    Solid,
    /// Dashed stroke.
    Dashed,
    /// Dotted stroke.
    Dotted,
}

/// Styled text overlay drawn above both images.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySpec {
    /// Overlay text (markdown source).
    pub markdown: String,
    /// CSS-like font family list.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size_px: f64,
    /// Text color (CSS color string).
    pub color: String,
    /// Box background color; `None` draws no box and no padding.
    #[serde(default)]
    pub background: Option<String>,
    /// Maximum box width, in percent of the safe zone width.
    pub max_width_pct: f64,
    /// Text alignment and box placement.
    pub align: TextAlign,
    /// Stroke color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Stroke width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width_px: Option<f64>,
    /// Stroke style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    /// Background box corner radius in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius_px: Option<f64>,
}

impl Default for OverlaySpec {
    fn default() -> Self {
        Self {
            markdown: "## Overlay headline\nExplain your comparison with Markdown.".to_string(),
            font_family: "'Geist', 'Geist Variable', 'Helvetica Neue', Arial, sans-serif"
                .to_string(),
            font_size_px: 64.0,
            color: "#ffffff".to_string(),
            background: None,
            max_width_pct: 60.0,
            align: TextAlign::Center,
            border_color: Some("#000000".to_string()),
            border_width_px: Some(2.0),
            border_style: Some(BorderStyle::Solid),
            border_radius_px: Some(24.0),
        }
    }
}

impl OverlaySpec {
    /// Stroke `(width, color)` when a visible border is configured.
    pub fn text_stroke(&self) -> Option<(f64, &str)> {
        let style = self.border_style?;
        let width = self.border_width_px.unwrap_or(0.0);
        if style == BorderStyle::None || width <= 0.0 {
            return None;
        }
        Some((width, self.border_color.as_deref().unwrap_or("#000")))
    }
}

/// Per-segment animation settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSpec {
    /// Duration of one segment in milliseconds.
    pub duration_ms: f64,
    /// Output frame rate.
    pub frame_rate: f64,
    /// Easing curve.
    pub easing: Easing,
    /// Playback direction.
    pub direction: Direction,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration_ms: 3000.0,
            frame_rate: 30.0,
            easing: Easing::EaseInOut,
            direction: Direction::Forward,
        }
    }
}

impl AnimationSpec {
    /// `round(duration_ms / 1000 * frame_rate)`, at least 1.
    pub fn frames_per_segment(&self) -> u64 {
        frames_for_duration(self.duration_ms, self.frame_rate)
    }
}

/// Whole frames covering `duration_ms` at `frame_rate`, at least 1.
pub fn frames_for_duration(duration_ms: f64, frame_rate: f64) -> u64 {
    let frames = (duration_ms / 1000.0 * frame_rate).round();
    if frames.is_finite() && frames >= 1.0 {
        frames as u64
    } else {
        1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
