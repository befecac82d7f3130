use crate::compose::mask::{Divider, RevealMask};
use crate::foundation::core::{Canvas, FrameIndex, Rect, Rgba8};
use crate::scene::model::SceneDescription;
use crate::timeline::segments::{SegmentSample, Timeline};

/// Stage background behind both images.
pub const STAGE_BACKGROUND: Rgba8 = Rgba8::from_rgb_hex(0x020617);
/// Divider line colour (sky blue at 70% opacity).
pub const DIVIDER_COLOR: Rgba8 = Rgba8 {
    r: 0x38,
    g: 0xbd,
    b: 0xf8,
    a: 178,
};
/// Safe-zone inset as a fraction of stage height (top/bottom).
pub const SAFE_ZONE_INSET_Y: f64 = 0.08;
/// Safe-zone inset as a fraction of stage width (left/right).
pub const SAFE_ZONE_INSET_X: f64 = 0.06;

/// Which image layer a placeholder stands in for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// Bottom layer gradient (`#1f2937 → #0f172a`).
    Bottom,
    /// Top layer gradient (`#312e81 → #0f172a`).
    Top,
}

impl Placeholder {
    /// Diagonal (135°) gradient stops.
    pub fn gradient(self) -> (Rgba8, Rgba8) {
        match self {
            Self::Bottom => (Rgba8::from_rgb_hex(0x1f2937), Rgba8::from_rgb_hex(0x0f172a)),
            Self::Top => (Rgba8::from_rgb_hex(0x312e81), Rgba8::from_rgb_hex(0x0f172a)),
        }
    }
}

/// Content of one image layer.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageContent {
    /// A real image; `segment` is where it was found, which differs from the active segment
    /// when a fallback was used.
    Source {
        /// Image source string as given in the scene.
        src: String,
        /// Segment the image belongs to.
        segment: usize,
    },
    /// No usable image anywhere on this side.
    Placeholder(Placeholder),
}

/// One entry of the bottom-to-top layer stack.
#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    /// Solid fill of the whole stage.
    Background(Rgba8),
    /// Bottom image, full frame.
    Bottom(ImageContent),
    /// Top image, clipped to the reveal mask.
    Top {
        /// Image content.
        image: ImageContent,
        /// Visible region.
        mask: RevealMask,
    },
    /// Divider line at the reveal edge.
    Divider(Divider),
    /// Pre-rendered overlay, placed inside the safe zone. Never clipped by the mask.
    Overlay {
        /// Safe-zone rectangle in pixels.
        safe_zone: Rect,
    },
}

/// Fully specified visual state of one output frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameComposition {
    /// Frame index in scene timeline space.
    pub frame: FrameIndex,
    /// Stage size.
    pub canvas: Canvas,
    /// Timeline state the layers were derived from.
    pub sample: SegmentSample,
    /// Layers from bottom to top.
    pub layers: Vec<Layer>,
}

/// Compose `frame`, treating any non-blank source string as a usable image.
pub fn compose_frame(
    scene: &SceneDescription,
    timeline: &Timeline,
    canvas: Canvas,
    frame: FrameIndex,
) -> FrameComposition {
    compose_frame_with(scene, timeline, canvas, frame, |src| !src.trim().is_empty())
}

/// Compose `frame`; `usable` decides whether an image source can be drawn (for example, whether
/// it decoded). Unusable images fall back to the nearest usable segment, then to a placeholder.
pub fn compose_frame_with(
    scene: &SceneDescription,
    timeline: &Timeline,
    canvas: Canvas,
    frame: FrameIndex,
    usable: impl Fn(&str) -> bool,
) -> FrameComposition {
    let sample = timeline.sample(frame);
    let mask = RevealMask::new(sample.progress, scene.compare.orientation);

    let bottom = image_content(
        &scene.bottom_images,
        sample.segment_index,
        &usable,
        Placeholder::Bottom,
    );
    let top = image_content(
        &scene.top_images,
        sample.segment_index,
        &usable,
        Placeholder::Top,
    );

    let mut layers = Vec::with_capacity(5);
    layers.push(Layer::Background(STAGE_BACKGROUND));
    layers.push(Layer::Bottom(bottom));
    layers.push(Layer::Top { image: top, mask });
    if let Some(divider) = Divider::for_mask(&mask, scene.compare.show_divider) {
        layers.push(Layer::Divider(divider));
    }
    layers.push(Layer::Overlay {
        safe_zone: overlay_safe_zone(canvas),
    });

    FrameComposition {
        frame,
        canvas,
        sample,
        layers,
    }
}

/// Nearest segment (by index distance, earlier wins ties) whose image is usable.
pub fn resolve_image(
    images: &[String],
    segment: usize,
    usable: impl Fn(&str) -> bool,
) -> Option<(usize, &str)> {
    let ok = |i: usize| images.get(i).filter(|s| usable(s)).map(|s| (i, s.as_str()));
    if let Some(hit) = ok(segment) {
        return Some(hit);
    }
    let max_dist = images.len().max(segment + 1);
    (1..max_dist).find_map(|d| {
        segment
            .checked_sub(d)
            .and_then(ok)
            .or_else(|| ok(segment + d))
    })
}

/// Safe-zone rectangle: inset by 8% of height vertically and 6% of width horizontally.
pub fn overlay_safe_zone(canvas: Canvas) -> Rect {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let pad_y = (h * SAFE_ZONE_INSET_Y).round();
    let pad_x = (w * SAFE_ZONE_INSET_X).round();
    Rect::new(pad_x, pad_y, w - pad_x, h - pad_y)
}

fn image_content(
    images: &[String],
    segment: usize,
    usable: &impl Fn(&str) -> bool,
    placeholder: Placeholder,
) -> ImageContent {
    match resolve_image(images, segment, usable) {
        Some((segment, src)) => ImageContent::Source {
            src: src.to_string(),
            segment,
        },
        None => ImageContent::Placeholder(placeholder),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frame.rs"]
mod tests;
