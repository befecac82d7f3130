use crate::foundation::core::{Canvas, Point, Rect};
use crate::scene::model::Orientation;

/// Divider line thickness in pixels.
pub const DIVIDER_THICKNESS_PX: f64 = 4.0;

/// Region of the top layer that is visible, as a 4-point polygon in percent of the stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealMask {
    /// Reveal axis.
    pub orientation: Orientation,
    /// `progress * 100`.
    pub percentage: f64,
    /// Polygon vertices in percent coordinates (`0..=100` on both axes).
    pub polygon: [Point; 4],
}

impl RevealMask {
    /// Mask for `progress` in `[0, 1]`.
    pub fn new(progress: f64, orientation: Orientation) -> Self {
        let p = progress.clamp(0.0, 1.0) * 100.0;
        let polygon = match orientation {
            Orientation::Vertical => [
                Point::new(0.0, 0.0),
                Point::new(p, 0.0),
                Point::new(p, 100.0),
                Point::new(0.0, 100.0),
            ],
            Orientation::Horizontal => [
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, p),
                Point::new(0.0, p),
            ],
        };
        Self {
            orientation,
            percentage: p,
            polygon,
        }
    }

    /// CSS `clip-path` form, e.g. `polygon(0% 0%, 50% 0%, 50% 100%, 0% 100%)`.
    pub fn to_css(&self) -> String {
        let pts: Vec<String> = self
            .polygon
            .iter()
            .map(|pt| format!("{}% {}%", pt.x, pt.y))
            .collect();
        format!("polygon({})", pts.join(", "))
    }

    /// Bounding box of the polygon in percent space. The polygon is axis-aligned, so this is exact.
    pub fn bounds(&self) -> Rect {
        let [a, b, c, d] = self.polygon;
        Rect::from_points(a, c).union(Rect::from_points(b, d))
    }

    /// Clip rectangle in pixels for `canvas`.
    pub fn pixel_rect(&self, canvas: Canvas) -> Rect {
        let b = self.bounds();
        let sx = f64::from(canvas.width) / 100.0;
        let sy = f64::from(canvas.height) / 100.0;
        Rect::new(b.x0 * sx, b.y0 * sy, b.x1 * sx, b.y1 * sy)
    }
}

/// Thin line at the reveal edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Divider {
    /// Reveal axis; a vertical reveal has a vertical line.
    pub orientation: Orientation,
    /// Position along the axis of motion, in percent.
    pub percentage: f64,
}

impl Divider {
    /// Divider for `mask`, or `None` when disabled.
    pub fn for_mask(mask: &RevealMask, show: bool) -> Option<Self> {
        show.then_some(Self {
            orientation: mask.orientation,
            percentage: mask.percentage,
        })
    }

    /// Pixel rectangle, centred on the edge and clipped to the stage.
    pub fn pixel_rect(&self, canvas: Canvas) -> Rect {
        let half = DIVIDER_THICKNESS_PX / 2.0;
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let r = match self.orientation {
            Orientation::Vertical => {
                let x = self.percentage / 100.0 * w;
                Rect::new(x - half, 0.0, x + half, h)
            }
            Orientation::Horizontal => {
                let y = self.percentage / 100.0 * h;
                Rect::new(0.0, y - half, w, y + half)
            }
        };
        r.intersect(canvas.rect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/mask.rs"]
mod tests;
