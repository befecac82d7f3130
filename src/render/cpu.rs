use crate::assets::overlay::OverlayLayer;
use crate::assets::store::{ImageStore, PreparedImage};
use crate::compose::frame::{DIVIDER_COLOR, FrameComposition, ImageContent, Layer, Placeholder};
use crate::foundation::core::Canvas;
use crate::foundation::error::{RevealError, RevealResult};
use crate::render::backend::FrameRGBA;
use crate::render::composite::{PixelSpan, blit_span, fill_span};

/// Rasterizes a [`FrameComposition`] from prepared images and a pre-rendered overlay.
///
/// Holds only shared references, so one rasterizer can serve many threads.
#[derive(Clone, Copy, Debug)]
pub struct CpuRasterizer<'a> {
    images: &'a ImageStore,
    overlay: &'a OverlayLayer,
}

impl<'a> CpuRasterizer<'a> {
    /// Create a rasterizer over `images` and `overlay`; both must match the same canvas.
    pub fn new(images: &'a ImageStore, overlay: &'a OverlayLayer) -> RevealResult<Self> {
        let canvas = images.canvas();
        if overlay.width != canvas.width || overlay.height != canvas.height {
            return Err(RevealError::evaluation(format!(
                "overlay is {}x{}, images are fitted to {}x{}",
                overlay.width, overlay.height, canvas.width, canvas.height
            )));
        }
        Ok(Self { images, overlay })
    }

    /// Paint the layer stack bottom to top.
    pub fn render(&self, comp: &FrameComposition) -> RevealResult<FrameRGBA> {
        let canvas = comp.canvas;
        if canvas != self.images.canvas() {
            return Err(RevealError::evaluation(format!(
                "frame canvas {}x{} does not match prepared assets",
                canvas.width, canvas.height
            )));
        }

        let mut data = vec![0u8; canvas.rgba_len()];
        let full = PixelSpan::full(canvas);
        for layer in &comp.layers {
            match layer {
                Layer::Background(color) => fill_span(&mut data, canvas, full, color.premul())?,
                Layer::Bottom(content) => {
                    let img = self.image(content, Placeholder::Bottom, canvas)?;
                    blit_span(&mut data, &img.rgba8_premul, canvas, full)?;
                }
                Layer::Top { image, mask } => {
                    let img = self.image(image, Placeholder::Top, canvas)?;
                    let span = PixelSpan::from_rect(mask.pixel_rect(canvas), canvas);
                    blit_span(&mut data, &img.rgba8_premul, canvas, span)?;
                }
                Layer::Divider(divider) => {
                    let span = PixelSpan::from_rect(divider.pixel_rect(canvas), canvas);
                    fill_span(&mut data, canvas, span, DIVIDER_COLOR.premul())?;
                }
                Layer::Overlay { safe_zone } => {
                    let span = PixelSpan::from_rect(*safe_zone, canvas);
                    blit_span(&mut data, &self.overlay.rgba8_premul, canvas, span)?;
                }
            }
        }

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }

    fn image(
        &self,
        content: &ImageContent,
        fallback: Placeholder,
        canvas: Canvas,
    ) -> RevealResult<&'a PreparedImage> {
        let img = match content {
            ImageContent::Source { src, .. } => match self.images.get(src) {
                Some(img) => img,
                None => self.images.placeholder(fallback),
            },
            ImageContent::Placeholder(which) => self.images.placeholder(*which),
        };
        if img.width != canvas.width || img.height != canvas.height {
            return Err(RevealError::evaluation("prepared image does not match canvas"));
        }
        Ok(img)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
