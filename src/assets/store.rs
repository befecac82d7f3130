use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use rayon::prelude::*;

use crate::assets::source::load_source_bytes;
use crate::compose::frame::Placeholder;
use crate::foundation::core::Canvas;
use crate::foundation::error::RevealResult;
use crate::scene::model::SceneDescription;

/// Image layers are drawn slightly oversized so their edges never show.
pub const IMAGE_OVERSCAN: f64 = 1.02;

/// A decoded image already cover-fitted to the stage, premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels (equals the stage width).
    pub width: u32,
    /// Height in pixels (equals the stage height).
    pub height: u32,
    /// Premultiplied RGBA8 pixels, row-major.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Every image a scene references, decoded once before rendering.
///
/// Sources that fail to load or decode are left out and logged; the compositor then falls back
/// to a neighbouring segment or a placeholder.
#[derive(Clone, Debug)]
pub struct ImageStore {
    canvas: Canvas,
    images: HashMap<String, PreparedImage>,
    bottom_placeholder: PreparedImage,
    top_placeholder: PreparedImage,
}

impl ImageStore {
    /// Load, decode and cover-fit all distinct image sources of `scene`.
    #[tracing::instrument(skip_all, fields(w = canvas.width, h = canvas.height))]
    pub fn prepare(scene: &SceneDescription, canvas: Canvas, base_dir: &Path) -> Self {
        let sources: BTreeSet<&str> = scene
            .top_images
            .iter()
            .chain(scene.bottom_images.iter())
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
            .collect();

        let images: HashMap<String, PreparedImage> = sources
            .into_par_iter()
            .filter_map(|src| match prepare_one(src, canvas, base_dir) {
                Ok(img) => Some((src.to_string(), img)),
                Err(e) => {
                    tracing::warn!(source = %abbreviate(src), error = %e, "image unusable, using fallback");
                    None
                }
            })
            .collect();

        tracing::debug!(count = images.len(), "prepared images");
        Self {
            canvas,
            images,
            bottom_placeholder: gradient_image(canvas, Placeholder::Bottom),
            top_placeholder: gradient_image(canvas, Placeholder::Top),
        }
    }

    /// Stage size the images were fitted to.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// `true` when `src` decoded successfully.
    pub fn contains(&self, src: &str) -> bool {
        self.images.contains_key(src)
    }

    /// Prepared image for `src`.
    pub fn get(&self, src: &str) -> Option<&PreparedImage> {
        self.images.get(src)
    }

    /// Prepared gradient for a placeholder layer.
    pub fn placeholder(&self, which: Placeholder) -> &PreparedImage {
        match which {
            Placeholder::Bottom => &self.bottom_placeholder,
            Placeholder::Top => &self.top_placeholder,
        }
    }
}

fn prepare_one(src: &str, canvas: Canvas, base_dir: &Path) -> RevealResult<PreparedImage> {
    let bytes = load_source_bytes(src, base_dir)?;
    let decoded = image::load_from_memory(&bytes).context("decode image from memory")?;
    Ok(cover_fit(&decoded.to_rgba8(), canvas, IMAGE_OVERSCAN))
}

/// Scale `src` to cover `canvas` times `overscan`, centre-crop to `canvas`, premultiply.
pub fn cover_fit(src: &image::RgbaImage, canvas: Canvas, overscan: f64) -> PreparedImage {
    let (iw, ih) = src.dimensions();
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let scale = (cw / f64::from(iw.max(1))).max(ch / f64::from(ih.max(1))) * overscan.max(1.0);

    let nw = ((f64::from(iw) * scale).ceil() as u32).max(canvas.width);
    let nh = ((f64::from(ih) * scale).ceil() as u32).max(canvas.height);
    let resized = image::imageops::resize(src, nw, nh, image::imageops::FilterType::Triangle);

    let x = (nw - canvas.width) / 2;
    let y = (nh - canvas.height) / 2;
    let cropped = image::imageops::crop_imm(&resized, x, y, canvas.width, canvas.height).to_image();

    let mut rgba8_premul = cropped.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    PreparedImage {
        width: canvas.width,
        height: canvas.height,
        rgba8_premul: Arc::new(rgba8_premul),
    }
}

/// 135° linear gradient (top-left to bottom-right) filling the stage.
pub fn gradient_image(canvas: Canvas, which: Placeholder) -> PreparedImage {
    let (from, to) = which.gradient();
    let w = canvas.width.max(1);
    let h = canvas.height.max(1);
    let denom = f64::from(w - 1 + h - 1).max(1.0);

    let mut data = Vec::with_capacity(canvas.rgba_len());
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let t = f64::from(x + y) / denom;
            data.extend_from_slice(&from.lerp(to, t).premul());
        }
    }
    PreparedImage {
        width: canvas.width,
        height: canvas.height,
        rgba8_premul: Arc::new(data),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Data URLs are long; keep log lines readable.
pub(crate) fn abbreviate(src: &str) -> String {
    const MAX: usize = 64;
    if src.len() <= MAX {
        return src.to_string();
    }
    let cut = (0..=MAX).rev().find(|i| src.is_char_boundary(*i)).unwrap_or(0);
    format!("{}…", &src[..cut])
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
