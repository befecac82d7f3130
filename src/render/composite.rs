use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{RevealError, RevealResult};
use crate::foundation::math::mul_div255_u16;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Integer pixel bounds, end-exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSpan {
    /// Left column.
    pub x0: u32,
    /// Top row.
    pub y0: u32,
    /// Right column (exclusive).
    pub x1: u32,
    /// Bottom row (exclusive).
    pub y1: u32,
}

impl PixelSpan {
    /// Round `rect` to whole pixels and clamp it to `canvas`.
    pub fn from_rect(rect: Rect, canvas: Canvas) -> Self {
        let clamp = |v: f64, max: u32| v.round().clamp(0.0, f64::from(max)) as u32;
        let x0 = clamp(rect.x0, canvas.width);
        let y0 = clamp(rect.y0, canvas.height);
        Self {
            x0,
            y0,
            x1: clamp(rect.x1, canvas.width).max(x0),
            y1: clamp(rect.y1, canvas.height).max(y0),
        }
    }

    /// Whole canvas.
    pub fn full(canvas: Canvas) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: canvas.width,
            y1: canvas.height,
        }
    }

    /// `true` when the span covers no pixels.
    pub fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255u16 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                let dc = mul_div255_u16(u16::from(dst[i]), inv);
                out[i] = (u16::from(src[i]) + dc).min(255) as u8;
            }
            out
        }
    }
}

fn check_len(dst: &[u8], canvas: Canvas, what: &str) -> RevealResult<()> {
    if dst.len() != canvas.rgba_len() {
        return Err(RevealError::evaluation(format!(
            "{what} expects a {}x{} rgba8 buffer, got {} bytes",
            canvas.width,
            canvas.height,
            dst.len()
        )));
    }
    Ok(())
}

/// Blend `color` over every pixel in `span`.
pub fn fill_span(
    dst: &mut [u8],
    canvas: Canvas,
    span: PixelSpan,
    color: PremulRgba8,
) -> RevealResult<()> {
    check_len(dst, canvas, "fill_span")?;
    if span.is_empty() || color[3] == 0 {
        return Ok(());
    }
    let stride = canvas.width as usize * 4;
    for y in span.y0..span.y1 {
        let row = &mut dst[y as usize * stride..][span.x0 as usize * 4..span.x1 as usize * 4];
        for d in row.chunks_exact_mut(4) {
            let out = over([d[0], d[1], d[2], d[3]], color);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Blend the pixels of a stage-sized `src` over `dst`, restricted to `span`.
pub fn blit_span(dst: &mut [u8], src: &[u8], canvas: Canvas, span: PixelSpan) -> RevealResult<()> {
    check_len(dst, canvas, "blit_span")?;
    check_len(src, canvas, "blit_span")?;
    if span.is_empty() {
        return Ok(());
    }
    let stride = canvas.width as usize * 4;
    let (a, b) = (span.x0 as usize * 4, span.x1 as usize * 4);
    for y in span.y0..span.y1 {
        let row = y as usize * stride;
        let d_row = &mut dst[row + a..row + b];
        let s_row = &src[row + a..row + b];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
