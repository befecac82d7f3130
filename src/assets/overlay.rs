use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{RevealError, RevealResult};
use crate::scene::model::{BorderStyle, OverlaySpec, TextAlign};

/// Text shown when the overlay markdown is blank.
pub const EMPTY_OVERLAY_HINT: &str = "Add Markdown in the editor to see it here.";
const EMPTY_OVERLAY_COLOR: &str = "#cbd5f5";
const BOX_PADDING_PX: f64 = 32.0;
const LINE_HEIGHT: f64 = 1.5;
const BLOCK_GAP_PX: f64 = 24.0;
/// Average advance of a bold glyph relative to the font size; used for wrapping only.
const GLYPH_ADVANCE_EM: f64 = 0.56;

/// One visual line of overlay text.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLine {
    /// Plain text.
    pub text: String,
    /// Font size multiplier (headings are larger).
    pub scale: f64,
    /// `true` when this line starts a new block (extra gap above).
    pub block_start: bool,
}

/// Overlay rendered once into a stage-sized premultiplied RGBA8 layer.
#[derive(Clone, Debug)]
pub struct OverlayLayer {
    /// Stage width.
    pub width: u32,
    /// Stage height.
    pub height: u32,
    /// Premultiplied RGBA8, transparent outside the text box.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl OverlayLayer {
    /// Fully transparent layer.
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            rgba8_premul: Arc::new(vec![0; canvas.rgba_len()]),
        }
    }

    /// Rasterize `spec` centred in `safe_zone`.
    #[tracing::instrument(skip_all, fields(w = canvas.width, h = canvas.height))]
    pub fn render(
        spec: &OverlaySpec,
        canvas: Canvas,
        safe_zone: Rect,
        fontdb: Arc<usvg::fontdb::Database>,
    ) -> RevealResult<Self> {
        let svg = overlay_svg(spec, canvas, safe_zone);
        let opts = usvg::Options {
            fontdb,
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts).context("parse overlay svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| RevealError::evaluation("failed to allocate overlay pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );

        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            rgba8_premul: Arc::new(pixmap.take()),
        })
    }
}

/// System fonts plus any fonts found in `extra_dirs`.
pub fn build_fontdb(extra_dirs: &[&Path]) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    for dir in extra_dirs {
        db.load_fonts_dir(dir);
    }
    tracing::debug!(faces = db.len(), "font database loaded");
    Arc::new(db)
}

/// Reduce markdown to plain display lines.
///
/// Only block structure survives: headings scale up, list items get a bullet, blank lines start a
/// new block. Inline emphasis, code ticks and link targets are dropped.
pub fn markdown_lines(markdown: &str) -> Vec<OverlayLine> {
    let mut out = Vec::new();
    let mut block_start = false;
    for raw in markdown.lines() {
        let line = raw.trim();
        if line.is_empty() {
            block_start = !out.is_empty();
            continue;
        }

        let hashes = line.chars().take_while(|c| *c == '#').count();
        let (text, scale, heading) = if (1..=6).contains(&hashes)
            && line[hashes..].starts_with(' ')
        {
            let scale = match hashes {
                1 => 1.6,
                2 => 1.3,
                3 => 1.15,
                _ => 1.0,
            };
            (line[hashes..].trim().to_string(), scale, true)
        } else if let Some(item) = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
            .or_else(|| line.strip_prefix("+ "))
        {
            (format!("• {}", item.trim()), 1.0, false)
        } else {
            (line.to_string(), 1.0, false)
        };

        out.push(OverlayLine {
            text: strip_inline(&text),
            scale,
            block_start: block_start || (heading && !out.is_empty()),
        });
        block_start = heading;
    }
    out
}

fn strip_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        match after
            .find("](")
            .and_then(|mid| after[mid + 2..].find(')').map(|close| (mid, mid + 2 + close)))
        {
            Some((mid, close)) => {
                out.push_str(&rest[..open]);
                out.push_str(&after[..mid]);
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out.chars()
        .filter(|c| !matches!(c, '*' | '_' | '`' | '~'))
        .collect()
}

fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let needed = if cur.is_empty() {
            word.chars().count()
        } else {
            cur.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

/// Build the SVG document for the overlay box.
pub fn overlay_svg(spec: &OverlaySpec, canvas: Canvas, safe_zone: Rect) -> String {
    let (source, color) = if spec.markdown.trim().is_empty() {
        (EMPTY_OVERLAY_HINT, EMPTY_OVERLAY_COLOR)
    } else {
        (spec.markdown.as_str(), spec.color.as_str())
    };

    let padding = if spec.background.is_some() {
        BOX_PADDING_PX
    } else {
        0.0
    };
    let max_box_w = safe_zone.width() * (spec.max_width_pct.clamp(1.0, 100.0) / 100.0);
    let text_w = (max_box_w - 2.0 * padding).max(1.0);

    // (text, font size, y offset of baseline from box content top)
    let mut rows: Vec<(String, f64, f64)> = Vec::new();
    let mut cursor = 0.0;
    let mut widest: f64 = 0.0;
    for line in markdown_lines(source) {
        let size = spec.font_size_px * line.scale;
        let advance = size * GLYPH_ADVANCE_EM;
        let max_chars = (text_w / advance).floor() as usize;
        if line.block_start && !rows.is_empty() {
            cursor += BLOCK_GAP_PX;
        }
        for wrapped in wrap_line(&line.text, max_chars) {
            let line_h = size * LINE_HEIGHT;
            let baseline = cursor + (line_h + size * 0.7) / 2.0;
            widest = widest.max(wrapped.chars().count() as f64 * advance);
            rows.push((wrapped, size, baseline));
            cursor += line_h;
        }
    }

    let box_w = (widest.min(text_w) + 2.0 * padding).min(max_box_w);
    let box_h = cursor + 2.0 * padding;
    let box_x = match spec.align {
        TextAlign::Left => safe_zone.x0,
        TextAlign::Center => safe_zone.x0 + (safe_zone.width() - box_w) / 2.0,
        TextAlign::Right => safe_zone.x1 - box_w,
    };
    let box_y = safe_zone.y0 + (safe_zone.height() - box_h) / 2.0;

    let (anchor, text_x) = match spec.align {
        TextAlign::Left => ("start", box_x + padding),
        TextAlign::Center => ("middle", box_x + box_w / 2.0),
        TextAlign::Right => ("end", box_x + box_w - padding),
    };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );
    if let Some(bg) = spec.background.as_deref() {
        let r = spec.border_radius_px.unwrap_or(0.0).max(0.0);
        svg.push_str(&format!(
            r#"<rect x="{box_x:.2}" y="{box_y:.2}" width="{box_w:.2}" height="{box_h:.2}" rx="{r:.2}" fill="{}"/>"#,
            xml_escape(bg)
        ));
    }

    let stroke = match spec.text_stroke() {
        Some((width, stroke_color)) => {
            let dash = match spec.border_style {
                Some(BorderStyle::Dashed) => {
                    format!(r#" stroke-dasharray="{:.2} {:.2}""#, width * 3.0, width * 2.0)
                }
                Some(BorderStyle::Dotted) => {
                    format!(r#" stroke-dasharray="{width:.2} {width:.2}" stroke-linecap="round""#)
                }
                _ => String::new(),
            };
            format!(
                r#" stroke="{}" stroke-width="{width:.2}"{dash}"#,
                xml_escape(stroke_color)
            )
        }
        None => String::new(),
    };

    svg.push_str(&format!(
        r#"<g font-family="{}" font-weight="700" fill="{}" text-anchor="{anchor}"{stroke}>"#,
        xml_escape(&spec.font_family),
        xml_escape(color)
    ));
    let content_top = box_y + padding;
    for (text, size, baseline) in rows {
        svg.push_str(&format!(
            r#"<text x="{text_x:.2}" y="{:.2}" font-size="{size:.2}">{}</text>"#,
            content_top + baseline,
            xml_escape(&text)
        ));
    }
    svg.push_str("</g></svg>");
    svg
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/overlay.rs"]
mod tests;
