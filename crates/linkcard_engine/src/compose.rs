use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use url::Url;

use crate::{FailureKind, GenerateError, PageMetadata};

/// Geometry and palette of the rendered card.
#[derive(Debug, Clone)]
pub struct CardStyle {
    pub width: u32,
    pub height: u32,
    pub background: Rgba<u8>,
    pub accent: Rgba<u8>,
    pub text: Rgba<u8>,
    pub muted: Rgba<u8>,
    pub margin: u32,
    /// Width reserved for the thumbnail column when one is present.
    pub thumbnail_width: u32,
    pub title_scale: u32,
    pub body_scale: u32,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 630,
            background: Rgba([24, 27, 34, 255]),
            accent: Rgba([82, 139, 255, 255]),
            text: Rgba([236, 239, 244, 255]),
            muted: Rgba([148, 156, 170, 255]),
            margin: 56,
            thumbnail_width: 420,
            title_scale: 5,
            body_scale: 2,
        }
    }
}

/// Render the card bitmap: background, accent bar, optional thumbnail on
/// the right, wrapped title/description and a site line on the left.
pub fn compose_card(
    metadata: &PageMetadata,
    thumbnail: Option<&DynamicImage>,
    style: &CardStyle,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(style.width, style.height, style.background);

    fill_rect(
        &mut canvas,
        0,
        style.height.saturating_sub(12),
        style.width,
        style.height,
        style.accent,
    );

    let text_right = match thumbnail {
        Some(thumb) => {
            paste_thumbnail(&mut canvas, thumb, style);
            style
                .width
                .saturating_sub(style.thumbnail_width + 2 * style.margin)
        }
        None => style.width.saturating_sub(style.margin),
    };
    let text_width = text_right.saturating_sub(style.margin);

    let margin = style.margin as i32;
    let mut cursor_y = margin;

    let title = metadata.title.as_deref().unwrap_or("(no title)");
    let title_cols = glyph_columns(text_width, style.title_scale);
    for line in wrap_text(title, title_cols, 3) {
        draw_text(&mut canvas, margin, cursor_y, &line, style.text, style.title_scale);
        cursor_y += line_height(style.title_scale);
    }

    if let Some(description) = metadata.description.as_deref() {
        cursor_y += line_height(style.body_scale);
        let body_cols = glyph_columns(text_width, style.body_scale);
        for line in wrap_text(description, body_cols, 5) {
            draw_text(&mut canvas, margin, cursor_y, &line, style.muted, style.body_scale);
            cursor_y += line_height(style.body_scale);
        }
    }

    let site_line = site_line(metadata);
    let site_y = (style.height as i32) - margin - line_height(style.body_scale);
    draw_text(&mut canvas, margin, site_y, &site_line, style.accent, style.body_scale);

    canvas
}

/// Decode preview-image bytes fetched from the page's `og:image`.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, GenerateError> {
    image::load_from_memory(bytes)
        .map_err(|err| GenerateError::new(FailureKind::Image, err.to_string()))
}

/// Encode the finished card as PNG.
pub fn encode_png(card: &RgbaImage) -> Result<Vec<u8>, GenerateError> {
    let mut bytes = Vec::new();
    card.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| GenerateError::new(FailureKind::Image, err.to_string()))?;
    Ok(bytes)
}

fn paste_thumbnail(canvas: &mut RgbaImage, thumbnail: &DynamicImage, style: &CardStyle) {
    let box_w = style.thumbnail_width;
    let box_h = style.height.saturating_sub(2 * style.margin);
    if box_w == 0 || box_h == 0 {
        return;
    }

    let (src_w, src_h) = (thumbnail.width().max(1), thumbnail.height().max(1));
    let scale = (box_w as f32 / src_w as f32)
        .min(box_h as f32 / src_h as f32)
        .min(1.0);
    let target_w = ((src_w as f32 * scale).round() as u32).max(1);
    let target_h = ((src_h as f32 * scale).round() as u32).max(1);

    let resized = thumbnail.resize_exact(target_w, target_h, FilterType::Lanczos3);

    let box_x = style.width.saturating_sub(style.thumbnail_width + style.margin);
    let box_y = style.margin;
    let offset_x = box_x + (box_w - target_w) / 2;
    let offset_y = box_y + (box_h - target_h) / 2;
    image::imageops::overlay(
        canvas,
        &resized.to_rgba8(),
        i64::from(offset_x),
        i64::from(offset_y),
    );
}

fn site_line(metadata: &PageMetadata) -> String {
    if let Some(site) = metadata.site_name.as_deref() {
        return site.to_string();
    }
    Url::parse(&metadata.final_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| metadata.final_url.clone())
}

fn glyph_columns(pixel_width: u32, scale: u32) -> usize {
    (pixel_width / (8 * scale.max(1))).max(1) as usize
}

fn line_height(scale: u32) -> i32 {
    // One glyph row plus a half-row of breathing room.
    (scale.max(1) * 12) as i32
}

/// Greedy word wrap with a hard per-line column cap. Truncates to
/// `max_lines`, marking the cut with an ellipsis.
pub(crate) fn wrap_text(text: &str, max_cols: usize, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if candidate_len <= max_cols {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        // A single word longer than the line is chopped mid-word.
        let mut remainder: String = word.to_string();
        while remainder.chars().count() > max_cols {
            let head: String = remainder.chars().take(max_cols).collect();
            let tail: String = remainder.chars().skip(max_cols).collect();
            lines.push(head);
            remainder = tail;
        }
        current = remainder;
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            while last.chars().count() + 1 > max_cols {
                last.pop();
            }
            last.push('…');
        }
    }
    lines
}

fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    let x1 = x1.min(img.width());
    let y1 = y1.min(img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            let dst = *img.get_pixel(x, y);
            img.put_pixel(x, y, blend_pixel(dst, color));
        }
    }
}

fn draw_text(img: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>, scale: u32) {
    let scale = scale.max(1) as i32;
    let mut cursor_x = x;
    for ch in text.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += 8 * scale;
            continue;
        };
        for (row_idx, row) in glyph.iter().copied().enumerate() {
            for col_idx in 0..8 {
                if (row >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * scale;
                let py = y + row_idx as i32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        let tx = px + sx;
                        let ty = py + sy;
                        if tx >= 0
                            && ty >= 0
                            && (tx as u32) < img.width()
                            && (ty as u32) < img.height()
                        {
                            let dst = *img.get_pixel(tx as u32, ty as u32);
                            img.put_pixel(tx as u32, ty as u32, blend_pixel(dst, color));
                        }
                    }
                }
            }
        }
        cursor_x += 8 * scale;
    }
}

fn blend_pixel(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let alpha = f32::from(src[3]) / 255.0;
    if alpha <= 0.0 {
        return dst;
    }
    let inv = 1.0 - alpha;
    let channel = |d: u8, s: u8| {
        (f32::from(d) * inv + f32::from(s) * alpha)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(dst[0], src[0]),
        channel(dst[1], src[1]),
        channel(dst[2], src[2]),
        channel(dst[3], src[3]).max(dst[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_column_cap() {
        let lines = wrap_text("a quick brown fox jumps over", 11, 10);
        assert!(lines.iter().all(|line| line.chars().count() <= 11));
        assert_eq!(lines.join(" "), "a quick brown fox jumps over");
    }

    #[test]
    fn wrap_chops_oversized_words() {
        let lines = wrap_text("abcdefghij", 4, 10);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_truncates_with_ellipsis() {
        let lines = wrap_text("one two three four five six", 9, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with('…'));
    }

    #[test]
    fn glyph_rows_index_left_to_right() {
        // The font8x8 row bytes are LSB-first; drawing 'l' must put ink in
        // the left half of the cell.
        let mut img = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
        draw_text(&mut img, 0, 0, "l", Rgba([255, 255, 255, 255]), 1);
        let left_ink = (0..8).any(|y| (0..4).any(|x| img.get_pixel(x, y)[0] > 0));
        assert!(left_ink);
    }
}
