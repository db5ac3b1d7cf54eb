use std::path::Path;

use eframe::egui;
use image::imageops::FilterType;

/// Bounding box for the inline preview, in pixels.
pub const PREVIEW_MAX_WIDTH: u32 = 600;
pub const PREVIEW_MAX_HEIGHT: u32 = 315;

/// Load the generated card and downscale it to fit the preview box,
/// preserving aspect ratio. Errors become the string shown in the preview
/// area; they never fail the generation itself.
pub fn load_preview(path: &Path) -> Result<egui::ColorImage, String> {
    let decoded = image::open(path).map_err(|err| err.to_string())?;
    let (width, height) = fit_within(
        decoded.width(),
        decoded.height(),
        PREVIEW_MAX_WIDTH,
        PREVIEW_MAX_HEIGHT,
    );
    let resized = decoded.resize_exact(width, height, FilterType::Lanczos3);
    let rgba = resized.to_rgba8();
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_raw(),
    ))
}

/// Largest size with the source aspect ratio that fits the box; images
/// already inside the box are left alone.
fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let width = width.max(1);
    let height = height.max(1);
    let scale = (max_width as f32 / width as f32)
        .min(max_height as f32 / height as f32)
        .min(1.0);
    (
        ((width as f32 * scale).round() as u32).max(1),
        ((height as f32 * scale).round() as u32).max(1),
    )
}
