//! Utility functions

use crate::constants::{APP_NAME, PHOTO_PREVIEW_SIZE};
use eframe::egui;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Decode an image file into a downscaled preview texture.
/// Returns None (and logs) when the file can't be read or decoded.
pub fn load_photo_texture(ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
    match image::open(path) {
        Ok(img) => {
            let rgba = img.thumbnail(PHOTO_PREVIEW_SIZE, PHOTO_PREVIEW_SIZE).to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = rgba.into_raw();
            debug!(path = %path.display(), width = size[0], height = size[1], "Photo preview loaded");
            Some(ctx.load_texture(
                format!("photo:{}", path.display()),
                egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                egui::TextureOptions::LINEAR,
            ))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load photo preview");
            None
        }
    }
}
