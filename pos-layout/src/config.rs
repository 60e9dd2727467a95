//! Render configuration
//!
//! Explicit value passed into the layout engine and measurement adapters
//! at call time. There is no process-wide font or DPI state.

use std::path::PathBuf;

/// Font and sizing configuration for raster rendering.
///
/// When `font_path` is unset (or the file fails to load) every adapter
/// built from this config falls back to the embedded bitmap font, so a
/// missing TTF degrades output quality but never fails a render.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// TTF used for glyph-accurate measurement and drawing
    pub font_path: Option<PathBuf>,
    /// Store name / price row size in pixels
    pub title_px: f32,
    /// Product name size in pixels
    pub body_px: f32,
    /// Info row size in pixels
    pub small_px: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            title_px: 18.0,
            body_px: 16.0,
            small_px: 14.0,
        }
    }
}

impl RenderConfig {
    pub fn with_font(path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: Some(path.into()),
            ..Self::default()
        }
    }
}
