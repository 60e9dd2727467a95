//! Surface measurement adapters
//!
//! Answers "how wide does this string render?" for the active surface.
//! Two interchangeable modes sit behind the [`Measure`] trait:
//!
//! - [`CharCells`] - one grapheme cluster = one cell. Used for plain-text
//!   previews and text-mode spooling where no real device font exists.
//! - [`FontMetrics`] - real glyph advances from a TTF (ab_glyph), or
//!   fixed bitmap cells when no font is available. Used for raster output.
//!
//! Width is always measured per grapheme cluster: a Tamil consonant plus
//! its vowel sign is one indivisible unit. Splitting inside a cluster
//! corrupts the rendered text, so wrap and truncate step cluster-wise.

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::RenderConfig;
use crate::error::{LayoutError, LayoutResult};

/// Unit the wrap loop extends the current line by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapUnit {
    /// Prefer word boundaries, fall back to clusters for oversized words
    Word,
    /// One grapheme cluster at a time
    Cluster,
}

/// Measurement contract used by the layout engine.
///
/// Implementations must be monotonic (`width(a) <= width(a + c)` for any
/// continuation `c`) and deterministic for repeated calls.
pub trait Measure {
    /// Width of `text` in surface units
    fn width(&self, text: &str) -> u32;

    /// Height of one line in surface units
    fn line_height(&self) -> u32;

    /// Width of the space/filler unit used for padding and rule lines
    fn space_width(&self) -> u32;

    fn wrap_unit(&self) -> WrapUnit {
        WrapUnit::Cluster
    }
}

// ============================================================================
// Character-cell mode
// ============================================================================

/// Character-count measurement: every grapheme cluster occupies one cell.
///
/// Cheap and approximate - combining marks never count as extra cells, so
/// Tamil text measures by what the reader perceives, not by code points.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCells;

impl CharCells {
    pub fn new() -> Self {
        Self
    }
}

impl Measure for CharCells {
    fn width(&self, text: &str) -> u32 {
        text.graphemes(true).count() as u32
    }

    fn line_height(&self) -> u32 {
        1
    }

    fn space_width(&self) -> u32 {
        1
    }

    fn wrap_unit(&self) -> WrapUnit {
        WrapUnit::Word
    }
}

// ============================================================================
// Glyph-accurate mode
// ============================================================================

/// Spleen bitmap cell geometry (12x24 at scale 1)
pub(crate) const CELL_W: u32 = 12;
pub(crate) const CELL_H: u32 = 24;

pub(crate) enum Glyphs {
    /// Real font: widths are summed horizontal advances
    Outline { font: FontArc, px: f32 },
    /// Embedded bitmap font: every cluster is one fixed cell
    Cells { scale: u32 },
}

/// Device-accurate measurement for raster surfaces.
///
/// Built from a TTF when one is configured, otherwise from the embedded
/// Spleen bitmap font. Construction never fails: a broken font path logs
/// a warning and degrades to bitmap cells (`for_surface`), keeping every
/// caller supplied with a usable, if approximate, measurement.
pub struct FontMetrics {
    pub(crate) glyphs: Glyphs,
}

impl FontMetrics {
    /// Load a TTF for glyph-accurate measurement at `px` pixels per line.
    pub fn from_file(path: &Path, px: f32) -> LayoutResult<Self> {
        let data = std::fs::read(path)
            .map_err(|e| LayoutError::FontUnavailable(format!("{}: {}", path.display(), e)))?;
        let font = FontArc::try_from_vec(data)
            .map_err(|e| LayoutError::FontUnavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            glyphs: Glyphs::Outline { font, px },
        })
    }

    /// Fixed-cell bitmap metrics sized to roughly `px` pixels per line.
    pub fn bitmap(px: f32) -> Self {
        let scale = (px / CELL_H as f32).round().max(1.0) as u32;
        Self {
            glyphs: Glyphs::Cells { scale },
        }
    }

    /// Build the measurement for a raster surface, failing closed.
    pub fn for_surface(config: &RenderConfig, px: f32) -> Self {
        match &config.font_path {
            Some(path) => match Self::from_file(path, px) {
                Ok(m) => m,
                Err(e) => {
                    warn!(error = %e, "font unavailable, falling back to bitmap cells");
                    Self::bitmap(px)
                }
            },
            None => Self::bitmap(px),
        }
    }

    /// Baseline offset from the top of the line box.
    pub(crate) fn ascent(&self) -> f32 {
        match &self.glyphs {
            Glyphs::Outline { font, px } => font.as_scaled(PxScale::from(*px)).ascent(),
            // Bitmap glyphs are drawn from the cell top, no baseline shift
            Glyphs::Cells { .. } => 0.0,
        }
    }

    fn cluster_width(&self, cluster: &str) -> f32 {
        match &self.glyphs {
            Glyphs::Outline { font, px } => {
                let scaled = font.as_scaled(PxScale::from(*px));
                // Combining marks advance by ~0 in any well-formed font, so
                // summing advances measures the cluster, not its code points.
                cluster
                    .chars()
                    .map(|ch| scaled.h_advance(font.glyph_id(ch)))
                    .sum()
            }
            Glyphs::Cells { scale } => (CELL_W * scale) as f32,
        }
    }
}

impl Measure for FontMetrics {
    fn width(&self, text: &str) -> u32 {
        let total: f32 = text.graphemes(true).map(|g| self.cluster_width(g)).sum();
        total.ceil() as u32
    }

    fn line_height(&self) -> u32 {
        match &self.glyphs {
            Glyphs::Outline { font, px } => {
                let scaled = font.as_scaled(PxScale::from(*px));
                (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
            }
            Glyphs::Cells { scale } => CELL_H * scale,
        }
    }

    fn space_width(&self) -> u32 {
        self.cluster_width(" ").ceil().max(1.0) as u32
    }

    fn wrap_unit(&self) -> WrapUnit {
        WrapUnit::Cluster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_cells_counts_clusters_not_code_points() {
        let m = CharCells::new();
        // Three perceived characters, six code points
        assert_eq!(m.width("பொருள்"), 3);
        assert!((m.width("பொருள்") as usize) < "பொருள்".chars().count());
        assert_eq!(m.width("hello"), 5);
        assert_eq!(m.width(""), 0);
    }

    #[test]
    fn test_char_cells_monotonic() {
        let m = CharCells::new();
        let base = "அளவு";
        for cont in ["x", "ரு", " 100g"] {
            assert!(m.width(base) <= m.width(&format!("{base}{cont}")));
        }
    }

    #[test]
    fn test_bitmap_metrics_cluster_cells() {
        let m = FontMetrics::bitmap(24.0);
        assert_eq!(m.width("ab"), 2 * CELL_W);
        // Cluster with a combining vowel sign is still one cell
        assert_eq!(m.width("பொ"), CELL_W);
        assert_eq!(m.line_height(), CELL_H);
    }

    #[test]
    fn test_bitmap_metrics_scales() {
        let m = FontMetrics::bitmap(48.0);
        assert_eq!(m.width("a"), 2 * CELL_W);
        assert_eq!(m.line_height(), 2 * CELL_H);
    }

    #[test]
    fn test_for_surface_fails_closed_on_missing_font() {
        let config = RenderConfig::with_font("/nonexistent/font.ttf");
        let m = FontMetrics::for_surface(&config, 24.0);
        // Degraded but usable
        assert!(m.width("test") > 0);
        assert!(m.line_height() > 0);
    }

    #[test]
    fn test_measure_deterministic() {
        let m = FontMetrics::bitmap(24.0);
        assert_eq!(m.width("Perun Seeragam"), m.width("Perun Seeragam"));
    }
}
