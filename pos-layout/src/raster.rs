//! RGB raster canvas
//!
//! Draws rendered blocks, rule lines and pasted images onto an 8-bit RGB
//! buffer for the label/receipt image path. Text is rasterized from the
//! active [`FontMetrics`]: anti-aliased TTF outlines when a font is
//! loaded, scaled Spleen bitmap cells otherwise.

use ab_glyph::{Font, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage, imageops};
use spleen_font::{FONT_12X24, PSF2Font};
use unicode_segmentation::UnicodeSegmentation;

use crate::block::{Emphasis, RenderedBlock};
use crate::measure::{CELL_H, CELL_W, FontMetrics, Glyphs};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Fixed-size white drawing surface for one label or receipt image.
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbImage::from_pixel(width.max(1), height.max(1), WHITE),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    /// Horizontal rule, inclusive of both end columns.
    pub fn draw_hline(&mut self, x0: u32, x1: u32, y: u32) {
        if y >= self.img.height() {
            return;
        }
        for x in x0..=x1.min(self.img.width().saturating_sub(1)) {
            self.img.put_pixel(x, y, BLACK);
        }
    }

    /// 1px rectangle outline with corners at (x0, y0) and (x1, y1).
    pub fn draw_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
        self.draw_hline(x0, x1, y0);
        self.draw_hline(x0, x1, y1);
        for y in y0..=y1.min(self.img.height().saturating_sub(1)) {
            if x0 < self.img.width() {
                self.img.put_pixel(x0, y, BLACK);
            }
            if x1 < self.img.width() {
                self.img.put_pixel(x1, y, BLACK);
            }
        }
    }

    /// Paste an image with its top-left corner at (x, y); areas falling
    /// outside the canvas are clipped.
    pub fn paste(&mut self, src: &RgbImage, x: i64, y: i64) {
        imageops::replace(&mut self.img, src, x, y);
    }

    /// Draw `text` with its top-left at (x, y). Bold is double-struck,
    /// the classic thermal-head emphasis.
    pub fn draw_text(&mut self, metrics: &FontMetrics, x: i64, y: i64, text: &str, bold: bool) {
        self.draw_text_pass(metrics, x, y, text);
        if bold {
            self.draw_text_pass(metrics, x + 1, y, text);
        }
    }

    /// Walk a rendered block and draw every run at its resolved position.
    pub fn draw_block(&mut self, metrics: &FontMetrics, block: &RenderedBlock) {
        for run in &block.runs {
            let x = run.start_x(metrics) as i64;
            self.draw_text(metrics, x, run.y as i64, &run.text, run.emphasis == Emphasis::Bold);
        }
    }

    fn draw_text_pass(&mut self, metrics: &FontMetrics, x: i64, y: i64, text: &str) {
        match &metrics.glyphs {
            Glyphs::Outline { font, px } => self.draw_outline_text(font, *px, x, y, text),
            Glyphs::Cells { scale } => self.draw_bitmap_text(*scale, x, y, text),
        }
    }

    fn draw_outline_text(&mut self, font: &ab_glyph::FontArc, px: f32, x: i64, y: i64, text: &str) {
        let scaled = font.as_scaled(PxScale::from(px));
        let baseline = y as f32 + scaled.ascent();
        let mut caret = x as f32;

        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            let glyph = glyph_id.with_scale_and_position(px, point(caret, baseline));

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (w, h) = (self.img.width() as i32, self.img.height() as i32);
                outlined.draw(|gx, gy, coverage| {
                    let px_x = gx as i32 + bounds.min.x as i32;
                    let px_y = gy as i32 + bounds.min.y as i32;
                    if px_x >= 0 && px_x < w && px_y >= 0 && px_y < h {
                        let shade = (255.0 * (1.0 - coverage.clamp(0.0, 1.0))) as u8;
                        let p = self.img.get_pixel_mut(px_x as u32, px_y as u32);
                        // Darken only: overlapping glyphs accumulate ink
                        p.0 = [
                            p.0[0].min(shade),
                            p.0[1].min(shade),
                            p.0[2].min(shade),
                        ];
                    }
                });
            }

            caret += scaled.h_advance(glyph_id);
        }
    }

    fn draw_bitmap_text(&mut self, scale: u32, x: i64, y: i64, text: &str) {
        let mut cell_x = x;
        for cluster in text.graphemes(true) {
            // One cell per cluster; the base character carries the shape,
            // marks are dropped in this degraded mode.
            if let Some(ch) = cluster.chars().next()
                && ch != ' '
            {
                self.draw_bitmap_cell(scale, cell_x, y, ch);
            }
            cell_x += (CELL_W * scale) as i64;
        }
    }

    fn draw_bitmap_cell(&mut self, scale: u32, x: i64, y: i64, ch: char) {
        let Ok(mut psf) = PSF2Font::new(FONT_12X24) else {
            return;
        };
        let utf8 = ch.to_string();

        if let Some(glyph) = psf.glyph_for_utf8(utf8.as_bytes()) {
            for (gy, row) in glyph.enumerate() {
                for (gx, on) in row.enumerate() {
                    if on {
                        self.fill_dot(x + (gx as i64) * scale as i64, y + (gy as i64) * scale as i64, scale);
                    }
                }
            }
        } else {
            // Unknown glyph: hollow box, keeps the cell visibly occupied
            let x1 = x + (CELL_W * scale) as i64 - 2;
            let y1 = y + (CELL_H * scale) as i64 - 2;
            if x >= 0 && y >= 0 && x1 > x && y1 > y {
                self.draw_rect(x as u32 + 1, y as u32 + 1, x1 as u32, y1 as u32);
            }
        }
    }

    fn fill_dot(&mut self, x: i64, y: i64, scale: u32) {
        for dy in 0..scale as i64 {
            for dx in 0..scale as i64 {
                let (px, py) = (x + dx, y + dy);
                if px >= 0
                    && py >= 0
                    && (px as u32) < self.img.width()
                    && (py as u32) < self.img.height()
                {
                    self.img.put_pixel(px as u32, py as u32, BLACK);
                }
            }
        }
    }
}

/// Count of non-white pixels, used by tests to confirm ink was laid down.
#[cfg(test)]
fn ink(img: &RgbImage) -> usize {
    img.pixels().filter(|p| p.0 != [255, 255, 255]).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Alignment, TextRun};

    #[test]
    fn test_canvas_starts_white() {
        let c = Canvas::new(20, 20);
        assert_eq!(ink(&c.into_image()), 0);
    }

    #[test]
    fn test_bitmap_text_leaves_ink() {
        let metrics = FontMetrics::bitmap(24.0);
        let mut c = Canvas::new(200, 40);
        c.draw_text(&metrics, 0, 0, "ABC", false);
        assert!(ink(&c.into_image()) > 0);
    }

    #[test]
    fn test_bold_draws_more_ink() {
        let metrics = FontMetrics::bitmap(24.0);
        let mut regular = Canvas::new(200, 40);
        regular.draw_text(&metrics, 0, 0, "TOTAL", false);
        let mut bold = Canvas::new(200, 40);
        bold.draw_text(&metrics, 0, 0, "TOTAL", true);
        assert!(ink(&bold.into_image()) >= ink(&regular.into_image()));
    }

    #[test]
    fn test_draw_block_places_runs() {
        let metrics = FontMetrics::bitmap(24.0);
        let mut block = RenderedBlock::new(240);
        block.height = 24;
        block.push(TextRun {
            x: 240,
            y: 0,
            text: "48.00".to_string(),
            align: Alignment::Right,
            emphasis: Emphasis::Regular,
        });
        let mut c = Canvas::new(240, 24);
        c.draw_block(&metrics, &block);
        let img = c.into_image();
        assert!(ink(&img) > 0);
        // Right-aligned run: the leftmost third stays empty
        let left_ink = img
            .enumerate_pixels()
            .filter(|(x, _, p)| *x < 80 && p.0 != [255, 255, 255])
            .count();
        assert_eq!(left_ink, 0);
    }

    #[test]
    fn test_hline_clips_to_canvas() {
        let mut c = Canvas::new(10, 10);
        c.draw_hline(0, 500, 5);
        c.draw_hline(0, 9, 500);
        let img = c.into_image();
        assert_eq!(ink(&img), 10);
    }

    #[test]
    fn test_paste_clips_outside_bounds() {
        let mut c = Canvas::new(10, 10);
        let black = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        c.paste(&black, 8, 8);
        c.paste(&black, -2, -2);
        let img = c.into_image();
        assert_eq!(ink(&img), 4 + 4);
    }
}
