//! Label and sheet composition (raster path)
//!
//! Produces fixed-size RGB label images: bordered panel, store name,
//! Code 128 symbol, wrapped product name, info and price rows. Sheets
//! tile N copies into a grid of R columns with configurable margins,
//! spacing and a global calibration offset for pre-cut sheet stock.

use barcoders::sym::code128::Code128;
use image::{RgbImage, imageops};
use rust_decimal::Decimal;

use crate::config::RenderConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::grid::{format_money, format_quantity};
use crate::measure::{FontMetrics, Measure};
use crate::raster::Canvas;
use crate::wrap::{ellipsize, wrap_to_width};

/// Physical label geometry.
///
/// Defaults match 40x25mm pre-cut stock on a 203 DPI (8 dots/mm)
/// thermal printer, three labels per row.
#[derive(Debug, Clone)]
pub struct LabelSpec {
    pub width_mm: f32,
    pub height_mm: f32,
    pub dpi: f32,
    pub columns: u32,
    pub page_margin_mm: f32,
    pub spacing_mm: f32,
    /// Uniform translation applied to every label origin - calibration
    /// for physical sheet misalignment, never derived from content.
    pub offset_px: (i64, i64),
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            width_mm: 40.0,
            height_mm: 25.0,
            dpi: 203.0,
            columns: 3,
            page_margin_mm: 5.0,
            spacing_mm: 2.0,
            offset_px: (0, 0),
        }
    }
}

impl LabelSpec {
    /// Convert millimetres to device pixels at the spec's DPI.
    pub fn px(&self, mm: f32) -> u32 {
        (mm * self.dpi / 25.4).round().max(0.0) as u32
    }

    /// Pixel dimensions of one label.
    pub fn label_px(&self) -> (u32, u32) {
        (self.px(self.width_mm), self.px(self.height_mm))
    }
}

/// Content of one printed label.
#[derive(Debug, Clone)]
pub struct LabelItem {
    pub barcode: String,
    pub name: String,
    pub measure: String,
    pub quantity: Decimal,
    pub mrp: Decimal,
    pub retail_price: Decimal,
}

/// Composes labels and label sheets against a [`LabelSpec`].
///
/// Fonts come from the [`RenderConfig`]; a missing TTF degrades to the
/// embedded bitmap font rather than failing the print job.
pub struct LabelComposer {
    spec: LabelSpec,
    title: FontMetrics,
    body: FontMetrics,
    small: FontMetrics,
}

impl LabelComposer {
    pub fn new(spec: LabelSpec, config: &RenderConfig) -> Self {
        Self {
            title: FontMetrics::for_surface(config, config.title_px),
            body: FontMetrics::for_surface(config, config.body_px),
            small: FontMetrics::for_surface(config, config.small_px),
            spec,
        }
    }

    pub fn spec(&self) -> &LabelSpec {
        &self.spec
    }

    /// Compose one label image of exactly `spec.label_px()` pixels.
    pub fn compose_label(&self, item: &LabelItem, store_name: &str) -> LayoutResult<RgbImage> {
        let (lw, lh) = self.spec.label_px();
        if lw == 0 || lh == 0 {
            return Err(LayoutError::InvalidSpec("zero-sized label".into()));
        }

        let mut canvas = Canvas::new(lw, lh);
        let cx = lw / 2;

        // Sticker panel with a thin border
        let pad = self.spec.px(0.8).max(4);
        canvas.draw_rect(pad, pad, lw - pad - 1, lh - pad - 1);

        let inset = pad + self.spec.px(0.6);
        let x0 = inset;
        let x1 = lw - inset;
        let content_w = x1 - x0;
        let mut y = inset as i64;

        // Store name: one centered uppercase line, smaller font then
        // ellipsis when it refuses to fit
        let store = store_name.trim().to_uppercase();
        let font = if self.title.width(&store) <= content_w {
            &self.title
        } else {
            &self.body
        };
        let store = if font.width(&store) > content_w {
            ellipsize(&store, content_w, font)
        } else {
            store
        };
        let sw = font.width(&store);
        canvas.draw_text(font, (cx.saturating_sub(sw / 2)) as i64, y, &store, true);
        y += self.spec.px(3.0) as i64;

        // Barcode symbol, scaled down to the allotted region but never up
        let data = item.barcode.trim();
        let data = if data.is_empty() { "0000000000000" } else { data };
        let symbol = barcode_image(data, 2, self.spec.px(8.0))?;
        let max_w = (content_w as f32 * 0.95) as u32;
        let max_h = (lh as f32 * 0.42) as u32;
        let symbol = scale_to_fit(symbol, max_w, max_h);
        canvas.paste(
            &symbol,
            (cx.saturating_sub(symbol.width() / 2)) as i64,
            y,
        );
        y += symbol.height() as i64 + self.spec.px(0.2) as i64;

        // Product name: up to two centered lines
        for line in wrap_to_width(item.name.trim(), content_w, 2, &self.body) {
            let w = self.body.width(&line);
            canvas.draw_text(&self.body, (cx.saturating_sub(w / 2)) as i64, y, &line, false);
            y += self.body.line_height() as i64;
        }
        y += self.spec.px(0.2) as i64;

        // Info row: QTY left, measure right
        let left = format!("QTY: {}", format_quantity(item.quantity));
        let edge = self.spec.px(0.4);
        let gap = self.spec.px(2.0);
        let left_x = (x0 + edge) as i64;
        let left_end = left_x + self.small.width(&left) as i64;
        let mut right = item.measure.trim().to_string();
        let right_budget = (x1.saturating_sub(edge) as i64 - left_end - gap as i64).max(0) as u32;
        if self.small.width(&right) > right_budget {
            right = ellipsize(&right, right_budget, &self.small);
        }
        let right_x = (x1 - edge).saturating_sub(self.small.width(&right)) as i64;
        canvas.draw_text(&self.small, left_x, y, &left, false);
        canvas.draw_text(&self.small, right_x, y, &right, false);
        y += self.small.line_height() as i64 + self.spec.px(0.2) as i64;

        // Price row: MRP left, RP right, emphasized; drop to the body
        // font when the pair would collide
        let mrp = format!("MRP: ₹{}", format_money(item.mrp));
        let rp = format!("RP: ₹{}", format_money(item.retail_price));
        let font = if self.title.width(&mrp) + self.title.width(&rp) + gap <= content_w {
            &self.title
        } else {
            &self.body
        };
        let rp_x = (x1 - edge).saturating_sub(font.width(&rp)) as i64;
        canvas.draw_text(font, left_x, y, &mrp, true);
        canvas.draw_text(font, rp_x, y, &rp, true);

        Ok(canvas.into_image())
    }

    /// Tile `count` copies into a sheet of `columns` columns and
    /// `ceil(count / columns)` rows. Unfilled grid cells stay blank; the
    /// sheet is never cropped to the populated area.
    pub fn compose_sheet(
        &self,
        item: &LabelItem,
        store_name: &str,
        count: u32,
        columns: u32,
    ) -> LayoutResult<RgbImage> {
        if count == 0 {
            return Err(LayoutError::InvalidSpec("label count must be > 0".into()));
        }
        if columns == 0 {
            return Err(LayoutError::InvalidSpec("column count must be > 0".into()));
        }

        let rows = count.div_ceil(columns);
        let (lw, lh) = self.spec.label_px();
        let margin = self.spec.px(self.spec.page_margin_mm);
        let spacing = self.spec.px(self.spec.spacing_mm);

        let sheet_w = margin * 2 + columns * lw + (columns - 1) * spacing;
        let sheet_h = margin * 2 + rows * lh + (rows - 1) * spacing;

        let label = self.compose_label(item, store_name)?;
        let mut canvas = Canvas::new(sheet_w, sheet_h);
        let (dx, dy) = self.spec.offset_px;

        for i in 0..count {
            let col = i % columns;
            let row = i / columns;
            let x = (margin + col * (lw + spacing)) as i64 + dx;
            let y = (margin + row * (lh + spacing)) as i64 + dy;
            canvas.paste(&label, x, y);
        }

        Ok(canvas.into_image())
    }
}

/// Rasterize `data` as a Code 128 symbol.
///
/// `module_px` is the width of one module; a 6-module quiet zone is kept
/// on each side. The symbology output is treated as opaque bars - no
/// decoding or validation happens here.
pub fn barcode_image(data: &str, module_px: u32, height_px: u32) -> LayoutResult<RgbImage> {
    // Character set B covers the full printable ASCII range
    let prefixed = format!("\u{0181}{}", data);
    let symbol = Code128::new(&prefixed).map_err(|e| LayoutError::Barcode(e.to_string()))?;
    let modules = symbol.encode();

    let module_px = module_px.max(1);
    let height_px = height_px.max(1);
    let quiet = 6u32;
    let width = (modules.len() as u32 + quiet * 2) * module_px;

    let mut canvas = Canvas::new(width, height_px);
    for (i, module) in modules.iter().enumerate() {
        if *module == 1 {
            let x0 = (quiet + i as u32) * module_px;
            for y in 0..height_px {
                canvas.draw_hline(x0, x0 + module_px - 1, y);
            }
        }
    }
    Ok(canvas.into_image())
}

/// Shrink to fit `max_w` x `max_h` preserving aspect ratio: width-first,
/// then height-capped, never scaled beyond 1:1.
fn scale_to_fit(img: RgbImage, max_w: u32, max_h: u32) -> RgbImage {
    let (w, h) = (img.width(), img.height());
    let w_ratio = if w > max_w { max_w as f32 / w as f32 } else { 1.0 };
    let h_ratio = if h > max_h { max_h as f32 / h as f32 } else { 1.0 };
    let ratio = w_ratio.min(h_ratio).min(1.0);

    if ratio >= 1.0 {
        return img;
    }
    let new_w = ((w as f32 * ratio) as u32).max(1);
    let new_h = ((h as f32 * ratio) as u32).max(1);
    imageops::resize(&img, new_w, new_h, imageops::FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample_item() -> LabelItem {
        LabelItem {
            barcode: "AbC123xyz".to_string(),
            name: "Perun Seeragam 100g".to_string(),
            measure: "100g".to_string(),
            quantity: dec("2"),
            mrp: dec("30.00"),
            retail_price: dec("24.00"),
        }
    }

    fn composer() -> LabelComposer {
        LabelComposer::new(LabelSpec::default(), &RenderConfig::default())
    }

    fn ink_in(
        img: &RgbImage,
        x0: u32,
        y0: u32,
        w: u32,
        h: u32,
    ) -> usize {
        img.enumerate_pixels()
            .filter(|(x, y, p)| {
                *x >= x0 && *x < x0 + w && *y >= y0 && *y < y0 + h && p.0 != [255, 255, 255]
            })
            .count()
    }

    #[test]
    fn test_label_has_exact_fixed_dimensions() {
        let c = composer();
        let img = c.compose_label(&sample_item(), "SRI VELAVAN SUPERMARKET").unwrap();
        let (lw, lh) = c.spec().label_px();
        assert_eq!((img.width(), img.height()), (lw, lh));
        assert!(ink_in(&img, 0, 0, lw, lh) > 0);
    }

    #[test]
    fn test_sheet_tiling_four_of_three_columns() {
        let c = composer();
        let img = c.compose_sheet(&sample_item(), "STORE", 4, 3).unwrap();

        let spec = c.spec();
        let (lw, lh) = spec.label_px();
        let margin = spec.px(spec.page_margin_mm);
        let spacing = spec.px(spec.spacing_mm);

        // ceil(4/3) = 2 rows
        assert_eq!(img.height(), 2 * lh + spacing + 2 * margin);
        assert_eq!(img.width(), 2 * margin + 3 * lw + 2 * spacing);

        // Row 2: first cell populated, the other two blank
        let row2_y = margin + lh + spacing;
        let cell_x = |col: u32| margin + col * (lw + spacing);
        assert!(ink_in(&img, cell_x(0), row2_y, lw, lh) > 0);
        assert_eq!(ink_in(&img, cell_x(1), row2_y, lw, lh), 0);
        assert_eq!(ink_in(&img, cell_x(2), row2_y, lw, lh), 0);
    }

    #[test]
    fn test_sheet_offset_translates_without_resizing() {
        let mut spec = LabelSpec::default();
        spec.offset_px = (7, 5);
        let c = LabelComposer::new(spec, &RenderConfig::default());
        let base = composer().compose_sheet(&sample_item(), "STORE", 1, 3).unwrap();
        let shifted = c.compose_sheet(&sample_item(), "STORE", 1, 3).unwrap();
        assert_eq!((base.width(), base.height()), (shifted.width(), shifted.height()));
        assert_ne!(base.as_raw(), shifted.as_raw());
    }

    #[test]
    fn test_sheet_rejects_zero_count() {
        let c = composer();
        assert!(c.compose_sheet(&sample_item(), "STORE", 0, 3).is_err());
    }

    #[test]
    fn test_barcode_has_bars_and_quiet_zone() {
        let img = barcode_image("AbC123", 2, 40).unwrap();
        assert_eq!(img.height(), 40);
        // 6-module quiet zone on the left stays white
        let quiet_ink = img
            .enumerate_pixels()
            .filter(|(x, _, p)| *x < 12 && p.0 != [255, 255, 255])
            .count();
        assert_eq!(quiet_ink, 0);
        let bars = img.pixels().filter(|p| p.0 == [0, 0, 0]).count();
        assert!(bars > 0);
    }

    #[test]
    fn test_barcode_rejects_non_ascii_payload() {
        assert!(barcode_image("பொருள்", 2, 40).is_err());
    }

    #[test]
    fn test_scale_to_fit_never_upscales() {
        let img = RgbImage::from_pixel(50, 20, image::Rgb([0, 0, 0]));
        let out = scale_to_fit(img, 500, 200);
        assert_eq!((out.width(), out.height()), (50, 20));
    }

    #[test]
    fn test_scale_to_fit_width_first_then_height_cap() {
        let img = RgbImage::from_pixel(200, 100, image::Rgb([0, 0, 0]));
        let out = scale_to_fit(img, 100, 30);
        // Width cap alone would give 100x50; the height cap tightens it
        assert!(out.height() <= 30);
        assert!(out.width() <= 100);
        // Aspect preserved: 2:1
        assert_eq!(out.width(), out.height() * 2);
    }
}
