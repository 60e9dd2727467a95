//! Bill document rendering
//!
//! Renders a full bill - store header, bill/customer metadata, item
//! table, totals and payment sections - into a [`RenderedBlock`]. The
//! block is then walked by a thin adapter: [`render`](ReceiptRenderer::render)
//! for the character-grid string, [`render_image`](ReceiptRenderer::render_image)
//! for the raster path. Both outputs come from the same layout pass, so
//! the two never drift apart.

use image::RgbImage;
use rust_decimal::Decimal;

use crate::block::{Alignment, Emphasis, RenderedBlock, TextRun};
use crate::config::RenderConfig;
use crate::grid::{ItemGrid, LineItem, format_money, format_quantity};
use crate::measure::{CharCells, FontMetrics, Measure};
use crate::raster::Canvas;

/// Store identity block printed at the top of every bill
#[derive(Debug, Clone, Default)]
pub struct StoreHeader {
    pub name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub phone: String,
    pub gst: String,
}

/// Everything needed to print one bill. Built by the caller from its
/// persisted records; the renderer never touches storage.
#[derive(Debug, Clone)]
pub struct ReceiptDoc {
    pub store: StoreHeader,
    pub bill_number: String,
    pub date: String,
    pub time: String,
    pub customer_name: String,
    pub customer_mobile: Option<String>,
    pub items: Vec<LineItem>,
    pub total_unique_products: i64,
    pub total_quantity: Decimal,
    pub subtotal: Decimal,
    pub total_savings: Decimal,
    pub payment_type: String,
    pub cash_received: Decimal,
    pub cash_balance: Decimal,
}

/// Renders a [`ReceiptDoc`] at a fixed surface width.
pub struct ReceiptRenderer<'a> {
    doc: &'a ReceiptDoc,
    width: u32,
}

impl<'a> ReceiptRenderer<'a> {
    /// 38 characters suits 7.5cm thermal paper
    pub const DEFAULT_WIDTH: u32 = 38;

    /// `width` is in the surface units of whatever measurement the
    /// render call supplies: cells for text, pixels for images.
    pub fn new(doc: &'a ReceiptDoc, width: u32) -> Self {
        Self { doc, width }
    }

    /// Lay out the full document as positioned runs.
    pub fn render_block(&self, m: &dyn Measure) -> RenderedBlock {
        let d = self.doc;
        let lh = m.line_height();
        let mut block = RenderedBlock::new(self.width);
        let mut y = 0u32;

        let center = |block: &mut RenderedBlock, y: u32, text: &str, emphasis: Emphasis| {
            block.push(TextRun {
                x: self.width / 2,
                y,
                text: text.to_string(),
                align: Alignment::Center,
                emphasis,
            });
        };
        let left = |block: &mut RenderedBlock, y: u32, text: String| {
            block.push(TextRun {
                x: 0,
                y,
                text,
                align: Alignment::Left,
                emphasis: Emphasis::Regular,
            });
        };
        let rule = |block: &mut RenderedBlock, y: u32, fill: char| {
            let unit = fill.to_string();
            let count = (self.width / m.width(&unit).max(1)) as usize;
            left(block, y, unit.repeat(count));
        };

        // Store header
        rule(&mut block, y, '_');
        y += lh;
        center(&mut block, y, &d.store.name, Emphasis::Bold);
        y += lh;
        center(&mut block, y, &d.store.address_line1, Emphasis::Regular);
        y += lh;
        center(&mut block, y, &d.store.address_line2, Emphasis::Regular);
        y += lh;
        center(
            &mut block,
            y,
            &format!("Ph: {}  GST:{}", d.store.phone, d.store.gst),
            Emphasis::Regular,
        );
        y += lh;
        rule(&mut block, y, '-');
        y += lh;

        // Bill meta
        left(&mut block, y, format!("பில் எண் : {}", d.bill_number));
        y += lh;
        left(&mut block, y, format!("தேதி     : {} {}", d.date, d.time));
        y += lh;
        rule(&mut block, y, '-');
        y += lh;

        // Customer
        left(&mut block, y, "வாடிக்கையாளர்:".to_string());
        y += lh;
        left(&mut block, y, format!("பெயர்    : {}", d.customer_name));
        y += lh;
        if let Some(mobile) = &d.customer_mobile {
            left(&mut block, y, format!("மொபைல்  : {}", mobile));
            y += lh;
        }
        rule(&mut block, y, '-');
        y += lh;

        // Item table carries its own rule lines; splice its runs in
        let table = ItemGrid::new(m, self.width).render(&d.items);
        for run in table.runs {
            block.push(TextRun {
                y: run.y + y,
                ..run
            });
        }
        y += table.height;

        // Totals
        left(
            &mut block,
            y,
            format!("மொத்த பொருட்கள் : {}", d.total_unique_products),
        );
        y += lh;
        left(
            &mut block,
            y,
            format!("மொத்த அளவு     : {}", format_quantity(d.total_quantity)),
        );
        y += lh;
        left(
            &mut block,
            y,
            format!("மொத்தம்        : ₹{}", format_money(d.subtotal)),
        );
        y += lh;
        left(
            &mut block,
            y,
            format!("சேமிப்பு       : ₹{}", format_money(d.total_savings)),
        );
        y += lh;
        rule(&mut block, y, '-');
        y += lh;

        // Payment
        left(
            &mut block,
            y,
            format!("செலுத்தும் முறை: {}", d.payment_type),
        );
        y += lh;
        left(
            &mut block,
            y,
            format!("பெற்றது       : ₹{}", format_money(d.cash_received)),
        );
        y += lh;
        left(
            &mut block,
            y,
            format!("திருப்பியது    : ₹{}", format_money(d.cash_balance)),
        );
        y += lh;
        rule(&mut block, y, '-');
        y += lh;

        // Footer
        center(&mut block, y, "நன்றி! மீண்டும் வாருங்கள்!", Emphasis::Bold);
        y += lh;
        rule(&mut block, y, '_');
        y += lh;

        block.height = y;
        block
    }

    /// Text-mode output: single multi-line string, trailing whitespace
    /// stripped, suitable for character-grid spooling.
    pub fn render(&self) -> String {
        let cells = CharCells::new();
        self.render_block(&cells).to_text(&cells)
    }

    /// Raster-mode output: RGB8 image sized to the laid-out document,
    /// measured and drawn with the configured font (or its fallback).
    pub fn render_image(&self, config: &RenderConfig) -> RgbImage {
        let metrics = FontMetrics::for_surface(config, config.body_px);
        let block = self.render_block(&metrics);
        let mut canvas = Canvas::new(block.width, block.height);
        canvas.draw_block(&metrics, &block);
        canvas.into_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample_doc() -> ReceiptDoc {
        ReceiptDoc {
            store: StoreHeader {
                name: "SRI VELAVAN SUPERMARKET".to_string(),
                address_line1: "2/136A, Pillaiyar Koil Street".to_string(),
                address_line2: "A.Kottarakuppam, Virudhachalam".to_string(),
                phone: "9626475471".to_string(),
                gst: "33FLEPM3791Q1ZD".to_string(),
            },
            bill_number: "INV20250101120000".to_string(),
            date: "01/01/2025".to_string(),
            time: "12:00:00".to_string(),
            customer_name: "Murugan".to_string(),
            customer_mobile: Some("9876543210".to_string()),
            items: vec![LineItem::new(
                "Perun Seeragam 100g",
                dec("2"),
                "count",
                dec("30.00"),
                dec("24.00"),
            )],
            total_unique_products: 1,
            total_quantity: dec("2"),
            subtotal: dec("48.00"),
            total_savings: dec("12.00"),
            payment_type: "Cash".to_string(),
            cash_received: dec("50.00"),
            cash_balance: dec("2.00"),
        }
    }

    #[test]
    fn test_receipt_contains_sections() {
        let doc = sample_doc();
        let r = ReceiptRenderer::new(&doc, ReceiptRenderer::DEFAULT_WIDTH);
        let text = r.render();

        assert!(text.contains("SRI VELAVAN SUPERMARKET"));
        assert!(text.contains("INV20250101120000"));
        assert!(text.contains("Murugan"));
        assert!(text.contains("48.00"));
        assert!(text.contains("நன்றி"));
    }

    #[test]
    fn test_receipt_idempotent() {
        let doc = sample_doc();
        let r = ReceiptRenderer::new(&doc, 38);
        assert_eq!(r.render(), r.render());
    }

    #[test]
    fn test_receipt_lines_have_no_trailing_whitespace() {
        let doc = sample_doc();
        let text = ReceiptRenderer::new(&doc, 38).render();
        assert!(text.lines().count() > 20);
        for line in text.lines() {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn test_walk_in_customer_omits_mobile_line() {
        let mut doc = sample_doc();
        doc.customer_mobile = None;
        doc.customer_name = "பதிவில்லா வாடிக்கையாளர்".to_string();
        let text = ReceiptRenderer::new(&doc, 38).render();
        assert!(!text.contains("மொபைல்"));
    }

    #[test]
    fn test_receipt_image_sized_by_layout() {
        let doc = sample_doc();
        let r = ReceiptRenderer::new(&doc, 456);
        let img = r.render_image(&RenderConfig::default());
        assert_eq!(img.width(), 456);
        assert!(img.height() > 0);
        assert!(img.pixels().any(|p| p.0 != [255, 255, 255]));
    }

    #[test]
    fn test_text_and_image_come_from_same_block() {
        let doc = sample_doc();
        let r = ReceiptRenderer::new(&doc, 38);
        let cells = CharCells::new();
        let block = r.render_block(&cells);
        assert_eq!(block.to_text(&cells), r.render());
    }
}
