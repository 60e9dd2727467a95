//! Column-aligned item grid
//!
//! Converts bill line items plus a set of column specs and a surface
//! width into a [`RenderedBlock`]. One engine serves both surfaces: the
//! measurement adapter decides whether widths mean character cells or
//! device pixels.

use rust_decimal::Decimal;
use tracing::warn;

use crate::block::{Alignment, Emphasis, RenderedBlock, TextRun};
use crate::measure::Measure;
use crate::wrap::wrap_to_width;

/// Column identity within the item grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnId {
    Name,
    Qty,
    Mrp,
    Rate,
    Total,
}

impl ColumnId {
    /// Printed column heading
    pub fn heading(self) -> &'static str {
        match self {
            ColumnId::Name => "பொருள்",
            ColumnId::Qty => "அளவு",
            ColumnId::Mrp => "MRP",
            ColumnId::Rate => "விலை",
            ColumnId::Total => "தொகை",
        }
    }
}

/// Column allocation as a fraction of the usable width.
///
/// `min_cells` floors the resolved width at that many filler units so a
/// numeric column always has room for its values plus a separating
/// space on narrow paper.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub id: ColumnId,
    pub weight: f32,
    pub align: Alignment,
    pub min_cells: u32,
}

impl ColumnSpec {
    /// Distribution tuned for narrow thermal paper. The name column takes
    /// half the surface because it holds variable-length bilingual text;
    /// weights sum to 1.0.
    pub fn defaults() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec {
                id: ColumnId::Name,
                weight: 0.50,
                align: Alignment::Left,
                min_cells: 0,
            },
            ColumnSpec {
                id: ColumnId::Qty,
                weight: 0.10,
                align: Alignment::Right,
                min_cells: 4,
            },
            ColumnSpec {
                id: ColumnId::Mrp,
                weight: 0.13,
                align: Alignment::Right,
                min_cells: 6,
            },
            ColumnSpec {
                id: ColumnId::Rate,
                weight: 0.13,
                align: Alignment::Right,
                min_cells: 6,
            },
            ColumnSpec {
                id: ColumnId::Total,
                weight: 0.14,
                align: Alignment::Right,
                min_cells: 6,
            },
        ]
    }
}

/// One bill line, transient per render call.
///
/// Money stays unrounded here; rounding to two decimals happens at
/// render time only.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub display_name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub mrp: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl LineItem {
    pub fn new(
        display_name: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        mrp: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            quantity,
            unit: unit.into(),
            mrp,
            unit_price,
            line_total: unit_price * quantity,
        }
    }

    /// Build from untyped upstream capture. Malformed numerics become
    /// zero so a half-broken bill still prints; the caller is expected
    /// to have validated earlier.
    pub fn from_raw(
        display_name: &str,
        quantity: &str,
        unit: &str,
        mrp: &str,
        unit_price: &str,
    ) -> Self {
        Self::new(
            display_name,
            parse_lenient(quantity, "quantity"),
            unit,
            parse_lenient(mrp, "mrp"),
            parse_lenient(unit_price, "unit_price"),
        )
    }
}

fn parse_lenient(raw: &str, field: &str) -> Decimal {
    match raw.trim().parse::<Decimal>() {
        Ok(d) => d,
        Err(_) => {
            warn!(field, raw, "malformed numeric field, rendering as zero");
            Decimal::ZERO
        }
    }
}

/// Money formatted for printing: rounded to and padded with exactly two
/// decimals.
pub fn format_money(d: Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

/// Quantity formatted for printing: integer when whole-valued, else as given.
pub fn format_quantity(d: Decimal) -> String {
    let n = d.normalize();
    if n.is_integer() {
        n.trunc().to_string()
    } else {
        n.to_string()
    }
}

/// The grid layout engine. Stateless per invocation: build one, call
/// [`render`](ItemGrid::render) once per bill with the full item list.
pub struct ItemGrid<'a> {
    measure: &'a dyn Measure,
    columns: Vec<ColumnSpec>,
    total_width: u32,
    max_name_lines: usize,
}

impl<'a> ItemGrid<'a> {
    pub fn new(measure: &'a dyn Measure, total_width: u32) -> Self {
        Self {
            measure,
            columns: ColumnSpec::defaults(),
            total_width,
            max_name_lines: 2,
        }
    }

    pub fn with_columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_max_name_lines(mut self, max_name_lines: usize) -> Self {
        self.max_name_lines = max_name_lines.max(1);
        self
    }

    /// Absolute column widths resolved from weights against the surface.
    ///
    /// Numeric columns are floored at `min_cells` filler units; the name
    /// column then takes whatever is left, so the grid always ends
    /// exactly on the surface's right edge.
    fn resolve_widths(&self) -> Vec<u32> {
        let space = self.measure.space_width().max(1);
        let mut widths: Vec<u32> = self
            .columns
            .iter()
            .map(|c| {
                let w = (c.weight * self.total_width as f32).round() as u32;
                w.max(c.min_cells * space)
            })
            .collect();

        let absorb = self
            .columns
            .iter()
            .position(|c| c.id == ColumnId::Name)
            .unwrap_or(0);
        let others: u32 = widths
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != absorb)
            .map(|(_, w)| *w)
            .sum();
        if let Some(w) = widths.get_mut(absorb) {
            *w = self.total_width.saturating_sub(others);
        }
        widths
    }

    pub fn render(&self, items: &[LineItem]) -> RenderedBlock {
        let m = self.measure;
        let lh = m.line_height();
        let widths = self.resolve_widths();

        // Right edges of each column, cumulative from the left
        let mut edges = Vec::with_capacity(widths.len());
        let mut acc = 0u32;
        for w in &widths {
            acc += w;
            edges.push(acc);
        }
        let name_width = widths.first().copied().unwrap_or(self.total_width);

        let mut block = RenderedBlock::new(self.total_width);
        let mut y = 0u32;

        self.rule(&mut block, y, '=');
        y += lh;

        // Header: name heading left, numeric headings on their right edges
        for (i, col) in self.columns.iter().enumerate() {
            let (x, emphasis) = match col.align {
                Alignment::Left => (
                    if i == 0 { 0 } else { edges[i - 1] },
                    if col.id == ColumnId::Name {
                        Emphasis::Bold
                    } else {
                        Emphasis::Regular
                    },
                ),
                _ => (edges[i], Emphasis::Regular),
            };
            block.push(TextRun {
                x,
                y,
                text: col.id.heading().to_string(),
                align: col.align,
                emphasis,
            });
        }
        y += lh;

        self.rule(&mut block, y, '=');
        y += lh;

        for item in items {
            let name_lines = wrap_to_width(&item.display_name, name_width, self.max_name_lines, m);

            for (idx, line) in name_lines.iter().enumerate() {
                if !line.is_empty() {
                    block.push(TextRun {
                        x: 0,
                        y,
                        text: line.clone(),
                        align: Alignment::Left,
                        emphasis: Emphasis::Bold,
                    });
                }

                // Numerics share the first name row; continuation rows
                // leave them blank.
                if idx == 0 {
                    for (i, col) in self.columns.iter().enumerate() {
                        let value = match col.id {
                            ColumnId::Name => continue,
                            ColumnId::Qty => format_quantity(item.quantity),
                            ColumnId::Mrp => format_money(item.mrp),
                            ColumnId::Rate => format_money(item.unit_price),
                            ColumnId::Total => format_money(item.line_total),
                        };
                        block.push(TextRun {
                            x: edges[i],
                            y,
                            text: value,
                            align: col.align,
                            emphasis: Emphasis::Regular,
                        });
                    }
                }
                y += lh;
            }

            self.rule(&mut block, y, '-');
            y += lh;
        }

        block.height = y;
        block
    }

    /// Full-width rule line. The repeat count is derived from the
    /// measured width of the fill unit, not a character constant.
    fn rule(&self, block: &mut RenderedBlock, y: u32, fill: char) {
        let unit = fill.to_string();
        let unit_w = self.measure.width(&unit).max(1);
        let count = (self.total_width / unit_w) as usize;
        block.push(TextRun {
            x: 0,
            y,
            text: unit.repeat(count),
            align: Alignment::Left,
            emphasis: Emphasis::Regular,
        });
    }
}
