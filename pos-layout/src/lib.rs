//! # pos-layout
//!
//! Layout engine for thermal receipts and barcode labels - pure
//! computation, no device I/O.
//!
//! ## Scope
//!
//! This crate decides WHERE things go on a print surface:
//! - Surface measurement (character cells or real glyph advances)
//! - Column-aligned item grids with wrap/truncate/pad
//! - Receipt documents rendered to plain text
//! - Label/sheet composition rendered to RGB images
//!
//! Sending the result to a physical printer is `pos-printer`'s job; a
//! layout is always returned to the caller even when delivery later
//! fails, so callers can retry with the same rendered block.
//!
//! ## Example
//!
//! ```ignore
//! use pos_layout::{CharCells, ItemGrid, LineItem};
//!
//! let items = vec![LineItem::from_raw("Perun Seeragam 100g", "2", "count", "30", "24")];
//! let cells = CharCells::new();
//! let grid = ItemGrid::new(&cells, 38);
//! let text = grid.render(&items).to_text(&cells);
//! ```

mod block;
mod config;
mod error;
mod grid;
mod label;
mod measure;
mod raster;
mod receipt;
mod wrap;

// Re-exports
pub use block::{Alignment, Emphasis, RenderedBlock, TextRun};
pub use config::RenderConfig;
pub use error::{LayoutError, LayoutResult};
pub use grid::{ColumnId, ColumnSpec, ItemGrid, LineItem, format_money, format_quantity};
pub use label::{LabelComposer, LabelItem, LabelSpec, barcode_image};
pub use measure::{CharCells, FontMetrics, Measure, WrapUnit};
pub use raster::Canvas;
pub use receipt::{ReceiptDoc, ReceiptRenderer, StoreHeader};
pub use wrap::{ELLIPSIS, ellipsize, wrap_to_width};
