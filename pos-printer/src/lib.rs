//! # pos-printer
//!
//! Delivery of rendered receipts and labels to physical printers -
//! low-level printing only.
//!
//! ## Scope
//!
//! This crate handles HOW to ship bytes to a device:
//! - ESC/POS command building (text and raster)
//! - Network printing (TCP port 9100)
//! - Windows raw spooling (optional)
//!
//! WHAT gets printed is `pos-layout`'s job: this crate receives already
//! laid-out text and images and never re-measures or re-wraps them. A
//! delivery failure here must not invalidate the rendered layout - the
//! caller keeps it and may retry.
//!
//! ## Example
//!
//! ```ignore
//! use pos_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! let mut builder = EscPosBuilder::new();
//! builder.center();
//! builder.line("SRI VELAVAN SUPERMARKET");
//! builder.left();
//! builder.text(&receipt_text);
//! builder.cut_feed(4);
//!
//! let printer = NetworkPrinter::new("192.168.1.50", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

mod error;
mod escpos;
mod printer;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{NetworkPrinter, Printer};

#[cfg(windows)]
pub use printer::WindowsPrinter;
