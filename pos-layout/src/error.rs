//! Error types for the layout engine

use thiserror::Error;

/// Layout error types
///
/// Measurement never fails - adapters degrade to character cells instead.
/// These errors cover raster composition only.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Font file missing or unparsable
    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    /// Barcode data rejected by the symbology encoder
    #[error("Barcode encoding failed: {0}")]
    Barcode(String),

    /// Impossible geometry (zero-sized label, zero count, ...)
    #[error("Invalid layout spec: {0}")]
    InvalidSpec(String),
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
