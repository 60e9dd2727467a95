//! Cross-cutting infrastructure: errors, logging, validation

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult, ok};
