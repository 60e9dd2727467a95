//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness and printer reachability
//! - [`products`] - product catalog CRUD and barcode lookup
//! - [`customers`] - customer records keyed by mobile
//! - [`bills`] - bill creation, lookup, transaction reports
//! - [`labels`] - label preview (PNG) and sheet printing

pub mod bills;
pub mod customers;
pub mod health;
pub mod labels;
pub mod products;

// Re-export common types for handlers
pub use crate::common::{AppError, AppResult};
