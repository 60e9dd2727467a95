//! Shared types for the POS toolset
//!
//! Domain models and small utilities used by the server, the layout
//! engine adapters, and tests. DB row types derive `sqlx::FromRow`
//! behind the `db` feature so non-database consumers stay lean.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
