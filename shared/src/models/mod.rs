//! Data models
//!
//! Shared between pos-server and its API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Money fields are stored as SQLite REAL and only rounded at render time.

pub mod bill;
pub mod customer;
pub mod product;
pub mod store_info;

// Re-exports
pub use bill::*;
pub use customer::*;
pub use product::*;
pub use store_info::*;
