//! # pos-server
//!
//! HTTP service tying the POS toolset together: SQLite persistence for
//! products, customers and bills; receipt rendering and label
//! composition through `pos-layout`; best-effort delivery through
//! `pos-printer`.
//!
//! Printing never gates persistence: a bill or label record is durable
//! before any printer is touched, and a failed print is reported back
//! to the till rather than discarding the record.

pub mod api;
pub mod common;
pub mod core;
pub mod db;
pub mod printing;

// Re-exports
pub use common::{AppError, AppResponse, AppResult};
pub use core::{Config, Server, ServerState};

/// Load `.env` and initialize logging. Call once at startup.
pub fn setup_environment() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let json = std::env::var("ENVIRONMENT").as_deref() == Ok("production");
    let log_dir = std::env::var("LOG_DIR").ok();

    common::logger::init_logger(&level, json, log_dir.as_deref())
}
