//! Print orchestration

pub mod service;

pub use service::PrintService;
