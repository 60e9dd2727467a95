//! Logging Infrastructure
//!
//! Structured logging with a pretty console in development and JSON in
//! production, plus optional daily-rotating file logs under the work
//! directory. Library crates only emit `tracing` events; this is the
//! single place a subscriber gets installed.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Initialize the logging system.
///
/// # Arguments
/// * `level` - default log level when RUST_LOG is unset
/// * `json_format` - JSON output (production) vs pretty (development)
/// * `log_dir` - optional directory for a daily-rotating app log
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            fs::create_dir_all(Path::new(dir))?;
            let app_log = RollingFileAppender::new(Rotation::DAILY, dir, "app");
            let file_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(app_log));
            subscriber.with(console_layer).with(file_layer).init();
        } else {
            subscriber.with(console_layer).init();
        }
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            fs::create_dir_all(Path::new(dir))?;
            let app_log = RollingFileAppender::new(Rotation::DAILY, dir, "app");
            let file_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log));
            subscriber.with(console_layer).with(file_layer).init();
        } else {
            subscriber.with(console_layer).init();
        }
    }

    Ok(())
}
