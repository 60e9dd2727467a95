//! Server configuration
//!
//! All settings come from environment variables with working defaults:
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | Database and log directory |
//! | HTTP_PORT | 5000 | HTTP API port |
//! | DATABASE_PATH | <WORK_DIR>/pos.db | SQLite file |
//! | STORE_NAME / STORE_ADDRESS1 / STORE_ADDRESS2 / STORE_PHONE / STORE_GST | Sri Velavan defaults | Receipt/label header |
//! | RECEIPT_WIDTH | 38 | Receipt width in characters |
//! | RECEIPT_PRINTER_ADDR | unset | Network receipt printer (host:port) |
//! | RECEIPT_PRINTER_NAME | unset | Windows receipt printer name |
//! | LABEL_PRINTER_ADDR | unset | Network label printer (host:port) |
//! | LABEL_PRINTER_NAME | unset | Windows label printer name |
//! | LABEL_FONT_PATH | unset | TTF for glyph-accurate label text |
//! | LABEL_WIDTH_MM / LABEL_HEIGHT_MM | 40 / 25 | Label geometry |
//! | LABEL_DPI | 203 | Printer resolution |
//! | LABELS_PER_ROW | 3 | Sheet columns |
//! | LABEL_MARGIN_MM / LABEL_SPACING_MM | 5 / 2 | Sheet margins and gaps |
//! | LABEL_OFFSET_X / LABEL_OFFSET_Y | 0 / 0 | Sheet calibration offset (px) |

use pos_layout::{LabelSpec, RenderConfig};
use shared::models::StoreInfo;

#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub database_path: String,
    pub environment: String,

    pub store: StoreInfo,
    pub receipt_width: u32,

    pub receipt_printer_addr: Option<String>,
    pub receipt_printer_name: Option<String>,
    pub label_printer_addr: Option<String>,
    pub label_printer_name: Option<String>,

    pub font_path: Option<String>,
    pub label_width_mm: f32,
    pub label_height_mm: f32,
    pub label_dpi: f32,
    pub labels_per_row: u32,
    pub label_margin_mm: f32,
    pub label_spacing_mm: f32,
    pub label_offset_px: (i64, i64),
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| format!("{}/pos.db", work_dir));

        let defaults = StoreInfo::default();
        let store = StoreInfo {
            name: std::env::var("STORE_NAME").unwrap_or(defaults.name),
            address_line1: std::env::var("STORE_ADDRESS1").unwrap_or(defaults.address_line1),
            address_line2: std::env::var("STORE_ADDRESS2").unwrap_or(defaults.address_line2),
            phone: std::env::var("STORE_PHONE").unwrap_or(defaults.phone),
            gst: std::env::var("STORE_GST").unwrap_or(defaults.gst),
        };

        Self {
            work_dir,
            http_port: env_or("HTTP_PORT", 5000),
            database_path,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            store,
            receipt_width: env_or("RECEIPT_WIDTH", 38),
            receipt_printer_addr: env_opt("RECEIPT_PRINTER_ADDR"),
            receipt_printer_name: env_opt("RECEIPT_PRINTER_NAME"),
            label_printer_addr: env_opt("LABEL_PRINTER_ADDR"),
            label_printer_name: env_opt("LABEL_PRINTER_NAME"),
            font_path: env_opt("LABEL_FONT_PATH"),
            label_width_mm: env_or("LABEL_WIDTH_MM", 40.0),
            label_height_mm: env_or("LABEL_HEIGHT_MM", 25.0),
            label_dpi: env_or("LABEL_DPI", 203.0),
            labels_per_row: env_or("LABELS_PER_ROW", 3),
            label_margin_mm: env_or("LABEL_MARGIN_MM", 5.0),
            label_spacing_mm: env_or("LABEL_SPACING_MM", 2.0),
            label_offset_px: (env_or("LABEL_OFFSET_X", 0), env_or("LABEL_OFFSET_Y", 0)),
        }
    }

    /// Override work dir, port and database for tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = format!("{}/pos.db", config.work_dir);
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Label geometry for the composer.
    pub fn label_spec(&self) -> LabelSpec {
        LabelSpec {
            width_mm: self.label_width_mm,
            height_mm: self.label_height_mm,
            dpi: self.label_dpi,
            columns: self.labels_per_row,
            page_margin_mm: self.label_margin_mm,
            spacing_mm: self.label_spacing_mm,
            offset_px: self.label_offset_px,
        }
    }

    /// Font configuration for raster rendering.
    pub fn render_config(&self) -> RenderConfig {
        match &self.font_path {
            Some(path) => RenderConfig::with_font(path),
            None => RenderConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
