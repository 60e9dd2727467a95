//! Best-effort print delivery
//!
//! Wraps rendered output in ESC/POS jobs and ships them to whichever
//! printer the config names: a network printer when an address is set,
//! the Windows spooler otherwise. Callers treat every failure here as
//! reportable-but-nonfatal - the record was persisted before printing
//! started.

use std::sync::Arc;

use image::RgbImage;
use pos_printer::{EscPosBuilder, NetworkPrinter, PrintError, PrintResult, Printer};
use tracing::{info, instrument};

use crate::core::Config;

pub struct PrintService {
    config: Arc<Config>,
}

impl PrintService {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Spool a rendered receipt as an ESC/POS text job.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn print_receipt(&self, text: &str) -> PrintResult<()> {
        let mut builder = EscPosBuilder::new();
        builder.left();
        builder.text(text);
        builder.newline();
        builder.cut_feed(4);

        self.deliver(
            builder.build(),
            self.config.receipt_printer_addr.as_deref(),
            self.config.receipt_printer_name.as_deref(),
        )
        .await
    }

    /// Spool a composed label sheet as an ESC/POS raster job.
    #[instrument(skip(self, sheet), fields(w = sheet.width(), h = sheet.height()))]
    pub async fn print_label_sheet(&self, sheet: &RgbImage) -> PrintResult<()> {
        let mut builder = EscPosBuilder::new();
        builder.raster(sheet, sheet.width());
        builder.feed(2);

        self.deliver(
            builder.build(),
            self.config.label_printer_addr.as_deref(),
            self.config.label_printer_name.as_deref(),
        )
        .await
    }

    /// Reachability of the configured receipt printer, for health checks.
    pub async fn receipt_printer_online(&self) -> Option<bool> {
        let addr = self.config.receipt_printer_addr.as_deref()?;
        let printer = NetworkPrinter::from_addr(addr).ok()?;
        Some(printer.is_online().await)
    }

    /// Printers that could take a job right now - surfaced in error
    /// payloads so the operator can fix the configured name.
    pub fn available_printers(&self) -> Vec<String> {
        #[cfg(windows)]
        {
            pos_printer::WindowsPrinter::list().unwrap_or_default()
        }
        #[cfg(not(windows))]
        {
            [&self.config.receipt_printer_addr, &self.config.label_printer_addr]
                .into_iter()
                .flatten()
                .cloned()
                .collect()
        }
    }

    async fn deliver(
        &self,
        data: Vec<u8>,
        addr: Option<&str>,
        driver_name: Option<&str>,
    ) -> PrintResult<()> {
        if let Some(addr) = addr {
            let printer = NetworkPrinter::from_addr(addr)?;
            printer.print(&data).await?;
            info!(addr, "job delivered over network");
            return Ok(());
        }

        #[cfg(windows)]
        {
            let resolved = pos_printer::WindowsPrinter::resolve(driver_name)?;
            pos_printer::WindowsPrinter::new(&resolved).print(&data).await?;
            info!(printer = %resolved, "job spooled to driver");
            Ok(())
        }
        #[cfg(not(windows))]
        {
            let _ = driver_name;
            Err(PrintError::Unsupported(
                "no network printer configured and driver spooling requires Windows".into(),
            ))
        }
    }
}
