#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use eframe::egui;

mod actions;
mod app;
mod handlers;
mod logger;
mod viewer;
mod views;
mod worker;

/// Log records kept for the status bar
const MAX_LOG_ENTRIES: usize = 500;

fn main() -> anyhow::Result<()> {
    let logger = logger::AppLogger::new(MAX_LOG_ENTRIES);
    logger.clone().init().context("Failed to install logger")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_title("PDF Stamper"),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Stamper",
        options,
        Box::new(move |cc| Ok(Box::new(app::StampApp::new(cc, handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {}", e))
}
