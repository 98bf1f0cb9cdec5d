//! FiberChart - US Textile Fiber Trade CSV Analysis & Bar Chart Viewer
//!
//! A Rust application for exploring US textile fiber trade data as a monthly
//! bar chart.

mod charts;
mod data;
mod gui;
mod pipeline;

use eframe::egui;
use gui::FiberChartApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("FiberChart"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "FiberChart",
        options,
        Box::new(|cc| Ok(Box::new(FiberChartApp::new(cc)))),
    )
}
