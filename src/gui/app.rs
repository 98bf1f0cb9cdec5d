//! FiberChart Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{layout_bars, StaticChartRenderer, BAR_RGB, RECOLOR_RGB};
use crate::data::{extract_records, DataLoader, TradeRecord};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, UserSettings, SETTINGS_FILE};
use crate::pipeline::monthly_totals;
use egui::SidePanel;
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        df: DataFrame,
        records: Vec<TradeRecord>,
        path: PathBuf,
    },
    Error(String),
}

/// Main application window.
pub struct FiberChartApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl FiberChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.settings = UserSettings::load_or_default(Path::new(SETTINGS_FILE));

        Self {
            loader: DataLoader::new(),
            control_panel,
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle CSV file selection.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Kick off the one asynchronous boundary: load and parse the CSV on
    /// a background thread, then hand the full dataset over once.
    fn start_load(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.control_panel.chart_ready = false;
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_progress(0.0, "Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            let result = DataLoader::read_trade_csv(&path.to_string_lossy())
                .map_err(anyhow::Error::from)
                .and_then(|df| {
                    let records = extract_records(&df)?;
                    Ok((df, records))
                });

            match result {
                Ok((df, records)) => {
                    tracing::info!(rows = records.len(), path = %path.display(), "trade CSV loaded");
                    let _ = tx.send(LoadResult::Complete { df, records, path });
                }
                Err(e) => {
                    tracing::error!(error = %e, path = %path.display(), "CSV load failed");
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(0.0, &status);
                    }
                    LoadResult::Complete { df, records, path } => {
                        let row_count = records.len();
                        self.loader.set_dataset(df, records, path);

                        let mut fiber_types = self.loader.get_unique_values("fiber_type");
                        fiber_types.sort();
                        let mut years: Vec<f64> = self
                            .loader
                            .get_unique_values("year")
                            .iter()
                            .filter_map(|y| y.parse().ok())
                            .collect();
                        years.sort_by(f64::total_cmp);
                        self.control_panel.update_filter_choices(fiber_types, years);

                        self.control_panel
                            .set_progress(50.0, &format!("Loaded {} rows", row_count));
                        self.is_loading = false;
                        should_keep_receiver = false;

                        // First chart draws immediately after the load.
                        self.build_chart();
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Run the synchronous pipeline pass: filter, rollup, layout.
    fn build_chart(&mut self) {
        let filter = self.control_panel.settings.filter.clone();
        let filtered = filter.apply(self.loader.records());
        let totals = monthly_totals(&filtered);
        tracing::info!(
            records = filtered.len(),
            groups = totals.len(),
            fiber_type = %filter.fiber_type,
            direction = filter.direction.label(),
            year = filter.year,
            "pipeline pass complete"
        );

        match layout_bars(&totals, &self.control_panel.settings.layout) {
            Ok(model) => {
                let months = model.bars.len();
                self.chart_viewer.set_model(model);
                self.control_panel.chart_ready = true;
                self.control_panel
                    .set_progress(100.0, &format!("Chart ready: {} months", months));
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    /// Handle PNG export - render the current chart to a chosen path.
    fn handle_export_png(&mut self) {
        let Some(model) = self.chart_viewer.model() else {
            self.control_panel.set_progress(0.0, "No chart to export");
            return;
        };

        // Ask user for output location
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("fiber_trade_chart.png")
            .save_file()
        else {
            return; // User cancelled
        };

        let fill = if self.chart_viewer.is_recolored() {
            RECOLOR_RGB
        } else {
            BAR_RGB
        };

        match StaticChartRenderer::render_png(model, fill, &path) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, &format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    tracing::warn!(error = %e, "could not open exported chart");
                }
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for FiberChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::BuildChart => {
                            if !self.is_loading {
                                self.build_chart();
                            }
                        }
                        ControlPanelAction::RecolorBars => self.chart_viewer.recolor(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
