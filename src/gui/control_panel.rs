//! Control Panel Widget
//! Left side panel with data source, filter settings, and chart actions.

use crate::charts::ChartLayout;
use crate::data::TradeDirection;
use crate::pipeline::FilterSpec;
use egui::{Color32, ComboBox, RichText};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory at startup.
pub const SETTINGS_FILE: &str = "fiberchart.json";

/// User settings for one charting session.
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub filter: FilterSpec,
    pub layout: ChartLayout,
}

impl UserSettings {
    /// Load settings from a JSON file, falling back to defaults when the
    /// file is absent or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => {
                    tracing::info!(path = %path.display(), "settings loaded");
                    settings
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

/// Left side control panel with file selection and chart controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub fiber_types: Vec<String>,
    pub years: Vec<f64>,
    pub progress: f32,
    pub status: String,
    pub build_enabled: bool,
    pub chart_ready: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            fiber_types: Vec::new(),
            years: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
            build_enabled: false,
            chart_ready: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the filter choices after a CSV load. The configured
    /// selection is kept when the new data still offers it.
    pub fn update_filter_choices(&mut self, fiber_types: Vec<String>, years: Vec<f64>) {
        if !fiber_types.contains(&self.settings.filter.fiber_type) {
            if let Some(first) = fiber_types.first() {
                self.settings.filter.fiber_type = first.clone();
            }
        }
        if !years.contains(&self.settings.filter.year) {
            if let Some(&first) = years.first() {
                self.settings.filter.year = first;
            }
        }
        self.fiber_types = fiber_types;
        self.years = years;
        self.build_enabled = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 FiberChart")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("US Textile Fiber Trade")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("🔧 Filter").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 90.0;
        let combo_width = 150.0;

        // Fiber type - aligned
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Fiber Type:"));
            ComboBox::from_id_salt("fiber_type")
                .width(combo_width)
                .selected_text(&self.settings.filter.fiber_type)
                .show_ui(ui, |ui| {
                    for fiber in &self.fiber_types {
                        if ui
                            .selectable_label(self.settings.filter.fiber_type == *fiber, fiber)
                            .clicked()
                        {
                            self.settings.filter.fiber_type = fiber.clone();
                        }
                    }
                });
        });

        ui.add_space(5.0);

        // Direction - aligned
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Direction:"));
            ComboBox::from_id_salt("direction")
                .width(combo_width)
                .selected_text(self.settings.filter.direction.label())
                .show_ui(ui, |ui| {
                    for direction in [TradeDirection::Import, TradeDirection::Export] {
                        if ui
                            .selectable_label(
                                self.settings.filter.direction == direction,
                                direction.label(),
                            )
                            .clicked()
                        {
                            self.settings.filter.direction = direction;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        // Year - aligned
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Year:"));
            ComboBox::from_id_salt("year")
                .width(combo_width)
                .selected_text(format!("{:.0}", self.settings.filter.year))
                .show_ui(ui, |ui| {
                    for &year in &self.years {
                        if ui
                            .selectable_label(
                                self.settings.filter.year == year,
                                format!("{:.0}", year),
                            )
                            .clicked()
                        {
                            self.settings.filter.year = year;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.build_enabled, |ui| {
                let button = egui::Button::new(RichText::new("▶ Build Chart").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::BuildChart;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.chart_ready, |ui| {
                let button = egui::Button::new(RichText::new("🎨 Recolor Bars").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::RecolorBars;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.chart_ready, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("ready") || self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    BuildChart,
    RecolorBars,
    ExportPng,
}
