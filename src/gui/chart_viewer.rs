//! Chart Viewer Widget
//! Central panel that owns the built chart model and its current bar fill.

use crate::charts::{ChartModel, ChartPlotter, BAR_COLOR, RECOLOR_COLOR};
use egui::{Color32, RichText};

/// Displays the monthly bar chart and carries the "last applied fill".
///
/// The model and fill live here and are handed to the draw call, so the
/// recolor handler works on explicit state instead of ambient chart
/// handles.
pub struct ChartViewer {
    model: Option<ChartModel>,
    bar_fill: Color32,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            model: None,
            bar_fill: BAR_COLOR,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the current chart.
    pub fn clear(&mut self) {
        self.model = None;
        self.bar_fill = BAR_COLOR;
    }

    /// Install a freshly built chart; the fill starts over.
    pub fn set_model(&mut self, model: ChartModel) {
        self.model = Some(model);
        self.bar_fill = BAR_COLOR;
    }

    pub fn model(&self) -> Option<&ChartModel> {
        self.model.as_ref()
    }

    /// Recolor every bar to the fixed alternate color. One-way; there is
    /// no toggle back.
    pub fn recolor(&mut self) {
        if self.model.is_some() {
            self.bar_fill = RECOLOR_COLOR;
        }
    }

    pub fn is_recolored(&self) -> bool {
        self.bar_fill == RECOLOR_COLOR
    }

    /// Draw the chart, or a placeholder before the first load.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(model) = &self.model else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        if model.bars.is_empty() {
            ui.label(
                RichText::new("No records match the current filter")
                    .size(13.0)
                    .color(Color32::GRAY),
            );
        }
        ChartPlotter::draw_bar_chart(ui, model, self.bar_fill);
    }
}
