//! Chart Plotter Module
//! Interactive monthly bar chart using egui_plot.

use crate::charts::ChartModel;
use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};

/// Fill applied to bars on first render.
pub const BAR_COLOR: Color32 = Color32::from_rgb(25, 25, 25);

/// Fill applied to every bar by the recolor control.
pub const RECOLOR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// Draws the interactive bar chart for the GUI.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the monthly totals as bars in the given fill.
    ///
    /// Bars with non-finite months or totals are skipped; the static
    /// renderer logs them, this path just leaves the slot empty.
    pub fn draw_bar_chart(ui: &mut egui::Ui, model: &ChartModel, fill: Color32) {
        let bars: Vec<Bar> = model
            .totals
            .iter()
            .filter(|t| t.month.is_finite() && t.total.is_finite())
            .map(|t| Bar::new(t.month, t.total).width(0.9).fill(fill))
            .collect();

        let months: Vec<f64> = model
            .band
            .domain()
            .iter()
            .copied()
            .filter(|m| m.is_finite())
            .collect();

        Plot::new("monthly_totals")
            .x_axis_label("Month")
            .y_axis_label("Total Value by Month")
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                // Only label positions that carry a bar.
                if months.iter().any(|&m| (m - mark.value).abs() < 0.25) {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }
}
