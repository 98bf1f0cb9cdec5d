//! Static Chart Renderer
//! Draws the monthly bar chart into a PNG with plotters primitives.
//!
//! Layout:
//! 1. Bars across the plot area, one band per month
//! 2. X axis with month labels at band centers, "Month" caption
//! 3. Y axis with value ticks, rotated "Total Value by Month" caption

use crate::charts::ChartModel;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing backend error: {0}")]
    Backend(String),
}

fn backend_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

/// Bar fill on first render (RGB twin of the egui color).
pub const BAR_RGB: RGBColor = RGBColor(25, 25, 25);

/// Bar fill after the recolor control fired.
pub const RECOLOR_RGB: RGBColor = RGBColor(52, 152, 219);

const TICK_LEN: i32 = 6;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart to `path` as a PNG sized to the model's layout.
    pub fn render_png(model: &ChartModel, fill: RGBColor, path: &Path) -> Result<(), RenderError> {
        let width = model.layout.width.round() as u32;
        let height = model.layout.height.round() as u32;

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend_err)?;
        Self::draw_chart(&root, model, fill)?;
        root.present().map_err(backend_err)?;

        tracing::info!(path = %path.display(), width, height, "chart exported");
        Ok(())
    }

    fn draw_chart(
        root: &DrawingArea<BitMapBackend, Shift>,
        model: &ChartModel,
        fill: RGBColor,
    ) -> Result<(), RenderError> {
        let layout = &model.layout;
        let left = layout.plot_left() as i32;
        let right = layout.plot_right() as i32;
        let top = layout.plot_top() as i32;
        let bottom = layout.plot_bottom() as i32;

        // Bars
        for bar in &model.bars {
            if !(bar.x.is_finite() && bar.y.is_finite() && bar.height.is_finite()) {
                tracing::warn!(
                    month = bar.month,
                    total = bar.total,
                    "skipping bar with non-finite geometry"
                );
                continue;
            }
            root.draw(&Rectangle::new(
                [
                    (bar.x as i32, bar.y as i32),
                    ((bar.x + bar.width) as i32, (bar.y + bar.height) as i32),
                ],
                fill.filled(),
            ))
            .map_err(backend_err)?;
        }

        // Axis lines
        root.draw(&PathElement::new(vec![(left, bottom), (right, bottom)], BLACK.stroke_width(1)))
            .map_err(backend_err)?;
        root.draw(&PathElement::new(vec![(left, top), (left, bottom)], BLACK.stroke_width(1)))
            .map_err(backend_err)?;

        let tick_font = ("sans-serif", 14).into_font();
        let y_label_style = TextStyle::from(tick_font.clone())
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        let x_label_style = TextStyle::from(tick_font)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));

        // Y ticks and labels
        for value in model.linear.ticks(8) {
            let y = model.linear.map(value) as i32;
            root.draw(&PathElement::new(vec![(left - TICK_LEN, y), (left, y)], BLACK.stroke_width(1)))
                .map_err(backend_err)?;
            root.draw(&Text::new(
                format!("{:.0}", value),
                (left - TICK_LEN - 4, y),
                y_label_style.clone(),
            ))
            .map_err(backend_err)?;
        }

        // X ticks and month labels at band centers
        for (month, center) in model.band.band_centers() {
            if !month.is_finite() {
                continue;
            }
            let x = center as i32;
            root.draw(&PathElement::new(
                vec![(x, bottom), (x, bottom + TICK_LEN)],
                BLACK.stroke_width(1),
            ))
            .map_err(backend_err)?;
            root.draw(&Text::new(
                format!("{:.0}", month),
                (x, bottom + TICK_LEN + 4),
                x_label_style.clone(),
            ))
            .map_err(backend_err)?;
        }

        // Axis captions
        let caption_style = TextStyle::from(("sans-serif", 18).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            "Month",
            (
                (layout.width / 2.0) as i32,
                (layout.height - layout.margins.bottom / 2.0) as i32,
            ),
            caption_style,
        ))
        .map_err(backend_err)?;

        let rotated_style = TextStyle::from(
            ("sans-serif", 18)
                .into_font()
                .transform(FontTransform::Rotate270),
        )
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            "Total Value by Month",
            (
                (layout.margins.left / 2.0) as i32,
                (layout.height / 2.0) as i32,
            ),
            rotated_style,
        ))
        .map_err(backend_err)?;

        Ok(())
    }
}
