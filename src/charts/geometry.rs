//! Bar Geometry
//! Lays monthly totals out as pixel rectangles for the renderers.

use crate::charts::scale::{BandScale, LinearScale, DEFAULT_BAND_PADDING};
use crate::pipeline::MonthlyTotal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ChartError {
    #[error("month {0} is outside the band domain")]
    MonthOutsideDomain(f64),
    #[error("margins leave no plot area inside a {width}x{height} canvas")]
    EmptyPlotArea { width: f64, height: f64 },
}

/// Margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            left: 150.0,
            right: 50.0,
            bottom: 150.0,
        }
    }
}

/// Fixed-size drawing surface with margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub band_padding: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 620.0,
            margins: Margins::default(),
            band_padding: DEFAULT_BAND_PADDING,
        }
    }
}

impl ChartLayout {
    pub fn plot_left(&self) -> f64 {
        self.margins.left
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.margins.right
    }

    pub fn plot_top(&self) -> f64 {
        self.margins.top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.margins.bottom
    }
}

/// One bar of the chart, in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub month: f64,
    pub total: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A fully laid-out chart: bars plus both scales for axis drawing.
#[derive(Debug, Clone)]
pub struct ChartModel {
    pub layout: ChartLayout,
    pub totals: Vec<MonthlyTotal>,
    pub band: BandScale,
    pub linear: LinearScale,
    pub bars: Vec<BarGeometry>,
}

/// Sort totals chronologically, build both scales, and derive per-bar
/// geometry. Empty totals produce an empty bar list over degenerate but
/// drawable scales.
pub fn layout_bars(
    totals: &[MonthlyTotal],
    layout: &ChartLayout,
) -> Result<ChartModel, ChartError> {
    if layout.plot_right() <= layout.plot_left() || layout.plot_bottom() <= layout.plot_top() {
        return Err(ChartError::EmptyPlotArea {
            width: layout.width,
            height: layout.height,
        });
    }

    // Bars render in chronological order regardless of the order the
    // aggregator encountered them; non-finite months sort last.
    let mut totals = totals.to_vec();
    totals.sort_by(|a, b| a.month.total_cmp(&b.month));

    let band = BandScale::new(
        totals.iter().map(|t| t.month).collect(),
        layout.plot_left(),
        layout.plot_right(),
        layout.band_padding,
    );

    let max_total = totals.iter().map(|t| t.total).fold(0.0, f64::max);
    let linear = LinearScale::new((0.0, max_total), (layout.plot_bottom(), layout.plot_top()));

    let mut bars = Vec::with_capacity(totals.len());
    for t in &totals {
        let x = band
            .position(t.month)
            .ok_or(ChartError::MonthOutsideDomain(t.month))?;
        let y = linear.map(t.total);
        bars.push(BarGeometry {
            month: t.month,
            total: t.total,
            x,
            y,
            width: band.bandwidth(),
            height: layout.plot_bottom() - y,
        });
    }

    Ok(ChartModel {
        layout: *layout,
        totals,
        band,
        linear,
        bars,
    })
}
