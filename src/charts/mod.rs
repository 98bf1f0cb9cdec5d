//! Charts module - scales, bar geometry, and rendering

mod geometry;
mod plotter;
mod renderer;
mod scale;

pub use geometry::{layout_bars, BarGeometry, ChartError, ChartLayout, ChartModel, Margins};
pub use plotter::{ChartPlotter, BAR_COLOR, RECOLOR_COLOR};
pub use renderer::{RenderError, StaticChartRenderer, BAR_RGB, RECOLOR_RGB};
pub use scale::{BandScale, LinearScale};
