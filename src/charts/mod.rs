//! Charts module - Chart rendering

mod palette;
mod plotter;
mod renderer;

pub use palette::{approval_rgb, party_rgb, APPROVAL_COLORS, PARTY_COLORS};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChart, StaticChartRenderer};
