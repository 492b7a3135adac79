//! Bar chart rendering for star series.
//!
//! Plotters draws the axes, bars and caption into an SVG document. An overlay
//! group then adds what plotters cannot express: per-bar hover tooltips and
//! clickable tick labels rotated 45 degrees. The result can be opened in a
//! browser or exported as `.svg` / `.html`.

pub mod error;
pub mod page;
pub mod render;
pub mod viewer;

pub use error::{ChartError, Result};
pub use render::{chart_title, BarGeometry, ChartOptions, ChartRenderer, RenderedChart};
pub use viewer::{ExportFormat, OutputMode};
