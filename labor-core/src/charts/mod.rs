//! Chart geometry for the result views.
//!
//! The builders are pure: they turn a [`ChartSeries`](crate::models::ChartSeries)
//! into SVG path strings and coordinates and keep nothing between calls.
//! Degenerate input (too few points, a zero total, non-finite values)
//! produces an empty geometry instead of an error.

pub mod line;
pub mod pie;
pub mod series;

pub use line::{
    LineChartGeometry, LineChartLayout, PlotPoint, build_line_chart, build_line_chart_with,
};
pub use pie::{PieSegment, build_pie_chart};
pub use series::{ChartSet, chart_set};

/// Formats an SVG coordinate with at most three decimals.
///
/// Trailing zeros are trimmed and negative zero prints as `0`.
pub(crate) fn fmt_coord(value: f64) -> String {
    let text = format!("{value:.3}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
