//! Line chart geometry with a filled area underneath.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fmt_coord;
use crate::models::ChartPoint;

/// View box and inner padding for a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for LineChartLayout {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 120.0,
            padding: 20.0,
        }
    }
}

/// A series point placed in chart space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Paths and coordinates for one line chart.
///
/// An empty geometry (see [`LineChartGeometry::is_empty`]) means there was
/// nothing drawable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineChartGeometry {
    /// `M x0,y0 L x1,y1 ...` through every point in order.
    pub line_path: String,
    /// The line closed down to the baseline at both ends, for a gradient fill.
    pub area_path: String,
    pub points: Vec<PlotPoint>,
}

impl LineChartGeometry {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Lays out `series` inside a `width` × `height` box.
///
/// Point `i` of `n` sits at `padding + i / (n - 1) * (width - 2 * padding)`.
/// Values map linearly from `[min, max]` onto `[height - padding, padding]`
/// (y grows downward). A flat series is drawn on the vertical midline.
///
/// Fewer than two points, or any non-finite value or dimension, yields an
/// empty geometry.
///
/// # Example
///
/// ```
/// use labor_core::charts::build_line_chart;
/// use labor_core::models::ChartPoint;
///
/// let series = vec![ChartPoint::new("a", 0.0), ChartPoint::new("b", 10.0)];
/// let geometry = build_line_chart(&series, 300.0, 120.0, 20.0);
///
/// assert_eq!(geometry.line_path, "M 20,100 L 280,20");
/// ```
pub fn build_line_chart(
    series: &[ChartPoint],
    width: f64,
    height: f64,
    padding: f64,
) -> LineChartGeometry {
    let dimensions_ok = [width, height, padding].iter().all(|d| d.is_finite());
    if series.len() < 2 || !dimensions_ok || series.iter().any(|p| !p.value.is_finite()) {
        debug!(points = series.len(), "line chart input is degenerate; drawing nothing");
        return LineChartGeometry::default();
    }

    let (min, max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
    let range = max - min;
    let baseline = height - padding;
    let plot_width = width - 2.0 * padding;
    let plot_height = height - 2.0 * padding;
    let last_index = (series.len() - 1) as f64;

    let points: Vec<PlotPoint> = series
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let x = padding + (idx as f64 / last_index) * plot_width;
            let y = if range == 0.0 {
                height / 2.0
            } else {
                baseline - ((point.value - min) / range) * plot_height
            };
            PlotPoint {
                label: point.label.clone(),
                value: point.value,
                x,
                y,
            }
        })
        .collect();

    let joined = points
        .iter()
        .map(|p| format!("{},{}", fmt_coord(p.x), fmt_coord(p.y)))
        .collect::<Vec<_>>()
        .join(" L ");

    let line_path = format!("M {joined}");
    let area_path = format!(
        "M {left},{base} L {joined} L {right},{base} Z",
        left = fmt_coord(padding),
        right = fmt_coord(width - padding),
        base = fmt_coord(baseline),
    );

    LineChartGeometry {
        line_path,
        area_path,
        points,
    }
}

/// [`build_line_chart`] with a [`LineChartLayout`].
pub fn build_line_chart_with(
    series: &[ChartPoint],
    layout: LineChartLayout,
) -> LineChartGeometry {
    build_line_chart(series, layout.width, layout.height, layout.padding)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn series(values: &[f64]) -> Vec<ChartPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartPoint::new(format!("p{i}"), *v))
            .collect()
    }

    #[test]
    fn two_points_span_the_plot_area() {
        let geometry = build_line_chart(&series(&[0.0, 10.0]), 300.0, 120.0, 20.0);

        assert_eq!(geometry.line_path, "M 20,100 L 280,20");
        assert_eq!(geometry.area_path, "M 20,100 L 20,100 L 280,20 L 280,100 Z");
    }

    #[test]
    fn x_coordinates_are_evenly_spaced() {
        let geometry = build_line_chart(&series(&[1.0, 3.0, 2.0, 5.0, 4.0]), 300.0, 120.0, 20.0);
        let xs: Vec<f64> = geometry.points.iter().map(|p| p.x).collect();

        assert_eq!(xs, vec![20.0, 85.0, 150.0, 215.0, 280.0]);
    }

    #[test]
    fn y_axis_is_inverted() {
        let geometry = build_line_chart(&series(&[15.0, 20.0, 25.0]), 300.0, 120.0, 20.0);
        let ys: Vec<f64> = geometry.points.iter().map(|p| p.y).collect();

        assert_eq!(ys, vec![100.0, 60.0, 20.0]);
    }

    #[test]
    fn negative_values_are_allowed() {
        let geometry = build_line_chart(&series(&[-10.0, 10.0]), 300.0, 120.0, 20.0);

        assert_eq!(geometry.points[0].y, 100.0);
        assert_eq!(geometry.points[1].y, 20.0);
    }

    #[test]
    fn flat_series_sits_on_midline() {
        let geometry = build_line_chart(&series(&[5.0, 5.0, 5.0]), 300.0, 120.0, 20.0);

        assert_eq!(geometry.line_path, "M 20,60 L 150,60 L 280,60");
        assert!(geometry.points.iter().all(|p| p.y == 60.0));
    }

    #[test]
    fn fractional_coordinates_are_trimmed() {
        let geometry = build_line_chart(&series(&[0.0, 1.0, 0.0, 1.0]), 300.0, 120.0, 20.0);

        assert_eq!(
            geometry.line_path,
            "M 20,100 L 106.667,20 L 193.333,100 L 280,20"
        );
    }

    #[test]
    fn single_point_is_degenerate() {
        let geometry = build_line_chart(&series(&[42.0]), 300.0, 120.0, 20.0);

        assert!(geometry.is_empty());
        assert_eq!(geometry.line_path, "");
        assert_eq!(geometry.area_path, "");
    }

    #[test]
    fn empty_series_is_degenerate() {
        assert!(build_line_chart(&[], 300.0, 120.0, 20.0).is_empty());
    }

    #[test]
    fn non_finite_value_is_degenerate() {
        let geometry = build_line_chart(&series(&[1.0, f64::NAN]), 300.0, 120.0, 20.0);

        assert!(geometry.is_empty());
    }

    #[test]
    fn layout_default_matches_result_view() {
        let geometry = build_line_chart_with(&series(&[0.0, 10.0]), LineChartLayout::default());

        assert_eq!(geometry.line_path, "M 20,100 L 280,20");
    }

    #[test]
    fn labels_and_values_follow_input_order() {
        let geometry = build_line_chart(&series(&[3.0, 1.0]), 300.0, 120.0, 20.0);
        let labels: Vec<&str> = geometry.points.iter().map(|p| p.label.as_str()).collect();

        assert_eq!(labels, vec!["p0", "p1"]);
        assert_eq!(geometry.points[0].value, 3.0);
    }
}
