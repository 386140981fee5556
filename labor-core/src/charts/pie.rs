//! Pie chart geometry.
//!
//! Segments start at 0° (the positive x axis) and run clockwise in screen
//! space, since SVG y grows downward. Each segment is a wedge from the center
//! out to its two boundary points joined by an arc.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::fmt_coord;
use crate::models::ChartPoint;

const FULL_TURN: f64 = 360.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSegment {
    pub label: String,
    pub value: f64,
    /// Share of the total in percent, rounded to one decimal.
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub arc_path: String,
}

impl PieSegment {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Splits a circle of `radius`, centered at `(radius, radius)`, into one
/// wedge per series point, in input order.
///
/// Returns no segments when the total is zero or any value is negative or
/// non-finite.
///
/// # Example
///
/// ```
/// use labor_core::charts::build_pie_chart;
/// use labor_core::models::ChartPoint;
///
/// let series = vec![
///     ChartPoint::new("a", 1.0),
///     ChartPoint::new("b", 1.0),
///     ChartPoint::new("c", 2.0),
/// ];
/// let segments = build_pie_chart(&series, 50.0);
///
/// let spans: Vec<f64> = segments.iter().map(|s| s.span()).collect();
/// assert_eq!(spans, vec![90.0, 90.0, 180.0]);
/// assert_eq!(segments[2].percentage, 50.0);
/// ```
pub fn build_pie_chart(
    series: &[ChartPoint],
    radius: f64,
) -> Vec<PieSegment> {
    if !radius.is_finite() || radius <= 0.0 {
        warn!(radius, "pie radius must be positive; drawing nothing");
        return Vec::new();
    }
    if let Some(bad) = series
        .iter()
        .find(|p| !p.value.is_finite() || p.value < 0.0)
    {
        warn!(label = %bad.label, value = bad.value, "pie values must be non-negative; drawing nothing");
        return Vec::new();
    }

    let total: f64 = series.iter().map(|p| p.value).sum();
    if total <= 0.0 {
        debug!(points = series.len(), "pie total is zero; drawing nothing");
        return Vec::new();
    }

    let last = series.len() - 1;
    let mut current = 0.0;

    series
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let share = point.value / total;
            let start_angle = current;
            let end_angle = if idx == last {
                FULL_TURN
            } else {
                start_angle + share * FULL_TURN
            };
            current = end_angle;

            PieSegment {
                label: point.label.clone(),
                value: point.value,
                percentage: (share * 1000.0).round() / 10.0,
                start_angle,
                end_angle,
                arc_path: wedge_path(radius, start_angle, end_angle),
            }
        })
        .collect()
}

fn boundary_point(
    radius: f64,
    angle_deg: f64,
) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (radius + rad.cos() * radius, radius + rad.sin() * radius)
}

fn wedge_path(
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    let span = end_angle - start_angle;
    let center = fmt_coord(radius);
    let r = fmt_coord(radius);

    if span >= FULL_TURN {
        // Start and end coincide, which SVG would draw as nothing; use two halves.
        let (x1, y1) = boundary_point(radius, start_angle);
        let (x2, y2) = boundary_point(radius, start_angle + FULL_TURN / 2.0);
        return format!(
            "M {center} {center} L {x1} {y1} A {r} {r} 0 1 1 {x2} {y2} A {r} {r} 0 1 1 {x1} {y1} Z",
            x1 = fmt_coord(x1),
            y1 = fmt_coord(y1),
            x2 = fmt_coord(x2),
            y2 = fmt_coord(y2),
        );
    }

    let large_arc = if span > FULL_TURN / 2.0 { 1 } else { 0 };
    let (x1, y1) = boundary_point(radius, start_angle);
    let (x2, y2) = boundary_point(radius, end_angle);
    format!(
        "M {center} {center} L {x1} {y1} A {r} {r} 0 {large_arc} 1 {x2} {y2} Z",
        x1 = fmt_coord(x1),
        y1 = fmt_coord(y1),
        x2 = fmt_coord(x2),
        y2 = fmt_coord(y2),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn series(values: &[f64]) -> Vec<ChartPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartPoint::new(format!("s{i}"), *v))
            .collect()
    }

    #[test]
    fn spans_and_percentages_follow_shares() {
        let segments = build_pie_chart(&series(&[1.0, 1.0, 2.0]), 50.0);

        let spans: Vec<f64> = segments.iter().map(PieSegment::span).collect();
        let percentages: Vec<f64> = segments.iter().map(|s| s.percentage).collect();

        assert_eq!(spans, vec![90.0, 90.0, 180.0]);
        assert_eq!(percentages, vec![25.0, 25.0, 50.0]);
        assert_eq!(spans.iter().sum::<f64>(), 360.0);
    }

    #[test]
    fn angles_accumulate_from_zero() {
        let segments = build_pie_chart(&series(&[1.0, 1.0, 2.0]), 50.0);

        assert_eq!(segments[0].start_angle, 0.0);
        assert_eq!(segments[1].start_angle, 90.0);
        assert_eq!(segments[2].start_angle, 180.0);
        assert_eq!(segments[2].end_angle, 360.0);
    }

    #[test]
    fn arc_paths_use_boundary_points() {
        let segments = build_pie_chart(&series(&[1.0, 1.0, 2.0]), 50.0);

        assert_eq!(segments[0].arc_path, "M 50 50 L 100 50 A 50 50 0 0 1 50 100 Z");
        assert_eq!(segments[1].arc_path, "M 50 50 L 50 100 A 50 50 0 0 1 0 50 Z");
        assert_eq!(segments[2].arc_path, "M 50 50 L 0 50 A 50 50 0 0 1 100 50 Z");
    }

    #[test]
    fn large_arc_flag_set_above_half_turn() {
        let segments = build_pie_chart(&series(&[3.0, 1.0]), 50.0);

        assert!(segments[0].arc_path.contains(" 0 1 1 "));
        assert!(segments[1].arc_path.contains(" 0 0 1 "));
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        let segments = build_pie_chart(&series(&[1.0, 2.0]), 50.0);

        assert_eq!(segments[0].percentage, 33.3);
        assert_eq!(segments[1].percentage, 66.7);
    }

    #[test]
    fn last_segment_closes_the_circle() {
        let segments = build_pie_chart(&series(&[1.0, 1.0, 1.0]), 50.0);

        assert_eq!(segments.last().unwrap().end_angle, 360.0);
    }

    #[test]
    fn zero_value_segments_keep_their_position() {
        let segments = build_pie_chart(&series(&[0.0, 5.0, 0.0, 5.0]), 50.0);
        let labels: Vec<&str> = segments.iter().map(|s| s.label.as_str()).collect();

        assert_eq!(labels, vec!["s0", "s1", "s2", "s3"]);
        assert_eq!(segments[0].span(), 0.0);
        assert_eq!(segments[1].span(), 180.0);
    }

    #[test]
    fn whole_circle_is_drawn_as_two_halves() {
        let segments = build_pie_chart(&series(&[0.0, 7.0]), 50.0);

        assert_eq!(segments[1].percentage, 100.0);
        assert_eq!(
            segments[1].arc_path,
            "M 50 50 L 100 50 A 50 50 0 1 1 0 50 A 50 50 0 1 1 100 50 Z"
        );
    }

    #[test]
    fn zero_total_draws_nothing() {
        assert!(build_pie_chart(&series(&[0.0, 0.0]), 50.0).is_empty());
        assert!(build_pie_chart(&[], 50.0).is_empty());
    }

    #[test]
    fn negative_value_draws_nothing() {
        assert!(build_pie_chart(&series(&[3.0, -1.0]), 50.0).is_empty());
    }

    #[test]
    fn non_positive_radius_draws_nothing() {
        assert!(build_pie_chart(&series(&[1.0]), 0.0).is_empty());
    }
}
