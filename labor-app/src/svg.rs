//! SVG rendering of a result's charts.

use std::fmt::Write;

use labor_core::charts::{
    ChartSet, LineChartGeometry, LineChartLayout, PieSegment, build_line_chart_with,
    build_pie_chart, chart_set,
};
use labor_core::CalculationResult;
use serde::Serialize;

pub const PIE_RADIUS: f64 = 50.0;

const SEGMENT_COLORS: [&str; 6] = [
    "#3b82f6", "#22c55e", "#f59e0b", "#ef4444", "#a855f7", "#ec4899",
];
const LINE_COLOR: &str = "#3b82f6";

/// Datasets and geometry for both charts of one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub set: ChartSet,
    pub line: LineChartGeometry,
    pub pie: Vec<PieSegment>,
}

impl ChartView {
    pub fn from_result(result: &CalculationResult) -> Self {
        let set = chart_set(result);
        let line = build_line_chart_with(&set.line, LineChartLayout::default());
        let pie = build_pie_chart(&set.pie, PIE_RADIUS);
        Self { set, line, pie }
    }
}

struct Palette {
    background: &'static str,
    text: &'static str,
    grid: &'static str,
}

impl Palette {
    fn new(dark: bool) -> Self {
        if dark {
            Self {
                background: "#1f2937",
                text: "#f9fafb",
                grid: "#4b5563",
            }
        } else {
            Self {
                background: "#ffffff",
                text: "#111827",
                grid: "#e5e7eb",
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A standalone SVG document with the line chart on the left and the pie on
/// the right. Empty geometry leaves its chart area blank.
pub fn render_svg(
    view: &ChartView,
    dark: bool,
) -> String {
    let layout = LineChartLayout::default();
    let palette = Palette::new(dark);
    let pie_x = layout.width + 20.0;
    let width = pie_x + PIE_RADIUS * 2.0 + 20.0;
    let height = layout.height + 60.0;

    let mut svg = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        palette.background
    );
    let _ = writeln!(
        svg,
        r#"  <defs><linearGradient id="area" x1="0%" y1="0%" x2="0%" y2="100%"><stop offset="0%" stop-color="{LINE_COLOR}" stop-opacity="0.3"/><stop offset="100%" stop-color="{LINE_COLOR}" stop-opacity="0.05"/></linearGradient></defs>"#
    );

    write_line_chart(&mut svg, view, &layout, &palette);
    write_pie_chart(&mut svg, view, pie_x, &palette);

    svg.push_str("</svg>\n");
    svg
}

fn write_line_chart(
    svg: &mut String,
    view: &ChartView,
    layout: &LineChartLayout,
    palette: &Palette,
) {
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="18" font-size="12" font-weight="bold" fill="{}">{}</text>"#,
        layout.padding,
        palette.text,
        escape(&view.set.line_title)
    );
    let _ = writeln!(svg, r#"  <g transform="translate(0,30)">"#);
    for i in 0..5 {
        let y = layout.padding + f64::from(i) * (layout.height - 2.0 * layout.padding) / 4.0;
        let _ = writeln!(
            svg,
            r#"    <line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{}" stroke-width="0.5"/>"#,
            layout.padding,
            layout.width - layout.padding,
            palette.grid
        );
    }
    if !view.line.is_empty() {
        let _ = writeln!(svg, r#"    <path d="{}" fill="url(#area)"/>"#, view.line.area_path);
        let _ = writeln!(
            svg,
            r#"    <path d="{}" fill="none" stroke="{LINE_COLOR}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"#,
            view.line.line_path
        );
        for point in &view.line.points {
            let _ = writeln!(
                svg,
                r#"    <circle cx="{:.3}" cy="{:.3}" r="4" fill="{LINE_COLOR}"><title>{}: {}</title></circle>"#,
                point.x,
                point.y,
                escape(&point.label),
                point.value
            );
        }
    }
    let _ = writeln!(svg, "  </g>");
}

fn write_pie_chart(
    svg: &mut String,
    view: &ChartView,
    pie_x: f64,
    palette: &Palette,
) {
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="18" font-size="12" font-weight="bold" fill="{}" text-anchor="middle">{}</text>"#,
        pie_x + PIE_RADIUS,
        palette.text,
        escape(&view.set.pie_title)
    );
    let _ = writeln!(svg, r#"  <g transform="translate({pie_x},30)">"#);
    for (idx, segment) in view.pie.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"    <path d="{}" fill="{}"><title>{} {}%</title></path>"#,
            segment.arc_path,
            SEGMENT_COLORS[idx % SEGMENT_COLORS.len()],
            escape(&segment.label),
            segment.percentage
        );
    }
    let _ = writeln!(
        svg,
        r#"    <text x="{PIE_RADIUS}" y="{}" font-size="10" fill="{}" text-anchor="middle">{}</text>"#,
        PIE_RADIUS * 2.0 + 16.0,
        palette.text,
        escape(&view.set.center_text)
    );
    let _ = writeln!(svg, "  </g>");
}
