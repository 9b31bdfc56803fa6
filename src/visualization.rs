/// Visualization module: regional time-series line charts.
///
/// Two outputs for the same `TimeSeries`:
/// - a plotly figure (JSON) for front ends that render with plotly
/// - a self-contained HTML string with an inline SVG line chart
///
/// Missing points are never interpolated: the plotly trace carries `null`,
/// and the SVG line breaks into separate segments around the gap. Every call
/// renders a complete figure from scratch.
use std::fmt::Write as FmtWrite;

use serde_json::json;

use crate::aggregation::{TimeSeries, YearPoint};
use crate::error::Result;

// ── Config ──────────────────────────────────────────────────────────────────

/// Configuration for the SVG line chart.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width_px: u32,
    pub height_px: u32,
    /// Left margin, room for y-axis labels
    pub margin_left_px: u32,
    pub margin_top_px: u32,
    pub margin_right_px: u32,
    pub margin_bottom_px: u32,
    pub line_color: String,
    pub marker_radius_px: f64,
    /// Number of horizontal grid lines / y-axis ticks
    pub y_ticks: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_px: 720,
            height_px: 400,
            margin_left_px: 80,
            margin_top_px: 48,
            margin_right_px: 24,
            margin_bottom_px: 56,
            line_color: "#1f77b4".to_string(),
            marker_radius_px: 4.0,
            y_ticks: 5,
        }
    }
}

// ── Plotly figure ───────────────────────────────────────────────────────────

/// Plotly figure: one `lines+markers` scatter trace, years on x, means on y.
pub fn figure_json(series: &TimeSeries) -> Result<String> {
    let figure = json!({
        "data": [{
            "type": "scatter",
            "mode": "lines+markers",
            "x": series.years(),
            "y": series.values(),
        }],
        "layout": {
            "title": { "text": series.title() },
            "xaxis": { "title": { "text": "Year" } },
            "yaxis": { "title": { "text": series.variable.as_str() } },
        },
    });
    Ok(serde_json::to_string(&figure)?)
}

// ── Layout ──────────────────────────────────────────────────────────────────

struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    y_min: f64,
    y_max: f64,
    count: usize,
}

impl PlotArea {
    fn new(config: &ChartConfig, points: &[YearPoint]) -> Option<Self> {
        let present: Vec<f64> = points.iter().filter_map(|p| p.value).collect();
        if present.is_empty() {
            return None;
        }

        let mut y_min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let mut y_max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let scale = y_min.abs().max(y_max.abs()).max(1.0);
        let range = y_max - y_min;
        if !range.is_normal() || range <= scale * 1e-9 {
            let pad = if y_max == 0.0 { 1.0 } else { y_max.abs() * 0.1 };
            y_min -= pad;
            y_max += pad;
        }

        Some(Self {
            left: config.margin_left_px as f64,
            top: config.margin_top_px as f64,
            width: config
                .width_px
                .saturating_sub(config.margin_left_px + config.margin_right_px)
                .max(1) as f64,
            height: config
                .height_px
                .saturating_sub(config.margin_top_px + config.margin_bottom_px)
                .max(1) as f64,
            y_min,
            y_max,
            count: points.len(),
        })
    }

    fn x(&self, index: usize) -> f64 {
        if self.count <= 1 {
            self.left + self.width / 2.0
        } else {
            self.left + self.width * index as f64 / (self.count - 1) as f64
        }
    }

    fn y(&self, value: f64) -> f64 {
        self.top + self.height * (1.0 - (value - self.y_min) / (self.y_max - self.y_min))
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Runs of consecutive present points, as `(index, value)` pairs.
fn segments(points: &[YearPoint]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, p) in points.iter().enumerate() {
        match p.value {
            Some(v) => current.push((i, v)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

// ── HTML generation ─────────────────────────────────────────────────────────

/// Self-contained HTML string with an inline SVG line chart.
pub fn render_line_chart(series: &TimeSeries, config: &ChartConfig) -> String {
    let title = escape_html(&series.title());
    let variable = escape_html(series.variable.as_str());
    let width = config.width_px;
    let height = config.height_px;

    let Some(area) = PlotArea::new(config, &series.points) else {
        return format!(
            r##"<div class="trade-chart" style="font-family:sans-serif;">
  <div style="font-weight:600;">{title}</div>
  <div style="color:#868e96;">No data for this selection.</div>
</div>"##
        );
    };

    let mut body = String::new();

    // Grid lines and y-axis labels
    let ticks = config.y_ticks.max(2);
    for t in 0..ticks {
        let value = area.y_min + (area.y_max - area.y_min) * t as f64 / (ticks - 1) as f64;
        let y = area.y(value);
        write!(
            body,
            r##"<line class="grid" x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" /><text class="y-label" x="{lx:.1}" y="{ly:.1}">{label}</text>"##,
            x1 = area.left,
            x2 = area.left + area.width,
            lx = area.left - 8.0,
            ly = y + 4.0,
            label = format_value(value),
        )
        .unwrap();
    }

    // X-axis labels, one per year
    for (i, p) in series.points.iter().enumerate() {
        write!(
            body,
            r##"<text class="x-label" x="{x:.1}" y="{y:.1}">{year}</text>"##,
            x = area.x(i),
            y = area.bottom() + 18.0,
            year = p.year,
        )
        .unwrap();
    }

    // Line segments, broken at missing points
    for run in segments(&series.points) {
        let coords = run
            .iter()
            .map(|(i, v)| format!("{:.1},{:.1}", area.x(*i), area.y(*v)))
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            body,
            r##"<polyline class="series" points="{coords}" stroke="{color}" />"##,
            color = escape_html(&config.line_color),
        )
        .unwrap();
    }

    // Markers with hover tooltips
    for (i, p) in series.points.iter().enumerate() {
        if let Some(v) = p.value {
            write!(
                body,
                r##"<circle class="marker" cx="{cx:.1}" cy="{cy:.1}" r="{r}" fill="{color}"><title>{year}: {value}</title></circle>"##,
                cx = area.x(i),
                cy = area.y(v),
                r = config.marker_radius_px,
                color = escape_html(&config.line_color),
                year = p.year,
                value = format_value(v),
            )
            .unwrap();
        }
    }

    format!(
        r##"<div class="trade-chart" style="width:100%; font-family:sans-serif;">
  <svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
    <style>
      .grid {{ stroke: #e9ecef; stroke-width: 1; }}
      .axis {{ stroke: #495057; stroke-width: 1; }}
      .series {{ fill: none; stroke-width: 2; }}
      .x-label {{ font-size: 11px; fill: #495057; text-anchor: middle; }}
      .y-label {{ font-size: 11px; fill: #495057; text-anchor: end; }}
      .title {{ font-size: 15px; font-weight: 600; fill: #212529; text-anchor: middle; }}
      .axis-title {{ font-size: 12px; fill: #495057; text-anchor: middle; }}
    </style>
    <text class="title" x="{title_x:.1}" y="24">{title}</text>
    {body}
    <line class="axis" x1="{left:.1}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" />
    <line class="axis" x1="{left:.1}" y1="{top:.1}" x2="{left:.1}" y2="{bottom:.1}" />
    <text class="axis-title" x="{title_x:.1}" y="{x_title_y:.1}">Year</text>
    <text class="axis-title" transform="translate(16,{mid_y:.1}) rotate(-90)">{variable}</text>
  </svg>
</div>"##,
        title_x = width as f64 / 2.0,
        left = area.left,
        right = area.left + area.width,
        top = area.top,
        bottom = area.bottom(),
        x_title_y = area.bottom() + 42.0,
        mid_y = area.top + area.height / 2.0,
    )
}

fn format_value(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
