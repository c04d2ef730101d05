//! SVG line chart of the balance trajectory.
//!
//! Balance on the y axis, round index on the x axis, titled with the
//! strategy name and the end balance. Output is a standalone SVG document
//! that can be written to disk or served by the dashboard.

use rust_decimal::prelude::*;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::types::{SimError, SimulationRun};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 450.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 40.0;
const LINE_COLOR: &str = "#1f77b4";

/// Chart title lines: strategy and end balance.
pub fn chart_title(run: &SimulationRun) -> [String; 2] {
    let end = match run.end_balance() {
        Some(b) => b.normalize().to_string(),
        None => "n/a".to_string(),
    };
    [
        format!("Strategy = {}", run.config.strategy),
        format!("End balance = {end}"),
    ]
}

/// Render the run as an SVG document.
pub fn render_svg(run: &SimulationRun) -> String {
    let balances: Vec<f64> = run.balances().map(|b| b.to_f64().unwrap_or(0.0)).collect();
    let [title, subtitle] = chart_title(run);

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let (lo, hi) = y_range(&balances);
    let last_index = balances.len().saturating_sub(1).max(1) as f64;

    let x_of = |i: usize| MARGIN_LEFT + (i as f64 / last_index) * plot_w;
    let y_of = |b: f64| MARGIN_TOP + (hi - b) / (hi - lo) * plot_h;

    let mut svg = String::with_capacity(balances.len() * 16 + 1024);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="24" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
        WIDTH / 2.0,
        escape(&title)
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="44" text-anchor="middle" font-family="sans-serif" font-size="14">{}</text>"#,
        WIDTH / 2.0,
        escape(&subtitle)
    );

    // Axes
    let x0 = MARGIN_LEFT;
    let x1 = MARGIN_LEFT + plot_w;
    let y0 = MARGIN_TOP + plot_h;
    let _ = writeln!(
        svg,
        r#"<polyline points="{x0},{MARGIN_TOP} {x0},{y0} {x1},{y0}" fill="none" stroke="black" stroke-width="1"/>"#
    );
    for (value, anchor_y) in [(hi, MARGIN_TOP), (lo, y0)] {
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="12">{}</text>"#,
            x0 - 6.0,
            anchor_y + 4.0,
            format_axis(value)
        );
    }
    let _ = writeln!(
        svg,
        r#"<text x="{x0}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12">0</text>"#,
        y0 + 18.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="{x1}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12">{}</text>"#,
        y0 + 18.0,
        balances.len().saturating_sub(1)
    );

    if !balances.is_empty() {
        let points: Vec<String> = balances
            .iter()
            .enumerate()
            .map(|(i, b)| format!("{:.2},{:.2}", x_of(i), y_of(*b)))
            .collect();
        let _ = writeln!(
            svg,
            r#"<polyline points="{}" fill="none" stroke="{LINE_COLOR}" stroke-width="1.5"/>"#,
            points.join(" ")
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render the run and write it to `path`.
pub fn write_svg(run: &SimulationRun, path: &str) -> Result<(), SimError> {
    let io_err = |source: std::io::Error| SimError::Io {
        path: path.to_string(),
        source,
    };
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, render_svg(run)).map_err(io_err)?;
    info!(path, run_id = %run.id, "Chart written");
    Ok(())
}

/// Y-axis bounds, padded so a flat line still has a visible range.
fn y_range(balances: &[f64]) -> (f64, f64) {
    let lo = balances.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = balances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo, hi)
}

fn format_axis(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
