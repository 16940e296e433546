//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Bill curve color.
pub const BILL_COLOR: Color = Color::Blue;
/// Effective unit cost curve color.
pub const UNIT_COST_COLOR: Color = Color::Green;
/// Service-tax threshold reference line.
pub const SERVICE_TAX_LINE: Color = Color::Red;
/// High-usage threshold reference line.
pub const HIGH_USAGE_LINE: Color = Color::Magenta;
/// Cursor marker color.
pub const CURSOR_COLOR: Color = Color::Yellow;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(points: &[(f64, f64)]) -> [f64; 2] {
    let ys = points.iter().map(|&(_, y)| y);
    let min = ys.clone().fold(f64::INFINITY, f64::min);
    let max = ys.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}

/// X-axis bounds spanning the data, at least one unit wide.
pub fn bounds_x(points: &[(f64, f64)]) -> [f64; 2] {
    let lo = points.first().map_or(0.0, |p| p.0);
    let hi = points.last().map_or(1.0, |p| p.0).max(lo + 1.0);
    [lo, hi]
}
