//! Chart widgets.
//!
//! Each widget borrows its data and a [`Theme`](crate::theme::Theme) and
//! renders into a [`Buffer`](ratatui::buffer::Buffer), so the same widgets
//! draw the TUI screens and the CLI's inline charts.

pub mod bar_chart;
pub mod box_plot;
pub mod histogram_chart;
pub mod trend_chart;

pub use bar_chart::TotalsBarChart;
pub use box_plot::BoxPlot;
pub use histogram_chart::HistogramChart;
pub use trend_chart::TrendChart;

/// Compact count label: `950`, `12.5k`, `3.88M`.
pub fn format_count(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.0}k", value / 1_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}

/// `(lo, hi)` widened by `fraction` of the span on both sides; a zero span
/// becomes `±1`.
pub(crate) fn padded(lo: f64, hi: f64, fraction: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo - span * fraction, hi + span * fraction)
    }
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut content = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                content.push_str(cell.symbol());
            }
        }
        content.push('\n');
    }
    content
}
