//! Births-per-year line chart.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

use super::{format_count, padded};
use crate::theme::Theme;

/// Line chart of per-period totals. Period keys that parse as numbers are
/// used as x values; otherwise the position in the series is.
pub struct TrendChart<'a> {
    totals: &'a [(String, f64)],
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> TrendChart<'a> {
    pub fn new(totals: &'a [(String, f64)], title: &'a str, theme: &'a Theme) -> Self {
        Self {
            totals,
            title,
            theme,
        }
    }

    fn points(&self) -> Vec<(f64, f64)> {
        let numeric = self.totals.iter().all(|(k, _)| k.trim().parse::<f64>().is_ok());
        self.totals
            .iter()
            .enumerate()
            .map(|(i, (k, v))| {
                let x = if numeric {
                    k.trim().parse::<f64>().unwrap_or(i as f64)
                } else {
                    i as f64
                };
                (x, *v)
            })
            .collect()
    }
}

impl Widget for TrendChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(self.theme.title())
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        if self.totals.is_empty() {
            Paragraph::new(Span::styled("No data to plot.", self.theme.muted_style()))
                .block(block)
                .render(area, buf);
            return;
        }

        let data = self.points();
        let (x_lo, x_hi) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));
        let (y_lo, y_hi) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
        let (x_min, x_max) = padded(x_lo, x_hi, 0.02);
        let (y_min, y_max) = padded(y_lo, y_hi, 0.05);

        let line = Dataset::default()
            .name("Births")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.theme.accent))
            .data(&data);
        let markers = Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(self.theme.warning))
            .data(&data);

        let first = self.totals.first().map(|(k, _)| k.clone()).unwrap_or_default();
        let last = self.totals.last().map(|(k, _)| k.clone()).unwrap_or_default();
        let muted = self.theme.muted_style();

        Chart::new(vec![line, markers])
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled("Year", muted))
                    .style(muted)
                    .bounds([x_min, x_max])
                    .labels(vec![Span::styled(first, muted), Span::styled(last, muted)]),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Number of Births", muted))
                    .style(muted)
                    .bounds([y_min, y_max])
                    .labels(vec![
                        Span::styled(format_count(y_min), muted),
                        Span::styled(format_count(y_max), muted),
                    ]),
            )
            .render(area, buf);
    }
}
