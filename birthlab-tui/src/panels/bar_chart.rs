//! Vertical bars of per-country totals.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
};

use super::format_count;
use crate::theme::Theme;

pub struct TotalsBarChart<'a> {
    totals: &'a [(String, f64)],
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> TotalsBarChart<'a> {
    pub fn new(totals: &'a [(String, f64)], title: &'a str, theme: &'a Theme) -> Self {
        Self {
            totals,
            title,
            theme,
        }
    }

    /// Widest bar that still fits every bar (and a one-cell gap) in `width`.
    fn bar_width(&self, width: u16) -> u16 {
        let n = self.totals.len().max(1) as u16;
        (width.saturating_sub(n) / n).clamp(1, 9)
    }
}

impl Widget for TotalsBarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(self.theme.title())
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        if self.totals.is_empty() {
            Paragraph::new(Span::styled("No countries to show.", self.theme.muted_style()))
                .block(block)
                .render(area, buf);
            return;
        }

        let inner_width = block.inner(area).width;
        let bars: Vec<Bar> = self
            .totals
            .iter()
            .map(|(key, value)| {
                Bar::default()
                    .label(Line::from(key.clone()))
                    .value(value.max(0.0).round() as u64)
                    .text_value(format_count(*value))
                    .style(Style::default().fg(self.theme.accent))
                    .value_style(
                        Style::default()
                            .fg(self.theme.background)
                            .bg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect();

        BarChart::default()
            .block(block)
            .bar_width(self.bar_width(inner_width))
            .bar_gap(1)
            .label_style(Style::default().fg(self.theme.text_secondary))
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}
