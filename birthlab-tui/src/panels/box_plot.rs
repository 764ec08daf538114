//! Box plot - horizontal box-and-whisker rows on a shared scale
//!
//! Each group gets two rows:
//! - box line: whiskers at the furthest points within 1.5·IQR, box from Q1
//!   to Q3, median marker, outliers as dots
//! - value labels: whisker ends and median

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use birthlab_core::stats::BoxStats;

use super::format_count;
use crate::theme::Theme;

pub struct BoxPlot<'a> {
    groups: Vec<(&'a str, &'a BoxStats)>,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> BoxPlot<'a> {
    pub fn new(groups: Vec<(&'a str, &'a BoxStats)>, title: &'a str, theme: &'a Theme) -> Self {
        Self {
            groups,
            title,
            theme,
        }
    }

    fn range(&self) -> (f64, f64) {
        self.groups
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, s)| {
                (lo.min(s.min), hi.max(s.max))
            })
    }
}

impl Widget for BoxPlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(self.theme.title())
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.groups.is_empty() || inner.width < 16 || inner.height < 2 {
            return;
        }

        let (min_val, max_val) = self.range();
        let span = max_val - min_val;

        let label_width: u16 = 6;
        let plot_left = inner.x + label_width;
        let plot_width = inner.width.saturating_sub(label_width);
        let val_to_x = |v: f64| -> u16 {
            if span < 1e-12 {
                return plot_left + plot_width / 2;
            }
            let frac = ((v - min_val) / span).clamp(0.0, 1.0);
            plot_left + (frac * plot_width.saturating_sub(1) as f64).round() as u16
        };

        let whisker_style = Style::default().fg(self.theme.muted);
        let median_style = Style::default()
            .fg(self.theme.warning)
            .add_modifier(Modifier::BOLD);
        let outlier_style = Style::default().fg(self.theme.negative);
        let right = inner.right();

        for (i, (label, stats)) in self.groups.iter().enumerate() {
            let box_y = inner.y + (i as u16) * 3;
            if box_y >= inner.bottom() {
                break;
            }
            let box_style = Style::default()
                .fg(self.theme.series_color(i))
                .add_modifier(Modifier::BOLD);

            let name: String = label.chars().take(label_width as usize - 1).collect();
            buf.set_string(inner.x, box_y, &name, box_style);

            let x_lw = val_to_x(stats.lower_whisker);
            let x_q1 = val_to_x(stats.q1);
            let x_med = val_to_x(stats.median);
            let x_q3 = val_to_x(stats.q3);
            let x_uw = val_to_x(stats.upper_whisker);

            for x in x_lw..x_q1 {
                if x < right {
                    buf.set_string(x, box_y, "\u{2500}", whisker_style); // ─
                }
            }
            if x_lw < right && x_lw < x_q1 {
                buf.set_string(x_lw, box_y, "\u{251C}", whisker_style); // ├
            }
            for x in (x_q1 + 1)..x_q3 {
                if x < right {
                    buf.set_string(x, box_y, "\u{2550}", box_style); // ═
                }
            }
            if x_q1 < right {
                buf.set_string(x_q1, box_y, "\u{2561}", box_style); // ╡
            }
            if x_q3 < right {
                buf.set_string(x_q3, box_y, "\u{255E}", box_style); // ╞
            }
            for x in (x_q3 + 1)..x_uw {
                if x < right {
                    buf.set_string(x, box_y, "\u{2500}", whisker_style); // ─
                }
            }
            if x_uw < right && x_uw > x_q3 {
                buf.set_string(x_uw, box_y, "\u{2524}", whisker_style); // ┤
            }
            if x_med < right {
                buf.set_string(x_med, box_y, "\u{2503}", median_style); // ┃
            }
            for &outlier in &stats.outliers {
                let x = val_to_x(outlier);
                if x < right {
                    buf.set_string(x, box_y, "\u{2022}", outlier_style); // •
                }
            }

            // Value labels under the box.
            let val_y = box_y + 1;
            if val_y < inner.bottom() {
                let muted = Style::default().fg(self.theme.muted);
                let low = format_count(stats.lower_whisker);
                let high = format_count(stats.upper_whisker);
                let med = format_count(stats.median);

                buf.set_string(x_lw, val_y, &low, muted);
                let high_x = x_uw
                    .saturating_sub(high.len() as u16 - 1)
                    .max(x_lw + low.len() as u16 + 1);
                if high_x + high.len() as u16 <= right {
                    buf.set_string(high_x, val_y, &high, muted);
                }
                let med_x = x_med.saturating_sub(med.len() as u16 / 2);
                let clear_of_low = med_x > x_lw + low.len() as u16;
                let clear_of_high = med_x + (med.len() as u16) < high_x;
                if clear_of_low && clear_of_high {
                    buf.set_string(med_x, val_y, &med, median_style);
                }
            }
        }
    }
}
