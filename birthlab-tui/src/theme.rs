//! Neon-on-charcoal theme tokens shared by the TUI and the CLI's inline charts.
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Accent**: electric cyan (focus, primary series)
//! - **Positive**: neon green (significant results, selections)
//! - **Negative**: hot pink (errors, non-significant results)
//! - **Warning**: neon orange (defaulted input, means and markers)
//! - **Neutral**: cool purple (fitted curves, borders)
//! - **Muted**: steel blue (axes, hints)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Green for a rejected null hypothesis, pink otherwise.
    pub fn verdict_color(&self, significant: bool) -> Color {
        if significant {
            self.positive
        } else {
            self.negative
        }
    }

    /// Color of the `index`-th group in multi-series charts.
    pub fn series_color(&self, index: usize) -> Color {
        match index % 4 {
            0 => self.accent,
            1 => self.warning,
            2 => self.positive,
            _ => self.neutral,
        }
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.neutral)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Highlighted row of a list.
    pub fn cursor(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
