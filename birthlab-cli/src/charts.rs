//! Inline terminal charts drawn below the command output.

use std::io;

use anyhow::Result;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::Widget;
use ratatui::{Terminal, TerminalOptions, Viewport};

/// Chart height when the terminal size is unknown.
const DEFAULT_HEIGHT: u16 = 20;

/// Rows for a chart: most of the terminal, never more than 30.
pub fn chart_height() -> u16 {
    match crossterm::terminal::size() {
        Ok((_, rows)) => rows.saturating_sub(4).clamp(8, 30),
        Err(_) => DEFAULT_HEIGHT,
    }
}

/// Render `widget` into an inline viewport of `height` rows on stdout.
pub fn draw_inline<W: Widget>(widget: W, height: u16) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )?;
    terminal.draw(|f| f.render_widget(widget, f.area()))?;
    println!();
    Ok(())
}
