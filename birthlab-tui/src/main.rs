//! BirthLab TUI - keyboard-driven menu over the births table.
//!
//! Usage: `birthlab-tui [CONFIG]`. Without an argument the settings are
//! discovered (`./birthlab.toml`, then the user config dir). Logs go to
//! `<cache_dir>/birthlab/birthlab-tui.log`; set `RUST_LOG` to change the level.

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use birthlab_core::{load_table, Settings};
use birthlab_tui::{handle_key, ui, App};

fn main() -> Result<()> {
    let log_path = init_tracing()?;

    let config = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::discover(config.as_deref()).context("loading settings")?;
    let table = load_table(&settings.data_path)
        .with_context(|| format!("loading {}", settings.data_path.display()))?;
    info!(
        data = %settings.data_path.display(),
        rows = table.len(),
        log = %log_path.display(),
        "starting birthlab-tui"
    );
    let mut app = App::new(settings, table);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }
    }
    Ok(())
}

/// Log to a file so the alternate screen stays clean.
fn init_tracing() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("birthlab");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("birthlab-tui.log");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}
