//! vim-editor
//!
//! A markdown editor with vim-style modal keybindings for the terminal.

mod app;
mod editor;
mod error;
mod host;
mod input;
mod markdown;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use app::{App, AppConfig, SaveBackend, APP_NAME};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> anyhow::Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("logging disabled: {:#}", e);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let config = AppConfig::load();
    let path = std::env::args_os().nth(1).map(PathBuf::from);

    let mut app = App::new(config.clone(), save_backend(&config));
    if let Some(path) = path {
        app.open_path(&path);
    }

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, &config);
    restore_terminal()?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

/// Logs go to a file; the terminal belongs to the UI
fn init_logging() -> anyhow::Result<()> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join(format!("{}.log", APP_NAME));
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(feature = "desktop")]
fn save_backend(config: &AppConfig) -> SaveBackend {
    match host::HostClient::spawn() {
        Ok(client) => SaveBackend::Host(client),
        Err(e) => {
            warn!(error = %e, "file host failed to start, saving to downloads");
            SaveBackend::Download(app::DownloadSaver::new(&config.download_dir))
        }
    }
}

#[cfg(not(feature = "desktop"))]
fn save_backend(config: &AppConfig) -> SaveBackend {
    SaveBackend::Download(app::DownloadSaver::new(&config.download_dir))
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode().context("enabling raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));

    Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

fn run(terminal: &mut Tui, app: &mut App, config: &AppConfig) -> anyhow::Result<()> {
    let tick_rate = config.tick_rate();

    while !app.should_quit {
        app.poll_host();
        app.flush_modal();
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key_event(key);
            }
        }
    }
    Ok(())
}
