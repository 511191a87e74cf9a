mod app;
mod cli;
mod locale;
mod session;
mod ui;

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::{App, Control};
use crate::cli::Args;
use crate::session::UiSession;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let session = UiSession::from_path(&args.path)?;
    let mut app = App::new(session, args.morph_config(), args.phrases.clone());
    app.start().context("cannot start the morphing headline")?;

    let result = TerminalGuard::enter(io::stdout()).and_then(|_guard| run(&mut app, &args));

    app.stop();
    result
}

/// Holds the terminal in raw mode on the alternate screen until dropped.
///
/// Dropping restores the terminal on every exit path, unwinding included.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { out };
        crossterm::execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = crossterm::execute!(self.out, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn run(app: &mut App, args: &Args) -> anyhow::Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    let frame_interval = args.frame_interval();

    info!(path = %app.session.path(), fps = args.fps, "harness running");

    loop {
        app.on_frame(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(frame_interval)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Control::Quit = app.handle_key(key.code)? {
                break;
            }
        }
    }

    Ok(())
}
