use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use std::io;

mod args;
mod config;
mod logging;
mod service;
mod storage;
mod tui;

use args::Args;
use config::Config;
use tui::app::App;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.apply(Config::load(args.config.as_deref())?);
    logging::init_tracing(config.log_file.as_deref(), args.debug)?;
    tracing::info!(seed_samples = config.seed_samples, "starting linkshelf");

    let mut app = App::new(&config);

    // Setup terminal
    enable_raw_mode().map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}. Make sure you're running in a terminal.", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| anyhow::anyhow!("Failed to enter alternate screen: {}. Make sure you're running in a terminal.", e))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(links = app.service.links().len(), "exiting");
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| app.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code, key.modifiers)?;
            }
        }
    }
    Ok(())
}
