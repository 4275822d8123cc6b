mod alarm;
mod app;
mod cli;
mod config;
mod error;
mod events;
mod input;
mod logging;
mod machine;
mod models;
mod session;
mod source;
mod status;
mod theme;
mod timer;
mod tracking;
mod ui;
mod utils;

use std::io::{self, stdout};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::info;
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::alarm::TerminalBell;
use crate::app::App;
use crate::cli::{Args, VERSION};
use crate::config::Config;
use crate::error::AppError;
use crate::events::AppEvent;
use crate::models::LineDirectory;
use crate::source::SeoulOpenApi;

/// Redraw and input poll period
const FRAME: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("subway-waker: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::load(args.config.as_deref())?;
    config.apply_args(&args);
    config.validate()?;

    let log_path = logging::init(config.log_file.as_deref())?;
    info!("subway-waker {} starting, logging to {}", VERSION, log_path.display());

    let directory = match &config.stations_file {
        Some(path) => LineDirectory::load(path)?,
        None => LineDirectory::embedded()?,
    };
    let source = SeoulOpenApi::new(&config).map_err(AppError::Client)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(
        &config,
        directory,
        Arc::new(source),
        Box::new(TerminalBell::stdout()),
        tx,
    );

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, &mut app, &mut rx);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    info!("exiting");

    result.map_err(AppError::from)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Apply everything background tasks sent since the last frame
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = input::map_key(key) {
                    app.perform(action);
                }
            }
        }
        app.tick();
    }

    app.reset();
    Ok(())
}
