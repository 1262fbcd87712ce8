//! newsfeed — a paginated news feed for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌────────────┐  FetchMsg  ┌──────────┐  draw()  ┌──────────┐
//! │ fetcher.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (runtime)  │  (channel) │ (state)  │          │ (render) │
//! └────────────┘            └──────────┘          └──────────┘
//!       ▲ page                   ▲
//!       └── controller ──────────┤ handle_key_event()
//!                           ┌──────────┐
//!                           │ input.rs │
//!                           └──────────┘
//! ```
//!
//! * **`app`** — wraps the library's `FeedController` with selection state.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`main`** — wires everything together: parse args, set up logging, the
//!   fetch worker and the terminal, and run the event loop.

mod app;
mod input;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use app::App;
use newsfeed::config::{Cli, Settings};
use newsfeed::controller::FeedController;
use newsfeed::source::HttpSource;
use newsfeed::{fetcher, logging};

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the default hook prints a panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();
    let settings = Settings::from_cli(&cli)?;
    info!(base_url = %settings.base_url, delay = ?settings.fetch_delay, "starting");

    // -- data source and fetch worker ----------------------------------------
    // The blocking HTTP client must be built outside the worker's runtime.
    let source = HttpSource::new(settings.base_url.clone(), settings.request_timeout)
        .context("failed to build HTTP client")?;
    let (fetch_tx, rx) = fetcher::spawn(Arc::new(source), settings.fetch_delay)?;

    let (controller, outputs) = FeedController::new(fetch_tx);
    let mut app = App::new(controller, outputs);

    install_panic_hook();
    let mut guard = TerminalGuard::new()?;

    // Initial load.
    app.refresh();

    // -- main event loop -----------------------------------------------------
    // ~10 fps: drain fetch results, render, then wait up to one tick for a key.
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(msg) = rx.try_recv() {
            app.receive(msg);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    info!(page = app.page(), "exiting");
    Ok(())
}
