//! Terminal player: wires settings, catalog, rodio backend and store
//! together, then hands control to the event loop.

use std::env;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::config::Settings;
use crate::logging;
use crate::media::RodioMedia;
use crate::store::PlayerStore;
use crate::ui::SeekBar;

mod event_loop;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = Settings::load_or_default();
    let logging_on = logging::init(&settings.logging).unwrap_or_else(|e| {
        eprintln!("reprise: cannot open log file, logging disabled: {e}");
        false
    });
    if let Some(e) = fallback {
        if logging_on {
            warn!(error = %e, "config unusable, using defaults");
        } else {
            eprintln!("reprise: config unusable, using defaults: {e}");
        }
    }

    let catalog = startup::load_catalog(env::args().nth(1), &settings.catalog)?;
    info!(tracks = catalog.len(), "catalog loaded");

    let media = RodioMedia::spawn(&settings.audio)?;
    let mut store = PlayerStore::new(catalog, &settings.store)?;
    store.attach_media(media)?;

    let bar = SeekBar::default();
    store.attach_progress(bar.clone(), bar.clone());
    store.mount();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::new(store.current_track().id);
    let run_result = event_loop::run(&mut terminal, &settings, &mut store, &bar, &mut state);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(media) = store.detach_media() {
        media.quit();
    }
    info!("shutdown complete");

    run_result
}
