use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::config;
use crate::error::StoreError;
use crate::media::MediaHandle;
use crate::store::PlayerStore;
use crate::ui::{self, SeekBar};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Catalog index under the list cursor.
    pub cursor: usize,
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
}

impl EventLoopState {
    pub fn new(cursor: usize) -> Self {
        Self {
            cursor,
            pending_gg: false,
        }
    }
}

/// Main terminal event loop: polls the store for time updates, draws, and
/// turns input into store actions. Returns `Ok(())` when the user quits.
pub fn run<M: MediaHandle>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    store: &mut PlayerStore<M>,
    bar: &SeekBar,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        store.poll();

        terminal.draw(|f| ui::draw(f, store, state.cursor, bar, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, store, state) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, store, bar),
                _ => {}
            }
        }
    }

    Ok(())
}

fn report(action: &str, result: Result<(), StoreError>) {
    if let Err(e) = result {
        warn!(action, error = %e, "playback action failed");
    }
}

/// Handle one key press. Returns true when the user asked to quit.
fn handle_key_event<M: MediaHandle>(
    key: KeyEvent,
    store: &mut PlayerStore<M>,
    state: &mut EventLoopState,
) -> bool {
    let last = store.catalog().last_id();
    let gg = std::mem::take(&mut state.pending_gg);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            state.cursor = (state.cursor + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.cursor = state.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') => {
            if gg {
                state.cursor = 0;
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => state.cursor = last,
        KeyCode::Enter => {
            report("play_by_id", store.play_by_id(state.cursor));
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => report("toggle", store.toggle()),
        KeyCode::Char('h') | KeyCode::Left => {
            report("previous", store.previous());
            state.cursor = store.current_track().id;
        }
        KeyCode::Char('l') | KeyCode::Right => {
            report("next", store.next());
            state.cursor = store.current_track().id;
        }
        _ => {}
    }
    false
}

fn handle_mouse_event<M: MediaHandle>(mouse: MouseEvent, store: &mut PlayerStore<M>, bar: &SeekBar) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(offset) = bar.offset_of(mouse.column, mouse.row) {
                report("seek", store.seek(f64::from(offset)));
            }
        }
        _ => {}
    }
}
