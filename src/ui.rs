//! UI rendering helpers for the terminal front end.
//!
//! This module renders a `PlayerStore` with `ratatui` and provides `SeekBar`,
//! the progress-bar handle the store measures for seeking and fills on every
//! time update.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::catalog::Track;
use crate::config::UiSettings;
use crate::media::{MediaHandle, ProgressFill, SeekSurface};
use crate::store::PlayerStore;

const CONTROLS: [(&str, &str); 7] = [
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter", "play selected song"),
    ("space/p", "play/pause"),
    ("h/l", "prev/next song"),
    ("click bar", "seek"),
    ("q", "quit"),
];

#[derive(Debug, Default)]
struct BarGeometry {
    area: Rect,
    fill_percent: f64,
}

/// Shared handle to the on-screen progress bar.
///
/// The renderer records where the bar was drawn; the store reads its width
/// when seeking and writes the fill on time updates.
#[derive(Debug, Clone, Default)]
pub struct SeekBar(Rc<RefCell<BarGeometry>>);

impl SeekBar {
    pub fn fill_percent(&self) -> f64 {
        self.0.borrow().fill_percent
    }

    fn set_area(&self, area: Rect) {
        self.0.borrow_mut().area = area;
    }

    /// Column offset into the bar for a click at (`column`, `row`), if it hit the bar.
    pub fn offset_of(&self, column: u16, row: u16) -> Option<u16> {
        let area = self.0.borrow().area;
        area.contains(Position::new(column, row))
            .then(|| column - area.x)
    }
}

impl SeekSurface for SeekBar {
    fn offset_width(&self) -> f64 {
        f64::from(self.0.borrow().area.width)
    }
}

impl ProgressFill for SeekBar {
    fn set_width_percent(&mut self, percent: f64) {
        self.0.borrow_mut().fill_percent = percent;
    }
}

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// One list line: `name - desc`, or just the name when there is no description.
fn track_line(track: &Track) -> String {
    let desc = track.desc.trim();
    if desc.is_empty() {
        track.name.clone()
    } else {
        format!("{} - {}", track.name, desc)
    }
}

/// Render the entire UI into `frame` from the store's state.
pub fn draw<M: MediaHandle>(
    frame: &mut Frame,
    store: &PlayerStore<M>,
    cursor: usize,
    bar: &SeekBar,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reprise ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let state = if store.is_playing() { "Playing" } else { "Paused" };
        format!(
            "{} • Song: {} • {}/{}",
            state,
            track_line(store.current_track()),
            store.current_track().id + 1,
            store.catalog().len()
        )
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Track list, windowed around the cursor.
    {
        let total = store.catalog().len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let mut start = cursor.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height)
        };

        let playing_id = store.current_track().id;
        let visible_items: Vec<ListItem> = store.catalog().tracks()[start..end]
            .iter()
            .map(|t| {
                let marker = if t.id == playing_id { "♪ " } else { "  " };
                ListItem::new(format!("{marker}{}", track_line(t)))
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(cursor.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Progress bar; its inner area is what seeking measures against.
    let block = Block::default().borders(Borders::ALL).title(" progress ");
    let inner = block.inner(chunks[3]);
    bar.set_area(inner);
    let gauge = Gauge::default()
        .block(block)
        .ratio((bar.fill_percent() / 100.0).clamp(0.0, 1.0))
        .label(store.time().to_string());
    frame.render_widget(gauge, chunks[3]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn track_line_omits_empty_desc() {
        let mut track = Track {
            id: 0,
            name: "Song".into(),
            desc: "Artist".into(),
            file: PathBuf::from("/music/song.mp3"),
            image: None,
            duration: None,
        };
        assert_eq!(track_line(&track), "Song - Artist");
        track.desc = "  ".into();
        assert_eq!(track_line(&track), "Song");
    }

    #[test]
    fn seek_bar_maps_clicks_inside_its_area() {
        let bar = SeekBar::default();
        bar.set_area(Rect::new(1, 10, 40, 1));

        assert_eq!(bar.offset_width(), 40.0);
        assert_eq!(bar.offset_of(1, 10), Some(0));
        assert_eq!(bar.offset_of(21, 10), Some(20));
        assert_eq!(bar.offset_of(41, 10), None);
        assert_eq!(bar.offset_of(5, 9), None);
    }

    #[test]
    fn seek_bar_records_fill() {
        let mut bar = SeekBar::default();
        bar.set_width_percent(42.0);
        assert_eq!(bar.clone().fill_percent(), 42.0);
    }

    #[test]
    fn controls_text_lists_every_binding() {
        let text = controls_text();
        for (k, _) in CONTROLS {
            assert!(text.contains(&format!("[{k}]")));
        }
    }
}
