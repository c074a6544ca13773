//! UI rendering helpers for the terminal user interface.
//!
//! Rendering is a pure function of the `App` model and a `PlayerSnapshot`.
//! `draw` also returns a `HitMap` describing where the clickable controls
//! ended up, so the event loop can turn a mouse click into an `Intent`
//! without knowing anything about layout.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Intent, PickPurpose};
use crate::audio::MAX_VOLUME;
use crate::config::{TimeField, TrackField, UiSettings};
use crate::player::{PlaybackState, PlayerSnapshot, format_clock, progress_ratio, remaining};

/// Keyboard help, in display order.
const CONTROLS: &[(&str, &str)] = &[
    ("o", "open & play"),
    ("a", "add to queue"),
    ("space/p", "play/pause"),
    ("n", "next"),
    ("s", "stop"),
    ("c", "clear queue"),
    ("+/-", "volume"),
    ("q", "quit"),
];

/// On-screen buttons and the intent each one delivers.
const BUTTONS: &[(&str, Intent)] = &[
    ("Open", Intent::ChooseFile),
    ("Queue", Intent::EnqueueFile),
    ("Play/Pause", Intent::TogglePause),
    ("Next", Intent::Next),
    ("Stop", Intent::Stop),
];

/// Where the clickable controls were drawn in the last frame.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    buttons: Vec<(Rect, Intent)>,
    volume: Option<Rect>,
}

impl HitMap {
    /// The intent for a click at (`column`, `row`), if it landed on a control.
    pub fn intent_at(&self, column: u16, row: u16) -> Option<Intent> {
        let pos = Position::new(column, row);
        if let Some(area) = self.volume.filter(|a| a.contains(pos)) {
            return Some(Intent::SetVolume(volume_at(column - area.x, area.width)));
        }
        self.buttons
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, intent)| *intent)
    }
}

/// Map a click `offset` cells into a slider `width` cells wide onto
/// `0..=MAX_VOLUME`. The first cell is silence, the last is full volume, and
/// cells in between round to the nearest level (halves round up).
pub fn volume_at(offset: u16, width: u16) -> i32 {
    if width <= 1 {
        return i32::from(MAX_VOLUME);
    }
    let span = u32::from(width - 1);
    let offset = u32::from(offset.min(width - 1));
    ((2 * offset * u32::from(MAX_VOLUME) + span) / (2 * span)) as i32
}

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}

/// Build the "now playing" text according to `ui` settings.
fn now_playing_text(snapshot: &PlayerSnapshot, ui: &UiSettings) -> Option<String> {
    let meta = snapshot.metadata.as_ref()?;
    let parts: Vec<&str> = ui
        .now_playing_fields
        .iter()
        .filter_map(|f| match f {
            TrackField::Title => Some(meta.title.as_str()),
            TrackField::Artist => Some(meta.artist.as_str()),
            TrackField::Album => Some(meta.album.as_str()),
            TrackField::Filename => snapshot.track.as_ref().map(|t| t.display_name()),
        })
        .collect();

    if parts.is_empty() {
        Some(meta.title.clone())
    } else {
        Some(parts.join(&ui.now_playing_separator))
    }
}

/// Build the time label (elapsed/total/remaining) per `UiSettings`.
fn time_text(elapsed: u64, total: u64, ui: &UiSettings) -> String {
    ui.time_fields
        .iter()
        .map(|f| match f {
            TimeField::Elapsed => format_clock(elapsed),
            TimeField::Total => format_clock(total),
            TimeField::Remaining => format!("-{}", format_clock(remaining(elapsed, total))),
        })
        .collect::<Vec<String>>()
        .join(&ui.time_separator)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into `frame` and report where the controls are.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    snapshot: &PlayerSnapshot,
    ui_settings: &UiSettings,
) -> HitMap {
    let mut hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cueplay ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing + status line
    let mut lines: Vec<String> = Vec::new();
    match now_playing_text(snapshot, ui_settings) {
        Some(text) => lines.push(format!("{}: {}", state_label(snapshot.state), text)),
        None => lines.push(state_label(snapshot.state).to_string()),
    }
    if let Some(status) = &app.status {
        lines.push(status.clone());
    }
    let now_playing = Paragraph::new(lines.join("\n"))
        .block(left_padded(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[1]);

    // Progress
    let total = snapshot.duration_seconds();
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(progress_ratio(snapshot.elapsed_seconds, total))
        .label(time_text(snapshot.elapsed_seconds, total, ui_settings));
    frame.render_widget(progress, chunks[2]);

    // Buttons + volume slider
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[3]);
    let button_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(BUTTONS.iter().map(|_| Constraint::Ratio(1, BUTTONS.len() as u32)))
        .split(row[0]);
    for ((label, intent), area) in BUTTONS.iter().zip(button_areas.iter()) {
        let button = Paragraph::new(*label)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, *area);
        hits.buttons.push((*area, *intent));
    }

    let volume_block = Block::default().borders(Borders::ALL).title(" volume ");
    let volume_inner = volume_block.inner(row[1]);
    let volume = Gauge::default()
        .block(volume_block)
        .ratio(f64::from(snapshot.volume) / f64::from(MAX_VOLUME))
        .label(format!("{}/{}", snapshot.volume, MAX_VOLUME));
    frame.render_widget(volume, row[1]);
    hits.volume = Some(volume_inner);

    // Queue
    let queue_items: Vec<ListItem> = snapshot
        .queued
        .iter()
        .enumerate()
        .map(|(i, name)| ListItem::new(format!("{:>3}. {}", i + 1, name)))
        .collect();
    let queue_title = format!(" queue ({}) ", snapshot.queue_len());
    let queue = List::new(queue_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(queue_title.as_str()),
    );
    frame.render_widget(queue, chunks[4]);

    // Footer
    let footer = Paragraph::new(controls_text())
        .block(left_padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);

    // Picker overlay. While it is open, clicks only go to the picker.
    if let Some(overlay) = &app.picker {
        let popup = centered_rect_sized(72, 20, frame.area());
        frame.render_widget(Clear, popup);

        let verb = match overlay.purpose {
            PickPurpose::Play => "play",
            PickPurpose::Enqueue => "queue",
        };
        let title = format!(
            " {verb}: {} (enter picks, esc cancels) ",
            overlay.picker.root().display()
        );
        let items: Vec<ListItem> = overlay
            .picker
            .entries()
            .iter()
            .map(|e| ListItem::new(e.display.as_str()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title.as_str()))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if !overlay.picker.entries().is_empty() {
            state.select(Some(overlay.picker.selected()));
        }
        frame.render_stateful_widget(list, popup, &mut state);

        hits = HitMap::default();
    }

    hits
}
