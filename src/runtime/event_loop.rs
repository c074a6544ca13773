use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Intent};
use crate::audio::AudioEngine;
use crate::config;
use crate::player::{Clock, PlaybackController};
use crate::ui::{self, HitMap};

/// Main terminal event loop: polls the player once per frame, draws, and
/// feeds input to the app. Returns `Ok(())` when shutdown is requested.
pub fn run<E: AudioEngine, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlaybackController<E, C>,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = Duration::from_millis(settings.ui.tick_ms);
    let mut hits = HitMap::default();

    while !app.should_quit {
        // Completion is only noticed here; the engine has no end-of-track event.
        let now = player.now();
        player.tick(now);

        let snapshot = player.snapshot(now);
        terminal.draw(|f| hits = ui::draw(f, app, &snapshot, &settings.ui))?;

        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.picker.is_some() {
                    handle_picker_key(key, app, player);
                } else if let Some(intent) = intent_for_key(key) {
                    app.handle_intent(intent, player);
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(intent) = hits.intent_at(mouse.column, mouse.row) {
                    app.handle_intent(intent, player);
                }
            }
            _ => {}
        }
    }

    player.stop();
    Ok(())
}

/// Key bindings for the main screen.
pub(super) fn intent_for_key(key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Intent::Quit);
    }
    let intent = match key.code {
        KeyCode::Char('o') => Intent::ChooseFile,
        KeyCode::Char('a') => Intent::EnqueueFile,
        KeyCode::Char(' ') | KeyCode::Char('p') => Intent::TogglePause,
        KeyCode::Char('n') => Intent::Next,
        KeyCode::Char('s') => Intent::Stop,
        KeyCode::Char('c') => Intent::ClearQueue,
        KeyCode::Char('+') | KeyCode::Char('=') => Intent::VolumeUp,
        KeyCode::Char('-') => Intent::VolumeDown,
        KeyCode::Char('q') | KeyCode::Esc => Intent::Quit,
        _ => return None,
    };
    Some(intent)
}

fn handle_picker_key<E: AudioEngine, C: Clock>(
    key: KeyEvent,
    app: &mut App,
    player: &mut PlaybackController<E, C>,
) {
    let Some(overlay) = app.picker.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => overlay.picker.next(),
        KeyCode::Char('k') | KeyCode::Up => overlay.picker.prev(),
        KeyCode::Char('g') | KeyCode::Home => overlay.picker.first(),
        KeyCode::Char('G') | KeyCode::End => overlay.picker.last(),
        KeyCode::Enter => app.confirm_pick(player),
        KeyCode::Esc | KeyCode::Char('q') => app.cancel_pick(),
        _ => {}
    }
}
