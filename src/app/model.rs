//! Application model types: `App`, `Intent` and the picker overlay.
//!
//! `App` holds what only the UI cares about (status line, open picker,
//! quit flag). Everything about playback lives in the controller; `App`
//! turns intents into controller calls and remembers what to tell the user.

use std::path::PathBuf;

use tracing::debug;

use crate::audio::AudioEngine;
use crate::config::LibrarySettings;
use crate::library::FilePicker;
use crate::player::{AdvanceOutcome, Clock, PlaybackController, PlaybackState};

/// A discrete request from the user, independent of how it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Pick a file and play it now.
    ChooseFile,
    /// Pick a file and add it to the queue.
    EnqueueFile,
    TogglePause,
    Next,
    Stop,
    ClearQueue,
    VolumeUp,
    VolumeDown,
    SetVolume(i32),
    Quit,
}

/// What the open picker's result will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickPurpose {
    Play,
    Enqueue,
}

pub struct PickerOverlay {
    pub picker: FilePicker,
    pub purpose: PickPurpose,
}

/// The main application model.
pub struct App {
    pub picker: Option<PickerOverlay>,
    /// One line of feedback for the user, e.g. a load failure.
    pub status: Option<String>,
    pub should_quit: bool,
    picker_root: PathBuf,
    library: LibrarySettings,
    volume_step: i32,
}

impl App {
    pub fn new(picker_root: PathBuf, library: LibrarySettings, volume_step: u8) -> Self {
        Self {
            picker: None,
            status: None,
            should_quit: false,
            picker_root,
            library,
            volume_step: i32::from(volume_step.max(1)),
        }
    }

    /// Apply `intent` to `player`, updating the status line as needed.
    pub fn handle_intent<E: AudioEngine, C: Clock>(
        &mut self,
        intent: Intent,
        player: &mut PlaybackController<E, C>,
    ) {
        debug!(?intent, "intent");
        match intent {
            Intent::ChooseFile => self.open_picker(PickPurpose::Play),
            Intent::EnqueueFile => self.open_picker(PickPurpose::Enqueue),
            Intent::TogglePause => {
                if player.toggle_pause() == PlaybackState::Stopped {
                    self.status = Some("Nothing is playing".to_string());
                }
            }
            Intent::Next => match player.advance() {
                AdvanceOutcome::Idle => self.status = Some("Queue is empty".to_string()),
                AdvanceOutcome::Started { skipped: 0, .. } => self.status = None,
                AdvanceOutcome::Started { started, skipped } => {
                    self.status = Some(format!(
                        "Skipped {skipped} unplayable track(s), now playing {}",
                        started.display_name()
                    ));
                }
                AdvanceOutcome::Exhausted { skipped } => {
                    self.status = Some(format!("No playable tracks left ({skipped} skipped)"));
                }
            },
            Intent::Stop => {
                if player.state() != PlaybackState::Stopped {
                    player.stop();
                }
                self.status = None;
            }
            Intent::ClearQueue => {
                player.clear_queue();
                self.status = Some("Queue cleared".to_string());
            }
            Intent::VolumeUp => {
                player.set_volume(i32::from(player.volume()) + self.volume_step);
            }
            Intent::VolumeDown => {
                player.set_volume(i32::from(player.volume()) - self.volume_step);
            }
            Intent::SetVolume(level) => {
                player.set_volume(level);
            }
            Intent::Quit => self.should_quit = true,
        }
    }

    pub fn open_picker(&mut self, purpose: PickPurpose) {
        let picker = FilePicker::open(&self.picker_root, &self.library);
        if picker.entries().is_empty() {
            self.status = Some(format!(
                "No audio files under {}",
                self.picker_root.display()
            ));
        }
        self.picker = Some(PickerOverlay { picker, purpose });
    }

    /// Close the picker without choosing anything.
    pub fn cancel_pick(&mut self) {
        if self.picker.take().is_some() {
            debug!("pick cancelled");
        }
    }

    /// Close the picker and hand the highlighted file to `player`.
    pub fn confirm_pick<E: AudioEngine, C: Clock>(
        &mut self,
        player: &mut PlaybackController<E, C>,
    ) {
        let Some(PickerOverlay { picker, purpose }) = self.picker.take() else {
            return;
        };
        let Some(path) = picker.choose() else {
            debug!("nothing to pick");
            return;
        };

        match purpose {
            PickPurpose::Play => match player.choose_and_play(&path) {
                Ok(()) => self.status = None,
                Err(e) => self.status = Some(e.to_string()),
            },
            PickPurpose::Enqueue => {
                player.enqueue(path);
                self.status = match player.queue_len() {
                    0 => None,
                    n => Some(format!("{n} queued")),
                };
            }
        }
    }
}
