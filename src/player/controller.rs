//! The playback state machine.
//!
//! `PlaybackController` is the only owner of "what is playing": the current
//! track and its metadata, the pending queue, the pause bookkeeping and the
//! volume. The UI hands it intents and reads a [`PlayerSnapshot`] back once
//! per frame; it never draws anything itself.
//!
//! Completion is detected by polling: the engine can only say whether it is
//! still rendering, so the runtime calls [`PlaybackController::tick`] every
//! frame and the controller advances when a playing track has gone quiet.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::{AudioEngine, MAX_VOLUME};
use crate::metadata::{LoadFailure, TrackMetadata, resolve};

use super::clock::{Clock, EpochSeconds, SystemClock};
use super::queue::{Track, TrackQueue};

/// The playback state of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// A track that failed to reach [`PlaybackState::Playing`].
#[derive(Debug, Error)]
#[error("could not play {}: {failure}", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub failure: LoadFailure,
}

/// What a call to [`PlaybackController::advance`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The queue was empty; nothing changed.
    Idle,
    /// `started` is playing; `skipped` tracks before it failed to load.
    Started { started: Track, skipped: usize },
    /// Every queued track failed; the player is stopped.
    Exhausted { skipped: usize },
}

/// Everything the UI needs to render one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub state: PlaybackState,
    pub track: Option<Track>,
    pub metadata: Option<TrackMetadata>,
    pub elapsed_seconds: u64,
    pub queued: Vec<String>,
    pub volume: u8,
}

impl PlayerSnapshot {
    pub fn queue_len(&self) -> usize {
        self.queued.len()
    }

    pub fn duration_seconds(&self) -> u64 {
        self.metadata.as_ref().map_or(0, |m| m.duration_seconds)
    }
}

struct NowPlaying<H> {
    track: Track,
    handle: H,
    metadata: TrackMetadata,
}

pub struct PlaybackController<E: AudioEngine, C: Clock = SystemClock> {
    engine: E,
    clock: C,
    state: PlaybackState,
    queue: TrackQueue,
    current: Option<NowPlaying<E::Handle>>,
    // Wall time the current track last (re)started, shifted forward by every pause.
    start_epoch: EpochSeconds,
    // Only meaningful while paused.
    paused_at: EpochSeconds,
    volume: u8,
}

impl<E: AudioEngine, C: Clock> PlaybackController<E, C> {
    /// Create a stopped controller and push `initial_volume` to the engine.
    pub fn new(engine: E, clock: C, initial_volume: i32) -> Self {
        let mut controller = Self {
            engine,
            clock,
            state: PlaybackState::Stopped,
            queue: TrackQueue::default(),
            current: None,
            start_epoch: 0,
            paused_at: 0,
            volume: MAX_VOLUME,
        };
        controller.set_volume(initial_volume);
        controller
    }

    pub fn now(&self) -> EpochSeconds {
        self.clock.now()
    }

    /// Append `path` to the queue, starting it right away if the player is
    /// idle with nothing queued.
    pub fn enqueue(&mut self, path: impl Into<PathBuf>) {
        let track = Track::new(path);
        let was_empty = self.queue.is_empty();
        debug!(track = track.display_name(), "enqueued");
        self.queue.push(track);

        if self.state == PlaybackState::Stopped && was_empty {
            let now = self.clock.now();
            self.advance_at(now);
        }
    }

    /// Play `path` immediately, bypassing the queue.
    ///
    /// On failure the player is left stopped with no metadata; the queue is
    /// not touched.
    pub fn choose_and_play(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        self.release_current();

        let now = self.clock.now();
        match self.start(Track::new(path), now) {
            Ok(()) => Ok(()),
            Err(failure) => {
                warn!(path = %path.display(), error = %failure, "failed to play chosen file");
                Err(LoadError {
                    path: path.to_path_buf(),
                    failure,
                })
            }
        }
    }

    /// Start the next playable track from the queue, skipping any that fail.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let now = self.clock.now();
        self.advance_at(now)
    }

    fn advance_at(&mut self, now: EpochSeconds) -> AdvanceOutcome {
        if self.queue.is_empty() {
            return AdvanceOutcome::Idle;
        }

        self.release_current();

        let mut skipped = 0;
        while let Some(track) = self.queue.pop() {
            match self.start(track.clone(), now) {
                Ok(()) => {
                    return AdvanceOutcome::Started {
                        started: track,
                        skipped,
                    };
                }
                Err(failure) => {
                    warn!(
                        path = %track.path().display(),
                        error = %failure,
                        "skipping queued track"
                    );
                    skipped += 1;
                }
            }
        }

        info!(skipped, "queue exhausted");
        AdvanceOutcome::Exhausted { skipped }
    }

    /// Switch between playing and paused; does nothing while stopped.
    pub fn toggle_pause(&mut self) -> PlaybackState {
        let now = self.clock.now();
        match self.state {
            PlaybackState::Playing => {
                self.paused_at = now;
                self.engine.pause();
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                self.start_epoch += now.saturating_sub(self.paused_at);
                self.engine.resume();
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Stopped => {}
        }
        debug!(state = ?self.state, "pause toggled");
        self.state
    }

    /// Stop playback and forget the current track. The queue is kept.
    pub fn stop(&mut self) {
        self.release_current();
        debug!("stopped");
    }

    /// Clamp `level` to `0..=MAX_VOLUME` and apply it. Returns the level set.
    pub fn set_volume(&mut self, level: i32) -> u8 {
        let clamped = level.clamp(0, i32::from(MAX_VOLUME)) as u8;
        self.engine.set_volume(clamped);
        self.volume = clamped;
        clamped
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Per-frame poll: move on when a playing track has finished by itself.
    ///
    /// A finished track with nothing queued leaves the player stopped.
    pub fn tick(&mut self, now: EpochSeconds) {
        if self.state != PlaybackState::Playing || self.engine.is_rendering() {
            return;
        }

        if let Some(current) = self.current.as_ref() {
            info!(track = current.track.display_name(), "track finished");
        }
        if self.advance_at(now) == AdvanceOutcome::Idle {
            self.release_current();
        }
    }

    /// Seconds played of the current track, frozen while paused, never past
    /// its duration. Zero when stopped.
    pub fn elapsed_seconds(&self, now: EpochSeconds) -> u64 {
        let elapsed = match self.state {
            PlaybackState::Stopped => return 0,
            PlaybackState::Playing => now.saturating_sub(self.start_epoch),
            PlaybackState::Paused => self.paused_at.saturating_sub(self.start_epoch),
        };
        match self.current.as_ref() {
            Some(c) => elapsed.min(c.metadata.duration_seconds),
            None => elapsed,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn metadata(&self) -> Option<&TrackMetadata> {
        self.current.as_ref().map(|c| &c.metadata)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref().map(|c| &c.track)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn queued(&self) -> impl Iterator<Item = &Track> {
        self.queue.iter()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn snapshot(&self, now: EpochSeconds) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state,
            track: self.current_track().cloned(),
            metadata: self.metadata().cloned(),
            elapsed_seconds: self.elapsed_seconds(now),
            queued: self
                .queued()
                .map(|t| t.display_name().to_string())
                .collect(),
            volume: self.volume,
        }
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Load, resolve and play `track`. Only a fully successful start touches
    /// the state fields.
    fn start(&mut self, track: Track, now: EpochSeconds) -> Result<(), LoadFailure> {
        let mut handle = self.engine.load(track.path())?;

        let metadata = match resolve(&handle) {
            Ok(m) => m,
            Err(e) => {
                self.engine.unload(handle);
                return Err(e);
            }
        };

        if let Err(e) = self.engine.play(&mut handle, false) {
            self.engine.unload(handle);
            return Err(e.into());
        }

        info!(
            track = track.display_name(),
            title = %metadata.title,
            duration = metadata.duration_seconds,
            "playing"
        );
        self.current = Some(NowPlaying {
            track,
            handle,
            metadata,
        });
        self.state = PlaybackState::Playing;
        self.start_epoch = now;
        self.paused_at = now;
        Ok(())
    }

    /// Stop output, drop the current handle and metadata, and go to `Stopped`.
    fn release_current(&mut self) {
        self.engine.stop();
        if let Some(current) = self.current.take() {
            self.engine.unload(current.handle);
        }
        self.state = PlaybackState::Stopped;
    }
}
