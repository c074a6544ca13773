//! Audio-related small types and the engine contract.
//!
//! The playback controller only ever talks to audio output through the
//! [`AudioEngine`] trait defined here, and only ever reads tags through
//! [`TagSource`]. Keeping both as traits lets the controller be exercised
//! against a scripted engine in tests.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Upper bound of the integer volume scale (inclusive).
pub const MAX_VOLUME: u8 = 128;

#[derive(Debug, Error)]
pub enum EngineError {
    /// No default output device could be opened.
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
}

/// Read access to the tags and length of a loaded track.
///
/// Every accessor may legitimately report nothing; deciding what to show
/// instead is the resolver's job, not the engine's.
pub trait TagSource {
    fn title(&self) -> Option<&str>;
    fn artist(&self) -> Option<&str>;
    fn album(&self) -> Option<&str>;
    /// Length in whole seconds. Zero or negative means "unknown".
    fn duration_seconds(&self) -> i64;
}

/// Capabilities the controller needs from the audio backend.
///
/// Calls are assumed to return promptly; the engine may render on its own
/// thread but the caller never waits on it.
pub trait AudioEngine {
    type Handle: TagSource;

    /// Open and decode `path`, without starting output.
    fn load(&mut self, path: &Path) -> Result<Self::Handle, EngineError>;
    /// Start rendering `handle` from the beginning.
    fn play(&mut self, handle: &mut Self::Handle, looped: bool) -> Result<(), EngineError>;
    fn pause(&mut self);
    fn resume(&mut self);
    /// Halt output. Safe to call when nothing is playing.
    fn stop(&mut self);
    fn unload(&mut self, handle: Self::Handle);
    /// Whether a track is still producing audio (paused counts as producing).
    fn is_rendering(&self) -> bool;
    /// `level` is already clamped to `0..=MAX_VOLUME`.
    fn set_volume(&mut self, level: u8);
}
