use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use super::sink::{FileDecoder, create_sink, open_decoder};
use super::tags::{RawTags, read_tags};
use super::types::{AudioEngine, EngineError, MAX_VOLUME, TagSource};

/// A decoded file waiting to be played, plus the tags read from it.
pub struct RodioHandle {
    path: PathBuf,
    tags: RawTags,
    decoder: Option<FileDecoder>,
}

impl TagSource for RodioHandle {
    fn title(&self) -> Option<&str> {
        self.tags.title.as_deref()
    }

    fn artist(&self) -> Option<&str> {
        self.tags.artist.as_deref()
    }

    fn album(&self) -> Option<&str> {
        self.tags.album.as_deref()
    }

    fn duration_seconds(&self) -> i64 {
        self.tags.duration.map_or(0, whole_seconds)
    }
}

/// Round to whole seconds, but never turn a non-empty clip into zero.
pub(super) fn whole_seconds(d: Duration) -> i64 {
    let secs = match d.as_secs() {
        0 if !d.is_zero() => 1,
        s => s,
    };
    secs.min(i64::MAX as u64) as i64
}

/// `AudioEngine` backed by the default `rodio` output device.
///
/// One sink at a time: `play` replaces whatever was rendering before.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioEngine {
    pub fn new() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::NoOutputDevice(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would land
        // on top of the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            volume: 1.0,
        })
    }
}

/// Map the integer volume scale onto rodio's linear gain.
pub(super) fn linear_gain(level: u8) -> f32 {
    f32::from(level.min(MAX_VOLUME)) / f32::from(MAX_VOLUME)
}

impl AudioEngine for RodioEngine {
    type Handle = RodioHandle;

    fn load(&mut self, path: &Path) -> Result<RodioHandle, EngineError> {
        let decoder = open_decoder(path)?;
        let mut tags = read_tags(path);
        if tags.duration.is_none() {
            tags.duration = decoder.total_duration();
        }
        debug!(path = %path.display(), duration = ?tags.duration, "decoded");

        Ok(RodioHandle {
            path: path.to_path_buf(),
            tags,
            decoder: Some(decoder),
        })
    }

    fn play(&mut self, handle: &mut RodioHandle, looped: bool) -> Result<(), EngineError> {
        // A handle's decoder is consumed by its first play; replays reopen the file.
        let decoder = match handle.decoder.take() {
            Some(d) => d,
            None => open_decoder(&handle.path)?,
        };

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.sink = Some(create_sink(&self.stream, decoder, looped, self.volume));
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn unload(&mut self, handle: RodioHandle) {
        debug!(path = %handle.path.display(), "unloaded");
        drop(handle);
    }

    fn is_rendering(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }

    fn set_volume(&mut self, level: u8) {
        self.volume = linear_gain(level);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
    }
}
