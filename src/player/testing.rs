//! Scripted engine and clock for exercising the controller without audio.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::audio::{AudioEngine, EngineError, TagSource};

use super::clock::{Clock, EpochSeconds};

/// A clock the test moves by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<EpochSeconds>>);

impl ManualClock {
    pub fn at(now: EpochSeconds) -> Self {
        Self(Rc::new(Cell::new(now)))
    }

    pub fn advance(&self, secs: u64) {
        self.0.set(self.0.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> EpochSeconds {
        self.0.get()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load(PathBuf),
    Play(PathBuf),
    Pause,
    Resume,
    Stop,
    Unload(PathBuf),
    SetVolume(u8),
}

#[derive(Debug)]
pub struct FakeHandle {
    path: PathBuf,
    title: Option<String>,
    duration: i64,
}

impl TagSource for FakeHandle {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    fn artist(&self) -> Option<&str> {
        Some("A")
    }
    fn album(&self) -> Option<&str> {
        None
    }
    fn duration_seconds(&self) -> i64 {
        self.duration
    }
}

/// Records every call. Files load unless listed in `unloadable` and start
/// unless listed in `unplayable`; each handle's title is its file stem and
/// its duration 180s unless overridden.
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub calls: Vec<Call>,
    pub unloadable: HashSet<PathBuf>,
    pub unplayable: HashSet<PathBuf>,
    pub durations: HashMap<PathBuf, i64>,
    pub rendering: bool,
}

impl FakeEngine {
    pub fn failing(paths: &[&str]) -> Self {
        Self {
            unloadable: paths.iter().map(PathBuf::from).collect(),
            ..Self::default()
        }
    }

    /// The current track runs out on its own.
    pub fn finish_track(&mut self) {
        self.rendering = false;
    }

    pub fn load_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Load(_)))
            .count()
    }
}

impl AudioEngine for FakeEngine {
    type Handle = FakeHandle;

    fn load(&mut self, path: &Path) -> Result<FakeHandle, EngineError> {
        self.calls.push(Call::Load(path.to_path_buf()));
        if self.unloadable.contains(path) {
            return Err(EngineError::Decode {
                path: path.to_path_buf(),
                reason: "scripted failure".into(),
            });
        }
        Ok(FakeHandle {
            path: path.to_path_buf(),
            title: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned()),
            duration: self.durations.get(path).copied().unwrap_or(180),
        })
    }

    fn play(&mut self, handle: &mut FakeHandle, _looped: bool) -> Result<(), EngineError> {
        self.calls.push(Call::Play(handle.path.clone()));
        if self.unplayable.contains(&handle.path) {
            return Err(EngineError::Decode {
                path: handle.path.clone(),
                reason: "scripted playback failure".into(),
            });
        }
        self.rendering = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.rendering = false;
    }

    fn unload(&mut self, handle: FakeHandle) {
        self.calls.push(Call::Unload(handle.path));
    }

    fn is_rendering(&self) -> bool {
        self.rendering
    }

    fn set_volume(&mut self, level: u8) {
        self.calls.push(Call::SetVolume(level));
    }
}
