//! A modal list of audio files for choosing what to play or queue.

use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;

use super::model::LibraryEntry;
use super::scan::scan;

pub struct FilePicker {
    root: PathBuf,
    entries: Vec<LibraryEntry>,
    selected: usize,
}

impl FilePicker {
    /// Scan `root` and open a picker over what was found.
    pub fn open(root: &Path, settings: &LibrarySettings) -> Self {
        Self::with_entries(root, scan(root, settings))
    }

    pub fn with_entries(root: &Path, entries: Vec<LibraryEntry>) -> Self {
        Self {
            root: root.to_path_buf(),
            entries,
            selected: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    /// Confirm the highlighted file. `None` when there was nothing to pick.
    pub fn choose(self) -> Option<PathBuf> {
        self.entries.into_iter().nth(self.selected).map(|e| e.path)
    }
}
