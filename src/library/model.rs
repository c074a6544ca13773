use std::path::PathBuf;

/// An audio file found under the picker root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub path: PathBuf,
    /// Path relative to the scanned root, used for listing and sorting.
    pub display: String,
}
