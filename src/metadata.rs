//! Per-track display metadata and the fallback policy applied to raw tags.
//!
//! Decoders are inconsistent about missing tags: some omit the field, some
//! hand back an empty string or a single space. Anything shorter than two
//! characters is treated as absent and shown as [`UNKNOWN`].

use thiserror::Error;

use crate::audio::{EngineError, TagSource};

/// Shown in place of a missing or too-short tag.
pub const UNKNOWN: &str = "Unknown";

/// Tags shorter than this (in characters) count as absent.
const MIN_TAG_CHARS: usize = 2;

/// Display metadata for the loaded track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_seconds: u64,
}

/// Why a track could not reach the playing state.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The file decoded but its length is unknown.
    #[error("duration unavailable")]
    DurationUnavailable,
}

/// Apply the fallback policy to a single raw tag value.
pub fn resolve_field(raw: Option<&str>) -> String {
    match raw {
        Some(v) if v.chars().count() >= MIN_TAG_CHARS => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Build [`TrackMetadata`] from a loaded handle.
pub fn resolve<S: TagSource + ?Sized>(source: &S) -> Result<TrackMetadata, LoadFailure> {
    let duration = source.duration_seconds();
    if duration <= 0 {
        return Err(LoadFailure::DurationUnavailable);
    }

    Ok(TrackMetadata {
        title: resolve_field(source.title()),
        artist: resolve_field(source.artist()),
        album: resolve_field(source.album()),
        duration_seconds: duration as u64,
    })
}
