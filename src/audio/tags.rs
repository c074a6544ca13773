//! Tag extraction via `lofty`.

use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;

/// Raw tag values as stored in the file, before any fallback is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
}

/// Read tags and properties from `path`.
///
/// Unreadable or untagged files yield empty `RawTags` rather than an error:
/// tag problems never stop a file that decodes from playing.
pub(super) fn read_tags(path: &Path) -> RawTags {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return RawTags::default();
    };

    let duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());

    let mut tags = RawTags {
        duration,
        ..RawTags::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        tags.title = tag.title().map(|v| v.into_owned());
        tags.artist = tag.artist().map(|v| v.into_owned());
        tags.album = tag.album().map(|v| v.into_owned());
    }

    tags
}
