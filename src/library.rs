//! Finding audio files on disk and choosing among them.

mod model;
mod picker;
mod scan;

pub use model::LibraryEntry;
pub use picker::FilePicker;
pub use scan::scan;
