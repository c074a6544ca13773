//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and turns user intents into
//! playback controller calls.

mod model;

pub use model::*;
