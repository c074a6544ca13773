//! Audio output: the engine contract used by the player and its `rodio`
//! implementation.

mod engine;
mod sink;
mod tags;
mod types;

pub use engine::RodioEngine;
pub use types::*;
