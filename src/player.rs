//! Playback state, the play-next queue and elapsed-time accounting.

mod clock;
mod controller;
mod queue;

pub use clock::*;
pub use controller::*;
pub use queue::*;

#[cfg(test)]
pub(crate) mod testing;
