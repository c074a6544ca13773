//! Wall-clock source and elapsed-time helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Whole seconds since the Unix epoch.
pub type EpochSeconds = u64;

pub trait Clock {
    fn now(&self) -> EpochSeconds;
}

/// The real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochSeconds {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Format seconds as `MM:SS`, or `H:MM:SS` from one hour up.
pub fn format_clock(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

pub fn remaining(elapsed: u64, duration: u64) -> u64 {
    duration.saturating_sub(elapsed)
}

/// Fraction of the track played, in `0.0..=1.0`.
pub fn progress_ratio(elapsed: u64, duration: u64) -> f64 {
    if duration == 0 {
        return 0.0;
    }
    (elapsed as f64 / duration as f64).clamp(0.0, 1.0)
}
