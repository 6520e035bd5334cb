//! Collaborator seams for handler side effects.
//!
//! Handlers never perform I/O themselves; they call these traits. Real
//! implementations wrap the hub's REST and WebSocket services, which live
//! outside this crate. All traits are `Send + Sync` because the timer tail
//! runs on a background task.

use serde::Serialize;

/// The hub's live-update channel (sensor and light subscriptions).
pub trait LiveChannel: Send + Sync {
    fn connect(&self);
    fn disconnect(&self);
}

/// Media playback control.
pub trait MediaControl: Send + Sync {
    /// Sets the playback volume. The value is forwarded as parsed; callers
    /// do not guard against NaN or out-of-range input here.
    fn set_volume(&self, value: f64);
    fn play(&self);
    fn pause(&self);
    fn next(&self);
    fn previous(&self);
}

/// One active timer as reported by the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerEntry {
    pub id: String,
    /// Remaining time in seconds.
    pub remaining_time: u64,
}

/// The hub's timer service. Listing may block on the network; handlers call
/// it from a background task, never from the dispatch thread.
pub trait TimerBackend: Send + Sync {
    fn list_timers(&self) -> Vec<TimerEntry>;
}
