//! Shared collaborator context.

use std::sync::Arc;

use crate::actions::{LiveChannel, MediaControl, TimerBackend};

/// Collaborators the dispatcher's handlers call into.
///
/// Constructed once during application startup and passed by reference to
/// whatever needs it. There is exactly one live-update channel instance per
/// context; nothing here is a hidden global.
#[derive(Clone)]
pub struct HubContext {
    pub channel: Arc<dyn LiveChannel>,
    pub media: Arc<dyn MediaControl>,
    pub timers: Arc<dyn TimerBackend>,
}

impl HubContext {
    pub fn new(
        channel: Arc<dyn LiveChannel>,
        media: Arc<dyn MediaControl>,
        timers: Arc<dyn TimerBackend>,
    ) -> Self {
        Self {
            channel,
            media,
            timers,
        }
    }
}
