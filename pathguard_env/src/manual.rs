//! Virtual clock for deterministic playback.

use crate::PlaybackClock;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Clock whose time only moves when slept on or advanced by hand.
///
/// Clones share the same virtual time, so a test can hold one handle while
/// the reveal driver sleeps on another.
#[derive(Debug, Default)]
pub struct ManualClock {
    /// Current virtual time (nanoseconds since creation)
    virtual_time_ns: Arc<Mutex<u64>>,

    /// Number of completed `sleep` calls
    sleeps: Arc<Mutex<u64>>,
}

impl ManualClock {
    /// Creates a clock at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances virtual time by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.virtual_time_ns.lock().unwrap_or_else(|e| e.into_inner());
        *time += duration.as_nanos() as u64;
    }

    /// Returns how many times `sleep` has been awaited.
    pub fn sleep_count(&self) -> u64 {
        *self.sleeps.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clone for ManualClock {
    fn clone(&self) -> Self {
        Self {
            virtual_time_ns: Arc::clone(&self.virtual_time_ns),
            sleeps: Arc::clone(&self.sleeps),
        }
    }
}

#[async_trait]
impl PlaybackClock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(*self.virtual_time_ns.lock().unwrap_or_else(|e| e.into_inner()))
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        *self.sleeps.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }
}
