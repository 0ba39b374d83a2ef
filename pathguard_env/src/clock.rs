//! Clock trait driving the stepped trajectory reveal.

use async_trait::async_trait;
use std::time::Duration;

/// Time source for the playback loop.
///
/// This trait abstracts the "real world" clock so the reveal driver can run
/// against wall time in the viewer and against a virtual clock in tests.
///
/// # Implementations
///
/// - **Production**: `TokioClock` - wraps `tokio::time`
/// - **Virtual**: `ManualClock` - time moves only when slept or advanced
#[async_trait]
pub trait PlaybackClock: Send + Sync + 'static {
    /// Returns the monotonic time since the clock was created.
    ///
    /// The dashboard compares this against frame deadlines instead of
    /// blocking in `sleep`.
    fn now(&self) -> Duration;

    /// Suspends the caller for the given duration.
    ///
    /// In production: wraps `tokio::time::sleep`
    /// In virtual time: advances the clock and returns immediately
    async fn sleep(&self, duration: Duration);
}
