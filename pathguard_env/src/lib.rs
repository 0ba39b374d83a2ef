//! PathGuard Environment Abstraction Layer
//!
//! The stepped trajectory reveal is a sequence of frames separated by a
//! fixed delay. This crate provides the time source those frames are
//! scheduled against, so the same playback code runs against:
//! - **Wall time** (`TokioClock`) in the viewer
//! - **Virtual time** (`ManualClock`) in tests and headless runs
//!
//! # Example
//!
//! ```ignore
//! use pathguard_env::{PlaybackClock, TokioClock};
//!
//! async fn frames<C: PlaybackClock>(clock: &C) {
//!     loop {
//!         render_frame();
//!         clock.sleep(Duration::from_millis(250)).await;
//!     }
//! }
//! ```

mod clock;
mod manual;
mod tokio_impl;

pub use clock::PlaybackClock;
pub use manual::ManualClock;
pub use tokio_impl::TokioClock;
