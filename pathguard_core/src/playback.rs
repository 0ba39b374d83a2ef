//! Playback Controller - renders the classified scene onto both views,
//! either all at once or as a stepped reveal of the trajectory.
//!
//! Every frame is a full redraw: both views are cleared and the scene is
//! replayed with all lines before all points, so markers always sit on top.
//!
//! # Reveal state machine
//!
//! ```text
//!            start_reveal              tick (index < last)
//!   Idle ─────────────────► Revealing{0} ──────────────► Revealing{index + 1}
//!    ▲                           │
//!    └───── tick (index == last) ┴── cancel
//! ```

use crate::classifier::DangerReport;
use crate::config::WorkbenchConfig;
use crate::geometry::Point;
use crate::model::{InputData, VisualCategory};
use crate::projection::ProjectionView;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from the playback controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("a reveal is already in progress (next frame {next_index})")]
    AlreadyRevealing { next_index: usize },
}

/// The two projections a scene is rendered onto.
#[derive(Debug, Clone)]
pub struct SceneViews {
    /// Conventionally X across, Y up
    pub top: ProjectionView,

    /// Conventionally X across, Z up; the only view with the horizon
    pub side: ProjectionView,
}

impl SceneViews {
    pub fn new(top: ProjectionView, side: ProjectionView) -> Self {
        Self { top, side }
    }

    pub fn from_config(config: &WorkbenchConfig) -> Self {
        Self::new(config.top_view.build(), config.side_view.build())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectionView> {
        [&self.top, &self.side].into_iter()
    }

    pub fn clear(&mut self) {
        self.top.clear();
        self.side.clear();
    }

    fn add_line(&mut self, category: VisualCategory, start: &Point, end: &Point) {
        self.top.add_line(category, start, end);
        self.side.add_line(category, start, end);
    }

    fn add_point(&mut self, category: VisualCategory, p: &Point) {
        self.top.add_point(category, p);
        self.side.add_point(category, p);
    }

    fn resize_to_fit(&mut self) {
        self.top.resize_to_fit();
        self.side.resize_to_fit();
    }
}

/// Redraws the whole scene on both views.
///
/// Line series for horizon, plan and trajectory are all emitted before any
/// point series, in that category order.
///
/// With `stop_at = Some(k)` only trajectory samples `0..=k` and the segments
/// between them are drawn; `None` draws the full trajectory. Horizon and plan
/// are always drawn in full. Views that did not register a category simply
/// skip it.
pub fn render_full(
    views: &mut SceneViews,
    data: &InputData,
    report: &DangerReport,
    stop_at: Option<usize>,
) {
    views.clear();

    let visible = match stop_at {
        Some(stop) => data.trajectory.len().min(stop.saturating_add(1)),
        None => data.trajectory.len(),
    };
    let shown = &data.trajectory[..visible];

    // Lines first, across every category
    for h in &data.horizon {
        views.add_line(VisualCategory::Horizon, &h.start(), &h.end());
    }
    for seg in data.plan.windows(2) {
        views.add_line(VisualCategory::Plan, &seg[0], &seg[1]);
    }
    for (i, seg) in shown.windows(2).enumerate() {
        let category = if report.is_danger_segment(i) {
            VisualCategory::Danger
        } else {
            VisualCategory::Trajectory
        };
        views.add_line(category, &seg[0], &seg[1]);
    }

    for h in &data.horizon {
        views.add_point(VisualCategory::Horizon, &h.start());
        views.add_point(VisualCategory::Horizon, &h.end());
    }
    for p in &data.plan {
        views.add_point(VisualCategory::Plan, p);
    }
    for (i, p) in shown.iter().enumerate() {
        let category = if report.is_danger_point(i) {
            VisualCategory::Danger
        } else {
            VisualCategory::Trajectory
        };
        views.add_point(category, p);
    }

    views.resize_to_fit();
}

/// Reveal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    /// The next tick draws trajectory samples `0..=next_index`
    Revealing { next_index: usize },
}

/// Outcome of one [`PlaybackController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Frame drawn up to `index`; schedule the next tick after `next_in`
    Frame { index: usize, next_in: Duration },
    /// Terminal frame drawn up to `index`; the controller is idle again
    Finished { index: usize },
    /// Nothing to do (never started, finished, or cancelled)
    Idle,
}

/// Drives the stepped reveal one frame at a time.
///
/// The controller never sleeps itself; callers schedule the next `tick`
/// after the returned delay, on whatever clock they run on.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    frame_delay: Duration,
}

impl PlaybackController {
    pub fn new(frame_delay: Duration) -> Self {
        Self {
            state: PlaybackState::Idle,
            frame_delay,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == PlaybackState::Idle
    }

    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// Clears both views and arms the reveal at sample 0.
    pub fn start_reveal(&mut self, views: &mut SceneViews) -> Result<(), PlaybackError> {
        if let PlaybackState::Revealing { next_index } = self.state {
            return Err(PlaybackError::AlreadyRevealing { next_index });
        }

        views.clear();
        self.state = PlaybackState::Revealing { next_index: 0 };
        Ok(())
    }

    /// Draws the next frame, or does nothing when idle.
    pub fn tick(&mut self, views: &mut SceneViews, data: &InputData, report: &DangerReport) -> Tick {
        let PlaybackState::Revealing { next_index: index } = self.state else {
            return Tick::Idle;
        };

        render_full(views, data, report, Some(index));

        let last = data.trajectory.len().saturating_sub(1);
        if index >= last {
            debug!("reveal finished at sample {}", index);
            self.state = PlaybackState::Idle;
            Tick::Finished { index }
        } else {
            debug!("reveal frame {}/{}", index, last);
            self.state = PlaybackState::Revealing {
                next_index: index + 1,
            };
            Tick::Frame {
                index,
                next_in: self.frame_delay,
            }
        }
    }

    /// Stops a running reveal. Returns whether one was running.
    ///
    /// The views keep the last drawn frame.
    pub fn cancel(&mut self) -> bool {
        let was_revealing = !self.is_idle();
        self.state = PlaybackState::Idle;
        was_revealing
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}
