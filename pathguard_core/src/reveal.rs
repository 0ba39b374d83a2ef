//! Async reveal driver.
//!
//! Runs a workbench's stepped reveal to completion against a
//! [`PlaybackClock`]: one full redraw per frame, one `sleep` between frames.
//! Each frame is handed to a callback, which may cancel the reveal; the
//! next frame is only scheduled while the reveal is still active.

use crate::playback::Tick;
use crate::workbench::{Workbench, WorkbenchError};
use pathguard_env::PlaybackClock;

/// What a finished [`run_reveal`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSummary {
    /// Frames drawn, terminal frame included
    pub frames: usize,

    /// Trajectory index of the last drawn frame
    pub last_index: Option<usize>,

    /// Whether the reveal was cancelled before its terminal frame
    pub cancelled: bool,
}

/// Starts a reveal on `workbench` and steps it until it finishes or is
/// cancelled by `on_frame`.
pub async fn run_reveal<C, F>(
    workbench: &mut Workbench,
    clock: &C,
    mut on_frame: F,
) -> Result<RevealSummary, WorkbenchError>
where
    C: PlaybackClock,
    F: FnMut(&mut Workbench, usize),
{
    workbench.start_reveal()?;

    let mut summary = RevealSummary {
        frames: 0,
        last_index: None,
        cancelled: false,
    };

    loop {
        match workbench.tick() {
            Tick::Frame { index, next_in } => {
                summary.frames += 1;
                summary.last_index = Some(index);
                on_frame(workbench, index);

                if !workbench.is_revealing() {
                    summary.cancelled = true;
                    return Ok(summary);
                }
                clock.sleep(next_in).await;
            }
            Tick::Finished { index } => {
                summary.frames += 1;
                summary.last_index = Some(index);
                on_frame(workbench, index);
                return Ok(summary);
            }
            Tick::Idle => {
                summary.cancelled = true;
                return Ok(summary);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkbenchConfig;
    use crate::geometry::point;
    use crate::model::{InputData, VisualCategory};
    use crate::workbench::SessionStatus;
    use pathguard_env::ManualClock;
    use std::time::Duration;

    fn loaded_workbench(samples: usize) -> Workbench {
        let mut workbench = Workbench::new(&WorkbenchConfig::default());
        let trajectory = (0..samples).map(|i| point(i as f64, 0.0, 0.0)).collect();
        workbench
            .load_data(InputData {
                acceptable_deviation: 0.0,
                trajectory,
                plan: vec![],
                horizon: vec![],
            })
            .unwrap();
        workbench
    }

    #[tokio::test]
    async fn test_reveal_runs_every_frame() {
        let mut workbench = loaded_workbench(5);
        let clock = ManualClock::new();
        let mut drawn = Vec::new();

        let summary = run_reveal(&mut workbench, &clock, |wb, index| {
            drawn.push((index, wb.views().top.points(VisualCategory::Danger).len()));
        })
        .await
        .unwrap();

        assert_eq!(
            summary,
            RevealSummary {
                frames: 5,
                last_index: Some(4),
                cancelled: false
            }
        );
        assert_eq!(drawn, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);

        // Four gaps between five frames, 250 ms each
        assert_eq!(clock.sleep_count(), 4);
        assert_eq!(clock.now(), Duration::from_millis(1000));
        assert_eq!(workbench.status(), SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_reveal_cancelled_from_callback() {
        let mut workbench = loaded_workbench(10);
        let clock = ManualClock::new();

        let summary = run_reveal(&mut workbench, &clock, |wb, index| {
            if index == 2 {
                wb.cancel_reveal();
            }
        })
        .await
        .unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.last_index, Some(2));
        assert_eq!(clock.sleep_count(), 2);
        assert!(!workbench.is_revealing());
    }

    #[tokio::test]
    async fn test_single_sample_reveal_never_sleeps() {
        let mut workbench = loaded_workbench(1);
        let clock = ManualClock::new();

        let summary = run_reveal(&mut workbench, &clock, |_, _| {}).await.unwrap();

        assert_eq!(summary.frames, 1);
        assert_eq!(clock.sleep_count(), 0);
    }
}
