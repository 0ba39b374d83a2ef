//! Workbench - the single owner of the current analysis session.
//!
//! Holds the loaded input and its classification, the two projection views
//! and the playback controller, and reports status transitions to whoever
//! is presenting them:
//!
//! - load: `Reading -> Computing -> Idle` (`Idle` also when the load fails)
//! - reveal: `Stepping -> Idle` at the terminal frame or on cancel
//!
//! Loading and starting a reveal are both refused while a reveal runs.

use crate::classifier::{classify_input, DangerReport};
use crate::config::WorkbenchConfig;
use crate::loader::{read_input, LoadError};
use crate::model::InputData;
use crate::playback::{render_full, PlaybackController, PlaybackError, PlaybackState, SceneViews, Tick};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// What the workbench is busy with, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Reading,
    Computing,
    Stepping,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SessionStatus::Idle => "",
            SessionStatus::Reading => "Reading data...",
            SessionStatus::Computing => "Computing danger points and segments...",
            SessionStatus::Stepping => "Stepping through the trajectory...",
        };
        f.write_str(text)
    }
}

/// Errors surfaced by workbench actions.
#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("cannot {action} while a reveal is in progress")]
    RevealInProgress { action: &'static str },
}

impl From<PlaybackError> for WorkbenchError {
    fn from(_: PlaybackError) -> Self {
        WorkbenchError::RevealInProgress {
            action: "start a reveal",
        }
    }
}

/// One loaded input together with its classification.
///
/// Both halves are replaced together; the report is never edited in place.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    data: InputData,
    report: DangerReport,
}

impl AnalysisSession {
    /// Classifies `data` and wraps both.
    pub fn new(data: InputData) -> Self {
        let report = classify_input(&data);
        Self { data, report }
    }

    pub fn data(&self) -> &InputData {
        &self.data
    }

    pub fn report(&self) -> &DangerReport {
        &self.report
    }
}

/// Callback receiving every status transition.
pub type StatusListener = Box<dyn FnMut(SessionStatus) + Send>;

/// Top-level controller for one analysis window.
pub struct Workbench {
    session: AnalysisSession,
    views: SceneViews,
    playback: PlaybackController,
    status: SessionStatus,
    listener: Option<StatusListener>,
}

impl Workbench {
    /// Creates a workbench with an empty session and empty views.
    pub fn new(config: &WorkbenchConfig) -> Self {
        Self {
            session: AnalysisSession::default(),
            views: SceneViews::from_config(config),
            playback: PlaybackController::new(config.frame_delay()),
            status: SessionStatus::Idle,
            listener: None,
        }
    }

    /// Registers a listener for status transitions.
    pub fn with_status_listener(mut self, listener: impl FnMut(SessionStatus) + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
        if let Some(listener) = self.listener.as_mut() {
            listener(status);
        }
    }

    fn ensure_not_revealing(&self, action: &'static str) -> Result<(), WorkbenchError> {
        match self.playback.state() {
            PlaybackState::Idle => Ok(()),
            PlaybackState::Revealing { next_index } => {
                warn!(
                    "refusing to {} while a reveal is in progress (next frame {})",
                    action, next_index
                );
                Err(WorkbenchError::RevealInProgress { action })
            }
        }
    }

    /// Reads an input file, classifies it and renders it in full.
    ///
    /// On failure the previous session and views are left untouched.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), WorkbenchError> {
        self.ensure_not_revealing("load new data")?;

        let path = path.as_ref();
        self.set_status(SessionStatus::Reading);
        let data = match read_input(path) {
            Ok(data) => data,
            Err(e) => {
                self.set_status(SessionStatus::Idle);
                return Err(e.into());
            }
        };
        info!("Read {}", path.display());

        self.install(data);
        Ok(())
    }

    /// Classifies an already parsed input and renders it in full.
    pub fn load_data(&mut self, data: InputData) -> Result<(), WorkbenchError> {
        self.ensure_not_revealing("load new data")?;
        self.install(data);
        Ok(())
    }

    fn install(&mut self, data: InputData) {
        self.set_status(SessionStatus::Computing);
        self.session = AnalysisSession::new(data);

        let report = self.session.report();
        info!(
            "Classified {} samples: {} off-plan, {} horizon crossings",
            self.session.data().trajectory.len(),
            report.danger_points.len(),
            report.danger_segment_starts.len()
        );

        self.redraw();
        self.set_status(SessionStatus::Idle);
    }

    /// Redraws the full scene for the current session.
    ///
    /// Refused while a reveal runs, since its next frame would overwrite it.
    pub fn render_full(&mut self) -> Result<(), WorkbenchError> {
        self.ensure_not_revealing("redraw the full scene")?;
        self.redraw();
        Ok(())
    }

    fn redraw(&mut self) {
        render_full(
            &mut self.views,
            self.session.data(),
            self.session.report(),
            None,
        );
    }

    /// Clears the views and arms a stepped reveal of the current session.
    pub fn start_reveal(&mut self) -> Result<(), WorkbenchError> {
        self.playback.start_reveal(&mut self.views)?;
        self.set_status(SessionStatus::Stepping);
        Ok(())
    }

    /// Draws the next reveal frame.
    pub fn tick(&mut self) -> Tick {
        let tick = self
            .playback
            .tick(&mut self.views, self.session.data(), self.session.report());
        if let Tick::Finished { .. } = tick {
            self.set_status(SessionStatus::Idle);
        }
        tick
    }

    /// Stops a running reveal, keeping the last drawn frame.
    pub fn cancel_reveal(&mut self) -> bool {
        let cancelled = self.playback.cancel();
        if cancelled {
            info!("Reveal cancelled");
            self.set_status(SessionStatus::Idle);
        }
        cancelled
    }

    pub fn is_revealing(&self) -> bool {
        !self.playback.is_idle()
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn views(&self) -> &SceneViews {
        &self.views
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("session", &self.session)
            .field("playback", &self.playback)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;
    use crate::model::VisualCategory;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    fn recording_workbench() -> (Workbench, Arc<Mutex<Vec<SessionStatus>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let workbench = Workbench::new(&WorkbenchConfig::default())
            .with_status_listener(move |s| sink.lock().unwrap().push(s));
        (workbench, seen)
    }

    fn two_samples() -> InputData {
        InputData {
            acceptable_deviation: 1.0,
            trajectory: vec![point(0.0, 0.0, 0.0), point(10.0, 5.0, 0.0)],
            plan: vec![point(0.0, 0.0, 0.0), point(10.0, 0.0, 0.0)],
            horizon: vec![],
        }
    }

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("pathguard_")
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_data_classifies_and_renders() {
        let (mut workbench, seen) = recording_workbench();
        workbench.load_data(two_samples()).unwrap();

        assert!(workbench.session().report().is_danger_point(1));
        assert!(!workbench.session().report().is_danger_point(0));
        assert_eq!(workbench.views().top.points(VisualCategory::Danger), &[[10.0, 5.0]]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![SessionStatus::Computing, SessionStatus::Idle]
        );
    }

    #[test]
    fn test_load_file_status_sequence() {
        let file = temp_file(".txt", "2 2 0 1  0 0 0  10 5 0  0 0 0  10 0 0");
        let (mut workbench, seen) = recording_workbench();
        workbench.load_file(file.path()).unwrap();

        assert_eq!(workbench.session().data(), &two_samples());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                SessionStatus::Reading,
                SessionStatus::Computing,
                SessionStatus::Idle
            ]
        );
    }

    #[test]
    fn test_failed_load_keeps_previous_session() {
        let file = temp_file(".txt", "2 0 0 1  0 0");
        let (mut workbench, seen) = recording_workbench();
        workbench.load_data(two_samples()).unwrap();
        let series_before = workbench.views().side.series().to_vec();
        seen.lock().unwrap().clear();

        let err = workbench.load_file(file.path()).unwrap_err();

        assert!(matches!(err, WorkbenchError::Load(LoadError::MalformedInput { .. })));
        assert_eq!(workbench.session().data(), &two_samples());
        assert_eq!(workbench.views().side.series(), series_before.as_slice());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![SessionStatus::Reading, SessionStatus::Idle]
        );
    }

    #[test]
    fn test_unreadable_file() {
        let (mut workbench, _) = recording_workbench();
        let err = workbench.load_file("/nonexistent/flight.txt").unwrap_err();
        assert!(matches!(err, WorkbenchError::Load(LoadError::UnreadableResource { .. })));
        assert_eq!(workbench.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_reveal_blocks_load_until_finished() {
        let (mut workbench, seen) = recording_workbench();
        workbench.load_data(two_samples()).unwrap();
        workbench.start_reveal().unwrap();
        assert_eq!(workbench.status(), SessionStatus::Stepping);

        assert!(matches!(
            workbench.load_data(InputData::default()),
            Err(WorkbenchError::RevealInProgress { .. })
        ));
        assert!(matches!(
            workbench.start_reveal(),
            Err(WorkbenchError::RevealInProgress { .. })
        ));
        assert_eq!(workbench.session().data(), &two_samples());

        assert!(matches!(workbench.tick(), Tick::Frame { index: 0, .. }));
        assert_eq!(workbench.tick(), Tick::Finished { index: 1 });
        assert_eq!(workbench.status(), SessionStatus::Idle);
        assert_eq!(seen.lock().unwrap().last(), Some(&SessionStatus::Idle));

        workbench.load_data(InputData::default()).unwrap();
    }

    #[test]
    fn test_cancel_reveal() {
        let (mut workbench, _) = recording_workbench();
        workbench.load_data(two_samples()).unwrap();
        workbench.start_reveal().unwrap();
        workbench.tick();

        assert!(workbench.cancel_reveal());
        assert!(!workbench.is_revealing());
        assert_eq!(workbench.status(), SessionStatus::Idle);
        assert_eq!(workbench.tick(), Tick::Idle);
        assert!(!workbench.cancel_reveal());
    }

    #[test]
    fn test_full_redraw_refused_while_revealing() {
        let (mut workbench, _) = recording_workbench();
        workbench.load_data(two_samples()).unwrap();
        workbench.start_reveal().unwrap();
        workbench.tick();
        let frame = workbench.views().side.series().to_vec();

        assert!(matches!(
            workbench.render_full(),
            Err(WorkbenchError::RevealInProgress { .. })
        ));
        assert_eq!(workbench.views().side.series(), frame.as_slice());

        workbench.cancel_reveal();
        workbench.render_full().unwrap();
        assert_eq!(workbench.views().top.points(VisualCategory::Danger), &[[10.0, 5.0]]);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(SessionStatus::Idle.to_string(), "");
        assert!(SessionStatus::Reading.to_string().starts_with("Reading"));
    }
}
