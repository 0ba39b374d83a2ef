//! Classification summary for machine consumption.

use pathguard_core::AnalysisSession;
use serde::Serialize;

/// Counts and danger indices of one classified session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationSummary {
    pub source: String,
    pub acceptable_deviation: f64,
    pub trajectory_samples: usize,
    pub plan_waypoints: usize,
    pub horizon_segments: usize,

    /// Trajectory indices further than the acceptable deviation from the plan
    pub danger_points: Vec<usize>,

    /// Start indices of trajectory segments crossing the horizon
    pub danger_segments: Vec<usize>,

    /// Share of samples flagged off-plan, 0 for an empty trajectory
    pub off_plan_ratio: f64,
}

impl ClassificationSummary {
    pub fn from_session(source: impl Into<String>, session: &AnalysisSession) -> Self {
        let data = session.data();
        let report = session.report();
        let samples = data.trajectory.len();

        let off_plan_ratio = if samples == 0 {
            0.0
        } else {
            report.danger_points.len() as f64 / samples as f64
        };

        Self {
            source: source.into(),
            acceptable_deviation: data.acceptable_deviation,
            trajectory_samples: samples,
            plan_waypoints: data.plan.len(),
            horizon_segments: data.horizon.len(),
            danger_points: report.danger_points.iter().copied().collect(),
            danger_segments: report.danger_segment_starts.iter().copied().collect(),
            off_plan_ratio,
        }
    }
}
