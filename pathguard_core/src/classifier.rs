//! Danger Classifier - flags trajectory samples that stray from the plan
//! and trajectory segments that cut through the terrain horizon.
//!
//! Results are keyed by trajectory index. Two samples with identical
//! coordinates (a hover, a revisit) are classified independently.

use crate::geometry::{point_segment_distance, segments_intersect_xz, HorizonSegment, Point};
use crate::model::InputData;
use serde::Serialize;
use std::collections::BTreeSet;

/// Classification of one trajectory against its plan and horizon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DangerReport {
    /// Indices of samples whose deviation exceeds the acceptable threshold
    pub danger_points: BTreeSet<usize>,

    /// Indices `i` whose segment `(i, i + 1)` crosses a horizon edge
    pub danger_segment_starts: BTreeSet<usize>,
}

impl DangerReport {
    /// Whether sample `index` deviates too far from the plan.
    pub fn is_danger_point(&self, index: usize) -> bool {
        self.danger_points.contains(&index)
    }

    /// Whether the segment starting at sample `index` crosses the horizon.
    pub fn is_danger_segment(&self, index: usize) -> bool {
        self.danger_segment_starts.contains(&index)
    }

    /// True when nothing was flagged.
    pub fn is_clear(&self) -> bool {
        self.danger_points.is_empty() && self.danger_segment_starts.is_empty()
    }
}

/// Minimum distance from `p` to the plan polyline.
///
/// Returns `None` when the plan has fewer than two points and therefore no
/// segments to measure against.
pub fn deviation_from_plan(plan: &[Point], p: &Point) -> Option<f64> {
    if plan.len() < 2 {
        return None;
    }

    let min = plan
        .windows(2)
        .map(|seg| point_segment_distance(&seg[0], &seg[1], p))
        .fold(f64::INFINITY, f64::min);
    Some(min)
}

/// Whether the X-Z projection of `start-end` crosses any horizon edge.
///
/// Stops at the first crossing found.
pub fn crosses_horizon(start: &Point, end: &Point, horizon: &[HorizonSegment]) -> bool {
    horizon
        .iter()
        .any(|h| segments_intersect_xz(start, end, &h.start(), &h.end()))
}

/// Classifies every sample and segment of `trajectory`.
///
/// A sample is dangerous when its distance to the nearest plan segment is
/// strictly greater than `acceptable_deviation`, or unconditionally when the
/// plan has no segments at all. Runs in `O(N * (H + M))`.
pub fn classify(
    trajectory: &[Point],
    plan: &[Point],
    horizon: &[HorizonSegment],
    acceptable_deviation: f64,
) -> DangerReport {
    let mut report = DangerReport::default();

    for (i, p) in trajectory.iter().enumerate() {
        if let Some(next) = trajectory.get(i + 1) {
            if crosses_horizon(p, next, horizon) {
                report.danger_segment_starts.insert(i);
            }
        }

        let over_threshold = match deviation_from_plan(plan, p) {
            Some(deviation) => deviation > acceptable_deviation,
            None => true,
        };
        if over_threshold {
            report.danger_points.insert(i);
        }
    }

    report
}

/// Classifies a loaded input.
pub fn classify_input(data: &InputData) -> DangerReport {
    classify(
        &data.trajectory,
        &data.plan,
        &data.horizon,
        data.acceptable_deviation,
    )
}
