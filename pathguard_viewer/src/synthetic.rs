//! Synthetic demo flight.
//!
//! Builds a reproducible input from a seed:
//! - A five-waypoint plan climbing to 40 m and back down
//! - A trajectory sampled along the plan with Gaussian position noise and a
//!   crosswind gust pushing it sideways for a stretch
//! - A ridge-shaped horizon whose peak pokes above the planned altitude

use nalgebra::Vector3;
use pathguard_core::{HorizonSegment, InputData, Point};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, NormalError};
use thiserror::Error;

/// Errors building a synthetic flight.
#[derive(Debug, Error)]
pub enum SyntheticError {
    #[error("invalid position noise: {0}")]
    InvalidNoise(#[from] NormalError),

    #[error("sample spacing must be positive, got {0}")]
    InvalidSpacing(f64),
}

/// Parameters of the demo flight.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Master seed for the noise
    pub seed: u64,

    /// Position noise standard deviation (meters)
    pub noise_std: f64,

    /// Distance between trajectory samples along the plan (meters)
    pub sample_spacing: f64,

    /// Sideways offset added during the gust (meters)
    pub gust_offset: f64,

    /// Allowed deviation from the plan (meters)
    pub acceptable_deviation: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            noise_std: 0.8,
            sample_spacing: 5.0,
            gust_offset: 9.0,
            acceptable_deviation: 4.0,
        }
    }
}

fn demo_plan() -> Vec<Point> {
    vec![
        Vector3::new(0.0, 0.0, 10.0),
        Vector3::new(50.0, 10.0, 40.0),
        Vector3::new(100.0, 20.0, 40.0),
        Vector3::new(150.0, 10.0, 35.0),
        Vector3::new(200.0, 0.0, 10.0),
    ]
}

fn demo_horizon() -> Vec<HorizonSegment> {
    vec![
        HorizonSegment::new(0.0, 0.0, 60.0, 5.0),
        HorizonSegment::new(60.0, 5.0, 80.0, 30.0),
        HorizonSegment::new(80.0, 30.0, 90.0, 48.0),
        HorizonSegment::new(90.0, 48.0, 100.0, 30.0),
        HorizonSegment::new(100.0, 30.0, 130.0, 2.0),
        HorizonSegment::new(130.0, 2.0, 200.0, 0.0),
    ]
}

/// Builds the demo flight for `config`.
pub fn demo_flight(config: &DemoConfig) -> Result<InputData, SyntheticError> {
    let spacing = config.sample_spacing;
    if !(spacing > 0.0 && spacing.is_finite()) {
        return Err(SyntheticError::InvalidSpacing(spacing));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_std)?;
    let plan = demo_plan();

    let mut trajectory = Vec::new();
    for seg in plan.windows(2) {
        let dir = seg[1] - seg[0];
        let steps = (dir.norm() / spacing).ceil().max(1.0) as usize;
        for step in 0..steps {
            let on_plan = seg[0] + dir * (step as f64 / steps as f64);
            let mut sample = on_plan
                + Vector3::new(
                    normal.sample(&mut rng),
                    normal.sample(&mut rng),
                    normal.sample(&mut rng),
                );

            // Crosswind gust between x = 120 and x = 145
            if (120.0..145.0).contains(&on_plan.x) {
                sample.y += config.gust_offset;
            }
            trajectory.push(sample);
        }
    }
    if let Some(last) = plan.last() {
        trajectory.push(*last);
    }

    Ok(InputData {
        acceptable_deviation: config.acceptable_deviation,
        trajectory,
        plan,
        horizon: demo_horizon(),
    })
}
