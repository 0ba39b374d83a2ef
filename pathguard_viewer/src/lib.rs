//! PathGuard Viewer
//!
//! Front-end pieces around `pathguard_core`:
//! - a seeded synthetic flight for demos
//! - the machine-readable classification summary printed by `--json`
//! - an optional terminal dashboard (feature `dashboard`)

pub mod summary;
pub mod synthetic;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use summary::ClassificationSummary;
pub use synthetic::{demo_flight, DemoConfig, SyntheticError};

#[cfg(feature = "dashboard")]
pub use dashboard::ViewerDashboard;
