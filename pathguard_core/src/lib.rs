//! PathGuard Core - Trajectory Safety Classification and Playback
//!
//! Compares a recorded 3D trajectory against its flight plan and a terrain
//! horizon, then renders the classified result onto two 2D projections:
//! 1. **Danger Classifier**: samples that stray too far from the plan, and
//!    segments that cut through the horizon
//! 2. **Projection Model**: axis selection, per-category series, autoscaling
//! 3. **Playback Controller**: full redraw or a stepped, timed reveal

pub mod geometry;
pub mod model;
pub mod classifier;
pub mod projection;
pub mod playback;
pub mod loader;
pub mod config;
pub mod workbench;
pub mod reveal;

// Re-export key types for convenience
pub use geometry::{HorizonSegment, Point};
pub use model::{Axis, InputData, Rgb, VisualCategory};
pub use classifier::{classify, classify_input, DangerReport};
pub use projection::{AxisRange, Bounds, CategoryStyle, ProjectionView, Series};
pub use playback::{render_full, PlaybackController, PlaybackError, PlaybackState, SceneViews, Tick};
pub use loader::{parse_input, read_input, LoadError};
pub use config::{ConfigError, ViewConfig, WorkbenchConfig};
pub use workbench::{AnalysisSession, SessionStatus, Workbench, WorkbenchError};
pub use reveal::{run_reveal, RevealSummary};
