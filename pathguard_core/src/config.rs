//! View and workbench configuration.

use crate::model::{Axis, Rgb, VisualCategory};
use crate::projection::{CategoryStyle, ProjectionView};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration of one projection view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Title shown above the view
    pub title: String,

    pub vertical: Axis,
    pub horizontal: Axis,

    /// Drawable categories and their colors; unlisted categories are hidden
    pub styles: Vec<(VisualCategory, CategoryStyle)>,
}

impl ViewConfig {
    /// Top-down view: X across, Y up. No horizon.
    pub fn top_down() -> Self {
        Self {
            title: "Top view".to_string(),
            vertical: Axis::Y,
            horizontal: Axis::X,
            styles: vec![
                (VisualCategory::Trajectory, CategoryStyle::solid(Rgb::BLACK)),
                (VisualCategory::Danger, CategoryStyle::solid(Rgb::RED)),
                (VisualCategory::Plan, CategoryStyle::solid(Rgb::BLUE)),
            ],
        }
    }

    /// Side view: X across, Z up, with the terrain horizon.
    pub fn side() -> Self {
        Self {
            title: "Side view".to_string(),
            vertical: Axis::Z,
            horizontal: Axis::X,
            styles: vec![
                (VisualCategory::Trajectory, CategoryStyle::solid(Rgb::BLACK)),
                (VisualCategory::Danger, CategoryStyle::solid(Rgb(255, 40, 40))),
                (VisualCategory::Plan, CategoryStyle::solid(Rgb::BLUE)),
                (VisualCategory::Horizon, CategoryStyle::solid(Rgb::GREEN)),
            ],
        }
    }

    /// Builds an empty view with axes set and categories registered.
    pub fn build(&self) -> ProjectionView {
        let mut view = ProjectionView::new(self.title.clone(), self.vertical, self.horizontal);
        for (category, style) in &self.styles {
            view.set_category_style(*category, style.point, style.line);
        }
        view
    }
}

/// Configuration for an analysis workbench.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    pub top_view: ViewConfig,
    pub side_view: ViewConfig,

    /// Delay between reveal frames in milliseconds
    pub frame_delay_ms: u64,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            top_view: ViewConfig::top_down(),
            side_view: ViewConfig::side(),
            frame_delay_ms: 250,
        }
    }
}

impl WorkbenchConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    /// Reads a JSON config; missing fields fall back to the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }
}
