//! Input loading - the text and JSON formats an analysis is read from.
//!
//! The text format is a flat stream of whitespace separated tokens:
//!
//! ```text
//! <trajectory count> <plan count> <horizon count> <acceptable deviation>
//! x y z            (trajectory count times)
//! x y z            (plan count times)
//! x1 z1 x2 z2      (horizon count times)
//! ```
//!
//! Line breaks carry no meaning and tokens after the last record are ignored.

use crate::geometry::{point, HorizonSegment};
use crate::model::InputData;
use std::path::{Path, PathBuf};
use std::str::{FromStr, SplitWhitespace};
use thiserror::Error;

/// Why an input could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source was read but its content does not describe an input
    #[error("Malformed data: {what}")]
    MalformedInput { what: String },

    /// The source could not be opened or read
    #[error("Cannot read {path}: {source}")]
    UnreadableResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Creates a malformed-input error.
    pub fn malformed(what: impl Into<String>) -> Self {
        Self::MalformedInput { what: what.into() }
    }
}

/// Pulls typed values off a token stream, naming what was expected on failure.
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next<T: FromStr>(&mut self, what: impl FnOnce() -> String) -> Result<T, LoadError> {
        let Some(token) = self.inner.next() else {
            return Err(LoadError::malformed(format!("missing {}", what())));
        };
        token
            .parse()
            .map_err(|_| LoadError::malformed(format!("invalid {} '{}'", what(), token)))
    }
}

/// Parses the text format.
pub fn parse_input(text: &str) -> Result<InputData, LoadError> {
    let mut tokens = Tokens::new(text);

    let trajectory_count: usize = tokens.next(|| "trajectory count".to_string())?;
    let plan_count: usize = tokens.next(|| "plan count".to_string())?;
    let horizon_count: usize = tokens.next(|| "horizon count".to_string())?;
    let acceptable_deviation: f64 = tokens.next(|| "acceptable deviation".to_string())?;
    if !(acceptable_deviation >= 0.0) {
        return Err(LoadError::malformed(format!(
            "acceptable deviation {} is not a non-negative number",
            acceptable_deviation
        )));
    }

    let mut read_points = |count: usize, section: &str| {
        let mut points = Vec::with_capacity(count.min(1 << 16));
        for i in 0..count {
            let x = tokens.next(|| format!("{} point {} x", section, i))?;
            let y = tokens.next(|| format!("{} point {} y", section, i))?;
            let z = tokens.next(|| format!("{} point {} z", section, i))?;
            points.push(point(x, y, z));
        }
        Ok::<_, LoadError>(points)
    };
    let trajectory = read_points(trajectory_count, "trajectory")?;
    let plan = read_points(plan_count, "plan")?;

    let mut horizon = Vec::with_capacity(horizon_count.min(1 << 16));
    for i in 0..horizon_count {
        let x1 = tokens.next(|| format!("horizon segment {} x1", i))?;
        let z1 = tokens.next(|| format!("horizon segment {} z1", i))?;
        let x2 = tokens.next(|| format!("horizon segment {} x2", i))?;
        let z2 = tokens.next(|| format!("horizon segment {} z2", i))?;
        horizon.push(HorizonSegment::new(x1, z1, x2, z2));
    }

    Ok(InputData {
        acceptable_deviation,
        trajectory,
        plan,
        horizon,
    })
}

/// Parses a JSON `InputData` document.
pub fn parse_json_input(text: &str) -> Result<InputData, LoadError> {
    let data: InputData =
        serde_json::from_str(text).map_err(|e| LoadError::malformed(e.to_string()))?;
    if !(data.acceptable_deviation >= 0.0) {
        return Err(LoadError::malformed(format!(
            "acceptable deviation {} is not a non-negative number",
            data.acceptable_deviation
        )));
    }
    Ok(data)
}

/// Reads an input file. `.json` files use the JSON format, anything else
/// the text format.
pub fn read_input(path: impl AsRef<Path>) -> Result<InputData, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::UnreadableResource {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        parse_json_input(&text)
    } else {
        parse_input(&text)
    }
}
