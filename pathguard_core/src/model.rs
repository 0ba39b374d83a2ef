//! Input data and the closed enumerations shared across the engine.

use crate::geometry::{HorizonSegment, Point};
use serde::{Deserialize, Serialize};

/// One analysis input: the flown trajectory, the plan it should follow,
/// the terrain horizon, and how far the trajectory may stray from the plan.
///
/// Immutable once loaded; a new load replaces the whole value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    /// Maximum allowed distance from the plan (>= 0)
    pub acceptable_deviation: f64,

    /// Actually flown samples, in order
    pub trajectory: Vec<Point>,

    /// Intended waypoints, in order
    pub plan: Vec<Point>,

    /// Independent obstacle edges in the X-Z plane
    pub horizon: Vec<HorizonSegment>,
}

/// Coordinate axis used to project a 3D point onto a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Picks this axis' coordinate out of a point.
    #[inline]
    pub fn select(self, p: &Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
            Axis::Z => p.z,
        }
    }

    /// Axis title shown next to a view.
    pub fn title(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// How a point or line is styled on a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualCategory {
    Trajectory,
    Plan,
    Danger,
    Horizon,
}

impl VisualCategory {
    /// Every category, in table order.
    pub const ALL: [VisualCategory; 4] = [
        VisualCategory::Trajectory,
        VisualCategory::Plan,
        VisualCategory::Danger,
        VisualCategory::Horizon,
    ];

    #[inline]
    fn slot(self) -> usize {
        match self {
            VisualCategory::Trajectory => 0,
            VisualCategory::Plan => 1,
            VisualCategory::Danger => 2,
            VisualCategory::Horizon => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VisualCategory::Trajectory => "trajectory",
            VisualCategory::Plan => "plan",
            VisualCategory::Danger => "danger",
            VisualCategory::Horizon => "horizon",
        }
    }
}

impl std::fmt::Display for VisualCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fixed-size table with one optional slot per [`VisualCategory`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable<T> {
    slots: [Option<T>; 4],
}

impl<T> CategoryTable<T> {
    pub fn new() -> Self {
        Self {
            slots: [None, None, None, None],
        }
    }

    pub fn get(&self, category: VisualCategory) -> Option<&T> {
        self.slots[category.slot()].as_ref()
    }

    /// Stores a value, returning the previous one.
    pub fn insert(&mut self, category: VisualCategory, value: T) -> Option<T> {
        self.slots[category.slot()].replace(value)
    }

    pub fn contains(&self, category: VisualCategory) -> bool {
        self.slots[category.slot()].is_some()
    }

    pub fn clear(&mut self) {
        self.slots = [None, None, None, None];
    }

    /// Occupied slots in table order.
    pub fn iter(&self) -> impl Iterator<Item = (VisualCategory, &T)> {
        VisualCategory::ALL
            .into_iter()
            .filter_map(move |c| self.get(c).map(|v| (c, v)))
    }
}

impl<T> Default for CategoryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// 8-bit RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    #[test]
    fn test_axis_select() {
        let p = point(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.select(&p), 1.0);
        assert_eq!(Axis::Y.select(&p), 2.0);
        assert_eq!(Axis::Z.select(&p), 3.0);
    }

    #[test]
    fn test_category_table() {
        let mut table = CategoryTable::new();
        assert!(!table.contains(VisualCategory::Danger));

        table.insert(VisualCategory::Danger, 1);
        table.insert(VisualCategory::Trajectory, 2);
        assert_eq!(table.get(VisualCategory::Danger), Some(&1));
        assert_eq!(table.insert(VisualCategory::Danger, 3), Some(1));

        let order: Vec<_> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![VisualCategory::Trajectory, VisualCategory::Danger]);

        table.clear();
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_input_data_json_shape() {
        let json = r#"{
            "acceptable_deviation": 2.5,
            "trajectory": [[0.0, 1.0, 2.0]],
            "plan": [],
            "horizon": [{"x1": -1.0, "z1": 5.0, "x2": 1.0, "z2": 5.0}]
        }"#;
        let data: InputData = serde_json::from_str(json).unwrap();

        assert_eq!(data.acceptable_deviation, 2.5);
        assert_eq!(data.trajectory, vec![point(0.0, 1.0, 2.0)]);
        assert_eq!(data.horizon[0], HorizonSegment::new(-1.0, 5.0, 1.0, 5.0));
    }
}
