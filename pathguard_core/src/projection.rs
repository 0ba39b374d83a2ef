//! Projection Model - a 2D view onto the 3D scene.
//!
//! A [`ProjectionView`] selects two coordinate axes, keeps the drawable
//! series for each registered [`VisualCategory`], and tracks the running
//! extent of every point it has been given so the view can autoscale.
//!
//! Series are stored in the order they are created, which is the order a
//! renderer must draw them in. Callers add every line of a scene before any
//! point so markers end up on top of the segments.

use crate::geometry::Point;
use crate::model::{Axis, CategoryTable, Rgb, VisualCategory};
use serde::{Deserialize, Serialize};

/// Visible window along one view axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for AxisRange {
    /// The `[0, 100]` window a view shows before it has been fitted.
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Running extent of projected points.
///
/// Starts at the origin, so the fitted window always includes `(0, 0)`.
/// Each bound only ever moves outward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub min_horizontal: f64,
    pub max_horizontal: f64,
    pub min_vertical: f64,
    pub max_vertical: f64,
}

impl Bounds {
    /// Widens the bounds to cover `(horizontal, vertical)`.
    pub fn include(&mut self, horizontal: f64, vertical: f64) {
        if horizontal < self.min_horizontal {
            self.min_horizontal = horizontal;
        }
        if horizontal > self.max_horizontal {
            self.max_horizontal = horizontal;
        }
        if vertical < self.min_vertical {
            self.min_vertical = vertical;
        }
        if vertical > self.max_vertical {
            self.max_vertical = vertical;
        }
    }
}

/// Point and line colors for one category on one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub point: Rgb,
    pub line: Rgb,
}

impl CategoryStyle {
    pub fn new(point: Rgb, line: Rgb) -> Self {
        Self { point, line }
    }

    /// Same color for points and lines.
    pub fn solid(color: Rgb) -> Self {
        Self::new(color, color)
    }
}

/// A projected 2D coordinate `[horizontal, vertical]`.
pub type Coord = [f64; 2];

/// One drawable series, already projected.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// All markers of a category, grown by every `add_point`
    Points {
        category: VisualCategory,
        color: Rgb,
        coords: Vec<Coord>,
    },
    /// A single two-point segment
    Line {
        category: VisualCategory,
        color: Rgb,
        start: Coord,
        end: Coord,
    },
}

impl Series {
    pub fn category(&self) -> VisualCategory {
        match self {
            Series::Points { category, .. } | Series::Line { category, .. } => *category,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Series::Points { color, .. } | Series::Line { color, .. } => *color,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Series::Line { .. })
    }
}

/// A 2D projection of the scene onto two chosen axes.
#[derive(Debug, Clone)]
pub struct ProjectionView {
    title: String,
    vertical: Axis,
    horizontal: Axis,

    /// Registered categories; anything else is ignored by the add methods
    styles: CategoryTable<CategoryStyle>,

    /// Draw order
    series: Vec<Series>,

    /// Index into `series` of each category's marker series
    point_series: CategoryTable<usize>,

    bounds: Bounds,
    horizontal_range: AxisRange,
    vertical_range: AxisRange,
}

impl ProjectionView {
    /// Creates an empty view projecting onto `(horizontal, vertical)`.
    pub fn new(title: impl Into<String>, vertical: Axis, horizontal: Axis) -> Self {
        Self {
            title: title.into(),
            vertical,
            horizontal,
            styles: CategoryTable::new(),
            series: Vec::new(),
            point_series: CategoryTable::new(),
            bounds: Bounds::default(),
            horizontal_range: AxisRange::default(),
            vertical_range: AxisRange::default(),
        }
    }

    /// Replaces the projection plane.
    ///
    /// Both axis ranges go back to `[0, 100]`. The bounds are reset too,
    /// since coordinates seen on the old axes say nothing about the new ones.
    /// Series already added keep their old projection until the next clear.
    pub fn set_axes(&mut self, vertical: Axis, horizontal: Axis) {
        self.vertical = vertical;
        self.horizontal = horizontal;
        self.horizontal_range = AxisRange::default();
        self.vertical_range = AxisRange::default();
        self.bounds = Bounds::default();
    }

    /// Registers `category` as drawable on this view.
    ///
    /// Re-registering only changes the colors used for series created later.
    pub fn set_category_style(&mut self, category: VisualCategory, point_color: Rgb, line_color: Rgb) {
        self.styles
            .insert(category, CategoryStyle::new(point_color, line_color));
    }

    /// Projects `p` to `[horizontal, vertical]`.
    #[inline]
    pub fn project(&self, p: &Point) -> Coord {
        [self.horizontal.select(p), self.vertical.select(p)]
    }

    /// Appends a marker to the category's point series and widens the bounds.
    pub fn add_point(&mut self, category: VisualCategory, p: &Point) {
        let Some(style) = self.styles.get(category).copied() else {
            return;
        };

        let coord = self.project(p);
        self.bounds.include(coord[0], coord[1]);

        let slot = match self.point_series.get(category) {
            Some(&slot) => slot,
            None => {
                self.series.push(Series::Points {
                    category,
                    color: style.point,
                    coords: Vec::new(),
                });
                let slot = self.series.len() - 1;
                self.point_series.insert(category, slot);
                slot
            }
        };

        if let Some(Series::Points { coords, .. }) = self.series.get_mut(slot) {
            coords.push(coord);
        }
    }

    /// Appends an independent two-point line series.
    ///
    /// Lines never touch the bounds; only points drive the fitted window.
    pub fn add_line(&mut self, category: VisualCategory, start: &Point, end: &Point) {
        let Some(style) = self.styles.get(category).copied() else {
            return;
        };

        self.series.push(Series::Line {
            category,
            color: style.line,
            start: self.project(start),
            end: self.project(end),
        });
    }

    /// Removes every series. Bounds and axis ranges are left as they are.
    pub fn clear(&mut self) {
        self.series.clear();
        self.point_series.clear();
    }

    /// Forgets every point seen so far; the next fit starts from the origin.
    pub fn reset_bounds(&mut self) {
        self.bounds = Bounds::default();
    }

    /// Sets each axis range to `[min * 1.1, max * 1.1]` of the bounds.
    ///
    /// Bounds always contain the origin, so scaling the values widens both
    /// ends of each range.
    pub fn resize_to_fit(&mut self) {
        self.horizontal_range = AxisRange::new(
            self.bounds.min_horizontal * 1.10,
            self.bounds.max_horizontal * 1.10,
        );
        self.vertical_range = AxisRange::new(
            self.bounds.min_vertical * 1.10,
            self.bounds.max_vertical * 1.10,
        );
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn vertical_axis(&self) -> Axis {
        self.vertical
    }

    pub fn horizontal_axis(&self) -> Axis {
        self.horizontal
    }

    pub fn style(&self, category: VisualCategory) -> Option<&CategoryStyle> {
        self.styles.get(category)
    }

    pub fn is_registered(&self, category: VisualCategory) -> bool {
        self.styles.contains(category)
    }

    /// All series in draw order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Markers of one category, in insertion order.
    pub fn points(&self, category: VisualCategory) -> &[Coord] {
        match self
            .point_series
            .get(category)
            .and_then(|&slot| self.series.get(slot))
        {
            Some(Series::Points { coords, .. }) => coords.as_slice(),
            _ => &[],
        }
    }

    /// Number of line series of one category.
    pub fn line_count(&self, category: VisualCategory) -> usize {
        self.series
            .iter()
            .filter(|s| s.is_line() && s.category() == category)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn horizontal_range(&self) -> AxisRange {
        self.horizontal_range
    }

    pub fn vertical_range(&self) -> AxisRange {
        self.vertical_range
    }
}
