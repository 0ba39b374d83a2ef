//! Geometry primitives shared by the classifier and the projection views.
//!
//! Points are plain `nalgebra` vectors: addition, subtraction, scaling,
//! `dot`, `norm_squared` and `norm` come from there, and `==` is an exact
//! field-wise comparison with no epsilon.
//!
//! Horizon obstacles live in the X-Z plane, so both the orientation
//! predicate and the segment intersection test ignore the Y coordinate.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A 3D sample `(x, y, z)` in double precision.
pub type Point = Vector3<f64>;

/// Builds a point from its three coordinates.
#[inline]
pub fn point(x: f64, y: f64, z: f64) -> Point {
    Vector3::new(x, y, z)
}

/// A terrain silhouette edge in the X-Z plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonSegment {
    pub x1: f64,
    pub z1: f64,
    pub x2: f64,
    pub z2: f64,
}

impl HorizonSegment {
    pub fn new(x1: f64, z1: f64, x2: f64, z2: f64) -> Self {
        Self { x1, z1, x2, z2 }
    }

    /// First endpoint lifted into 3D at `y = 0`.
    pub fn start(&self) -> Point {
        point(self.x1, 0.0, self.z1)
    }

    /// Second endpoint lifted into 3D at `y = 0`.
    pub fn end(&self) -> Point {
        point(self.x2, 0.0, self.z2)
    }
}

/// Counter-clockwise orientation of `a -> b -> c` in the X-Z plane.
///
/// Strict inequality: collinear triples are reported as not counter-clockwise.
#[inline]
pub fn ccw_xz(a: &Point, b: &Point, c: &Point) -> bool {
    (c.z - a.z) * (b.x - a.x) > (b.z - a.z) * (c.x - a.x)
}

/// Whether segment `start1-end1` crosses segment `start2-end2` in the X-Z plane.
///
/// Each segment's endpoints must lie on opposite sides of the other segment.
/// Touching and collinear overlaps are not handled specially.
pub fn segments_intersect_xz(start1: &Point, end1: &Point, start2: &Point, end2: &Point) -> bool {
    ccw_xz(start1, start2, end2) != ccw_xz(end1, start2, end2)
        && ccw_xz(start1, end1, start2) != ccw_xz(start1, end1, end2)
}

/// Minimum distance from `p` to the segment `seg_start-seg_end`.
///
/// The projection parameter is clamped to `[0, 1]` so points beyond either
/// end measure to the nearest endpoint. A zero-length segment degenerates to
/// the distance to `seg_start`.
pub fn point_segment_distance(seg_start: &Point, seg_end: &Point, p: &Point) -> f64 {
    let dir = seg_end - seg_start;
    let l2 = dir.norm_squared();
    if l2 == 0.0 {
        return (p - seg_start).norm();
    }

    let t = ((p - seg_start).dot(&dir) / l2).clamp(0.0, 1.0);
    let projection = seg_start + dir * t;
    (p - projection).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = point(1.0, 2.0, 3.0);
        let b = point(4.0, 5.0, 6.0);

        assert_eq!(a + b, point(5.0, 7.0, 9.0));
        assert_eq!(b - a, point(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, point(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, point(2.0, 2.5, 3.0));
        assert_eq!(a.dot(&b), 32.0);
        assert_eq!(point(3.0, 4.0, 0.0).norm_squared(), 25.0);
        assert_eq!(point(3.0, 4.0, 0.0).norm(), 5.0);
    }

    #[test]
    fn test_exact_equality() {
        assert_eq!(point(0.1, 0.2, 0.3), point(0.1, 0.2, 0.3));
        assert_ne!(point(0.1, 0.2, 0.3), point(0.1, 0.2, 0.3 + 1e-15));
    }

    #[test]
    fn test_crossing_segments_intersect() {
        let a = point(0.0, 0.0, 0.0);
        let b = point(0.0, 0.0, 10.0);
        let c = point(-5.0, 0.0, 5.0);
        let d = point(5.0, 0.0, 5.0);

        assert!(segments_intersect_xz(&a, &b, &c, &d));
    }

    #[test]
    fn test_parallel_segments_do_not_intersect() {
        let a = point(0.0, 0.0, 0.0);
        let b = point(0.0, 0.0, 10.0);
        let c = point(5.0, 0.0, 0.0);
        let d = point(5.0, 0.0, 10.0);

        assert!(!segments_intersect_xz(&a, &b, &c, &d));
    }

    #[test]
    fn test_intersection_ignores_y() {
        let a = point(0.0, -100.0, 0.0);
        let b = point(0.0, 300.0, 10.0);
        let c = point(-5.0, 7.0, 5.0);
        let d = point(5.0, 0.0, 5.0);

        assert!(segments_intersect_xz(&a, &b, &c, &d));
    }

    #[test]
    fn test_disjoint_collinear_segments() {
        let a = point(0.0, 0.0, 0.0);
        let b = point(1.0, 0.0, 0.0);
        let c = point(2.0, 0.0, 0.0);
        let d = point(3.0, 0.0, 0.0);

        assert!(!segments_intersect_xz(&a, &b, &c, &d));
    }

    #[test]
    fn test_distance_clamps_to_endpoints() {
        let a = point(0.0, 0.0, 0.0);
        let b = point(10.0, 0.0, 0.0);

        assert_relative_eq!(point_segment_distance(&a, &b, &point(5.0, 3.0, 0.0)), 3.0);
        assert_relative_eq!(point_segment_distance(&a, &b, &point(-3.0, 4.0, 0.0)), 5.0);
        assert_relative_eq!(point_segment_distance(&a, &b, &point(13.0, 0.0, 4.0)), 5.0);
    }

    #[test]
    fn test_distance_zero_length_segment() {
        let a = point(1.0, 1.0, 1.0);
        let p = point(4.0, 5.0, 1.0);

        assert_eq!(point_segment_distance(&a, &a, &p), (p - a).norm());
        assert_eq!(point_segment_distance(&a, &a, &p), 5.0);
    }

    #[test]
    fn test_horizon_endpoints_lift_to_ground() {
        let h = HorizonSegment::new(-1.0, 5.0, 1.0, 6.0);
        assert_eq!(h.start(), point(-1.0, 0.0, 5.0));
        assert_eq!(h.end(), point(1.0, 0.0, 6.0));
    }

    fn coord() -> impl Strategy<Value = f64> {
        -1000.0..1000.0f64
    }

    fn any_point() -> impl Strategy<Value = Point> {
        (coord(), coord(), coord()).prop_map(|(x, y, z)| point(x, y, z))
    }

    // Integer grid keeps the orientation products exact.
    fn grid_point() -> impl Strategy<Value = Point> {
        (-1000i32..1000, -1000i32..1000, -1000i32..1000)
            .prop_map(|(x, y, z)| point(x as f64, y as f64, z as f64))
    }

    proptest! {
        #[test]
        fn prop_distance_is_non_negative(a in any_point(), b in any_point(), p in any_point()) {
            prop_assert!(point_segment_distance(&a, &b, &p) >= 0.0);
        }

        #[test]
        fn prop_degenerate_segment_is_point_distance(a in any_point(), p in any_point()) {
            prop_assert_eq!(point_segment_distance(&a, &a, &p), (p - a).norm());
        }

        #[test]
        fn prop_points_on_segment_have_zero_distance(a in any_point(), b in any_point(), t in 0.0..=1.0f64) {
            let on_segment = a + (b - a) * t;
            prop_assert!(point_segment_distance(&a, &b, &on_segment) < 1e-6);
        }

        #[test]
        fn prop_intersection_is_symmetric(a in grid_point(), b in grid_point(), c in grid_point(), d in grid_point()) {
            prop_assert_eq!(
                segments_intersect_xz(&a, &b, &c, &d),
                segments_intersect_xz(&c, &d, &a, &b)
            );
        }
    }
}
