//! Axis-aligned bounds accumulated while vertices stream in.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-axis extents of every vertex seen so far.
///
/// A fresh `Bounds` starts at the sentinels `min = +inf`, `max = -inf`, so the
/// first real coordinate becomes both bounds on its axis. A mesh with no
/// vertices keeps those sentinels; use [`Bounds::is_empty`] to detect it.
///
/// # Example
///
/// ```
/// use stl_types::{Bounds, Point3};
///
/// let mut bounds = Bounds::empty();
/// assert!(bounds.is_empty());
///
/// bounds.expand_to_include(&Point3::new(1.0, -2.0, 0.5));
/// bounds.expand_to_include(&Point3::new(-1.0, 4.0, 0.5));
///
/// assert_eq!(bounds.min, Point3::new(-1.0, -2.0, 0.5));
/// assert_eq!(bounds.max, Point3::new(1.0, 4.0, 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// Smallest x, y, z seen.
    pub min: Point3<f32>,
    /// Largest x, y, z seen.
    pub max: Point3<f32>,
}

impl Bounds {
    /// Bounds at the sentinel extremes (`min = +inf`, `max = -inf`).
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// True while no coordinate has been accumulated on some axis.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the bounds to cover `point`.
    #[inline]
    pub fn expand_to_include(&mut self, point: &Point3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Width, depth and height of the box.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Midpoint of the box, where a viewer centers its camera.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Length of the longest edge. Zero for empty bounds.
    #[inline]
    #[must_use]
    pub fn max_extent(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }

    /// Check whether `point` lies inside or on the box.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_holds_sentinels() {
        let bounds = Bounds::empty();
        assert!(bounds.is_empty());
        assert_eq!(bounds.min.x, f32::INFINITY);
        assert_eq!(bounds.max.z, f32::NEG_INFINITY);
        assert_relative_eq!(bounds.max_extent(), 0.0);
    }

    #[test]
    fn first_point_becomes_both_bounds() {
        let mut bounds = Bounds::empty();
        bounds.expand_to_include(&Point3::new(3.0, -1.0, 2.0));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.min, Point3::new(3.0, -1.0, 2.0));
        assert_eq!(bounds.max, Point3::new(3.0, -1.0, 2.0));
    }

    fn bounds_of(points: &[Point3<f32>]) -> Bounds {
        let mut bounds = Bounds::empty();
        for p in points {
            bounds.expand_to_include(p);
        }
        bounds
    }

    #[test]
    fn expansion_covers_all_points() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 5.0, 3.0),
            Point3::new(-2.0, 8.0, 1.0),
        ];
        let bounds = bounds_of(&points);
        assert_eq!(bounds.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(10.0, 8.0, 3.0));
        for p in &points {
            assert!(bounds.contains(p));
        }
        assert!(!bounds.contains(&Point3::new(11.0, 0.0, 0.0)));
    }

    #[test]
    fn center_and_extent() {
        let bounds = bounds_of(&[Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 1.0, 2.5)]);
        assert_eq!(bounds.center(), Point3::new(1.0, 0.5, 2.25));
        assert_relative_eq!(bounds.max_extent(), 4.0);
    }
}
