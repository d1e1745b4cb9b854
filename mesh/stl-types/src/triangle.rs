//! By-value triangle view used for normal computation.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Three vertex positions of one facet, in file order.
///
/// Triangles are never stored; they are read out of a
/// [`FacetBuffer`](crate::FacetBuffer) when needed.
///
/// # Example
///
/// ```
/// use stl_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// let n = tri.normal().unwrap();
/// assert!((n.z - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f32>,
    /// Second vertex.
    pub v1: Point3<f32>,
    /// Third vertex.
    pub v2: Point3<f32>,
}

impl Triangle {
    /// Create a triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from coordinate arrays.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_arrays(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Self {
        Self {
            v0: Point3::from(v0),
            v1: Point3::from(v1),
            v2: Point3::from(v2),
        }
    }

    /// Unit face normal, or `None` for a zero-area or non-finite triangle.
    ///
    /// The direction is `(v1 - v0) × (v2 - v0)`. It is computed in `f64`, so
    /// edges anywhere in the finite `f32` range neither overflow nor
    /// underflow; only an exactly zero cross product counts as degenerate.
    ///
    /// ```
    /// use stl_types::Triangle;
    ///
    /// let collinear = Triangle::from_arrays([0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
    /// assert!(collinear.normal().is_none());
    /// ```
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f32>> {
        let [a, b, c] = [self.v0, self.v1, self.v2].map(|p| p.coords.cast::<f64>());
        let n = (b - a).cross(&(c - a));
        if n == Vector3::zeros() || !n.iter().all(|x| x.is_finite()) {
            return None;
        }
        Some((n / n.norm()).cast::<f32>())
    }
}
