//! Flat face-normal synthesis.
//!
//! Every facet gets one normal computed from its vertices,
//! `normalize((v1 - v0) × (v2 - v0))`, copied to all three of its vertex-slots.
//! Normals stored in the source file are never consulted.

use nalgebra::Vector3;

use crate::FacetBuffer;

/// Outcome of a normal synthesis pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalSummary {
    /// Facets that received a normal.
    pub facets: usize,
    /// Indices of zero-area (or non-finite) facets, which got the zero vector.
    pub degenerate: Vec<usize>,
}

/// Fill the normal slots of every complete facet in `buffer`.
///
/// Degenerate facets get `(0, 0, 0)` and are listed in the summary; the
/// caller decides whether that is acceptable.
///
/// # Example
///
/// ```
/// use stl_types::{synthesize_face_normals, FacetBuffer, Point3};
///
/// let mut buffer = FacetBuffer::new();
/// for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
///     buffer.try_push_position(Point3::from(p)).unwrap();
/// }
///
/// let summary = synthesize_face_normals(&mut buffer);
/// assert_eq!(summary.facets, 1);
/// assert!(summary.degenerate.is_empty());
/// assert_eq!(buffer.normal(2).unwrap().z, 1.0);
/// ```
pub fn synthesize_face_normals(buffer: &mut FacetBuffer) -> NormalSummary {
    let facets = buffer.facet_count();
    let mut degenerate = Vec::new();

    for facet in 0..facets {
        let normal = match buffer.triangle(facet).and_then(|t| t.normal()) {
            Some(n) => n,
            None => {
                degenerate.push(facet);
                Vector3::zeros()
            }
        };
        buffer.set_facet_normal(facet, normal);
    }

    NormalSummary { facets, degenerate }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn buffer_from(points: &[[f32; 3]]) -> FacetBuffer {
        let mut buffer = FacetBuffer::new();
        for p in points {
            buffer.try_push_position(Point3::from(*p)).unwrap();
        }
        buffer
    }

    #[test]
    fn each_facet_gets_its_own_normal() {
        let mut buffer = buffer_from(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            // second facet lies in the xz plane, wound so the normal is -y
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);

        let summary = synthesize_face_normals(&mut buffer);
        assert_eq!(summary.facets, 2);
        assert!(summary.degenerate.is_empty());

        for slot in 0..3 {
            let n = buffer.normal(slot).unwrap();
            assert_relative_eq!(n.z, 1.0);
        }
        for slot in 3..6 {
            let n = buffer.normal(slot).unwrap();
            assert_relative_eq!(n.y, -1.0);
        }
    }

    #[test]
    fn degenerate_facet_gets_zero_vector() {
        let mut buffer = buffer_from(&[
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [2.0, 2.0, 2.0],
            [0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.0, 0.0, 2.0],
        ]);

        let summary = synthesize_face_normals(&mut buffer);
        assert_eq!(summary.degenerate, vec![0]);
        assert_eq!(buffer.normal(0).unwrap(), Vector3::zeros());
        assert_relative_eq!(buffer.normal(4).unwrap().x, 1.0);
    }

    #[test]
    fn normals_are_unit_length() {
        let mut buffer = buffer_from(&[
            [0.3, -1.2, 4.0],
            [2.5, 0.1, -3.3],
            [-7.0, 8.0, 0.25],
        ]);
        synthesize_face_normals(&mut buffer);
        assert_relative_eq!(buffer.normal(0).unwrap().norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn extreme_scales_are_not_degenerate() {
        let mut buffer = buffer_from(&[
            [0.0, 0.0, 0.0],
            [1e10, 0.0, 0.0],
            [0.0, 1e10, 0.0],
            [0.0, 0.0, 0.0],
            [1e-12, 0.0, 0.0],
            [0.0, 1e-12, 0.0],
        ]);

        let summary = synthesize_face_normals(&mut buffer);
        assert!(summary.degenerate.is_empty());
        assert_relative_eq!(buffer.normal(0).unwrap().z, 1.0);
        assert_relative_eq!(buffer.normal(5).unwrap().z, 1.0);
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mut buffer = FacetBuffer::new();
        let summary = synthesize_face_normals(&mut buffer);
        assert_eq!(summary, NormalSummary::default());
    }
}
