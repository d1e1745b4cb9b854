//! Flat interleaved position + normal storage.
//!
//! # Layout
//!
//! ```text
//! facet i:  [ v0.xyz n.xyz | v1.xyz n.xyz | v2.xyz n.xyz ]   18 floats
//!             slot 0         slot 1         slot 2
//! ```
//!
//! Positions sit at offsets 0, 6 and 12 of each facet, normals at 3, 9 and
//! 15. The same face normal is written to all three normal slots.

use std::collections::TryReserveError;

use nalgebra::{Point3, Vector3};

use crate::Triangle;

/// Floats per vertex-slot (position xyz + normal xyz).
pub const FLOATS_PER_SLOT: usize = 6;

/// Vertex-slots per facet.
pub const SLOTS_PER_FACET: usize = 3;

/// Floats per facet.
pub const FLOATS_PER_FACET: usize = FLOATS_PER_SLOT * SLOTS_PER_FACET;

/// Offset of the normal inside a vertex-slot.
const NORMAL_OFFSET: usize = 3;

/// Owned vertex-slot buffer in renderer layout.
///
/// Positions are appended one slot at a time; the normal half of every slot
/// is zero until [`set_facet_normal`](Self::set_facet_normal) fills it.
///
/// # Example
///
/// ```
/// use stl_types::{FacetBuffer, Point3};
///
/// let mut buffer = FacetBuffer::try_with_slots(3).unwrap();
/// buffer.try_push_position(Point3::new(0.0, 0.0, 0.0)).unwrap();
/// buffer.try_push_position(Point3::new(1.0, 0.0, 0.0)).unwrap();
/// buffer.try_push_position(Point3::new(0.0, 1.0, 0.0)).unwrap();
///
/// assert_eq!(buffer.slot_count(), 3);
/// assert_eq!(buffer.facet_count(), 1);
/// assert_eq!(buffer.as_slice().len(), 18);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetBuffer {
    data: Vec<f32>,
}

impl FacetBuffer {
    /// Create an empty buffer without allocating.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Allocate room for exactly `slots` vertex-slots.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the request overflows or cannot be
    /// satisfied.
    pub fn try_with_slots(slots: usize) -> Result<Self, TryReserveError> {
        let floats = slots.checked_mul(FLOATS_PER_SLOT).unwrap_or(usize::MAX);
        let mut data = Vec::new();
        data.try_reserve_exact(floats)?;
        Ok(Self { data })
    }

    /// Allocate room for exactly `facets` facets.
    ///
    /// # Errors
    ///
    /// Same as [`try_with_slots`](Self::try_with_slots).
    pub fn try_with_facets(facets: usize) -> Result<Self, TryReserveError> {
        Self::try_with_slots(facets.checked_mul(SLOTS_PER_FACET).unwrap_or(usize::MAX))
    }

    /// Append one vertex-slot holding `position` and a zero normal.
    ///
    /// Grows the buffer if the preallocated capacity is used up.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if growing fails.
    pub fn try_push_position(&mut self, position: Point3<f32>) -> Result<(), TryReserveError> {
        self.data.try_reserve(FLOATS_PER_SLOT)?;
        self.data
            .extend_from_slice(&[position.x, position.y, position.z, 0.0, 0.0, 0.0]);
        Ok(())
    }

    /// Number of vertex-slots written.
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.data.len() / FLOATS_PER_SLOT
    }

    /// Number of complete facets written.
    #[inline]
    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.data.len() / FLOATS_PER_FACET
    }

    /// True if no slot has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity in floats.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The interleaved floats, ready for upload.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Position stored in vertex-slot `slot`.
    #[must_use]
    pub fn position(&self, slot: usize) -> Option<Point3<f32>> {
        let base = slot.checked_mul(FLOATS_PER_SLOT)?;
        let p = self.data.get(base..base.checked_add(3)?)?;
        Some(Point3::new(p[0], p[1], p[2]))
    }

    /// Normal stored in vertex-slot `slot`.
    #[must_use]
    pub fn normal(&self, slot: usize) -> Option<Vector3<f32>> {
        let base = slot
            .checked_mul(FLOATS_PER_SLOT)?
            .checked_add(NORMAL_OFFSET)?;
        let n = self.data.get(base..base.checked_add(3)?)?;
        Some(Vector3::new(n[0], n[1], n[2]))
    }

    /// Vertex positions of facet `facet`.
    #[must_use]
    pub fn triangle(&self, facet: usize) -> Option<Triangle> {
        let first = facet.checked_mul(SLOTS_PER_FACET)?;
        Some(Triangle::new(
            self.position(first)?,
            self.position(first.checked_add(1)?)?,
            self.position(first.checked_add(2)?)?,
        ))
    }

    /// Write `normal` into all three normal slots of facet `facet`.
    ///
    /// Returns `false` if the facet does not exist.
    pub fn set_facet_normal(&mut self, facet: usize, normal: Vector3<f32>) -> bool {
        let range = facet
            .checked_mul(FLOATS_PER_FACET)
            .and_then(|base| base.checked_add(FLOATS_PER_FACET).map(|end| base..end));
        let Some(chunk) = range.and_then(|r| self.data.get_mut(r)) else {
            return false;
        };
        for slot in chunk.chunks_exact_mut(FLOATS_PER_SLOT) {
            slot[NORMAL_OFFSET] = normal.x;
            slot[NORMAL_OFFSET + 1] = normal.y;
            slot[NORMAL_OFFSET + 2] = normal.z;
        }
        true
    }
}
