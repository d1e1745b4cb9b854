//! Output of a decoding pass.

use stl_types::{Bounds, FacetBuffer};

/// Positions, counts and bounds produced by a decoder.
///
/// Normal slots are still zero; [`Mesh`](crate::Mesh) fills them after
/// decoding.
#[derive(Debug, Clone, Default)]
pub struct DecodedGeometry {
    /// Vertex-slots in file order.
    pub buffer: FacetBuffer,
    /// Extents of every decoded vertex.
    pub bounds: Bounds,
    /// Facet count (header value for binary, completed facets for ASCII).
    pub facet_count: u32,
}

impl DecodedGeometry {
    /// Number of vertex-slots decoded.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.buffer.slot_count()
    }
}
