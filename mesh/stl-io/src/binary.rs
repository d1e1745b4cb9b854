//! Binary STL decoding.
//!
//! # Layout
//!
//! ```text
//! UINT8[80]    - Header (ignored)
//! UINT32       - Number of triangles
//! foreach triangle
//!     REAL32[3] - Normal vector (ignored, recomputed from the vertices)
//!     REAL32[3] - Vertex 1
//!     REAL32[3] - Vertex 2
//!     REAL32[3] - Vertex 3
//!     UINT16    - Attribute byte count (ignored)
//! end
//! ```
//!
//! All values are little-endian.

use std::io::{ErrorKind, Read};

use stl_types::{Bounds, FacetBuffer, Point3, FLOATS_PER_FACET, FLOATS_PER_SLOT};
use tracing::debug;

use crate::error::{StlError, StlResult};
use crate::geometry::DecodedGeometry;
use crate::options::LoadOptions;

/// Binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one facet record in bytes (normal + 3 vertices + attribute).
pub const FACET_RECORD_SIZE: usize = 50;

/// Offset of the first facet record.
const DATA_OFFSET: u64 = HEADER_SIZE as u64 + 4;

/// One 50-byte facet record, decoded field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetRecord {
    /// Normal as stored in the file.
    pub normal: [f32; 3],
    /// The three vertices.
    pub vertices: [[f32; 3]; 3],
    /// Attribute byte count as stored in the file.
    pub attribute_byte_count: u16,
}

impl FacetRecord {
    /// Decode a record from its raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; FACET_RECORD_SIZE]) -> Self {
        Self {
            normal: read_vec3(bytes, 0),
            vertices: [
                read_vec3(bytes, 12),
                read_vec3(bytes, 24),
                read_vec3(bytes, 36),
            ],
            attribute_byte_count: u16::from_le_bytes([bytes[48], bytes[49]]),
        }
    }

    /// Read one record from `reader`.
    ///
    /// # Errors
    ///
    /// Propagates the reader's error, `UnexpectedEof` on a short read.
    pub fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut bytes = [0u8; FACET_RECORD_SIZE];
        reader.read_exact(&mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }
}

/// Read three little-endian `f32`s starting at `offset`.
fn read_vec3(bytes: &[u8; FACET_RECORD_SIZE], offset: usize) -> [f32; 3] {
    let f = |i: usize| {
        let at = offset + i * 4;
        f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    };
    [f(0), f(1), f(2)]
}

/// Turn a short read into a positioned format error.
fn positioned(err: std::io::Error, position: u64, context: &'static str) -> StlError {
    if err.kind() == ErrorKind::UnexpectedEof {
        StlError::UnexpectedEof { position, context }
    } else {
        StlError::Io(err)
    }
}

/// Fill `buf` completely, reporting a short read at `position`.
fn read_field<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    position: u64,
    context: &'static str,
) -> StlResult<()> {
    reader
        .read_exact(buf)
        .map_err(|e| positioned(e, position, context))
}

/// Decode a binary STL stream.
///
/// The buffer is allocated once from the header's facet count. Stored
/// normals and attribute bytes are discarded. Bytes after the last facet
/// record are ignored.
///
/// # Errors
///
/// - [`StlError::UnexpectedEof`] if the header, count or any facet record is
///   cut short
/// - [`StlError::NonFiniteVertex`] for NaN or infinite coordinates
/// - [`StlError::FacetLimit`] if the count exceeds `options.max_facets`
/// - [`StlError::OutOfMemory`] if the buffer cannot be allocated
///
/// # Example
///
/// ```
/// use stl_io::{binary, LoadOptions};
///
/// let mut data = vec![0u8; 80];
/// data.extend_from_slice(&0u32.to_le_bytes());
///
/// let geometry = binary::decode(&data[..], &LoadOptions::default()).unwrap();
/// assert_eq!(geometry.facet_count, 0);
/// assert!(geometry.bounds.is_empty());
/// ```
pub fn decode<R: Read>(mut reader: R, options: &LoadOptions) -> StlResult<DecodedGeometry> {
    let mut header = [0u8; HEADER_SIZE];
    read_field(&mut reader, &mut header, 0, "header")?;

    let mut count = [0u8; 4];
    read_field(&mut reader, &mut count, HEADER_SIZE as u64, "facet count")?;
    let facet_count = u32::from_le_bytes(count);

    if let Some(limit) = options.max_facets {
        if facet_count > limit {
            return Err(StlError::FacetLimit {
                facets: facet_count,
                limit,
            });
        }
    }

    let facets = usize::try_from(facet_count).unwrap_or(usize::MAX);
    let mut buffer = FacetBuffer::try_with_facets(facets).map_err(|_| StlError::OutOfMemory {
        floats: facets.saturating_mul(FLOATS_PER_FACET),
    })?;
    debug!(
        facets = facet_count,
        floats = buffer.capacity(),
        "allocated binary STL buffer"
    );

    let mut bounds = Bounds::empty();

    for facet in 0..facet_count {
        let position = DATA_OFFSET + u64::from(facet) * FACET_RECORD_SIZE as u64;
        let record = FacetRecord::read_from(&mut reader)
            .map_err(|e| positioned(e, position, "facet record"))?;

        for vertex in record.vertices {
            if !vertex.iter().all(|c| c.is_finite()) {
                return Err(StlError::NonFiniteVertex { facet });
            }
            let p = Point3::from(vertex);
            bounds.expand_to_include(&p);
            let floats = buffer.as_slice().len() + FLOATS_PER_SLOT;
            buffer
                .try_push_position(p)
                .map_err(|_| StlError::OutOfMemory { floats })?;
        }
    }

    Ok(DecodedGeometry {
        buffer,
        bounds,
        facet_count,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn push_vec3(out: &mut Vec<u8>, v: [f32; 3]) {
        for c in v {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }

    fn encode(facets: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut out = vec![0xAB; HEADER_SIZE];
        out.extend_from_slice(&u32::try_from(facets.len()).unwrap().to_le_bytes());
        for facet in facets {
            push_vec3(&mut out, [9.0, 9.0, 9.0]);
            for v in facet {
                push_vec3(&mut out, *v);
            }
            out.extend_from_slice(&7u16.to_le_bytes());
        }
        out
    }

    const UNIT: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

    #[test]
    fn record_fields_decode_in_order() {
        let data = encode(&[UNIT]);
        let bytes: &[u8; FACET_RECORD_SIZE] = data[84..134].try_into().unwrap();
        let record = FacetRecord::from_bytes(bytes);
        assert_eq!(record.normal, [9.0, 9.0, 9.0]);
        assert_eq!(record.vertices, UNIT);
        assert_eq!(record.attribute_byte_count, 7);

        let mut cursor = &data[84..];
        assert_eq!(FacetRecord::read_from(&mut cursor).unwrap(), record);
    }

    #[test]
    fn decodes_positions_and_bounds() {
        let second = [[-1.0, 2.0, 3.0], [4.0, -5.0, 6.0], [0.5, 0.5, -7.0]];
        let data = encode(&[UNIT, second]);
        let geometry = decode(&data[..], &LoadOptions::default()).unwrap();

        assert_eq!(geometry.facet_count, 2);
        assert_eq!(geometry.vertex_count(), 6);
        assert_eq!(geometry.buffer.position(3), Some(Point3::new(-1.0, 2.0, 3.0)));
        assert_eq!(geometry.bounds.min, Point3::new(-1.0, -5.0, -7.0));
        assert_eq!(geometry.bounds.max, Point3::new(4.0, 2.0, 6.0));
    }

    #[test]
    fn stored_normals_are_not_copied() {
        let data = encode(&[UNIT]);
        let geometry = decode(&data[..], &LoadOptions::default()).unwrap();
        assert_eq!(geometry.buffer.normal(0), Some(stl_types::Vector3::zeros()));
    }

    #[test]
    fn zero_facets_keep_sentinel_bounds() {
        let data = encode(&[]);
        let geometry = decode(&data[..], &LoadOptions::default()).unwrap();
        assert_eq!(geometry.vertex_count(), 0);
        assert_eq!(geometry.bounds.min.x, f32::INFINITY);
        assert_eq!(geometry.bounds.max.x, f32::NEG_INFINITY);
    }

    #[test]
    fn short_header_fails() {
        let err = decode(&[0u8; 40][..], &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, StlError::UnexpectedEof { position: 0, context: "header" }));
    }

    #[test]
    fn missing_count_fails() {
        let err = decode(&[0u8; 82][..], &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, StlError::UnexpectedEof { position: 80, .. }));
    }

    #[test]
    fn truncated_vertex_stream_fails() {
        let mut data = encode(&[UNIT, UNIT]);
        data.truncate(84 + 50 + 30);
        let err = decode(&data[..], &LoadOptions::default()).unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(err, StlError::UnexpectedEof { position: 134, .. }));
    }

    #[test]
    fn overstated_count_fails() {
        let mut data = encode(&[UNIT]);
        data[80..84].copy_from_slice(&3u32.to_le_bytes());
        assert!(decode(&data[..], &LoadOptions::default()).is_err());
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut data = encode(&[UNIT]);
        data.extend_from_slice(b"trailing junk");
        let geometry = decode(&data[..], &LoadOptions::default()).unwrap();
        assert_eq!(geometry.facet_count, 1);
    }

    #[test]
    fn nan_vertex_fails() {
        let data = encode(&[UNIT, [[0.0, f32::NAN, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        let err = decode(&data[..], &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, StlError::NonFiniteVertex { facet: 1 }));
    }

    #[test]
    fn facet_limit_checked_before_allocation() {
        let mut data = vec![0u8; HEADER_SIZE];
        data.extend_from_slice(&u32::MAX.to_le_bytes());
        let options = LoadOptions::default().with_max_facets(1000);
        let err = decode(&data[..], &options).unwrap_err();
        assert!(matches!(
            err,
            StlError::FacetLimit { facets: u32::MAX, limit: 1000 }
        ));
        assert_eq!(err.kind(), crate::ErrorKind::Memory);
    }
}
