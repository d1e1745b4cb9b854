//! Geometry types shared by the STL loader and its consumers.
//!
//! - [`FacetBuffer`] - Flat interleaved position + normal buffer, 18 floats per facet
//! - [`Bounds`] - Per-axis min/max accumulated while vertices stream in
//! - [`Triangle`] - By-value view of one facet's three positions
//! - [`synthesize_face_normals`] - One flat normal per facet, written to all three slots
//!
//! # Layer 0 Crate
//!
//! No I/O, no rendering dependencies. A renderer can take
//! [`FacetBuffer::as_slice`] and upload it as-is with a 24-byte stride.
//!
//! # Precision
//!
//! All values are `f32`, matching both the binary STL encoding and the
//! vertex formats GPUs consume.
//!
//! # Example
//!
//! ```
//! use stl_types::{synthesize_face_normals, Bounds, FacetBuffer, Point3};
//!
//! let mut buffer = FacetBuffer::try_with_facets(1).unwrap();
//! let mut bounds = Bounds::empty();
//! for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
//!     let p = Point3::from(p);
//!     bounds.expand_to_include(&p);
//!     buffer.try_push_position(p).unwrap();
//! }
//! synthesize_face_normals(&mut buffer);
//!
//! assert_eq!(bounds.max, Point3::new(1.0, 1.0, 0.0));
//! assert_eq!(buffer.as_slice()[5], 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod buffer;
mod normals;
mod triangle;

pub use bounds::Bounds;
pub use buffer::{FacetBuffer, FLOATS_PER_FACET, FLOATS_PER_SLOT, SLOTS_PER_FACET};
pub use normals::{synthesize_face_normals, NormalSummary};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
