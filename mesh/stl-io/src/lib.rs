//! STL loading into renderer-ready vertex buffers.
//!
//! Reads both STL encodings and produces a [`Mesh`]: one flat `f32` buffer
//! with 6 floats per vertex-slot (position xyz, face normal xyz), 3 slots
//! per facet, plus facet/vertex counts and axis-aligned bounds.
//!
//! - **Detection** - [`sniff`] classifies a file as ASCII when every byte is
//!   `<= 127`, binary otherwise
//! - **ASCII** - [`ascii::validate`] checks the grammar with line-numbered
//!   errors and counts vertices, then [`ascii::extract`] fills an exactly
//!   sized buffer; [`ascii::parse_single_pass`] does both in one read
//! - **Binary** - [`binary::decode`] allocates once from the header count
//! - **Normals** - recomputed per facet from the vertices; normals stored in
//!   the file are ignored
//!
//! # Layer 0 Crate
//!
//! No rendering dependencies. [`Mesh::vertices`] is meant to be uploaded
//! directly as a vertex buffer with a 24-byte stride.
//!
//! # Example
//!
//! ```no_run
//! use stl_io::{load_stl, ErrorKind};
//!
//! match load_stl("model.stl") {
//!     Ok(mesh) => println!(
//!         "{} facets, x in [{}, {}]",
//!         mesh.facet_count(),
//!         mesh.min_x(),
//!         mesh.max_x()
//!     ),
//!     Err(e) if e.kind() == ErrorKind::FileFormat => eprintln!("bad STL: {e}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! # Logging
//!
//! Emits [`tracing`] events: `debug` for per-stage detail, `info` once per
//! successful load, `warn` when degenerate facets receive zero normals.
//! Install a subscriber to see them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod ascii;
pub mod binary;
mod error;
mod geometry;
mod mesh;
mod options;
mod sniff;

pub use error::{ErrorKind, StlError, StlResult};
pub use geometry::DecodedGeometry;
pub use mesh::{LoadState, Mesh};
pub use options::{AsciiMode, DegeneratePolicy, LoadOptions};
pub use sniff::{sniff, sniff_path, StlEncoding};

pub use stl_types::{Bounds, FacetBuffer, Point3, Triangle, Vector3};

use std::path::Path;

/// Load an STL file with default options.
///
/// # Errors
///
/// See [`Mesh::load_with`].
///
/// # Example
///
/// ```no_run
/// let mesh = stl_io::load_stl("part.stl").unwrap();
/// assert_eq!(mesh.vertex_count(), 3 * mesh.facet_count() as usize);
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> StlResult<Mesh> {
    load_stl_with(path, &LoadOptions::default())
}

/// Load an STL file with explicit options.
///
/// # Errors
///
/// See [`Mesh::load_with`].
pub fn load_stl_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> StlResult<Mesh> {
    let mut mesh = Mesh::new();
    mesh.load_with(path, options)?;
    Ok(mesh)
}
