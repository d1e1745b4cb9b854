//! STL writers for building test fixtures.

#![allow(dead_code, clippy::unwrap_used)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Three vertices.
pub type Facet = [[f32; 3]; 3];

/// Render facets as ASCII STL.
pub fn ascii(name: &str, facets: &[Facet]) -> String {
    let mut out = format!("solid {name}\n");
    for facet in facets {
        out.push_str("  facet normal 0 0 0\n    outer loop\n");
        for [x, y, z] in facet {
            writeln!(out, "      vertex {x:e} {y:e} {z:e}").unwrap();
        }
        out.push_str("    endloop\n  endfacet\n");
    }
    writeln!(out, "endsolid {name}").unwrap();
    out
}

/// Render facets as binary STL.
///
/// The header is filled with `0xAB` so the file never sniffs as ASCII,
/// even with zero facets.
pub fn binary(facets: &[Facet]) -> Vec<u8> {
    let mut out = vec![0xAB; 80];
    out.extend_from_slice(&u32::try_from(facets.len()).unwrap().to_le_bytes());
    for facet in facets {
        out.extend_from_slice(&[0u8; 12]);
        for v in facet {
            for c in v {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    out
}

/// Write `bytes` to `dir/name`.
pub fn write(dir: &Path, name: &str, bytes: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Right triangle in the XY plane, normal +Z.
pub const UNIT: Facet = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

/// Right triangle in the XZ plane, normal -Y.
pub const SIDE: Facet = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 3.0]];
