//! Property-based tests for STL loading.
//!
//! Random triangle soups are written in both encodings and loaded back.
//!
//! Run with: cargo test -p stl-io -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

mod common;

use approx::relative_eq;
use common::Facet;
use proptest::prelude::*;
use stl_io::{load_stl, load_stl_with, LoadOptions, Point3, StlEncoding};
use tempfile::tempdir;

// =============================================================================
// Strategies
// =============================================================================

fn arb_position() -> impl Strategy<Value = [f32; 3]> {
    prop::array::uniform3(-1000.0..1000.0f32)
}

fn arb_facet() -> impl Strategy<Value = Facet> {
    prop::array::uniform3(arb_position())
}

fn arb_soup(max_facets: usize) -> impl Strategy<Value = Vec<Facet>> {
    prop::collection::vec(arb_facet(), 0..=max_facets)
}

// =============================================================================
// Invariants
// =============================================================================

fn check_mesh(mesh: &stl_io::Mesh, facets: &[Facet]) -> Result<(), TestCaseError> {
    prop_assert_eq!(mesh.facet_count() as usize, facets.len());
    prop_assert_eq!(mesh.vertex_count(), 3 * facets.len());

    let floats = mesh.vertices().unwrap();
    prop_assert_eq!(floats.len(), 18 * facets.len());

    for (i, facet) in facets.iter().enumerate() {
        for (slot, v) in facet.iter().enumerate() {
            let at = (3 * i + slot) * 6;
            prop_assert_eq!(&floats[at..at + 3], &v[..]);
            prop_assert!(mesh.bounds().contains(&Point3::from(*v)));
        }

        let normals = &floats[i * 18..(i + 1) * 18];
        let n = [normals[3], normals[4], normals[5]];
        prop_assert_eq!(&normals[9..12], &n[..]);
        prop_assert_eq!(&normals[15..18], &n[..]);

        let len = n.iter().map(|c| c * c).sum::<f32>().sqrt();
        if mesh.degenerate_facets().contains(&i) {
            prop_assert_eq!(len, 0.0);
        } else {
            prop_assert!(relative_eq!(len, 1.0, epsilon = 1e-4), "normal length {}", len);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_binary_roundtrip(facets in arb_soup(40)) {
        let dir = tempdir().unwrap();
        let path = common::write(dir.path(), "soup.stl", common::binary(&facets));

        let mesh = load_stl(&path).unwrap();
        prop_assert_eq!(mesh.encoding(), Some(StlEncoding::Binary));
        check_mesh(&mesh, &facets)?;
    }

    #[test]
    fn proptest_ascii_roundtrip(facets in arb_soup(40)) {
        let dir = tempdir().unwrap();
        let path = common::write(dir.path(), "soup.stl", common::ascii("soup", &facets));

        let mesh = load_stl(&path).unwrap();
        prop_assert_eq!(mesh.encoding(), Some(StlEncoding::Ascii));
        check_mesh(&mesh, &facets)?;
    }

    #[test]
    fn proptest_ascii_modes_agree(facets in arb_soup(20)) {
        let dir = tempdir().unwrap();
        let path = common::write(dir.path(), "soup.stl", common::ascii("soup", &facets));

        let two = load_stl(&path).unwrap();
        let one = load_stl_with(&path, &LoadOptions::fast()).unwrap();
        prop_assert_eq!(one.vertices().unwrap(), two.vertices().unwrap());
        prop_assert_eq!(one.bounds(), two.bounds());
    }

    #[test]
    fn proptest_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..400)) {
        let dir = tempdir().unwrap();
        let path = common::write(dir.path(), "junk.stl", &bytes);

        if let Ok(mesh) = load_stl_with(&path, &LoadOptions::strict(10_000)) {
            prop_assert_eq!(mesh.vertex_count(), 3 * mesh.facet_count() as usize);
        }
    }
}
