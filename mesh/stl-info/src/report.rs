//! Summary of one load attempt, rendered as text or JSON.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use stl_io::{LoadOptions, Mesh, Point3, StlEncoding, StlError};

/// Extents of a loaded mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extents {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub center: [f32; 3],
    pub max_extent: f32,
}

/// Successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loaded {
    pub encoding: Option<StlEncoding>,
    pub facets: u32,
    pub vertices: usize,
    pub floats: usize,
    pub degenerate_facets: usize,
    pub lines: Option<usize>,
    /// `None` when the file has no facets.
    pub bounds: Option<Extents>,
}

/// Failed load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failed {
    pub kind: String,
    pub message: String,
    pub line: Option<usize>,
}

/// Outcome of loading one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Ok(Loaded),
    Error(Failed),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub path: String,
    pub options: LoadOptions,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Report {
    /// Load `path` into a fresh mesh and summarize the result.
    pub fn build(path: &Path, options: LoadOptions) -> Self {
        let mut mesh = Mesh::new();
        let outcome = match mesh.load_with(path, &options) {
            Ok(()) => Outcome::Ok(summarize(&mesh)),
            Err(err) => Outcome::Error(failure(&err)),
        };
        Self {
            path: path.display().to_string(),
            options,
            outcome,
        }
    }

    pub const fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok(_))
    }
}

fn summarize(mesh: &Mesh) -> Loaded {
    let bounds = mesh.bounds();
    let extents = (!bounds.is_empty()).then(|| Extents {
        min: xyz(&bounds.min),
        max: xyz(&bounds.max),
        center: xyz(&bounds.center()),
        max_extent: bounds.max_extent(),
    });
    Loaded {
        encoding: mesh.encoding(),
        facets: mesh.facet_count(),
        vertices: mesh.vertex_count(),
        floats: mesh.vertices().map_or(0, <[f32]>::len),
        degenerate_facets: mesh.degenerate_facets().len(),
        lines: mesh.diagnostic_line(),
        bounds: extents,
    }
}

fn xyz(p: &Point3<f32>) -> [f32; 3] {
    [p.x, p.y, p.z]
}

fn failure(err: &StlError) -> Failed {
    Failed {
        kind: format!("{:?}", err.kind()),
        message: err.to_string(),
        line: err.line(),
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path)?;
        match &self.outcome {
            Outcome::Ok(ok) => {
                if let Some(encoding) = ok.encoding {
                    writeln!(f, "  encoding:   {encoding}")?;
                }
                writeln!(f, "  facets:     {}", ok.facets)?;
                writeln!(f, "  vertices:   {} ({} floats)", ok.vertices, ok.floats)?;
                if let Some(lines) = ok.lines {
                    writeln!(f, "  lines:      {lines}")?;
                }
                if ok.degenerate_facets > 0 {
                    writeln!(f, "  degenerate: {}", ok.degenerate_facets)?;
                }
                match &ok.bounds {
                    Some(b) => {
                        writeln!(f, "  min:        {:?}", b.min)?;
                        writeln!(f, "  max:        {:?}", b.max)?;
                        writeln!(f, "  center:     {:?}", b.center)?;
                        write!(f, "  extent:     {}", b.max_extent)
                    }
                    None => write!(f, "  bounds:     (empty)"),
                }
            }
            Outcome::Error(err) => match err.line {
                Some(line) => write!(f, "  error ({}) at line {line}: {}", err.kind, err.message),
                None => write!(f, "  error ({}): {}", err.kind, err.message),
            },
        }
    }
}
