//! The loaded-mesh handle handed to renderers.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use stl_types::{synthesize_face_normals, Bounds, FacetBuffer, Triangle};
use tracing::{debug, info, warn};

use crate::ascii;
use crate::binary;
use crate::error::{StlError, StlResult};
use crate::geometry::DecodedGeometry;
use crate::options::{AsciiMode, DegeneratePolicy, LoadOptions};
use crate::sniff::{sniff_path, StlEncoding};

/// Whether a [`Mesh`] holds geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Fresh, or the last load failed.
    #[default]
    Unloaded,
    /// The last load succeeded.
    Loaded,
}

/// Everything one successful load produced.
struct LoadOutcome {
    geometry: DecodedGeometry,
    encoding: StlEncoding,
    degenerate: Vec<usize>,
    lines: Option<usize>,
}

/// Per-load state threaded through each stage.
///
/// Every stage opens its own handle on `path`; handles close when the stage
/// returns.
struct LoadContext<'a> {
    path: &'a Path,
    options: &'a LoadOptions,
}

impl<'a> LoadContext<'a> {
    const fn new(path: &'a Path, options: &'a LoadOptions) -> Self {
        Self { path, options }
    }

    fn open(&self) -> StlResult<BufReader<File>> {
        let file = File::open(self.path).map_err(|source| StlError::Open {
            path: self.path.to_path_buf(),
            source,
        })?;
        Ok(BufReader::new(file))
    }

    fn run(&self) -> StlResult<LoadOutcome> {
        let encoding = sniff_path(self.path)?;
        debug!(path = %self.path.display(), %encoding, "detected STL encoding");

        let (mut geometry, lines) = match encoding {
            StlEncoding::Ascii => self.read_ascii()?,
            StlEncoding::Binary => (binary::decode(self.open()?, self.options)?, None),
        };

        let normals = synthesize_face_normals(&mut geometry.buffer);
        if let Some(&first) = normals.degenerate.first() {
            match self.options.degenerate {
                DegeneratePolicy::Reject => {
                    return Err(StlError::DegenerateFacet { facet: first });
                }
                DegeneratePolicy::ZeroNormal => warn!(
                    path = %self.path.display(),
                    count = normals.degenerate.len(),
                    first,
                    "degenerate facets given zero normals"
                ),
            }
        }

        Ok(LoadOutcome {
            geometry,
            encoding,
            degenerate: normals.degenerate,
            lines,
        })
    }

    fn read_ascii(&self) -> StlResult<(DecodedGeometry, Option<usize>)> {
        match self.options.ascii_mode {
            AsciiMode::TwoPass => {
                let summary = ascii::validate(self.open()?)?;
                let geometry = ascii::extract(self.open()?, &summary)?;
                Ok((geometry, Some(summary.lines)))
            }
            AsciiMode::SinglePass => {
                let (summary, geometry) = ascii::parse_single_pass(self.open()?)?;
                Ok((geometry, Some(summary.lines)))
            }
        }
    }
}

/// A triangle mesh loaded from one STL file.
///
/// The vertex buffer is interleaved, 6 floats per vertex-slot (position
/// xyz, normal xyz) and 3 slots per facet. Each facet's three slots share
/// one flat face normal computed from its vertices.
///
/// A failed [`load`](Self::load) always leaves the mesh
/// [`Unloaded`](LoadState::Unloaded) with zero counts, even if it held
/// geometry before.
///
/// # Example
///
/// ```no_run
/// use stl_io::Mesh;
///
/// let mut mesh = Mesh::new();
/// match mesh.load("part.stl") {
///     Ok(()) => {
///         let floats = mesh.vertices().unwrap();
///         println!("{} facets, {} floats", mesh.facet_count(), floats.len());
///     }
///     Err(e) => match e.line() {
///         Some(line) => eprintln!("syntax error at line {line}"),
///         None => eprintln!("{e}"),
///     },
/// }
/// ```
#[derive(Debug, Default)]
pub struct Mesh {
    state: LoadState,
    buffer: FacetBuffer,
    facet_count: u32,
    bounds: Bounds,
    encoding: Option<StlEncoding>,
    degenerate: Vec<usize>,
    diagnostic_line: Option<usize>,
}

impl Mesh {
    /// Create an unloaded mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` with default options.
    ///
    /// # Errors
    ///
    /// See [`load_with`](Self::load_with).
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> StlResult<()> {
        self.load_with(path, &LoadOptions::default())
    }

    /// Load `path`, replacing whatever the mesh held.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Io`](crate::ErrorKind::Io) if the file cannot be opened or read
    /// - [`ErrorKind::FileFormat`](crate::ErrorKind::FileFormat) for malformed
    ///   content; ASCII errors carry a line number
    /// - [`ErrorKind::Memory`](crate::ErrorKind::Memory) if the buffer cannot be allocated
    /// - [`ErrorKind::DegenerateGeometry`](crate::ErrorKind::DegenerateGeometry)
    ///   under [`DegeneratePolicy::Reject`]
    pub fn load_with<P: AsRef<Path>>(&mut self, path: P, options: &LoadOptions) -> StlResult<()> {
        let path = path.as_ref();
        *self = Self::default();

        match LoadContext::new(path, options).run() {
            Ok(outcome) => {
                info!(
                    path = %path.display(),
                    encoding = %outcome.encoding,
                    facets = outcome.geometry.facet_count,
                    vertices = outcome.geometry.vertex_count(),
                    "loaded STL mesh"
                );
                self.buffer = outcome.geometry.buffer;
                self.facet_count = outcome.geometry.facet_count;
                self.bounds = outcome.geometry.bounds;
                self.encoding = Some(outcome.encoding);
                self.degenerate = outcome.degenerate;
                self.diagnostic_line = outcome.lines;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "STL load failed");
                self.diagnostic_line = err.line();
                Err(err)
            }
        }
    }

    /// Current load state.
    #[must_use]
    pub const fn load_state(&self) -> LoadState {
        self.state
    }

    /// True after a successful load.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// The interleaved position + normal buffer.
    ///
    /// # Errors
    ///
    /// [`StlError::NotLoaded`] unless the last load succeeded.
    pub fn vertices(&self) -> StlResult<&[f32]> {
        if self.is_loaded() {
            Ok(self.buffer.as_slice())
        } else {
            Err(StlError::NotLoaded)
        }
    }

    /// Number of facets.
    #[must_use]
    pub const fn facet_count(&self) -> u32 {
        self.facet_count
    }

    /// Number of vertex-slots, `3 * facet_count`.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.buffer.slot_count()
    }

    /// Bounds of every vertex.
    ///
    /// Holds the `+inf`/`-inf` sentinels while unloaded or when the file had
    /// no facets.
    #[must_use]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Smallest x coordinate.
    #[must_use]
    pub fn min_x(&self) -> f32 {
        self.bounds.min.x
    }

    /// Largest x coordinate.
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.bounds.max.x
    }

    /// Smallest y coordinate.
    #[must_use]
    pub fn min_y(&self) -> f32 {
        self.bounds.min.y
    }

    /// Largest y coordinate.
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.bounds.max.y
    }

    /// Smallest z coordinate.
    #[must_use]
    pub fn min_z(&self) -> f32 {
        self.bounds.min.z
    }

    /// Largest z coordinate.
    #[must_use]
    pub fn max_z(&self) -> f32 {
        self.bounds.max.z
    }

    /// Encoding of the loaded file.
    #[must_use]
    pub const fn encoding(&self) -> Option<StlEncoding> {
        self.encoding
    }

    /// Line number from the last ASCII load.
    ///
    /// After a grammar error, the offending line; after a successful ASCII
    /// load, the number of lines read. `None` for binary files and for
    /// failures that have no line.
    #[must_use]
    pub const fn diagnostic_line(&self) -> Option<usize> {
        self.diagnostic_line
    }

    /// Facets that received a zero normal.
    #[must_use]
    pub fn degenerate_facets(&self) -> &[usize] {
        &self.degenerate
    }

    /// Vertex positions of facet `index`, if loaded and in range.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        if self.is_loaded() {
            self.buffer.triangle(index)
        } else {
            None
        }
    }
}
