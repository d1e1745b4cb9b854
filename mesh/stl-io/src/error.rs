//! Error types for STL loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL loading.
pub type StlResult<T> = Result<T, StlError>;

/// Coarse classification of an [`StlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The file could not be opened or read.
    Io,
    /// The bytes are not a well-formed STL file.
    FileFormat,
    /// The geometry buffer could not be allocated.
    Memory,
    /// Geometry was requested from a mesh that is not loaded.
    NotLoaded,
    /// A zero-area facet was rejected by the load options.
    DegenerateGeometry,
}

/// Errors that can occur while loading or querying an STL mesh.
#[derive(Debug, Error)]
pub enum StlError {
    /// The file could not be opened.
    #[error("cannot open {path}: {source}")]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Reading failed for a reason other than running out of data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ASCII grammar violation.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line of the offending token.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// A `vertex` line whose coordinate could not be used.
    #[error("line {line}: invalid {axis} coordinate {text:?}")]
    InvalidCoordinate {
        /// 1-based line of the vertex.
        line: usize,
        /// Axis name (`x`, `y` or `z`).
        axis: char,
        /// The offending field.
        text: String,
    },

    /// Binary data ended before the structure was complete.
    #[error("unexpected end of file at byte {position} while reading {context}")]
    UnexpectedEof {
        /// Byte offset at which the truncated field starts.
        position: u64,
        /// Which field was being read.
        context: &'static str,
    },

    /// A binary vertex coordinate was NaN or infinite.
    #[error("facet {facet}: non-finite vertex coordinate")]
    NonFiniteVertex {
        /// Index of the facet.
        facet: u32,
    },

    /// The vertex buffer could not be allocated.
    #[error("cannot allocate vertex buffer of {floats} floats")]
    OutOfMemory {
        /// Requested size in floats.
        floats: usize,
    },

    /// The binary header announces more facets than the configured limit.
    #[error("facet count {facets} exceeds limit {limit}")]
    FacetLimit {
        /// Facet count from the header.
        facets: u32,
        /// Configured limit.
        limit: u32,
    },

    /// Geometry was requested before a successful load.
    #[error("mesh is not loaded")]
    NotLoaded,

    /// A zero-area facet under [`DegeneratePolicy::Reject`](crate::DegeneratePolicy::Reject).
    #[error("facet {facet} is degenerate (zero area)")]
    DegenerateFacet {
        /// Index of the first degenerate facet.
        facet: usize,
    },
}

impl StlError {
    /// Create a `Syntax` error at `line`.
    #[must_use]
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { .. } | Self::Io(_) => ErrorKind::Io,
            Self::Syntax { .. }
            | Self::InvalidCoordinate { .. }
            | Self::UnexpectedEof { .. }
            | Self::NonFiniteVertex { .. } => ErrorKind::FileFormat,
            Self::OutOfMemory { .. } | Self::FacetLimit { .. } => ErrorKind::Memory,
            Self::NotLoaded => ErrorKind::NotLoaded,
            Self::DegenerateFacet { .. } => ErrorKind::DegenerateGeometry,
        }
    }

    /// Line number for ASCII diagnostics, if the error has one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } | Self::InvalidCoordinate { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// True for any malformed-input error.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::FileFormat
    }
}
