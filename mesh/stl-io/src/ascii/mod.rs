//! ASCII STL reading.
//!
//! # Grammar
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! Only the first word of each line is a keyword, matched case-insensitively.
//! Anything after it is ignored except the three coordinates of `vertex`.
//! Blank lines are skipped but still count toward line numbers.
//!
//! Two strategies are offered:
//!
//! - [`validate`] then [`extract`]: the grammar pass counts vertices so the
//!   extraction pass can fill an exactly sized buffer.
//! - [`parse_single_pass`]: both at once, growing the buffer as it goes.

mod extract;
mod validate;

pub use extract::{extract, parse_single_pass};
pub use validate::{validate, AsciiSummary};

use std::borrow::Cow;
use std::io::BufRead;

use crate::error::StlResult;

/// Line keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Solid,
    EndSolid,
    Facet,
    EndFacet,
    Outer,
    EndLoop,
    Vertex,
}

impl Token {
    const ALL: [Self; 7] = [
        Self::Solid,
        Self::EndSolid,
        Self::Facet,
        Self::EndFacet,
        Self::Outer,
        Self::EndLoop,
        Self::Vertex,
    ];

    pub(crate) const fn keyword(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::EndSolid => "endsolid",
            Self::Facet => "facet",
            Self::EndFacet => "endfacet",
            Self::Outer => "outer",
            Self::EndLoop => "endloop",
            Self::Vertex => "vertex",
        }
    }

    pub(crate) fn parse(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.keyword().eq_ignore_ascii_case(word))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Line-at-a-time reader that tracks 1-based line numbers.
///
/// Bytes are decoded lossily, so a stray non-UTF-8 byte shows up as an
/// unknown keyword rather than an I/O error.
pub(crate) struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(128),
            line: 0,
        }
    }

    /// Move to the next line. Returns `false` at end of input.
    pub(crate) fn advance(&mut self) -> StlResult<bool> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }
        self.line += 1;
        Ok(true)
    }

    /// Number of the current line (or of the last line once exhausted).
    pub(crate) const fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buf)
    }
}
