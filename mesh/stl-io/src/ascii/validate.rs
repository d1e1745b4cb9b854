//! Grammar pass: checks structure and counts, reads no coordinates.

use std::io::BufRead;

use tracing::debug;

use super::{Lines, Token};
use crate::error::{StlError, StlResult};

/// Counts gathered by a successful grammar pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AsciiSummary {
    /// Completed `facet ... endfacet` blocks.
    pub facet_count: u32,
    /// `vertex` lines; always `3 * facet_count`.
    pub vertex_count: usize,
    /// Lines read, blank lines included.
    pub lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    SolidStart,
    SolidEnd,
    FacetStart,
    FacetEnd,
    LoopStart,
    LoopEnd,
    Vertex,
}

impl State {
    /// Between `facet` and its `endfacet`.
    const fn in_facet(self) -> bool {
        matches!(
            self,
            Self::FacetStart | Self::LoopStart | Self::Vertex | Self::LoopEnd
        )
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::Start => "before `solid`",
            Self::SolidStart => "after `solid`",
            Self::SolidEnd => "after `endsolid`",
            Self::FacetStart => "after `facet`",
            Self::FacetEnd => "after `endfacet`",
            Self::LoopStart => "after `outer loop`",
            Self::LoopEnd => "after `endloop`",
            Self::Vertex => "after `vertex`",
        }
    }
}

/// The keyword state machine, fed one token per non-blank line.
#[derive(Debug)]
pub(crate) struct Grammar {
    state: State,
    loop_vertices: u32,
    facets: u32,
    vertices: usize,
}

impl Grammar {
    pub(crate) const fn new() -> Self {
        Self {
            state: State::Start,
            loop_vertices: 0,
            facets: 0,
            vertices: 0,
        }
    }

    pub(crate) fn feed(&mut self, token: Token, line: usize) -> StlResult<()> {
        let next = match (self.state, token) {
            (state, Token::Solid | Token::EndSolid) if state.in_facet() => {
                return Err(StlError::syntax(
                    line,
                    format!("`{token}` inside an unfinished facet"),
                ));
            }
            (_, Token::Solid) => State::SolidStart,
            (_, Token::EndSolid) => State::SolidEnd,
            (State::SolidStart | State::FacetEnd, Token::Facet) => State::FacetStart,
            (State::FacetStart, Token::Outer) => {
                self.loop_vertices = 0;
                State::LoopStart
            }
            (State::LoopStart | State::Vertex, Token::Vertex) => {
                self.loop_vertices = self.loop_vertices.saturating_add(1);
                self.vertices += 1;
                State::Vertex
            }
            (State::Vertex, Token::EndLoop) => {
                if self.loop_vertices != 3 {
                    return Err(StlError::syntax(
                        line,
                        format!("loop has {} vertices, expected 3", self.loop_vertices),
                    ));
                }
                State::LoopEnd
            }
            (State::LoopEnd, Token::EndFacet) => {
                self.facets = self
                    .facets
                    .checked_add(1)
                    .ok_or_else(|| StlError::syntax(line, "too many facets"))?;
                State::FacetEnd
            }
            (state, token) => {
                return Err(StlError::syntax(
                    line,
                    format!("unexpected `{token}` {}", state.describe()),
                ));
            }
        };
        self.state = next;
        Ok(())
    }

    /// Check the end of input. `lines` is the number of lines read.
    pub(crate) fn finish(self, lines: usize) -> StlResult<AsciiSummary> {
        if self.state != State::SolidEnd {
            return Err(StlError::syntax(
                lines.max(1),
                format!("missing `endsolid` at end of file ({})", self.state.describe()),
            ));
        }
        Ok(AsciiSummary {
            facet_count: self.facets,
            vertex_count: self.vertices,
            lines,
        })
    }
}

/// Read the first keyword of the current line, if it has one.
///
/// # Errors
///
/// `Syntax` for an unknown keyword.
pub(crate) fn keyword<R: BufRead>(lines: &Lines<R>) -> StlResult<Option<Token>> {
    let text = lines.text();
    let Some(word) = text.split_whitespace().next() else {
        return Ok(None);
    };
    Token::parse(word)
        .map(Some)
        .ok_or_else(|| StlError::syntax(lines.line(), format!("unknown keyword `{word}`")))
}

/// Validate the ASCII grammar and count facets and vertices.
///
/// # Errors
///
/// [`StlError::Syntax`] with the 1-based line of the first violation,
/// [`StlError::Io`] if reading fails.
///
/// # Example
///
/// ```
/// use stl_io::ascii::validate;
///
/// let text = b"solid t\nfacet normal 0 0 1\nouter loop\n\
///     vertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid t\n";
/// let summary = validate(&text[..]).unwrap();
/// assert_eq!(summary.facet_count, 1);
/// assert_eq!(summary.vertex_count, 3);
/// ```
pub fn validate<R: BufRead>(reader: R) -> StlResult<AsciiSummary> {
    let mut lines = Lines::new(reader);
    let mut grammar = Grammar::new();

    while lines.advance()? {
        if let Some(token) = keyword(&lines)? {
            grammar.feed(token, lines.line())?;
        }
    }

    let summary = grammar.finish(lines.line())?;
    debug!(
        facets = summary.facet_count,
        vertices = summary.vertex_count,
        lines = summary.lines,
        "validated ASCII STL"
    );
    Ok(summary)
}
