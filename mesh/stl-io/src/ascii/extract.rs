//! Coordinate pass: reads `vertex` triples into a facet buffer.

use std::io::BufRead;
use std::str::SplitWhitespace;

use stl_types::{Bounds, FacetBuffer, Point3, FLOATS_PER_SLOT};
use tracing::debug;

use super::validate::{keyword, AsciiSummary, Grammar};
use super::{Lines, Token};
use crate::error::{StlError, StlResult};
use crate::geometry::DecodedGeometry;

/// Parse the three coordinates following a `vertex` keyword.
fn parse_vertex(mut fields: SplitWhitespace<'_>, line: usize) -> StlResult<Point3<f32>> {
    let mut coords = [0.0f32; 3];
    for (axis, slot) in ['x', 'y', 'z'].into_iter().zip(coords.iter_mut()) {
        let text = fields.next().ok_or_else(|| {
            StlError::syntax(line, format!("vertex is missing its {axis} coordinate"))
        })?;
        let invalid = || StlError::InvalidCoordinate {
            line,
            axis,
            text: text.to_string(),
        };
        let value: f32 = text.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        *slot = value;
    }
    Ok(Point3::from(coords))
}

fn push_vertex(
    buffer: &mut FacetBuffer,
    bounds: &mut Bounds,
    position: Point3<f32>,
) -> StlResult<()> {
    bounds.expand_to_include(&position);
    let floats = buffer.as_slice().len() + FLOATS_PER_SLOT;
    buffer
        .try_push_position(position)
        .map_err(|_| StlError::OutOfMemory { floats })
}

/// Read vertex coordinates into a buffer sized from a prior [`validate`](super::validate) pass.
///
/// Lines other than `vertex` are skipped; their structure was already
/// checked.
///
/// # Errors
///
/// - [`StlError::Syntax`] if a `vertex` line lacks a coordinate, or if the
///   input no longer matches `summary`
/// - [`StlError::InvalidCoordinate`] if a coordinate is not a finite number
/// - [`StlError::OutOfMemory`] if the buffer cannot be allocated
pub fn extract<R: BufRead>(reader: R, summary: &AsciiSummary) -> StlResult<DecodedGeometry> {
    let mut buffer =
        FacetBuffer::try_with_slots(summary.vertex_count).map_err(|_| StlError::OutOfMemory {
            floats: summary.vertex_count.saturating_mul(FLOATS_PER_SLOT),
        })?;
    let mut bounds = Bounds::empty();
    let mut lines = Lines::new(reader);

    while lines.advance()? {
        let text = lines.text();
        let mut fields = text.split_whitespace();
        let is_vertex = fields
            .next()
            .is_some_and(|word| Token::parse(word) == Some(Token::Vertex));
        if is_vertex {
            let position = parse_vertex(fields, lines.line())?;
            push_vertex(&mut buffer, &mut bounds, position)?;
        }
    }

    if buffer.slot_count() != summary.vertex_count {
        return Err(StlError::syntax(
            lines.line().max(1),
            format!(
                "found {} vertices, validation counted {}",
                buffer.slot_count(),
                summary.vertex_count
            ),
        ));
    }

    debug!(floats = buffer.as_slice().len(), "extracted ASCII vertices");
    Ok(DecodedGeometry {
        buffer,
        bounds,
        facet_count: summary.facet_count,
    })
}

/// Validate and extract in a single read.
///
/// Produces the same counts, bounds and buffer as [`validate`](super::validate)
/// followed by [`extract`] for every valid input. On invalid input the first
/// problem by line number is reported.
///
/// # Errors
///
/// Any error of [`validate`](super::validate) or [`extract`].
///
/// # Example
///
/// ```
/// use stl_io::ascii::parse_single_pass;
///
/// let text = b"solid t\nfacet normal 0 0 1\nouter loop\n\
///     vertex 0 0 0\nvertex 2 0 0\nvertex 0 3 0\nendloop\nendfacet\nendsolid t\n";
/// let (summary, geometry) = parse_single_pass(&text[..]).unwrap();
/// assert_eq!(summary.vertex_count, 3);
/// assert_eq!(geometry.bounds.max.y, 3.0);
/// ```
pub fn parse_single_pass<R: BufRead>(reader: R) -> StlResult<(AsciiSummary, DecodedGeometry)> {
    let mut buffer = FacetBuffer::new();
    let mut bounds = Bounds::empty();
    let mut grammar = Grammar::new();
    let mut lines = Lines::new(reader);

    while lines.advance()? {
        let Some(token) = keyword(&lines)? else {
            continue;
        };
        grammar.feed(token, lines.line())?;
        if token == Token::Vertex {
            let text = lines.text();
            let mut fields = text.split_whitespace();
            fields.next();
            let position = parse_vertex(fields, lines.line())?;
            push_vertex(&mut buffer, &mut bounds, position)?;
        }
    }

    let summary = grammar.finish(lines.line())?;
    debug!(
        facets = summary.facet_count,
        vertices = summary.vertex_count,
        "parsed ASCII STL in one pass"
    );
    Ok((
        summary,
        DecodedGeometry {
            buffer,
            bounds,
            facet_count: summary.facet_count,
        },
    ))
}
