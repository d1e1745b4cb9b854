//! Options controlling how a file is loaded.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How ASCII files are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AsciiMode {
    /// Validate the grammar first, then extract vertices into an exactly
    /// sized buffer. Reads the file twice.
    #[default]
    TwoPass,
    /// Validate and extract in one read with a growable buffer.
    SinglePass,
}

/// What to do with zero-area facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DegeneratePolicy {
    /// Give the facet a `(0, 0, 0)` normal and keep loading.
    #[default]
    ZeroNormal,
    /// Fail the load on the first degenerate facet.
    Reject,
}

/// Parameters for [`Mesh::load_with`](crate::Mesh::load_with).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadOptions {
    /// ASCII reading strategy. Default: two passes.
    pub ascii_mode: AsciiMode,

    /// Degenerate facet handling. Default: zero normal.
    pub degenerate: DegeneratePolicy,

    /// Upper bound on the facet count a binary header may announce.
    /// Checked before the buffer is allocated. Default: no limit.
    pub max_facets: Option<u32>,
}

impl LoadOptions {
    /// Reject degenerate facets and cap binary files at `max_facets`.
    #[must_use]
    pub const fn strict(max_facets: u32) -> Self {
        Self {
            ascii_mode: AsciiMode::TwoPass,
            degenerate: DegeneratePolicy::Reject,
            max_facets: Some(max_facets),
        }
    }

    /// Read ASCII files once; everything else default.
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            ascii_mode: AsciiMode::SinglePass,
            degenerate: DegeneratePolicy::ZeroNormal,
            max_facets: None,
        }
    }

    /// Set the ASCII reading strategy.
    #[must_use]
    pub const fn with_ascii_mode(mut self, mode: AsciiMode) -> Self {
        self.ascii_mode = mode;
        self
    }

    /// Set the degenerate facet policy.
    #[must_use]
    pub const fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Set the binary facet limit.
    #[must_use]
    pub const fn with_max_facets(mut self, max_facets: u32) -> Self {
        self.max_facets = Some(max_facets);
        self
    }
}
