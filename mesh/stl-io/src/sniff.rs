//! ASCII / binary classification.
//!
//! A file is ASCII exactly when every byte is `<= 127`. The first byte above
//! 127 settles it as binary; there is no look at the `solid` keyword, since
//! plenty of binary exporters start their header with that word.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{StlError, StlResult};

/// Encoding of an STL file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StlEncoding {
    /// Line-oriented text.
    Ascii,
    /// Packed little-endian records.
    Binary,
}

impl StlEncoding {
    /// Lowercase name for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Binary => "binary",
        }
    }
}

impl std::fmt::Display for StlEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open `path` on its own handle and classify it.
///
/// # Errors
///
/// [`StlError::Open`] if the file cannot be opened, [`StlError::Io`] if a
/// read fails.
pub fn sniff_path(path: &Path) -> StlResult<StlEncoding> {
    let file = File::open(path).map_err(|source| StlError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    sniff(BufReader::new(file))
}

/// Classify the bytes produced by `reader`.
///
/// Stops reading at the first byte above 127.
///
/// # Errors
///
/// [`StlError::Io`] if a read fails.
pub fn sniff<R: Read>(mut reader: R) -> StlResult<StlEncoding> {
    let mut chunk = [0u8; 4096];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return Ok(StlEncoding::Ascii),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if !chunk[..n].is_ascii() {
            return Ok(StlEncoding::Binary);
        }
    }
}
