//! Error types shared across the crate.
//!
//! Only failures that must reach the caller live here. Configuration
//! anomalies are recovered where they happen (see
//! [`ConfigAnomaly`](crate::syntax::ConfigAnomaly)) and out-of-range lookups
//! are clamped at the lookup site.

use std::path::PathBuf;

/// Result alias used by fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the owner of a view.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backing file could not be opened or mapped.
    #[error("failed to open {}: {source}", path.display())]
    Io {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Font metrics cannot be turned into a character grid.
    #[error("degenerate glyph geometry ({glyph_w}x{glyph_h})")]
    DegenerateGeometry {
        /// Glyph advance width in pixels.
        glyph_w: i32,
        /// Glyph line height in pixels.
        glyph_h: i32,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
