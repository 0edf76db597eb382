//! Glyph metrics: turning a pixel window into a character grid.

use crate::error::{Error, Result};

/// Cell geometry reported by the font rasterizer.
///
/// ```text
///   overlap_w  glyph_w  overlap_w
///   ├────────┼─────────┼────────┤
///   └──────── full_width ───────┘
/// ```
///
/// Glyphs may bleed `overlap_w` pixels into their neighbours; the atlas
/// stores each glyph at its full width but cells advance by `glyph_w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Horizontal advance per cell, in pixels.
    pub glyph_w: i32,
    /// Line height, in pixels.
    pub glyph_h: i32,
    /// Overhang on each side of a glyph, in pixels.
    pub overlap_w: i32,
}

impl GlyphMetrics {
    /// Create metrics.
    pub const fn new(glyph_w: i32, glyph_h: i32, overlap_w: i32) -> Self {
        Self {
            glyph_w,
            glyph_h,
            overlap_w,
        }
    }

    /// Width of one glyph in the atlas, overhang included.
    #[inline]
    pub const fn full_width(&self) -> i32 {
        self.glyph_w + 2 * self.overlap_w
    }

    /// `(rows, cols)` needed to cover a `wnd_w` × `wnd_h` pixel window.
    /// Partially visible cells count, so the grid always covers the window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateGeometry`] when either glyph dimension is
    /// not positive.
    pub fn grid_size(&self, wnd_w: i32, wnd_h: i32) -> Result<(usize, usize)> {
        let (Ok(glyph_w), Ok(glyph_h)) = (u32::try_from(self.glyph_w), u32::try_from(self.glyph_h)) else {
            return Err(self.degenerate());
        };
        if glyph_w == 0 || glyph_h == 0 {
            return Err(self.degenerate());
        }

        let wnd_w = u32::try_from(wnd_w).unwrap_or(0);
        let wnd_h = u32::try_from(wnd_h).unwrap_or(0);
        Ok((wnd_h.div_ceil(glyph_h) as usize, wnd_w.div_ceil(glyph_w) as usize))
    }

    fn degenerate(&self) -> Error {
        Error::DegenerateGeometry {
            glyph_w: self.glyph_w,
            glyph_h: self.glyph_h,
        }
    }
}
