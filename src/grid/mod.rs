//! Grid: the rows × cols viewport over a text buffer.
//!
//! # Scroll state
//!
//! ```text
//!                 col_offset
//!                 │◄──── text_cols ────►│
//!   line 0        ·                     ·
//!   line 1        ·                     ·
//!   row_offset ─► ┌─────────────────────┐ ◄─ grid_offset (first byte of the line)
//!                 │  rows visible lines │
//!                 └─────────────────────┘ ◄─ end_grid_offset (after a render)
//! ```
//!
//! `grid_offset` always holds the first byte of line `row_offset`. Every
//! mutator in this module keeps the two in sync; scrolling walks from the
//! current `grid_offset` rather than from the start of the file.
//!
//! The render pass lives in `render.rs`, scrolling and jumping in
//! `scroll.rs`.

pub mod cursor;
mod metrics;
mod pointer;
mod render;
mod scroll;

pub use metrics::GlyphMetrics;
pub use pointer::{ButtonFlags, PointerState};

use crate::syntax::{ModeId, DEFAULT_MODE};
use crate::text::{LineIndex, TextBuffer, DEFAULT_SCAN_BUDGET};
use bitflags::bitflags;
use std::ops::Range;

/// Narrowest line-number gutter, separator included.
pub const MIN_LINE_NUM_GAP: usize = 7;

bitflags! {
    /// Options for [`Grid::jump_to_offset`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct JumpFlags: u8 {
        /// Put the target line on the first row.
        const TOP = 0b01;
        /// Scroll horizontally so the target column is visible.
        const AFFECT_COLUMN = 0b10;
    }
}

/// Grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Tab stop interval in display columns. Zero is treated as one.
    pub spaces_per_tab: usize,
    /// Whether to draw the line-number gutter.
    pub line_numbers: bool,
    /// Bytes the line index scans per population.
    pub line_index_budget: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spaces_per_tab: 4,
            line_numbers: false,
            line_index_budget: DEFAULT_SCAN_BUDGET,
        }
    }
}

/// Viewport and cursor state for one buffer.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// First visible line, counted from the start of the file.
    row_offset: usize,
    /// Display columns hidden on the left.
    col_offset: usize,
    /// First byte of line `row_offset`.
    grid_offset: usize,
    /// First byte not visited by the last render pass.
    end_grid_offset: usize,
    primary_cursor: usize,
    /// Selection anchor; equal to `primary_cursor` when nothing is selected.
    secondary_cursor: usize,
    /// Screen position of the primary cursor after the last render.
    rel_caret: Option<(usize, usize)>,
    /// Offset `rel_caret` was computed for.
    caret_offset: usize,
    /// Column vertical motion tries to keep.
    target_column: usize,
    spaces_per_tab: usize,
    show_line_numbers: bool,
    /// Gutter width used by the last render.
    line_num_gap: usize,
    /// Lexer mode at the start of line `row_offset`.
    line_start_mode: ModeId,
    lines: LineIndex,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Grid {
    /// Create a grid with the default configuration.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_config(rows, cols, GridConfig::default())
    }

    /// Create a grid with a custom configuration.
    pub fn with_config(rows: usize, cols: usize, config: GridConfig) -> Self {
        Self {
            rows,
            cols,
            row_offset: 0,
            col_offset: 0,
            grid_offset: 0,
            end_grid_offset: 0,
            primary_cursor: 0,
            secondary_cursor: 0,
            rel_caret: None,
            caret_offset: 0,
            target_column: 0,
            spaces_per_tab: config.spaces_per_tab.max(1),
            show_line_numbers: config.line_numbers,
            line_num_gap: 0,
            line_start_mode: DEFAULT_MODE,
            lines: LineIndex::new(config.line_index_budget),
        }
    }

    /// Number of rows.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, gutter included.
    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Change the grid dimensions. Scroll and cursor state are kept.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        tracing::debug!(rows, cols, "grid resized");
        self.rows = rows;
        self.cols = cols;
    }

    /// First visible line.
    #[inline]
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// Display columns scrolled off to the left.
    #[inline]
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// First byte of the first visible line.
    #[inline]
    pub const fn grid_offset(&self) -> usize {
        self.grid_offset
    }

    /// First byte the last render pass did not reach.
    #[inline]
    pub const fn end_grid_offset(&self) -> usize {
        self.end_grid_offset
    }

    /// Tab stop interval.
    #[inline]
    pub const fn spaces_per_tab(&self) -> usize {
        self.spaces_per_tab
    }

    /// Set the tab stop interval. Zero is treated as one.
    pub fn set_spaces_per_tab(&mut self, spaces_per_tab: usize) {
        self.spaces_per_tab = spaces_per_tab.max(1);
    }

    /// Whether the line-number gutter is drawn.
    #[inline]
    pub const fn line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    /// Show or hide the line-number gutter.
    pub fn set_line_numbers(&mut self, show: bool) {
        self.show_line_numbers = show;
    }

    /// Gutter width the last render pass used.
    #[inline]
    pub const fn line_num_gap(&self) -> usize {
        self.line_num_gap
    }

    /// Gutter width for the current scroll position: wide enough for the
    /// largest visible line number plus a separator, never narrower than
    /// [`MIN_LINE_NUM_GAP`], never wider than the grid.
    pub fn gutter_width(&self) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        let widest = cursor::decimal_digits(self.row_offset + self.rows) + 1;
        widest.max(MIN_LINE_NUM_GAP).min(self.cols)
    }

    /// Columns left for text after the gutter.
    #[inline]
    pub fn text_cols(&self) -> usize {
        self.cols - self.gutter_width()
    }

    /// Lexer mode the next render starts in.
    #[inline]
    pub const fn line_start_mode(&self) -> ModeId {
        self.line_start_mode
    }

    /// Set the lexer mode at the start of line `row_offset`.
    pub fn set_line_start_mode(&mut self, mode: ModeId) {
        self.line_start_mode = mode;
    }

    /// The newline index over the visible window.
    pub const fn line_index(&self) -> &LineIndex {
        &self.lines
    }

    /// Offset of the primary cursor.
    #[inline]
    pub const fn primary_cursor(&self) -> usize {
        self.primary_cursor
    }

    /// Offset of the selection anchor.
    #[inline]
    pub const fn secondary_cursor(&self) -> usize {
        self.secondary_cursor
    }

    /// Move the primary cursor, clamped to the buffer.
    pub fn set_primary_cursor(&mut self, text: &TextBuffer, offset: usize) {
        self.primary_cursor = text.clamp(offset);
    }

    /// Move the selection anchor, clamped to the buffer.
    pub fn set_secondary_cursor(&mut self, text: &TextBuffer, offset: usize) {
        self.secondary_cursor = text.clamp(offset);
    }

    /// Collapse the selection onto the primary cursor.
    pub fn drop_anchor(&mut self) {
        self.secondary_cursor = self.primary_cursor;
    }

    /// Selected byte range, if the cursors differ.
    pub fn selection(&self) -> Option<Range<usize>> {
        let (p, s) = (self.primary_cursor, self.secondary_cursor);
        (p != s).then(|| p.min(s)..p.max(s))
    }

    /// `(row, col)` of the primary cursor in the last render, text columns
    /// counted from the left edge of the grid (gutter included).
    #[inline]
    pub const fn rel_caret(&self) -> Option<(usize, usize)> {
        self.rel_caret
    }

    /// Column vertical motion tries to keep.
    #[inline]
    pub const fn target_column(&self) -> usize {
        self.target_column
    }

    /// Remember the primary cursor's current display column as the
    /// target for vertical motion.
    pub fn remember_column(&mut self, text: &TextBuffer) {
        self.target_column = cursor::display_column(text.as_bytes(), self.primary_cursor, self.spaces_per_tab);
    }

    /// Move the primary cursor one byte left.
    pub fn move_cursor_left(&mut self, text: &TextBuffer) -> usize {
        self.primary_cursor = text.clamp(self.primary_cursor).saturating_sub(1);
        self.remember_column(text);
        self.primary_cursor
    }

    /// Move the primary cursor one byte right.
    pub fn move_cursor_right(&mut self, text: &TextBuffer) -> usize {
        self.primary_cursor = text.clamp(self.primary_cursor.saturating_add(1));
        self.remember_column(text);
        self.primary_cursor
    }

    /// Move the primary cursor to the start of its line.
    pub fn move_cursor_to_line_start(&mut self, text: &TextBuffer) -> usize {
        self.primary_cursor = cursor::line_start(text.as_bytes(), self.primary_cursor);
        self.target_column = 0;
        self.primary_cursor
    }

    /// Move the primary cursor to the end of its line.
    pub fn move_cursor_to_line_end(&mut self, text: &TextBuffer) -> usize {
        self.primary_cursor = cursor::line_end(text.as_bytes(), self.primary_cursor);
        self.remember_column(text);
        self.primary_cursor
    }
}
