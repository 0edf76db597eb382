//! Frame: The rows × cols array a render pass fills.
//!
//! The frame uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order, which is the order the renderer
//! uploads them in.

use super::cell::Cell;

/// A grid of cells owned by the caller of a render pass.
///
/// Access is in row-major order: `index = row * cols + col`. Zero-sized frames
/// are allowed and simply hold no cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
}

impl Frame {
    /// Create a frame filled with [`Cell::EMPTY`].
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![Cell::EMPTY; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of rows.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the frame holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get a mutable reference to the underlying cell slice.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Convert (row, col) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub const fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Get a reference to a cell at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index_of(row, col).map(|i| &self.cells[i])
    }

    /// Set a cell at (row, col).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(row, col) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Mutable view of one row.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> Option<&mut [Cell]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&mut self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Change dimensions. Contents are not preserved; the next render pass
    /// rewrites every cell anyway.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if rows == self.rows && cols == self.cols {
            return;
        }
        self.cells.clear();
        self.cells.resize(rows * cols, Cell::EMPTY);
        self.rows = rows;
        self.cols = cols;
    }

    /// Get an iterator over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics, and a zero-column frame has no rows worth yielding
        self.cells.chunks(self.cols.max(1)).take(if self.cols == 0 { 0 } else { self.rows })
    }

    /// The displayed text of a row, for tests and debugging. Blank cells
    /// read as spaces and unprintable glyphs as `0x7f`.
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        let start = row * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .map(|c| char::from(c.ascii()))
            .collect()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}
