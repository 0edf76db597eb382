//! Line index: newline offsets for a bounded window of the buffer.
//!
//! Large files are never scanned end to end. The index covers a window that
//! starts at a known line start (normally the grid's first visible line) and
//! extends at most `budget` bytes forward. Rows are addressed either relative
//! to the window (`local`) or absolutely (`lines_down + local`).
//!
//! ```text
//!  window_start                                     window_end
//!  │ row 0        │ row 1   │ row 2              │ row 3 ...│
//!  ▼              ▼         ▼                    ▼          ▼
//!  ───────────────\n────────\n───────────────────\n─────────┤
//!                 ▲         ▲                    ▲
//!           newlines[0] newlines[1]         newlines[2]
//! ```

/// Bytes scanned per (re)population when no budget is configured.
pub const DEFAULT_SCAN_BUDGET: usize = 1 << 20;

/// Initial capacity of the offsets array; growth doubles from here.
const INITIAL_CAPACITY: usize = 1024;

/// Outcome of looking up where a row starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStart {
    /// Byte offset of the row's first byte.
    At(usize),
    /// The row lies past the end of the file.
    PastEnd,
    /// The row lies outside the scanned window; repopulate first.
    Unscanned,
}

/// Newline offsets for one scan window.
///
/// Offsets are strictly increasing and each one points at a `\n` byte.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
    /// First byte covered by the window; always a line start.
    window_start: usize,
    /// One past the last byte scanned.
    window_end: usize,
    /// Absolute row number of the line starting at `window_start`.
    lines_down: usize,
    /// Whether the scan hit end-of-buffer.
    reached_eof: bool,
    /// Whether `populate` has run at all.
    populated: bool,
    budget: usize,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_BUDGET)
    }
}

impl LineIndex {
    /// Create an empty index that scans at most `budget` bytes per population.
    pub fn new(budget: usize) -> Self {
        Self {
            newlines: Vec::with_capacity(INITIAL_CAPACITY),
            window_start: 0,
            window_end: 0,
            lines_down: 0,
            reached_eof: false,
            populated: false,
            budget: budget.max(1),
        }
    }

    /// Scan `bytes[start..start + budget]` and record every newline.
    ///
    /// `start` must be the first byte of absolute row `lines_down`. Previously
    /// recorded offsets are discarded but the allocation is kept.
    pub fn populate(&mut self, bytes: &[u8], start: usize, lines_down: usize) {
        let start = start.min(bytes.len());
        let end = start.saturating_add(self.budget).min(bytes.len());

        self.newlines.clear();
        for pos in memchr::memchr_iter(b'\n', &bytes[start..end]) {
            self.push(start + pos);
        }

        self.window_start = start;
        self.window_end = end;
        self.lines_down = lines_down;
        self.reached_eof = end == bytes.len();
        self.populated = true;

        tracing::debug!(
            start,
            end,
            lines_down,
            newlines = self.newlines.len(),
            capacity = self.newlines.capacity(),
            "line index populated"
        );
    }

    /// Append with explicit doubling so growth never degrades to
    /// per-element reallocation.
    fn push(&mut self, offset: usize) {
        if self.newlines.len() == self.newlines.capacity() {
            let extra = self.newlines.capacity().max(INITIAL_CAPACITY);
            self.newlines.reserve_exact(extra);
        }
        self.newlines.push(offset);
    }

    /// Make sure absolute rows `row..row + rows` are answerable, rescanning
    /// from `row_start` (the first byte of `row`) when they are not.
    ///
    /// Returns `true` when a rescan happened.
    pub fn ensure(&mut self, bytes: &[u8], row: usize, row_start: usize, rows: usize) -> bool {
        let last = row.saturating_add(rows);
        let fresh = self.populated
            && self.start_of_row(row) == RowStart::At(row_start)
            && (self.reached_eof || self.covers(last));
        if fresh {
            return false;
        }
        self.populate(bytes, row_start, row);
        true
    }

    /// Whether the start of absolute row `row` is known.
    pub fn covers(&self, row: usize) -> bool {
        self.populated
            && row >= self.lines_down
            && row - self.lines_down <= self.newlines.len()
    }

    /// Start of a row relative to the window.
    pub fn row_start(&self, local: usize) -> RowStart {
        if !self.populated {
            return RowStart::Unscanned;
        }
        match local {
            0 => RowStart::At(self.window_start),
            k if k <= self.newlines.len() => RowStart::At(self.newlines[k - 1] + 1),
            _ if self.reached_eof => RowStart::PastEnd,
            _ => RowStart::Unscanned,
        }
    }

    /// Start of an absolute row. Rows above the window are
    /// [`RowStart::Unscanned`].
    pub fn start_of_row(&self, row: usize) -> RowStart {
        match row.checked_sub(self.lines_down) {
            Some(local) => self.row_start(local),
            None => RowStart::Unscanned,
        }
    }

    /// Offset of the newline ending an absolute row, or end-of-file for the
    /// last line. `None` when the window does not reach that far.
    pub fn end_of_row(&self, row: usize, len: usize) -> Option<usize> {
        let local = row.checked_sub(self.lines_down)?;
        if !self.populated || local > self.newlines.len() {
            return None;
        }
        match self.newlines.get(local) {
            Some(&nl) => Some(nl),
            None if self.reached_eof => Some(len),
            None => None,
        }
    }

    /// Absolute row number of the window's first line.
    pub const fn lines_down(&self) -> usize {
        self.lines_down
    }

    /// Byte range the window covers.
    pub const fn window(&self) -> std::ops::Range<usize> {
        self.window_start..self.window_end
    }

    /// Number of newlines recorded in the window.
    pub fn newline_count(&self) -> usize {
        self.newlines.len()
    }

    /// Current capacity of the offsets array.
    pub fn capacity(&self) -> usize {
        self.newlines.capacity()
    }

    /// Whether the window runs to end-of-buffer.
    pub const fn reached_eof(&self) -> bool {
        self.reached_eof
    }
}
