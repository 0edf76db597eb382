//! Highlighter: the mode/token lexer driven byte by byte by the grid.
//!
//! The grid visits every byte of the buffer in file order (including bytes it
//! skips for horizontal scroll) and asks for the attributes of each one. The
//! lexer answers in runs:
//!
//! ```text
//!   bytes     i f d e f ( x )
//!   runs      └───────┘ └ └ └      maximal runs of bytes the mode accepts,
//!                                  or single rejected bytes
//!   lookup    "ifdef" → token?     first matching token in config order
//!   display   mode_of or current   for every byte of the run
//!   after     mode_switch          becomes current for the next run
//! ```
//!
//! A run is classified when its first byte is visited; later bytes of the run
//! reuse the result. A newline never extends a run.

use super::mode::{ModeId, DEFAULT_MODE};
use super::tables::{Attrs, SyntaxTables};
use crate::buffer::{Cell, Rgb};

/// The run currently being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    display: ModeId,
    next: ModeId,
}

/// Lexer state plus the tables it reads.
#[derive(Debug, Clone)]
pub struct Highlighter {
    tables: SyntaxTables,
    current_mode: ModeId,
    span: Option<Span>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(SyntaxTables::default())
    }
}

impl Highlighter {
    /// Create a highlighter starting in mode 0.
    pub const fn new(tables: SyntaxTables) -> Self {
        Self {
            tables,
            current_mode: DEFAULT_MODE,
            span: None,
        }
    }

    /// Re-seed the lexer at a line start. Unknown modes fall back to mode 0.
    pub fn reset(&mut self, mode: ModeId) {
        self.current_mode = self.tables.validate_mode(mode);
        self.span = None;
    }

    /// The mode that will classify the next run.
    pub const fn current_mode(&self) -> ModeId {
        self.current_mode
    }

    /// The tables this lexer reads.
    pub const fn tables(&self) -> &SyntaxTables {
        &self.tables
    }

    /// Replace the tables and start over in mode 0.
    pub fn set_tables(&mut self, tables: SyntaxTables) {
        self.tables = tables;
        self.reset(DEFAULT_MODE);
    }

    /// Mode the byte at `offset` is displayed in, advancing lexer state.
    ///
    /// Offsets are expected in increasing order, one byte at a time. A jump
    /// to an offset outside the current run starts a new run without
    /// applying the pending mode switch. Offsets at or past the end of
    /// `bytes` report the current mode and leave the state untouched.
    pub fn step_mode(&mut self, bytes: &[u8], offset: usize) -> ModeId {
        if offset >= bytes.len() {
            return self.current_mode;
        }

        match self.span {
            Some(span) if (span.start..span.end).contains(&offset) => return span.display,
            Some(span) if span.end == offset => self.current_mode = span.next,
            Some(span) => {
                tracing::trace!(expected = span.end, offset, "highlighter resynced");
            }
            None => {}
        }

        let span = self.classify(bytes, offset);
        self.span = Some(span);
        span.display
    }

    /// Attributes of the byte at `offset`, advancing lexer state.
    #[inline]
    pub fn step(&mut self, bytes: &[u8], offset: usize) -> Attrs {
        let mode = self.step_mode(bytes, offset);
        self.tables.attrs(mode)
    }

    /// Finish the current run, so [`current_mode`](Self::current_mode)
    /// reflects every byte visited so far.
    pub fn settle(&mut self) {
        if let Some(span) = self.span.take() {
            self.current_mode = span.next;
        }
    }

    fn classify(&self, bytes: &[u8], start: usize) -> Span {
        let mode = self.current_mode;
        let accepted = self.tables.mode(mode);

        let run_len = bytes[start..]
            .iter()
            .take_while(|&&b| b != b'\n' && accepted.accepts(b))
            .count();
        let end = start + run_len.max(1);

        match self.tables.lookup(mode, &bytes[start..end]) {
            Some((_, t)) => Span {
                start,
                end,
                display: t.display,
                next: t.next,
            },
            None => Span {
                start,
                end,
                display: mode,
                next: mode,
            },
        }
    }

    /// Blank cell on the idle background.
    #[inline]
    pub const fn idle_cell(&self) -> Cell {
        self.tables.idle_cell()
    }

    /// Background of selected cells.
    #[inline]
    pub const fn selection_bg(&self) -> Rgb {
        self.tables.palette().selection
    }

    /// Foreground of line numbers.
    #[inline]
    pub const fn gutter_fg(&self) -> Rgb {
        self.tables.palette().gutter
    }
}
