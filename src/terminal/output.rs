//! `OutputBuffer`: a frame as ANSI escape sequences, written in one syscall.

use crate::buffer::{Cell, Frame, GlyphVariant, Modifiers, Rgb, UNPRINTABLE};
use std::io::Write;

/// Stand-in for the unprintable glyph on a text terminal.
const UNPRINTABLE_TEXT: u8 = b'.';

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` so the
/// terminal never shows a half-drawn frame.
pub struct OutputBuffer {
    data: Vec<u8>,
}

/// SGR state of the last emitted cell.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Style {
    fg: Rgb,
    bg: Rgb,
    variant: GlyphVariant,
    modifiers: Modifiers,
}

impl Style {
    fn of(cell: &Cell) -> Self {
        Self {
            fg: cell.fg(),
            bg: cell.bg(),
            variant: cell.variant().unwrap_or(GlyphVariant::Regular),
            modifiers: cell.modifiers(),
        }
    }
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal frame.
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move cursor to `(row, col)`, zero-based.
    #[inline]
    pub fn cursor_move(&mut self, row: usize, col: usize) {
        // Writing into a Vec cannot fail.
        let _ = write!(self.data, "\x1b[{};{}H", row + 1, col + 1);
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Append a whole frame, then park the terminal cursor on the caret (or
    /// hide it when the caret is off screen).
    ///
    /// Attributes are only re-sent when they change between cells, and
    /// every row starts with an absolute move so a resize mid-frame cannot
    /// skew the layout.
    pub fn write_frame(&mut self, frame: &Frame, caret: Option<(usize, usize)>) {
        self.cursor_hide();
        for (row, cells) in frame.iter_rows().enumerate() {
            self.cursor_move(row, 0);
            let mut current = None;
            for cell in cells {
                let style = Style::of(cell);
                if current != Some(style) {
                    self.set_style(style);
                    current = Some(style);
                }
                self.data.push(printable(cell));
            }
        }
        self.reset_attrs();

        if let Some((row, col)) = caret {
            self.cursor_move(row, col);
            self.cursor_show();
        }
    }

    fn set_style(&mut self, style: Style) {
        self.data.extend_from_slice(b"\x1b[0");
        if style.variant.is_bold() {
            self.data.extend_from_slice(b";1");
        }
        if style.variant.is_italic() {
            self.data.extend_from_slice(b";3");
        }
        if style.modifiers.contains(Modifiers::UNDERLINE) {
            self.data.extend_from_slice(b";4");
        }
        if style.modifiers.contains(Modifiers::STRIKETHROUGH) {
            self.data.extend_from_slice(b";9");
        }
        let (fg, bg) = (style.fg, style.bg);
        let _ = write!(
            self.data,
            ";38;2;{};{};{};48;2;{};{};{}m",
            fg.r, fg.g, fg.b, bg.r, bg.g, bg.b
        );
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn printable(cell: &Cell) -> u8 {
    match cell.ascii() {
        UNPRINTABLE => UNPRINTABLE_TEXT,
        byte => byte,
    }
}
