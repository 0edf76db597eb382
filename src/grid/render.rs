//! The render pass: buffer bytes → frame cells.
//!
//! ```text
//!  ┌ gutter ┐┌──────────── text_cols ─────────────┐
//!  │    12  ││ a b · · c d ░ ░ ░                  │   · tab blank   ░ pad
//!  │    13  ││ e f g h i j k l m n o p q r s t u v│   (rest fed to the lexer)
//!  │    14  ││                                    │   line shorter than col_offset
//!  │        ││                                    │   past end-of-file
//!  └────────┘└────────────────────────────────────┘
//! ```
//!
//! Every byte from `grid_offset` to the end of the last visible line goes
//! through the highlighter, including bytes hidden by horizontal scroll and
//! the tails of lines wider than the grid, so lexer state always matches the
//! file.

use super::{cursor, Grid};
use crate::buffer::{glyph_index, Cell, Frame, GlyphVariant, Modifiers, Rgb};
use crate::syntax::Highlighter;
use crate::text::{RowStart, TextBuffer};
use std::ops::Range;

/// Held pointer position, column relative to the text area.
#[derive(Clone, Copy)]
struct Mouse {
    row: usize,
    col: usize,
}

/// Per-pass constants.
struct Pass<'a> {
    bytes: &'a [u8],
    selection: Option<Range<usize>>,
    idle: Cell,
    selected_blank: Cell,
}

impl Pass<'_> {
    #[inline]
    fn is_selected(&self, offset: usize) -> bool {
        self.selection.as_ref().is_some_and(|r| r.contains(&offset))
    }

    #[inline]
    const fn blank(&self, selected: bool) -> Cell {
        if selected {
            self.selected_blank
        } else {
            self.idle
        }
    }
}

impl Grid {
    /// Fill `frame` with the visible part of `text`.
    ///
    /// The frame is resized to the grid. A grid with no rows or no columns
    /// renders nothing and leaves the rest of the state alone. While the
    /// pointer button is held, the byte under the pointer becomes the primary
    /// cursor. Afterwards [`rel_caret`](Self::rel_caret) says where the
    /// primary cursor landed, if it is on screen.
    pub fn render_into(
        &mut self,
        text: &TextBuffer,
        highlighter: &mut Highlighter,
        frame: &mut Frame,
        pointer: &super::PointerState,
    ) {
        frame.resize(self.rows, self.cols);
        if self.rows == 0 || self.cols == 0 {
            tracing::trace!(rows = self.rows, cols = self.cols, "render skipped: empty grid");
            return;
        }

        let bytes = text.as_bytes();
        let len = bytes.len();
        self.grid_offset = self.grid_offset.min(len);
        self.primary_cursor = self.primary_cursor.min(len);
        self.secondary_cursor = self.secondary_cursor.min(len);
        self.lines.ensure(bytes, self.row_offset, self.grid_offset, self.rows);

        let gap = self.gutter_width();
        self.line_num_gap = gap;

        let idle = highlighter.idle_cell();
        let pass = Pass {
            bytes,
            selection: self.selection(),
            idle,
            selected_blank: idle.with_bg(highlighter.selection_bg()),
        };
        let mouse = pointer.held().then(|| Mouse {
            row: pointer.row,
            col: pointer.col.saturating_sub(gap),
        });

        highlighter.reset(self.line_start_mode);
        self.rel_caret = None;

        let cols = self.cols;
        let cells = frame.cells_mut();
        let mut offset = self.grid_offset;
        // The last line has been drawn; only needed when the index is cold.
        let mut past_last = false;

        for row in 0..self.rows {
            let line = self.row_offset + row;
            let row_cells = &mut cells[row * cols..(row + 1) * cols];
            let (gutter, body) = row_cells.split_at_mut(gap);

            let exists = match self.lines.start_of_row(line) {
                RowStart::At(_) => true,
                RowStart::PastEnd => false,
                RowStart::Unscanned => offset < len || (offset == len && !past_last),
            };
            debug_assert!(!matches!(self.lines.start_of_row(line), RowStart::At(start) if start != offset));

            draw_gutter(gutter, exists.then_some(line + 1), idle, highlighter.gutter_fg());

            if !exists {
                body.fill(idle);
                if mouse.is_some_and(|m| m.row == row) {
                    self.primary_cursor = len;
                }
                continue;
            }

            let start = offset;
            let mouse = mouse.filter(|m| m.row == row);
            offset = self.render_row(&pass, highlighter, body, row, offset, mouse);
            past_last = offset == len && (start == len || bytes[len - 1] != b'\n');
        }

        // The pointer may have moved the cursor after its old spot was drawn.
        if self.caret_offset != self.primary_cursor {
            self.rel_caret = None;
        }

        self.end_grid_offset = offset;
        tracing::trace!(
            grid_offset = self.grid_offset,
            end_grid_offset = offset,
            row_offset = self.row_offset,
            col_offset = self.col_offset,
            caret = ?self.rel_caret,
            "rendered"
        );
    }

    /// Render one existing line into `body`, returning the first byte of the
    /// next line.
    fn render_row(
        &mut self,
        pass: &Pass<'_>,
        highlighter: &mut Highlighter,
        body: &mut [Cell],
        row: usize,
        mut offset: usize,
        mouse: Option<Mouse>,
    ) -> usize {
        let bytes = pass.bytes;
        let len = bytes.len();
        let spt = self.spaces_per_tab;
        let gap = self.line_num_gap;
        let text_cols = body.len();

        // Hidden columns on the left still go through the lexer.
        let mut vis = 0;
        while vis < self.col_offset && offset < len {
            let byte = bytes[offset];
            highlighter.step_mode(bytes, offset);
            if byte == b'\n' {
                break;
            }
            offset += 1;
            vis = cursor::advance_column(byte, vis, spt);
        }

        if vis < self.col_offset {
            // The line ends before col_offset: blank row.
            body.fill(pass.idle);
            if mouse.is_some() {
                self.primary_cursor = offset;
            }
            return if offset < len { offset + 1 } else { offset };
        }

        // A tab straddling col_offset leaves blank leading cells.
        let leading = (vis - self.col_offset).min(text_cols);
        let leading_selected = leading > 0 && pass.is_selected(offset - 1);
        body[..leading].fill(pass.blank(leading_selected));

        let mut column = leading;
        let mut cursor_set = false;
        if mouse.is_some_and(|m| m.col < leading) {
            self.primary_cursor = offset;
            cursor_set = true;
        }

        while column < text_cols && offset < len {
            let byte = bytes[offset];
            let attrs = highlighter.step(bytes, offset);
            let selected = pass.is_selected(offset);

            if mouse.is_some_and(|m| m.col == column) {
                self.primary_cursor = offset;
                cursor_set = true;
            }

            if byte == b'\t' {
                let width = cursor::tab_width(self.col_offset + column, spt);
                if mouse.is_some_and(|m| m.col >= column && m.col < column + width) {
                    self.primary_cursor = offset;
                    cursor_set = true;
                }
                if self.primary_cursor == offset {
                    self.place_caret(row, gap + column);
                }
                let end = (column + width).min(text_cols);
                body[column..end].fill(pass.blank(selected));
                column += width;
                offset += 1;
                continue;
            }

            if self.primary_cursor == offset {
                self.place_caret(row, gap + column);
            }
            if byte == b'\n' {
                break;
            }

            let mut cell = attrs.cell(byte);
            if selected {
                cell.set_bg(pass.selected_blank.bg());
            }
            body[column] = cell;
            column += 1;
            offset += 1;
        }

        if mouse.is_some() && !cursor_set {
            self.primary_cursor = offset;
            if column < text_cols {
                self.place_caret(row, gap + column);
            }
        }

        // The caret can sit at end-of-file, one past the last byte.
        if offset == len && self.primary_cursor == len && column < text_cols {
            self.place_caret(row, gap + column);
        }

        let column = column.min(text_cols);
        body[column..].fill(pass.idle);

        // Feed the rest of the line, newline included, to the lexer.
        while offset < len {
            let byte = bytes[offset];
            highlighter.step_mode(bytes, offset);
            offset += 1;
            if byte == b'\n' {
                break;
            }
        }
        offset
    }

    #[inline]
    fn place_caret(&mut self, row: usize, col: usize) {
        self.rel_caret = Some((row, col));
        self.caret_offset = self.primary_cursor;
    }
}

/// Right-aligned line number followed by at least one blank.
fn draw_gutter(gutter: &mut [Cell], number: Option<usize>, idle: Cell, fg: Rgb) {
    gutter.fill(idle);
    let (Some(number), Some(width)) = (number, gutter.len().checked_sub(1)) else {
        return;
    };
    let digits = number.to_string();
    let digits = digits.as_bytes();
    // Keep the least significant digits if the gutter is too narrow.
    let shown = &digits[digits.len().saturating_sub(width)..];
    let start = width - shown.len();
    for (cell, &d) in gutter[start..width].iter_mut().zip(shown) {
        *cell = Cell::new(glyph_index(d, GlyphVariant::Regular), fg, idle.bg(), Modifiers::empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridConfig, PointerState};
    use crate::syntax::{Mode, Palette, SyntaxTables, Token};

    fn plain() -> Highlighter {
        Highlighter::new(SyntaxTables::new(vec![Mode::accept_all()], Vec::new(), Palette::default()))
    }

    fn render(grid: &mut Grid, text: &TextBuffer, hl: &mut Highlighter) -> Frame {
        let mut frame = Frame::new(0, 0);
        grid.render_into(text, hl, &mut frame, &PointerState::default());
        frame
    }

    #[test]
    fn test_tab_expands_to_next_stop() {
        let text = TextBuffer::from_bytes("ab\tcd\n");
        let mut hl = plain();
        let mut grid = Grid::new(1, 8);
        let frame = render(&mut grid, &text, &mut hl);

        assert_eq!(frame.row_text(0), "ab  cd  ");
        for col in [2, 3, 6, 7] {
            assert_eq!(frame.get(0, col), Some(&hl.idle_cell()), "col {col}");
        }
    }

    #[test]
    fn test_tab_at_column_five() {
        let text = TextBuffer::from_bytes("abcde\tf");
        let mut grid = Grid::new(1, 10);
        let frame = render(&mut grid, &text, &mut plain());
        assert_eq!(frame.row_text(0), "abcde   f ");
    }

    #[test]
    fn test_empty_buffer_is_all_idle() {
        let text = TextBuffer::from_bytes("");
        let mut hl = plain();
        for (rows, cols) in [(1, 1), (3, 5), (24, 80)] {
            let mut grid = Grid::new(rows, cols);
            let frame = render(&mut grid, &text, &mut hl);
            assert_eq!(frame.len(), rows * cols);
            assert!(frame.cells().iter().all(|c| *c == hl.idle_cell()));
        }
    }

    #[test]
    fn test_zero_sized_grid_is_noop() {
        let text = TextBuffer::from_bytes("abc");
        let mut grid = Grid::new(0, 10);
        grid.set_primary_cursor(&text, 2);
        let frame = render(&mut grid, &text, &mut plain());
        assert!(frame.is_empty());
        assert_eq!(grid.rel_caret(), None);
        assert_eq!(grid.primary_cursor(), 2);

        let mut grid = Grid::new(5, 0);
        assert!(render(&mut grid, &text, &mut plain()).is_empty());
    }

    #[test]
    fn test_rows_past_eof_are_idle() {
        let text = TextBuffer::from_bytes("a\nb");
        let mut hl = plain();
        let mut grid = Grid::new(4, 3);
        let frame = render(&mut grid, &text, &mut hl);

        assert_eq!(frame.row_text(0), "a  ");
        assert_eq!(frame.row_text(1), "b  ");
        assert!(frame.iter_rows().skip(2).flatten().all(|c| *c == hl.idle_cell()));
        assert_eq!(grid.end_grid_offset(), 3);
    }

    #[test]
    fn test_long_lines_are_cut() {
        let text = TextBuffer::from_bytes("abcdefgh\nij");
        let mut grid = Grid::new(2, 4);
        let frame = render(&mut grid, &text, &mut plain());
        assert_eq!(frame.row_text(0), "abcd");
        assert_eq!(frame.row_text(1), "ij  ");
    }

    #[test]
    fn test_end_grid_offset_covers_visible_lines() {
        let text = TextBuffer::from_bytes("a\nb\nc\nd");
        let mut grid = Grid::new(2, 4);
        render(&mut grid, &text, &mut plain());
        assert_eq!(grid.grid_offset(), 0);
        assert_eq!(grid.end_grid_offset(), 4);
    }

    #[test]
    fn test_horizontal_scroll() {
        let text = TextBuffer::from_bytes("abcdef\nxy\n\tz");
        let mut grid = Grid::new(3, 4);
        grid.adjust_offsets(&text, 0, 3);
        let frame = render(&mut grid, &text, &mut plain());

        assert_eq!(frame.row_text(0), "def ");
        // Shorter than col_offset.
        assert_eq!(frame.row_text(1), "    ");
        // The tab spans columns 0..4; one blank cell of it remains.
        assert_eq!(frame.row_text(2), " z  ");
    }

    #[test]
    fn test_unprintable_bytes_use_fallback_glyph() {
        let text = TextBuffer::from_bytes(vec![0x01, b'a', 0xc3]);
        let mut grid = Grid::new(1, 3);
        let frame = render(&mut grid, &text, &mut plain());
        let glyphs: Vec<u8> = frame.cells().iter().map(Cell::ascii).collect();
        assert_eq!(glyphs, vec![crate::buffer::UNPRINTABLE, b'a', crate::buffer::UNPRINTABLE]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let text = TextBuffer::from_bytes("fn main() {\n\tlet x = 1; // one\n}\n");
        let mut hl = Highlighter::default();
        let mut grid = Grid::with_config(
            3,
            12,
            GridConfig {
                line_numbers: true,
                ..GridConfig::default()
            },
        );
        grid.set_primary_cursor(&text, 3);
        grid.set_secondary_cursor(&text, 17);
        grid.adjust_offsets(&text, 0, 1);

        let first = render(&mut grid, &text, &mut hl);
        let caret = grid.rel_caret();
        let second = render(&mut grid, &text, &mut hl);
        assert_eq!(first, second);
        assert_eq!(caret, grid.rel_caret());
    }

    #[test]
    fn test_selection_is_symmetric() {
        let text = TextBuffer::from_bytes("0123456789abcdef");
        let mut hl = plain();

        let mut forward = Grid::new(1, 16);
        forward.set_primary_cursor(&text, 5);
        forward.set_secondary_cursor(&text, 10);
        let a = render(&mut forward, &text, &mut hl);

        let mut backward = Grid::new(1, 16);
        backward.set_primary_cursor(&text, 10);
        backward.set_secondary_cursor(&text, 5);
        let b = render(&mut backward, &text, &mut hl);

        assert_eq!(a, b);
        for (col, cell) in a.cells().iter().enumerate() {
            let expected = if (5..10).contains(&col) {
                hl.selection_bg()
            } else {
                hl.idle_cell().bg()
            };
            assert_eq!(cell.bg(), expected, "col {col}");
        }
    }

    #[test]
    fn test_selection_starting_above_grid() {
        let text = TextBuffer::from_bytes("aa\nbb\ncc\n");
        let mut hl = plain();
        let mut grid = Grid::new(2, 2);
        grid.set_primary_cursor(&text, 7);
        grid.set_secondary_cursor(&text, 0);
        grid.adjust_offsets(&text, 1, 0);
        let frame = render(&mut grid, &text, &mut hl);

        // "bb" fully selected, then "c" up to the cursor.
        assert_eq!(frame.get(0, 0).unwrap().bg(), hl.selection_bg());
        assert_eq!(frame.get(0, 1).unwrap().bg(), hl.selection_bg());
        assert_eq!(frame.get(1, 0).unwrap().bg(), hl.selection_bg());
        assert_ne!(frame.get(1, 1).unwrap().bg(), hl.selection_bg());
    }

    #[test]
    fn test_lexer_sees_hidden_bytes() {
        let modes = vec![
            Mode::default(),
            Mode::with_ranges([crate::syntax::ByteRange::new(b' ', b'~')]).with_colors(2, 0),
        ];
        let tokens = vec![Token::new("#").with_mode_of(1).with_mode_switch(1)];
        let mut palette = Palette::default();
        palette.set(2, crate::buffer::Rgb::new(9, 9, 9));
        let mut hl = Highlighter::new(SyntaxTables::new(modes, tokens, palette));

        let text = TextBuffer::from_bytes("#abc def");
        let mut grid = Grid::new(1, 4);
        grid.adjust_offsets(&text, 0, 2);
        let frame = render(&mut grid, &text, &mut hl);

        assert_eq!(frame.row_text(0), "bc d");
        assert!(frame.cells().iter().all(|c| c.fg() == crate::buffer::Rgb::new(9, 9, 9)));
    }

    #[test]
    fn test_token_attributes_reach_cells() {
        let modes = vec![Mode::default(), Mode::default().with_colors(3, 0).with_variant(GlyphVariant::Bold)];
        let mut palette = Palette::default();
        palette.set(3, crate::buffer::Rgb::new(1, 2, 3));
        let tables = SyntaxTables::new(modes, vec![Token::new("if").with_mode_of(1)], palette);
        let mut hl = Highlighter::new(tables);

        let text = TextBuffer::from_bytes("if x");
        let mut grid = Grid::new(1, 4);
        let frame = render(&mut grid, &text, &mut hl);

        let i = frame.get(0, 0).unwrap();
        assert_eq!(i.fg(), crate::buffer::Rgb::new(1, 2, 3));
        assert_eq!(i.variant(), Some(GlyphVariant::Bold));
        assert_eq!(i.ascii(), b'i');
        assert_eq!(frame.get(0, 3).unwrap().variant(), Some(GlyphVariant::Regular));
    }

    #[test]
    fn test_line_numbers() {
        let text = TextBuffer::from_bytes("a\nb\n");
        let mut grid = Grid::with_config(
            4,
            10,
            GridConfig {
                line_numbers: true,
                ..GridConfig::default()
            },
        );
        let frame = render(&mut grid, &text, &mut plain());

        assert_eq!(grid.line_num_gap(), 7);
        assert_eq!(frame.row_text(0), "     1 a  ");
        assert_eq!(frame.row_text(1), "     2 b  ");
        // Empty last line after the trailing newline.
        assert_eq!(frame.row_text(2), "     3    ");
        assert_eq!(frame.row_text(3), "          ");
    }

    #[test]
    fn test_line_numbers_follow_scroll() {
        let text = TextBuffer::from_bytes("0\n1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n11\n");
        let mut grid = Grid::with_config(
            2,
            9,
            GridConfig {
                line_numbers: true,
                ..GridConfig::default()
            },
        );
        grid.adjust_offsets(&text, 9, 0);
        let frame = render(&mut grid, &text, &mut plain());
        assert_eq!(frame.row_text(0), "    10 9 ");
        assert_eq!(frame.row_text(1), "    11 10");
    }

    #[test]
    fn test_caret_tracks_primary_cursor() {
        let text = TextBuffer::from_bytes("ab\n\tc\n");
        let mut hl = plain();
        let mut grid = Grid::new(4, 8);

        grid.set_primary_cursor(&text, 1);
        render(&mut grid, &text, &mut hl);
        assert_eq!(grid.rel_caret(), Some((0, 1)));

        // On the newline: just past the text.
        grid.set_primary_cursor(&text, 2);
        render(&mut grid, &text, &mut hl);
        assert_eq!(grid.rel_caret(), Some((0, 2)));

        // On the tab.
        grid.set_primary_cursor(&text, 3);
        render(&mut grid, &text, &mut hl);
        assert_eq!(grid.rel_caret(), Some((1, 0)));

        // After the tab.
        grid.set_primary_cursor(&text, 4);
        render(&mut grid, &text, &mut hl);
        assert_eq!(grid.rel_caret(), Some((1, 4)));

        // End-of-file, on the empty last line.
        grid.set_primary_cursor(&text, 6);
        render(&mut grid, &text, &mut hl);
        assert_eq!(grid.rel_caret(), Some((2, 0)));
    }

    #[test]
    fn test_caret_hidden_when_scrolled_away() {
        let text = TextBuffer::from_bytes("abc\ndef\n");
        let mut grid = Grid::new(1, 8);
        grid.set_primary_cursor(&text, 1);
        grid.adjust_offsets(&text, 1, 0);
        render(&mut grid, &text, &mut plain());
        assert_eq!(grid.rel_caret(), None);
    }

    #[test]
    fn test_pointer_press_moves_cursor() {
        let text = TextBuffer::from_bytes("hello\nworld");
        let mut hl = plain();
        let mut grid = Grid::new(4, 10);
        let mut frame = Frame::new(0, 0);
        let mut pointer = PointerState::default();

        pointer.press(1, 2, false);
        grid.render_into(&text, &mut hl, &mut frame, &pointer);
        assert_eq!(grid.primary_cursor(), 8);
        assert_eq!(grid.rel_caret(), Some((1, 2)));

        // Past the end of a line: the line's newline.
        pointer.drag(0, 9);
        grid.render_into(&text, &mut hl, &mut frame, &pointer);
        assert_eq!(grid.primary_cursor(), 5);
        assert_eq!(grid.rel_caret(), Some((0, 5)));

        // Below the last line: end-of-file.
        pointer.drag(3, 0);
        grid.render_into(&text, &mut hl, &mut frame, &pointer);
        assert_eq!(grid.primary_cursor(), text.len());

        // Released: the pointer is ignored.
        pointer.release();
        pointer.hover(0, 0);
        grid.render_into(&text, &mut hl, &mut frame, &pointer);
        assert_eq!(grid.primary_cursor(), text.len());
    }

    #[test]
    fn test_pointer_on_tab_and_gutter() {
        let text = TextBuffer::from_bytes("\tx");
        let mut grid = Grid::with_config(
            1,
            12,
            GridConfig {
                line_numbers: true,
                ..GridConfig::default()
            },
        );
        let mut frame = Frame::new(0, 0);
        let mut pointer = PointerState::default();

        // Column 9 is text column 2, inside the tab.
        pointer.press(0, 9, false);
        grid.render_into(&text, &mut plain(), &mut frame, &pointer);
        assert_eq!(grid.primary_cursor(), 0);
        assert_eq!(grid.rel_caret(), Some((0, 7)));

        // Clicking the gutter selects the start of the line.
        pointer.drag(0, 1);
        grid.render_into(&text, &mut plain(), &mut frame, &pointer);
        assert_eq!(grid.primary_cursor(), 0);
    }

    #[test]
    fn test_mode_at_line_start_seeds_lexer() {
        let modes = vec![Mode::default(), Mode::default().with_colors(4, 0)];
        let mut palette = Palette::default();
        palette.set(4, crate::buffer::Rgb::new(4, 4, 4));
        let mut hl = Highlighter::new(SyntaxTables::new(modes, Vec::new(), palette));

        let text = TextBuffer::from_bytes("abc");
        let mut grid = Grid::new(1, 3);
        grid.set_line_start_mode(1);
        let frame = render(&mut grid, &text, &mut hl);
        assert!(frame.cells().iter().all(|c| c.fg() == crate::buffer::Rgb::new(4, 4, 4)));
    }
}
