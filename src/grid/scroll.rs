//! Scrolling, vertical cursor motion and jump-to-offset.
//!
//! Each operation walks outward from the current `grid_offset` (or the
//! cursor), so the cost is proportional to the distance moved, never to
//! the position in the file.

use super::{cursor, Grid, JumpFlags};
use crate::text::{RowStart, TextBuffer};
use std::collections::VecDeque;

impl Grid {
    /// Scroll by `move_down` lines and `move_right` display columns.
    ///
    /// Both offsets clamp at zero; `row_offset` also stops at the last line
    /// of the file. `grid_offset` follows `row_offset`.
    pub fn adjust_offsets(&mut self, text: &TextBuffer, move_down: isize, move_right: isize) {
        let bytes = text.as_bytes();
        self.col_offset = self.col_offset.saturating_add_signed(move_right);

        let target = self.row_offset.saturating_add_signed(move_down);
        if target > self.row_offset {
            self.scroll_down(bytes, target - self.row_offset);
        } else if target < self.row_offset {
            self.scroll_up(bytes, self.row_offset - target);
        }

        tracing::debug!(
            move_down,
            move_right,
            row_offset = self.row_offset,
            col_offset = self.col_offset,
            grid_offset = self.grid_offset,
            "scrolled"
        );
    }

    fn scroll_down(&mut self, bytes: &[u8], lines: usize) {
        let target = self.row_offset + lines;
        if let RowStart::At(start) = self.lines.start_of_row(target) {
            if self.lines.start_of_row(self.row_offset) == RowStart::At(self.grid_offset) {
                self.row_offset = target;
                self.grid_offset = start;
                return;
            }
        }

        let base = self.grid_offset.min(bytes.len());
        let mut offset = base;
        let mut walked = 0;
        for nl in memchr::memchr_iter(b'\n', &bytes[base..]).take(lines) {
            walked += 1;
            offset = base + nl + 1;
        }
        self.row_offset += walked;
        self.grid_offset = offset;
    }

    fn scroll_up(&mut self, bytes: &[u8], lines: usize) {
        let target = self.row_offset - lines;
        if target == 0 {
            self.row_offset = 0;
            self.grid_offset = 0;
            return;
        }
        if let RowStart::At(start) = self.lines.start_of_row(target) {
            if self.lines.start_of_row(self.row_offset) == RowStart::At(self.grid_offset) {
                self.row_offset = target;
                self.grid_offset = start;
                return;
            }
        }

        // grid_offset - 1 is the newline ending the line above; the
        // (lines + 1)-th newline before grid_offset ends the line before the
        // target.
        let head = &bytes[..self.grid_offset.min(bytes.len())];
        self.grid_offset = memchr::memrchr_iter(b'\n', head)
            .nth(lines)
            .map_or(0, |nl| nl + 1);
        self.row_offset = target;
    }

    /// Move the primary cursor `dir` lines down (negative: up), landing as
    /// close to display column `target_col` as the line allows. A tab that
    /// straddles the column is stepped over. Moving down past the last line
    /// puts the cursor at end-of-file; moving up past the first line stops
    /// on the first line. Returns the new cursor offset.
    pub fn move_cursor_vertically(&mut self, text: &TextBuffer, dir: isize, target_col: usize) -> usize {
        let bytes = text.as_bytes();
        let mut start = cursor::line_start(bytes, self.primary_cursor);

        if dir > 0 {
            for _ in 0..dir {
                match memchr::memchr(b'\n', &bytes[start..]) {
                    Some(nl) => start += nl + 1,
                    None => {
                        self.primary_cursor = bytes.len();
                        return self.primary_cursor;
                    }
                }
            }
        } else {
            for _ in 0..dir.unsigned_abs() {
                if start == 0 {
                    break;
                }
                start = cursor::line_start(bytes, start - 1);
            }
        }

        self.primary_cursor = cursor::offset_at_column(bytes, start, target_col, self.spaces_per_tab);
        self.primary_cursor
    }

    /// Scroll so `offset` is visible, and return the line it is on.
    ///
    /// Targets above the grid become the first row; targets below become
    /// the last row. [`JumpFlags::TOP`] always puts the target line first.
    /// [`JumpFlags::AFFECT_COLUMN`] also scrolls horizontally when the
    /// target column is off screen, centring it. Offsets past the end are
    /// clamped.
    pub fn jump_to_offset(&mut self, text: &TextBuffer, offset: usize, flags: JumpFlags) -> usize {
        let bytes = text.as_bytes();
        let offset = text.clamp(offset);
        if self.rows == 0 {
            return self.row_offset;
        }

        let line = if offset < self.grid_offset {
            let above = memchr::memchr_iter(b'\n', &bytes[offset..self.grid_offset]).count();
            self.row_offset = self.row_offset.saturating_sub(above);
            self.grid_offset = cursor::line_start(bytes, offset);
            self.row_offset
        } else {
            let mut starts = VecDeque::with_capacity(self.rows);
            starts.push_back(self.grid_offset);
            let mut lines_down = 0;
            for nl in memchr::memchr_iter(b'\n', &bytes[self.grid_offset..offset]) {
                lines_down += 1;
                if starts.len() == self.rows {
                    starts.pop_front();
                }
                starts.push_back(self.grid_offset + nl + 1);
            }

            let line = self.row_offset + lines_down;
            if flags.contains(JumpFlags::TOP) {
                self.row_offset = line;
                self.grid_offset = starts.back().copied().unwrap_or(self.grid_offset);
            } else if lines_down >= self.rows {
                self.row_offset += lines_down - self.rows + 1;
                self.grid_offset = starts.front().copied().unwrap_or(self.grid_offset);
            }
            line
        };

        if flags.contains(JumpFlags::AFFECT_COLUMN) {
            let col = cursor::display_column(bytes, offset, self.spaces_per_tab);
            let text_cols = self.text_cols();
            if col < self.col_offset || col >= self.col_offset + text_cols {
                self.col_offset = col.saturating_sub(text_cols / 2);
            }
        }

        tracing::debug!(
            offset,
            line,
            row_offset = self.row_offset,
            col_offset = self.col_offset,
            grid_offset = self.grid_offset,
            "jumped"
        );
        line
    }

    /// Whether `offset` lies in the visible rows and columns.
    pub fn is_offset_visible(&self, text: &TextBuffer, offset: usize) -> bool {
        let bytes = text.as_bytes();
        if offset < self.grid_offset || offset > bytes.len() {
            return false;
        }

        let mut line_start = self.grid_offset;
        let mut row = 0;
        for nl in memchr::memchr_iter(b'\n', &bytes[self.grid_offset..offset]) {
            row += 1;
            if row >= self.rows {
                return false;
            }
            line_start = self.grid_offset + nl + 1;
        }
        if row >= self.rows {
            return false;
        }

        let col = bytes[line_start..offset]
            .iter()
            .fold(0, |col, &b| cursor::advance_column(b, col, self.spaces_per_tab));
        col >= self.col_offset && col < self.col_offset + self.text_cols()
    }
}
