//! `EditorContext`: one buffer, one highlighter, one grid.
//!
//! Everything a render pass or an input event touches is owned here and
//! passed down by reference; there is no process-wide state.
//!
//! ```text
//!   InputEvent ──▶ handle_input ──▶ Grid (scroll / cursor / pointer)
//!                                     │
//!   Frame ◀────── render ◀────────────┘  TextBuffer + Highlighter
//! ```

use crate::actor::{InputEvent, KeyCode, KeyModifiers, PointerAction, PointerEvent};
use crate::buffer::Frame;
use crate::error::Result;
use crate::grid::{GlyphMetrics, Grid, GridConfig, JumpFlags, PointerState};
use crate::syntax::{Highlighter, SyntaxTables};
use crate::text::TextBuffer;
use std::path::Path;

/// Lines scrolled per wheel notch.
pub const WHEEL_LINES: isize = 3;

/// A single view: the text, how to color it, and where it is scrolled.
#[derive(Debug)]
pub struct EditorContext {
    text: TextBuffer,
    highlighter: Highlighter,
    grid: Grid,
    pointer: PointerState,
    /// Which font the renderer should draw with.
    font_render_idx: usize,
}

impl EditorContext {
    /// Create a view over an already loaded buffer, with default highlighting.
    pub fn new(text: TextBuffer, config: GridConfig) -> Self {
        Self {
            text,
            highlighter: Highlighter::default(),
            grid: Grid::with_config(0, 0, config),
            pointer: PointerState::default(),
            font_render_idx: 0,
        }
    }

    /// Open `path` read-only.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] when the file cannot be opened or mapped.
    pub fn open(path: impl AsRef<Path>, config: GridConfig) -> Result<Self> {
        Ok(Self::new(TextBuffer::open(path)?, config))
    }

    /// View an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, config: GridConfig) -> Self {
        Self::new(TextBuffer::from_bytes(bytes), config)
    }

    /// Use `tables` for highlighting (builder pattern).
    #[must_use]
    pub fn with_tables(mut self, tables: SyntaxTables) -> Self {
        self.highlighter.set_tables(tables);
        self
    }

    /// The viewed buffer.
    #[inline]
    pub const fn text(&self) -> &TextBuffer {
        &self.text
    }

    /// The highlighter.
    #[inline]
    pub const fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Replace the highlighting tables.
    pub fn set_tables(&mut self, tables: SyntaxTables) {
        self.highlighter.set_tables(tables);
    }

    /// Viewport state.
    #[inline]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable viewport state, for callers driving the grid directly.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Pointer state the next render will consume.
    #[inline]
    pub const fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Font selector handed to the renderer.
    #[inline]
    pub const fn font_render_idx(&self) -> usize {
        self.font_render_idx
    }

    /// Pick the font the renderer should use.
    pub fn set_font_render_idx(&mut self, idx: usize) {
        self.font_render_idx = idx;
    }

    /// Resize the grid to `rows` × `cols` cells.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.grid.resize(rows, cols);
    }

    /// Resize the grid to cover a pixel window.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DegenerateGeometry`] for unusable metrics; the
    /// grid is left as it was.
    pub fn resize_to_window(&mut self, metrics: &GlyphMetrics, wnd_w: i32, wnd_h: i32) -> Result<()> {
        let (rows, cols) = metrics.grid_size(wnd_w, wnd_h)?;
        self.resize(rows, cols);
        Ok(())
    }

    /// Render the view into `frame` and consume this frame's pointer state.
    ///
    /// A fresh press without shift collapses the selection onto wherever the
    /// press put the cursor.
    pub fn render(&mut self, frame: &mut Frame) {
        let collapse = self.pointer.just_pressed() && !self.pointer.shift;
        if collapse {
            self.grid.drop_anchor();
        }

        self.grid
            .render_into(&self.text, &mut self.highlighter, frame, &self.pointer);

        if self.pointer.held() {
            self.grid.remember_column(&self.text);
        }
        if collapse {
            self.grid.drop_anchor();
        }
        self.pointer.advance();
    }

    /// Screen position of the caret after the last render.
    #[inline]
    pub const fn caret(&self) -> Option<(usize, usize)> {
        self.grid.rel_caret()
    }

    /// Apply an input event. Returns whether the view needs a redraw.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key { code, modifiers } => self.handle_key(code, modifiers),
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::Wheel { delta } => {
                self.grid
                    .adjust_offsets(&self.text, -WHEEL_LINES * isize::from(delta), 0);
                true
            }
            InputEvent::Resize { cols, rows } => {
                self.resize(usize::from(rows), usize::from(cols));
                true
            }
            InputEvent::Error(_) | InputEvent::Shutdown => false,
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let text = &self.text;
        let grid = &mut self.grid;

        if modifiers.contains(KeyModifiers::CONTROL) {
            let (down, right) = match code {
                KeyCode::Up => (-1, 0),
                KeyCode::Down => (1, 0),
                KeyCode::Left => (0, -1),
                KeyCode::Right => (0, 1),
                _ => return false,
            };
            grid.adjust_offsets(text, down, right);
            return true;
        }

        let page = grid.rows().max(1) as isize;
        match code {
            KeyCode::Up => {
                grid.move_cursor_vertically(text, -1, grid.target_column());
            }
            KeyCode::Down => {
                grid.move_cursor_vertically(text, 1, grid.target_column());
            }
            KeyCode::Left => {
                grid.move_cursor_left(text);
            }
            KeyCode::Right => {
                grid.move_cursor_right(text);
            }
            KeyCode::Home => {
                grid.move_cursor_to_line_start(text);
            }
            KeyCode::End => {
                grid.move_cursor_to_line_end(text);
            }
            KeyCode::PageUp => {
                grid.adjust_offsets(text, -page, 0);
                grid.move_cursor_vertically(text, -page, grid.target_column());
            }
            KeyCode::PageDown => {
                grid.adjust_offsets(text, page, 0);
                grid.move_cursor_vertically(text, page, grid.target_column());
            }
            KeyCode::Char(_) | KeyCode::Enter | KeyCode::Esc => return false,
        }

        if !modifiers.contains(KeyModifiers::SHIFT) {
            grid.drop_anchor();
        }
        grid.jump_to_offset(text, grid.primary_cursor(), JumpFlags::AFFECT_COLUMN);
        true
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let (row, col) = (usize::from(event.row), usize::from(event.col));
        match event.action {
            PointerAction::Press => {
                self.pointer
                    .press(row, col, event.modifiers.contains(KeyModifiers::SHIFT));
            }
            PointerAction::Drag => self.pointer.drag(row, col),
            PointerAction::Release => self.pointer.release(),
            PointerAction::Move => {
                self.pointer.hover(row, col);
                return false;
            }
        }
        true
    }
}
