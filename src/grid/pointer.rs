//! Pointer state consumed by the render pass.

use bitflags::bitflags;

bitflags! {
    /// Button history for edge detection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonFlags: u8 {
        /// The button is down this frame.
        const HELD = 0b01;
        /// The button was down last frame.
        const WAS_HELD = 0b10;
    }
}

/// Where the pointer is and what the left button is doing.
///
/// Positions are in grid cells, gutter included. Call
/// [`advance`](Self::advance) once per frame after the render pass has seen
/// the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    /// Row under the pointer.
    pub row: usize,
    /// Column under the pointer.
    pub col: usize,
    /// Left button history.
    pub left: ButtonFlags,
    /// Whether shift was down at the last press or drag.
    pub shift: bool,
}

impl PointerState {
    /// Left button went down at `(row, col)`.
    pub fn press(&mut self, row: usize, col: usize, shift: bool) {
        self.row = row;
        self.col = col;
        self.shift = shift;
        self.left.insert(ButtonFlags::HELD);
    }

    /// Pointer moved with the button down.
    pub fn drag(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
        self.left.insert(ButtonFlags::HELD);
    }

    /// Pointer moved with the button up.
    pub fn hover(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
    }

    /// Left button went up.
    pub fn release(&mut self) {
        self.left.remove(ButtonFlags::HELD);
    }

    /// Roll this frame's button state into history.
    pub fn advance(&mut self) {
        let held = self.left.contains(ButtonFlags::HELD);
        self.left.set(ButtonFlags::WAS_HELD, held);
    }

    /// Whether the button is down.
    #[inline]
    pub const fn held(&self) -> bool {
        self.left.contains(ButtonFlags::HELD)
    }

    /// Whether the button went down since the last [`advance`](Self::advance).
    #[inline]
    pub const fn just_pressed(&self) -> bool {
        self.left.contains(ButtonFlags::HELD) && !self.left.contains(ButtonFlags::WAS_HELD)
    }
}
