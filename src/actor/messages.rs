//! Events sent from the input thread to the owner of the view.
//!
//! These are a viewer-sized subset of crossterm's event model: the keys
//! that navigate, the pointer actions that place the cursor, the wheel and
//! terminal resizes.

use bitflags::bitflags;

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Esc,
}

bitflags! {
    /// Modifier keys held during a key or pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b001;
        /// Control key held.
        const CONTROL = 0b010;
        /// Alt/Option key held.
        const ALT = 0b100;
    }
}

/// What the left pointer button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Button went down.
    Press,
    /// Pointer moved with the button down.
    Drag,
    /// Button went up.
    Release,
    /// Pointer moved with the button up.
    Move,
}

/// A left-button pointer event, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// What happened.
    pub action: PointerAction,
    /// Row under the pointer.
    pub row: u16,
    /// Column under the pointer.
    pub col: u16,
    /// Modifiers held.
    pub modifiers: KeyModifiers,
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during the keypress.
        modifiers: KeyModifiers,
    },

    /// Left-button pointer activity.
    Pointer(PointerEvent),

    /// Wheel scroll, in notches (positive = towards the top of the file).
    Wheel {
        /// Notches scrolled.
        delta: i16,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        cols: u16,
        /// New height in rows.
        rows: u16,
    },

    /// Reading terminal events failed.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}
