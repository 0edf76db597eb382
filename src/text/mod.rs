//! Text module: the read-only bytes being viewed and the newline index over
//! them.

mod line_index;
mod source;

pub use line_index::{LineIndex, RowStart, DEFAULT_SCAN_BUDGET};
pub use source::TextBuffer;
