//! Buffer module: the cells a render pass produces.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit handed to the renderer, laid out for upload
//! - [`Frame`]: A rows × cols grid of cells filled wholesale each pass
//! - [`Rgb`]: True-color representation
//! - [`Modifiers`]: Underline/strikethrough bitflags
//! - [`GlyphVariant`]: Which glyph atlas block a cell indexes

mod cell;
mod frame;

pub use cell::{
    glyph_index, Cell, GlyphVariant, Modifiers, Rgb, FIRST_PRINTABLE, GLYPH_VARIANT_BLOCK, LAST_PRINTABLE,
    UNPRINTABLE,
};
pub use frame::Frame;
