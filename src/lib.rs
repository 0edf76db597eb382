//! # Gridtext
//!
//! The text-viewing core of an editor: a read-only byte buffer shown
//! through a fixed rows × cols character grid, colored by a small
//! configuration-driven lexer.
//!
//! ## Core Concepts
//!
//! - **Bounded work per frame**: rendering walks only the visible lines;
//!   scrolling and jumping walk only the distance moved
//! - **Line index**: a lazily filled newline index maps rows to byte offsets
//! - **Modes and tokens**: maximal-munch runs over mode-accepted bytes, with
//!   exact-match tokens recoloring a run and switching the mode after it
//! - **Explicit context**: one [`EditorContext`] owns the buffer, the
//!   highlighter and the grid; nothing is global
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridtext::{EditorContext, Frame, GridConfig};
//!
//! let mut view = EditorContext::from_bytes("fn main() {\n\tprintln!();\n}\n", GridConfig::default());
//! view.resize(24, 80);
//!
//! let mut frame = Frame::new(24, 80);
//! view.render(&mut frame);
//! assert_eq!(frame.row_text(0).trim_end(), "fn main() {");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod context;
pub mod error;
pub mod grid;
pub mod syntax;
pub mod terminal;
pub mod text;

// Re-exports for convenience
pub use actor::{InputActor, InputEvent, KeyCode, KeyModifiers, PointerAction, PointerEvent};
pub use buffer::{Cell, Frame, GlyphVariant, Modifiers, Rgb};
pub use context::EditorContext;
pub use error::{Error, Result};
pub use grid::{GlyphMetrics, Grid, GridConfig, JumpFlags, PointerState};
pub use syntax::{parse_config, ConfigAnomaly, Highlighter, Mode, ParsedConfig, SyntaxTables, Token};
pub use terminal::OutputBuffer;
pub use text::{LineIndex, TextBuffer};
