//! Syntax highlighting: modes, tokens and the lexer that applies them.
//!
//! Tables are built once (usually by [`parse_config`]) and never change. The
//! [`Highlighter`] carries the single piece of lexer state, the current mode,
//! and is advanced by the grid as it walks the buffer.

pub mod config;
pub mod highlighter;
pub mod mode;
pub mod tables;
pub mod token;

pub use config::{parse_config, ConfigAnomaly, LineKind, ParsedConfig};
pub use highlighter::Highlighter;
pub use mode::{ByteRange, Mode, ModeId, DEFAULT_MODE, IDENTIFIER_RANGES, MAX_MODES, MAX_MODE_RANGES};
pub use tables::{Attrs, Palette, SyntaxTables, Transition, PALETTE_SIZE};
pub use token::{ModeRange, Token, TokenId, MAX_TOKEN_MODE_RANGES};
