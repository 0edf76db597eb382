//! Resolved mode/token tables and the display attributes they produce.
//!
//! Mode ids are plain integers everywhere. Token effects are resolved once,
//! when the tables are built, into a flat `(mode, token) -> Transition`
//! table; references to modes that do not exist degrade to "no change" there
//! so the lexer never has to bounds-check a configuration value.

use super::mode::{Mode, ModeId, DEFAULT_MODE};
use super::token::{Token, TokenId};
use crate::buffer::{glyph_index, Cell, GlyphVariant, Modifiers, Rgb};
use std::collections::HashMap;

/// Number of indexed palette colors.
pub const PALETTE_SIZE: usize = 32;

/// Colors referenced by mode `fore`/`back` indices, plus the UI colors the
/// grid needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
    /// Background of selected cells.
    pub selection: Rgb,
    /// Foreground of line numbers.
    pub gutter: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = [Rgb::DEFAULT_FG; PALETTE_SIZE];
        colors[0] = Rgb::DEFAULT_BG;
        Self {
            colors,
            selection: Rgb::from_u32(0x26_4f_78),
            gutter: Rgb::from_u32(0x6e_76_81),
        }
    }
}

impl Palette {
    /// Color at `index`, if the index exists.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Replace the color at `index`. Returns `false` for an invalid index.
    pub fn set(&mut self, index: usize, color: Rgb) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    /// The idle background (index 0).
    #[inline]
    pub const fn background(&self) -> Rgb {
        self.colors[0]
    }

    /// The default foreground (index 1).
    #[inline]
    pub const fn foreground(&self) -> Rgb {
        self.colors[1]
    }
}

/// Resolved display attributes of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attrs {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Glyph atlas block.
    pub variant: GlyphVariant,
    /// Decorations.
    pub modifiers: Modifiers,
}

impl Attrs {
    /// Atlas offset of the variant block.
    #[inline]
    pub const fn glyph_offset(&self) -> u32 {
        self.variant.offset()
    }

    /// The cell showing `byte` with these attributes.
    #[inline]
    pub const fn cell(&self, byte: u8) -> Cell {
        Cell::new(glyph_index(byte, self.variant), self.fg, self.bg, self.modifiers)
    }
}

/// What a matched token does, already validated against the mode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Mode the matched run is drawn in.
    pub display: ModeId,
    /// Mode current after the run.
    pub next: ModeId,
}

/// Immutable mode and token tables.
#[derive(Debug, Clone)]
pub struct SyntaxTables {
    modes: Vec<Mode>,
    tokens: Vec<Token>,
    palette: Palette,
    /// Token ids grouped by text, each group in configuration order.
    by_text: HashMap<Vec<u8>, Vec<TokenId>>,
    /// `transitions[mode * tokens.len() + token]`; `None` where the token
    /// is not recognized in that mode.
    transitions: Vec<Option<Transition>>,
}

impl Default for SyntaxTables {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Palette::default())
    }
}

impl SyntaxTables {
    /// Build tables. An empty mode list gets a default mode 0.
    pub fn new(mut modes: Vec<Mode>, tokens: Vec<Token>, palette: Palette) -> Self {
        if modes.is_empty() {
            modes.push(Mode::default());
        }

        let mut by_text: HashMap<Vec<u8>, Vec<TokenId>> = HashMap::new();
        for (id, token) in tokens.iter().enumerate() {
            by_text.entry(token.text.clone()).or_default().push(id);
        }

        let valid = |m: Option<ModeId>, token: &Token, what: &str| match m {
            Some(m) if m < modes.len() => Some(m),
            Some(m) => {
                tracing::warn!(
                    token = %String::from_utf8_lossy(&token.text),
                    mode = m,
                    "{what} refers to a mode that does not exist; ignored"
                );
                None
            }
            None => None,
        };
        let effects: Vec<(Option<ModeId>, Option<ModeId>)> = tokens
            .iter()
            .map(|t| (valid(t.mode_of, t, "mode-of"), valid(t.mode_switch, t, "mode-switch")))
            .collect();

        let mut transitions = Vec::with_capacity(modes.len() * tokens.len());
        for mode in 0..modes.len() {
            for (token, &(mode_of, mode_switch)) in tokens.iter().zip(&effects) {
                transitions.push(token.applies_in(mode).then(|| Transition {
                    display: mode_of.unwrap_or(mode),
                    next: mode_switch.unwrap_or(mode),
                }));
            }
        }

        Self {
            modes,
            tokens,
            palette,
            by_text,
            transitions,
        }
    }

    /// All modes; never empty.
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// All tokens, in configuration order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The palette.
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Mode `id`, falling back to mode 0 for unknown ids.
    #[inline]
    pub fn mode(&self, id: ModeId) -> &Mode {
        self.modes.get(id).unwrap_or(&self.modes[DEFAULT_MODE])
    }

    /// `id` if it names a mode, otherwise mode 0.
    #[inline]
    pub fn validate_mode(&self, id: ModeId) -> ModeId {
        if id < self.modes.len() {
            id
        } else {
            DEFAULT_MODE
        }
    }

    /// First token (in configuration order) whose text equals `run` and
    /// which is recognized in `mode`.
    pub fn lookup(&self, mode: ModeId, run: &[u8]) -> Option<(TokenId, Transition)> {
        let candidates = self.by_text.get(run)?;
        let row = mode.checked_mul(self.tokens.len())?;
        candidates
            .iter()
            .find_map(|&id| self.transitions.get(row + id).copied().flatten().map(|t| (id, t)))
    }

    /// Display attributes of a mode. Unknown modes and palette indices
    /// fall back to the defaults.
    pub fn attrs(&self, id: ModeId) -> Attrs {
        let mode = self.mode(id);
        Attrs {
            fg: self.palette.get(mode.fore).unwrap_or(self.palette.foreground()),
            bg: self.palette.get(mode.back).unwrap_or(self.palette.background()),
            variant: mode.variant,
            modifiers: mode.modifiers,
        }
    }

    /// Blank cell on the idle background.
    #[inline]
    pub const fn idle_cell(&self) -> Cell {
        Cell::blank(self.palette.background())
    }
}
