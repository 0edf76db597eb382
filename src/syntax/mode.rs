//! Modes: byte classes with display attributes.

use crate::buffer::{GlyphVariant, Modifiers};

/// Index of a mode in the mode table.
pub type ModeId = usize;

/// The mode every render pass starts in unless told otherwise.
pub const DEFAULT_MODE: ModeId = 0;

/// Most modes a configuration may define.
pub const MAX_MODES: usize = 32;

/// Most byte ranges a single mode may accept.
pub const MAX_MODE_RANGES: usize = 8;

/// Inclusive range of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// Lowest accepted byte.
    pub min: u8,
    /// Highest accepted byte.
    pub max: u8,
}

impl ByteRange {
    /// Create a range; the bounds are swapped if given in reverse.
    pub const fn new(min: u8, max: u8) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A range holding one byte.
    pub const fn single(byte: u8) -> Self {
        Self::new(byte, byte)
    }

    /// Whether `byte` lies inside the range.
    #[inline]
    pub const fn contains(&self, byte: u8) -> bool {
        self.min <= byte && byte <= self.max
    }
}

/// Identifier characters: `0-9`, `A-Z`, `a-z`, `_`.
pub const IDENTIFIER_RANGES: [ByteRange; 4] = [
    ByteRange::new(b'0', b'9'),
    ByteRange::new(b'A', b'Z'),
    ByteRange::new(b'a', b'z'),
    ByteRange::single(b'_'),
];

/// A character class plus the attributes its bytes are drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    /// Bytes that extend a run while this mode is current.
    pub ranges: Vec<ByteRange>,
    /// Palette index of the foreground color.
    pub fore: usize,
    /// Palette index of the background color.
    pub back: usize,
    /// Atlas block the glyphs come from.
    pub variant: GlyphVariant,
    /// Decorations.
    pub modifiers: Modifiers,
}

impl Default for Mode {
    fn default() -> Self {
        Self {
            ranges: IDENTIFIER_RANGES.to_vec(),
            fore: 1,
            back: 0,
            variant: GlyphVariant::Regular,
            modifiers: Modifiers::empty(),
        }
    }
}

impl Mode {
    /// A mode accepting the given ranges, drawn with the default colors.
    ///
    /// Ranges past [`MAX_MODE_RANGES`] are dropped.
    pub fn with_ranges(ranges: impl IntoIterator<Item = ByteRange>) -> Self {
        Self {
            ranges: ranges.into_iter().take(MAX_MODE_RANGES).collect(),
            ..Self::default()
        }
    }

    /// A mode accepting every byte.
    pub fn accept_all() -> Self {
        Self::with_ranges([ByteRange::new(0x00, 0xff)])
    }

    /// Set the palette indices (builder pattern).
    #[must_use]
    pub const fn with_colors(mut self, fore: usize, back: usize) -> Self {
        self.fore = fore;
        self.back = back;
        self
    }

    /// Set the glyph variant (builder pattern).
    #[must_use]
    pub const fn with_variant(mut self, variant: GlyphVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the modifiers (builder pattern).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether `byte` extends a run in this mode.
    #[inline]
    pub fn accepts(&self, byte: u8) -> bool {
        self.ranges.iter().any(|r| r.contains(byte))
    }
}
