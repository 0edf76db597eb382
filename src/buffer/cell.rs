//! Cell: The atomic unit handed to the renderer.
//!
//! # Memory Layout
//!
//! The `Cell` struct is laid out for direct upload into a vertex/storage buffer:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Cell Layout (12 bytes)                                  │
//! ├─────────────┬───────────┬───────────┬───────┬────────────┤
//! │  glyph      │    fg     │    bg     │  mod  │  padding   │
//! │  u32        │  [u8; 3]  │  [u8; 3]  │  u8   │  u8        │
//! │  4 bytes    │  3 bytes  │  3 bytes  │  1b   │  1b        │
//! └─────────────┴───────────┴───────────┴───────┴────────────┘
//! ```
//!
//! `glyph` indexes a glyph atlas made of [`GLYPH_VARIANT_BLOCK`]-sized blocks,
//! one per [`GlyphVariant`]. Within a block, index `n` is the printable ASCII
//! byte `n + 0x20`; the last slot holds the "unprintable" glyph.

use bitflags::bitflags;

/// Number of atlas slots reserved for each glyph variant.
pub const GLYPH_VARIANT_BLOCK: u32 = 0x60;

/// First byte that maps to an atlas slot.
pub const FIRST_PRINTABLE: u8 = 0x20;

/// Last printable ASCII byte.
pub const LAST_PRINTABLE: u8 = 0x7e;

/// Byte substituted for anything outside `0x20..=0x7e`.
pub const UNPRINTABLE: u8 = 0x7f;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Default foreground.
    pub const DEFAULT_FG: Self = Self::new(0xf0, 0xf0, 0xf0);
    /// Default (idle) background.
    pub const DEFAULT_BG: Self = Self::new(0x08, 0x08, 0x08);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Parse `rrggbb`, with or without a leading `#`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_u32)
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Line decorations drawn over a glyph.
    ///
    /// A mode sets at most one of these, but the renderer treats them as
    /// independent bits.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Strikethrough text
        const STRIKETHROUGH = 0b0000_0001;
        /// Underlined text
        const UNDERLINE = 0b0000_0010;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Which pre-rendered atlas block a glyph comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum GlyphVariant {
    /// Upright, normal weight.
    #[default]
    Regular = 0,
    /// Bold weight.
    Bold = 1,
    /// Italic.
    Italic = 2,
    /// Bold italic.
    BoldItalic = 3,
}

impl GlyphVariant {
    /// Offset of this variant's block in the glyph atlas.
    #[inline]
    pub const fn offset(self) -> u32 {
        self as u32 * GLYPH_VARIANT_BLOCK
    }

    /// Recover the variant from a block number, if it is one.
    pub const fn from_block(block: u32) -> Option<Self> {
        match block {
            0 => Some(Self::Regular),
            1 => Some(Self::Bold),
            2 => Some(Self::Italic),
            3 => Some(Self::BoldItalic),
            _ => None,
        }
    }

    /// Whether glyphs of this variant are drawn bold.
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    /// Whether glyphs of this variant are drawn italic.
    pub const fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// Map a byte to its atlas index within the given variant block.
///
/// Bytes outside printable ASCII use the [`UNPRINTABLE`] slot.
#[inline]
pub const fn glyph_index(byte: u8, variant: GlyphVariant) -> u32 {
    let byte = if byte < FIRST_PRINTABLE || byte > LAST_PRINTABLE {
        UNPRINTABLE
    } else {
        byte
    };
    (byte - FIRST_PRINTABLE) as u32 + variant.offset()
}

/// A single grid cell.
///
/// Cells are recomputed wholesale on every render pass; nothing here tracks
/// damage or history.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Glyph atlas index.
    glyph: u32,
    /// Foreground color.
    fg: Rgb,
    /// Background color.
    bg: Rgb,
    /// Underline/strikethrough.
    modifiers: Modifiers,
    /// Padding to keep the struct 4-byte aligned without implicit holes.
    _padding: u8,
}

const _: () = assert!(
    std::mem::size_of::<Cell>() == 12,
    "Cell must stay 12 bytes for upload"
);

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A blank cell (space glyph) on the default background.
    pub const EMPTY: Self = Self::blank(Rgb::DEFAULT_BG);

    /// A blank cell on the given background.
    #[inline]
    pub const fn blank(bg: Rgb) -> Self {
        Self {
            glyph: 0,
            fg: Rgb::DEFAULT_FG,
            bg,
            modifiers: Modifiers::empty(),
            _padding: 0,
        }
    }

    /// Create a cell from raw parts.
    #[inline]
    pub const fn new(glyph: u32, fg: Rgb, bg: Rgb, modifiers: Modifiers) -> Self {
        Self {
            glyph,
            fg,
            bg,
            modifiers,
            _padding: 0,
        }
    }

    /// Create a regular-weight cell showing an ASCII byte.
    #[inline]
    pub const fn from_byte(byte: u8) -> Self {
        Self::new(
            glyph_index(byte, GlyphVariant::Regular),
            Rgb::DEFAULT_FG,
            Rgb::DEFAULT_BG,
            Modifiers::empty(),
        )
    }

    /// Glyph atlas index.
    #[inline]
    pub const fn glyph(&self) -> u32 {
        self.glyph
    }

    /// The atlas block the glyph belongs to.
    #[inline]
    pub const fn variant(&self) -> Option<GlyphVariant> {
        GlyphVariant::from_block(self.glyph / GLYPH_VARIANT_BLOCK)
    }

    /// The ASCII byte this cell displays (`0x7f` for the unprintable glyph).
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn ascii(&self) -> u8 {
        (self.glyph % GLYPH_VARIANT_BLOCK) as u8 + FIRST_PRINTABLE
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Get the modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Set the background color.
    #[inline]
    pub const fn set_bg(&mut self, bg: Rgb) -> &mut Self {
        self.bg = bg;
        self
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this cell shows nothing but its background.
    #[inline]
    pub const fn is_blank(&self) -> bool {
        self.glyph % GLYPH_VARIANT_BLOCK == 0
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("glyph", &self.glyph)
            .field("ascii", &char::from(self.ascii()))
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        assert_eq!(std::mem::size_of::<Cell>(), 12);
    }

    #[test]
    fn test_rgb_from_hex() {
        let rgb: Rgb = 0xFF8000.into();
        assert_eq!(rgb, Rgb::new(255, 128, 0));
    }

    #[test]
    fn test_rgb_parse_hex() {
        assert_eq!(Rgb::parse_hex("#264f78"), Some(Rgb::new(0x26, 0x4f, 0x78)));
        assert_eq!(Rgb::parse_hex("ff0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::parse_hex("fff"), None);
        assert_eq!(Rgb::parse_hex("zzzzzz"), None);
    }

    #[test]
    fn test_glyph_index_printable() {
        assert_eq!(glyph_index(b' ', GlyphVariant::Regular), 0);
        assert_eq!(glyph_index(b'a', GlyphVariant::Regular), u32::from(b'a' - 0x20));
        assert_eq!(
            glyph_index(b'a', GlyphVariant::Bold),
            u32::from(b'a' - 0x20) + GLYPH_VARIANT_BLOCK
        );
    }

    #[test]
    fn test_glyph_index_unprintable() {
        let slot = u32::from(UNPRINTABLE - FIRST_PRINTABLE);
        assert_eq!(glyph_index(0x00, GlyphVariant::Regular), slot);
        assert_eq!(glyph_index(b'\t', GlyphVariant::Regular), slot);
        assert_eq!(glyph_index(0xff, GlyphVariant::Italic), slot + 2 * GLYPH_VARIANT_BLOCK);
    }

    #[test]
    fn test_cell_ascii_roundtrip_through_variant() {
        let cell = Cell::new(glyph_index(b'Q', GlyphVariant::BoldItalic), Rgb::WHITE, Rgb::BLACK, Modifiers::empty());
        assert_eq!(cell.ascii(), b'Q');
        assert_eq!(cell.variant(), Some(GlyphVariant::BoldItalic));
    }

    #[test]
    fn test_cell_blank() {
        let cell = Cell::blank(Rgb::new(1, 2, 3));
        assert!(cell.is_blank());
        assert_eq!(cell.bg(), Rgb::new(1, 2, 3));
        assert!(!Cell::from_byte(b'x').is_blank());
    }

    #[test]
    fn test_cell_builder_pattern() {
        let cell = Cell::from_byte(b'X')
            .with_fg(Rgb::new(255, 0, 0))
            .with_bg(Rgb::new(0, 0, 255))
            .with_modifiers(Modifiers::UNDERLINE);

        assert_eq!(cell.fg(), Rgb::new(255, 0, 0));
        assert_eq!(cell.bg(), Rgb::new(0, 0, 255));
        assert!(cell.modifiers().contains(Modifiers::UNDERLINE));
        assert!(!cell.modifiers().contains(Modifiers::STRIKETHROUGH));
    }

    #[test]
    fn test_variant_flags() {
        assert!(GlyphVariant::BoldItalic.is_bold());
        assert!(GlyphVariant::BoldItalic.is_italic());
        assert!(!GlyphVariant::Regular.is_bold());
        assert_eq!(GlyphVariant::from_block(4), None);
    }
}
