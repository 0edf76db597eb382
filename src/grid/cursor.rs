//! Byte-offset ↔ display-column helpers shared by rendering and navigation.
//!
//! All of these work on raw bytes: one byte is one column, except `\t`,
//! which advances to the next multiple of `spaces_per_tab` and is never
//! zero-width.

/// Column after drawing `byte` at display column `col`.
#[inline]
pub const fn advance_column(byte: u8, col: usize, spaces_per_tab: usize) -> usize {
    if byte == b'\t' {
        col + tab_width(col, spaces_per_tab)
    } else {
        col + 1
    }
}

/// Columns a tab at display column `col` spans.
#[inline]
pub const fn tab_width(col: usize, spaces_per_tab: usize) -> usize {
    let spt = if spaces_per_tab == 0 { 1 } else { spaces_per_tab };
    spt - col % spt
}

/// First byte of the line containing `offset`.
pub fn line_start(bytes: &[u8], offset: usize) -> usize {
    let offset = offset.min(bytes.len());
    memchr::memrchr(b'\n', &bytes[..offset]).map_or(0, |p| p + 1)
}

/// Offset of the `\n` ending the line containing `offset`, or the buffer
/// length for the last line.
pub fn line_end(bytes: &[u8], offset: usize) -> usize {
    let offset = offset.min(bytes.len());
    memchr::memchr(b'\n', &bytes[offset..]).map_or(bytes.len(), |p| offset + p)
}

/// Display column of `offset` within its line.
pub fn display_column(bytes: &[u8], offset: usize, spaces_per_tab: usize) -> usize {
    let offset = offset.min(bytes.len());
    bytes[line_start(bytes, offset)..offset]
        .iter()
        .fold(0, |col, &b| advance_column(b, col, spaces_per_tab))
}

/// Offset reached by walking from `start` until display column `target`,
/// stopping early at a newline or end-of-buffer. A tab straddling `target`
/// is stepped over.
pub fn offset_at_column(bytes: &[u8], start: usize, target: usize, spaces_per_tab: usize) -> usize {
    let mut offset = start.min(bytes.len());
    let mut col = 0;
    while col < target && offset < bytes.len() && bytes[offset] != b'\n' {
        col = advance_column(bytes[offset], col, spaces_per_tab);
        offset += 1;
    }
    offset
}

/// Decimal digits needed to print `n`.
pub(crate) const fn decimal_digits(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_stops() {
        assert_eq!(advance_column(b'\t', 0, 4), 4);
        assert_eq!(advance_column(b'\t', 5, 4), 8);
        assert_eq!(advance_column(b'\t', 4, 4), 8);
        assert_eq!(advance_column(b'x', 5, 4), 6);
    }

    #[test]
    fn test_zero_tab_size_is_one() {
        assert_eq!(tab_width(7, 0), 1);
    }

    #[test]
    fn test_line_bounds() {
        let text = b"ab\ncd\n\nef";
        assert_eq!(line_start(text, 0), 0);
        assert_eq!(line_start(text, 2), 0);
        assert_eq!(line_start(text, 3), 3);
        assert_eq!(line_start(text, 6), 6);
        assert_eq!(line_start(text, 9), 7);
        assert_eq!(line_end(text, 0), 2);
        assert_eq!(line_end(text, 6), 6);
        assert_eq!(line_end(text, 8), 9);
        assert_eq!(line_end(text, 100), 9);
    }

    #[test]
    fn test_display_column_counts_tabs() {
        let text = b"x\ta\tb";
        assert_eq!(display_column(text, 0, 4), 0);
        assert_eq!(display_column(text, 2, 4), 4);
        assert_eq!(display_column(text, 4, 4), 8);
        assert_eq!(display_column(text, 5, 4), 9);
    }

    #[test]
    fn test_offset_at_column() {
        let text = b"\tabc\nxy";
        assert_eq!(offset_at_column(text, 0, 0, 4), 0);
        // Column 2 is inside the tab: step over it.
        assert_eq!(offset_at_column(text, 0, 2, 4), 1);
        assert_eq!(offset_at_column(text, 0, 5, 4), 2);
        // Short line: stop at the newline.
        assert_eq!(offset_at_column(text, 0, 40, 4), 4);
        assert_eq!(offset_at_column(text, 5, 40, 4), 7);
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(1_000_000), 7);
    }
}
