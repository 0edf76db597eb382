//! Syntax configuration: text → [`SyntaxTables`].
//!
//! # Format
//!
//! One declaration per line, words separated by whitespace:
//!
//! ```text
//! # identifiers, keywords and line comments
//! mode 0 fore=1 back=0
//! mode 1 fore=2 style=bold
//! mode 2 min=\  max=~ fore=3 style=italic
//! mode 3 min=0 max=9 fore=4 modifier=underline
//!
//! token if mode-of=1
//! token # mode-of=2 mode-switch=2 prev-mode-min=0 prev-mode-max=0
//! token \n mode-switch=0 prev-mode-min=2 prev-mode-max=2
//!
//! color 2 569cd6
//! color selection #264f78
//! ```
//!
//! `min=` and `max=` are byte strings paired position by position into
//! accepted ranges (`min=0Aa_ max=9Zz_` is the default). `prev-mode-min=` and
//! `prev-mode-max=` are comma lists paired the same way; `-1` or a missing
//! max means "no upper bound". Backslash escapes work in every word:
//! `\n`, `\t`, `\ ` and `\\`.
//!
//! Parsing never fails. Anything it cannot use is skipped and reported as a
//! [`ConfigAnomaly`] next to the tables built from the rest.

use super::mode::{ByteRange, Mode, ModeId, IDENTIFIER_RANGES, MAX_MODES, MAX_MODE_RANGES};
use super::tables::{Palette, SyntaxTables};
use super::token::{ModeRange, Token, MAX_TOKEN_MODE_RANGES};
use crate::buffer::{GlyphVariant, Modifiers, Rgb};
use crate::error::{Error, Result};
use std::path::Path;

/// Something in the configuration that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigAnomaly {
    /// The first word is not a known declaration.
    #[error("line {line}: unknown declaration `{word}`")]
    UnknownLineKind {
        /// 1-based line number.
        line: usize,
        /// The offending word.
        word: String,
    },
    /// A declaration is missing its required argument.
    #[error("line {line}: `{kind}` needs {what}")]
    Missing {
        /// 1-based line number.
        line: usize,
        /// Declaration kind.
        kind: &'static str,
        /// What was expected.
        what: &'static str,
    },
    /// A `key=value` field whose key is not known for this declaration.
    #[error("line {line}: unknown key `{key}`")]
    UnknownKey {
        /// 1-based line number.
        line: usize,
        /// The key.
        key: String,
    },
    /// A value that cannot be parsed.
    #[error("line {line}: malformed value `{value}` for `{key}`")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The key the value belongs to.
        key: String,
        /// The value.
        value: String,
    },
    /// A mode id at or past [`MAX_MODES`].
    #[error("line {line}: mode {id} is out of range (max {max})", max = MAX_MODES - 1)]
    ModeOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The id.
        id: usize,
    },
    /// More ranges than a mode or token can hold; the extra ones are dropped.
    #[error("line {line}: {given} ranges given, only {kept} kept")]
    TooManyRanges {
        /// 1-based line number.
        line: usize,
        /// Ranges in the configuration.
        given: usize,
        /// Ranges kept.
        kept: usize,
    },
    /// A token refers to a mode no line defines; the effect is ignored.
    #[error("line {line}: `{key}` refers to undefined mode {id}")]
    DanglingModeRef {
        /// 1-based line number.
        line: usize,
        /// `mode-of` or `mode-switch`.
        key: &'static str,
        /// The mode id.
        id: ModeId,
    },
}

/// Tables built from a configuration plus everything that was skipped.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// The usable tables.
    pub tables: SyntaxTables,
    /// Skipped lines and fields, in file order.
    pub anomalies: Vec<ConfigAnomaly>,
}

/// What a line declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `mode <id> ...`
    Mode,
    /// `token <literal> ...`
    Token,
    /// `color <slot> <rrggbb>`
    Color,
    /// `# ...`
    Comment,
    /// Nothing but whitespace.
    Blank,
}

impl LineKind {
    fn classify(first: Option<&Word>) -> std::result::Result<Self, String> {
        let Some(word) = first else {
            return Ok(Self::Blank);
        };
        if !word.escaped && word.text.starts_with(b"#") {
            return Ok(Self::Comment);
        }
        match word.text.as_slice() {
            b"mode" => Ok(Self::Mode),
            b"token" => Ok(Self::Token),
            b"color" => Ok(Self::Color),
            other => Err(String::from_utf8_lossy(other).into_owned()),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Token => "token",
            Self::Color => "color",
            Self::Comment => "comment",
            Self::Blank => "blank",
        }
    }
}

/// A whitespace-delimited word with escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Word {
    text: Vec<u8>,
    /// Whether the first byte came from an escape.
    escaped: bool,
}

impl Word {
    /// Split `key=value`. The `=` must be literal.
    fn field(&self) -> Option<(&[u8], &[u8])> {
        let eq = self.text.iter().position(|&b| b == b'=')?;
        Some((&self.text[..eq], &self.text[eq + 1..]))
    }
}

/// Split a line into words, resolving backslash escapes.
///
/// `\n` and `\t` become newline and tab, any other escaped byte stands for
/// itself (so `\ ` embeds a space). A trailing lone backslash is kept.
fn tokenize(line: &[u8]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;
    let mut bytes = line.iter().copied();

    while let Some(b) = bytes.next() {
        let (byte, escaped) = match b {
            b' ' | b'\t' | b'\r' => {
                words.extend(current.take());
                continue;
            }
            b'\\' => match bytes.next() {
                Some(b'n') => (b'\n', true),
                Some(b't') => (b'\t', true),
                Some(other) => (other, true),
                None => (b'\\', false),
            },
            other => (other, false),
        };
        current
            .get_or_insert_with(|| Word {
                text: Vec::new(),
                escaped,
            })
            .text
            .push(byte);
    }
    words.extend(current);
    words
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse_number(value: &[u8]) -> Option<usize> {
    std::str::from_utf8(value).ok()?.parse().ok()
}

/// Accumulates tables line by line.
struct Parser {
    modes: Vec<Option<Mode>>,
    tokens: Vec<(usize, Token)>,
    palette: Palette,
    anomalies: Vec<ConfigAnomaly>,
}

impl Parser {
    fn new() -> Self {
        Self {
            modes: Vec::new(),
            tokens: Vec::new(),
            palette: Palette::default(),
            anomalies: Vec::new(),
        }
    }

    fn line(&mut self, line: usize, raw: &[u8]) {
        let words = tokenize(raw);
        let kind = match LineKind::classify(words.first()) {
            Ok(kind) => kind,
            Err(word) => {
                self.anomalies.push(ConfigAnomaly::UnknownLineKind { line, word });
                return;
            }
        };

        match kind {
            LineKind::Comment | LineKind::Blank => {}
            LineKind::Mode => self.mode(line, &words[1..]),
            LineKind::Token => self.token(line, &words[1..]),
            LineKind::Color => self.color(line, &words[1..]),
        }
    }

    fn missing(&mut self, line: usize, kind: LineKind, what: &'static str) {
        self.anomalies.push(ConfigAnomaly::Missing {
            line,
            kind: kind.name(),
            what,
        });
    }

    fn malformed(&mut self, line: usize, key: &[u8], value: &[u8]) {
        self.anomalies.push(ConfigAnomaly::Malformed {
            line,
            key: lossy(key),
            value: lossy(value),
        });
    }

    fn mode(&mut self, line: usize, args: &[Word]) {
        let Some((id_word, fields)) = args.split_first() else {
            self.missing(line, LineKind::Mode, "an id");
            return;
        };
        let Some(id) = parse_number(&id_word.text) else {
            self.malformed(line, b"mode", &id_word.text);
            return;
        };
        if id >= MAX_MODES {
            self.anomalies.push(ConfigAnomaly::ModeOutOfRange { line, id });
            return;
        }

        let mut mode = Mode::default();
        let mut min: Option<&[u8]> = None;
        let mut max: Option<&[u8]> = None;

        for word in fields {
            let Some((key, value)) = word.field() else {
                self.anomalies.push(ConfigAnomaly::UnknownKey {
                    line,
                    key: lossy(&word.text),
                });
                continue;
            };
            match key {
                b"min" => min = Some(value),
                b"max" => max = Some(value),
                b"fore" | b"back" => match parse_number(value) {
                    Some(idx) if key == b"fore" => mode.fore = idx,
                    Some(idx) => mode.back = idx,
                    None => self.malformed(line, key, value),
                },
                b"style" => match value {
                    b"regular" => mode.variant = GlyphVariant::Regular,
                    b"bold" => mode.variant = GlyphVariant::Bold,
                    b"italic" => mode.variant = GlyphVariant::Italic,
                    b"bold-italic" => mode.variant = GlyphVariant::BoldItalic,
                    _ => self.malformed(line, key, value),
                },
                b"modifier" => match value {
                    b"normal" => mode.modifiers = Modifiers::empty(),
                    b"underline" => mode.modifiers = Modifiers::UNDERLINE,
                    b"strikethrough" => mode.modifiers = Modifiers::STRIKETHROUGH,
                    _ => self.malformed(line, key, value),
                },
                _ => self.anomalies.push(ConfigAnomaly::UnknownKey {
                    line,
                    key: lossy(key),
                }),
            }
        }

        if min.is_some() || max.is_some() {
            mode.ranges = self.byte_ranges(line, min.unwrap_or_default(), max.unwrap_or_default());
        } else {
            mode.ranges = IDENTIFIER_RANGES.to_vec();
        }

        if self.modes.len() <= id {
            self.modes.resize(id + 1, None);
        }
        self.modes[id] = Some(mode);
    }

    /// Pair `min` and `max` byte-wise. A position present on one side only
    /// is a single-byte range.
    fn byte_ranges(&mut self, line: usize, min: &[u8], max: &[u8]) -> Vec<ByteRange> {
        let given = min.len().max(max.len());
        if given > MAX_MODE_RANGES {
            self.anomalies.push(ConfigAnomaly::TooManyRanges {
                line,
                given,
                kept: MAX_MODE_RANGES,
            });
        }
        (0..given.min(MAX_MODE_RANGES))
            .filter_map(|i| match (min.get(i), max.get(i)) {
                (Some(&lo), Some(&hi)) => Some(ByteRange::new(lo, hi)),
                (Some(&b), None) | (None, Some(&b)) => Some(ByteRange::single(b)),
                (None, None) => None,
            })
            .collect()
    }

    fn token(&mut self, line: usize, args: &[Word]) {
        let Some((literal, fields)) = args.split_first() else {
            self.missing(line, LineKind::Token, "a literal");
            return;
        };

        let mut token = Token::new(literal.text.clone());
        let mut mins: Vec<Option<i64>> = Vec::new();
        let mut maxs: Vec<Option<i64>> = Vec::new();

        for word in fields {
            let Some((key, value)) = word.field() else {
                self.anomalies.push(ConfigAnomaly::UnknownKey {
                    line,
                    key: lossy(&word.text),
                });
                continue;
            };
            match key {
                b"mode-of" | b"mode-switch" => match parse_number(value) {
                    Some(id) if key == b"mode-of" => token.mode_of = Some(id),
                    Some(id) => token.mode_switch = Some(id),
                    None => self.malformed(line, key, value),
                },
                b"prev-mode-min" => mins = parse_list(value),
                b"prev-mode-max" => maxs = parse_list(value),
                _ => self.anomalies.push(ConfigAnomaly::UnknownKey {
                    line,
                    key: lossy(key),
                }),
            }
        }

        token.required = self.mode_ranges(line, &mins, &maxs);
        self.tokens.push((line, token));
    }

    /// Pair `prev-mode-min`/`prev-mode-max` entries. A missing min is 0, a
    /// missing or negative max is unbounded, and a pair with a malformed
    /// entry is dropped.
    fn mode_ranges(&mut self, line: usize, mins: &[Option<i64>], maxs: &[Option<i64>]) -> Vec<ModeRange> {
        let given = mins.len().max(maxs.len());
        if given > MAX_TOKEN_MODE_RANGES {
            self.anomalies.push(ConfigAnomaly::TooManyRanges {
                line,
                given,
                kept: MAX_TOKEN_MODE_RANGES,
            });
        }

        let mut ranges = Vec::new();
        for i in 0..given.min(MAX_TOKEN_MODE_RANGES) {
            let lo = match mins.get(i) {
                None => Some(0),
                Some(&Some(v)) if v >= 0 => usize::try_from(v).ok(),
                Some(_) => None,
            };
            let hi = match maxs.get(i) {
                None | Some(&Some(-1)) => Some(ModeId::MAX),
                Some(&Some(v)) if v >= 0 => usize::try_from(v).ok(),
                Some(_) => None,
            };
            match (lo, hi) {
                (Some(lo), Some(hi)) => ranges.push(ModeRange::new(lo, hi)),
                _ => self.anomalies.push(ConfigAnomaly::Malformed {
                    line,
                    key: "prev-mode".to_owned(),
                    value: format!("#{i}"),
                }),
            }
        }
        ranges
    }

    fn color(&mut self, line: usize, args: &[Word]) {
        let [slot, value, ..] = args else {
            self.missing(line, LineKind::Color, "a slot and a value");
            return;
        };
        let Some(rgb) = std::str::from_utf8(&value.text).ok().and_then(Rgb::parse_hex) else {
            self.malformed(line, &slot.text, &value.text);
            return;
        };
        match slot.text.as_slice() {
            b"selection" => self.palette.selection = rgb,
            b"gutter" => self.palette.gutter = rgb,
            other => {
                let stored = parse_number(other).is_some_and(|idx| self.palette.set(idx, rgb));
                if !stored {
                    self.malformed(line, b"color", other);
                }
            }
        }
    }

    fn finish(mut self) -> ParsedConfig {
        let modes: Vec<Mode> = if self.modes.is_empty() {
            vec![Mode::default()]
        } else {
            self.modes.into_iter().map(Option::unwrap_or_default).collect()
        };

        for (line, token) in &self.tokens {
            for (key, id) in [("mode-of", token.mode_of), ("mode-switch", token.mode_switch)] {
                if let Some(id) = id.filter(|&id| id >= modes.len()) {
                    self.anomalies.push(ConfigAnomaly::DanglingModeRef { line: *line, key, id });
                }
            }
        }

        for anomaly in &self.anomalies {
            tracing::warn!(%anomaly, "syntax config");
        }

        let tokens = self.tokens.into_iter().map(|(_, t)| t).collect();
        ParsedConfig {
            tables: SyntaxTables::new(modes, tokens, self.palette),
            anomalies: self.anomalies,
        }
    }
}

/// `a,b,c` → entries; an entry that is not an integer is `None`.
fn parse_list(value: &[u8]) -> Vec<Option<i64>> {
    value
        .split(|&b| b == b',')
        .map(|entry| std::str::from_utf8(entry).ok()?.trim().parse().ok())
        .collect()
}

/// Parse configuration text. Never fails; see [`ParsedConfig::anomalies`].
pub fn parse_config(text: &str) -> ParsedConfig {
    let mut parser = Parser::new();
    for (idx, raw) in text.as_bytes().split(|&b| b == b'\n').enumerate() {
        parser.line(idx + 1, raw);
    }
    let parsed = parser.finish();
    tracing::debug!(
        modes = parsed.tables.modes().len(),
        tokens = parsed.tables.tokens().len(),
        anomalies = parsed.anomalies.len(),
        "syntax config parsed"
    );
    parsed
}

impl SyntaxTables {
    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read. Problems inside the
    /// file are reported in [`ParsedConfig::anomalies`] instead.
    pub fn load(path: impl AsRef<Path>) -> Result<ParsedConfig> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Ok(parse_config(&String::from_utf8_lossy(&bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Highlighter;
    use std::io::Write;

    fn words(line: &str) -> Vec<Vec<u8>> {
        tokenize(line.as_bytes()).into_iter().map(|w| w.text).collect()
    }

    #[test]
    fn test_tokenize_splits_on_whitespace() {
        assert_eq!(words("  mode 1\tfore=2 "), vec![b"mode".to_vec(), b"1".to_vec(), b"fore=2".to_vec()]);
        assert!(words("   ").is_empty());
    }

    #[test]
    fn test_tokenize_escapes() {
        assert_eq!(words(r"token \n"), vec![b"token".to_vec(), b"\n".to_vec()]);
        assert_eq!(words(r"a\ b"), vec![b"a b".to_vec()]);
        assert_eq!(words(r"\\ \t"), vec![b"\\".to_vec(), b"\t".to_vec()]);
        assert_eq!(words(r"x\"), vec![b"x\\".to_vec()]);
    }

    #[test]
    fn test_line_kinds() {
        let kind = |s: &str| LineKind::classify(tokenize(s.as_bytes()).first());
        assert_eq!(kind(""), Ok(LineKind::Blank));
        assert_eq!(kind("# hello"), Ok(LineKind::Comment));
        assert_eq!(kind("#"), Ok(LineKind::Comment));
        assert_eq!(kind("mode 0"), Ok(LineKind::Mode));
        assert_eq!(kind("token if"), Ok(LineKind::Token));
        assert_eq!(kind("color 1 ffffff"), Ok(LineKind::Color));
        assert_eq!(kind("modes 0"), Err("modes".to_owned()));
        // An escaped '#' is a word, not a comment.
        assert_eq!(kind(r"\# x"), Err("#".to_owned()));
    }

    #[test]
    fn test_empty_config_has_default_mode() {
        let parsed = parse_config("");
        assert_eq!(parsed.tables.modes(), &[Mode::default()]);
        assert!(parsed.tables.tokens().is_empty());
        assert!(parsed.anomalies.is_empty());
    }

    #[test]
    fn test_mode_fields() {
        let parsed = parse_config("mode 0\nmode 1 min=az max=zz fore=3 back=4 style=bold-italic modifier=strikethrough\n");
        assert!(parsed.anomalies.is_empty(), "{:?}", parsed.anomalies);

        let mode = &parsed.tables.modes()[1];
        assert_eq!(mode.ranges, vec![ByteRange::new(b'a', b'z'), ByteRange::single(b'z')]);
        assert_eq!((mode.fore, mode.back), (3, 4));
        assert_eq!(mode.variant, GlyphVariant::BoldItalic);
        assert_eq!(mode.modifiers, Modifiers::STRIKETHROUGH);
    }

    #[test]
    fn test_mode_default_ranges() {
        let parsed = parse_config("mode 0 fore=2");
        assert_eq!(parsed.tables.modes()[0].ranges, IDENTIFIER_RANGES.to_vec());
        assert_eq!(parsed.tables.modes()[0].fore, 2);
    }

    #[test]
    fn test_mode_ranges_with_escaped_space() {
        let parsed = parse_config(r"mode 0 min=\  max=~");
        assert_eq!(parsed.tables.modes()[0].ranges, vec![ByteRange::new(b' ', b'~')]);
    }

    #[test]
    fn test_sparse_mode_ids_pad_with_defaults() {
        let parsed = parse_config("mode 2 fore=5");
        let modes = parsed.tables.modes();
        assert_eq!(modes.len(), 3);
        assert_eq!(modes[0], Mode::default());
        assert_eq!(modes[1], Mode::default());
        assert_eq!(modes[2].fore, 5);
    }

    #[test]
    fn test_mode_out_of_range_is_skipped() {
        let parsed = parse_config("mode 32 fore=1\nmode x\nmode");
        assert_eq!(parsed.tables.modes().len(), 1);
        assert_eq!(parsed.anomalies.len(), 3);
        assert!(matches!(parsed.anomalies[0], ConfigAnomaly::ModeOutOfRange { line: 1, id: 32 }));
        assert!(matches!(parsed.anomalies[1], ConfigAnomaly::Malformed { line: 2, .. }));
        assert!(matches!(parsed.anomalies[2], ConfigAnomaly::Missing { line: 3, .. }));
    }

    #[test]
    fn test_too_many_byte_ranges_are_capped() {
        let parsed = parse_config("mode 0 min=abcdefghij max=abcdefghij");
        assert_eq!(parsed.tables.modes()[0].ranges.len(), MAX_MODE_RANGES);
        assert_eq!(
            parsed.anomalies,
            vec![ConfigAnomaly::TooManyRanges { line: 1, given: 10, kept: 8 }]
        );
    }

    #[test]
    fn test_bad_fields_are_ignored_but_line_kept() {
        let parsed = parse_config("mode 0 fore=x style=wavy colour=2 fore=3 junk");
        let mode = &parsed.tables.modes()[0];
        assert_eq!(mode.fore, 3);
        assert_eq!(mode.variant, GlyphVariant::Regular);
        assert_eq!(parsed.anomalies.len(), 4);
    }

    #[test]
    fn test_tokens_keep_config_order() {
        let parsed = parse_config("mode 0\nmode 1\ntoken if mode-switch=1\ntoken if mode-of=1\ntoken else");
        let texts: Vec<&[u8]> = parsed.tables.tokens().iter().map(|t| t.text.as_slice()).collect();
        assert_eq!(texts, vec![b"if".as_slice(), b"if", b"else"]);
        assert_eq!(parsed.tables.tokens()[0].mode_switch, Some(1));
        assert_eq!(parsed.tables.tokens()[1].mode_of, Some(1));
    }

    #[test]
    fn test_token_mode_ranges() {
        let parsed = parse_config("token x prev-mode-min=0,2,5 prev-mode-max=0,-1");
        let token = &parsed.tables.tokens()[0];
        assert_eq!(
            token.required,
            vec![ModeRange::new(0, 0), ModeRange::from(2), ModeRange::from(5)]
        );
        assert!(parsed.anomalies.is_empty());
    }

    #[test]
    fn test_token_malformed_range_pair_dropped() {
        let parsed = parse_config("token x prev-mode-min=1,q prev-mode-max=1,3");
        assert_eq!(parsed.tables.tokens()[0].required, vec![ModeRange::new(1, 1)]);
        assert_eq!(parsed.anomalies.len(), 1);
    }

    #[test]
    fn test_token_escaped_literal() {
        let parsed = parse_config(r"token \n mode-switch=0");
        assert_eq!(parsed.tables.tokens()[0].text, b"\n");
    }

    #[test]
    fn test_token_without_literal() {
        let parsed = parse_config("token");
        assert!(parsed.tables.tokens().is_empty());
        assert!(matches!(parsed.anomalies[0], ConfigAnomaly::Missing { line: 1, .. }));
    }

    #[test]
    fn test_dangling_mode_refs_reported() {
        let parsed = parse_config("mode 0\ntoken x mode-switch=7 mode-of=0");
        assert_eq!(
            parsed.anomalies,
            vec![ConfigAnomaly::DanglingModeRef { line: 2, key: "mode-switch", id: 7 }]
        );
        // The table itself still loads; the switch is a no-op.
        let (_, t) = parsed.tables.lookup(0, b"x").unwrap();
        assert_eq!(t.next, 0);
    }

    #[test]
    fn test_colors() {
        let parsed = parse_config("color 2 ff0000\ncolor selection #00ff00\ncolor gutter 0000ff\ncolor 40 ffffff\ncolor 1 nope");
        let palette = parsed.tables.palette();
        assert_eq!(palette.get(2), Some(Rgb::new(255, 0, 0)));
        assert_eq!(palette.selection, Rgb::new(0, 255, 0));
        assert_eq!(palette.gutter, Rgb::new(0, 0, 255));
        assert_eq!(parsed.anomalies.len(), 2);
    }

    #[test]
    fn test_unknown_line_kind() {
        let parsed = parse_config("# fine\n\nstyle 1\n");
        assert_eq!(
            parsed.anomalies,
            vec![ConfigAnomaly::UnknownLineKind { line: 3, word: "style".to_owned() }]
        );
    }

    #[test]
    fn test_anomaly_display() {
        let anomaly = ConfigAnomaly::ModeOutOfRange { line: 4, id: 40 };
        assert_eq!(anomaly.to_string(), "line 4: mode 40 is out of range (max 31)");
    }

    #[test]
    fn test_crlf_lines() {
        let parsed = parse_config("mode 0 fore=2\r\ntoken if\r\n");
        assert!(parsed.anomalies.is_empty());
        assert_eq!(parsed.tables.tokens()[0].text, b"if");
    }

    #[test]
    fn test_parsed_config_drives_highlighter() {
        let config = "\
mode 0
mode 1 fore=2
mode 2 min=\\  max=~ fore=3
token if mode-of=1
token # mode-of=2 mode-switch=2 prev-mode-min=0 prev-mode-max=0
token \\n mode-switch=0 prev-mode-min=2 prev-mode-max=2
";
        let parsed = parse_config(config);
        assert!(parsed.anomalies.is_empty(), "{:?}", parsed.anomalies);

        let mut hl = Highlighter::new(parsed.tables);
        let text = b"if #x\ny";
        let modes: Vec<_> = (0..text.len()).map(|i| hl.step_mode(text, i)).collect();
        assert_eq!(modes[..2], [1, 1]);
        assert_eq!(modes[3], 2);
        assert_eq!(modes[6], 0);
    }

    #[test]
    fn test_load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "mode 0 fore=2\ntoken fn mode-of=0").unwrap();
        tmp.flush().unwrap();

        let parsed = SyntaxTables::load(tmp.path()).unwrap();
        assert_eq!(parsed.tables.tokens().len(), 1);
        assert_eq!(parsed.tables.modes()[0].fore, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(SyntaxTables::load(dir.path().join("none.cfg")), Err(Error::Io { .. })));
    }
}
