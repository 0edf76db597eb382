//! Tokens: exact-match runs that re-tag themselves and switch modes.

use super::mode::ModeId;

/// Index of a token in configuration order.
pub type TokenId = usize;

/// Most mode ranges a token may require.
pub const MAX_TOKEN_MODE_RANGES: usize = 4;

/// Inclusive range of mode ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeRange {
    /// Lowest mode id.
    pub min: ModeId,
    /// Highest mode id.
    pub max: ModeId,
}

impl ModeRange {
    /// Create an inclusive range.
    pub const fn new(min: ModeId, max: ModeId) -> Self {
        Self { min, max }
    }

    /// Every mode from `min` up.
    pub const fn from(min: ModeId) -> Self {
        Self::new(min, ModeId::MAX)
    }

    /// Whether `mode` lies inside the range.
    #[inline]
    pub const fn contains(&self, mode: ModeId) -> bool {
        self.min <= mode && mode <= self.max
    }
}

/// An exact byte string with optional mode effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Bytes the whole run must equal.
    pub text: Vec<u8>,
    /// Modes the token is recognized in; empty means every mode.
    pub required: Vec<ModeRange>,
    /// Mode whose attributes the matched run is drawn with.
    pub mode_of: Option<ModeId>,
    /// Mode that becomes current after the run.
    pub mode_switch: Option<ModeId>,
}

impl Token {
    /// A token with no effects, recognized in every mode.
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        Self {
            text: text.into(),
            required: Vec::new(),
            mode_of: None,
            mode_switch: None,
        }
    }

    /// Draw the matched run in `mode` (builder pattern).
    #[must_use]
    pub const fn with_mode_of(mut self, mode: ModeId) -> Self {
        self.mode_of = Some(mode);
        self
    }

    /// Switch to `mode` after the run (builder pattern).
    #[must_use]
    pub const fn with_mode_switch(mut self, mode: ModeId) -> Self {
        self.mode_switch = Some(mode);
        self
    }

    /// Only recognize the token while the current mode is in `min..=max`
    /// (builder pattern). Ranges past [`MAX_TOKEN_MODE_RANGES`] are ignored.
    #[must_use]
    pub fn with_required(mut self, min: ModeId, max: ModeId) -> Self {
        if self.required.len() < MAX_TOKEN_MODE_RANGES {
            self.required.push(ModeRange::new(min, max));
        }
        self
    }

    /// Whether the token may match while `mode` is current.
    pub fn applies_in(&self, mode: ModeId) -> bool {
        self.required.is_empty() || self.required.iter().any(|r| r.contains(mode))
    }
}
