/// Engine-wide configuration shared by every call made through a `Highlighter`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightConfig {
    /// Match case exactly. Off by default: "Cat" finds "cat".
    pub case_sensitive: bool,
    pub short_tokens: ShortTokenPolicy,
    pub walk: WalkOptions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// The whole search text is one literal, internal whitespace included.
    #[default]
    SingleString,
    /// Whitespace-separated tokens, each matched independently.
    PerWord,
}

impl MatchMode {
    pub fn from_single_string(single: bool) -> Self {
        if single {
            MatchMode::SingleString
        } else {
            MatchMode::PerWord
        }
    }
}

/// Which tokens must match on whole-word boundaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryRule {
    /// Tokens of at most `max_len` chars need boundaries.
    #[default]
    ShortTokens,
    /// Tokens longer than `max_len` chars need boundaries.
    LongTokens,
    Never,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShortTokenPolicy {
    pub max_len: usize,
    pub applies_to: BoundaryRule,
}

impl ShortTokenPolicy {
    pub const DISABLED: ShortTokenPolicy = ShortTokenPolicy {
        max_len: 0,
        applies_to: BoundaryRule::Never,
    };

    pub fn requires_boundary(&self, token: &str) -> bool {
        let len = token.chars().count();
        match self.applies_to {
            BoundaryRule::ShortTokens => len <= self.max_len,
            BoundaryRule::LongTokens => len > self.max_len,
            BoundaryRule::Never => false,
        }
    }
}

impl Default for ShortTokenPolicy {
    fn default() -> Self {
        Self {
            max_len: 2,
            applies_to: BoundaryRule::ShortTokens,
        }
    }
}

/// Per-call options consumed by `Pattern::build`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub case_sensitive: bool,
    pub mode: MatchMode,
    pub short_tokens: ShortTokenPolicy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkOptions {
    /// Leave `script`, `style`, `head` and friends untouched.
    pub skip_non_rendering: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            skip_non_rendering: true,
        }
    }
}
