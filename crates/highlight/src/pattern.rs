//! Matcher: turns a user-supplied search string into a literal-only regex.
use crate::config::{MatchMode, MatchOptions};
use crate::error::PatternError;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

// Lookaround-free whole-word guards: a non-word char or the haystack edge on that side.
const WORD_START: &str = r"\b{start-half}";
const WORD_END: &str = r"\b{end-half}";

/// A compiled search pattern. Derived per call, never stored in the tree.
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
    mode: MatchMode,
    tokens: Vec<String>,
}

impl Pattern {
    pub fn build(search_text: &str, options: &MatchOptions) -> Result<Self, PatternError> {
        Self::build_inner(search_text, options, None)
    }

    fn build_inner(
        search_text: &str,
        options: &MatchOptions,
        size_limit: Option<usize>,
    ) -> Result<Self, PatternError> {
        if search_text.trim().is_empty() {
            return Err(PatternError::Empty);
        }
        let tokens = match options.mode {
            MatchMode::SingleString => vec![search_text.to_string()],
            MatchMode::PerWord => split_tokens(search_text),
        };
        if tokens.is_empty() {
            return Err(PatternError::Empty);
        }

        let source = tokens
            .iter()
            .map(|token| {
                let escaped = regex::escape(token);
                if !options.short_tokens.requires_boundary(token) {
                    return escaped;
                }
                // Guard only the sides that end in a word char; "!" or "%" match anywhere.
                let start = if token.chars().next().is_some_and(is_word_char) {
                    WORD_START
                } else {
                    ""
                };
                let end = if token.chars().next_back().is_some_and(is_word_char) {
                    WORD_END
                } else {
                    ""
                };
                format!("{start}{escaped}{end}")
            })
            .collect::<Vec<_>>()
            .join("|");

        let mut builder = RegexBuilder::new(&source);
        builder.case_insensitive(!options.case_sensitive);
        if let Some(limit) = size_limit {
            builder.size_limit(limit);
        }
        let regex = builder.build()?;
        log::trace!(target: "highlight.pattern", "compiled {:?} from {search_text:?}", regex.as_str());
        Ok(Self {
            regex,
            mode: options.mode,
            tokens,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The literal tokens the pattern alternates over, longest first in per-word mode.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Non-overlapping, non-empty match ranges (byte offsets into `text`), left to right.
    pub fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whitespace-split, deduplicated, longest first so a longer alternative wins over its
/// own prefix at the same position.
fn split_tokens(search_text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for word in search_text.split_whitespace() {
        if !tokens.iter().any(|t| t == word) {
            tokens.push(word.to_string());
        }
    }
    tokens.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
    tokens
}
