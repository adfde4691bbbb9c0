//! Find-in-page highlighting over an owned DOM tree.
//!
//! ```
//! use highlight::{HighlightOptions, highlight_text, remove_highlight};
//!
//! let mut dom = html::parse_document(r#"<div class="results">Red Fox Jumps</div>"#);
//! highlight_text(&mut dom, &HighlightOptions::new("fox", "results"));
//! assert_eq!(
//!     html::serialize::to_html(&dom),
//!     r#"<div class="results">Red <span class="highlight" data-highlight>Fox</span> Jumps</div>"#
//! );
//!
//! remove_highlight(&mut dom, "results");
//! assert_eq!(
//!     html::serialize::to_html(&dom),
//!     r#"<div class="results">Red Fox Jumps</div>"#
//! );
//! ```

pub mod config;
pub mod error;
pub mod marker;
pub mod pattern;
pub mod unmark;
pub mod walker;

pub use crate::config::{
    BoundaryRule, HighlightConfig, MatchMode, MatchOptions, ShortTokenPolicy, WalkOptions,
};
pub use crate::error::PatternError;
pub use crate::marker::{HighlightStyle, MarkerTemplate, is_marker};
pub use crate::pattern::Pattern;
pub use crate::unmark::clear_highlight;
pub use crate::walker::{apply_highlight, apply_highlight_with};

use html::Node;
use html::traverse::{assign_node_ids, for_each_element_with_class_mut};

/// Arguments of one highlight request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightOptions {
    pub search_text: String,
    /// Class name identifying the containers to process.
    pub element: String,
    pub highlight_as_single_string: bool,
    pub highlight_style: Option<HighlightStyle>,
}

impl HighlightOptions {
    pub fn new(search_text: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            element: element.into(),
            highlight_as_single_string: true,
            highlight_style: None,
        }
    }

    pub fn per_word(mut self) -> Self {
        self.highlight_as_single_string = false;
        self
    }

    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.highlight_style = Some(style);
        self
    }
}

/// Highlight with `HighlightConfig::default()`.
pub fn highlight_text(root: &mut Node, options: &HighlightOptions) {
    Highlighter::default().highlight_text(root, options);
}

/// Remove highlights with `HighlightConfig::default()`.
pub fn remove_highlight(root: &mut Node, class_name: &str) {
    Highlighter::default().remove_highlight(root, class_name);
}

/// Entry point carrying engine configuration. Holds no tree state between calls.
#[derive(Clone, Debug, Default)]
pub struct Highlighter {
    config: HighlightConfig,
}

impl Highlighter {
    pub fn new(config: HighlightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Clear every container carrying `options.element`, then mark matches of
    /// `options.search_text` in each. A blank or unusable search text only clears.
    pub fn highlight_text(&self, root: &mut Node, options: &HighlightOptions) {
        let match_options = MatchOptions {
            case_sensitive: self.config.case_sensitive,
            mode: MatchMode::from_single_string(options.highlight_as_single_string),
            short_tokens: self.config.short_tokens,
        };
        let pattern = match Pattern::build(&options.search_text, &match_options) {
            Ok(pattern) => pattern,
            Err(PatternError::Empty) => {
                self.remove_highlight(root, &options.element);
                return;
            }
            Err(err) => {
                log::warn!(target: "highlight", "{err}; clearing highlights only");
                self.remove_highlight(root, &options.element);
                return;
            }
        };
        let marker = MarkerTemplate::from_style(options.highlight_style.as_ref());

        let mut inserted = 0;
        let containers = for_each_element_with_class_mut(root, &options.element, &mut |c: &mut Node| {
            clear_highlight(c);
            inserted += apply_highlight_with(c, &pattern, &marker, &self.config.walk);
        });
        if containers == 0 {
            log::debug!(target: "highlight", "no containers with class {:?}", options.element);
            return;
        }
        assign_node_ids(root);
        log::debug!(
            target: "highlight",
            "highlighted {inserted} matches of {:?} across {containers} containers",
            options.search_text
        );
    }

    /// Clear every container carrying `class_name`. Zero containers is a no-op.
    pub fn remove_highlight(&self, root: &mut Node, class_name: &str) {
        let mut removed = 0;
        let containers = for_each_element_with_class_mut(root, class_name, &mut |c: &mut Node| {
            removed += clear_highlight(c);
        });
        if containers == 0 {
            log::debug!(target: "highlight", "no containers with class {class_name:?}");
            return;
        }
        assign_node_ids(root);
        log::debug!(
            target: "highlight",
            "removed {removed} markers across {containers} containers"
        );
    }
}
