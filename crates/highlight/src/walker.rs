//! Tree walker: wraps pattern matches found in text leaves with marker elements.
use crate::config::WalkOptions;
use crate::marker::{MarkerTemplate, is_marker};
use crate::pattern::Pattern;
use html::Node;
use html::dom_utils::is_non_rendering_element;

/// Highlight every match below `root` with the default walk options.
/// Returns the number of markers inserted.
pub fn apply_highlight(root: &mut Node, pattern: &Pattern, marker: &MarkerTemplate) -> usize {
    apply_highlight_with(root, pattern, marker, &WalkOptions::default())
}

/// Highlight every match below `root`. A marker root, or a non-rendering root when
/// `options.skip_non_rendering` is set, is left untouched.
pub fn apply_highlight_with(
    root: &mut Node,
    pattern: &Pattern,
    marker: &MarkerTemplate,
    options: &WalkOptions,
) -> usize {
    if !descends_into(root, options) {
        return 0;
    }
    let inserted = walk(root, pattern, marker, options);
    log::debug!(target: "highlight.walker", "inserted {inserted} markers");
    inserted
}

fn descends_into(node: &Node, options: &WalkOptions) -> bool {
    match node {
        Node::Document { .. } => true,
        Node::Element { .. } => {
            !is_marker(node) && !(options.skip_non_rendering && is_non_rendering_element(node))
        }
        Node::Text { .. } | Node::Comment { .. } => false,
    }
}

fn walk(root: &mut Node, pattern: &Pattern, marker: &MarkerTemplate, options: &WalkOptions) -> usize {
    let mut inserted = 0;
    let mut stack: Vec<&mut Node> = vec![root];
    while let Some(node) = stack.pop() {
        let Some(children) = node.children_mut() else {
            continue;
        };
        // Index cursor: a replaced leaf may become several siblings, none of which are
        // revisited.
        let mut i = 0;
        while i < children.len() {
            let Node::Text { text, .. } = &children[i] else {
                i += 1;
                continue;
            };
            let spans = pattern.find_spans(text);
            if spans.is_empty() {
                i += 1;
                continue;
            }
            inserted += spans.len();
            let replacement = split_into_markers(text, &spans, marker);
            let count = replacement.len();
            children.splice(i..=i, replacement);
            i += count;
        }
        stack.extend(
            children
                .iter_mut()
                .rev()
                .filter(|child| descends_into(child, options)),
        );
    }
    inserted
}

/// Alternate plain runs and markers covering `text` exactly; empty runs are omitted.
fn split_into_markers(
    text: &str,
    spans: &[std::ops::Range<usize>],
    marker: &MarkerTemplate,
) -> Vec<Node> {
    let mut out = Vec::with_capacity(spans.len() * 2 + 1);
    let mut last = 0;
    for span in spans {
        if span.start > last {
            out.push(Node::text(&text[last..span.start]));
        }
        out.push(marker.wrap(&text[span.clone()]));
        last = span.end;
    }
    if last < text.len() {
        out.push(Node::text(&text[last..]));
    }
    out
}
