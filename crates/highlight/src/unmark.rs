//! Unmarker: replaces every marker with its plain text and normalizes the result.
use crate::marker::is_marker;
use html::Node;
use html::dom_utils::normalize_text;

/// Remove all markers below `root` (at any depth, nested ones included) and merge the
/// text they leave behind. Returns the number of markers removed.
///
/// A subtree without markers is only normalized, which never changes its text.
pub fn clear_highlight(root: &mut Node) -> usize {
    let removed = unwrap_markers(root);
    normalize_text(root);
    if removed > 0 {
        log::debug!(target: "highlight.unmark", "removed {removed} markers");
    }
    removed
}

fn unwrap_markers(root: &mut Node) -> usize {
    let mut removed = 0;
    let mut stack: Vec<&mut Node> = vec![root];
    while let Some(node) = stack.pop() {
        let Some(children) = node.children_mut() else {
            continue;
        };
        for child in children.iter_mut() {
            if is_marker(child) {
                // Count markers nested inside this one too; their text is folded in below.
                removed += 1 + count_markers(child);
                *child = Node::text(child.text_content());
            } else if !child.children().is_empty() {
                stack.push(child);
            }
        }
    }
    removed
}

pub fn count_markers(root: &Node) -> usize {
    let mut count = 0;
    let mut stack: Vec<&Node> = root.children().iter().collect();
    while let Some(node) = stack.pop() {
        count += usize::from(is_marker(node));
        stack.extend(node.children());
    }
    count
}
