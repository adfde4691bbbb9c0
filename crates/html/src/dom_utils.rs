use crate::Node;

/// Elements whose text is never rendered.
pub fn is_non_rendering_element(node: &Node) -> bool {
    match node {
        Node::Element { name, .. } => {
            name.eq_ignore_ascii_case("head")
                || name.eq_ignore_ascii_case("style")
                || name.eq_ignore_ascii_case("script")
                || name.eq_ignore_ascii_case("title")
                || name.eq_ignore_ascii_case("meta")
                || name.eq_ignore_ascii_case("link")
        }
        _ => false,
    }
}

/// DOM `normalize()`: merge adjacent text siblings and drop empty text nodes, at every depth.
///
/// The surviving text node of a merged run keeps the id of the first node in the run.
pub fn normalize_text(root: &mut Node) {
    let mut stack: Vec<&mut Node> = vec![root];
    while let Some(node) = stack.pop() {
        let Some(children) = node.children_mut() else {
            continue;
        };
        merge_text_children(children);
        stack.extend(children.iter_mut().filter(|c| !c.children().is_empty()));
    }
}

fn merge_text_children(children: &mut Vec<Node>) {
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for child in children.drain(..) {
        if let Node::Text { text, .. } = &child {
            if text.is_empty() {
                continue;
            }
            if let Some(Node::Text { text: prev, .. }) = merged.last_mut() {
                prev.push_str(text);
                continue;
            }
        }
        merged.push(child);
    }
    *children = merged;
}

pub fn has_adjacent_text(root: &Node) -> bool {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let children = node.children();
        if children
            .windows(2)
            .any(|pair| pair[0].is_text() && pair[1].is_text())
        {
            return true;
        }
        stack.extend(children);
    }
    false
}
