use crate::{Id, Node};

/// Number every node whose id is unset, continuing after the largest id already present.
pub fn assign_node_ids(root: &mut Node) {
    let mut max_id = 0;
    let mut pending: Vec<&Node> = vec![&*root];
    while let Some(node) = pending.pop() {
        max_id = max_id.max(node.id().0);
        pending.extend(node.children());
    }

    let mut next = max_id.wrapping_add(1).max(1);
    let mut stack: Vec<&mut Node> = vec![root];
    while let Some(node) = stack.pop() {
        // only assign if currently unset
        if node.id().is_unset() {
            node.set_id(Id(next));
            next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
}

/// Visit every element carrying `class_name`, in document order.
///
/// The callback runs before the element's descendants are searched, so nested matches
/// see the subtree as the callback left it.
pub fn for_each_element_with_class_mut<F>(root: &mut Node, class_name: &str, f: &mut F) -> usize
where
    F: FnMut(&mut Node),
{
    let mut visited = 0;
    let mut stack: Vec<&mut Node> = vec![root];
    while let Some(node) = stack.pop() {
        if node.has_class(class_name) {
            f(&mut *node);
            visited += 1;
        }
        if let Some(children) = node.children_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
    visited
}
