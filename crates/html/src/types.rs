use std::sync::Arc;

pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Id(pub NodeId);

impl Id {
    /// Placeholder for nodes created after the tree was numbered.
    pub const UNSET: Id = Id(0);

    pub fn is_unset(self) -> bool {
        self == Id::UNSET
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
        self_closing: bool,
    },
    EndTag(Arc<str>),
    Comment(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
        style: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text {
            id: Id::UNSET,
            text: text.into(),
        }
    }

    pub fn element(name: &str, attributes: Vec<(Arc<str>, Option<String>)>) -> Node {
        Node::Element {
            id: Id::UNSET,
            name: Arc::from(name.to_ascii_lowercase()),
            attributes,
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Document { id, .. } => *id = new_id,
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
            Node::Comment { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            Node::Text { .. } | Node::Comment { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } => Some(children),
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    pub fn element_name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Attribute lookup by ASCII-case-insensitive name. Valueless attributes yield `Some("")`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        let Node::Element { attributes, .. } = self else {
            return None;
        };
        attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// Class-token membership, matching `getElementsByClassName` (case-sensitive tokens).
    pub fn has_class(&self, class_name: &str) -> bool {
        if class_name.is_empty() {
            return false;
        }
        self.attr("class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|t| t == class_name))
    }

    /// Concatenated text of every descendant text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Text { text, .. } => out.push_str(text),
                Node::Document { children, .. } | Node::Element { children, .. } => {
                    stack.extend(children.iter().rev());
                }
                Node::Comment { .. } => {}
            }
        }
        out
    }
}

// Dropping a deep tree through the derived glue recurses once per level; flatten it.
impl Drop for Node {
    fn drop(&mut self) {
        let Some(children) = self.children_mut() else {
            return;
        };
        if children.iter().all(|c| c.children().is_empty()) {
            return;
        }
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Some(grandchildren) = node.children_mut() {
                pending.append(grandchildren);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn div_with_class(class: &str) -> Node {
        Node::element("DIV", vec![(Arc::from("class"), Some(class.to_string()))])
    }

    #[test]
    fn element_constructor_lowercases_tag_name() {
        assert_eq!(div_with_class("x").element_name(), Some("div"));
    }

    #[test]
    fn has_class_matches_whole_tokens_only() {
        let node = div_with_class("  results\tmain ");
        assert!(node.has_class("results"));
        assert!(node.has_class("main"));
        assert!(!node.has_class("result"));
        assert!(!node.has_class("Results"));
        assert!(!node.has_class(""));
    }

    #[test]
    fn text_content_skips_comments_and_keeps_order() {
        let mut root = div_with_class("x");
        let children = root.children_mut().expect("element has children");
        children.push(Node::text("a"));
        children.push(Node::Comment {
            id: Id::UNSET,
            text: "hidden".to_string(),
        });
        let mut inner = Node::element("b", Vec::new());
        inner
            .children_mut()
            .expect("element has children")
            .push(Node::text("c"));
        children.push(inner);
        assert_eq!(root.text_content(), "ac");
    }

    #[test]
    fn valueless_attribute_reads_as_empty() {
        let node = Node::element("span", vec![(Arc::from("data-flag"), None)]);
        assert_eq!(node.attr("DATA-FLAG"), Some(""));
        assert!(node.attr("missing").is_none());
    }
}
