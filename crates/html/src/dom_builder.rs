use crate::style::parse_declarations;
use crate::tokenizer::tokenize;
use crate::types::{Id, Node, Token};
use std::sync::Arc;

/// Parse `input` into a `Document` node and number every node.
pub fn parse_document(input: &str) -> Node {
    let tokens = tokenize(input);
    let mut dom = build_dom(&tokens);
    crate::traverse::assign_node_ids(&mut dom);
    log::debug!(
        target: "html.dom_builder",
        "parsed {} bytes into {} tokens",
        input.len(),
        tokens.len()
    );
    dom
}

/// Build a tree from a token slice. End tags without a matching open element are ignored;
/// adjacent text tokens are merged into one text node.
pub fn build_dom(tokens: &[Token]) -> Node {
    let mut arena = NodeArena::new();
    let root_index = arena.push(ArenaNode::Document {
        doctype: None,
        children: Vec::new(),
    });

    let mut open_elements: Vec<usize> = Vec::new();

    for token in tokens {
        let parent_index = open_elements.last().copied().unwrap_or(root_index);
        match token {
            Token::Doctype(s) => {
                arena.set_doctype(root_index, s.clone());
            }
            Token::Comment(c) => {
                arena.add_child(parent_index, ArenaNode::Comment { text: c.clone() });
            }
            Token::Text(txt) => {
                if !txt.is_empty() {
                    arena.append_text(parent_index, txt);
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let new_index = arena.add_child(
                    parent_index,
                    ArenaNode::Element {
                        name: name.clone(),
                        attributes: attributes.clone(),
                        children: Vec::new(),
                    },
                );
                if !*self_closing {
                    open_elements.push(new_index);
                }
            }
            Token::EndTag(name) => {
                let Some(pos) = open_elements
                    .iter()
                    .rposition(|&index| arena.is_element_named(index, name))
                else {
                    log::trace!(target: "html.dom_builder", "ignoring stray end tag </{name}>");
                    continue;
                };
                open_elements.truncate(pos);
            }
        }
    }

    arena.into_dom(root_index)
}

type Attributes = Vec<(Arc<str>, Option<String>)>;

/// Move an inline `style` attribute into the element's declaration list.
fn split_inline_style(mut attributes: Attributes) -> (Attributes, Vec<(String, String)>) {
    let Some(pos) = attributes
        .iter()
        .position(|(k, _)| k.eq_ignore_ascii_case("style"))
    else {
        return (attributes, Vec::new());
    };
    let (_, value) = attributes.remove(pos);
    let style = parse_declarations(value.as_deref().unwrap_or(""));
    (attributes, style)
}

#[derive(Debug)]
enum ArenaNode {
    Document {
        doctype: Option<String>,
        children: Vec<usize>,
    },
    Element {
        name: Arc<str>,
        attributes: Attributes,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl ArenaNode {
    fn children(&self) -> Option<&[usize]> {
        match self {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                Some(children)
            }
            ArenaNode::Text { .. } | ArenaNode::Comment { .. } => None,
        }
    }
}

#[derive(Debug)]
struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    fn add_child(&mut self, parent_index: usize, child: ArenaNode) -> usize {
        let child_index = self.push(child);
        match &mut self.nodes[parent_index] {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                children.push(child_index);
            }
            _ => unreachable!("dom builder parent cannot have children"),
        }
        child_index
    }

    fn append_text(&mut self, parent_index: usize, text: &str) {
        let last = self.nodes[parent_index]
            .children()
            .and_then(|c| c.last().copied());
        if let Some(last) = last {
            if let ArenaNode::Text { text: existing } = &mut self.nodes[last] {
                existing.push_str(text);
                return;
            }
        }
        self.add_child(
            parent_index,
            ArenaNode::Text {
                text: text.to_string(),
            },
        );
    }

    fn set_doctype(&mut self, root_index: usize, doctype: String) {
        let ArenaNode::Document { doctype: dt, .. } = &mut self.nodes[root_index] else {
            unreachable!("dom builder root is always a document node");
        };
        *dt = Some(doctype);
    }

    fn is_element_named(&self, node_index: usize, target: &str) -> bool {
        match &self.nodes[node_index] {
            ArenaNode::Element { name, .. } => name.eq_ignore_ascii_case(target),
            _ => false,
        }
    }

    fn into_dom(self, root_index: usize) -> Node {
        let mut nodes = self.nodes;
        let mut built_nodes: Vec<Node> = Vec::with_capacity(nodes.len());

        fn take_children(n: usize, built: &mut Vec<Node>) -> Vec<Node> {
            let start = built.len() - n;
            built.split_off(start)
        }

        // Iterative postorder traversal over the arena so deep nesting cannot overflow the
        // stack. When a node is seen the second time, its direct children are the last
        // `child_count` entries of `built_nodes`, in original order.
        let mut stack: Vec<(usize, bool)> = vec![(root_index, false)];

        while let Some((node_index, visited)) = stack.pop() {
            if !visited {
                stack.push((node_index, true));
                if let Some(children) = nodes[node_index].children() {
                    for &child_index in children.iter().rev() {
                        stack.push((child_index, false));
                    }
                }
                continue;
            }

            let node = match &mut nodes[node_index] {
                ArenaNode::Document { doctype, children } => Node::Document {
                    id: Id::UNSET,
                    doctype: doctype.take(),
                    children: take_children(children.len(), &mut built_nodes),
                },
                ArenaNode::Element {
                    name,
                    attributes,
                    children,
                } => {
                    let (attributes, style) = split_inline_style(std::mem::take(attributes));
                    Node::Element {
                        id: Id::UNSET,
                        name: name.clone(),
                        attributes,
                        style,
                        children: take_children(children.len(), &mut built_nodes),
                    }
                }
                ArenaNode::Text { text } => Node::Text {
                    id: Id::UNSET,
                    text: std::mem::take(text),
                },
                ArenaNode::Comment { text } => Node::Comment {
                    id: Id::UNSET,
                    text: std::mem::take(text),
                },
            };

            built_nodes.push(node);
        }

        debug_assert_eq!(
            built_nodes.len(),
            1,
            "dom builder should build exactly one root node"
        );
        built_nodes.pop().unwrap_or(Node::Document {
            id: Id::UNSET,
            doctype: None,
            children: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_dom_stress_deep_nesting() {
        let depth: usize = 10_000;
        let div: Arc<str> = Arc::from("div");
        let mut tokens = Vec::with_capacity(depth * 2);
        for _ in 0..depth {
            tokens.push(Token::StartTag {
                name: div.clone(),
                attributes: Vec::new(),
                self_closing: false,
            });
        }
        for _ in 0..depth {
            tokens.push(Token::EndTag(div.clone()));
        }

        let dom = build_dom(&tokens);

        let mut current = &dom;
        let mut seen = 0usize;
        loop {
            match current {
                Node::Document { children, .. } => {
                    assert_eq!(children.len(), 1);
                    current = &children[0];
                }
                Node::Element { name, children, .. } => {
                    assert_eq!(&**name, "div");
                    seen += 1;
                    if seen == depth {
                        assert!(children.is_empty());
                        break;
                    }
                    assert_eq!(children.len(), 1);
                    current = &children[0];
                }
                Node::Text { .. } | Node::Comment { .. } => {
                    panic!("unexpected leaf node before reaching depth");
                }
            }
        }
    }

    #[test]
    fn stray_end_tag_does_not_close_open_elements() {
        let dom = parse_document("<div><p>a</span>b</p>c</div>");
        let div = &dom.children()[0];
        assert_eq!(div.element_name(), Some("div"));
        let p = &div.children()[0];
        assert_eq!(p.text_content(), "ab");
        assert_eq!(div.children()[1], Node::Text {
            id: div.children()[1].id(),
            text: "c".to_string(),
        });
    }

    #[test]
    fn inline_style_attribute_becomes_declarations() {
        let dom = parse_document(r#"<p id=a style="Color: red; ; font-weight:bold">x</p>"#);
        match &dom.children()[0] {
            Node::Element {
                attributes, style, ..
            } => {
                assert_eq!(attributes.len(), 1);
                assert_eq!(
                    style,
                    &vec![
                        ("color".to_string(), "red".to_string()),
                        ("font-weight".to_string(), "bold".to_string()),
                    ]
                );
            }
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn adjacent_text_tokens_merge() {
        let dom = parse_document("1 < 2");
        assert_eq!(dom.children().len(), 1);
        assert_eq!(dom.text_content(), "1 < 2");
    }

    #[test]
    fn parse_document_numbers_nodes() {
        let dom = parse_document("<!doctype html><p>x</p>");
        assert_eq!(dom.id(), crate::Id(1));
        assert!(matches!(&dom, Node::Document { doctype: Some(d), .. } if d == "html"));
        assert_eq!(dom.children()[0].id(), crate::Id(2));
        assert_eq!(dom.children()[0].children()[0].id(), crate::Id(3));
    }
}
