//! HTML serialization for trees produced by `parse_document` or mutated in place.
//!
//! Escaping rules:
//! - text: `&`, `<`, `>`; script/style children are written raw.
//! - attribute values (double-quoted): `&`, `"`.
//! - void elements get no end tag and their children, if any, are dropped.
//! - the element `style` list is written as a trailing `style` attribute.
use crate::Node;
use crate::style::format_declarations;
use crate::tokenizer::is_void_element;
use memchr::{memchr2, memchr3};

pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_nodes(&mut out, std::slice::from_ref(node), false);
    out
}

/// Serialize only the children of `node` (its "inner HTML").
pub fn inner_html(node: &Node) -> String {
    let mut out = String::new();
    write_nodes(&mut out, node.children(), is_rawtext_parent(node));
    out
}

fn is_rawtext_parent(node: &Node) -> bool {
    node.element_name()
        .is_some_and(|n| n.eq_ignore_ascii_case("script") || n.eq_ignore_ascii_case("style"))
}

enum Frame<'a> {
    Open(&'a Node, bool),
    Close(&'a str),
}

fn write_nodes(out: &mut String, nodes: &[Node], raw_text: bool) {
    let mut stack: Vec<Frame<'_>> = nodes.iter().rev().map(|n| Frame::Open(n, raw_text)).collect();
    while let Some(frame) = stack.pop() {
        let (node, raw_text) = match frame {
            Frame::Open(node, raw_text) => (node, raw_text),
            Frame::Close(name) => {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
                continue;
            }
        };
        match node {
            Node::Document {
                doctype, children, ..
            } => {
                if let Some(dt) = doctype {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(dt);
                    out.push('>');
                }
                stack.extend(children.iter().rev().map(|c| Frame::Open(c, false)));
            }
            Node::Element {
                name,
                attributes,
                style,
                children,
                ..
            } => {
                write_start_tag(out, name, attributes, style);
                if is_void_element(name) {
                    continue;
                }
                stack.push(Frame::Close(&**name));
                let raw = is_rawtext_parent(node);
                stack.extend(children.iter().rev().map(|c| Frame::Open(c, raw)));
            }
            Node::Text { text, .. } => {
                if raw_text {
                    out.push_str(text);
                } else {
                    push_escaped_text(out, text);
                }
            }
            Node::Comment { text, .. } => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}

fn write_start_tag(
    out: &mut String,
    name: &str,
    attributes: &[(std::sync::Arc<str>, Option<String>)],
    style: &[(String, String)],
) {
    out.push('<');
    out.push_str(name);
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        if let Some(value) = value {
            out.push_str("=\"");
            push_escaped_attr(out, value);
            out.push('"');
        }
    }
    if !style.is_empty() {
        out.push_str(" style=\"");
        push_escaped_attr(out, &format_declarations(style));
        out.push('"');
    }
    out.push('>');
}

fn push_escaped_text(out: &mut String, text: &str) {
    push_escaped(out, text, |bytes| memchr3(b'&', b'<', b'>', bytes));
}

fn push_escaped_attr(out: &mut String, value: &str) {
    push_escaped(out, value, |bytes| memchr2(b'&', b'"', bytes));
}

fn push_escaped(out: &mut String, s: &str, find: impl Fn(&[u8]) -> Option<usize>) {
    let bytes = s.as_bytes();
    let mut start = 0;
    while let Some(rel) = find(&bytes[start..]) {
        let pos = start + rel;
        out.push_str(&s[start..pos]);
        out.push_str(match bytes[pos] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            _ => unreachable!("escape finder only reports escapable bytes"),
        });
        start = pos + 1;
    }
    out.push_str(&s[start..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn text_and_attributes_are_escaped() {
        let dom = parse_document(r#"<p title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp;&amp; 3 &gt; 2</p>"#);
        assert_eq!(
            to_html(&dom),
            r#"<p title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp;&amp; 3 &gt; 2</p>"#
        );
    }

    #[test]
    fn script_text_stays_raw_and_void_elements_have_no_end_tag() {
        let input = "<!DOCTYPE html><div>a<br>b<script>if (a < b && c) {}</script></div>";
        assert_eq!(to_html(&parse_document(input)), input);
    }

    #[test]
    fn style_list_round_trips_as_attribute() {
        let dom = parse_document(r#"<span class="x" style="color:red;background : yellow">t</span>"#);
        assert_eq!(
            to_html(&dom),
            r#"<span class="x" style="color: red; background: yellow">t</span>"#
        );
    }

    #[test]
    fn deep_nesting_serializes_without_recursion() {
        let depth = 20_000;
        let input = format!("{}x{}", "<i>".repeat(depth), "</i>".repeat(depth));
        assert_eq!(to_html(&parse_document(&input)), input);
    }

    #[test]
    fn inner_html_skips_the_wrapper() {
        let dom = parse_document("<div><!--c--><em>x</em></div>");
        assert_eq!(inner_html(&dom.children()[0]), "<!--c--><em>x</em>");
    }
}
