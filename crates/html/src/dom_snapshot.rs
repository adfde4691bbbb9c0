use crate::Node;
use std::fmt::{self, Write};

/// Deterministic DOM rendering and comparison for tests.
/// Not a public stable format; intended for internal test comparisons.
///
/// Equivalence rules:
/// - Node kinds, element names and attribute lists (order included) must match.
/// - Text nodes must match exactly; adjacent text nodes are NOT merged, so a split text
///   run differs from a single one.
/// - Style declarations must match in order, unless both sides are empty and
///   `ignore_empty_style` is set.
/// - IDs are ignored unless `ignore_ids` is cleared.
#[derive(Clone, Copy, Debug)]
pub struct DomSnapshotOptions {
    pub ignore_ids: bool,
    pub ignore_empty_style: bool,
}

impl Default for DomSnapshotOptions {
    fn default() -> Self {
        Self {
            ignore_ids: true,
            ignore_empty_style: true,
        }
    }
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
    paths: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &Node, options: DomSnapshotOptions) -> Self {
        let mut snapshot = Self {
            lines: Vec::new(),
            paths: Vec::new(),
        };
        snapshot.walk(root, &options);
        snapshot
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    fn walk(&mut self, root: &Node, options: &DomSnapshotOptions) {
        const INDENT_STEP: usize = 2;
        let mut path: Vec<String> = Vec::new();
        // (node, depth, path label); the root has no label.
        let mut stack: Vec<(&Node, usize, Option<String>)> = vec![(root, 0, None)];
        while let Some((node, depth, label)) = stack.pop() {
            path.truncate(depth.saturating_sub(1));
            path.extend(label);
            let mut line = " ".repeat(depth * INDENT_STEP);
            write_node_line(&mut line, node, options);
            self.lines.push(line);
            self.paths.push(format!("/{}", path.join("/")));
            for (idx, child) in node.children().iter().enumerate().rev() {
                let label = format!("{}[{idx}]", node_label(child));
                stack.push((child, depth + 1, Some(label)));
            }
        }
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Debug)]
pub struct DomMismatch {
    path: String,
    expected: String,
    actual: String,
    expected_tree: String,
    actual_tree: String,
}

impl fmt::Display for DomMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DOM mismatch at {}", self.path)?;
        writeln!(f, "expected: {}", self.expected)?;
        writeln!(f, "actual:   {}", self.actual)?;
        writeln!(f, "expected tree:\n{}", self.expected_tree)?;
        writeln!(f, "actual tree:\n{}", self.actual_tree)?;
        Ok(())
    }
}

impl std::error::Error for DomMismatch {}

pub fn assert_dom_eq(expected: &Node, actual: &Node, options: DomSnapshotOptions) {
    if let Err(mismatch) = compare_dom(expected, actual, options) {
        panic!("{mismatch}");
    }
}

pub fn compare_dom(
    expected: &Node,
    actual: &Node,
    options: DomSnapshotOptions,
) -> Result<(), Box<DomMismatch>> {
    let expected_snapshot = DomSnapshot::new(expected, options);
    let actual_snapshot = DomSnapshot::new(actual, options);
    let exp = expected_snapshot.as_lines();
    let act = actual_snapshot.as_lines();
    let first_diff = exp
        .iter()
        .zip(act.iter())
        .position(|(e, a)| e != a)
        .or_else(|| (exp.len() != act.len()).then(|| exp.len().min(act.len())));
    let Some(index) = first_diff else {
        return Ok(());
    };
    let path = expected_snapshot
        .paths
        .get(index)
        .or_else(|| actual_snapshot.paths.get(index))
        .cloned()
        .unwrap_or_default();
    Err(Box::new(DomMismatch {
        path,
        expected: truncate_line(exp.get(index).map_or("<missing>", |s| s.trim_start()), 160),
        actual: truncate_line(act.get(index).map_or("<missing>", |s| s.trim_start()), 160),
        expected_tree: expected_snapshot.render(),
        actual_tree: actual_snapshot.render(),
    }))
}

fn node_label(node: &Node) -> String {
    match node {
        Node::Document { .. } => "#document".to_string(),
        Node::Element { name, .. } => {
            let mut label = String::from(name.as_ref());
            if let Some(id_value) = node.attr("id").filter(|v| !v.is_empty()) {
                label.push('#');
                write_escaped(&mut label, id_value);
            } else if let Some(class_value) = node.attr("class").filter(|v| !v.is_empty()) {
                label.push_str(".class=");
                write_escaped(&mut label, class_value);
            }
            label
        }
        Node::Text { .. } => "#text".to_string(),
        Node::Comment { .. } => "#comment".to_string(),
    }
}

fn truncate_line(line: &str, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let mut out: String = line.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn write_node_line(out: &mut String, node: &Node, options: &DomSnapshotOptions) {
    match node {
        Node::Document { doctype, .. } => {
            out.push_str("#document");
            if let Some(dt) = doctype {
                out.push_str(" doctype=\"");
                write_escaped(out, dt);
                out.push('"');
            }
        }
        Node::Element {
            name,
            attributes,
            style,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for (attr, value) in attributes {
                out.push(' ');
                out.push_str(attr);
                if let Some(value) = value {
                    out.push_str("=\"");
                    write_escaped(out, value);
                    out.push('"');
                }
            }
            if !(options.ignore_empty_style && style.is_empty()) {
                out.push_str(" style=[");
                for (i, (k, v)) in style.iter().enumerate() {
                    if i != 0 {
                        out.push_str("; ");
                    }
                    out.push_str(k);
                    out.push_str(": ");
                    write_escaped(out, v);
                }
                out.push(']');
            }
            out.push('>');
        }
        Node::Text { text, .. } => {
            out.push('"');
            write_escaped(out, text);
            out.push('"');
        }
        Node::Comment { text, .. } => {
            out.push_str("<!-- ");
            write_escaped(out, text);
            out.push_str(" -->");
        }
    }
    if !options.ignore_ids {
        let _ = write!(out, " id={}", node.id().0);
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ if ch.is_ascii() => out.push(ch),
            _ => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DomSnapshot, DomSnapshotOptions, assert_dom_eq, compare_dom};
    use crate::parse_document;
    use crate::traverse::assign_node_ids;
    use crate::{Id, Node};

    #[test]
    fn dom_eq_ignores_ids_by_default() {
        let expected = parse_document("<div class='a b'>hi</div>");
        let mut actual = parse_document("<div class='a b'>hi</div>");
        actual.set_id(Id(99));
        assert_dom_eq(&expected, &actual, DomSnapshotOptions::default());
    }

    #[test]
    fn split_text_is_not_equal_to_merged_text() {
        let expected = parse_document("<p>ab</p>");
        let mut actual = parse_document("<p>a</p>");
        actual.children_mut().expect("document has children")[0]
            .children_mut()
            .expect("element has children")
            .push(Node::text("b"));
        assign_node_ids(&mut actual);
        let err = compare_dom(&expected, &actual, DomSnapshotOptions::default())
            .expect_err("expected mismatch");
        let message = err.to_string();
        assert!(message.contains("/p[0]/#text[0]"), "{message}");
        assert!(message.contains("\"ab\""), "{message}");
    }

    #[test]
    fn dom_mismatch_path_includes_id_label() {
        let expected = parse_document("<div id=main>a</div>");
        let actual = parse_document("<div id=main>b</div>");
        let err = compare_dom(&expected, &actual, DomSnapshotOptions::default())
            .expect_err("expected mismatch");
        assert!(err.to_string().contains("div#main[0]"));
    }

    #[test]
    fn snapshot_renders_style_and_escapes_non_ascii() {
        let dom = parse_document("<span style='color: red'>caf\u{e9}\n</span>");
        let snapshot = DomSnapshot::new(&dom, DomSnapshotOptions::default());
        assert_eq!(
            snapshot.as_lines(),
            [
                "#document",
                "  <span style=[color: red]>",
                "    \"caf\\u{E9}\\n\"",
            ]
        );
    }
}
