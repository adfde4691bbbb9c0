#![no_main]

use highlight::unmark::count_markers;
use highlight::{HighlightOptions, highlight_text, is_marker, remove_highlight};
use html::Node;
use libfuzzer_sys::fuzz_target;

const CONTAINER: &str = "c";

fn nested_marker(root: &Node) -> bool {
    let mut stack = vec![(root, false)];
    while let Some((node, inside)) = stack.pop() {
        for child in node.children() {
            let marker = is_marker(child);
            if marker && inside {
                return true;
            }
            stack.push((child, inside || marker));
        }
    }
    false
}

// Input layout: first line is the query, the rest is the container body.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let (query, body) = input.split_once('\n').unwrap_or((input, ""));
    let source = format!(r#"<div class="{CONTAINER}">{body}</div>"#);
    let mut dom = html::parse_document(&source);
    let before = dom.text_content();

    for single in [true, false] {
        let mut options = HighlightOptions::new(query, CONTAINER);
        options.highlight_as_single_string = single;
        highlight_text(&mut dom, &options);
        assert_eq!(dom.text_content(), before);
        assert!(!nested_marker(&dom));
    }

    remove_highlight(&mut dom, CONTAINER);
    assert_eq!(dom.text_content(), before);
    assert_eq!(count_markers(&dom), 0);
});
