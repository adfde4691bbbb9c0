use html::dom_utils::normalize_text;
use html::serialize::to_html;
use html::traverse::for_each_element_with_class_mut;
use html::{Node, parse_document};

const STABLE: &[&str] = &[
    "<!DOCTYPE html><html><head><title>t</title></head><body><p>hi</p></body></html>",
    r#"<div class="a b"><p>x &amp; y &lt; z</p><br><img src="a.png" alt="&quot;q&quot;"></div>"#,
    r#"<section><!-- note --><script>if (a < b && c) {}</script><input disabled></section>"#,
    r#"<p style="color: red; margin: 0">styled</p>"#,
];

#[test]
fn serialization_is_stable_for_normalized_markup() {
    for input in STABLE {
        let dom = parse_document(input);
        assert_eq!(to_html(&dom), *input);
    }
}

#[test]
fn reparse_of_serialized_tree_is_identical() {
    let messy = "<DIV Class=x>one<P>two</p>three</div></span>&copy; &#x41;&#66;";
    let dom = parse_document(messy);
    let serialized = to_html(&dom);
    assert_eq!(serialized, r#"<div class="x">one<p>two</p>three</div>© AB"#);
    assert_eq!(parse_document(&serialized), dom);
    assert_eq!(dom.text_content(), "onetwothree© AB");
}

#[test]
fn class_walk_visits_nested_containers_outer_first() {
    let mut dom = parse_document(
        r#"<div class="box" id="outer"><p class="box" id="inner">x</p></div><p class="boxes">y</p>"#,
    );

    let mut seen = Vec::new();
    let visited = for_each_element_with_class_mut(&mut dom, "box", &mut |node: &mut Node| {
        seen.push(node.attr("id").unwrap_or_default().to_string());
    });
    assert_eq!(visited, 2);
    assert_eq!(seen, ["outer", "inner"]);
}

#[test]
fn normalize_after_manual_split_restores_single_text() {
    let original = parse_document("<p>alpha beta</p>");
    let mut dom = original.clone();
    let p = &mut dom.children_mut().expect("document has children")[0];
    *p.children_mut().expect("p has children") = vec![
        Node::text("alpha"),
        Node::text(""),
        Node::text(" beta"),
    ];
    normalize_text(&mut dom);
    assert_eq!(to_html(&dom), "<p>alpha beta</p>");
    assert_eq!(dom.text_content(), original.text_content());
}
