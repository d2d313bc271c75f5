//! Pretty-printed export tests

use doctree::{
    generate_html, generate_pretty_html, DocumentTree, ElementNode, ListKind, TextNode,
};

fn strip_whitespace(html: &str) -> String {
    html.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn test_indents_nested_blocks() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let para = tree.add_element(root, ElementNode::paragraph()).unwrap();
    tree.add_text(para, TextNode::new("Hello")).unwrap();

    let html = generate_pretty_html(&tree, None).unwrap();
    assert_eq!(html, "\n<p>\n  <span>Hello</span>\n</p>\n");
}

#[test]
fn test_list_indentation_depth() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let list = tree
        .add_element(root, ElementNode::list(ListKind::Ordered))
        .unwrap();
    let item = tree.add_element(list, ElementNode::list_item()).unwrap();
    tree.add_text(item, TextNode::new("one")).unwrap();

    let html = generate_pretty_html(&tree, None).unwrap();
    assert_eq!(
        html,
        "\n<ol>\n  <li>\n    <span>one</span>\n  </li>\n</ol>\n"
    );
}

#[test]
fn test_formatting_only_adds_structural_whitespace() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let para = tree.add_element(root, ElementNode::paragraph()).unwrap();
    tree.add_text(para, TextNode::new("a b  c")).unwrap();
    let second = tree.add_element(root, ElementNode::quote()).unwrap();
    tree.add_text(second, TextNode::new("quoted")).unwrap();

    let plain = generate_html(&tree, None).unwrap();
    let pretty = generate_pretty_html(&tree, None).unwrap();
    // same markup once structural whitespace is ignored
    assert_eq!(strip_whitespace(&plain), strip_whitespace(&pretty));
    // leaf text keeps its own spacing
    assert!(pretty.contains("a b  c"));
}

#[test]
fn test_pretty_export_under_selection() {
    use doctree::{Point, RangeSelection, Selection};
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let para = tree.add_element(root, ElementNode::paragraph()).unwrap();
    let text = tree.add_text(para, TextNode::new("Hello World")).unwrap();

    let selection = Selection::Range(RangeSelection::new(
        Point::new(text, 0),
        Point::new(text, 5),
    ));
    let html = generate_pretty_html(&tree, Some(&selection)).unwrap();
    assert_eq!(html, "\n<p>\n  <span>Hello</span>\n</p>\n");
}
