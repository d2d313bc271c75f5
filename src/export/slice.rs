//! Selection-boundary text slicing
//!
//! A text node intersected by a range boundary contributes only the
//! selected span. Token and segmented text is atomic: it is exported whole
//! or not at all, partial offsets never slice it. Offsets are character
//! offsets, not byte offsets.

use crate::selection::SelectionScope;
use crate::tree::{Node, NodeBody, TextMode};

/// Narrow a cloned text node to the substring the selection covers.
///
/// Returns the node unmodified when it is not sliceable: not selected, not
/// plain text, or the selection has no character offsets (node selection).
pub(crate) fn slice_selected_text_content(scope: &SelectionScope<'_>, mut node: Node) -> Node {
    let sliceable = matches!(
        &node.body,
        NodeBody::Text(t) if t.mode == TextMode::Normal
    );
    if !sliceable || !scope.contains(node.key) {
        return node;
    }
    let Some(range) = scope.range() else {
        return node;
    };

    let is_anchor = node.key == range.anchor_key;
    let is_focus = node.key == range.focus_key;
    if !is_anchor && !is_focus {
        // Fully enclosed by the selection; full text retained
        return node;
    }

    let same = range.anchor_key == range.focus_key;
    let first_key = if range.backward {
        range.focus_key
    } else {
        range.anchor_key
    };
    let last_key = if range.backward {
        range.anchor_key
    } else {
        range.focus_key
    };

    // end = None means "to the end of the text"
    let (start, end) = if same {
        (
            range.anchor_offset.min(range.focus_offset),
            Some(range.anchor_offset.max(range.focus_offset)),
        )
    } else if node.key == first_key {
        let offset = if range.backward {
            range.focus_offset
        } else {
            range.anchor_offset
        };
        (offset, None)
    } else if node.key == last_key {
        let offset = if range.backward {
            range.anchor_offset
        } else {
            range.focus_offset
        };
        (0, Some(offset))
    } else {
        (0, None)
    };

    if let NodeBody::Text(t) = &mut node.body {
        t.text = slice_chars(&t.text, start, end);
    }
    node
}

/// Substring by character offsets, `[start, end)`; open-ended when `end`
/// is `None`
fn slice_chars(text: &str, start: usize, end: Option<usize>) -> String {
    match end {
        Some(end) => text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect(),
        None => text.chars().skip(start).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Point, RangeSelection, Selection};
    use crate::tree::{DocumentTree, ElementNode, NodeKey, TextNode};

    fn tree_with_text(text: &str) -> (DocumentTree, NodeKey) {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        let para = tree.add_element(root, ElementNode::paragraph()).unwrap();
        let key = tree.add_text(para, TextNode::new(text)).unwrap();
        (tree, key)
    }

    fn sliced(tree: &DocumentTree, selection: &Selection, key: NodeKey) -> String {
        let scope = SelectionScope::new(tree, selection).unwrap();
        let node = slice_selected_text_content(&scope, tree.get(key).unwrap().clone());
        match node.body {
            NodeBody::Text(t) => t.text,
            _ => panic!("slicer must preserve the node type"),
        }
    }

    #[test]
    fn test_same_node_uses_min_max() {
        let (tree, key) = tree_with_text("Hello World");
        let forward = Selection::Range(RangeSelection::new(
            Point::new(key, 0),
            Point::new(key, 5),
        ));
        let backward = Selection::Range(RangeSelection::new(
            Point::new(key, 5),
            Point::new(key, 0),
        ));
        assert_eq!(sliced(&tree, &forward, key), "Hello");
        assert_eq!(sliced(&tree, &backward, key), "Hello");
    }

    #[test]
    fn test_earlier_endpoint_is_open_ended() {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        let para = tree.add_element(root, ElementNode::paragraph()).unwrap();
        let a = tree.add_text(para, TextNode::new("Hello")).unwrap();
        let b = tree.add_text(para, TextNode::new("World")).unwrap();
        let selection =
            Selection::Range(RangeSelection::new(Point::new(a, 3), Point::new(b, 2)));
        assert_eq!(sliced(&tree, &selection, a), "lo");
        assert_eq!(sliced(&tree, &selection, b), "Wo");
    }

    #[test]
    fn test_character_offsets_not_bytes() {
        let (tree, key) = tree_with_text("héllo");
        let selection = Selection::Range(RangeSelection::new(
            Point::new(key, 0),
            Point::new(key, 2),
        ));
        assert_eq!(sliced(&tree, &selection, key), "hé");
    }

    #[test]
    fn test_token_text_never_sliced() {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        let para = tree.add_element(root, ElementNode::paragraph()).unwrap();
        let key = tree
            .add_text(para, TextNode::new("@mention").with_mode(TextMode::Token))
            .unwrap();
        let selection = Selection::Range(RangeSelection::new(
            Point::new(key, 0),
            Point::new(key, 3),
        ));
        assert_eq!(sliced(&tree, &selection, key), "@mention");
    }

    #[test]
    fn test_enclosed_node_keeps_full_text() {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        let para = tree.add_element(root, ElementNode::paragraph()).unwrap();
        let a = tree.add_text(para, TextNode::new("one")).unwrap();
        let b = tree.add_text(para, TextNode::new("two")).unwrap();
        let c = tree.add_text(para, TextNode::new("three")).unwrap();
        let selection =
            Selection::Range(RangeSelection::new(Point::new(a, 1), Point::new(c, 2)));
        assert_eq!(sliced(&tree, &selection, b), "two");
    }
}
