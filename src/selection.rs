//! Selection model
//!
//! A selection is an optional constraint on the export: either a range with
//! directional anchor/focus endpoints and character offsets, or a set of
//! whole nodes. `None` at the export boundary means "export everything".
//!
//! Backwardness (focus before anchor in document order) is computed from
//! the two points rather than stored, so a selection can never disagree
//! with the tree it is resolved against.

use crate::error::ExportError;
use crate::tree::{DocumentTree, NodeKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// One endpoint of a range selection: a node and a character offset within
/// it (for text nodes) or a child index (for elements)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub key: NodeKey,
    pub offset: usize,
}

impl Point {
    pub fn new(key: NodeKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.offset)
    }
}

/// A directional range over the tree
///
/// The anchor is where the selection started, the focus where it ends; the
/// anchor may sit before or after the focus in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelection {
    pub anchor: Point,
    pub focus: Point,
}

impl RangeSelection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// True if the visually earlier endpoint is the focus rather than the
    /// anchor
    pub fn is_backward(&self, tree: &DocumentTree) -> bool {
        if self.anchor.key == self.focus.key {
            self.focus.offset < self.anchor.offset
        } else {
            tree.is_before(self.focus.key, self.anchor.key)
        }
    }
}

/// A selection of whole nodes, selected entirely or not at all
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeSelection {
    pub keys: BTreeSet<NodeKey>,
}

impl NodeSelection {
    pub fn new(keys: impl IntoIterator<Item = NodeKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

/// The selection constraint supplied to an export call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    Range(RangeSelection),
    Node(NodeSelection),
}

impl Selection {
    pub fn is_range(&self) -> bool {
        matches!(self, Selection::Range(_))
    }
}

/// A range selection resolved against a concrete tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub anchor_key: NodeKey,
    pub focus_key: NodeKey,
    pub anchor_offset: usize,
    pub focus_offset: usize,
    pub backward: bool,
    pub collapsed: bool,
}

/// A selection validated against one snapshot, with the covered node set
/// computed once for the whole export call
#[derive(Debug)]
pub struct SelectionScope<'a> {
    selection: &'a Selection,
    selected: HashSet<NodeKey>,
    range: Option<ResolvedRange>,
}

impl<'a> SelectionScope<'a> {
    /// Validate the selection against the tree and resolve the node set it
    /// covers. Fails fast on endpoints absent from the snapshot or offsets
    /// outside a node's content.
    pub fn new(tree: &DocumentTree, selection: &'a Selection) -> Result<Self, ExportError> {
        match selection {
            Selection::Range(range) => {
                validate_point(tree, range.anchor)?;
                validate_point(tree, range.focus)?;
                let backward = range.is_backward(tree);
                let resolved = ResolvedRange {
                    anchor_key: range.anchor.key,
                    focus_key: range.focus.key,
                    anchor_offset: range.anchor.offset,
                    focus_offset: range.focus.offset,
                    backward,
                    collapsed: range.is_collapsed(),
                };
                let selected = nodes_between(tree, range.anchor.key, range.focus.key, !backward)?;
                Ok(Self {
                    selection,
                    selected,
                    range: Some(resolved),
                })
            }
            Selection::Node(nodes) => {
                for &key in &nodes.keys {
                    if !tree.contains(key) {
                        return Err(ExportError::NodeNotFound(key));
                    }
                }
                Ok(Self {
                    selection,
                    selected: nodes.keys.iter().copied().collect(),
                    range: None,
                })
            }
        }
    }

    pub fn selection(&self) -> &Selection {
        self.selection
    }

    /// Range details, or `None` for a node selection
    pub fn range(&self) -> Option<&ResolvedRange> {
        self.range.as_ref()
    }

    /// Membership test for the covered node set
    pub fn contains(&self, key: NodeKey) -> bool {
        self.selected.contains(&key)
    }
}

fn validate_point(tree: &DocumentTree, point: Point) -> Result<(), ExportError> {
    let node = tree
        .get(point.key)
        .ok_or(ExportError::NodeNotFound(point.key))?;
    let len = node.content_len();
    if point.offset > len {
        return Err(ExportError::OffsetOutOfBounds {
            key: point.key,
            offset: point.offset,
            len,
        });
    }
    Ok(())
}

/// The set of nodes a range covers, walking document order from anchor to
/// focus: both endpoints, every node strictly between them, and ancestors
/// entered while climbing out of a subtree.
fn nodes_between(
    tree: &DocumentTree,
    anchor: NodeKey,
    focus: NodeKey,
    forward: bool,
) -> Result<HashSet<NodeKey>, ExportError> {
    let mut visited: HashSet<NodeKey> = HashSet::new();
    let mut selected: HashSet<NodeKey> = HashSet::new();
    let mut node = anchor;

    loop {
        if visited.insert(node) {
            selected.insert(node);
        }
        if node == focus {
            break;
        }

        // Descend first, then advance to a sibling, then climb.
        let child = if forward {
            tree.first_child(node)
        } else {
            tree.last_child(node)
        };
        if let Some(child) = child {
            node = child;
            continue;
        }

        let sibling = if forward {
            tree.next_sibling(node)
        } else {
            tree.prev_sibling(node)
        };
        if let Some(sibling) = sibling {
            node = sibling;
            continue;
        }

        let parent = tree.parent(node).ok_or(ExportError::NodeNotFound(focus))?;
        if !visited.contains(&parent) {
            selected.insert(parent);
        }
        if parent == focus {
            break;
        }

        let mut ancestor = Some(parent);
        let next = loop {
            let current = ancestor.ok_or(ExportError::NodeNotFound(focus))?;
            let sibling = if forward {
                tree.next_sibling(current)
            } else {
                tree.prev_sibling(current)
            };
            ancestor = tree.parent(current);
            match sibling {
                Some(s) => break s,
                None => {
                    if let Some(a) = ancestor {
                        if !visited.contains(&a) {
                            selected.insert(a);
                        }
                    }
                }
            }
        };
        node = next;
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ElementNode, TextNode};

    fn two_paragraph_tree() -> (DocumentTree, NodeKey, NodeKey, NodeKey, NodeKey) {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        let p1 = tree.add_element(root, ElementNode::paragraph()).unwrap();
        let t1 = tree.add_text(p1, TextNode::new("Hello")).unwrap();
        let p2 = tree.add_element(root, ElementNode::paragraph()).unwrap();
        let t2 = tree.add_text(p2, TextNode::new("World")).unwrap();
        (tree, p1, t1, p2, t2)
    }

    #[test]
    fn test_backwardness_from_document_order() {
        let (tree, _p1, t1, _p2, t2) = two_paragraph_tree();
        let forward = RangeSelection::new(Point::new(t1, 1), Point::new(t2, 2));
        let backward = RangeSelection::new(Point::new(t2, 2), Point::new(t1, 1));
        assert!(!forward.is_backward(&tree));
        assert!(backward.is_backward(&tree));
        // same node: offsets decide
        let same = RangeSelection::new(Point::new(t1, 4), Point::new(t1, 1));
        assert!(same.is_backward(&tree));
    }

    #[test]
    fn test_scope_covers_endpoints_and_climbed_ancestors() {
        let (tree, p1, t1, p2, t2) = two_paragraph_tree();
        let selection = Selection::Range(RangeSelection::new(
            Point::new(t1, 3),
            Point::new(t2, 2),
        ));
        let scope = SelectionScope::new(&tree, &selection).unwrap();
        assert!(scope.contains(t1));
        assert!(scope.contains(t2));
        // climbing out of p1 pulls it in; p2 is entered on the way down
        assert!(scope.contains(p1));
        assert!(scope.contains(p2));
        assert!(!scope.contains(tree.root()));
    }

    #[test]
    fn test_scope_within_single_node() {
        let (tree, p1, t1, p2, _t2) = two_paragraph_tree();
        let selection = Selection::Range(RangeSelection::new(
            Point::new(t1, 1),
            Point::new(t1, 4),
        ));
        let scope = SelectionScope::new(&tree, &selection).unwrap();
        assert!(scope.contains(t1));
        assert!(!scope.contains(p1));
        assert!(!scope.contains(p2));
    }

    #[test]
    fn test_sibling_range_excludes_parent() {
        let mut tree = DocumentTree::new();
        let root = tree.root();
        let para = tree.add_element(root, ElementNode::paragraph()).unwrap();
        let a = tree.add_text(para, TextNode::new("Hello")).unwrap();
        let b = tree.add_text(para, TextNode::new("World")).unwrap();
        let selection =
            Selection::Range(RangeSelection::new(Point::new(a, 3), Point::new(b, 2)));
        let scope = SelectionScope::new(&tree, &selection).unwrap();
        assert!(scope.contains(a));
        assert!(scope.contains(b));
        // no climb happened, so the parent stays out; promotion handles it
        assert!(!scope.contains(para));
    }

    #[test]
    fn test_backward_scope_matches_forward() {
        let (tree, _p1, t1, _p2, t2) = two_paragraph_tree();
        let fwd = Selection::Range(RangeSelection::new(Point::new(t1, 3), Point::new(t2, 2)));
        let bwd = Selection::Range(RangeSelection::new(Point::new(t2, 2), Point::new(t1, 3)));
        let keys = |sel: &Selection| {
            let scope = SelectionScope::new(&tree, sel).unwrap();
            let mut all: Vec<NodeKey> = (0..tree.len() as u64)
                .map(NodeKey)
                .filter(|k| scope.contains(*k))
                .collect();
            all.sort();
            all
        };
        assert_eq!(keys(&fwd), keys(&bwd));
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let (tree, _p1, t1, ..) = two_paragraph_tree();
        let selection = Selection::Range(RangeSelection::new(
            Point::new(t1, 0),
            Point::new(NodeKey(404), 0),
        ));
        assert_eq!(
            SelectionScope::new(&tree, &selection).unwrap_err(),
            ExportError::NodeNotFound(NodeKey(404))
        );
    }

    #[test]
    fn test_offset_out_of_bounds_rejected() {
        let (tree, _p1, t1, ..) = two_paragraph_tree();
        let selection = Selection::Range(RangeSelection::new(
            Point::new(t1, 0),
            Point::new(t1, 6),
        ));
        assert_eq!(
            SelectionScope::new(&tree, &selection).unwrap_err(),
            ExportError::OffsetOutOfBounds {
                key: t1,
                offset: 6,
                len: 5
            }
        );
    }

    #[test]
    fn test_node_selection_membership() {
        let (tree, p1, t1, _p2, t2) = two_paragraph_tree();
        let selection = Selection::Node(NodeSelection::new([p1, t2]));
        let scope = SelectionScope::new(&tree, &selection).unwrap();
        assert!(scope.contains(p1));
        assert!(scope.contains(t2));
        assert!(!scope.contains(t1));
        assert!(scope.range().is_none());
    }
}
