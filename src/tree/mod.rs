//! Document tree model
//!
//! An ordered, rooted tree of rich-text nodes. The tree owns every node in
//! an arena keyed by [`NodeKey`]; parent references are non-owning
//! back-pointers used for navigation only, and element nodes hold the
//! ordered child key lists.
//!
//! ## Modules
//!
//! - `node` - The polymorphic node wrapper and its export capabilities
//! - `element` - Element-like container nodes (paragraphs, headings, ...)
//! - `text` - Text leaf nodes with formatting flags

pub mod element;
pub mod node;
pub mod text;

pub use element::{Direction, ElementKind, ElementNode, ListKind, TextAlign};
pub use node::{Node, NodeBody};
pub use text::{TextFormat, TextMode, TextNode};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable identity of a node within one document snapshot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeKey(pub u64);

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors that can occur while building a document tree
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    NodeNotFound(NodeKey),
    NotAnElement(NodeKey),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NodeNotFound(key) => write!(f, "Node {} not found", key),
            TreeError::NotAnElement(key) => {
                write!(f, "Node {} is not an element and cannot hold children", key)
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// An ordered, rooted document tree owning its nodes
///
/// The tree starts with a single root element. Content is added through the
/// builder methods (`add_element`, `add_text`, ...); the exporter itself
/// only ever reads the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    nodes: HashMap<NodeKey, Node>,
    root: NodeKey,
    next_key: u64,
}

impl DocumentTree {
    pub fn new() -> Self {
        let root = NodeKey(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            Node {
                key: root,
                parent: None,
                body: NodeBody::Element(ElementNode::new(ElementKind::Root)),
            },
        );
        Self {
            nodes,
            root,
            next_key: 1,
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(&key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, body: NodeBody) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        self.nodes.insert(
            key,
            Node {
                key,
                parent: None,
                body,
            },
        );
        key
    }

    /// Create a detached element node of the given kind
    pub fn create_element(&mut self, element: ElementNode) -> NodeKey {
        self.insert(NodeBody::Element(element))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: TextNode) -> NodeKey {
        self.insert(NodeBody::Text(text))
    }

    /// Create a detached line-break node
    pub fn create_line_break(&mut self) -> NodeKey {
        self.insert(NodeBody::LineBreak)
    }

    /// Create a detached decorator (editor-rendered widget) node
    pub fn create_decorator(&mut self, name: impl Into<String>) -> NodeKey {
        self.insert(NodeBody::Decorator { name: name.into() })
    }

    /// Attach a previously created node as the last child of an element
    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), TreeError> {
        if !self.nodes.contains_key(&child) {
            return Err(TreeError::NodeNotFound(child));
        }
        {
            let parent_node = self
                .nodes
                .get_mut(&parent)
                .ok_or(TreeError::NodeNotFound(parent))?;
            match &mut parent_node.body {
                NodeBody::Element(el) => el.children.push(child),
                _ => return Err(TreeError::NotAnElement(parent)),
            }
        }
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(parent);
        }
        Ok(())
    }

    /// Create an element and attach it under `parent` in one step
    pub fn add_element(
        &mut self,
        parent: NodeKey,
        element: ElementNode,
    ) -> Result<NodeKey, TreeError> {
        let key = self.create_element(element);
        self.append_child(parent, key)?;
        Ok(key)
    }

    /// Create a text node and attach it under `parent` in one step
    pub fn add_text(&mut self, parent: NodeKey, text: TextNode) -> Result<NodeKey, TreeError> {
        let key = self.create_text(text);
        self.append_child(parent, key)?;
        Ok(key)
    }

    /// Create a line break and attach it under `parent` in one step
    pub fn add_line_break(&mut self, parent: NodeKey) -> Result<NodeKey, TreeError> {
        let key = self.create_line_break();
        self.append_child(parent, key)?;
        Ok(key)
    }

    /// Create a decorator and attach it under `parent` in one step
    pub fn add_decorator(
        &mut self,
        parent: NodeKey,
        name: impl Into<String>,
    ) -> Result<NodeKey, TreeError> {
        let key = self.create_decorator(name);
        self.append_child(parent, key)?;
        Ok(key)
    }

    /// Ordered child keys of a node (empty for leaf nodes)
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.get(key).map(|n| n.children()).unwrap_or(&[])
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.get(key).and_then(|n| n.parent)
    }

    pub fn first_child(&self, key: NodeKey) -> Option<NodeKey> {
        self.children(key).first().copied()
    }

    pub fn last_child(&self, key: NodeKey) -> Option<NodeKey> {
        self.children(key).last().copied()
    }

    pub fn next_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let parent = self.parent(key)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|k| *k == key)?;
        siblings.get(pos + 1).copied()
    }

    pub fn prev_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let parent = self.parent(key)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|k| *k == key)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p)).copied()
    }

    /// True if `ancestor` lies strictly above `key` on the path to the root
    pub fn is_ancestor_of(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut cur = self.parent(key);
        while let Some(k) = cur {
            if k == ancestor {
                return true;
            }
            cur = self.parent(k);
        }
        false
    }

    /// True if `a` comes before `b` in document (pre-order) order
    ///
    /// An ancestor precedes its descendants.
    pub fn is_before(&self, a: NodeKey, b: NodeKey) -> bool {
        a != b && self.path_from_root(a) < self.path_from_root(b)
    }

    /// Child-index path from the root down to `key`
    fn path_from_root(&self, key: NodeKey) -> Vec<usize> {
        let mut path = Vec::new();
        let mut cur = key;
        while let Some(parent) = self.parent(cur) {
            let idx = self
                .children(parent)
                .iter()
                .position(|k| *k == cur)
                .unwrap_or(0);
            path.push(idx);
            cur = parent;
        }
        path.reverse();
        path
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentTree({} nodes)", self.nodes.len())
    }
}
