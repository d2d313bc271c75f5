//! The polymorphic node wrapper and its export capabilities
//!
//! `Node` pairs a stable key and parent back-pointer with one of the closed
//! node bodies. The export capabilities live here: selection membership,
//! exclusion from export, ancestor promotion approval, and structural
//! cloning. HTML materialization itself is kind-driven and lives in the
//! export module.

use super::element::{ElementKind, ElementNode};
use super::text::TextNode;
use super::{DocumentTree, NodeKey};
use crate::export::ExportMode;
use crate::selection::SelectionScope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed polymorphic set of node bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeBody {
    Element(ElementNode),
    Text(TextNode),
    LineBreak,
    /// Opaque editor-rendered widget (embed, mention, ...); carries an
    /// identifying name but has no HTML representation of its own
    Decorator { name: String },
}

/// One unit of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub key: NodeKey,
    /// Non-owning back-pointer; the tree owns existence and child order
    pub parent: Option<NodeKey>,
    pub body: NodeBody,
}

impl Node {
    pub fn node_type(&self) -> &'static str {
        match &self.body {
            NodeBody::Element(el) => match el.kind {
                ElementKind::Root => "Root",
                ElementKind::Paragraph => "Paragraph",
                ElementKind::Heading(_) => "Heading",
                ElementKind::Quote => "Quote",
                ElementKind::List(_) => "List",
                ElementKind::ListItem => "ListItem",
                ElementKind::Link { .. } => "Link",
                ElementKind::Group => "Group",
            },
            NodeBody::Text(_) => "Text",
            NodeBody::LineBreak => "LineBreak",
            NodeBody::Decorator { .. } => "Decorator",
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.body, NodeBody::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.body, NodeBody::Text(_))
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match &self.body {
            NodeBody::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match &self.body {
            NodeBody::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Ordered child keys (empty for leaf nodes)
    pub fn children(&self) -> &[NodeKey] {
        match &self.body {
            NodeBody::Element(el) => &el.children,
            _ => &[],
        }
    }

    /// Addressable content length: characters for text nodes, child count
    /// for elements, zero for other leaves
    pub fn content_len(&self) -> usize {
        match &self.body {
            NodeBody::Element(el) => el.children.len(),
            NodeBody::Text(t) => t.len(),
            NodeBody::LineBreak | NodeBody::Decorator { .. } => 0,
        }
    }

    /// True if this node falls (fully or partially) within the selection
    pub fn is_selected(&self, scope: &SelectionScope<'_>) -> bool {
        scope.contains(self.key)
    }

    /// True for element kinds that opt out of appearing in exported markup
    ///
    /// Excluded elements still contribute their children, which surface at
    /// the excluded node's position.
    pub fn exclude_from_export(&self, mode: ExportMode) -> bool {
        let ExportMode::Html = mode;
        matches!(
            &self.body,
            NodeBody::Element(el) if el.kind == ElementKind::Group
        )
    }

    /// Approval hook for ancestor promotion: may an unselected ancestor be
    /// force-included solely to host the given included child?
    ///
    /// Paragraphs and headings approve when the whole selection lives inside
    /// them and is non-collapsed; links always approve. The hook is pure, so
    /// calling it repeatedly for successive children is harmless.
    pub fn extract_with_child(
        &self,
        tree: &DocumentTree,
        _child: NodeKey,
        scope: &SelectionScope<'_>,
        mode: ExportMode,
    ) -> bool {
        let ExportMode::Html = mode;
        let Some(el) = self.as_element() else {
            return false;
        };
        match el.kind {
            ElementKind::Link { .. } => true,
            ElementKind::Paragraph | ElementKind::Heading(_) => {
                let Some(range) = scope.range() else {
                    return false;
                };
                !range.collapsed
                    && tree.is_ancestor_of(self.key, range.anchor_key)
                    && tree.is_ancestor_of(self.key, range.focus_key)
            }
            _ => false,
        }
    }

    /// Structurally independent copy sharing no mutable state with the
    /// original; parent and child keys are copied so relative positioning is
    /// preserved
    pub fn clone_with_properties(&self) -> Node {
        self.clone()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.node_type(), self.key)
    }
}
