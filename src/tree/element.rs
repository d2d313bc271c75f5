//! Element-like container nodes
//!
//! Elements carry the ordered child list plus block-level layout metadata
//! (alignment, indent, direction). The kind decides how the node
//! materializes to HTML and which export capabilities it opts into.

use super::NodeKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of element kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Document root; exports as a fragment marker (children only, no wrapper)
    Root,
    Paragraph,
    /// Heading level, clamped to 1..=6 on export
    Heading(u8),
    Quote,
    List(ListKind),
    ListItem,
    Link { url: String },
    /// Purely structural grouping; excluded from HTML export, its children
    /// surface at the group's position
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn css_value(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn attr_value(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// An element-like node: kind, ordered children, block metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub kind: ElementKind,
    pub children: Vec<NodeKey>,
    pub align: Option<TextAlign>,
    pub indent: u32,
    pub direction: Option<Direction>,
}

impl ElementNode {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            align: None,
            indent: 0,
            direction: None,
        }
    }

    pub fn paragraph() -> Self {
        Self::new(ElementKind::Paragraph)
    }

    pub fn heading(level: u8) -> Self {
        Self::new(ElementKind::Heading(level))
    }

    pub fn quote() -> Self {
        Self::new(ElementKind::Quote)
    }

    pub fn list(kind: ListKind) -> Self {
        Self::new(ElementKind::List(kind))
    }

    pub fn list_item() -> Self {
        Self::new(ElementKind::ListItem)
    }

    pub fn link(url: impl Into<String>) -> Self {
        Self::new(ElementKind::Link { url: url.into() })
    }

    pub fn group() -> Self {
        Self::new(ElementKind::Group)
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_indent(mut self, indent: u32) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

impl fmt::Display for ElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({} children)", self.kind, self.children.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let el = ElementNode::paragraph()
            .with_align(TextAlign::Center)
            .with_indent(2);
        assert_eq!(el.kind, ElementKind::Paragraph);
        assert_eq!(el.align, Some(TextAlign::Center));
        assert_eq!(el.indent, 2);
        assert!(el.children.is_empty());
    }

    #[test]
    fn test_link_holds_url() {
        let el = ElementNode::link("https://example.com");
        assert_eq!(
            el.kind,
            ElementKind::Link {
                url: "https://example.com".to_string()
            }
        );
    }
}
