//! HTML materialization (node kinds → rcdom)
//!
//! Per-kind construction of HTML elements plus the small rcdom helpers the
//! walker and pretty printer share. The assembled fragment is serialized
//! with html5ever at the end of the export.

use crate::error::ExportError;
use crate::tree::{
    ElementKind, ElementNode, ListKind, Node, NodeBody, TextNode,
};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node as DomNode, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Post-processing hook invoked after children are attached; returning a
/// handle replaces the element in its parent
pub type AfterExport = fn(&Handle) -> Option<Handle>;

/// What a node contributes to the output fragment
pub enum ExportedElement {
    /// A real element; accepts the collected children
    Element(Handle),
    /// Fragment marker: the node has no wrapper of its own, its children
    /// splice directly into the parent
    Fragment,
}

/// Result of materializing one node
pub struct HtmlExport {
    pub element: Option<ExportedElement>,
    pub after: Option<AfterExport>,
}

impl HtmlExport {
    fn element(handle: Handle) -> Self {
        Self {
            element: Some(ExportedElement::Element(handle)),
            after: None,
        }
    }

    fn fragment() -> Self {
        Self {
            element: Some(ExportedElement::Fragment),
            after: None,
        }
    }

    /// The node has no HTML representation at all
    fn none() -> Self {
        Self {
            element: None,
            after: None,
        }
    }
}

/// Materialize a single node (without children) as HTML
pub(crate) fn export_to_html(node: &Node) -> HtmlExport {
    match &node.body {
        NodeBody::Element(el) => export_element(el),
        NodeBody::Text(t) => HtmlExport::element(export_text(t)),
        NodeBody::LineBreak => HtmlExport::element(create_element("br", vec![])),
        // Editor-rendered widgets have no markup of their own
        NodeBody::Decorator { .. } => HtmlExport::none(),
    }
}

fn export_element(el: &ElementNode) -> HtmlExport {
    match &el.kind {
        ElementKind::Root => HtmlExport::fragment(),
        ElementKind::Paragraph => HtmlExport {
            element: Some(ExportedElement::Element(create_element(
                "p",
                block_attrs(el),
            ))),
            after: Some(collapse_empty_paragraph),
        },
        ElementKind::Heading(level) => {
            let tag = format!("h{}", (*level).clamp(1, 6));
            HtmlExport::element(create_element(&tag, block_attrs(el)))
        }
        ElementKind::Quote => HtmlExport::element(create_element("blockquote", block_attrs(el))),
        ElementKind::List(ListKind::Ordered) => {
            HtmlExport::element(create_element("ol", block_attrs(el)))
        }
        ElementKind::List(ListKind::Unordered) => {
            HtmlExport::element(create_element("ul", block_attrs(el)))
        }
        ElementKind::ListItem => HtmlExport::element(create_element("li", block_attrs(el))),
        ElementKind::Link { url } => {
            let mut attrs = vec![("href", url.clone())];
            attrs.extend(block_attrs(el));
            HtmlExport::element(create_element("a", attrs))
        }
        ElementKind::Group => HtmlExport::element(create_element("div", block_attrs(el))),
    }
}

/// Layout metadata shared by block elements: alignment and indent become an
/// inline style, direction becomes the `dir` attribute
fn block_attrs(el: &ElementNode) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    let mut style = String::new();
    if let Some(align) = el.align {
        style.push_str(&format!("text-align: {};", align.css_value()));
    }
    if el.indent > 0 {
        if !style.is_empty() {
            style.push(' ');
        }
        style.push_str(&format!("text-indent: {}px;", 20 * el.indent));
    }
    if !style.is_empty() {
        attrs.push(("style", style));
    }
    if let Some(direction) = el.direction {
        attrs.push(("dir", direction.attr_value().to_string()));
    }
    attrs
}

/// Text exports as a span wrapped by its formatting tags, innermost first:
/// code, strikethrough, underline, italic, bold
fn export_text(text: &TextNode) -> Handle {
    let span = create_element("span", vec![]);
    append(&span, create_text(&text.text));

    let mut element = span;
    if text.format.code {
        element = wrap(element, "code");
    }
    if text.format.strikethrough {
        element = wrap(element, "s");
    }
    if text.format.underline {
        element = wrap(element, "u");
    }
    if text.format.italic {
        element = wrap(element, "em");
    }
    if text.format.bold {
        element = wrap(element, "strong");
    }
    element
}

/// Replace an empty exported paragraph with `<p><br></p>` so empty blocks
/// keep their height when the markup is rendered
fn collapse_empty_paragraph(element: &Handle) -> Option<Handle> {
    if !element.children.borrow().is_empty() {
        return None;
    }
    let attrs = match &element.data {
        NodeData::Element { attrs, .. } => attrs.borrow().clone(),
        _ => return None,
    };
    let replacement = create_element_with_attrs("p", attrs);
    append(&replacement, create_element("br", vec![]));
    Some(replacement)
}

/// Create an HTML element with attributes
pub(crate) fn create_element(tag: &str, attrs: Vec<(&str, String)>) -> Handle {
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        })
        .collect();
    create_element_with_attrs(tag, attributes)
}

fn create_element_with_attrs(tag: &str, attrs: Vec<Attribute>) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: QualName::new(None, ns!(html), LocalName::from(tag)),
            attrs: RefCell::new(attrs),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
pub(crate) fn create_text(text: &str) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Create an empty container used as a working fragment
pub(crate) fn create_fragment() -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Document,
    })
}

pub(crate) fn is_element(handle: &Handle) -> bool {
    matches!(handle.data, NodeData::Element { .. })
}

/// Append a child handle, keeping its parent back-pointer consistent
pub(crate) fn append(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Move every child of `from` to the end of `to`
pub(crate) fn move_children(from: &Handle, to: &Handle) {
    let mut source = from.children.borrow_mut();
    let mut dest = to.children.borrow_mut();
    for child in source.drain(..) {
        child.parent.set(Some(Rc::downgrade(to)));
        dest.push(child);
    }
}

/// Swap `old` for `new` in the parent's child list, in place
pub(crate) fn replace_child(parent: &Handle, old: &Handle, new: Handle) {
    let mut children = parent.children.borrow_mut();
    if let Some(pos) = children.iter().position(|c| Rc::ptr_eq(c, old)) {
        new.parent.set(Some(Rc::downgrade(parent)));
        children[pos] = new;
    }
}

fn wrap(inner: Handle, tag: &str) -> Handle {
    let outer = create_element(tag, vec![]);
    append(&outer, inner);
    outer
}

/// Serialize the fragment's children to an HTML string
pub(crate) fn serialize_fragment(container: &Handle) -> Result<String, ExportError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone())
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
    }
    String::from_utf8(output).map_err(|e| ExportError::Serialize(e.to_string()))
}
