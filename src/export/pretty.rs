//! Indentation pass over the assembled fragment
//!
//! Inserts structural whitespace around element boundaries: an element at
//! depth `d` gets `"\n"` plus `2*d` spaces before each child element and a
//! closing `"\n"` plus `2*(d-1)` spaces after the last one. Leaf text
//! content is untouched. Whitespace-only text nodes already sitting at a
//! boundary are normalized in place, which makes the pass idempotent.

use super::dom::{create_text, is_element};
use markup5ever_rcdom::{Handle, NodeData};
use std::rc::Rc;

/// Re-indent the children of `node`, recursively. `level` is the depth of
/// `node` itself; the export entry point passes the container at level 0.
pub(crate) fn prettify(node: &Handle, level: usize) {
    let original: Vec<Handle> = node.children.borrow().clone();
    if !original.iter().any(is_element) {
        return;
    }

    let indent_before = format!("\n{}", "  ".repeat(level));
    let indent_after = format!("\n{}", "  ".repeat(level.saturating_sub(1)));

    let mut rebuilt: Vec<Handle> = Vec::with_capacity(original.len() * 2);
    for child in original {
        if is_element(&child) {
            match rebuilt.last() {
                Some(prev) if is_whitespace_text(prev) => set_text(prev, &indent_before),
                _ => rebuilt.push(create_text(&indent_before)),
            }
            prettify(&child, level + 1);
        }
        rebuilt.push(child);
    }

    // Closing indent after the last element child
    match rebuilt.last() {
        Some(last) if is_whitespace_text(last) => set_text(last, &indent_after),
        _ => rebuilt.push(create_text(&indent_after)),
    }

    let mut children = node.children.borrow_mut();
    children.clear();
    for child in rebuilt {
        child.parent.set(Some(Rc::downgrade(node)));
        children.push(child);
    }
}

fn is_whitespace_text(handle: &Handle) -> bool {
    match &handle.data {
        NodeData::Text { contents } => contents.borrow().chars().all(char::is_whitespace),
        _ => false,
    }
}

fn set_text(handle: &Handle, text: &str) {
    if let NodeData::Text { contents } = &handle.data {
        *contents.borrow_mut() = text.to_string().into();
    }
}
