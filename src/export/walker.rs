//! Inclusion traversal over the document tree
//!
//! Depth-first walk deciding per node whether it belongs in the output.
//! Children are serialized into a working fragment first (materialization
//! is post-order), then either attached to the node's own element or, for
//! excluded and unselected nodes, spliced directly into the parent so that
//! included descendants still surface.

use super::dom::{
    append, create_fragment, export_to_html, move_children, replace_child, ExportedElement,
};
use super::slice::slice_selected_text_content;
use super::ExportMode;
use crate::error::ExportError;
use crate::selection::SelectionScope;
use crate::tree::{DocumentTree, Node, NodeKey};
use markup5ever_rcdom::Handle;
use std::borrow::Cow;

/// Walk `key` and its subtree, appending exported markup to `parent`.
///
/// Returns whether the node ended up included, which the caller uses for
/// the ancestor-promotion check one level up.
pub(crate) fn append_nodes_to_html(
    tree: &DocumentTree,
    key: NodeKey,
    parent: &Handle,
    scope: Option<&SelectionScope<'_>>,
) -> Result<bool, ExportError> {
    let node = tree.get(key).ok_or(ExportError::NodeNotFound(key))?;

    let mut should_include = match scope {
        Some(scope) => node.is_selected(scope),
        None => true,
    };
    let should_exclude = node.is_element() && node.exclude_from_export(ExportMode::Html);

    // Under a selection the node is never materialized directly: a clone
    // takes its place so boundary text can be narrowed without touching
    // the source tree.
    let target: Cow<'_, Node> = match scope {
        Some(scope) => {
            let mut clone = node.clone_with_properties();
            if clone.is_text() {
                clone = slice_selected_text_content(scope, clone);
            }
            Cow::Owned(clone)
        }
        None => Cow::Borrowed(node),
    };

    let output = export_to_html(target.as_ref());
    let Some(element) = output.element else {
        // No HTML representation; skipped, siblings continue
        return Ok(false);
    };

    let fragment = create_fragment();
    for &child_key in target.children() {
        let child_included = append_nodes_to_html(tree, child_key, &fragment, scope)?;

        if let Some(scope) = scope {
            if !should_include
                && child_included
                && node.extract_with_child(tree, child_key, scope, ExportMode::Html)
            {
                should_include = true;
            }
        }
    }

    if should_include && !should_exclude {
        match element {
            ExportedElement::Element(handle) => {
                move_children(&fragment, &handle);
                append(parent, handle.clone());
                if let Some(after) = output.after {
                    if let Some(replacement) = after(&handle) {
                        replace_child(parent, &handle, replacement);
                    }
                }
            }
            ExportedElement::Fragment => {
                move_children(&fragment, parent);
            }
        }
    } else {
        // Wrapper dropped; grandchildren surface at this node's position
        move_children(&fragment, parent);
    }

    Ok(should_include)
}
