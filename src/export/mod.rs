//! Document tree → HTML export
//!
//! Entry points for the export pipeline: validate inputs, walk the tree
//! into an rcdom fragment, optionally re-indent, and serialize to a string.
//!
//! ## Modules
//!
//! - `walker` - inclusion traversal (document order, selection, promotion)
//! - `slice` - selection-boundary text slicing
//! - `dom` - per-kind HTML materialization and rcdom helpers
//! - `pretty` - indentation pass

pub(crate) mod dom;
pub(crate) mod pretty;
pub(crate) mod slice;
pub(crate) mod walker;

pub use dom::{AfterExport, ExportedElement, HtmlExport};

use crate::error::ExportError;
use crate::selection::{Selection, SelectionScope};
use crate::tree::DocumentTree;

/// Which export surface is being produced; capabilities like exclusion and
/// promotion are consulted per mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Html,
}

/// Export the tree to an HTML fragment string.
///
/// With `selection` set, only nodes the selection covers are included and
/// boundary text nodes are narrowed to their selected span. `None` exports
/// everything not marked excluded.
pub fn generate_html(
    tree: &DocumentTree,
    selection: Option<&Selection>,
) -> Result<String, ExportError> {
    let container = build_fragment(tree, selection)?;
    dom::serialize_fragment(&container)
}

/// Like [`generate_html`], with the indentation pass applied before
/// serialization.
pub fn generate_pretty_html(
    tree: &DocumentTree,
    selection: Option<&Selection>,
) -> Result<String, ExportError> {
    let container = build_fragment(tree, selection)?;
    pretty::prettify(&container, 0);
    dom::serialize_fragment(&container)
}

fn build_fragment(
    tree: &DocumentTree,
    selection: Option<&Selection>,
) -> Result<markup5ever_rcdom::Handle, ExportError> {
    if !tree.contains(tree.root()) {
        return Err(ExportError::MissingRoot);
    }
    let scope = match selection {
        Some(selection) => Some(SelectionScope::new(tree, selection)?),
        None => None,
    };
    let container = dom::create_fragment();
    // The root exports as a fragment marker, so its children land directly
    // in the container.
    walker::append_nodes_to_html(tree, tree.root(), &container, scope.as_ref())?;
    Ok(container)
}
