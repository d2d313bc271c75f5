//! Selection-aware HTML export for rich-text document trees
//!
//!     This crate turns an in-memory rich-text document tree into an HTML
//!     fragment. The export walks the tree in document order, decides per
//!     node whether it belongs in the output (optionally constrained by a
//!     selection range), narrows partially-selected text nodes to their
//!     visible substring, and assembles the result as a DOM fragment that is
//!     serialized to a string. An optional pretty-printing pass re-indents
//!     nested elements for human-readable output.
//!
//!     The tree and selection are read-only inputs owned by the caller (an
//!     editor); the export never mutates them. Nodes that need their text
//!     narrowed are cloned first, and all intermediate state is scoped to a
//!     single export call.
//!
//! The file structure:
//!     .
//!     ├── error.rs            # ExportError
//!     ├── tree                # document tree model (arena, node kinds)
//!     ├── selection.rs        # range / node selections, document order
//!     ├── export
//!     │   ├── walker.rs       # inclusion traversal
//!     │   ├── slice.rs        # selection-boundary text slicing
//!     │   ├── dom.rs          # per-kind HTML materialization (rcdom)
//!     │   └── pretty.rs       # indentation pass
//!     └── lib.rs
//!
//! Scope
//!
//!     This is the export direction only. Parsing HTML back into a document
//!     tree, the editing surface itself (keystrokes, history, commands), and
//!     tree mutation beyond the builder API are out of scope. The output is
//!     returned as trusted markup; sanitization is the caller's concern.

pub mod error;
pub mod export;
pub mod selection;
pub mod tree;

pub use error::ExportError;
pub use export::{generate_html, generate_pretty_html, ExportMode};
pub use selection::{NodeSelection, Point, RangeSelection, Selection};
pub use tree::{
    Direction, DocumentTree, ElementKind, ElementNode, ListKind, Node, NodeBody, NodeKey,
    TextAlign, TextFormat, TextMode, TextNode, TreeError,
};
