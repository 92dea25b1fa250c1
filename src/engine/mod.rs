//! Kitchen Engine - Document tree and custom element registry.
//!
//! The engine manages the core data structures:
//! - Document: node arena, parent/child links, attributes, destroy callbacks
//! - Elements: tag → component definitions, upgrade on creation
//!
//! # Architecture
//!
//! Nodes are NOT objects. They are indices into a thread-local arena:
//!
//! ```text
//! Index 0: body
//! Index 1: wm-recipe-filter (parent=0, instance=RecipeFilter)
//! Index 2: form.search-form (parent=1)
//! Index 3: input[name=keywords] (parent=2, value="bur")
//! ```
//!
//! Components hold indices and signals, never references into the arena,
//! so rendering can freely create and release nodes.

pub mod document;
pub mod elements;

pub use document::{
    append_child, attribute, body, children, clear_children, create_text_node, descendants,
    has_class, node_count, on_destroy, parent, release_node, remove_attribute, remove_child,
    reset_document, set_attribute, set_text, set_value, tag_name, text_content, value, NodeKind,
};
pub use elements::{
    create_element, define, get_name, instance, is_defined, reset_elements, CustomElement,
};
