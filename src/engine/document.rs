//! Document Tree - Node arena for rendered elements.
//!
//! Manages the lifecycle of node indices:
//! - Free index pool for O(1) reuse
//! - Parent/child links, attributes and form-control values
//! - Upgraded component instances owned by their host node
//! - Destroy callbacks run when a node is released
//!
//! Nodes are NOT objects handed out to callers. They are indices into a
//! thread-local arena, like the rest of the engine state:
//!
//! ```text
//! Index 0: body
//! Index 1: wm-meal-plan      (parent=0)
//! Index 2: div.empty-message (parent=1)
//! Index 3: "Your meal plan is empty." (text, parent=2)
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::state::{events, focus};
use crate::types::Role;

use super::elements;

// =============================================================================
// Node
// =============================================================================

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with a lowercase tag name.
    Element(String),
    /// Text content.
    Text(String),
}

struct Node {
    kind: NodeKind,
    parent: Option<usize>,
    children: Vec<usize>,
    attributes: BTreeMap<String, String>,
    /// Current value of a form control (`input`).
    value: Option<String>,
    /// Component instance when the element was upgraded from a defined tag.
    instance: Option<Rc<dyn Any>>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            value: None,
            instance: None,
        }
    }
}

// =============================================================================
// Document State
// =============================================================================

struct DocumentState {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    body: Option<usize>,
    destroy_callbacks: HashMap<usize, Vec<Box<dyn FnOnce()>>>,
}

impl DocumentState {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            body: None,
            destroy_callbacks: HashMap::new(),
        }
    }

    fn allocate(&mut self, kind: NodeKind) -> usize {
        let node = Node::new(kind);
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index).and_then(Option::as_mut)
    }

    /// Subtree of `index` in post-order (children before their parent).
    fn subtree_post_order(&self, index: usize, out: &mut Vec<usize>) {
        if let Some(node) = self.node(index) {
            for &child in &node.children {
                self.subtree_post_order(child, out);
            }
            out.push(index);
        }
    }

    fn descendants(&self, index: usize, out: &mut Vec<usize>) {
        if let Some(node) = self.node(index) {
            for &child in &node.children {
                out.push(child);
                self.descendants(child, out);
            }
        }
    }
}

thread_local! {
    static DOCUMENT: RefCell<DocumentState> = RefCell::new(DocumentState::new());
}

fn with_node<R>(index: usize, f: impl FnOnce(&Node) -> R) -> Option<R> {
    DOCUMENT.with(|doc| doc.borrow().node(index).map(f))
}

fn with_node_mut<R>(index: usize, f: impl FnOnce(&mut Node) -> R) -> Option<R> {
    DOCUMENT.with(|doc| doc.borrow_mut().node_mut(index).map(f))
}

// =============================================================================
// Creation
// =============================================================================

/// The document body, created on first use.
pub fn body() -> usize {
    DOCUMENT.with(|doc| {
        let mut doc = doc.borrow_mut();
        if let Some(body) = doc.body {
            return body;
        }
        let body = doc.allocate(NodeKind::Element("body".to_string()));
        doc.body = Some(body);
        body
    })
}

/// Allocate a detached element node. Use [`elements::create_element`] to
/// get upgraded custom elements.
pub(crate) fn create_node(tag: &str) -> usize {
    let index = DOCUMENT.with(|doc| {
        doc.borrow_mut()
            .allocate(NodeKind::Element(tag.to_ascii_lowercase()))
    });
    tracing::trace!(index, tag, "node allocated");
    index
}

/// Allocate a detached text node.
pub fn create_text_node(text: impl Into<String>) -> usize {
    DOCUMENT.with(|doc| doc.borrow_mut().allocate(NodeKind::Text(text.into())))
}

// =============================================================================
// Tree Mutation
// =============================================================================

/// Append `child` as the last child of `parent`, detaching it from any
/// previous parent first.
pub fn append_child(parent: usize, child: usize) -> Result<()> {
    DOCUMENT.with(|doc| {
        let mut doc = doc.borrow_mut();
        match doc.node(parent) {
            Some(node) if matches!(node.kind, NodeKind::Element(_)) => {}
            _ => return Err(Error::NodeNotFound(parent)),
        }
        let previous = match doc.node(child) {
            Some(node) => node.parent,
            None => return Err(Error::NodeNotFound(child)),
        };
        if let Some(previous) = previous.and_then(|p| doc.node_mut(p)) {
            previous.children.retain(|&c| c != child);
        }
        if let Some(node) = doc.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = doc.node_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    })
}

/// Remove `child` from `parent` and release it with its whole subtree.
pub fn remove_child(parent: usize, child: usize) -> Result<()> {
    let actual = with_node(child, |node| node.parent).ok_or(Error::NodeNotFound(child))?;
    if actual != Some(parent) {
        return Err(Error::NodeNotFound(child));
    }
    release_node(child);
    Ok(())
}

/// Release a node and, recursively, all of its children.
///
/// Children are released before their parent. For every released node the
/// destroy callbacks run, its event listeners are dropped, focus is cleared
/// if it held it, and its component instance is dropped.
pub fn release_node(index: usize) {
    let released = DOCUMENT.with(|doc| {
        let mut doc = doc.borrow_mut();
        let mut order = Vec::new();
        doc.subtree_post_order(index, &mut order);
        if order.is_empty() {
            return Vec::new();
        }

        let parent = doc.node(index).and_then(|node| node.parent);
        if let Some(parent) = parent.and_then(|p| doc.node_mut(p)) {
            parent.children.retain(|&c| c != index);
        }
        if doc.body == Some(index) {
            doc.body = None;
        }

        let mut released = Vec::with_capacity(order.len());
        for i in order {
            let instance = doc.nodes[i].take().and_then(|node| node.instance);
            let callbacks = doc.destroy_callbacks.remove(&i).unwrap_or_default();
            doc.free.push(i);
            released.push((i, callbacks, instance));
        }
        released
    });

    if !released.is_empty() {
        tracing::trace!(index, count = released.len(), "nodes released");
    }

    for (i, callbacks, instance) in released {
        for callback in callbacks {
            callback();
        }
        events::cleanup_index(i);
        focus::release(i);
        drop(instance);
    }
}

/// Release every child of `index`.
pub fn clear_children(index: usize) {
    for child in children(index) {
        release_node(child);
    }
}

/// Replace the content of `index` with a single text node.
///
/// On a text node this rewrites its text in place.
pub fn set_text(index: usize, text: impl Into<String>) {
    let text = text.into();
    let rewritten = with_node_mut(index, |node| match &mut node.kind {
        NodeKind::Text(current) => {
            *current = text.clone();
            true
        }
        NodeKind::Element(_) => false,
    });
    if rewritten == Some(false) {
        clear_children(index);
        let text_node = create_text_node(text);
        // Both indices were just checked or allocated.
        let _ = append_child(index, text_node);
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the node at `index` is released.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DOCUMENT.with(|doc| {
        doc.borrow_mut()
            .destroy_callbacks
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

// =============================================================================
// Attributes and Values
// =============================================================================

/// Read an attribute.
pub fn attribute(index: usize, name: &str) -> Option<String> {
    with_node(index, |node| node.attributes.get(name).cloned()).flatten()
}

/// Set an attribute. Upgraded elements observing `name` are notified.
pub fn set_attribute(index: usize, name: &str, value: impl Into<String>) {
    let value = value.into();
    let changed = with_node_mut(index, |node| {
        let previous = node.attributes.insert(name.to_string(), value.clone());
        previous.as_deref() != Some(value.as_str())
    });
    if changed == Some(true) {
        elements::attribute_changed(index, name, Some(&value));
    }
}

/// Remove an attribute. Upgraded elements observing `name` are notified.
pub fn remove_attribute(index: usize, name: &str) {
    let removed = with_node_mut(index, |node| node.attributes.remove(name).is_some());
    if removed == Some(true) {
        elements::attribute_changed(index, name, None);
    }
}

/// Check the whitespace-separated `class` attribute.
pub fn has_class(index: usize, class: &str) -> bool {
    attribute(index, "class")
        .map(|classes| classes.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Form-control value (`input.value`).
pub fn value(index: usize) -> Option<String> {
    with_node(index, |node| node.value.clone()).flatten()
}

/// Set the form-control value without dispatching any event.
pub fn set_value(index: usize, value: impl Into<String>) {
    let value = value.into();
    with_node_mut(index, |node| node.value = Some(value));
}

// =============================================================================
// Component Instances
// =============================================================================

pub(crate) fn set_instance(index: usize, instance: Rc<dyn Any>) {
    with_node_mut(index, |node| node.instance = Some(instance));
}

pub(crate) fn instance(index: usize) -> Option<Rc<dyn Any>> {
    with_node(index, |node| node.instance.clone()).flatten()
}

// =============================================================================
// Lookups
// =============================================================================

/// Check if an index currently holds a node.
pub fn is_allocated(index: usize) -> bool {
    with_node(index, |_| ()).is_some()
}

/// Count of live nodes.
pub fn node_count() -> usize {
    DOCUMENT.with(|doc| doc.borrow().nodes.iter().filter(|n| n.is_some()).count())
}

pub fn kind(index: usize) -> Option<NodeKind> {
    with_node(index, |node| node.kind.clone())
}

/// Tag name of an element node.
pub fn tag_name(index: usize) -> Option<String> {
    with_node(index, |node| match &node.kind {
        NodeKind::Element(tag) => Some(tag.clone()),
        NodeKind::Text(_) => None,
    })
    .flatten()
}

pub fn parent(index: usize) -> Option<usize> {
    with_node(index, |node| node.parent).flatten()
}

pub fn children(index: usize) -> Vec<usize> {
    with_node(index, |node| node.children.clone()).unwrap_or_default()
}

/// All descendants in document (pre-)order, excluding `index` itself.
pub fn descendants(index: usize) -> Vec<usize> {
    DOCUMENT.with(|doc| {
        let mut out = Vec::new();
        doc.borrow().descendants(index, &mut out);
        out
    })
}

/// Concatenated text of all descendant text nodes.
pub fn text_content(index: usize) -> String {
    DOCUMENT.with(|doc| {
        let doc = doc.borrow();
        let mut nodes = vec![index];
        doc.descendants(index, &mut nodes);
        nodes
            .into_iter()
            .filter_map(|i| match doc.node(i).map(|n| &n.kind) {
                Some(NodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    })
}

/// Nearest inclusive ancestor satisfying `predicate`.
pub fn closest(index: usize, predicate: impl Fn(usize) -> bool) -> Option<usize> {
    let mut current = Some(index).filter(|&i| is_allocated(i));
    while let Some(i) = current {
        if predicate(i) {
            return Some(i);
        }
        current = parent(i);
    }
    None
}

/// Check whether `ancestor` contains `index` (inclusive).
pub fn contains(ancestor: usize, index: usize) -> bool {
    closest(index, |i| i == ancestor).is_some()
}

/// Implicit role of an element.
pub fn role(index: usize) -> Option<Role> {
    with_node(index, |node| match &node.kind {
        NodeKind::Element(tag) => Role::from_tag(
            tag,
            node.attributes.get("type").map(String::as_str),
            node.attributes.get("role").map(String::as_str),
        ),
        NodeKind::Text(_) => None,
    })
    .flatten()
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all document state (for testing). Destroy callbacks are dropped
/// without running.
pub fn reset_document() {
    let previous = DOCUMENT.with(|doc| std::mem::replace(&mut *doc.borrow_mut(), DocumentState::new()));
    drop(previous);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() {
        reset_document();
        events::reset_event_state();
    }

    fn element(tag: &str) -> usize {
        create_node(tag)
    }

    #[test]
    fn test_body_is_created_once() {
        setup();
        let b1 = body();
        let b2 = body();
        assert_eq!(b1, b2);
        assert_eq!(tag_name(b1).as_deref(), Some("body"));
        assert_eq!(node_count(), 1);
    }

    #[test]
    fn test_append_and_text_content() {
        setup();
        let root = element("div");
        let heading = element("h2");
        append_child(root, heading).unwrap();
        append_child(heading, create_text_node("Burger")).unwrap();
        append_child(root, create_text_node(" and fries")).unwrap();

        assert_eq!(children(root).len(), 2);
        assert_eq!(parent(heading), Some(root));
        assert_eq!(text_content(root), "Burger and fries");
        assert_eq!(role(heading), Some(Role::Heading { level: 2 }));
    }

    #[test]
    fn test_append_moves_between_parents() {
        setup();
        let a = element("div");
        let b = element("div");
        let child = element("span");
        append_child(a, child).unwrap();
        append_child(b, child).unwrap();

        assert!(children(a).is_empty());
        assert_eq!(children(b), vec![child]);
    }

    #[test]
    fn test_append_to_text_node_fails() {
        setup();
        let text = create_text_node("x");
        let child = element("span");
        assert!(matches!(append_child(text, child), Err(Error::NodeNotFound(i)) if i == text));
    }

    #[test]
    fn test_release_is_recursive_and_reuses_indices() {
        setup();
        let root = element("ul");
        let item = element("li");
        append_child(root, item).unwrap();
        append_child(item, create_text_node("Salad")).unwrap();
        assert_eq!(node_count(), 3);

        release_node(root);
        assert_eq!(node_count(), 0);
        assert!(!is_allocated(root));

        let reused = element("div");
        assert!(reused <= 2);
    }

    #[test]
    fn test_remove_child_checks_parent() {
        setup();
        let a = element("div");
        let b = element("div");
        let child = element("span");
        append_child(a, child).unwrap();

        assert!(remove_child(b, child).is_err());
        assert!(is_allocated(child));
        remove_child(a, child).unwrap();
        assert!(!is_allocated(child));
        assert!(children(a).is_empty());
    }

    #[test]
    fn test_destroy_callbacks_run_children_first() {
        setup();
        let order = Rc::new(RefCell::new(Vec::new()));
        let parent_node = element("div");
        let child = element("span");
        append_child(parent_node, child).unwrap();

        let o = order.clone();
        on_destroy(parent_node, move || o.borrow_mut().push("parent"));
        let o = order.clone();
        on_destroy(child, move || o.borrow_mut().push("child"));

        release_node(parent_node);
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_set_text_replaces_children() {
        setup();
        let span = element("span");
        append_child(span, element("b")).unwrap();
        set_text(span, "☀️");
        assert_eq!(text_content(span), "☀️");
        assert_eq!(children(span).len(), 1);

        let text = children(span)[0];
        set_text(text, "🌙");
        assert_eq!(text_content(span), "🌙");
        assert_eq!(children(span), vec![text]);
    }

    #[test]
    fn test_attributes_and_classes() {
        setup();
        let span = element("span");
        set_attribute(span, "class", "toggle-slider dark");
        assert!(has_class(span, "dark"));
        assert!(!has_class(span, "light"));
        remove_attribute(span, "class");
        assert_eq!(attribute(span, "class"), None);
    }

    #[test]
    fn test_closest_and_contains() {
        setup();
        let form = element("form");
        let input = element("input");
        append_child(form, input).unwrap();

        let found = closest(input, |i| tag_name(i).as_deref() == Some("form"));
        assert_eq!(found, Some(form));
        assert!(contains(form, input));
        assert!(!contains(input, form));
    }

    #[test]
    fn test_release_counts_callbacks_once() {
        setup();
        let count = Rc::new(Cell::new(0));
        let node = element("div");
        let c = count.clone();
        on_destroy(node, move || c.set(c.get() + 1));
        release_node(node);
        release_node(node);
        assert_eq!(count.get(), 1);
    }
}
