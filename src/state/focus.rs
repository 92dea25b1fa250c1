//! Focus System - Keyboard navigation and focus state
//!
//! Manages focus state and navigation:
//! - `focused` signal (currently focused node)
//! - Focus cycling (Tab/Shift+Tab) over text boxes and buttons in document order
//!
//! # Example
//!
//! ```ignore
//! use spark_kitchen::state::focus;
//!
//! focus::focus_next();
//! focus::focus_previous();
//! focus::focus(input_index);
//! ```

use spark_signals::{peek, signal, Signal};

use crate::engine::document;
use crate::types::Role;

// =============================================================================
// FOCUSED INDEX SIGNAL
// =============================================================================

thread_local! {
    static FOCUSED_INDEX: Signal<Option<usize>> = signal(None);
}

/// Currently focused node, if any. Does not create a reactive dependency,
/// so nodes can be released inside effects.
pub fn focused() -> Option<usize> {
    peek(track_focused)
}

/// Currently focused node (creates reactive dependency).
pub fn track_focused() -> Option<usize> {
    FOCUSED_INDEX.with(|s| s.get())
}

/// Check if a specific node is focused
pub fn is_focused(index: usize) -> bool {
    focused() == Some(index)
}

fn set_focused(index: Option<usize>) {
    if focused() != index {
        FOCUSED_INDEX.with(|s| s.set(index));
    }
}

// =============================================================================
// FOCUSABLE QUERIES
// =============================================================================

/// Check whether a node can take focus (text boxes and buttons).
pub fn is_focusable(index: usize) -> bool {
    matches!(document::role(index), Some(Role::TextBox | Role::Button))
        && document::attribute(index, "disabled").is_none()
}

/// All focusable nodes under the body, in document order.
pub fn focusable_indices() -> Vec<usize> {
    document::descendants(document::body())
        .into_iter()
        .filter(|&i| is_focusable(i))
        .collect()
}

// =============================================================================
// FOCUS NAVIGATION
// =============================================================================

fn find_next_focusable(from: Option<usize>, forward: bool) -> Option<usize> {
    let focusables = focusable_indices();
    if focusables.is_empty() {
        return None;
    }

    let position = from.and_then(|current| focusables.iter().position(|&i| i == current));
    let len = focusables.len();
    let next = match (position, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(pos), true) => (pos + 1) % len,
        (Some(pos), false) => (pos + len - 1) % len,
    };
    Some(focusables[next])
}

/// Move focus to next focusable node
pub fn focus_next() -> bool {
    let current = focused();
    match find_next_focusable(current, true) {
        Some(next) if Some(next) != current => {
            set_focused(Some(next));
            true
        }
        _ => false,
    }
}

/// Move focus to previous focusable node
pub fn focus_previous() -> bool {
    let current = focused();
    match find_next_focusable(current, false) {
        Some(prev) if Some(prev) != current => {
            set_focused(Some(prev));
            true
        }
        _ => false,
    }
}

/// Focus a specific node by index
pub fn focus(index: usize) -> bool {
    if is_focusable(index) {
        set_focused(Some(index));
        return true;
    }
    false
}

/// Focus the first focusable node
pub fn focus_first() -> bool {
    focusable_indices().first().is_some_and(|&i| focus(i))
}

/// Clear focus
pub fn blur() {
    set_focused(None);
}

/// Drop focus from a released node.
pub(crate) fn release(index: usize) {
    if is_focused(index) {
        set_focused(None);
    }
}

// =============================================================================
// RESET (for testing)
// =============================================================================

/// Reset all focus state (for testing)
pub fn reset_focus_state() {
    set_focused(None);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::document::{append_child, body, create_node, release_node, reset_document, set_attribute};

    fn setup() -> (usize, usize, usize) {
        reset_document();
        reset_focus_state();
        let root = body();
        let input = create_node("input");
        let div = create_node("div");
        let button = create_node("button");
        append_child(root, input).unwrap();
        append_child(root, div).unwrap();
        append_child(root, button).unwrap();
        (input, div, button)
    }

    #[test]
    fn test_focusable_in_document_order() {
        let (input, _, button) = setup();
        assert_eq!(focusable_indices(), vec![input, button]);
    }

    #[test]
    fn test_focus_cycles() {
        let (input, _, button) = setup();
        assert!(focus_next());
        assert_eq!(focused(), Some(input));
        assert!(focus_next());
        assert_eq!(focused(), Some(button));
        assert!(focus_next());
        assert_eq!(focused(), Some(input));
        assert!(focus_previous());
        assert_eq!(focused(), Some(button));
    }

    #[test]
    fn test_focus_rejects_plain_elements() {
        let (_, div, button) = setup();
        assert!(!focus(div));
        set_attribute(button, "disabled", "");
        assert!(!focus(button));
        assert_eq!(focused(), None);
    }

    #[test]
    fn test_untracked_read_does_not_subscribe() {
        use spark_signals::effect;
        use std::cell::Cell;
        use std::rc::Rc;

        let (input, _, button) = setup();
        let untracked = Rc::new(Cell::new(0));
        let tracked = Rc::new(Cell::new(0));
        let u = untracked.clone();
        let t = tracked.clone();

        let _a = effect(move || {
            let _ = focused();
            u.set(u.get() + 1);
        });
        let _b = effect(move || {
            let _ = track_focused();
            t.set(t.get() + 1);
        });

        assert!(focus(input));
        assert!(focus(button));
        assert_eq!(untracked.get(), 1);
        assert_eq!(tracked.get(), 3);
    }

    #[test]
    fn test_release_clears_focus() {
        let (input, _, _) = setup();
        assert!(focus(input));
        release_node(input);
        assert_eq!(focused(), None);
    }
}
