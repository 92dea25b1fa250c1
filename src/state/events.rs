//! Events Module - Element event listeners and dispatch
//!
//! Handler registry keyed by (node index, event type).
//!
//! # API
//!
//! - `add_event_listener(i, type, fn)` - Listen for one event type on node i
//! - `dispatch_event(i, kind)` - Dispatch synchronously, bubbling UI events
//! - `on_recipe_filter_change(i, fn)` / `on_mode_change(i, fn)` - Typed listeners
//!
//! UI events (`input`, `submit`, `click`) bubble from the target to the
//! document root. Component events (`recipe-filter-change`, `mode-change`)
//! are only delivered to the element that dispatched them.
//!
//! # Example
//!
//! ```ignore
//! use spark_kitchen::state::events;
//!
//! let cleanup = events::on_mode_change(toggle_host, |scheme| {
//!     println!("now {scheme}");
//! });
//!
//! // Later
//! cleanup();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::engine::document;
use crate::types::ColorScheme;

// =============================================================================
// TYPES
// =============================================================================

/// Emitted by `wm-recipe-filter` on input and on submit.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RecipeFilterChange {
    /// Current text of the keywords input. `None` only when the input is missing.
    pub keywords: Option<String>,
}

impl RecipeFilterChange {
    pub const TYPE: &'static str = "recipe-filter-change";
}

/// Emitted by `wm-color-scheme-toggle` each time it flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSchemeToggleChange {
    pub color_scheme: ColorScheme,
}

impl ColorSchemeToggleChange {
    pub const TYPE: &'static str = "mode-change";
}

/// What happened.
#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    Input,
    Submit,
    Click,
    RecipeFilterChange(RecipeFilterChange),
    ModeChange(ColorSchemeToggleChange),
}

impl EventKind {
    /// Literal event type name listeners register for.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Submit => "submit",
            Self::Click => "click",
            Self::RecipeFilterChange(_) => RecipeFilterChange::TYPE,
            Self::ModeChange(_) => ColorSchemeToggleChange::TYPE,
        }
    }

    pub fn bubbles(&self) -> bool {
        matches!(self, Self::Input | Self::Submit | Self::Click)
    }
}

/// Event as seen by a listener.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Node the event was dispatched on.
    pub target: usize,
    /// Node whose listener is running.
    pub current_target: usize,
}

/// Listener callback.
pub type EventHandler = Rc<dyn Fn(&Event)>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct ListenerRegistry {
    listeners: HashMap<(usize, &'static str), Vec<(usize, EventHandler)>>,
    next_id: usize,
}

impl ListenerRegistry {
    fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<ListenerRegistry> = RefCell::new(ListenerRegistry::new());
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Listen for `event_type` on node `index`.
/// Listeners run in registration order.
/// Returns cleanup function.
pub fn add_event_listener<F>(index: usize, event_type: &'static str, handler: F) -> impl FnOnce()
where
    F: Fn(&Event) + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.listeners
            .entry((index, event_type))
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            let key = (index, event_type);
            if let Some(handlers) = reg.listeners.get_mut(&key) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.listeners.remove(&key);
                }
            }
        });
    }
}

/// Listen for `recipe-filter-change` on node `index`.
pub fn on_recipe_filter_change<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&RecipeFilterChange) + 'static,
{
    add_event_listener(index, RecipeFilterChange::TYPE, move |event| {
        if let EventKind::RecipeFilterChange(change) = &event.kind {
            handler(change);
        }
    })
}

/// Listen for `mode-change` on node `index`.
pub fn on_mode_change<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(ColorScheme) + 'static,
{
    add_event_listener(index, ColorSchemeToggleChange::TYPE, move |event| {
        if let EventKind::ModeChange(change) = &event.kind {
            handler(change.color_scheme);
        }
    })
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch an event on `target`, synchronously.
///
/// Bubbling events visit the target and then each ancestor. Listeners added
/// or removed while the event is being delivered to a node take effect from
/// the next node on. Returns the number of listeners invoked.
pub fn dispatch_event(target: usize, kind: EventKind) -> usize {
    let event_type = kind.type_name();
    let path: Vec<usize> = if kind.bubbles() {
        let mut path = vec![target];
        let mut current = document::parent(target);
        while let Some(node) = current {
            path.push(node);
            current = document::parent(node);
        }
        path
    } else {
        vec![target]
    };

    if !kind.bubbles() {
        tracing::debug!(target, event_type, "dispatching component event");
    }

    let mut invoked = 0;
    for current_target in path {
        let handlers: Vec<EventHandler> = REGISTRY.with(|reg| {
            reg.borrow()
                .listeners
                .get(&(current_target, event_type))
                .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
                .unwrap_or_default()
        });
        if handlers.is_empty() {
            continue;
        }

        let event = Event {
            kind: kind.clone(),
            target,
            current_target,
        };
        for handler in handlers {
            handler(&event);
            invoked += 1;
        }
    }
    invoked
}

/// Count listeners registered on a node (all types).
pub fn listener_count(index: usize) -> usize {
    REGISTRY.with(|reg| {
        reg.borrow()
            .listeners
            .iter()
            .filter(|((i, _), _)| *i == index)
            .map(|(_, handlers)| handlers.len())
            .sum()
    })
}

/// Clean up all listeners for a node index.
/// Called when the node is released so a reused index starts clean.
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().listeners.retain(|(i, _), _| *i != index);
    });
}

/// Reset event state (for testing)
pub fn reset_event_state() {
    REGISTRY.with(|reg| {
        *reg.borrow_mut() = ListenerRegistry::new();
    });
}

// =============================================================================
// TESTS
// =============================================================================
