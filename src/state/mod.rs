//! State Module - Runtime state management systems
//!
//! - **Events** - DOM-style listeners, typed component events, bubbling dispatch
//! - **Focus** - Tab cycling over text boxes and buttons
//! - **Input** - crossterm key conversion and routing to the focused node

pub mod events;
pub mod focus;
pub mod input;

pub use events::{
    add_event_listener, dispatch_event, on_mode_change, on_recipe_filter_change,
    reset_event_state, ColorSchemeToggleChange, Event, EventKind, RecipeFilterChange,
};
pub use focus::{blur, focus, focus_first, focus_next, focus_previous, focused, reset_focus_state};
pub use input::{KeyboardEvent, Modifiers, Routed};
