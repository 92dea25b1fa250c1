//! Input Module - Key conversion, polling and routing
//!
//! Bridges crossterm's event system with the document:
//! - printable keys and Backspace edit the focused text box and dispatch `input`
//! - Enter submits the text box's form or clicks the focused button
//! - Tab / Shift+Tab move focus
//! - Escape and Ctrl+C ask the event loop to quit
//!
//! # Example
//!
//! ```ignore
//! use spark_kitchen::state::input::{poll_event, route_event, Routed};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         if route_event(event) == Routed::Quit {
//!             break;
//!         }
//!     }
//! }
//! ```

use crossterm::event::{
    poll, read, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers,
};
use std::time::Duration;

use super::events::{self, EventKind};
use super::focus;
use crate::engine::document;
use crate::types::Role;

// =============================================================================
// TYPES
// =============================================================================

/// Key state (press, repeat, release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Modifier keys state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// Keyboard event with DOM-style key names (`"a"`, `"Enter"`, `"Tab"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Key press without modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Unified event type for the event loop
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyboardEvent),
    /// Terminal resize (new width, height)
    Resize(u16, u16),
    None,
}

/// What routing an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Handled,
    Ignored,
    /// The user asked to leave.
    Quit,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    let mut modifiers = convert_modifiers(event.modifiers);
    if event.code == KeyCode::BackTab {
        modifiers.shift = true;
    }

    KeyboardEvent {
        key,
        modifiers,
        state,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(InputEvent::Key(convert_key_event(key))),
        CrosstermEvent::Resize(w, h) => Ok(InputEvent::Resize(w, h)),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route an event. Resizes only need a redraw, which the loop does anyway.
pub fn route_event(event: InputEvent) -> Routed {
    match event {
        InputEvent::Key(key) => route_key(&key),
        InputEvent::Resize(_, _) | InputEvent::None => Routed::Ignored,
    }
}

/// Route a key press to the focused node.
pub fn route_key(event: &KeyboardEvent) -> Routed {
    if event.state == KeyState::Release {
        return Routed::Ignored;
    }
    if event.key == "Escape" || (event.modifiers.ctrl && event.key == "c") {
        return Routed::Quit;
    }
    if event.key == "Tab" {
        let moved = if event.modifiers.shift {
            focus::focus_previous()
        } else {
            focus::focus_next()
        };
        return if moved { Routed::Handled } else { Routed::Ignored };
    }

    let Some(target) = focus::focused() else {
        return Routed::Ignored;
    };
    match (document::role(target), event.key.as_str()) {
        (Some(Role::TextBox), "Enter") => submit_form_of(target),
        (Some(Role::TextBox), "Backspace") => {
            let mut value = document::value(target).unwrap_or_default();
            if value.pop().is_none() {
                return Routed::Ignored;
            }
            edit(target, value)
        }
        (Some(Role::TextBox), key) if is_printable(event, key) => {
            let mut value = document::value(target).unwrap_or_default();
            value.push_str(key);
            edit(target, value)
        }
        (Some(Role::Button), "Enter" | " ") => {
            events::dispatch_event(target, EventKind::Click);
            Routed::Handled
        }
        _ => Routed::Ignored,
    }
}

fn is_printable(event: &KeyboardEvent, key: &str) -> bool {
    !event.modifiers.ctrl && !event.modifiers.alt && key.chars().count() == 1
}

fn edit(target: usize, value: String) -> Routed {
    document::set_value(target, value);
    events::dispatch_event(target, EventKind::Input);
    Routed::Handled
}

fn submit_form_of(target: usize) -> Routed {
    let form = document::closest(target, |i| document::role(i) == Some(Role::Form));
    match form {
        Some(form) => {
            events::dispatch_event(form, EventKind::Submit);
            Routed::Handled
        }
        None => Routed::Ignored,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::document::{
        append_child, body, create_node, reset_document, value,
    };
    use crate::state::events::{add_event_listener, reset_event_state};
    use crate::state::focus::{focus, focused, reset_focus_state};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyboardEvent {
        convert_key_event(CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        })
    }

    /// body > form > [input, button]
    fn setup() -> (usize, usize, usize) {
        reset_document();
        reset_event_state();
        reset_focus_state();
        let form = create_node("form");
        let input = create_node("input");
        let button = create_node("button");
        append_child(body(), form).unwrap();
        append_child(form, input).unwrap();
        append_child(form, button).unwrap();
        (form, input, button)
    }

    fn record(index: usize, event_type: &'static str) -> Rc<RefCell<usize>> {
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let _ = add_event_listener(index, event_type, move |_| *c.borrow_mut() += 1);
        count
    }

    #[test]
    fn test_convert_key_char() {
        let event = press(KeyCode::Char('a'), KeyModifiers::empty());
        assert_eq!(event.key, "a");
        assert_eq!(event.state, KeyState::Press);
        assert!(!event.modifiers.ctrl);
    }

    #[test]
    fn test_convert_back_tab_is_shift_tab() {
        let event = press(KeyCode::BackTab, KeyModifiers::empty());
        assert_eq!(event.key, "Tab");
        assert!(event.modifiers.shift);
    }

    #[test]
    fn test_convert_key_with_ctrl() {
        let event = press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(event.key, "c");
        assert!(event.modifiers.ctrl);
        assert!(!event.modifiers.alt);
    }

    #[test]
    fn test_quit_keys() {
        setup();
        assert_eq!(route_key(&KeyboardEvent::new("Escape")), Routed::Quit);
        assert_eq!(
            route_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Routed::Quit
        );
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert_eq!(
            route_key(&KeyboardEvent::new("c").with_modifiers(ctrl)),
            Routed::Quit
        );
    }

    #[test]
    fn test_tab_moves_focus() {
        let (_, input, button) = setup();
        assert_eq!(route_key(&KeyboardEvent::new("Tab")), Routed::Handled);
        assert_eq!(focused(), Some(input));
        route_key(&KeyboardEvent::new("Tab"));
        assert_eq!(focused(), Some(button));
        route_key(&press(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(focused(), Some(input));
    }

    #[test]
    fn test_typing_edits_focused_input() {
        let (form, input, _) = setup();
        let inputs = record(form, "input");
        focus(input);

        for key in ["b", "u", "r", "x"] {
            route_key(&KeyboardEvent::new(key));
        }
        route_key(&KeyboardEvent::new("Backspace"));

        assert_eq!(value(input).as_deref(), Some("bur"));
        assert_eq!(*inputs.borrow(), 5);
    }

    #[test]
    fn test_backspace_on_empty_input_is_ignored() {
        let (_, input, _) = setup();
        focus(input);
        assert_eq!(route_key(&KeyboardEvent::new("Backspace")), Routed::Ignored);
    }

    #[test]
    fn test_enter_submits_form() {
        let (form, input, _) = setup();
        let submits = record(form, "submit");
        focus(input);
        assert_eq!(route_key(&KeyboardEvent::new("Enter")), Routed::Handled);
        assert_eq!(*submits.borrow(), 1);
    }

    #[test]
    fn test_enter_clicks_button() {
        let (_, _, button) = setup();
        let clicks = record(button, "click");
        focus(button);
        route_key(&KeyboardEvent::new("Enter"));
        route_key(&KeyboardEvent::new(" "));
        assert_eq!(*clicks.borrow(), 2);
    }

    #[test]
    fn test_without_focus_keys_are_ignored() {
        setup();
        assert_eq!(route_key(&KeyboardEvent::new("a")), Routed::Ignored);
        assert_eq!(route_event(InputEvent::Resize(80, 24)), Routed::Ignored);
    }
}
