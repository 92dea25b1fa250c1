//! Mount API - Application lifecycle and render effect.
//!
//! Mounting puts a `wm-kitchen-app` into the document body, switches the
//! terminal to the alternate screen and draws the document. The document
//! itself is not reactive, so the screen is redrawn after every routed input
//! event. A render effect additionally redraws when the color scheme or the
//! focused node changes.
//!
//! # Example
//!
//! ```ignore
//! use spark_kitchen::pipeline::mount;
//!
//! let handle = mount::mount(&ctx)?;
//!
//! // Option 1: Run blocking event loop
//! mount::run(&handle)?;
//!
//! // Option 2: Tick manually in your own loop
//! while mount::tick(&handle)? {
//!     // Your logic here
//! }
//!
//! handle.unmount();
//! ```

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use spark_signals::effect;

use crate::components::{self, CustomElement, KitchenApp};
use crate::context::AppContext;
use crate::engine::{document, elements};
use crate::error::Result;
use crate::renderer::{layout, DiffRenderer};
use crate::state::{focus, input};
use crate::theme::palette;

// =============================================================================
// Screen
// =============================================================================

/// Output side of a mounted app.
struct Screen {
    root: usize,
    renderer: DiffRenderer,
    out: Box<dyn Write>,
    height: u16,
}

impl Screen {
    fn draw(&mut self, ctx: &AppContext) -> io::Result<bool> {
        let lines = layout(self.root);
        let palette = palette(ctx.color_scheme());
        self.renderer
            .render(&mut self.out, &lines, &palette, self.height)
    }

    fn resize(&mut self, height: u16) {
        self.height = height;
        self.renderer.invalidate();
    }
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that allows unmounting.
///
/// Holds:
/// - The mounted app node
/// - The render effect stop function
/// - The running flag (set to false on Escape/Ctrl+C or `stop()`)
pub struct MountHandle {
    ctx: AppContext,
    root: usize,
    screen: Rc<RefCell<Screen>>,
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    terminal_active: bool,
}

impl MountHandle {
    /// Mount the app and draw into `out` without touching terminal modes.
    pub fn with_writer(ctx: &AppContext, out: Box<dyn Write>, height: u16) -> Result<Self> {
        components::define_all()?;

        let root = elements::create_element(KitchenApp::TAG, ctx);
        document::append_child(document::body(), root)?;
        focus::focus_first();
        tracing::debug!(root, height, "app mounted");

        let screen = Rc::new(RefCell::new(Screen {
            root,
            renderer: DiffRenderer::new(),
            out,
            height,
        }));

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let effect_screen = screen.clone();
        let effect_ctx = ctx.clone();
        let stop = effect(move || {
            // Dependencies: color scheme and focus
            let _ = effect_ctx.color_scheme();
            let _ = focus::track_focused();
            if !running_clone.load(Ordering::SeqCst) {
                return;
            }
            // Skipped when a redraw is already in progress; that redraw
            // sees the new state.
            if let Ok(mut screen) = effect_screen.try_borrow_mut() {
                if let Err(err) = screen.draw(&effect_ctx) {
                    tracing::warn!(%err, "render failed");
                }
            }
        });

        Ok(Self {
            ctx: ctx.clone(),
            root,
            screen,
            stop_effect: Some(Box::new(stop)),
            running,
            terminal_active: false,
        })
    }

    /// The mounted `wm-kitchen-app` node.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the application (sets running to false).
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Draw changed rows now.
    pub fn redraw(&self) -> Result<bool> {
        Ok(self.screen.borrow_mut().draw(&self.ctx)?)
    }

    /// Route one input event and redraw.
    pub fn handle(&self, event: input::InputEvent) -> Result<()> {
        if let input::InputEvent::Resize(_, height) = event {
            self.screen.borrow_mut().resize(height);
        }
        if input::route_event(event) == input::Routed::Quit {
            tracing::debug!("quit requested");
            self.stop();
            return Ok(());
        }
        self.redraw()?;
        Ok(())
    }

    /// Stop the render effect, remove the app and restore the terminal.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(stop) = self.stop_effect.take() {
            stop();
            document::release_node(self.root);
            tracing::debug!(root = self.root, "app unmounted");
        }
        if self.terminal_active {
            self.terminal_active = false;
            let _ = restore_terminal();
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        // Best effort
        self.teardown();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the application in the terminal.
///
/// This sets up:
/// 1. Raw mode, alternate screen, hidden cursor
/// 2. The app node in the document body, with the first control focused
/// 3. The render effect
pub fn mount(ctx: &AppContext) -> Result<MountHandle> {
    let (_, height) = terminal::size()?;
    enable_raw_mode()?;
    if let Err(err) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }

    match MountHandle::with_writer(ctx, Box::new(io::stdout()), height) {
        Ok(mut handle) => {
            handle.terminal_active = true;
            Ok(handle)
        }
        Err(err) => {
            let _ = restore_terminal();
            Err(err)
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once.
///
/// Returns `Ok(false)` if the application should stop running.
pub fn tick(handle: &MountHandle) -> Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    // Poll with short timeout (~60fps)
    if let Some(event) = input::poll_event(Duration::from_millis(16))? {
        handle.handle(event)?;
    }

    Ok(handle.is_running())
}

/// Run the event loop (blocking until stopped).
pub fn run(handle: &MountHandle) -> Result<()> {
    while tick(handle)? {}
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InMemoryRecipeRepository;
    use crate::engine::reset_elements;
    use crate::state::events::reset_event_state;
    use crate::state::focus::reset_focus_state;
    use crate::state::input::{InputEvent, KeyboardEvent};
    use crate::types::ColorScheme;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn take(&self) -> String {
            String::from_utf8_lossy(&std::mem::take(&mut *self.0.borrow_mut())).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn setup() -> (AppContext, MountHandle, SharedBuffer) {
        document::reset_document();
        reset_elements();
        reset_event_state();
        reset_focus_state();
        let ctx = AppContext::new(Rc::new(InMemoryRecipeRepository::with_sample_catalog()));
        let buffer = SharedBuffer::default();
        let handle = MountHandle::with_writer(&ctx, Box::new(buffer.clone()), 40).unwrap();
        (ctx, handle, buffer)
    }

    fn key(k: &str) -> InputEvent {
        InputEvent::Key(KeyboardEvent::new(k))
    }

    #[test]
    fn test_mount_draws_app() {
        let (_, handle, buffer) = setup();
        let out = buffer.take();
        assert!(out.contains("Meal Planner"));
        assert!(out.contains("Burger"));
        assert!(out.contains("Your meal plan is empty."));
        assert_eq!(document::children(document::body()), vec![handle.root()]);
    }

    #[test]
    fn test_first_control_is_focused() {
        let (ctx, handle, _) = setup();
        handle.handle(key("Enter")).unwrap();
        // The toggle button comes first
        assert_eq!(ctx.color_scheme(), ColorScheme::Dark);
    }

    #[test]
    fn test_typing_filters_and_redraws() {
        let (_, handle, buffer) = setup();
        handle.handle(key("Tab")).unwrap();
        buffer.take();
        for k in ["b", "u", "r"] {
            handle.handle(key(k)).unwrap();
        }
        let out = buffer.take();
        assert!(out.contains("[bur]"));
        assert!(!crate::renderer::render_text(handle.root()).contains("Salad"));
    }

    #[test]
    fn test_escape_stops() {
        let (_, handle, _) = setup();
        assert!(handle.is_running());
        handle.handle(key("Escape")).unwrap();
        assert!(!handle.is_running());
        assert!(!tick(&handle).unwrap());
    }

    #[test]
    fn test_unmount_releases_app() {
        let (ctx, handle, buffer) = setup();
        let root = handle.root();
        handle.unmount();
        assert!(!document::is_allocated(root));
        assert!(document::children(document::body()).is_empty());

        buffer.take();
        ctx.set_color_scheme(ColorScheme::Dark);
        assert!(buffer.take().is_empty());
    }
}
