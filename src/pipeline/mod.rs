//! Pipeline - mounting the app and driving the event loop.
//!
//! ```text
//! crossterm event → input::route_event → document/state → layout → DiffRenderer
//! ```

pub mod mount;

pub use mount::{mount, run, tick, unmount, MountHandle};
