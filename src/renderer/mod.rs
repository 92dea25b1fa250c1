//! Terminal renderer.
//!
//! - [`layout`] - document tree to styled lines
//! - [`diff`] - row-level differential output through crossterm

pub mod diff;
pub mod layout;

pub use diff::DiffRenderer;
pub use layout::{layout, render_text, Line, Span, Tone};
