//! # spark-kitchen
//!
//! Reactive recipe browser and meal planner for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Components are custom elements that render into a thread-local document
//! tree. Nodes are indices into an arena, and a component is upgraded onto
//! the node created for its tag. State flows in one direction:
//!
//! ```text
//! key press → event listener → state (MealPlanner / signals) → effect re-renders → DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Colors, text attributes, color scheme, roles
//! - [`engine`] - Document tree and custom element registry
//! - [`state`] - Events, focus, keyboard input
//! - [`domain`] - Recipes, recipe repository, meal planner store
//! - [`components`] - The kitchen custom elements
//! - [`renderer`] - Text layout and differential terminal output
//! - [`pipeline`] - Mount and event loop
//! - [`testing`] - Mounting, page locators and fixtures for tests

pub mod components;
pub mod config;
pub mod context;
pub mod domain;
pub mod engine;
pub mod error;
pub mod observability;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod testing;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use components::{
    define_all, ColorSchemeToggle, CustomElement, KitchenApp, MealPlan, PreviewMode,
    RecipeFilter, RecipePreview, RecipeSearch,
};
pub use config::Config;
pub use context::AppContext;
pub use domain::{
    Ingredient, InMemoryRecipeRepository, MealPlanner, Recipe, RecipeRepository, RecipesView,
    Snapshot,
};
pub use error::{Error, Result};
pub use pipeline::{mount, run, tick, unmount, MountHandle};
