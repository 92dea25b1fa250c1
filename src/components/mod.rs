//! Kitchen components - custom elements of the recipe browser.
//!
//! - [`RecipeFilter`] (`wm-recipe-filter`) - keyword input, emits `recipe-filter-change`
//! - [`ColorSchemeToggle`] (`wm-color-scheme-toggle`) - light/dark switch, emits `mode-change`
//! - [`RecipePreview`] (`wm-recipe-preview`) - one recipe, compact or full
//! - [`MealPlan`] (`wm-meal-plan`) - view over the meal planner store
//! - [`RecipeSearch`] (`wm-recipe-search`) - filter plus matching recipes
//! - [`KitchenApp`] (`wm-kitchen-app`) - application shell
//!
//! Each component renders into its host node when created and registers
//! the custom elements it uses itself, so mounting a component only needs
//! that component to be defined.

mod color_scheme_toggle;
mod kitchen_app;
mod meal_plan;
mod recipe_filter;
mod recipe_preview;
mod recipe_search;

pub use color_scheme_toggle::ColorSchemeToggle;
pub use kitchen_app::KitchenApp;
pub use meal_plan::MealPlan;
pub use recipe_filter::RecipeFilter;
pub use recipe_preview::{PreviewMode, RecipePreview};
pub use recipe_search::RecipeSearch;

pub use crate::engine::CustomElement;

use crate::engine::{document, elements};
use crate::error::Result;

/// Define every built-in component.
pub fn define_all() -> Result<()> {
    elements::define::<RecipeFilter>()?;
    elements::define::<ColorSchemeToggle>()?;
    elements::define::<RecipePreview>()?;
    elements::define::<MealPlan>()?;
    elements::define::<RecipeSearch>()?;
    elements::define::<KitchenApp>()?;
    Ok(())
}

/// Define a component a parent renders. Conflicts are logged, not fatal:
/// the child then renders as a plain element.
pub(crate) fn ensure_defined<C: CustomElement>() {
    if let Err(err) = elements::define::<C>() {
        tracing::warn!(%err, tag = C::TAG, "child element unavailable");
    }
}

// =============================================================================
// Element builder
// =============================================================================

/// Small helper for building plain element subtrees.
pub(crate) struct ElementBuilder {
    index: usize,
}

/// Start a plain element.
pub(crate) fn element(tag: &str) -> ElementBuilder {
    ElementBuilder {
        index: document::create_node(tag),
    }
}

impl ElementBuilder {
    pub(crate) fn attr(self, name: &str, value: &str) -> Self {
        document::set_attribute(self.index, name, value);
        self
    }

    pub(crate) fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub(crate) fn text(self, text: &str) -> Self {
        let node = document::create_text_node(text);
        append(self.index, node);
        self
    }

    pub(crate) fn child(self, child: usize) -> Self {
        append(self.index, child);
        self
    }

    pub(crate) fn append_to(self, parent: usize) -> usize {
        append(parent, self.index);
        self.index
    }

    pub(crate) fn build(self) -> usize {
        self.index
    }
}

/// Append, logging instead of failing. Component code only appends nodes it
/// just created to live parents.
pub(crate) fn append(parent: usize, child: usize) {
    if let Err(err) = document::append_child(parent, child) {
        tracing::warn!(%err, parent, child, "append failed");
    }
}
