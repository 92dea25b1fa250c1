//! Application context handed to every component.
//!
//! Holds the shared services explicitly instead of behind lazily created
//! globals: the meal planner store, the recipe repository and the active
//! color scheme. Cloning is cheap and every clone shares the same state.

use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::domain::{InMemoryRecipeRepository, MealPlanner, RecipeRepository};
use crate::types::ColorScheme;

#[derive(Clone)]
pub struct AppContext {
    meal_planner: Rc<MealPlanner>,
    recipes: Rc<dyn RecipeRepository>,
    color_scheme: Signal<ColorScheme>,
}

impl Default for AppContext {
    /// Empty meal plan over an empty catalog.
    fn default() -> Self {
        Self::new(Rc::new(InMemoryRecipeRepository::default()))
    }
}

impl AppContext {
    pub fn new(recipes: Rc<dyn RecipeRepository>) -> Self {
        Self {
            meal_planner: Rc::new(MealPlanner::new()),
            recipes,
            color_scheme: signal(ColorScheme::default()),
        }
    }

    /// Start with the given color scheme.
    pub fn with_color_scheme(self, scheme: ColorScheme) -> Self {
        self.color_scheme.set(scheme);
        self
    }

    pub fn meal_planner(&self) -> &Rc<MealPlanner> {
        &self.meal_planner
    }

    pub fn recipes(&self) -> &Rc<dyn RecipeRepository> {
        &self.recipes
    }

    /// Active application color scheme (creates reactive dependency).
    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme.get()
    }

    pub fn set_color_scheme(&self, scheme: ColorScheme) {
        if self.color_scheme.get() != scheme {
            tracing::debug!(%scheme, "color scheme changed");
            self.color_scheme.set(scheme);
        }
    }
}
