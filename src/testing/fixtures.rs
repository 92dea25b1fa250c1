use std::cell::{Cell, RefCell};

use crate::domain::{Ingredient, Recipe, RecipeRepository};

thread_local! {
    static NEXT_ID: Cell<usize> = const { Cell::new(1) };
}

fn next_id() -> String {
    NEXT_ID.with(|id| {
        let current = id.get();
        id.set(current + 1);
        format!("rec_{current}")
    })
}

pub(super) fn reset_ids() {
    NEXT_ID.with(|id| id.set(1));
}

/// Object mother for recipes.
///
/// ```ignore
/// let burger = RecipeMother::with_basic_info("Burger").build();
/// ```
#[derive(Debug, Clone)]
pub struct RecipeMother {
    recipe: Recipe,
}

impl RecipeMother {
    /// A recipe with a fresh id and the given name.
    pub fn with_basic_info(name: &str) -> Self {
        Self {
            recipe: Recipe::new(next_id(), name),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.recipe.description = Some(description.to_string());
        self
    }

    pub fn with_ingredient(mut self, name: &str) -> Self {
        self.recipe.ingredients.push(Ingredient::new(name));
        self
    }

    pub fn build(self) -> Recipe {
        self.recipe
    }
}

/// Recipe repository whose catalog tests set directly.
#[derive(Debug, Default)]
pub struct RecipeRepositoryFake {
    recipes: RefCell<Vec<Recipe>>,
}

impl RecipeRepositoryFake {
    /// Replace the catalog.
    pub fn configure(&self, recipes: Vec<Recipe>) {
        *self.recipes.borrow_mut() = recipes;
    }
}

impl RecipeRepository for RecipeRepositoryFake {
    fn search_recipes(&self, keywords: Option<&str>) -> Vec<Recipe> {
        self.recipes
            .borrow()
            .iter()
            .filter(|recipe| recipe.matches_keywords(keywords))
            .cloned()
            .collect()
    }
}
