//! Kitchen domain: recipes, the recipe repository and the meal planner store.

pub mod meal_planner;
pub mod recipe;
pub mod repository;

pub use meal_planner::{MealPlanner, RecipesView, Snapshot};
pub use recipe::{Ingredient, Recipe};
pub use repository::{InMemoryRecipeRepository, RecipeRepository};
