//! Recipe Repository - Source of the recipes the browser lists.

use std::fmt;

use super::recipe::{Ingredient, Recipe};

/// Where recipes come from.
pub trait RecipeRepository {
    /// Recipes whose name contains `keywords` (case-insensitive), in catalog
    /// order. `None` or blank keywords return every recipe.
    fn search_recipes(&self, keywords: Option<&str>) -> Vec<Recipe>;
}

/// Fixed in-memory catalog.
#[derive(Clone, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Vec<Recipe>,
}

impl fmt::Debug for InMemoryRecipeRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRecipeRepository")
            .field("recipes", &self.recipes.len())
            .finish()
    }
}

impl InMemoryRecipeRepository {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Catalog used when the configuration lists no recipes.
    pub fn with_sample_catalog() -> Self {
        Self::new(sample_catalog())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeRepository for InMemoryRecipeRepository {
    fn search_recipes(&self, keywords: Option<&str>) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.matches_keywords(keywords))
            .cloned()
            .collect()
    }
}

fn sample_catalog() -> Vec<Recipe> {
    let ingredient = |name: &str, quantity: f64, unit: &str| Ingredient {
        name: name.to_string(),
        quantity: Some(quantity),
        unit: Some(unit.to_string()),
    };

    vec![
        Recipe {
            id: "rec_burger".into(),
            name: "Burger".into(),
            description: Some("A juicy beef burger with cheddar.".into()),
            picture_uri: None,
            ingredients: vec![
                ingredient("Ground beef", 150.0, "g"),
                ingredient("Burger bun", 1.0, "pc"),
                ingredient("Cheddar", 30.0, "g"),
            ],
        },
        Recipe {
            id: "rec_salad".into(),
            name: "Salad".into(),
            description: Some("Crunchy greens with a lemon dressing.".into()),
            picture_uri: None,
            ingredients: vec![
                ingredient("Lettuce", 100.0, "g"),
                ingredient("Lemon juice", 15.0, "ml"),
            ],
        },
        Recipe {
            id: "rec_beer".into(),
            name: "Beer".into(),
            description: Some("Cold, obviously.".into()),
            picture_uri: None,
            ingredients: vec![ingredient("Beer", 330.0, "ml")],
        },
    ]
}
