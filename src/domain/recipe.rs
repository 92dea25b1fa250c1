use serde::Deserialize;

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }

    /// Display form, e.g. `200 g Flour` or `Salt`.
    pub fn label(&self) -> String {
        match (self.quantity, self.unit.as_deref()) {
            (Some(quantity), Some(unit)) => format!("{quantity} {unit} {}", self.name),
            (Some(quantity), None) => format!("{quantity} {}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// A recipe as shown by the browser and stored in the meal plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub picture_uri: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            picture_uri: None,
            ingredients: Vec::new(),
        }
    }

    /// Case-insensitive substring match on the name.
    /// Missing or blank keywords match every recipe.
    pub fn matches_keywords(&self, keywords: Option<&str>) -> bool {
        match keywords.map(str::trim) {
            None | Some("") => true,
            Some(keywords) => self
                .name
                .to_lowercase()
                .contains(&keywords.to_lowercase()),
        }
    }
}
