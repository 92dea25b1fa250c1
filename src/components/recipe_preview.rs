use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use crate::context::AppContext;
use crate::domain::Recipe;
use crate::engine::{document, CustomElement};

use super::element;

/// How much of a recipe a preview shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PreviewMode {
    /// Name only.
    Compact,
    /// Name, description and ingredients.
    #[default]
    Full,
}

/// One recipe, rendered from the `recipe` property and the `mode` attribute.
#[derive(Clone)]
pub struct RecipePreview {
    host: usize,
    recipe: Rc<RefCell<Option<Recipe>>>,
}

impl CustomElement for RecipePreview {
    const TAG: &'static str = "wm-recipe-preview";
    const OBSERVED_ATTRIBUTES: &'static [&'static str] = &["mode"];

    fn create(host: usize, _ctx: &AppContext) -> Self {
        Self {
            host,
            recipe: Rc::new(RefCell::new(None)),
        }
    }

    fn attribute_changed(&self, _name: &str, _value: Option<&str>) {
        self.render();
    }
}

impl RecipePreview {
    pub fn host(&self) -> usize {
        self.host
    }

    pub fn recipe(&self) -> Option<Recipe> {
        self.recipe.borrow().clone()
    }

    pub fn set_recipe(&self, recipe: Recipe) {
        *self.recipe.borrow_mut() = Some(recipe);
        self.render();
    }

    pub fn mode(&self) -> PreviewMode {
        document::attribute(self.host, "mode")
            .and_then(|mode| PreviewMode::from_str(&mode).ok())
            .unwrap_or_default()
    }

    fn render(&self) {
        document::clear_children(self.host);
        let recipe = self.recipe.borrow();
        let Some(recipe) = recipe.as_ref() else {
            return;
        };

        element("h2").text(&recipe.name).append_to(self.host);
        if self.mode() == PreviewMode::Compact {
            return;
        }

        if let Some(description) = &recipe.description {
            element("p")
                .class("description")
                .text(description)
                .append_to(self.host);
        }
        if !recipe.ingredients.is_empty() {
            let list = element("ul").class("ingredients").append_to(self.host);
            for ingredient in &recipe.ingredients {
                element("li").text(&ingredient.label()).append_to(list);
            }
        }
    }
}
