use spark_signals::effect;

use crate::context::AppContext;
use crate::domain::Recipe;
use crate::engine::{document, elements, CustomElement};

use super::{element, ensure_defined, RecipePreview};

/// View over the meal planner.
///
/// Re-renders whenever the plan changes: an empty-state block for an empty
/// plan, otherwise one compact [`RecipePreview`] per recipe in plan order.
#[derive(Clone, Debug)]
pub struct MealPlan {
    host: usize,
}

impl CustomElement for MealPlan {
    const TAG: &'static str = "wm-meal-plan";

    fn create(host: usize, ctx: &AppContext) -> Self {
        ensure_defined::<RecipePreview>();

        let recipes = ctx.meal_planner().recipes();
        let child_ctx = ctx.clone();
        let stop = effect(move || {
            let snapshot = recipes.get();
            tracing::trace!(host, count = snapshot.len(), "rendering meal plan");
            document::clear_children(host);
            if snapshot.is_empty() {
                render_empty(host);
            } else {
                render_list(host, &snapshot, &child_ctx);
            }
        });
        document::on_destroy(host, stop);

        Self { host }
    }
}

impl MealPlan {
    pub fn host(&self) -> usize {
        self.host
    }
}

fn render_empty(host: usize) {
    let icon = element("div")
        .class("empty-message-icon")
        .text("🍽️")
        .build();
    let line_break = element("br").build();
    let text = element("div")
        .class("empty-message-text")
        .text("Your meal plan is empty.")
        .child(line_break)
        .text("Add recipes to get started!")
        .build();
    element("div")
        .class("empty-message")
        .child(icon)
        .child(text)
        .append_to(host);
}

fn render_list(host: usize, recipes: &[Recipe], ctx: &AppContext) {
    let list = element("ul").class("meal-plan-list").append_to(host);
    for recipe in recipes {
        let preview = elements::create_element(RecipePreview::TAG, ctx);
        document::set_attribute(preview, "mode", "compact");
        if let Some(component) = elements::instance::<RecipePreview>(preview) {
            component.set_recipe(recipe.clone());
        }
        element("li").child(preview).append_to(list);
    }
}
