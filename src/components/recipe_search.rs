use spark_signals::{derived, effect, signal, Signal};

use crate::context::AppContext;
use crate::domain::Recipe;
use crate::engine::{document, elements, CustomElement};
use crate::state::events;

use super::{element, ensure_defined, RecipeFilter, RecipePreview};

/// Recipe browser: a [`RecipeFilter`] above the matching recipes.
///
/// Every `recipe-filter-change` re-queries the repository. Each result has
/// an "Add" button that appends the recipe to the meal plan.
#[derive(Clone)]
pub struct RecipeSearch {
    host: usize,
    keywords: Signal<Option<String>>,
}

impl CustomElement for RecipeSearch {
    const TAG: &'static str = "wm-recipe-search";

    fn create(host: usize, ctx: &AppContext) -> Self {
        ensure_defined::<RecipeFilter>();
        ensure_defined::<RecipePreview>();

        let keywords: Signal<Option<String>> = signal(None);

        let filter = elements::create_element(RecipeFilter::TAG, ctx);
        super::append(host, filter);
        let list = element("ul").class("recipe-list").append_to(host);

        let k = keywords.clone();
        let _ = events::on_recipe_filter_change(filter, move |change| {
            if k.get() != change.keywords {
                k.set(change.keywords.clone());
            }
        });

        let repository = ctx.recipes().clone();
        let k = keywords.clone();
        let results = derived(move || repository.search_recipes(k.get().as_deref()));

        let child_ctx = ctx.clone();
        let stop = effect(move || {
            let recipes = results.get();
            tracing::trace!(host, count = recipes.len(), "rendering search results");
            document::clear_children(list);
            for recipe in recipes {
                render_item(list, recipe, &child_ctx);
            }
        });
        document::on_destroy(host, stop);

        Self { host, keywords }
    }
}

impl RecipeSearch {
    pub fn host(&self) -> usize {
        self.host
    }

    /// Keywords of the last filter change.
    pub fn keywords(&self) -> Option<String> {
        self.keywords.get()
    }
}

fn render_item(list: usize, recipe: Recipe, ctx: &AppContext) {
    let preview = elements::create_element(RecipePreview::TAG, ctx);
    document::set_attribute(preview, "mode", "compact");
    if let Some(component) = elements::instance::<RecipePreview>(preview) {
        component.set_recipe(recipe.clone());
    }

    let add = element("button").class("add").text("Add").build();
    let planner = ctx.meal_planner().clone();
    let _ = events::add_event_listener(add, "click", move |_| {
        planner.add_recipe(recipe.clone());
    });

    element("li")
        .class("recipe-item")
        .child(preview)
        .child(add)
        .append_to(list);
}
