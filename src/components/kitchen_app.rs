use crate::context::AppContext;
use crate::engine::{document, elements, CustomElement};
use crate::state::events;

use super::{element, ensure_defined, ColorSchemeToggle, MealPlan, RecipeSearch};

/// Application shell.
///
/// ```text
/// header   h1 "Meal Planner" + wm-color-scheme-toggle
/// main     wm-recipe-search
/// aside    wm-meal-plan
/// ```
///
/// Listens for `mode-change` on the toggle and stores the scheme in the
/// context, where the renderer picks it up.
#[derive(Clone, Debug)]
pub struct KitchenApp {
    host: usize,
    toggle: usize,
}

impl CustomElement for KitchenApp {
    const TAG: &'static str = "wm-kitchen-app";

    fn create(host: usize, ctx: &AppContext) -> Self {
        ensure_defined::<ColorSchemeToggle>();
        ensure_defined::<RecipeSearch>();
        ensure_defined::<MealPlan>();

        let toggle = elements::create_element(ColorSchemeToggle::TAG, ctx);
        document::set_attribute(toggle, "color-scheme", ctx.color_scheme().as_ref());
        let title = element("h1").text("Meal Planner").build();
        element("header")
            .class("app-header")
            .child(title)
            .child(toggle)
            .append_to(host);

        let search = elements::create_element(RecipeSearch::TAG, ctx);
        element("main").child(search).append_to(host);

        let plan = elements::create_element(MealPlan::TAG, ctx);
        element("aside").class("meal-plan").child(plan).append_to(host);

        let app_ctx = ctx.clone();
        let _ = events::on_mode_change(toggle, move |scheme| app_ctx.set_color_scheme(scheme));

        tracing::debug!(host, "kitchen app created");
        Self { host, toggle }
    }
}

impl KitchenApp {
    pub fn host(&self) -> usize {
        self.host
    }

    /// The color scheme toggle in the header.
    pub fn toggle(&self) -> Option<ColorSchemeToggle> {
        elements::instance::<ColorSchemeToggle>(self.toggle)
    }
}
