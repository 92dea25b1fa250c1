use crate::context::AppContext;
use crate::engine::{document, CustomElement};
use crate::state::events::{self, EventKind, RecipeFilterChange};

use super::element;

/// Keyword search box.
///
/// Renders `form.search-form > input[name=keywords] + button[type=submit]`.
/// Every `input` and every `submit` dispatches one `recipe-filter-change` on
/// the host with the current input text.
#[derive(Clone, Debug)]
pub struct RecipeFilter {
    host: usize,
    input: usize,
}

impl CustomElement for RecipeFilter {
    const TAG: &'static str = "wm-recipe-filter";

    fn create(host: usize, _ctx: &AppContext) -> Self {
        let input = element("input")
            .attr("name", "keywords")
            .attr("placeholder", "Search recipes")
            .attr("type", "text")
            .build();
        let button = element("button").attr("type", "submit").text("🔍").build();
        let form = element("form")
            .class("search-form")
            .child(input)
            .child(button)
            .append_to(host);

        let filter = Self { host, input };

        // Listeners on internal nodes go away with the nodes.
        let f = filter.clone();
        let _ = events::add_event_listener(form, "input", move |_| f.update_keywords());
        let f = filter.clone();
        let _ = events::add_event_listener(form, "submit", move |_| f.update_keywords());
        // A submit button submits its form.
        let _ = events::add_event_listener(button, "click", move |_| {
            events::dispatch_event(form, EventKind::Submit);
        });

        filter
    }
}

impl RecipeFilter {
    pub fn host(&self) -> usize {
        self.host
    }

    /// Current text of the keywords input, `None` if the input is gone.
    pub fn keywords(&self) -> Option<String> {
        let is_input = document::tag_name(self.input).as_deref() == Some("input")
            && document::contains(self.host, self.input);
        is_input.then(|| document::value(self.input).unwrap_or_default())
    }

    /// Listen for `recipe-filter-change` on this filter. Returns cleanup function.
    pub fn on_change<F>(&self, handler: F) -> impl FnOnce()
    where
        F: Fn(&RecipeFilterChange) + 'static,
    {
        events::on_recipe_filter_change(self.host, handler)
    }

    fn update_keywords(&self) {
        let keywords = self.keywords();
        tracing::trace!(host = self.host, ?keywords, "recipe filter changed");
        events::dispatch_event(
            self.host,
            EventKind::RecipeFilterChange(RecipeFilterChange { keywords }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{create_element, define, reset_document, reset_elements};
    use crate::state::events::reset_event_state;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (RecipeFilter, Rc<RefCell<Vec<Option<String>>>>) {
        reset_document();
        reset_elements();
        reset_event_state();
        define::<RecipeFilter>().unwrap();

        let ctx = AppContext::default();
        let host = create_element(RecipeFilter::TAG, &ctx);
        let filter = crate::engine::instance::<RecipeFilter>(host).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let _ = filter.on_change(move |change| s.borrow_mut().push(change.keywords.clone()));
        (filter, seen)
    }

    fn find(host: usize, tag: &str) -> usize {
        document::descendants(host)
            .into_iter()
            .find(|&i| document::tag_name(i).as_deref() == Some(tag))
            .unwrap()
    }

    #[test]
    fn test_renders_form() {
        let (filter, _) = setup();
        let input = find(filter.host(), "input");
        assert_eq!(
            document::attribute(input, "placeholder").as_deref(),
            Some("Search recipes")
        );
        assert!(document::has_class(find(filter.host(), "form"), "search-form"));
        assert_eq!(filter.keywords().as_deref(), Some(""));
    }

    #[test]
    fn test_input_emits_keywords() {
        let (filter, seen) = setup();
        let input = find(filter.host(), "input");
        document::set_value(input, "bur");
        events::dispatch_event(input, EventKind::Input);

        assert_eq!(*seen.borrow(), vec![Some("bur".to_string())]);
    }

    #[test]
    fn test_submit_emits_once() {
        let (filter, seen) = setup();
        let input = find(filter.host(), "input");
        document::set_value(input, "salad");
        events::dispatch_event(find(filter.host(), "form"), EventKind::Submit);

        assert_eq!(*seen.borrow(), vec![Some("salad".to_string())]);
    }

    #[test]
    fn test_button_click_submits() {
        let (filter, seen) = setup();
        events::dispatch_event(find(filter.host(), "button"), EventKind::Click);
        assert_eq!(*seen.borrow(), vec![Some(String::new())]);
    }

    #[test]
    fn test_missing_input_emits_none() {
        let (filter, seen) = setup();
        let input = find(filter.host(), "input");
        let form = find(filter.host(), "form");
        document::release_node(input);
        events::dispatch_event(form, EventKind::Submit);

        assert_eq!(*seen.borrow(), vec![None]);
    }
}
