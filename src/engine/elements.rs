//! Element Registry - Custom element definitions.
//!
//! Maps tag names to component types:
//! - `define::<C>()` registers `C` under `C::TAG`
//! - `get_name::<C>()` resolves the tag of a registered type
//! - `create_element(tag, ctx)` allocates a node and upgrades it when the tag
//!   is defined, storing the component instance on the node
//! - observed attribute changes are forwarded to the instance

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::context::AppContext;
use crate::error::{Error, Result};

use super::document;

// =============================================================================
// CustomElement
// =============================================================================

/// A component that can be registered under a tag name.
///
/// Components are cheap handles (host index plus signals), so they are
/// `Clone`. The instance stored on the host node and the copies returned by
/// [`instance`] share the same reactive state.
pub trait CustomElement: Clone + 'static {
    /// Tag name. Must be a valid custom element name (lowercase, with a hyphen).
    const TAG: &'static str;

    /// Attributes whose changes reach [`CustomElement::attribute_changed`].
    const OBSERVED_ATTRIBUTES: &'static [&'static str] = &[];

    /// Build the component and render its initial content into `host`.
    fn create(host: usize, ctx: &AppContext) -> Self;

    /// Called after an observed attribute of the host changed.
    fn attribute_changed(&self, _name: &str, _value: Option<&str>) {}
}

// =============================================================================
// Registry State
// =============================================================================

type Constructor = Rc<dyn Fn(usize, &AppContext) -> Rc<dyn Any>>;
type AttributeHook = Rc<dyn Fn(&dyn Any, &str, Option<&str>)>;

struct Definition {
    type_id: TypeId,
    type_name: &'static str,
    observed: &'static [&'static str],
    construct: Constructor,
    attribute_changed: AttributeHook,
}

thread_local! {
    static DEFINITIONS: RefCell<HashMap<&'static str, Definition>> = RefCell::new(HashMap::new());
}

/// Hyphenated names HTML already uses for its own elements.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Check the custom element naming rules: starts with a lowercase ASCII
/// letter, contains a hyphen, no uppercase, not reserved.
pub fn is_valid_custom_element_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    let starts_lower = matches!(chars.next(), Some(c) if c.is_ascii_lowercase());
    starts_lower
        && tag.contains('-')
        && !tag.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace())
        && !RESERVED_NAMES.iter().any(|&reserved| reserved == tag)
}

/// Short type name for error messages (`spark_kitchen::components::MealPlan` → `MealPlan`).
pub(crate) fn short_type_name<C: 'static>() -> &'static str {
    let full = std::any::type_name::<C>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

// =============================================================================
// Definition
// =============================================================================

/// Register `C` under `C::TAG`.
///
/// Defining the same type twice is a no-op. Defining a tag that another type
/// already owns fails with [`Error::AlreadyDefined`].
pub fn define<C: CustomElement>() -> Result<()> {
    if !is_valid_custom_element_name(C::TAG) {
        return Err(Error::InvalidTagName {
            tag: C::TAG.to_string(),
        });
    }

    DEFINITIONS.with(|defs| {
        let mut defs = defs.borrow_mut();
        if let Some(existing) = defs.get(C::TAG) {
            if existing.type_id == TypeId::of::<C>() {
                return Ok(());
            }
            tracing::warn!(
                tag = C::TAG,
                existing = existing.type_name,
                "tag already defined"
            );
            return Err(Error::AlreadyDefined {
                tag: C::TAG.to_string(),
            });
        }

        let construct: Constructor =
            Rc::new(|host: usize, ctx: &AppContext| Rc::new(C::create(host, ctx)) as Rc<dyn Any>);
        let attribute_changed: AttributeHook = Rc::new(|instance: &dyn Any, name: &str, value: Option<&str>| {
            if let Some(component) = instance.downcast_ref::<C>() {
                component.attribute_changed(name, value);
            }
        });

        defs.insert(
            C::TAG,
            Definition {
                type_id: TypeId::of::<C>(),
                type_name: short_type_name::<C>(),
                observed: C::OBSERVED_ATTRIBUTES,
                construct,
                attribute_changed,
            },
        );
        tracing::debug!(tag = C::TAG, component = short_type_name::<C>(), "element defined");
        Ok(())
    })
}

/// Tag under which `C` is registered, if it is.
pub fn get_name<C: CustomElement>() -> Option<&'static str> {
    DEFINITIONS.with(|defs| {
        defs.borrow()
            .get(C::TAG)
            .filter(|def| def.type_id == TypeId::of::<C>())
            .map(|_| C::TAG)
    })
}

/// Check whether a tag has a definition.
pub fn is_defined(tag: &str) -> bool {
    DEFINITIONS.with(|defs| defs.borrow().contains_key(tag))
}

// =============================================================================
// Creation
// =============================================================================

/// Create a detached element.
///
/// If `tag` is defined, the component is constructed (rendering into the new
/// node) and stored on it. Unknown tags produce plain elements.
pub fn create_element(tag: &str, ctx: &AppContext) -> usize {
    let index = document::create_node(tag);
    let construct = DEFINITIONS.with(|defs| defs.borrow().get(tag).map(|def| def.construct.clone()));
    if let Some(construct) = construct {
        let instance = construct(index, ctx);
        document::set_instance(index, instance);
        tracing::trace!(index, tag, "element upgraded");
    }
    index
}

/// Typed handle to the component upgraded at `index`.
pub fn instance<C: CustomElement>(index: usize) -> Option<C> {
    let instance = document::instance(index)?;
    (*instance).downcast_ref::<C>().cloned()
}

/// Forward an attribute change to the upgraded instance at `index`.
pub(crate) fn attribute_changed(index: usize, name: &str, value: Option<&str>) {
    let Some(tag) = document::tag_name(index) else {
        return;
    };
    let hook = DEFINITIONS.with(|defs| {
        defs.borrow()
            .get(tag.as_str())
            .filter(|def| def.observed.iter().any(|&observed| observed == name))
            .map(|def| def.attribute_changed.clone())
    });
    let (Some(hook), Some(instance)) = (hook, document::instance(index)) else {
        return;
    };
    hook(&*instance, name, value);
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Remove all definitions (for testing).
pub fn reset_elements() {
    DEFINITIONS.with(|defs| defs.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone)]
    struct Badge {
        host: usize,
        changes: Rc<Cell<usize>>,
    }

    impl CustomElement for Badge {
        const TAG: &'static str = "wm-badge";
        const OBSERVED_ATTRIBUTES: &'static [&'static str] = &["label"];

        fn create(host: usize, _ctx: &AppContext) -> Self {
            let text = document::create_text_node("badge");
            let _ = document::append_child(host, text);
            Self {
                host,
                changes: Rc::new(Cell::new(0)),
            }
        }

        fn attribute_changed(&self, _name: &str, value: Option<&str>) {
            self.changes.set(self.changes.get() + 1);
            document::set_text(self.host, value.unwrap_or(""));
        }
    }

    #[derive(Clone)]
    struct Impostor;

    impl CustomElement for Impostor {
        const TAG: &'static str = "wm-badge";
        fn create(_host: usize, _ctx: &AppContext) -> Self {
            Self
        }
    }

    #[derive(Clone)]
    struct Shouty;

    impl CustomElement for Shouty {
        const TAG: &'static str = "WM-Shouty";
        fn create(_host: usize, _ctx: &AppContext) -> Self {
            Self
        }
    }

    fn setup() -> AppContext {
        reset_elements();
        document::reset_document();
        AppContext::default()
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_custom_element_name("wm-meal-plan"));
        assert!(!is_valid_custom_element_name("mealplan"));
        assert!(!is_valid_custom_element_name("-meal"));
        assert!(!is_valid_custom_element_name("Wm-plan"));
        assert!(!is_valid_custom_element_name("font-face"));
    }

    #[test]
    fn test_define_and_get_name() {
        setup();
        assert_eq!(get_name::<Badge>(), None);
        define::<Badge>().unwrap();
        assert_eq!(get_name::<Badge>(), Some("wm-badge"));
        assert!(is_defined("wm-badge"));
        // Same type again is fine
        define::<Badge>().unwrap();
    }

    #[test]
    fn test_define_conflict() {
        setup();
        define::<Badge>().unwrap();
        let err = define::<Impostor>().unwrap_err();
        assert!(matches!(err, Error::AlreadyDefined { ref tag } if tag == "wm-badge"));
        assert_eq!(get_name::<Impostor>(), None);
    }

    #[test]
    fn test_define_invalid_name() {
        setup();
        assert!(matches!(define::<Shouty>(), Err(Error::InvalidTagName { .. })));
    }

    #[test]
    fn test_create_element_upgrades_defined_tags() {
        let ctx = setup();
        define::<Badge>().unwrap();

        let badge = create_element("wm-badge", &ctx);
        assert_eq!(document::text_content(badge), "badge");
        assert!(instance::<Badge>(badge).is_some());

        let plain = create_element("div", &ctx);
        assert!(instance::<Badge>(plain).is_none());
        assert!(document::children(plain).is_empty());
    }

    #[test]
    fn test_observed_attribute_reaches_instance() {
        let ctx = setup();
        define::<Badge>().unwrap();
        let badge = create_element("wm-badge", &ctx);
        let handle = instance::<Badge>(badge).unwrap();

        document::set_attribute(badge, "label", "new");
        assert_eq!(handle.changes.get(), 1);
        assert_eq!(document::text_content(badge), "new");

        // Unchanged value and unobserved attributes are ignored
        document::set_attribute(badge, "label", "new");
        document::set_attribute(badge, "title", "x");
        assert_eq!(handle.changes.get(), 1);
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Badge>(), "Badge");
    }
}
