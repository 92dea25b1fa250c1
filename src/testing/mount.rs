use std::any::Any;
use std::rc::Rc;

use crate::context::AppContext;
use crate::engine::{document, elements, CustomElement};
use crate::error::{Error, Result};

/// A component mounted into the document body.
///
/// Dropping the guard removes the element from the body again, unless the
/// node was released and its index now belongs to another element.
pub struct Mounted<C: CustomElement> {
    host: usize,
    component: C,
    instance: Rc<dyn Any>,
}

/// Mount a registered component into the document body.
///
/// Fails with [`Error::NotRegistered`] if `C` was never defined. Otherwise
/// exactly one element is appended to the body.
pub fn mount<C: CustomElement>(ctx: &AppContext) -> Result<Mounted<C>> {
    let tag = elements::get_name::<C>().ok_or(Error::NotRegistered {
        component: elements::short_type_name::<C>(),
    })?;

    let host = elements::create_element(tag, ctx);
    let body = document::body();
    if let Err(err) = document::append_child(body, host) {
        document::release_node(host);
        return Err(err);
    }
    let instance = document::instance(host).ok_or(Error::NodeNotFound(host))?;
    let component = elements::instance::<C>(host).ok_or(Error::NodeNotFound(host))?;
    tracing::debug!(tag, host, "component mounted");

    Ok(Mounted {
        host,
        component,
        instance,
    })
}

impl<C: CustomElement> Mounted<C> {
    pub fn host(&self) -> usize {
        self.host
    }

    pub fn component(&self) -> &C {
        &self.component
    }
}

impl<C: CustomElement> Drop for Mounted<C> {
    fn drop(&mut self) {
        let same_element = document::instance(self.host)
            .is_some_and(|current| Rc::ptr_eq(&current, &self.instance));
        if same_element && document::parent(self.host) == Some(document::body()) {
            let _ = document::remove_child(document::body(), self.host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::RecipeFilter;
    use crate::testing::reset;

    #[test]
    fn test_unregistered_component_fails() {
        reset();
        let err = mount::<RecipeFilter>(&AppContext::default()).err().unwrap();
        assert!(matches!(err, Error::NotRegistered { .. }));
        assert_eq!(err.to_string(), "Component RecipeFilter is not registered");
        assert!(document::children(document::body()).is_empty());
    }

    #[test]
    fn test_mount_appends_one_element_until_dropped() {
        reset();
        elements::define::<RecipeFilter>().unwrap();
        let body = document::body();
        {
            let mounted = mount::<RecipeFilter>(&AppContext::default()).unwrap();
            assert_eq!(document::children(body), vec![mounted.host()]);
            assert_eq!(
                document::tag_name(mounted.host()).as_deref(),
                Some(RecipeFilter::TAG)
            );
            assert_eq!(mounted.component().host(), mounted.host());
        }
        assert!(document::children(body).is_empty());
    }

    #[test]
    fn test_stale_guard_leaves_reused_index_alone() {
        reset();
        elements::define::<RecipeFilter>().unwrap();
        let body = document::body();

        let stale = mount::<RecipeFilter>(&AppContext::default()).unwrap();
        document::release_node(stale.host());
        let fresh = mount::<RecipeFilter>(&AppContext::default()).unwrap();
        assert_eq!(fresh.host(), stale.host());

        drop(stale);
        assert_eq!(document::children(body), vec![fresh.host()]);
        drop(fresh);
        assert!(document::children(body).is_empty());
    }
}
