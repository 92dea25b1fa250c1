//! Test harness: mounting components, page locators and fixtures.
//!
//! ```ignore
//! use spark_kitchen::testing::{self, page, RecipeMother, RecipeRepositoryFake};
//!
//! testing::reset();
//! let fake = Rc::new(RecipeRepositoryFake::default());
//! fake.configure(vec![RecipeMother::with_basic_info("Burger").build()]);
//! let ctx = AppContext::new(fake);
//!
//! let _search = testing::mount::<RecipeSearch>(&ctx)?;
//! page().get_by_placeholder("Search recipes").fill("bur")?;
//! ```

mod fixtures;
mod mount;
mod page;

pub use fixtures::{RecipeMother, RecipeRepositoryFake};
pub use mount::{mount, Mounted};
pub use page::{page, Locator};

use crate::engine::{reset_document, reset_elements};
use crate::state::{reset_event_state, reset_focus_state};

/// Reset all thread-local state: document, definitions, listeners, focus.
pub fn reset() {
    reset_document();
    reset_elements();
    reset_event_state();
    reset_focus_state();
    fixtures::reset_ids();
}
