//! Page locators over the document body.
//!
//! Locators are lazy: they resolve against the current document every time
//! they are queried or acted on. Chaining narrows the search to descendants
//! of the previous matches.
//!
//! ```ignore
//! let headings = page()
//!     .get_by_role(Role::ListItem)
//!     .get_by_role(Role::Heading { level: 2 });
//! assert_eq!(headings.texts(), vec!["Burger", "Salad", "Beer"]);
//! ```

use crate::engine::document::{self, NodeKind};
use crate::error::{Error, Result};
use crate::state::events::{self, EventKind};
use crate::types::Role;

#[derive(Debug, Clone, PartialEq)]
enum Query {
    Role(Role),
    Placeholder(String),
    Text(String),
    /// Narrows the parent's matches instead of searching below them.
    HasText(String),
}

/// Lazy query over the document.
#[derive(Debug, Clone)]
pub struct Locator {
    parent: Option<Box<Locator>>,
    query: Option<Query>,
    nth: Option<usize>,
}

/// Locator matching the document body.
pub fn page() -> Locator {
    Locator {
        parent: None,
        query: None,
        nth: None,
    }
}

impl Locator {
    fn chain(&self, query: Query) -> Self {
        Self {
            parent: Some(Box::new(self.clone())),
            query: Some(query),
            nth: None,
        }
    }

    /// Elements with the given implicit role.
    pub fn get_by_role(&self, role: Role) -> Self {
        self.chain(Query::Role(role))
    }

    /// Elements whose `placeholder` attribute equals `placeholder`.
    pub fn get_by_placeholder(&self, placeholder: &str) -> Self {
        self.chain(Query::Placeholder(placeholder.to_string()))
    }

    /// Elements whose own text contains `text` (case-insensitive).
    pub fn get_by_text(&self, text: &str) -> Self {
        self.chain(Query::Text(text.to_lowercase()))
    }

    /// Keep only the matches whose text content contains `text`
    /// (case-insensitive).
    pub fn filter_text(&self, text: &str) -> Self {
        self.chain(Query::HasText(text.to_lowercase()))
    }

    /// Only the `n`th match (zero-based).
    pub fn nth(&self, n: usize) -> Self {
        let mut locator = self.clone();
        locator.nth = Some(n);
        locator
    }

    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Resolve to node indices in document order.
    pub fn all(&self) -> Vec<usize> {
        let matches = match (&self.parent, &self.query) {
            (Some(parent), Some(Query::HasText(text))) => parent
                .all()
                .into_iter()
                .filter(|&index| {
                    document::text_content(index)
                        .to_lowercase()
                        .contains(text.as_str())
                })
                .collect(),
            (Some(parent), Some(query)) => {
                let mut out: Vec<usize> = Vec::new();
                for root in parent.all() {
                    for index in document::descendants(root) {
                        if query.matches(index) && !out.contains(&index) {
                            out.push(index);
                        }
                    }
                }
                out
            }
            _ => vec![document::body()],
        };
        match self.nth {
            Some(n) => matches.into_iter().nth(n).into_iter().collect(),
            None => matches,
        }
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    /// First match, or [`Error::ElementNotFound`].
    pub fn element(&self) -> Result<usize> {
        self.all()
            .first()
            .copied()
            .ok_or_else(|| Error::ElementNotFound(self.describe()))
    }

    /// Trimmed text of the first match.
    pub fn text_content(&self) -> Result<String> {
        Ok(document::text_content(self.element()?).trim().to_string())
    }

    /// Trimmed text of every match.
    pub fn texts(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .map(|index| document::text_content(index).trim().to_string())
            .collect()
    }

    /// Replace the value of the first match and dispatch `input`.
    pub fn fill(&self, value: &str) -> Result<()> {
        let index = self.element()?;
        document::set_value(index, value);
        events::dispatch_event(index, EventKind::Input);
        Ok(())
    }

    /// Dispatch `click` on the first match.
    pub fn click(&self) -> Result<()> {
        let index = self.element()?;
        events::dispatch_event(index, EventKind::Click);
        Ok(())
    }

    /// Dispatch `submit` on the form containing the first match.
    pub fn submit(&self) -> Result<()> {
        let index = self.element()?;
        let form = document::closest(index, |i| document::role(i) == Some(Role::Form))
            .ok_or_else(|| Error::ElementNotFound(format!("form around {}", self.describe())))?;
        events::dispatch_event(form, EventKind::Submit);
        Ok(())
    }

    fn describe(&self) -> String {
        let mut out = match &self.parent {
            Some(parent) => parent.describe(),
            None => "page".to_string(),
        };
        if let Some(query) = &self.query {
            out.push_str(&format!(" > {query:?}"));
        }
        if let Some(n) = self.nth {
            out.push_str(&format!(" [{n}]"));
        }
        out
    }
}

impl Query {
    fn matches(&self, index: usize) -> bool {
        match self {
            Self::Role(role) => document::role(index) == Some(*role),
            Self::Placeholder(placeholder) => {
                document::attribute(index, "placeholder").as_deref() == Some(placeholder.as_str())
            }
            Self::Text(text) => own_text(index).to_lowercase().contains(text.as_str()),
            Self::HasText(text) => document::text_content(index)
                .to_lowercase()
                .contains(text.as_str()),
        }
    }
}

/// Text of the direct text-node children of an element.
fn own_text(index: usize) -> String {
    if !matches!(document::kind(index), Some(NodeKind::Element(_))) {
        return String::new();
    }
    document::children(index)
        .into_iter()
        .filter_map(|child| match document::kind(child) {
            Some(NodeKind::Text(text)) => Some(text),
            _ => None,
        })
        .collect()
}
