//! Element driver contract consumed by page objects and regions.
//!
//! The driver is the only thing that touches the document. Regions hand it
//! a [`Scope`] and a [`Selector`] and get back element snapshots.
//!
//! ```text
//! ┌──────────────┐   element / elements   ┌──────────────────┐
//! │ Region       │ ─────────────────────► │ ElementDriver    │
//! │ (scope)      │ ◄───────────────────── │ (MockDocument,   │
//! └──────────────┘   ElementHandle / Scope│  real browsers)  │
//!                                         └──────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::locator::Selector;
use crate::result::PageResult;

/// Shared browser handle threaded through every page object
pub type Browser = Rc<dyn ElementDriver>;

/// Element handle for DOM interactions
///
/// A snapshot of one located element. Whether the element is still attached
/// is answered by [`ElementDriver::exists`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Unique identifier for the element
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Element attributes
    pub attributes: BTreeMap<String, String>,
    /// Element text content
    pub text_content: Option<String>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            attributes: BTreeMap::new(),
            text_content: None,
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Get an attribute value
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Document context against which locators are resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The whole document
    Document,
    /// A located element
    Element(ElementHandle),
    /// A locator that matched nothing when it was resolved
    Missing(Selector),
}

impl Scope {
    /// Whether this is the whole-document context
    #[must_use]
    pub const fn is_document(&self) -> bool {
        matches!(self, Self::Document)
    }

    /// Get the located element, if any
    #[must_use]
    pub const fn element(&self) -> Option<&ElementHandle> {
        match self {
            Self::Element(element) => Some(element),
            Self::Document | Self::Missing(_) => None,
        }
    }
}

impl From<ElementHandle> for Scope {
    fn from(element: ElementHandle) -> Self {
        Self::Element(element)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => f.write_str("document"),
            Self::Element(element) => write!(f, "<{} #{}>", element.tag_name, element.id),
            Self::Missing(selector) => write!(f, "missing {selector}"),
        }
    }
}

/// Element-driver capability consumed by the region engine.
///
/// Implementations are synchronous; every call returns only once the
/// document query completes.
pub trait ElementDriver: fmt::Debug {
    /// Locate the first element matching `selector` within `scope`.
    ///
    /// Returns [`Scope::Missing`] rather than an error when nothing matches.
    fn element(&self, scope: &Scope, selector: &Selector) -> PageResult<Scope>;

    /// Locate every element matching `selector` within `scope`, in document order.
    fn elements(&self, scope: &Scope, selector: &Selector) -> PageResult<Vec<ElementHandle>>;

    /// Check whether a scope currently exists in the document.
    fn exists(&self, scope: &Scope) -> PageResult<bool>;

    /// Read the text of a scope.
    fn text(&self, scope: &Scope) -> PageResult<String>;
}
