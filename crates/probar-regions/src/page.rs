//! Page Object Model Support
//!
//! Page objects and regions are cheap handles around a [`PageContext`]:
//! the shared [`Session`], the element the object is scoped to, and a
//! back-reference to the object that produced it.
//!
//! ## Toyota Way Application:
//! - **Poka-Yoke**: every region implements the same constructor contract, so
//!   a region cannot be built without its session, scope and parent
//! - **Muda**: locator plumbing lives in the trait, not in every page object
//! - **Genchi Genbutsu**: regions are recomputed from the live document on every access

use std::any::{type_name, Any};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::capabilities::Capabilities;
use crate::config::RegionsConfig;
use crate::driver::{Browser, ElementHandle, Scope};
use crate::locator::Selector;
use crate::result::PageResult;

/// Shared browser handle and capability registry.
///
/// Every page object built from one session sees the same browser and the
/// same capabilities, including tags added after the objects were created.
#[derive(Debug, Clone)]
pub struct Session {
    browser: Browser,
    capabilities: Rc<RefCell<Capabilities>>,
}

impl Session {
    /// Create a session with default capabilities
    #[must_use]
    pub fn new(browser: Browser) -> Self {
        Self::with_capabilities(browser, Capabilities::default())
    }

    /// Create a session with the given capabilities
    #[must_use]
    pub fn with_capabilities(browser: Browser, capabilities: Capabilities) -> Self {
        Self {
            browser,
            capabilities: Rc::new(RefCell::new(capabilities)),
        }
    }

    /// Create a session whose capabilities extend the defaults per `config`
    #[must_use]
    pub fn from_config(browser: Browser, config: &RegionsConfig) -> Self {
        Self::with_capabilities(browser, config.capabilities())
    }

    /// Shared browser handle
    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Borrow the capability registry
    #[must_use]
    pub fn capabilities(&self) -> Ref<'_, Capabilities> {
        self.capabilities.borrow()
    }

    /// Mutably borrow the capability registry
    #[must_use]
    pub fn capabilities_mut(&self) -> RefMut<'_, Capabilities> {
        self.capabilities.borrow_mut()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.browser, &other.browser) && Rc::ptr_eq(&self.capabilities, &other.capabilities)
    }
}

/// Type-erased back-reference to the object a region was produced by
#[derive(Clone)]
pub struct Parent {
    id: Uuid,
    type_name: &'static str,
    object: Rc<dyn Any>,
}

impl Parent {
    /// Create a parent reference from a page object handle
    #[must_use]
    pub fn new<P: PageObject>(object: P) -> Self {
        Self {
            id: object.id(),
            type_name: type_name::<P>(),
            object: Rc::new(object),
        }
    }

    /// Identity of the parent page object
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Type name of the parent page object
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the parent is a `P`
    #[must_use]
    pub fn is<P: 'static>(&self) -> bool {
        self.object.is::<P>()
    }

    /// Get the parent as a `P`
    #[must_use]
    pub fn downcast_ref<P: 'static>(&self) -> Option<&P> {
        self.object.downcast_ref::<P>()
    }
}

impl fmt::Debug for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parent")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl PartialEq for Parent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// State shared by every page object and region
#[derive(Debug, Clone)]
pub struct PageContext {
    id: Uuid,
    session: Session,
    region_element: Scope,
    parent: Option<Parent>,
}

impl PageContext {
    /// Context of a top-level page: the whole document, no parent
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            id: Uuid::new_v4(),
            session,
            region_element: Scope::Document,
            parent: None,
        }
    }

    /// Context of a region scoped to `region_element` and owned by `parent`
    #[must_use]
    pub fn region(session: Session, region_element: Scope, parent: Parent) -> Self {
        Self {
            id: Uuid::new_v4(),
            session,
            region_element,
            parent: Some(parent),
        }
    }

    /// Context of a region collection: scoped, no parent
    #[must_use]
    pub fn collection(session: Session, region_element: Scope) -> Self {
        Self {
            region_element,
            ..Self::new(session)
        }
    }

    /// Replace the identity
    #[must_use]
    pub(crate) fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Identity shared by all clones of one page object
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Shared session
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Element this object is scoped to
    #[must_use]
    pub const fn region_element(&self) -> &Scope {
        &self.region_element
    }

    /// Object this region was produced by
    #[must_use]
    pub const fn parent(&self) -> Option<&Parent> {
        self.parent.as_ref()
    }
}

impl PartialEq for PageContext {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.region_element == other.region_element
    }
}

/// Trait for page objects representing a page or a part of one.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct LoginPage {
///     context: PageContext,
/// }
///
/// impl PageObject for LoginPage {
///     fn context(&self) -> &PageContext {
///         &self.context
///     }
/// }
///
/// impl LoginPage {
///     pub fn username(&self) -> PageResult<String> {
///         self.text(&Selector::id("username"))
///     }
/// }
/// ```
pub trait PageObject: Clone + 'static {
    /// Shared page object state
    fn context(&self) -> &PageContext;

    /// Identity of this page object
    fn id(&self) -> Uuid {
        self.context().id()
    }

    /// Shared session
    fn session(&self) -> &Session {
        self.context().session()
    }

    /// Shared browser handle
    fn browser(&self) -> &Browser {
        self.context().session().browser()
    }

    /// Element this object is scoped to
    fn region_element(&self) -> &Scope {
        self.context().region_element()
    }

    /// Object this region was produced by
    fn parent(&self) -> Option<&Parent> {
        self.context().parent()
    }

    /// Back-reference to hand to child regions
    fn as_parent(&self) -> Parent {
        Parent::new(self.clone())
    }

    /// Locate the first element matching `selector` within this object's scope
    fn element(&self, selector: &Selector) -> PageResult<Scope> {
        self.browser().element(self.region_element(), selector)
    }

    /// Locate every element matching `selector` within this object's scope
    fn elements(&self, selector: &Selector) -> PageResult<Vec<ElementHandle>> {
        self.browser().elements(self.region_element(), selector)
    }

    /// Text of the first element matching `selector` within this object's scope
    fn text(&self, selector: &Selector) -> PageResult<String> {
        let scope = self.element(selector)?;
        self.browser().text(&scope)
    }
}

/// Region constructor contract: (session, region element, parent) via [`PageContext`]
pub trait Region: PageObject {
    /// Build the region from its context
    fn from_context(context: PageContext) -> Self;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::{MockDocument, MockElement};

    #[derive(Debug, Clone, PartialEq)]
    struct TestPage {
        context: PageContext,
    }

    impl PageObject for TestPage {
        fn context(&self) -> &PageContext {
            &self.context
        }
    }

    fn session() -> (Rc<MockDocument>, Session) {
        let document = Rc::new(MockDocument::new());
        let session = Session::new(document.clone());
        (document, session)
    }

    mod session_tests {
        use super::*;

        #[test]
        fn test_capabilities_shared_between_clones() {
            let (_, session) = session();
            let clone = session.clone();
            let _ = clone.capabilities_mut().add_readable("li");
            assert!(session.capabilities().is_readable("li"));
            assert_eq!(session, clone);
        }

        #[test]
        fn test_from_config() {
            let (document, _) = session();
            let config = RegionsConfig::from_yaml_str("clickable: [div]").unwrap();
            let session = Session::from_config(document, &config);
            assert!(session.capabilities().is_clickable("div"));
            assert!(session.capabilities().is_clickable("button"));
        }

        #[test]
        fn test_distinct_sessions_differ() {
            let (_, a) = session();
            let (_, b) = session();
            assert_ne!(a, b);
        }
    }

    mod context_tests {
        use super::*;

        #[test]
        fn test_page_context_defaults() {
            let (_, session) = session();
            let context = PageContext::new(session);
            assert!(context.region_element().is_document());
            assert!(context.parent().is_none());
        }

        #[test]
        fn test_clones_share_identity() {
            let (_, session) = session();
            let page = TestPage {
                context: PageContext::new(session),
            };
            assert_eq!(page.clone(), page);
            assert_eq!(page.clone().id(), page.id());
        }

        #[test]
        fn test_fresh_contexts_differ() {
            let (_, session) = session();
            assert_ne!(PageContext::new(session.clone()), PageContext::new(session));
        }
    }

    mod parent_tests {
        use super::*;

        #[test]
        fn test_parent_downcast() {
            let (_, session) = session();
            let page = TestPage {
                context: PageContext::new(session.clone()),
            };
            let context = PageContext::region(session, Scope::Document, page.as_parent());
            let parent = context.parent().unwrap();
            assert!(parent.is::<TestPage>());
            assert_eq!(parent.id(), page.id());
            assert_eq!(parent.downcast_ref::<TestPage>(), Some(&page));
            assert!(parent.type_name().ends_with("TestPage"));
            assert!(parent.downcast_ref::<String>().is_none());
        }
    }

    mod element_tests {
        use super::*;

        #[test]
        fn test_scoped_lookup() {
            let (document, session) = session();
            let outer = document.append(MockElement::new("div").class("outer"));
            let _ = document
                .append_to(&outer, MockElement::new("span").class("name").text("inner"))
                .unwrap();
            let _ = document.append(MockElement::new("span").class("name").text("outside"));

            let page = TestPage {
                context: PageContext::new(session.clone()),
            };
            assert_eq!(page.elements(&Selector::class("name")).unwrap().len(), 2);

            let scoped = TestPage {
                context: PageContext::region(session, Scope::Element(outer), page.as_parent()),
            };
            assert_eq!(scoped.text(&Selector::class("name")).unwrap(), "inner");
            assert_eq!(scoped.elements(&Selector::class("name")).unwrap().len(), 1);
        }
    }
}
