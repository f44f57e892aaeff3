//! Region Definitions
//!
//! Typed declarations behind region accessors. [`HasOne`] scopes a single
//! region to the whole document; [`HasMany`] wraps every element matching an
//! `each` locator, optionally below a `within` scope, either as a plain
//! list or as a dedicated [`CollectionRegion`].
//!
//! ## Toyota Way Application:
//! - **Poka-Yoke**: region types are checked at compile time, so a missing
//!   region class cannot surface at runtime
//! - **Jidoka**: a `within` scope that matches nothing yields an empty list
//!   instead of a driver error
//! - **Genchi Genbutsu**: every `resolve` queries the live document

use std::any::type_name;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::driver::{ElementHandle, Scope};
use crate::locator::Selector;
use crate::naming::{check_convention, collection_type_name, element_type_name};
use crate::page::{PageContext, PageObject, Region};
use crate::region::collection::{CollectionRegion, RegionCollection};
use crate::region::finder::{self, find_first, Attributes, Findable};
use crate::region::inline::{InlineRegion, RegionBody};
use crate::result::PageResult;

/// Computes a scope from the host page object
pub type ScopeFn<H> = Rc<dyn Fn(&H) -> PageResult<Scope>>;

type Factory<R> = Rc<dyn Fn(PageContext) -> R>;

/// Where a `has_many` collection looks for its elements
pub enum Within<H> {
    /// First element matching the locator in the whole document
    Locator(Selector),
    /// Scope computed from the host
    Scope(ScopeFn<H>),
}

impl<H: PageObject> Within<H> {
    /// Resolve against `host`
    pub fn resolve(&self, host: &H) -> PageResult<Scope> {
        match self {
            Self::Locator(selector) => host.browser().element(&Scope::Document, selector),
            Self::Scope(scope) => scope(host),
        }
    }
}

impl<H> Clone for Within<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Locator(selector) => Self::Locator(selector.clone()),
            Self::Scope(scope) => Self::Scope(Rc::clone(scope)),
        }
    }
}

impl<H> PartialEq for Within<H> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Locator(a), Self::Locator(b)) => a == b,
            (Self::Scope(a), Self::Scope(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<H> fmt::Debug for Within<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locator(selector) => f.debug_tuple("Locator").field(selector).finish(),
            Self::Scope(_) => f.write_str("Scope(..)"),
        }
    }
}

/// Single region declaration
pub struct HasOne<R> {
    name: String,
    factory: Factory<R>,
}

impl<R: Region> HasOne<R> {
    /// Declare a region implemented by `R`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let _ = check_convention::<R>(&name, &element_type_name(&name, false));
        Self {
            name,
            factory: Rc::new(R::from_context),
        }
    }
}

impl HasOne<InlineRegion> {
    /// Declare an anonymous region with an inline body
    pub fn inline(name: impl Into<String>, body: RegionBody) -> Self {
        Self::inline_shared(name.into(), Rc::new(body))
    }

    pub(crate) fn inline_shared(name: String, body: Rc<RegionBody>) -> Self {
        let region_name = name.clone();
        Self {
            name,
            factory: Rc::new(move |context| {
                InlineRegion::new(context, region_name.clone(), Rc::clone(&body))
            }),
        }
    }
}

impl<R> HasOne<R> {
    /// Accessor name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the region for `host`: whole-document scope, `host` as parent
    pub fn resolve<H: PageObject>(&self, host: &H) -> PageResult<R> {
        debug!(region = %self.name, host = type_name::<H>(), "resolving region");
        let context = PageContext::region(host.session().clone(), Scope::Document, host.as_parent());
        Ok((self.factory)(context))
    }
}

impl<R> fmt::Debug for HasOne<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HasOne").field("name", &self.name).finish()
    }
}

/// Collection region declaration for host type `H`
pub struct HasMany<H, R> {
    name: String,
    each: Selector,
    within: Option<Within<H>>,
    factory: Factory<R>,
}

impl<H: PageObject, R: Region> HasMany<H, R> {
    /// Declare a collection of `R`, one per element matching `each`
    pub fn new(name: impl Into<String>, each: Selector) -> Self {
        let name = name.into();
        let _ = check_convention::<R>(&name, &element_type_name(&name, true));
        Self {
            name,
            each,
            within: None,
            factory: Rc::new(R::from_context),
        }
    }

    /// Resolve as a dedicated collection region scoped to the `within` element
    pub fn resolve_collection<C>(&self, host: &H) -> PageResult<C>
    where
        C: CollectionRegion<Item = R>,
    {
        let _ = check_convention::<C>(&self.name, &collection_type_name(&self.name));
        let (scope, elements) = self.matched_elements(host)?;
        Ok(C::from_collection(RegionCollection::new(
            host.session().clone(),
            scope,
            elements,
        )))
    }

    /// Finder over a dedicated collection region
    pub fn find_in_collection<C>(&self, host: &H, attributes: &Attributes) -> PageResult<R>
    where
        C: CollectionRegion<Item = R>,
        R: Findable,
    {
        let collection = self.resolve_collection::<C>(host)?;
        find_first(&self.finder_name(), collection.iter(), attributes)
    }
}

impl<H: PageObject> HasMany<H, InlineRegion> {
    /// Declare a collection of anonymous regions with an inline body
    pub fn inline(name: impl Into<String>, each: Selector, body: RegionBody) -> Self {
        Self::inline_shared(name.into(), each, Rc::new(body))
    }

    pub(crate) fn inline_shared(name: String, each: Selector, body: Rc<RegionBody>) -> Self {
        let region_name = name.clone();
        Self {
            name,
            each,
            within: None,
            factory: Rc::new(move |context| {
                InlineRegion::new(context, region_name.clone(), Rc::clone(&body))
            }),
        }
    }
}

impl<H: PageObject, R> HasMany<H, R> {
    /// Look for elements below the first element matching `selector`
    #[must_use]
    pub fn within(mut self, selector: Selector) -> Self {
        self.within = Some(Within::Locator(selector));
        self
    }

    /// Look for elements below the scope computed from the host
    #[must_use]
    pub fn within_scope<F>(mut self, scope: F) -> Self
    where
        F: Fn(&H) -> PageResult<Scope> + 'static,
    {
        self.within = Some(Within::Scope(Rc::new(scope)));
        self
    }

    pub(crate) fn with_within(mut self, within: Option<Within<H>>) -> Self {
        self.within = within;
        self
    }

    /// Accessor name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locator every item matches
    #[must_use]
    pub const fn each(&self) -> &Selector {
        &self.each
    }

    /// Name of the generated finder
    #[must_use]
    pub fn finder_name(&self) -> String {
        finder::finder_name(&self.name)
    }

    /// Scope the collection is searched in; the document when no `within` is set
    pub fn scope(&self, host: &H) -> PageResult<Scope> {
        self.within
            .as_ref()
            .map_or(Ok(Scope::Document), |within| within.resolve(host))
    }

    /// Resolved scope and the elements matching `each` below it.
    ///
    /// A scope that does not exist yields no elements.
    pub fn matched_elements(&self, host: &H) -> PageResult<(Scope, Vec<ElementHandle>)> {
        let scope = self.scope(host)?;
        let browser = host.browser();
        let elements = if browser.exists(&scope)? {
            browser.elements(&scope, &self.each)?
        } else {
            debug!(region = %self.name, %scope, "collection scope does not exist");
            Vec::new()
        };
        trace!(region = %self.name, count = elements.len(), each = %self.each, "matched elements");
        Ok((scope, elements))
    }

    /// One region per matched element, each scoped to its element with `host` as parent
    pub fn resolve(&self, host: &H) -> PageResult<Vec<R>> {
        debug!(region = %self.name, host = type_name::<H>(), "resolving collection");
        let (_, elements) = self.matched_elements(host)?;
        let session = host.session();
        let parent = host.as_parent();
        Ok(elements
            .into_iter()
            .map(|element| {
                (self.factory)(PageContext::region(
                    session.clone(),
                    Scope::Element(element),
                    parent.clone(),
                ))
            })
            .collect())
    }

    /// First item whose attributes equal `attributes`
    pub fn find(&self, host: &H, attributes: &Attributes) -> PageResult<R>
    where
        R: Findable,
    {
        find_first(&self.finder_name(), self.resolve(host)?, attributes)
    }
}

impl<H, R> fmt::Debug for HasMany<H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HasMany")
            .field("name", &self.name)
            .field("each", &self.each)
            .field("within", &self.within)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::{MockDocument, MockElement};
    use crate::page::Session;
    use crate::result::PageError;
    use serde_json::Value;

    #[derive(Debug, Clone, PartialEq)]
    struct ListPage {
        context: PageContext,
    }

    impl PageObject for ListPage {
        fn context(&self) -> &PageContext {
            &self.context
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct ItemRegion {
        context: PageContext,
    }

    impl PageObject for ItemRegion {
        fn context(&self) -> &PageContext {
            &self.context
        }
    }

    impl Region for ItemRegion {
        fn from_context(context: PageContext) -> Self {
            Self { context }
        }
    }

    impl Findable for ItemRegion {
        fn read_attribute(&self, name: &str) -> PageResult<Value> {
            match name {
                "label" => Ok(self.browser().text(self.region_element())?.into()),
                other => Err(finder::unknown_attribute::<Self>(other)),
            }
        }
    }

    fn page() -> (Rc<MockDocument>, ListPage) {
        let document = Rc::new(MockDocument::new());
        let list = document.append(MockElement::new("ul").class("list"));
        for label in ["one", "two"] {
            let _ = document
                .append_to(&list, MockElement::new("li").class("item").text(label))
                .unwrap();
        }
        let _ = document.append(MockElement::new("li").class("item").text("stray"));
        let page = ListPage {
            context: PageContext::new(Session::new(document.clone())),
        };
        (document, page)
    }

    fn items() -> HasMany<ListPage, ItemRegion> {
        HasMany::new("items", Selector::class("item"))
    }

    mod has_one_tests {
        use super::*;

        #[test]
        fn test_document_scope_and_parent() {
            let (_, page) = page();
            let region = HasOne::<ItemRegion>::new("item").resolve(&page).unwrap();
            assert!(region.region_element().is_document());
            assert_eq!(region.parent().unwrap().downcast_ref::<ListPage>(), Some(&page));
            assert_eq!(region.session(), page.session());
        }

        #[test]
        fn test_fresh_on_every_access() {
            let (_, page) = page();
            let has_one = HasOne::<ItemRegion>::new("item");
            assert_ne!(has_one.resolve(&page).unwrap(), has_one.resolve(&page).unwrap());
            assert_eq!(has_one.name(), "item");
        }
    }

    mod has_many_tests {
        use super::*;

        #[test]
        fn test_document_wide_without_within() {
            let (_, page) = page();
            let regions = items().resolve(&page).unwrap();
            assert_eq!(regions.len(), 3);
            for region in &regions {
                assert!(region.parent().unwrap().is::<ListPage>());
                assert!(region.region_element().element().is_some());
            }
        }

        #[test]
        fn test_within_locator() {
            let (_, page) = page();
            let regions = items().within(Selector::class("list")).resolve(&page).unwrap();
            let labels: Vec<Value> = regions
                .iter()
                .map(|region| region.read_attribute("label").unwrap())
                .collect();
            assert_eq!(labels, vec![Value::from("one"), Value::from("two")]);
        }

        #[test]
        fn test_missing_within_is_empty() {
            let (_, page) = page();
            let regions = items().within(Selector::class("absent")).resolve(&page).unwrap();
            assert!(regions.is_empty());
        }

        #[test]
        fn test_within_scope_closure() {
            let (_, page) = page();
            let has_many = items().within_scope(|host: &ListPage| host.element(&Selector::class("list")));
            assert_eq!(has_many.resolve(&page).unwrap().len(), 2);
            assert!(has_many.scope(&page).unwrap().element().is_some());
        }

        #[test]
        fn test_within_scope_error_propagates() {
            let (_, page) = page();
            let has_many = items().within_scope(|_: &ListPage| {
                Err(PageError::Driver {
                    message: "detached".to_string(),
                })
            });
            assert!(matches!(has_many.resolve(&page), Err(PageError::Driver { .. })));
        }

        #[test]
        fn test_recomputed_after_removal() {
            let (document, page) = page();
            let has_many = items();
            let first = has_many.resolve(&page).unwrap();
            assert!(document.remove(first[0].region_element().element().unwrap()));
            assert_eq!(has_many.resolve(&page).unwrap().len(), 2);
        }

        #[test]
        fn test_finder() {
            let (_, page) = page();
            let has_many = items();
            assert_eq!(has_many.finder_name(), "item");
            let found = has_many
                .find(&page, &Attributes::from([("label", "two")]))
                .unwrap();
            assert_eq!(found.read_attribute("label").unwrap(), Value::from("two"));

            let err = has_many
                .find(&page, &Attributes::from([("label", "zero")]))
                .unwrap_err();
            assert_eq!(err.to_string(), "No item matching: {label: \"zero\"}.");
        }
    }
}
