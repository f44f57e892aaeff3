//! Inline region bodies.
//!
//! A region declared with a body instead of a type is an [`InlineRegion`]:
//! its elements and nested regions are described by a [`RegionBody`] and
//! looked up by name.

use std::rc::Rc;

use serde_json::Value;
use tracing::trace;

use crate::capabilities::Tag;
use crate::driver::Scope;
use crate::locator::{Selector, TAG_NAME};
use crate::page::{PageContext, PageObject};
use crate::region::definition::{HasMany, HasOne, Within};
use crate::region::finder::{self, find_first, Attributes, Findable};
use crate::result::{PageError, PageResult};

/// Tag accepted by any element
pub const ANY_ELEMENT: &str = "element";

/// Named element inside a region body
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDeclaration {
    name: String,
    tag: Tag,
    selector: Selector,
}

impl ElementDeclaration {
    /// Declare element `name` of kind `tag` located by `selector`
    pub fn new(name: impl Into<String>, tag: impl Into<Tag>, selector: Selector) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            selector,
        }
    }

    /// Element name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element kind
    #[must_use]
    pub const fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Accessor name: `{name}_{tag}`
    #[must_use]
    pub fn accessor_name(&self) -> String {
        format!("{}_{}", self.name, self.tag)
    }

    /// Selector with the tag folded in, unless the kind is [`ANY_ELEMENT`]
    #[must_use]
    pub fn located_selector(&self) -> Selector {
        if self.tag.as_str() == ANY_ELEMENT {
            self.selector.clone()
        } else {
            self.selector.clone().with(TAG_NAME, self.tag.as_str())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum NestedRegion {
    One {
        name: String,
        body: Rc<RegionBody>,
    },
    Many {
        name: String,
        each: Selector,
        within: Option<Within<InlineRegion>>,
        body: Rc<RegionBody>,
    },
}

impl NestedRegion {
    fn name(&self) -> &str {
        match self {
            Self::One { name, .. } | Self::Many { name, .. } => name,
        }
    }
}

/// Elements and nested regions of an inline region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionBody {
    elements: Vec<ElementDeclaration>,
    regions: Vec<NestedRegion>,
}

impl RegionBody {
    /// Create an empty body
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an element
    #[must_use]
    pub fn element(mut self, name: impl Into<String>, tag: impl Into<Tag>, selector: Selector) -> Self {
        self.elements.push(ElementDeclaration::new(name, tag, selector));
        self
    }

    /// Declare a nested single region
    #[must_use]
    pub fn has_one(mut self, name: impl Into<String>, body: Self) -> Self {
        self.regions.push(NestedRegion::One {
            name: name.into(),
            body: Rc::new(body),
        });
        self
    }

    /// Declare a nested collection, optionally below the first `within` match
    #[must_use]
    pub fn has_many(
        mut self,
        name: impl Into<String>,
        each: Selector,
        within: Option<Selector>,
        body: Self,
    ) -> Self {
        self.regions.push(NestedRegion::Many {
            name: name.into(),
            each,
            within: within.map(Within::Locator),
            body: Rc::new(body),
        });
        self
    }

    /// Declare a nested collection below the scope `scope` computes from the
    /// enclosing inline region
    #[must_use]
    pub fn has_many_within_scope<F>(
        mut self,
        name: impl Into<String>,
        each: Selector,
        scope: F,
        body: Self,
    ) -> Self
    where
        F: Fn(&InlineRegion) -> PageResult<Scope> + 'static,
    {
        self.regions.push(NestedRegion::Many {
            name: name.into(),
            each,
            within: Some(Within::Scope(Rc::new(scope))),
            body: Rc::new(body),
        });
        self
    }

    /// Declared elements, in declaration order
    #[must_use]
    pub fn elements(&self) -> &[ElementDeclaration] {
        &self.elements
    }

    /// Names of nested regions, in declaration order
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(NestedRegion::name)
    }

    fn declaration(&self, name: &str) -> Option<&ElementDeclaration> {
        self.elements.iter().find(|decl| decl.name == name)
    }

    fn nested(&self, name: &str) -> Option<&NestedRegion> {
        self.regions.iter().find(|region| region.name() == name)
    }
}

/// Anonymous region built from a [`RegionBody`]
#[derive(Debug, Clone, PartialEq)]
pub struct InlineRegion {
    context: PageContext,
    name: String,
    body: Rc<RegionBody>,
}

impl InlineRegion {
    pub(crate) fn new(context: PageContext, name: String, body: Rc<RegionBody>) -> Self {
        Self { context, name, body }
    }

    /// Name the region was declared with
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared body
    #[must_use]
    pub fn body(&self) -> &RegionBody {
        &self.body
    }

    fn declaration(&self, name: &str) -> PageResult<&ElementDeclaration> {
        self.body.declaration(name).ok_or_else(|| PageError::UnknownAttribute {
            region: self.name.clone(),
            attribute: name.to_string(),
        })
    }

    fn undeclared(&self, name: &str) -> PageError {
        PageError::UndeclaredRegion {
            owner: self.name.clone(),
            name: name.to_string(),
        }
    }

    /// Locate the declared element `name` within this region
    pub fn locate(&self, name: &str) -> PageResult<Scope> {
        let declaration = self.declaration(name)?;
        self.element(&declaration.located_selector())
    }

    /// Text of the declared element `name`; its tag must be readable
    pub fn read(&self, name: &str) -> PageResult<String> {
        let declaration = self.declaration(name)?;
        if !self.session().capabilities().is_readable(declaration.tag()) {
            return Err(PageError::UnknownAttribute {
                region: self.name.clone(),
                attribute: declaration.accessor_name(),
            });
        }
        trace!(region = %self.name, element = name, "reading element");
        let scope = self.element(&declaration.located_selector())?;
        self.browser().text(&scope)
    }

    /// Nested single region `name`
    pub fn region(&self, name: &str) -> PageResult<Self> {
        match self.body.nested(name) {
            Some(NestedRegion::One { name, body }) => {
                HasOne::inline_shared(name.clone(), Rc::clone(body)).resolve(self)
            }
            _ => Err(self.undeclared(name)),
        }
    }

    fn has_many(&self, name: &str) -> PageResult<HasMany<Self, Self>> {
        match self.body.nested(name) {
            Some(NestedRegion::Many {
                name,
                each,
                within,
                body,
            }) => Ok(
                HasMany::inline_shared(name.clone(), each.clone(), Rc::clone(body))
                    .with_within(within.clone()),
            ),
            _ => Err(self.undeclared(name)),
        }
    }

    /// Nested collection `name`
    pub fn regions(&self, name: &str) -> PageResult<Vec<Self>> {
        self.has_many(name)?.resolve(self)
    }

    /// Finder of a nested collection, e.g. `item` for `items`
    pub fn find(&self, finder_name: &str, attributes: &Attributes) -> PageResult<Self> {
        let collection = self
            .body
            .regions
            .iter()
            .find(|region| {
                matches!(region, NestedRegion::Many { .. })
                    && finder::finder_name(region.name()) == finder_name
            })
            .ok_or_else(|| self.undeclared(finder_name))?;
        let items = self.regions(collection.name())?;
        find_first(finder_name, items, attributes)
    }
}

impl PageObject for InlineRegion {
    fn context(&self) -> &PageContext {
        &self.context
    }
}

impl Findable for InlineRegion {
    fn read_attribute(&self, name: &str) -> PageResult<Value> {
        self.read(name).map(Value::String)
    }
}
