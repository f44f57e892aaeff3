//! Region collections.
//!
//! A collection holds the matched elements of a `has_many` declaration, or
//! regions built elsewhere, and materializes them into item regions whose
//! parent is the collection itself.

use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::driver::{ElementHandle, Scope};
use crate::page::{PageContext, PageObject, Parent, Region, Session};

/// A raw element still to be wrapped, or an already built region
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionItem<R> {
    /// Matched element, wrapped on access
    Element(ElementHandle),
    /// Prebuilt region, yielded as is
    Region(R),
}

impl<R> From<ElementHandle> for CollectionItem<R> {
    fn from(element: ElementHandle) -> Self {
        Self::Element(element)
    }
}

/// Ordered items of a collection region, scoped to the collection's element.
pub struct RegionCollection<R> {
    context: PageContext,
    items: Rc<[CollectionItem<R>]>,
}

impl<R: Region> RegionCollection<R> {
    /// Create a collection scoped to `region_element`
    pub fn new<I, T>(session: Session, region_element: Scope, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CollectionItem<R>>,
    {
        Self {
            context: PageContext::collection(session, region_element),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Page object state of the collection
    #[must_use]
    pub const fn context(&self) -> &PageContext {
        &self.context
    }

    /// Element the collection is scoped to
    #[must_use]
    pub const fn region_element(&self) -> &Scope {
        self.context.region_element()
    }

    /// Unmaterialized items
    #[must_use]
    pub fn items(&self) -> &[CollectionItem<R>] {
        &self.items
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Materialize the items in order.
    ///
    /// Elements become regions owned by `parent`, with an identity derived
    /// from the parent and the element, so repeated calls yield equal regions.
    #[must_use]
    pub fn regions(&self, parent: &Parent) -> Vec<R> {
        let session = self.context.session();
        self.items
            .iter()
            .map(|item| match item {
                CollectionItem::Element(element) => {
                    let id = Uuid::new_v5(&parent.id(), element.id.as_bytes());
                    let context = PageContext::region(
                        session.clone(),
                        Scope::Element(element.clone()),
                        parent.clone(),
                    )
                    .with_id(id);
                    R::from_context(context)
                }
                CollectionItem::Region(region) => region.clone(),
            })
            .collect()
    }
}

impl<R> Clone for RegionCollection<R> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            items: Rc::clone(&self.items),
        }
    }
}

impl<R> fmt::Debug for RegionCollection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionCollection")
            .field("id", &self.context.id())
            .field("region_element", self.context.region_element())
            .field("len", &self.items.len())
            .finish()
    }
}

impl<R> PartialEq for RegionCollection<R> {
    fn eq(&self, other: &Self) -> bool {
        self.context == other.context
    }
}

/// Dedicated collection type for a `has_many` region.
///
/// Implementors hold a [`RegionCollection`] and get iteration, lookup and
/// subsetting from the trait.
///
/// ```ignore
/// #[derive(Debug, Clone)]
/// struct UsersRegion {
///     collection: RegionCollection<UserRegion>,
/// }
///
/// impl_collection_region!(UsersRegion, UserRegion);
/// ```
pub trait CollectionRegion: PageObject {
    /// Region type of the items
    type Item: Region;

    /// Wrap a collection
    fn from_collection(collection: RegionCollection<Self::Item>) -> Self;

    /// Wrapped collection
    fn collection(&self) -> &RegionCollection<Self::Item>;

    /// Items as regions whose parent is this collection
    fn region_collection(&self) -> Vec<Self::Item> {
        self.collection().regions(&self.as_parent())
    }

    /// Iterate over the items
    fn iter(&self) -> std::vec::IntoIter<Self::Item> {
        self.region_collection().into_iter()
    }

    /// Item at `index`
    fn get(&self, index: usize) -> Option<Self::Item> {
        self.region_collection().into_iter().nth(index)
    }

    /// Number of items
    fn len(&self) -> usize {
        self.collection().len()
    }

    /// Whether there are no items
    fn is_empty(&self) -> bool {
        self.collection().is_empty()
    }

    /// New collection over `items` with this collection's session and scope
    #[must_use]
    fn derive(&self, items: Vec<CollectionItem<Self::Item>>) -> Self
    where
        Self: Sized,
    {
        Self::from_collection(RegionCollection::new(
            self.session().clone(),
            self.region_element().clone(),
            items,
        ))
    }

    /// New collection holding the given regions as they are
    #[must_use]
    fn subset(&self, regions: Vec<Self::Item>) -> Self
    where
        Self: Sized,
    {
        self.derive(regions.into_iter().map(CollectionItem::Region).collect())
    }
}
