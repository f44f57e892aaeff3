//! Property-based tests for probar-regions.
//!
//! Uses proptest to check collection, finder and naming invariants over
//! arbitrary documents and names.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use probar_regions::naming::{camelize, collection_type_name, element_type_name};
use probar_regions::prelude::*;
use proptest::prelude::*;
use serde_json::Value;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
struct ListPage {
    context: PageContext,
}

impl_page_object!(ListPage);

#[derive(Debug, Clone, PartialEq)]
struct ItemRegion {
    context: PageContext,
}

impl_region!(ItemRegion);

impl Findable for ItemRegion {
    fn read_attribute(&self, name: &str) -> PageResult<Value> {
        match name {
            "label" => Ok(self.browser().text(self.region_element())?.into()),
            other => Err(unknown_attribute::<Self>(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ItemsRegion {
    collection: RegionCollection<ItemRegion>,
}

impl_collection_region!(ItemsRegion, ItemRegion);

fn page(labels: &[String]) -> (Rc<MockDocument>, ListPage) {
    let document = Rc::new(MockDocument::new());
    for label in labels {
        let _ = document.append(MockElement::new("li").class("item").text(label.as_str()));
    }
    let page = ListPage {
        context: PageContext::new(Session::new(document.clone())),
    };
    (document, page)
}

fn items() -> HasMany<ListPage, ItemRegion> {
    HasMany::new("items", Selector::class("item"))
}

proptest! {
    /// One region per matching element, in document order.
    #[test]
    fn prop_collection_matches_document(labels in prop::collection::vec("[a-z]{1,8}", 0..8)) {
        let (_, page) = page(&labels);
        let regions = items().resolve(&page).unwrap();
        prop_assert_eq!(regions.len(), labels.len());
        for (region, label) in regions.iter().zip(&labels) {
            prop_assert_eq!(region.read_attribute("label").unwrap(), Value::from(label.as_str()));
        }
    }

    /// Iterating a dedicated collection twice yields equal items.
    #[test]
    fn prop_collection_iteration_is_stable(labels in prop::collection::vec("[a-z]{1,8}", 0..8)) {
        let (_, page) = page(&labels);
        let collection: ItemsRegion = items().resolve_collection(&page).unwrap();
        let first: Vec<ItemRegion> = collection.iter().collect();
        prop_assert_eq!(first, collection.region_collection());
    }

    /// The finder returns the first item with the requested label.
    #[test]
    fn prop_finder_returns_first_match(
        labels in prop::collection::vec("[a-c]", 1..8),
        wanted in "[a-c]",
    ) {
        let (_, page) = page(&labels);
        let result = items().find(&page, &Attributes::from([("label", wanted.as_str())]));
        match labels.iter().position(|label| *label == wanted) {
            Some(index) => {
                let found = result.unwrap();
                let all = items().resolve(&page).unwrap();
                prop_assert_eq!(found.region_element(), all[index].region_element());
            }
            None => {
                let no_match = matches!(result, Err(PageError::NoMatch { .. }));
                prop_assert!(no_match, "expected no match for {}", wanted);
            }
        }
    }

    /// Removing elements is reflected by the next access.
    #[test]
    fn prop_recomputed_after_removal(
        labels in prop::collection::vec("[a-z]{1,8}", 1..8),
        remove in 0usize..8,
    ) {
        let (document, page) = page(&labels);
        let has_many = items();
        let before = has_many.resolve(&page).unwrap();
        let index = remove % before.len();
        prop_assert!(document.remove(before[index].region_element().element().unwrap()));
        prop_assert_eq!(has_many.resolve(&page).unwrap().len(), labels.len() - 1);
    }

    /// Collection type names differ from item type names by the trailing `s`.
    #[test]
    fn prop_conventional_names(name in "[a-z]{1,6}(_[a-z]{1,6}){0,2}s") {
        let item = element_type_name(&name, true);
        let collection = collection_type_name(&name);
        prop_assert_eq!(format!("{}sRegion", item.strip_suffix("Region").unwrap()), collection);
        prop_assert!(camelize(&name).chars().next().unwrap().is_uppercase());
    }
}
