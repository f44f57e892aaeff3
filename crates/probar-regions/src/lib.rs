//! Probar Regions: Page Object Regions for Browser Tests
//!
//! Page objects declare reusable *regions*: a single nested component
//! (`has_one`) or a collection of repeated components (`has_many`), each
//! scoped to part of the document and carrying a back-reference to the
//! object that produced it. Collections get a singular finder that returns
//! the first item whose attributes match.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  PROBAR REGIONS Architecture                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Page       │    │ HasOne /   │    │ Element    │            │
//! │   │ Object     │───►│ HasMany    │───►│ Driver     │            │
//! │   │ (Session)  │    │ Resolution │    │ (Browser)  │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! │         │                 │                                     │
//! │         ▼                 ▼                                     │
//! │   ┌────────────┐    ┌────────────┐                              │
//! │   │ Capability │    │ Collection │                              │
//! │   │ Registry   │    │ + Finder   │                              │
//! │   └────────────┘    └────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod result;

/// Proxy method catalog of the element container
#[allow(clippy::must_use_candidate)]
pub mod catalog;

/// Capability registry: readable, clickable and settable element kinds
#[allow(clippy::must_use_candidate, clippy::missing_const_for_fn)]
pub mod capabilities;

/// YAML/JSON configuration
#[allow(clippy::missing_errors_doc)]
pub mod config;

/// Element driver abstraction
#[allow(clippy::missing_errors_doc)]
pub mod driver;

/// Element locators
pub mod locator;

/// Logging setup
#[allow(clippy::missing_errors_doc)]
pub mod logging;

/// In-memory document for tests
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
pub mod mock;

/// Region naming conventions
pub mod naming;

/// Page objects and the region constructor contract
#[allow(clippy::missing_errors_doc)]
pub mod page;

/// Pluralization of element kinds
mod plural;

/// `has_one` / `has_many` regions, collections and finders
#[allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]
pub mod region;

/// Declaration macros
mod macros;

pub use capabilities::{Capabilities, Capability, Tag, TagSet};
pub use catalog::{container_methods, is_proxied, ProxyMethodCatalog};
pub use config::RegionsConfig;
pub use driver::{Browser, ElementDriver, ElementHandle, Scope};
pub use locator::{Criterion, Selector};
pub use logging::{init_logging, init_logging_from, log_subscriber};
pub use page::{PageContext, PageObject, Parent, Region, Session};
pub use plural::{is_plural, pluralize};
pub use region::{
    find_first, Attributes, CollectionItem, CollectionRegion, Findable, HasMany, HasOne,
    InlineRegion, RegionBody, RegionCollection, Within,
};
pub use result::{PageError, PageResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::capabilities::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::locator::*;
    pub use super::logging::*;
    pub use super::mock::*;
    pub use super::page::*;
    pub use super::region::*;
    pub use super::result::*;
    pub use super::{
        impl_collection_region, impl_page_object, impl_region, is_plural, pluralize, regions,
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::prelude::*;
    use serde_json::Value;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct BoardPage {
        context: PageContext,
    }

    impl_page_object!(BoardPage);

    #[derive(Debug, Clone, PartialEq)]
    struct CardRegion {
        context: PageContext,
    }

    impl_region!(CardRegion);

    impl CardRegion {
        fn title(&self) -> PageResult<String> {
            self.text(&Selector::class("title"))
        }
    }

    impl Findable for CardRegion {
        fn read_attribute(&self, name: &str) -> PageResult<Value> {
            match name {
                "title" => Ok(self.title()?.into()),
                other => Err(unknown_attribute::<Self>(other)),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct CardsRegion {
        collection: RegionCollection<CardRegion>,
    }

    impl_collection_region!(CardsRegion, CardRegion);

    #[derive(Debug, Clone, PartialEq)]
    struct HeaderRegion {
        context: PageContext,
    }

    impl_region!(HeaderRegion);

    regions! {
        impl BoardPage {
            has_one header: HeaderRegion;
            has_many cards / card: CardRegion { each: Selector::class("card") };
            has_many lanes / lane => CardsRegion {
                each: Selector::class("card"),
                within: Selector::class("lane"),
            };
            has_one footer { body: RegionBody::new().element("note", "p", Selector::new()) };
        }
    }

    fn board() -> BoardPage {
        let document = Rc::new(MockDocument::new());
        let lane = document.append(MockElement::new("div").class("lane"));
        for title in ["Todo", "Doing"] {
            let card = document
                .append_to(&lane, MockElement::new("div").class("card"))
                .unwrap();
            let _ = document
                .append_to(&card, MockElement::new("span").class("title").text(title))
                .unwrap();
        }
        let _ = document.append(MockElement::new("p").text("footer note"));
        BoardPage {
            context: PageContext::new(Session::new(document)),
        }
    }

    #[test]
    fn test_generated_accessors() {
        let board = board();
        assert!(board.header().unwrap().region_element().is_document());
        assert_eq!(board.cards().unwrap().len(), 2);
        assert_eq!(board.card(&Attributes::from([("title", "Doing")])).unwrap().title().unwrap(), "Doing");
        assert_eq!(board.footer().unwrap().read("note").unwrap(), "footer note");
    }

    #[test]
    fn test_generated_collection() {
        let board = board();
        let lanes = board.lanes().unwrap();
        let titles: Vec<String> = (&lanes).into_iter().map(|card| card.title().unwrap()).collect();
        assert_eq!(titles, vec!["Todo", "Doing"]);
        let todo = board.lane(&Attributes::from([("title", "Todo")])).unwrap();
        assert!(todo.parent().unwrap().is::<CardsRegion>());
    }
}
