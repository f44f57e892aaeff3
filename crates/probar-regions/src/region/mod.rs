//! Regions: reusable page object components.
//!
//! - [`definition`]: `has_one` / `has_many` declarations and their resolution
//! - [`collection`]: dedicated collection regions
//! - [`inline`]: regions declared with a body instead of a type
//! - [`finder`]: singular finders over collections

pub mod collection;
pub mod definition;
pub mod finder;
pub mod inline;

pub use collection::{CollectionItem, CollectionRegion, RegionCollection};
pub use definition::{HasMany, HasOne, ScopeFn, Within};
pub use finder::{
    find_first, finder_name, is_finder_name, unknown_attribute, Attributes, Findable,
};
pub use inline::{ElementDeclaration, InlineRegion, RegionBody, ANY_ELEMENT};
