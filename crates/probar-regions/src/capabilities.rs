//! Capability Registry
//!
//! Classifies element kinds by the accessors an accessor generator should
//! produce for them: a read accessor returning text or value, a click
//! accessor, and a set accessor.
//!
//! ## Toyota Way Application:
//! - **Poka-Yoke**: tags are compared by name whether given as `&str` or `String`
//! - **Kaizen**: host code extends the sets at runtime without forking defaults

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Default readable element kinds
pub const DEFAULT_READABLE: &[&str] = &[
    "div", "span", "p", "h1", "h2", "h3", "h4", "h5", "h6", "select_list", "text_field",
    "textarea", "checkbox", "radio",
];

/// Default clickable element kinds
pub const DEFAULT_CLICKABLE: &[&str] = &["a", "link", "button"];

/// Default settable element kinds
pub const DEFAULT_SETTABLE: &[&str] = &[
    "text_field",
    "file_field",
    "textarea",
    "checkbox",
    "select_list",
];

/// Identifier naming an element kind (e.g. `div`, `text_field`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Create a tag
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Tag name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered set of tags
pub type TagSet = BTreeSet<Tag>;

/// Accessor kind an element can support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read accessor (`name`)
    Read,
    /// Click accessor (`name`)
    Click,
    /// Set accessor (`name=`)
    Set,
}

/// Readable, clickable and settable tag sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    readable: TagSet,
    clickable: TagSet,
    settable: TagSet,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            readable: tag_set(DEFAULT_READABLE),
            clickable: tag_set(DEFAULT_CLICKABLE),
            settable: tag_set(DEFAULT_SETTABLE),
        }
    }
}

fn tag_set(tags: &[&str]) -> TagSet {
    tags.iter().map(|tag| Tag::from(*tag)).collect()
}

impl Capabilities {
    /// Create the registry with default contents
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with no tags at all
    #[must_use]
    pub fn empty() -> Self {
        Self {
            readable: TagSet::new(),
            clickable: TagSet::new(),
            settable: TagSet::new(),
        }
    }

    /// Readable tags
    #[must_use]
    pub fn readable(&self) -> &TagSet {
        &self.readable
    }

    /// Clickable tags
    #[must_use]
    pub fn clickable(&self) -> &TagSet {
        &self.clickable
    }

    /// Settable tags
    #[must_use]
    pub fn settable(&self) -> &TagSet {
        &self.settable
    }

    /// Mutable readable tags
    pub fn readable_mut(&mut self) -> &mut TagSet {
        &mut self.readable
    }

    /// Mutable clickable tags
    pub fn clickable_mut(&mut self) -> &mut TagSet {
        &mut self.clickable
    }

    /// Mutable settable tags
    pub fn settable_mut(&mut self) -> &mut TagSet {
        &mut self.settable
    }

    /// Returns true if tag can have a read accessor
    #[must_use]
    pub fn is_readable(&self, tag: impl AsRef<str>) -> bool {
        self.readable.contains(tag.as_ref())
    }

    /// Returns true if tag can have a click accessor
    #[must_use]
    pub fn is_clickable(&self, tag: impl AsRef<str>) -> bool {
        self.clickable.contains(tag.as_ref())
    }

    /// Returns true if tag can have a set accessor
    #[must_use]
    pub fn is_settable(&self, tag: impl AsRef<str>) -> bool {
        self.settable.contains(tag.as_ref())
    }

    /// Mark a tag readable. Returns false if it already was.
    pub fn add_readable(&mut self, tag: impl Into<Tag>) -> bool {
        self.readable.insert(tag.into())
    }

    /// Mark a tag clickable. Returns false if it already was.
    pub fn add_clickable(&mut self, tag: impl Into<Tag>) -> bool {
        self.clickable.insert(tag.into())
    }

    /// Mark a tag settable. Returns false if it already was.
    pub fn add_settable(&mut self, tag: impl Into<Tag>) -> bool {
        self.settable.insert(tag.into())
    }

    /// Stop treating a tag as readable
    pub fn remove_readable(&mut self, tag: impl AsRef<str>) -> bool {
        self.readable.remove(tag.as_ref())
    }

    /// Stop treating a tag as clickable
    pub fn remove_clickable(&mut self, tag: impl AsRef<str>) -> bool {
        self.clickable.remove(tag.as_ref())
    }

    /// Stop treating a tag as settable
    pub fn remove_settable(&mut self, tag: impl AsRef<str>) -> bool {
        self.settable.remove(tag.as_ref())
    }

    /// Whether a tag supports the given accessor kind
    #[must_use]
    pub fn supports(&self, tag: impl AsRef<str>, capability: Capability) -> bool {
        match capability {
            Capability::Read => self.is_readable(tag),
            Capability::Click => self.is_clickable(tag),
            Capability::Set => self.is_settable(tag),
        }
    }

    /// Every accessor kind a tag supports, in read/click/set order
    #[must_use]
    pub fn capabilities_of(&self, tag: impl AsRef<str>) -> Vec<Capability> {
        let tag = tag.as_ref();
        [Capability::Read, Capability::Click, Capability::Set]
            .into_iter()
            .filter(|capability| self.supports(tag, *capability))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod default_tests {
        use super::*;

        #[test]
        fn test_default_readable() {
            let caps = Capabilities::new();
            assert!(caps.is_readable("div"));
            assert!(caps.is_readable("radio"));
            assert!(!caps.is_readable("body"));
            assert_eq!(caps.readable().len(), DEFAULT_READABLE.len());
        }

        #[test]
        fn test_default_clickable() {
            let caps = Capabilities::new();
            assert!(caps.is_clickable("button"));
            assert!(!caps.is_clickable("div"));
        }

        #[test]
        fn test_default_settable() {
            let caps = Capabilities::new();
            assert!(caps.is_settable("text_field"));
            assert!(!caps.is_settable("button"));
        }

        #[test]
        fn test_empty() {
            let caps = Capabilities::empty();
            assert!(caps.readable().is_empty());
            assert!(!caps.is_clickable("a"));
        }
    }

    mod normalization_tests {
        use super::*;

        #[test]
        fn test_str_string_and_tag_agree() {
            let caps = Capabilities::new();
            assert!(caps.is_readable("span"));
            assert!(caps.is_readable(String::from("span")));
            assert!(caps.is_readable(Tag::new("span")));
        }

        #[test]
        fn test_case_is_significant() {
            assert!(!Capabilities::new().is_readable("DIV"));
        }
    }

    mod mutation_tests {
        use super::*;

        #[test]
        fn test_add_and_remove() {
            let mut caps = Capabilities::new();
            assert!(caps.add_clickable("div"));
            assert!(!caps.add_clickable("div"));
            assert!(caps.is_clickable("div"));
            assert!(caps.remove_clickable("div"));
            assert!(!caps.is_clickable("div"));
        }

        #[test]
        fn test_mutable_set_access() {
            let mut caps = Capabilities::new();
            let _ = caps.settable_mut().insert(Tag::new("date_field"));
            let _ = caps.readable_mut().insert(Tag::new("li"));
            assert!(caps.is_settable("date_field"));
            assert!(caps.is_readable("li"));
            assert!(caps.remove_settable("date_field"));
            assert!(caps.remove_readable("li"));
            assert!(caps.add_settable("date_field"));
            assert!(caps.add_readable("li"));
        }
    }

    mod capability_tests {
        use super::*;

        #[test]
        fn test_capabilities_of() {
            let caps = Capabilities::new();
            assert_eq!(
                caps.capabilities_of("text_field"),
                vec![Capability::Read, Capability::Set]
            );
            assert_eq!(caps.capabilities_of("button"), vec![Capability::Click]);
            assert!(caps.capabilities_of("body").is_empty());
        }

        #[test]
        fn test_supports() {
            let caps = Capabilities::new();
            assert!(caps.supports("a", Capability::Click));
            assert!(!caps.supports("a", Capability::Read));
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_membership_matches_sets(tag in "[a-z_0-9]{1,12}") {
                let caps = Capabilities::new();
                prop_assert_eq!(caps.is_readable(&tag), caps.readable().contains(tag.as_str()));
                prop_assert_eq!(caps.is_clickable(&tag), caps.clickable().contains(tag.as_str()));
                prop_assert_eq!(caps.is_settable(&tag), caps.settable().contains(tag.as_str()));
            }

            #[test]
            fn prop_added_tag_is_member(tag in "[a-z_]{1,12}") {
                let mut caps = Capabilities::empty();
                let _ = caps.add_readable(tag.as_str());
                prop_assert!(caps.is_readable(&tag));
                prop_assert!(!caps.is_settable(&tag));
            }
        }
    }
}
