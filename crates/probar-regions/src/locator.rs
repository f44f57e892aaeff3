//! Locator abstraction for element selection.
//!
//! # Design Philosophy
//!
//! - **Criteria Maps**: a selector is a set of named criteria, every one of
//!   which must hold for an element to match
//! - **Class Tokens**: `class` matches whitespace-separated tokens and
//!   supports `!token` negation
//! - **Fluent API**: chainable methods for building selectors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::driver::ElementHandle;

/// Criterion key for the element tag
pub const TAG_NAME: &str = "tag_name";

/// Criterion key for class tokens
pub const CLASS: &str = "class";

/// Criterion key for element text
pub const TEXT: &str = "text";

/// Expected value of a single criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Criterion {
    /// Single expected value
    One(String),
    /// Several values: all of them for `class`, any of them otherwise
    Many(Vec<String>),
}

impl Criterion {
    fn values(&self) -> Vec<&str> {
        match self {
            Self::One(value) => vec![value.as_str()],
            Self::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(value) => write!(f, "{value:?}"),
            Self::Many(values) => write!(f, "{values:?}"),
        }
    }
}

/// Selector for locating elements, e.g. `{class: "for-user"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector {
    criteria: BTreeMap<String, Criterion>,
}

impl Selector {
    /// Create an empty selector (matches every element)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a class selector
    #[must_use]
    pub fn class(class: impl Into<String>) -> Self {
        Self::new().with(CLASS, class)
    }

    /// Create a tag selector
    #[must_use]
    pub fn tag_name(tag: impl Into<String>) -> Self {
        Self::new().with(TAG_NAME, tag)
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::new().with("id", id)
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with(TEXT, text)
    }

    /// Add a single-valued criterion, replacing any previous one for `key`
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self
            .criteria
            .insert(key.into(), Criterion::One(value.into()));
        self
    }

    /// Add a multi-valued criterion, replacing any previous one for `key`
    #[must_use]
    pub fn with_all<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        let _ = self.criteria.insert(key.into(), Criterion::Many(values));
        self
    }

    /// Get a criterion by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Criterion> {
        self.criteria.get(key)
    }

    /// Number of criteria
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Whether the selector has no criteria
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Check whether an element satisfies every criterion
    #[must_use]
    pub fn matches(&self, element: &ElementHandle) -> bool {
        self.criteria
            .iter()
            .all(|(key, criterion)| criterion_matches(key, criterion, element))
    }
}

fn criterion_matches(key: &str, criterion: &Criterion, element: &ElementHandle) -> bool {
    match key {
        TAG_NAME => criterion
            .values()
            .iter()
            .any(|tag| *tag == element.tag_name),
        CLASS => {
            let tokens: Vec<&str> = element
                .attribute(CLASS)
                .map(|classes| classes.split_whitespace().collect())
                .unwrap_or_default();
            criterion
                .values()
                .iter()
                .flat_map(|value| value.split_whitespace())
                .all(|token| match token.strip_prefix('!') {
                    Some(excluded) => !tokens.contains(&excluded),
                    None => tokens.contains(&token),
                })
        }
        TEXT => {
            let text = element.text_content.as_deref().unwrap_or_default().trim();
            criterion.values().iter().any(|expected| *expected == text)
        }
        _ => element
            .attribute(key)
            .is_some_and(|actual| criterion.values().iter().any(|expected| *expected == actual)),
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, criterion)) in self.criteria.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {criterion}")?;
        }
        f.write_str("}")
    }
}
