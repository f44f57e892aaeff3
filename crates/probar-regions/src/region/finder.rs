//! Finder Generator
//!
//! Every collection region gets a singular finder (`users` -> `user`) that
//! re-resolves the collection and returns the first item whose attributes
//! equal the requested values.

use serde_json::Value;
use std::any::type_name;
use std::fmt;

use tracing::debug;

use crate::result::{PageError, PageResult};

/// Insertion-ordered attribute name to expected value mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pairs: Vec<(String, Value)>,
}

impl Attributes {
    /// Create an empty mapping (matches every item)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expected value, replacing a previous one for `name`
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((name, value)),
        }
        self
    }

    /// Expected value for `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Iterate over pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(), |attributes, (key, value)| attributes.with(key, value))
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Regions whose attributes can be read by name
///
/// ```ignore
/// impl Findable for UserRegion {
///     fn read_attribute(&self, name: &str) -> PageResult<Value> {
///         match name {
///             "name" => Ok(self.name()?.into()),
///             other => Err(unknown_attribute::<Self>(other)),
///         }
///     }
/// }
/// ```
pub trait Findable {
    /// Read the attribute `name`
    fn read_attribute(&self, name: &str) -> PageResult<Value>;
}

/// Error for an attribute `R` cannot read
#[must_use]
pub fn unknown_attribute<R>(attribute: &str) -> PageError {
    PageError::UnknownAttribute {
        region: type_name::<R>().to_string(),
        attribute: attribute.to_string(),
    }
}

/// Finder method name for a collection region: one trailing `s` stripped
#[must_use]
pub fn finder_name(region_name: &str) -> String {
    region_name
        .strip_suffix('s')
        .unwrap_or(region_name)
        .to_string()
}

/// Whether `finder` equals [`finder_name`] of `region_name`.
///
/// Usable in constants, so generated finders are checked at compile time.
#[must_use]
pub const fn is_finder_name(region_name: &str, finder: &str) -> bool {
    let region = region_name.as_bytes();
    let finder = finder.as_bytes();
    let expected = if !region.is_empty() && region[region.len() - 1] == b's' {
        region.len() - 1
    } else {
        region.len()
    };
    if finder.len() != expected {
        return false;
    }
    let mut i = 0;
    while i < expected {
        if region[i] != finder[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// First item whose attributes all equal `attributes`.
///
/// # Errors
///
/// Returns [`PageError::NoMatch`] naming `finder` and the full mapping when
/// nothing matches. Attribute read errors propagate.
pub fn find_first<R, I>(finder: &str, items: I, attributes: &Attributes) -> PageResult<R>
where
    R: Findable,
    I: IntoIterator<Item = R>,
{
    debug!(finder, %attributes, "finding region");
    for item in items {
        if matches_all(&item, attributes)? {
            return Ok(item);
        }
    }
    Err(PageError::NoMatch {
        finder: finder.to_string(),
        attributes: attributes.clone(),
    })
}

fn matches_all<R: Findable>(item: &R, attributes: &Attributes) -> PageResult<bool> {
    for (name, expected) in attributes.iter() {
        if item.read_attribute(name)? != *expected {
            return Ok(false);
        }
    }
    Ok(true)
}
