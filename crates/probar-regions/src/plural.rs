//! Pluralization Resolver
//!
//! Plural forms are looked up in the proxy method catalog, not derived
//! from a dictionary: `div` pluralizes to `divs` because the container has a
//! `divs` method, and `checkbox` to `checkboxes` for the same reason.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::{container_methods, ProxyMethodCatalog};
use crate::result::{PageError, PageResult};

fn plural_suffix() -> &'static Regex {
    static SUFFIX: OnceLock<Regex> = OnceLock::new();
    SUFFIX.get_or_init(|| Regex::new("e?s$").expect("plural suffix pattern is valid"))
}

impl ProxyMethodCatalog {
    /// Pluralize an element tag.
    ///
    /// Tries `tag + "s"` first, then `tag + "es"`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::CannotPluralize`] when neither form is in the catalog.
    pub fn pluralize(&self, tag: impl AsRef<str>) -> PageResult<String> {
        let tag = tag.as_ref();
        [format!("{tag}s"), format!("{tag}es")]
            .into_iter()
            .find(|plural| self.contains(plural))
            .ok_or_else(|| PageError::CannotPluralize {
                tag: tag.to_string(),
            })
    }

    /// Whether `name` is an element accessor in plural form.
    ///
    /// True iff `name` ends in `s` and both `name` and `name` with its
    /// `e?s` suffix stripped are in the catalog.
    #[must_use]
    pub fn is_plural(&self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        if !name.ends_with('s') {
            return false;
        }
        let singular = plural_suffix().replace(name, "");
        self.contains(name) && self.contains(singular.as_ref())
    }
}

/// Pluralize a tag against the process-wide container catalog.
///
/// ```ignore
/// assert_eq!(pluralize("div")?, "divs");
/// assert_eq!(pluralize("checkbox")?, "checkboxes");
/// ```
pub fn pluralize(tag: impl AsRef<str>) -> PageResult<String> {
    container_methods().pluralize(tag)
}

/// Whether `name` is a plural accessor of the process-wide container catalog.
///
/// ```ignore
/// assert!(is_plural("divs"));
/// assert!(!is_plural("div"));
/// ```
pub fn is_plural(name: impl AsRef<str>) -> bool {
    container_methods().is_plural(name)
}
