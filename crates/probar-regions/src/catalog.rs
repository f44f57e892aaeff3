//! Proxy Method Catalog
//!
//! The set of operation names the element driver's container exposes: one
//! accessor per element kind plus its plural collection accessor. Accessor
//! generators consult it to decide whether a name can be proxied, and the
//! pluralizer uses it to find plural forms.
//!
//! The process-wide catalog is computed on first use and never changes
//! afterwards.

use std::collections::HashSet;
use std::sync::OnceLock;

use tracing::debug;

/// Internal container method that is never proxied
pub const EXCLUDED_METHOD: &str = "extract_selector";

/// Element kinds with a container accessor
pub const CONTAINER_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cell", "checkbox", "cite",
    "code", "col", "colgroup", "data", "datalist", "date_field", "date_time_field", "dd", "del",
    "details", "dfn", "dialog", "div", "dl", "dt", "element", "em", "embed", "field_set",
    "figcaption", "figure", "file_field", "font", "footer", "form", "frame", "frameset", "h1",
    "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hidden", "hr", "html", "i",
    "iframe", "image", "input", "ins", "kbd", "label", "legend", "li", "link", "main", "map",
    "mark", "menu", "meta", "meter", "nav", "noscript", "object", "ol", "optgroup", "option",
    "output", "p", "param", "picture", "pre", "progress", "q", "radio", "radio_set", "row", "rp",
    "rt", "ruby", "s", "samp", "script", "section", "select", "select_list", "small", "source",
    "span", "strong", "style", "sub", "summary", "sup", "svg", "table", "tbody", "td",
    "template", "text_field", "textarea", "tfoot", "th", "thead", "time", "title", "tr",
    "track", "u", "ul", "var", "video", "wbr",
];

/// Set of container operation names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyMethodCatalog {
    methods: HashSet<String>,
}

impl ProxyMethodCatalog {
    /// Build a catalog from method names, dropping [`EXCLUDED_METHOD`]
    #[must_use]
    pub fn from_methods<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut methods: HashSet<String> = methods.into_iter().map(Into::into).collect();
        let _ = methods.remove(EXCLUDED_METHOD);
        Self { methods }
    }

    /// Build the catalog of the container: every tag accessor and its plural
    #[must_use]
    pub fn container() -> Self {
        let methods = CONTAINER_TAGS
            .iter()
            .flat_map(|tag| [(*tag).to_string(), container_plural(tag)])
            .chain(std::iter::once(EXCLUDED_METHOD.to_string()));
        Self::from_methods(methods)
    }

    /// Whether `method` is a container operation
    #[must_use]
    pub fn contains(&self, method: impl AsRef<str>) -> bool {
        self.methods.contains(method.as_ref())
    }

    /// Number of methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Iterate over method names in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }
}

fn container_plural(tag: &str) -> String {
    if tag.ends_with('s') || tag.ends_with('x') {
        format!("{tag}es")
    } else {
        format!("{tag}s")
    }
}

/// Process-wide container catalog, computed once
pub fn container_methods() -> &'static ProxyMethodCatalog {
    static CATALOG: OnceLock<ProxyMethodCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let catalog = ProxyMethodCatalog::container();
        debug!(methods = catalog.len(), "computed proxy method catalog");
        catalog
    })
}

/// Return true if `method` can be proxied to the element driver
///
/// ```ignore
/// assert!(is_proxied("div"));
/// assert!(!is_proxied("to_a"));
/// ```
pub fn is_proxied(method: impl AsRef<str>) -> bool {
    container_methods().contains(method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_method_removed() {
        assert!(!container_methods().contains(EXCLUDED_METHOD));
        let custom = ProxyMethodCatalog::from_methods(["div", EXCLUDED_METHOD]);
        assert_eq!(custom.len(), 1);
        assert!(!custom.contains(EXCLUDED_METHOD));
    }

    #[test]
    fn test_singular_and_plural_present() {
        for method in ["div", "divs", "checkbox", "checkboxes", "address", "addresses", "ps"] {
            assert!(is_proxied(method), "{method} should be proxied");
        }
    }

    #[test]
    fn test_unknown_method_is_false() {
        assert!(!is_proxied("to_a"));
        assert!(!is_proxied(""));
        assert!(!is_proxied("checkboxs"));
    }

    #[test]
    fn test_catalog_computed_once() {
        let first: *const ProxyMethodCatalog = container_methods();
        let second: *const ProxyMethodCatalog = container_methods();
        assert_eq!(first, second);
    }

    #[test]
    fn test_string_and_str_inputs_agree() {
        assert_eq!(is_proxied("span"), is_proxied(String::from("span")));
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(container_methods().len(), CONTAINER_TAGS.len() * 2);
        assert!(!container_methods().is_empty());
        assert_eq!(container_methods().iter().count(), container_methods().len());
    }
}
