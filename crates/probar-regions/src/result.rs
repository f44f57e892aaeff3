//! Result and error types for Probar regions.

use thiserror::Error;

use crate::region::Attributes;

/// Result type for region operations
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur while resolving page objects and regions
#[derive(Debug, Error)]
pub enum PageError {
    /// Neither `+s` nor `+es` form of a tag is a container method
    #[error("Can't find plural form for {tag}!")]
    CannotPluralize {
        /// Singular tag that was tried
        tag: String,
    },

    /// Finder found no collection item with the requested attributes
    #[error("No {finder} matching: {attributes}.")]
    NoMatch {
        /// Finder method name (e.g. `user`)
        finder: String,
        /// Requested attribute mapping
        attributes: Attributes,
    },

    /// Region cannot read the requested attribute
    #[error("{region} has no readable attribute `{attribute}`")]
    UnknownAttribute {
        /// Region type or name
        region: String,
        /// Attribute that was requested
        attribute: String,
    },

    /// Nested region name not declared in an inline region body
    #[error("Region `{name}` is not declared on {owner}")]
    UndeclaredRegion {
        /// Region that was asked
        owner: String,
        /// Region name that was requested
        name: String,
    },

    /// Scope required by an operation does not exist in the document
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that failed to match
        selector: String,
    },

    /// Element driver failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_pluralize_message() {
        let err = PageError::CannotPluralize {
            tag: "foo".to_string(),
        };
        assert_eq!(err.to_string(), "Can't find plural form for foo!");
    }

    #[test]
    fn test_no_match_message() {
        let err = PageError::NoMatch {
            finder: "user".to_string(),
            attributes: Attributes::from([("name", "Bob")]),
        };
        assert_eq!(err.to_string(), "No user matching: {name: \"Bob\"}.");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PageError = io.into();
        assert!(matches!(err, PageError::Io(_)));
    }
}
