//! Mock Driver Module for Region Testing
//!
//! Provides an in-memory document so page objects and regions can be
//! exercised without a browser.
//!
//! ## Example
//!
//! ```rust,ignore
//! use probar_regions::mock::{MockDocument, MockElement};
//!
//! let document = Rc::new(MockDocument::new());
//! document.append(MockElement::new("div").class("for-user").text("Alice"));
//! let session = Session::new(document.clone());
//! ```

pub mod document;

pub use document::{MockDocument, MockElement};
