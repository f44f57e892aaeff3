//! In-memory element driver.
//!
//! `MockDocument` keeps an element tree behind a `RefCell` so tests can
//! mutate the document between accessor calls while regions hold the same
//! shared browser handle.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use crate::driver::{ElementDriver, ElementHandle, Scope};
use crate::locator::Selector;
use crate::result::{PageError, PageResult};

/// Element to be inserted into a [`MockDocument`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    tag_name: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
}

impl MockElement {
    /// Create an element with the given tag
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: BTreeMap::new(),
            text: None,
        }
    }

    /// Set the class attribute
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Set an attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set own text content
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[derive(Debug)]
struct Node {
    handle: ElementHandle,
    parent: Option<String>,
    children: Vec<String>,
}

#[derive(Debug, Default)]
struct DocumentState {
    nodes: HashMap<String, Node>,
    roots: Vec<String>,
    next_id: u64,
}

impl DocumentState {
    fn insert(&mut self, parent: Option<&str>, element: MockElement) -> ElementHandle {
        self.next_id += 1;
        let id = format!("e{}", self.next_id);
        let handle = ElementHandle {
            id: id.clone(),
            tag_name: element.tag_name,
            attributes: element.attributes,
            text_content: element.text,
        };
        match parent {
            Some(parent_id) => {
                if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                    parent_node.children.push(id.clone());
                }
            }
            None => self.roots.push(id.clone()),
        }
        let _ = self.nodes.insert(
            id,
            Node {
                handle: handle.clone(),
                parent: parent.map(str::to_string),
                children: Vec::new(),
            },
        );
        handle
    }

    /// Pre-order descendants of `ids`, including `ids` themselves
    fn preorder<'a>(&'a self, ids: &[String], out: &mut Vec<&'a Node>) {
        for id in ids {
            if let Some(node) = self.nodes.get(id) {
                out.push(node);
                self.preorder(&node.children, out);
            }
        }
    }

    /// Nodes strictly inside `scope`, in document order
    fn within(&self, scope: &Scope) -> PageResult<Vec<&Node>> {
        let mut out = Vec::new();
        match scope {
            Scope::Document => self.preorder(&self.roots, &mut out),
            Scope::Element(element) => {
                let node = self.node(element)?;
                self.preorder(&node.children, &mut out);
            }
            Scope::Missing(selector) => {
                return Err(PageError::ElementNotFound {
                    selector: selector.to_string(),
                })
            }
        }
        Ok(out)
    }

    fn node(&self, element: &ElementHandle) -> PageResult<&Node> {
        self.nodes
            .get(&element.id)
            .ok_or_else(|| PageError::ElementNotFound {
                selector: format!("#{}", element.id),
            })
    }

    fn remove(&mut self, id: &str) -> bool {
        let Some(node) = self.nodes.remove(id) else {
            return false;
        };
        match &node.parent {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(parent_id) {
                    parent.children.retain(|child| child != id);
                }
            }
            None => self.roots.retain(|root| root != id),
        }
        for child in &node.children {
            let _ = self.remove(child);
        }
        true
    }
}

/// In-memory document implementing [`ElementDriver`]
///
/// # Example
///
/// ```ignore
/// let document = Rc::new(MockDocument::new());
/// let list = document.append(MockElement::new("ul").class("for-users"));
/// document.append_to(&list, MockElement::new("li").class("for-user").text("Alice"))?;
///
/// let browser: Browser = document.clone();
/// ```
#[derive(Debug, Default)]
pub struct MockDocument {
    state: RefCell<DocumentState>,
}

impl MockDocument {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level element
    pub fn append(&self, element: MockElement) -> ElementHandle {
        self.state.borrow_mut().insert(None, element)
    }

    /// Append an element as the last child of `parent`
    pub fn append_to(
        &self,
        parent: &ElementHandle,
        element: MockElement,
    ) -> PageResult<ElementHandle> {
        let mut state = self.state.borrow_mut();
        let _ = state.node(parent)?;
        Ok(state.insert(Some(&parent.id), element))
    }

    /// Remove an element and its subtree. Returns false if it was not attached.
    pub fn remove(&self, element: &ElementHandle) -> bool {
        self.state.borrow_mut().remove(&element.id)
    }

    /// Number of attached elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().nodes.len()
    }

    /// Whether the document has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ElementDriver for MockDocument {
    fn element(&self, scope: &Scope, selector: &Selector) -> PageResult<Scope> {
        let state = self.state.borrow();
        let found = state
            .within(scope)?
            .into_iter()
            .find(|node| selector.matches(&node.handle))
            .map(|node| node.handle.clone());
        Ok(found.map_or_else(|| Scope::Missing(selector.clone()), Scope::Element))
    }

    fn elements(&self, scope: &Scope, selector: &Selector) -> PageResult<Vec<ElementHandle>> {
        let state = self.state.borrow();
        Ok(state
            .within(scope)?
            .into_iter()
            .filter(|node| selector.matches(&node.handle))
            .map(|node| node.handle.clone())
            .collect())
    }

    fn exists(&self, scope: &Scope) -> PageResult<bool> {
        Ok(match scope {
            Scope::Document => true,
            Scope::Element(element) => self.state.borrow().nodes.contains_key(&element.id),
            Scope::Missing(_) => false,
        })
    }

    fn text(&self, scope: &Scope) -> PageResult<String> {
        let state = self.state.borrow();
        let mut nodes = Vec::new();
        if let Scope::Element(element) = scope {
            nodes.push(state.node(element)?);
        }
        nodes.extend(state.within(scope)?);
        let parts: Vec<&str> = nodes
            .iter()
            .filter_map(|node| node.handle.text_content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect();
        Ok(parts.join(" "))
    }
}
