#![forbid(unsafe_code)]

//! In-memory document for tests and non-browser hosts.
//!
//! `MemDocument` is an arena of elements rooted at a `<body>`. It implements
//! [`Document`] with the same observable behavior the widgets rely on in a
//! browser: document-order queries, inline `display`, `textContent`
//! replacement, and link activation. Following a link does not navigate
//! anywhere; the `href` is appended to [`navigations`](MemDocument::navigations)
//! so callers can assert on it.
//!
//! # Example
//!
//! ```
//! use docpane_dom::{Document, MemDocument, Selector};
//!
//! let mut doc = MemDocument::new();
//! let list = doc.append(doc.root(), "ul").class("search-results").build();
//! let item = doc.append(list, "li").attr("data-keywords", "install guide").build();
//! doc.append(item, "a").attr("href", "install.html").text("Install").build();
//!
//! let sel = Selector::parse(".search-results li[data-keywords]").unwrap();
//! assert_eq!(doc.query_selector_all(&sel), vec![item]);
//! ```

use ahash::AHashMap;

use crate::display::CssDisplay;
use crate::document::Document;
use crate::selector::{Compound, Selector};

/// Handle to an element in a [`MemDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this element.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    attributes: AHashMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    display: Option<CssDisplay>,
    value: String,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: AHashMap::new(),
            parent: None,
            children: Vec::new(),
            text: String::new(),
            display: None,
            value: String::new(),
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct MemDocument {
    elements: Vec<ElementData>,
    navigations: Vec<String>,
    clicks: Vec<NodeId>,
}

impl Default for MemDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemDocument {
    /// Create a document containing only an empty `<body>`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: vec![ElementData::new("body")],
            navigations: Vec::new(),
            clicks: Vec::new(),
        }
    }

    /// The `<body>` element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new `tag` element under `parent` and return a builder for it.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
        let node = self.alloc(tag);
        self.attach(parent, node);
        ElementBuilder { doc: self, node }
    }

    /// Number of elements ever created, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: the root exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Lowercased tag name.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> &str {
        &self.elements[node.0].tag
    }

    /// Parent element, `None` for the root and detached elements.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements[node.0].parent
    }

    /// Children in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.elements[node.0].children
    }

    /// Whether the element's own inline `display` leaves it shown.
    ///
    /// Ancestors are not consulted.
    #[must_use]
    pub fn is_shown(&self, node: NodeId) -> bool {
        !self.elements[node.0]
            .display
            .as_ref()
            .is_some_and(CssDisplay::is_hidden)
    }

    /// `href`s followed by [`Document::click`], oldest first.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Every element passed to [`Document::click`], oldest first.
    #[must_use]
    pub fn clicks(&self) -> &[NodeId] {
        &self.clicks
    }

    fn alloc(&mut self, tag: &str) -> NodeId {
        self.elements.push(ElementData::new(tag));
        NodeId(self.elements.len() - 1)
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.elements[id.0].parent;
        }
        false
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.elements[node.0].parent.take() {
            self.elements[parent.0].children.retain(|c| *c != node);
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if self.is_ancestor_or_self(child, parent) {
            return;
        }
        self.detach(child);
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
    }

    /// Pre-order walk of `root`'s subtree, `root` included.
    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.elements[id.0].children.iter().rev().copied());
        }
        out
    }

    fn compound_matches(&self, node: NodeId, compound: &Compound) -> bool {
        let data = &self.elements[node.0];
        compound.matches(&data.tag, |name| data.attr(name))
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        if !self.compound_matches(node, selector.subject()) {
            return false;
        }
        // Descendant-only chains can be matched greedily against the nearest
        // qualifying ancestor.
        let mut current = self.elements[node.0].parent;
        for compound in selector.ancestors().iter().rev() {
            loop {
                let Some(id) = current else {
                    return false;
                };
                current = self.elements[id.0].parent;
                if self.compound_matches(id, compound) {
                    break;
                }
            }
        }
        true
    }
}

impl Document for MemDocument {
    type Node = NodeId;

    fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.subtree(self.root())
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    fn query_selector_in(&self, root: &NodeId, selector: &Selector) -> Option<NodeId> {
        self.subtree(*root)
            .into_iter()
            .skip(1)
            .find(|id| self.matches(*id, selector))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.elements[node.0]
            .attr(&name.to_ascii_lowercase())
            .map(str::to_owned)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.elements[node.0]
            .attributes
            .insert(name.to_ascii_lowercase(), value.to_owned());
    }

    fn display(&self, node: &NodeId) -> Option<CssDisplay> {
        self.elements[node.0].display.clone()
    }

    fn set_display(&mut self, node: &NodeId, display: &CssDisplay) {
        self.elements[node.0].display = Some(display.clone());
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.subtree(*node)
            .into_iter()
            .map(|id| self.elements[id.0].text.as_str())
            .collect()
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) {
        let children = std::mem::take(&mut self.elements[node.0].children);
        for child in children {
            self.elements[child.0].parent = None;
        }
        self.elements[node.0].text = text.to_owned();
    }

    fn input_value(&self, node: &NodeId) -> String {
        self.elements[node.0].value.clone()
    }

    fn set_input_value(&mut self, node: &NodeId, value: &str) {
        self.elements[node.0].value = value.to_owned();
    }

    fn create_element(&mut self, tag: &str) -> Option<NodeId> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return None;
        }
        Some(self.alloc(tag))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.attach(*parent, *child);
    }

    fn click(&mut self, node: &NodeId) {
        self.clicks.push(*node);
        let data = &self.elements[node.0];
        if data.tag == "a"
            && let Some(href) = data.attr("href")
        {
            self.navigations.push(href.to_owned());
        }
    }
}

/// Fluent setup for an element just appended with [`MemDocument::append`].
pub struct ElementBuilder<'a> {
    doc: &'a mut MemDocument,
    node: NodeId,
}

impl ElementBuilder<'_> {
    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.doc.set_attribute(&self.node, name, value);
        self
    }

    /// Add a class to the `class` attribute.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        let data = &mut self.doc.elements[self.node.0];
        let merged = match data.attributes.get("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_owned(),
        };
        data.attributes.insert("class".to_owned(), merged);
        self
    }

    /// Set the element's own text.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.doc.elements[self.node.0].text = text.to_owned();
        self
    }

    /// Set the form control value.
    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.doc.elements[self.node.0].value = value.to_owned();
        self
    }

    /// Set the inline `display`.
    #[must_use]
    pub fn display(mut self, display: CssDisplay) -> Self {
        self.doc.elements[self.node.0].display = Some(display);
        self
    }

    /// Finish and return the element handle.
    pub fn build(self) -> NodeId {
        self.node
    }
}
