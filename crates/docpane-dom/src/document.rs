#![forbid(unsafe_code)]

//! The document capability the widgets are written against.
//!
//! A [`Document`] is whatever hosts the rendered page: a browser DOM
//! (`docpane-web`), or a [`MemDocument`](crate::MemDocument) in tests. The
//! widgets only need to query elements by selector at call time, read and
//! write a handful of attributes and properties, and synthesize one element
//! per collapse group.
//!
//! # Invariants
//!
//! 1. `query_selector_all` returns matches in document order (pre-order).
//! 2. `query_selector` returns the first element `query_selector_all` would.
//! 3. Queries always reflect the document as it is now; nothing is cached.
//! 4. Mutators never fail observably. A host that cannot apply a mutation
//!    (e.g. a detached node) drops it.

use core::fmt;

use crate::display::CssDisplay;
use crate::selector::Selector;

/// A live, mutable document.
pub trait Document {
    /// Non-owning handle to an element. The document owns the element.
    type Node: Clone + PartialEq + fmt::Debug;

    /// First element matching `selector`, in document order.
    fn query_selector(&self, selector: &Selector) -> Option<Self::Node> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Every element matching `selector`, in document order.
    fn query_selector_all(&self, selector: &Selector) -> Vec<Self::Node>;

    /// First descendant of `root` matching `selector`.
    fn query_selector_in(&self, root: &Self::Node, selector: &Selector) -> Option<Self::Node>;

    /// Read an attribute.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Write an attribute.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// The element's inline `display`, if one is set.
    fn display(&self, node: &Self::Node) -> Option<CssDisplay>;

    /// Set the element's inline `display`.
    fn set_display(&mut self, node: &Self::Node, display: &CssDisplay);

    /// Concatenated text of the element and its descendants.
    fn text_content(&self, node: &Self::Node) -> String;

    /// Replace the element's children with a single text run.
    fn set_text_content(&mut self, node: &Self::Node, text: &str);

    /// Current value of a form control. Empty for other elements.
    fn input_value(&self, node: &Self::Node) -> String;

    /// Set the value of a form control.
    fn set_input_value(&mut self, node: &Self::Node, value: &str);

    /// Create a detached element. `None` if the host rejects the tag name.
    fn create_element(&mut self, tag: &str) -> Option<Self::Node>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Perform the element's primary activation, as a user click would.
    ///
    /// For a link this follows its `href`.
    fn click(&mut self, node: &Self::Node);
}
