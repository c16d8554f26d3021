#![forbid(unsafe_code)]

//! [`Document`] over the browser DOM.
//!
//! Selectors are rendered back to CSS and handed to `querySelectorAll`, so
//! the browser does the matching. DOM exceptions from mutators are logged at
//! `trace` and dropped; the widgets only ever touch elements they located a
//! moment earlier.

use docpane_dom::{CssDisplay, Document, Selector};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlInputElement};

/// The live page.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    /// Wrap a browser document.
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The window's document, if there is one.
    #[must_use]
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
    }

    /// The wrapped document.
    #[must_use]
    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }
}

fn dropped(op: &'static str, err: &JsValue) {
    tracing::trace!(op, error = ?err, "dom call failed");
}

impl Document for WebDocument {
    type Node = Element;

    fn query_selector(&self, selector: &Selector) -> Option<Element> {
        match self.document.query_selector(&selector.to_string()) {
            Ok(found) => found,
            Err(err) => {
                dropped("querySelector", &err);
                None
            }
        }
    }

    fn query_selector_all(&self, selector: &Selector) -> Vec<Element> {
        let list = match self.document.query_selector_all(&selector.to_string()) {
            Ok(list) => list,
            Err(err) => {
                dropped("querySelectorAll", &err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_selector_in(&self, root: &Element, selector: &Selector) -> Option<Element> {
        match root.query_selector(&selector.to_string()) {
            Ok(found) => found,
            Err(err) => {
                dropped("querySelector", &err);
                None
            }
        }
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            dropped("setAttribute", &err);
        }
    }

    fn display(&self, node: &Element) -> Option<CssDisplay> {
        let value = node
            .dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value("display")
            .ok()?;
        if value.is_empty() {
            None
        } else {
            Some(CssDisplay::from(value.as_str()))
        }
    }

    fn set_display(&mut self, node: &Element, display: &CssDisplay) {
        let Some(html) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        let result = if display.as_css().is_empty() {
            style.remove_property("display").map(drop)
        } else {
            style.set_property("display", display.as_css())
        };
        if let Err(err) = result {
            dropped("style.display", &err);
        }
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text_content(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn input_value(&self, node: &Element) -> String {
        node.dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn set_input_value(&mut self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn create_element(&mut self, tag: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => Some(element),
            Err(err) => {
                dropped("createElement", &err);
                None
            }
        }
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            dropped("appendChild", &err);
        }
    }

    fn click(&mut self, node: &Element) {
        if let Some(html) = node.dyn_ref::<HtmlElement>() {
            html.click();
        }
    }
}
