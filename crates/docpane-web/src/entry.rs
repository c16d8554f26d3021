#![forbid(unsafe_code)]

//! Page entry point and event wiring.
//!
//! [`start`] waits for the document to finish parsing, then [`mount`]
//! attaches both widgets once and registers the listeners. The listeners live
//! as long as the page, so their closures are leaked with [`Closure::forget`].

use std::cell::RefCell;
use std::rc::Rc;

use docpane_widgets::{InputEvent, Key, Page, SetupError, WidgetConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent};

use crate::document::WebDocument;

/// Id of the optional JSON configuration block.
#[cfg(feature = "config")]
pub const CONFIG_ELEMENT_ID: &str = "docpane-config";

struct Mounted {
    doc: WebDocument,
    page: Page<Element>,
}

type Shared = Rc<RefCell<Mounted>>;

fn to_js(err: &SetupError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Mount now, or once `DOMContentLoaded` fires if the page is still loading.
///
/// # Errors
///
/// As [`mount`], when the page is already parsed; `"no document"` outside a
/// window.
pub fn start() -> Result<(), JsValue> {
    let doc = WebDocument::current().ok_or_else(|| JsValue::from_str("no document"))?;
    if doc.inner().ready_state() != "loading" {
        return mount(doc);
    }

    let target = doc.inner().clone();
    let on_ready = Closure::once(move || {
        if let Err(err) = mount(doc) {
            wasm_bindgen::throw_val(err);
        }
    });
    target.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

/// Attach both widgets to `doc` and register their listeners.
///
/// # Errors
///
/// A JS `Error` carrying the [`SetupError`] message if the page is not wired
/// for the widgets.
pub fn mount(mut doc: WebDocument) -> Result<(), JsValue> {
    let config = load_config(&doc)?;
    let page = Page::init(&mut doc, &config).map_err(|err| to_js(&err))?;

    let input = page.search.input().clone();
    let triggers: Vec<Element> = page
        .collapse
        .triggers()
        .iter()
        .map(|t| t.trigger().clone())
        .collect();
    let shared: Shared = Rc::new(RefCell::new(Mounted { doc, page }));

    listen_search(&shared, &input)?;
    for trigger in &triggers {
        listen_trigger(&shared, trigger)?;
    }
    tracing::debug!(triggers = triggers.len(), "listeners registered");
    Ok(())
}

fn dispatch_input(shared: &Shared, event: InputEvent) {
    // A handler that synchronously re-enters (e.g. via a synthetic click)
    // finds the state borrowed and is skipped.
    let Ok(mut mounted) = shared.try_borrow_mut() else {
        return;
    };
    let Mounted { doc, page } = &mut *mounted;
    page.search.handle_input(doc, event);
}

fn listen_search(shared: &Shared, input: &Element) -> Result<(), JsValue> {
    let state = Rc::clone(shared);
    let on_keyup = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        dispatch_input(&state, InputEvent::KeyUp(Key::from_code(event.key_code())));
    });
    input.add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())?;
    on_keyup.forget();

    let state = Rc::clone(shared);
    let on_change = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        dispatch_input(&state, InputEvent::Change);
    });
    input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}

fn listen_trigger(shared: &Shared, trigger: &Element) -> Result<(), JsValue> {
    let state = Rc::clone(shared);
    let node = trigger.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let Ok(mut mounted) = state.try_borrow_mut() else {
            return;
        };
        let Mounted { doc, page } = &mut *mounted;
        page.collapse.activate(doc, &node);
    });
    trigger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

#[cfg(feature = "config")]
fn load_config(doc: &WebDocument) -> Result<WidgetConfig, JsValue> {
    let Some(block) = doc.inner().get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(WidgetConfig::default());
    };
    let json = block.text_content().unwrap_or_default();
    WidgetConfig::from_json(&json).map_err(|err| to_js(&err))
}

#[cfg(not(feature = "config"))]
fn load_config(_doc: &WebDocument) -> Result<WidgetConfig, JsValue> {
    Ok(WidgetConfig::default())
}
