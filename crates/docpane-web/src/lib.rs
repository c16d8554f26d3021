#![deny(unsafe_code)]

//! Browser host for the docpane widgets.
//!
//! [`WebDocument`] implements [`docpane_dom::Document`] over `web_sys`. With
//! the default `autostart` feature the module's start function attaches the
//! widgets once the page has been parsed. Built with
//! `wasm-pack build --target web`, the page only needs to load the generated
//! module:
//!
//! ```html
//! <script type="module">
//!   import init from "./pkg/docpane_web.js";
//!   init();
//! </script>
//! ```
//!
//! Everything here is `wasm32`-only; on other targets the crate is empty.

#[cfg(target_arch = "wasm32")]
mod document;
#[cfg(target_arch = "wasm32")]
mod entry;
#[cfg(all(target_arch = "wasm32", feature = "autostart"))]
mod start;

#[cfg(target_arch = "wasm32")]
pub use document::WebDocument;
#[cfg(all(target_arch = "wasm32", feature = "config"))]
pub use entry::CONFIG_ELEMENT_ID;
#[cfg(target_arch = "wasm32")]
pub use entry::{mount, start};
