//! Module start hook.
//!
//! `#[wasm_bindgen]` expands to an `unsafe extern "C"` export, so this is the
//! one module of the crate that allows `unsafe_code`. It holds nothing else.

#![allow(unsafe_code)]

use wasm_bindgen::prelude::*;

/// Runs when the generated module is instantiated.
#[wasm_bindgen(start)]
pub fn autostart() -> Result<(), JsValue> {
    crate::entry::start()
}
