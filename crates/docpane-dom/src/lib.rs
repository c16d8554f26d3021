#![forbid(unsafe_code)]

//! Document capability for docpane widgets.
//!
//! The widgets never touch a concrete DOM. They are written against the
//! [`Document`] trait, locate elements with [`Selector`]s parsed from a small
//! CSS subset, and express visibility as a [`CssDisplay`]. [`MemDocument`]
//! is the in-memory implementation used by tests and headless hosts; the
//! browser implementation lives in `docpane-web`.

pub mod display;
pub mod document;
pub mod mem;
pub mod selector;

pub use display::CssDisplay;
pub use document::Document;
pub use mem::{ElementBuilder, MemDocument, NodeId};
pub use selector::{AttrMatch, AttrSelector, Compound, Selector, SelectorError, SelectorErrorKind};
