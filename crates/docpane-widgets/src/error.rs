#![forbid(unsafe_code)]

//! Setup failures.
//!
//! Only setup can fail. The markup the widgets attach to is generated in
//! lockstep with the widget configuration, so a missing singleton element or
//! a malformed selector means the page is wired wrong. Setup reports it and
//! the host surfaces it loudly instead of running a half-attached widget.
//! Event handling after a successful setup is total.

use core::fmt;

use docpane_dom::SelectorError;

/// Errors from attaching widgets to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// A required singleton element is not in the document.
    MissingElement {
        /// What the element is for (e.g. `"search input"`).
        role: &'static str,
        /// The selector that found nothing.
        selector: String,
    },
    /// A configured selector does not parse.
    Selector {
        /// What the selector locates.
        role: &'static str,
        /// Parser error.
        source: SelectorError,
    },
    /// The host refused to create an element with this tag.
    ElementCreation {
        /// The rejected tag name.
        tag: String,
    },
    /// Configuration could not be decoded.
    Config(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement { role, selector } => {
                write!(f, "no {role} element matches `{selector}`")
            }
            Self::Selector { role, source } => {
                write!(f, "invalid {role} selector: {source}")
            }
            Self::ElementCreation { tag } => write!(f, "cannot create <{tag}> element"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Selector { source, .. } => Some(source),
            _ => None,
        }
    }
}
