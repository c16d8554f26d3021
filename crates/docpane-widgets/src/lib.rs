#![forbid(unsafe_code)]

//! In-page widgets for static documentation pages.
//!
//! Two behaviors attach to an already-rendered page:
//!
//! - [`SearchController`]: filters the entries of a result list as the reader
//!   types, switches between the default content and the results, and follows
//!   the first match's link on Enter.
//! - [`CollapseController`]: adds a trigger to every group header and
//!   hides or shows the group's members when it is activated.
//!
//! Both are generic over [`docpane_dom::Document`], so they run unchanged
//! against a browser DOM or a [`docpane_dom::MemDocument`].
//!
//! ```
//! use docpane_dom::MemDocument;
//! use docpane_widgets::{Page, WidgetConfig};
//!
//! let mut doc = MemDocument::new();
//! let root = doc.root();
//! doc.append(root, "input").attr("type", "search").build();
//! let results = doc.append(root, "section").class("search-results").build();
//! doc.append(results, "span").class("search-query").build();
//! doc.append(results, "p").class("no-results").build();
//! let ul = doc.append(results, "ul").build();
//! doc.append(ul, "li").attr("data-keywords", "install guide").build();
//! doc.append(root, "section").class("content").build();
//!
//! let mut page = Page::init(&mut doc, &WidgetConfig::default()).unwrap();
//! let outcome = page.search.on_query_change(&mut doc, "Install", false);
//! assert_eq!(outcome.match_count, 1);
//! ```

pub mod collapse;
pub mod config;
pub mod error;
pub mod page;
pub mod search;
pub mod search_index;

pub use collapse::{CollapseController, CollapseTrigger};
pub use config::{CollapseConfig, SearchConfig, WidgetConfig};
pub use error::SetupError;
pub use page::Page;
pub use search::{ENTER_KEY_CODE, InputEvent, Key, SearchController, SearchOutcome, ViewState};
pub use search_index::{SearchEntry, SearchIndex, normalize};
