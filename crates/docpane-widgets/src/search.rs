#![forbid(unsafe_code)]

//! Live search filter over the page's result list.
//!
//! The controller owns the query input and flips the page between two views:
//!
//! | View | Results container | Content container |
//! |------|-------------------|-------------------|
//! | [`ViewState::Idle`] | hidden | shown |
//! | [`ViewState::Searching`] | shown | hidden |
//!
//! Every query change is a complete recomputation from the current input
//! value. Nothing is debounced or carried between events except the view
//! state and the last match count, which are derived and exposed for hosts.
//!
//! # State Machine
//!
//! ```text
//!            non-empty query
//!   Idle ─────────────────────▶ Searching
//!    ▲                              │
//!    └──────── empty query ─────────┘
//! ```
//!
//! Setup clears the input, so the machine starts in `Idle`.
//!
//! # Invariants
//!
//! 1. `Idle ⇔ query == ""`.
//! 2. While searching, an entry is shown iff its keywords contain the
//!    normalized query; the no-results indicator is shown iff none do.
//! 3. An empty query leaves entry visibility untouched.
//! 4. Enter activates the link of the first matching entry (document order)
//!    exactly once, and only when there is at least one match.

use docpane_dom::{CssDisplay, Document, Selector};

use crate::config::{SearchConfig, display_value, parse_selector};
use crate::error::SetupError;
use crate::search_index::{SearchEntry, SearchIndex, normalize};

/// Key code of the Enter key in `keyup` events.
pub const ENTER_KEY_CODE: u32 = 13;

/// Which of the two views the page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Default content shown, results hidden.
    #[default]
    Idle,
    /// Results shown, default content hidden.
    Searching,
}

/// A key reported by a `keyup` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// Anything else.
    Other,
}

impl Key {
    /// Classify a legacy `keyCode`.
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        if code == ENTER_KEY_CODE {
            Self::Enter
        } else {
            Self::Other
        }
    }
}

/// An input event on the query control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was released.
    KeyUp(Key),
    /// The control's value was committed.
    Change,
}

impl InputEvent {
    /// Whether this event asks to activate the first match.
    #[must_use]
    pub fn is_enter(self) -> bool {
        matches!(self, Self::KeyUp(Key::Enter))
    }
}

/// What one query change did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<N> {
    /// View after the change.
    pub view: ViewState,
    /// Matching entries; zero while idle.
    pub match_count: usize,
    /// Entry whose link was activated, if Enter fired one.
    pub activated: Option<N>,
}

/// Search widget attached to one page.
#[derive(Debug, Clone)]
pub struct SearchController<N> {
    index: SearchIndex<N>,
    input: N,
    query_echo: N,
    results: N,
    no_results: N,
    content: N,
    link_selector: Selector,
    entry_display: CssDisplay,
    container_display: CssDisplay,
    query: String,
    view: ViewState,
    match_count: usize,
}

fn require<D: Document>(
    doc: &D,
    role: &'static str,
    source: &str,
) -> Result<D::Node, SetupError> {
    let selector = parse_selector(role, source)?;
    doc.query_selector(&selector)
        .ok_or_else(|| SetupError::MissingElement {
            role,
            selector: source.to_owned(),
        })
}

impl<N: Clone + PartialEq + core::fmt::Debug> SearchController<N> {
    /// Locate the widget's elements, build the index, and clear the input.
    ///
    /// # Errors
    ///
    /// [`SetupError::MissingElement`] if the input, query echo, results,
    /// no-results, or content element is absent; [`SetupError::Selector`] if
    /// a configured selector does not parse.
    pub fn attach<D>(doc: &mut D, config: &SearchConfig) -> Result<Self, SetupError>
    where
        D: Document<Node = N>,
    {
        let input = require(&*doc, "search input", &config.input_selector)?;
        let query_echo = require(&*doc, "query echo", &config.query_echo_selector)?;
        let results = require(&*doc, "search results", &config.results_selector)?;
        let no_results = require(&*doc, "no results", &config.no_results_selector)?;
        let content = require(&*doc, "content", &config.content_selector)?;

        let entry_selector = parse_selector("entry", &config.entry_selector)?;
        let link_selector = parse_selector("entry link", &config.entry_link_selector)?;
        let index = SearchIndex::build(&*doc, &entry_selector, &config.keywords_attribute);

        doc.set_input_value(&input, "");

        Ok(Self {
            index,
            input,
            query_echo,
            results,
            no_results,
            content,
            link_selector,
            entry_display: display_value(&config.entry_display),
            container_display: display_value(&config.container_display),
            query: String::new(),
            view: ViewState::Idle,
            match_count: 0,
        })
    }

    /// React to an event on the input, reading the query from the document.
    pub fn handle_input<D>(&mut self, doc: &mut D, event: InputEvent) -> SearchOutcome<N>
    where
        D: Document<Node = N>,
    {
        let raw = doc.input_value(&self.input);
        self.on_query_change(doc, &raw, event.is_enter())
    }

    /// Recompute the page for `raw_query`.
    pub fn on_query_change<D>(
        &mut self,
        doc: &mut D,
        raw_query: &str,
        is_enter: bool,
    ) -> SearchOutcome<N>
    where
        D: Document<Node = N>,
    {
        self.query = raw_query.to_owned();

        if raw_query.is_empty() {
            doc.set_display(&self.results, &CssDisplay::None);
            doc.set_display(&self.content, &self.container_display);
            self.view = ViewState::Idle;
            self.match_count = 0;
            tracing::trace!(view = ?self.view, "search reset");
            return SearchOutcome {
                view: self.view,
                match_count: 0,
                activated: None,
            };
        }

        doc.set_text_content(&self.query_echo, raw_query);

        let query = normalize(raw_query);
        let mut match_count = 0;
        for entry in &self.index {
            if entry.matches(&query) {
                match_count += 1;
                doc.set_display(entry.element(), &self.entry_display);
            } else {
                doc.set_display(entry.element(), &CssDisplay::None);
            }
        }

        let no_results = if match_count > 0 {
            CssDisplay::None
        } else {
            self.container_display.clone()
        };
        doc.set_display(&self.no_results, &no_results);
        doc.set_display(&self.results, &self.container_display);
        doc.set_display(&self.content, &CssDisplay::None);

        self.view = ViewState::Searching;
        self.match_count = match_count;
        tracing::trace!(
            query_len = raw_query.len(),
            matches = match_count,
            view = ?self.view,
            "search updated"
        );

        let activated = if is_enter {
            self.index
                .first_match(&query)
                .map(|entry| entry.element().clone())
                .and_then(|element| self.activate(doc, element))
        } else {
            None
        };

        SearchOutcome {
            view: self.view,
            match_count,
            activated,
        }
    }

    fn activate<D>(&self, doc: &mut D, element: N) -> Option<N>
    where
        D: Document<Node = N>,
    {
        match doc.query_selector_in(&element, &self.link_selector) {
            Some(link) => {
                tracing::debug!(entry = ?element, "activating first match");
                doc.click(&link);
                Some(element)
            }
            None => {
                tracing::warn!(
                    entry = ?element,
                    selector = %self.link_selector,
                    "first match has no link to activate"
                );
                None
            }
        }
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Raw query from the last change.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Matches from the last change; zero while idle.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.match_count
    }

    /// The page's index.
    #[must_use]
    pub fn index(&self) -> &SearchIndex<N> {
        &self.index
    }

    /// The page's entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[SearchEntry<N>] {
        self.index.entries()
    }

    /// The query input element.
    #[must_use]
    pub fn input(&self) -> &N {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpane_dom::{MemDocument, NodeId};

    struct Page {
        doc: MemDocument,
        input: NodeId,
        echo: NodeId,
        results: NodeId,
        no_results: NodeId,
        content: NodeId,
        entries: Vec<NodeId>,
    }

    fn page(keywords: &[&str]) -> Page {
        let mut doc = MemDocument::new();
        let root = doc.root();
        let input = doc
            .append(root, "input")
            .attr("type", "search")
            .value("stale")
            .build();
        let results = doc
            .append(root, "section")
            .class("search-results")
            .build();
        let echo = doc.append(results, "span").class("search-query").build();
        let no_results = doc.append(results, "p").class("no-results").build();
        let ul = doc.append(results, "ul").build();
        let entries = keywords
            .iter()
            .enumerate()
            .map(|(i, kw)| {
                let li = doc.append(ul, "li").attr("data-keywords", kw).build();
                doc.append(li, "a").attr("href", &format!("entry-{i}.html")).build();
                li
            })
            .collect();
        let content = doc.append(root, "section").class("content").build();
        Page {
            doc,
            input,
            echo,
            results,
            no_results,
            content,
            entries,
        }
    }

    fn attach(p: &mut Page) -> SearchController<NodeId> {
        SearchController::attach(&mut p.doc, &SearchConfig::default()).unwrap()
    }

    #[test]
    fn attach_clears_input_and_starts_idle() {
        let mut p = page(&["a"]);
        let ctl = attach(&mut p);
        assert_eq!(p.doc.input_value(&p.input), "");
        assert_eq!(ctl.view(), ViewState::Idle);
        assert_eq!(ctl.index().len(), 1);
        assert_eq!(ctl.input(), &p.input);
    }

    #[test]
    fn attach_fails_without_input() {
        let mut doc = MemDocument::new();
        let err = SearchController::attach(&mut doc, &SearchConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SetupError::MissingElement {
                role: "search input",
                ..
            }
        ));
    }

    #[test]
    fn attach_fails_without_content() {
        let mut p = page(&[]);
        p.doc.set_attribute(&p.content, "class", "main");
        let err = SearchController::attach(&mut p.doc, &SearchConfig::default()).unwrap_err();
        assert!(matches!(err, SetupError::MissingElement { role: "content", .. }));
    }

    #[test]
    fn attach_rejects_bad_entry_selector() {
        let mut p = page(&[]);
        let config = SearchConfig {
            entry_selector: "ul > li".into(),
            ..SearchConfig::default()
        };
        let err = SearchController::attach(&mut p.doc, &config).unwrap_err();
        assert!(matches!(err, SetupError::Selector { role: "entry", .. }));
    }

    #[test]
    fn query_filters_entries_and_echoes_raw_text() {
        let mut p = page(&["installguide", "configreference", "fa q"]);
        let mut ctl = attach(&mut p);
        let out = ctl.on_query_change(&mut p.doc, "Con F", false);

        assert_eq!(out.view, ViewState::Searching);
        assert_eq!(out.match_count, 1);
        assert_eq!(out.activated, None);
        assert_eq!(p.doc.text_content(&p.echo), "Con F");
        assert!(!p.doc.is_shown(p.entries[0]));
        assert_eq!(p.doc.display(&p.entries[1]), Some(CssDisplay::ListItem));
        assert!(!p.doc.is_shown(p.entries[2]));
        assert!(!p.doc.is_shown(p.no_results));
        assert_eq!(p.doc.display(&p.results), Some(CssDisplay::Block));
        assert!(!p.doc.is_shown(p.content));
    }

    #[test]
    fn no_matches_shows_indicator() {
        let mut p = page(&["installguide", "configreference"]);
        let mut ctl = attach(&mut p);
        let out = ctl.on_query_change(&mut p.doc, "zzz", false);
        assert_eq!(out.match_count, 0);
        assert_eq!(p.doc.display(&p.no_results), Some(CssDisplay::Block));
        assert!(p.entries.iter().all(|e| !p.doc.is_shown(*e)));
        assert_eq!(ctl.view(), ViewState::Searching);
    }

    #[test]
    fn empty_query_returns_to_idle_without_touching_entries() {
        let mut p = page(&["installguide", "configreference"]);
        let mut ctl = attach(&mut p);
        ctl.on_query_change(&mut p.doc, "conf", false);
        let before: Vec<_> = p.entries.iter().map(|e| p.doc.display(e)).collect();

        let out = ctl.on_query_change(&mut p.doc, "", false);
        assert_eq!(out.view, ViewState::Idle);
        assert_eq!(out.match_count, 0);
        assert!(!p.doc.is_shown(p.results));
        assert_eq!(p.doc.display(&p.content), Some(CssDisplay::Block));
        let after: Vec<_> = p.entries.iter().map(|e| p.doc.display(e)).collect();
        assert_eq!(before, after);
        // The echo keeps the last non-empty query.
        assert_eq!(p.doc.text_content(&p.echo), "conf");
    }

    #[test]
    fn enter_activates_first_match_once() {
        let mut p = page(&["alpha guide", "beta guide", "gamma"]);
        let mut ctl = attach(&mut p);
        let out = ctl.on_query_change(&mut p.doc, "guide", true);
        assert_eq!(out.activated, Some(p.entries[0]));
        assert_eq!(p.doc.navigations(), &["entry-0.html".to_string()]);
    }

    #[test]
    fn enter_prefers_page_order_over_match_offset() {
        let mut p = page(&["reference guide", "guide"]);
        let mut ctl = attach(&mut p);
        let out = ctl.on_query_change(&mut p.doc, "guide", true);
        assert_eq!(out.match_count, 2);
        assert_eq!(out.activated, Some(p.entries[0]));
        assert_eq!(p.doc.navigations(), &["entry-0.html".to_string()]);
    }

    #[test]
    fn enter_without_matches_or_query_does_nothing() {
        let mut p = page(&["alpha"]);
        let mut ctl = attach(&mut p);
        assert_eq!(ctl.on_query_change(&mut p.doc, "zzz", true).activated, None);
        assert_eq!(ctl.on_query_change(&mut p.doc, "", true).activated, None);
        assert!(p.doc.navigations().is_empty());
    }

    #[test]
    fn handle_input_reads_the_control() {
        let mut p = page(&["alpha", "beta"]);
        let mut ctl = attach(&mut p);
        p.doc.set_input_value(&p.input, "BET");
        let out = ctl.handle_input(&mut p.doc, InputEvent::Change);
        assert_eq!(out.match_count, 1);
        assert_eq!(out.activated, None);
        assert_eq!(ctl.query(), "BET");

        let out = ctl.handle_input(&mut p.doc, InputEvent::KeyUp(Key::Enter));
        assert_eq!(out.activated, Some(p.entries[1]));
    }

    #[test]
    fn whitespace_query_shows_everything() {
        let mut p = page(&["alpha", ""]);
        let mut ctl = attach(&mut p);
        let out = ctl.on_query_change(&mut p.doc, "   ", false);
        assert_eq!(out.view, ViewState::Searching);
        assert_eq!(out.match_count, 2);
        assert!(!p.doc.is_shown(p.no_results));
    }

    #[test]
    fn key_codes() {
        assert_eq!(Key::from_code(13), Key::Enter);
        assert_eq!(Key::from_code(65), Key::Other);
        assert!(InputEvent::KeyUp(Key::Enter).is_enter());
        assert!(!InputEvent::KeyUp(Key::Other).is_enter());
        assert!(!InputEvent::Change.is_enter());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn visibility_follows_containment(
                keywords in proptest::collection::vec("[a-d ]{0,8}", 0..8),
                query in "[a-dA-D ]{1,4}",
            ) {
                let refs: Vec<&str> = keywords.iter().map(String::as_str).collect();
                let mut p = page(&refs);
                let mut ctl = attach(&mut p);
                let out = ctl.on_query_change(&mut p.doc, &query, false);

                let nq = normalize(&query);
                let mut expected = 0;
                for (kw, entry) in keywords.iter().zip(&p.entries) {
                    let hit = normalize(kw).contains(&nq);
                    expected += usize::from(hit);
                    prop_assert_eq!(p.doc.is_shown(*entry), hit);
                }
                prop_assert_eq!(out.match_count, expected);
                prop_assert_eq!(p.doc.is_shown(p.no_results), expected == 0);
                prop_assert_eq!(out.view, ViewState::Searching);
                prop_assert!(!p.doc.is_shown(p.content));
            }

            #[test]
            fn idle_iff_query_empty(queries in proptest::collection::vec("[ab ]{0,3}", 1..6)) {
                let mut p = page(&["ab", "ba"]);
                let mut ctl = attach(&mut p);
                for q in &queries {
                    let out = ctl.on_query_change(&mut p.doc, q, false);
                    prop_assert_eq!(out.view == ViewState::Idle, q.is_empty());
                    prop_assert_eq!(p.doc.is_shown(p.results), !q.is_empty());
                    prop_assert_eq!(p.doc.is_shown(p.content), q.is_empty());
                }
            }
        }
    }
}
