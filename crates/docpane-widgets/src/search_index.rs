#![forbid(unsafe_code)]

//! Keyword index over the page's result entries.
//!
//! The index is built once from the rendered document: every element the
//! entry selector matches becomes a [`SearchEntry`] holding a handle to the
//! element and its keywords in normalized form. The entry set is fixed for
//! the page's lifetime.
//!
//! # Normalization
//!
//! [`normalize`] lowercases and then removes every U+0020 SPACE. Other
//! whitespace is kept. The same function is applied to stored keywords and to
//! the live query, so "contains" compares like with like.
//!
//! # Invariants
//!
//! 1. Entries are in document order.
//! 2. No matching element is dropped: an element with a missing or empty
//!    keywords attribute gets empty keywords, which no non-empty query matches.
//! 3. `normalize(normalize(s)) == normalize(s)`.

use docpane_dom::{Document, Selector};

/// Normalize keywords or a query for substring matching.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "")
}

/// One searchable result item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry<N> {
    element: N,
    keywords: String,
}

impl<N> SearchEntry<N> {
    /// Create an entry from raw (unnormalized) keywords.
    pub fn new(element: N, raw_keywords: &str) -> Self {
        Self {
            element,
            keywords: normalize(raw_keywords),
        }
    }

    /// The result item element.
    pub fn element(&self) -> &N {
        &self.element
    }

    /// Normalized keywords.
    #[must_use]
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    /// Whether this entry matches an already-normalized query.
    #[must_use]
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.keywords.contains(normalized_query)
    }
}

/// The fixed, document-ordered list of entries on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndex<N> {
    entries: Vec<SearchEntry<N>>,
}

impl<N: Clone + PartialEq + core::fmt::Debug> SearchIndex<N> {
    /// Scan `doc` for entries.
    pub fn build<D>(doc: &D, entry_selector: &Selector, keywords_attribute: &str) -> Self
    where
        D: Document<Node = N>,
    {
        let entries: Vec<_> = doc
            .query_selector_all(entry_selector)
            .into_iter()
            .map(|element| {
                let raw = doc.attribute(&element, keywords_attribute).unwrap_or_default();
                SearchEntry::new(element, &raw)
            })
            .collect();

        tracing::debug!(
            entries = entries.len(),
            selector = %entry_selector,
            "search index built"
        );

        Self { entries }
    }
}

impl<N> SearchIndex<N> {
    /// Build from entries already in document order.
    pub fn from_entries(entries: Vec<SearchEntry<N>>) -> Self {
        Self { entries }
    }

    /// All entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[SearchEntry<N>] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the page has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in document order.
    pub fn iter(&self) -> core::slice::Iter<'_, SearchEntry<N>> {
        self.entries.iter()
    }

    /// The first matching entry in document order.
    #[must_use]
    pub fn first_match(&self, normalized_query: &str) -> Option<&SearchEntry<N>> {
        self.entries.iter().find(|e| e.matches(normalized_query))
    }
}

impl<'a, N> IntoIterator for &'a SearchIndex<N> {
    type Item = &'a SearchEntry<N>;
    type IntoIter = core::slice::Iter<'a, SearchEntry<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpane_dom::{MemDocument, NodeId};

    fn fixture(keywords: &[Option<&str>]) -> (MemDocument, Vec<NodeId>) {
        let mut doc = MemDocument::new();
        let section = doc
            .append(doc.root(), "section")
            .class("search-results")
            .build();
        let ul = doc.append(section, "ul").build();
        let items = keywords
            .iter()
            .map(|kw| {
                let li = doc.append(ul, "li");
                match kw {
                    Some(kw) => li.attr("data-keywords", kw).build(),
                    None => li.build(),
                }
            })
            .collect();
        (doc, items)
    }

    #[test]
    fn normalize_lowercases_and_strips_spaces() {
        assert_eq!(normalize("Fa Q"), "faq");
        assert_eq!(normalize("  Install  Guide "), "installguide");
    }

    #[test]
    fn normalize_keeps_other_whitespace() {
        assert_eq!(normalize("a\tb\nc"), "a\tb\nc");
        assert_eq!(normalize("a\u{a0}b"), "a\u{a0}b");
    }

    #[test]
    fn build_collects_entries_in_document_order() {
        let (doc, items) = fixture(&[Some("installguide"), Some("configreference"), Some("fa q")]);
        let sel = Selector::parse(".search-results li[data-keywords]").unwrap();
        let index = SearchIndex::build(&doc, &sel, "data-keywords");
        assert_eq!(index.len(), 3);
        let elements: Vec<_> = index.iter().map(|e| *e.element()).collect();
        assert_eq!(elements, items);
        assert_eq!(index.entries()[2].keywords(), "faq");
    }

    #[test]
    fn build_keeps_entries_without_keywords() {
        let (doc, items) = fixture(&[Some("alpha"), None, Some("")]);
        let sel = Selector::parse(".search-results li").unwrap();
        let index = SearchIndex::build(&doc, &sel, "data-keywords");
        assert_eq!(index.len(), 3);
        assert_eq!(*index.entries()[1].element(), items[1]);
        assert_eq!(index.entries()[1].keywords(), "");
        assert!(!index.entries()[1].matches("a"));
        assert!(!index.entries()[2].matches("a"));
    }

    #[test]
    fn first_match_uses_document_order_not_position() {
        let index = SearchIndex::from_entries(vec![
            SearchEntry::new(0, "reference config"),
            SearchEntry::new(1, "config"),
        ]);
        // Entry 1 matches at offset 0 but entry 0 comes first in the page.
        assert_eq!(index.first_match("config").map(|e| *e.element()), Some(0));
        assert_eq!(index.iter().filter(|e| e.matches("config")).count(), 2);
        assert!(index.first_match("zzz").is_none());
    }

    #[test]
    fn empty_query_matches_everything() {
        let index = SearchIndex::from_entries(vec![SearchEntry::new(0, ""), SearchEntry::new(1, "x")]);
        assert!(index.iter().all(|e| e.matches("")));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_is_idempotent(s in "[a-zA-Z0-9 _\\-\u{c0}-\u{ff}]{0,40}") {
                let once = normalize(&s);
                prop_assert_eq!(normalize(&once), once);
            }

            #[test]
            fn normalized_has_no_spaces_or_uppercase(s in "[a-zA-Z ]{0,40}") {
                let n = normalize(&s);
                prop_assert!(!n.contains(' '));
                prop_assert!(!n.chars().any(|c| c.is_ascii_uppercase()));
            }

            #[test]
            fn matching_ignores_case_and_spaces(kw in "[a-c ]{0,12}", q in "[a-c]{1,4}") {
                let entry = SearchEntry::new((), &kw.to_uppercase());
                let expected = kw.replace(' ', "").contains(&q);
                prop_assert_eq!(entry.matches(&normalize(&q.to_uppercase())), expected);
            }
        }
    }
}
