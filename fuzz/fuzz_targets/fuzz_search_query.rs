#![no_main]

use arbitrary::Arbitrary;
use docpane_dom::{MemDocument, NodeId};
use docpane_widgets::{SearchConfig, SearchController, normalize};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    keywords: Vec<String>,
    queries: Vec<(String, bool)>,
}

fuzz_target!(|input: Input| {
    let mut doc = MemDocument::new();
    let root = doc.root();
    doc.append(root, "input").attr("type", "search").build();
    let results = doc.append(root, "section").class("search-results").build();
    doc.append(results, "span").class("search-query").build();
    let no_results = doc.append(results, "p").class("no-results").build();
    let ul = doc.append(results, "ul").build();
    let entries: Vec<NodeId> = input
        .keywords
        .iter()
        .take(64)
        .map(|kw| doc.append(ul, "li").attr("data-keywords", kw).build())
        .collect();
    doc.append(root, "section").class("content").build();

    let mut search = SearchController::attach(&mut doc, &SearchConfig::default()).expect("fixture wires up");
    for (query, enter) in input.queries.iter().take(16) {
        let outcome = search.on_query_change(&mut doc, query, *enter);
        if query.is_empty() {
            continue;
        }
        let nq = normalize(query);
        let shown = entries.iter().filter(|e| doc.is_shown(**e)).count();
        assert_eq!(shown, outcome.match_count);
        assert_eq!(doc.is_shown(no_results), outcome.match_count == 0);
        for (entry, kw) in entries.iter().zip(&input.keywords) {
            assert_eq!(doc.is_shown(*entry), normalize(kw).contains(&nq));
        }
    }
});
