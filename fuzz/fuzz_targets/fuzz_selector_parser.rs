#![no_main]

use docpane_dom::Selector;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(selector) = Selector::parse(source) else {
        return;
    };
    // Rendering must produce a selector that parses back to the same thing.
    let rendered = selector.to_string();
    let reparsed = Selector::parse(&rendered).expect("rendered selector parses");
    assert_eq!(reparsed, selector, "render of {source:?} was {rendered:?}");
});
