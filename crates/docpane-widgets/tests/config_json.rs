#![forbid(unsafe_code)]

//! Integration tests: JSON widget configuration (`config` feature).

use docpane_dom::{CssDisplay, Document, MemDocument};
use docpane_widgets::{CollapseConfig, Page, SearchConfig, SetupError, WidgetConfig};
use pretty_assertions::assert_eq;

#[test]
fn empty_object_is_the_default() {
    assert_eq!(WidgetConfig::from_json("{}").unwrap(), WidgetConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = WidgetConfig::from_json(
        r#"{
            "search": { "keywords_attribute": "data-terms" },
            "collapse": { "expand_label": "[+]", "collapse_label": "[-]" }
        }"#,
    )
    .unwrap();

    assert_eq!(
        cfg,
        WidgetConfig {
            search: SearchConfig {
                keywords_attribute: "data-terms".into(),
                ..SearchConfig::default()
            },
            collapse: CollapseConfig {
                expand_label: "[+]".into(),
                collapse_label: "[-]".into(),
                ..CollapseConfig::default()
            },
        }
    );
}

#[test]
fn json_round_trips() {
    let mut cfg = WidgetConfig::default();
    cfg.collapse.member_display = "block".into();
    let json = cfg.to_json().unwrap();
    assert_eq!(WidgetConfig::from_json(&json).unwrap(), cfg);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = WidgetConfig::from_json(r#"{ "search": 3 }"#).unwrap_err();
    assert!(matches!(err, SetupError::Config(_)));
    assert!(err.to_string().starts_with("config error: "));
}

#[test]
fn loaded_labels_reach_the_page() {
    let mut doc = MemDocument::new();
    let root = doc.root();
    doc.append(root, "input").attr("type", "search").build();
    let results = doc.append(root, "section").class("search-results").build();
    doc.append(results, "span").class("search-query").build();
    doc.append(results, "p").class("no-results").build();
    let content = doc.append(root, "section").class("content").build();
    doc.append(content, "h3").attr("data-collapse", "g").build();
    let row = doc
        .append(content, "div")
        .attr("data-collapse-group", "g")
        .build();

    let cfg =
        WidgetConfig::from_json(r#"{ "collapse": { "expand_label": "show", "member_display": "block" } }"#)
            .unwrap();
    let mut page = Page::init(&mut doc, &cfg).unwrap();
    let trigger = *page.collapse.triggers()[0].trigger();
    assert_eq!(doc.text_content(&trigger), "show");

    page.collapse.activate(&mut doc, &trigger);
    assert_eq!(doc.display(&row), Some(CssDisplay::Block));
}
