#![forbid(unsafe_code)]

//! Widget configuration.
//!
//! Every name the widgets share with the site generator (selectors,
//! attribute names, labels, display values) lives here as data. The defaults
//! match the generator's markup, so `WidgetConfig::default()` is what a page
//! normally runs with.
//!
//! With the `config` feature the types are serde-enabled and can be loaded
//! from JSON; missing fields keep their defaults:
//!
//! ```
//! # #[cfg(feature = "config")]
//! # fn main() -> Result<(), docpane_widgets::SetupError> {
//! use docpane_widgets::WidgetConfig;
//!
//! let cfg = WidgetConfig::from_json(r#"{ "collapse": { "expand_label": "[+]" } }"#)?;
//! assert_eq!(cfg.collapse.expand_label, "[+]");
//! assert_eq!(cfg.collapse.collapse_label, "(collapse)");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "config"))]
//! # fn main() {}
//! ```

use docpane_dom::{CssDisplay, Selector};

use crate::error::SetupError;

/// Markup contract for the search widget.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    /// The query text input.
    pub input_selector: String,
    /// Element that echoes the raw query back to the reader.
    pub query_echo_selector: String,
    /// Container holding the result list.
    pub results_selector: String,
    /// Indicator shown when nothing matches.
    pub no_results_selector: String,
    /// Default page content, shown while idle.
    pub content_selector: String,
    /// Candidate result items.
    pub entry_selector: String,
    /// Attribute on each entry holding its raw keywords.
    pub keywords_attribute: String,
    /// The navigation link inside an entry, activated by Enter.
    pub entry_link_selector: String,
    /// `display` for a matching entry.
    pub entry_display: String,
    /// `display` for shown containers and the no-results indicator.
    pub container_display: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            input_selector: r#"input[type="search"]"#.to_owned(),
            query_echo_selector: ".search-query".to_owned(),
            results_selector: "section.search-results".to_owned(),
            no_results_selector: ".no-results".to_owned(),
            content_selector: "section.content".to_owned(),
            entry_selector: ".search-results li[data-keywords]".to_owned(),
            keywords_attribute: "data-keywords".to_owned(),
            entry_link_selector: "a".to_owned(),
            entry_display: "list-item".to_owned(),
            container_display: "block".to_owned(),
        }
    }
}

/// Markup contract for collapse groups.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CollapseConfig {
    /// Attribute naming the group on a header; a trigger is added to each.
    pub header_attribute: String,
    /// Attribute naming the group on each member.
    pub member_attribute: String,
    /// Tag of the synthesized trigger.
    pub trigger_tag: String,
    /// Class of the synthesized trigger.
    pub trigger_class: String,
    /// `href` of the synthesized trigger.
    pub trigger_href: String,
    /// Attribute mirroring the collapsed state (`"true"`/`"false"`).
    pub state_attribute: String,
    /// Label while expanded.
    pub collapse_label: String,
    /// Label while collapsed.
    pub expand_label: String,
    /// `display` for members of an expanded group.
    pub member_display: String,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            header_attribute: "data-collapse".to_owned(),
            member_attribute: "data-collapse-group".to_owned(),
            trigger_tag: "a".to_owned(),
            trigger_class: "collapse-trigger".to_owned(),
            trigger_href: "#".to_owned(),
            state_attribute: "data-collapsed".to_owned(),
            collapse_label: "(collapse)".to_owned(),
            expand_label: "(expand)".to_owned(),
            member_display: "table-row".to_owned(),
        }
    }
}

/// Configuration for both widgets on a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WidgetConfig {
    /// Search widget.
    pub search: SearchConfig,
    /// Collapse groups.
    pub collapse: CollapseConfig,
}

#[cfg(feature = "config")]
impl WidgetConfig {
    /// Decode a configuration from JSON. Absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// [`SetupError::Config`] if `json` is malformed or a field has the wrong
    /// type.
    ///
    /// ```
    /// use docpane_widgets::{SetupError, WidgetConfig};
    ///
    /// assert_eq!(WidgetConfig::from_json("{}").unwrap(), WidgetConfig::default());
    /// let err = WidgetConfig::from_json(r#"{ "search": 3 }"#).unwrap_err();
    /// assert!(matches!(err, SetupError::Config(_)));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        serde_json::from_str(json).map_err(|e| SetupError::Config(e.to_string()))
    }

    /// Encode this configuration as JSON.
    ///
    /// # Errors
    ///
    /// [`SetupError::Config`] if serialization fails. Every field is a plain
    /// string, so this does not happen for values built in Rust.
    pub fn to_json(&self) -> Result<String, SetupError> {
        serde_json::to_string(self).map_err(|e| SetupError::Config(e.to_string()))
    }
}

/// Parse a configured selector, tagging failures with what it locates.
pub(crate) fn parse_selector(role: &'static str, source: &str) -> Result<Selector, SetupError> {
    Selector::parse(source).map_err(|source| SetupError::Selector { role, source })
}

/// A configured display keyword. An empty keyword clears the inline value.
pub(crate) fn display_value(keyword: &str) -> CssDisplay {
    CssDisplay::from(keyword)
}
