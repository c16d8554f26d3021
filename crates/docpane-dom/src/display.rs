#![forbid(unsafe_code)]

//! CSS `display` values the widgets assign to elements.

use core::fmt;

/// A CSS `display` value.
///
/// Visibility in the widgets is expressed purely through the inline
/// `display` property: `None` hides an element, anything else shows it in
/// the given layout role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CssDisplay {
    /// `display: none`
    None,
    /// `display: block`
    Block,
    /// `display: inline`
    Inline,
    /// `display: list-item`
    ListItem,
    /// `display: table-row`
    TableRow,
    /// Any other keyword, stored verbatim.
    Other(String),
}

impl CssDisplay {
    /// The CSS keyword for this value.
    #[must_use]
    pub fn as_css(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Block => "block",
            Self::Inline => "inline",
            Self::ListItem => "list-item",
            Self::TableRow => "table-row",
            Self::Other(keyword) => keyword,
        }
    }

    /// Whether this value hides the element.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<&str> for CssDisplay {
    fn from(keyword: &str) -> Self {
        let keyword = keyword.trim();
        match keyword.to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "block" => Self::Block,
            "inline" => Self::Inline,
            "list-item" => Self::ListItem,
            "table-row" => Self::TableRow,
            _ => Self::Other(keyword.to_owned()),
        }
    }
}

impl fmt::Display for CssDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keywords_parse_case_insensitively() {
        assert_eq!(CssDisplay::from("TABLE-ROW"), CssDisplay::TableRow);
        assert_eq!(CssDisplay::from(" list-item "), CssDisplay::ListItem);
        assert_eq!(CssDisplay::from("none"), CssDisplay::None);
    }

    #[test]
    fn unknown_keywords_are_kept() {
        let flex = CssDisplay::from("flex");
        assert_eq!(flex, CssDisplay::Other("flex".into()));
        assert_eq!(flex.as_css(), "flex");
        assert!(!flex.is_hidden());
    }

    #[test]
    fn only_none_is_hidden() {
        assert!(CssDisplay::None.is_hidden());
        assert!(!CssDisplay::Block.is_hidden());
        assert_eq!(CssDisplay::TableRow.to_string(), "table-row");
    }
}
