#![forbid(unsafe_code)]

//! A small CSS selector subset for locating widget markup.
//!
//! The widgets only ever need to find elements by tag, class, id and
//! attribute, optionally scoped under an ancestor. Selector text is tokenized
//! with `cssparser`, so escapes, strings and comments follow CSS syntax, and
//! only that subset is accepted. The same selector strings work against the
//! in-memory [`MemDocument`](crate::MemDocument) and, rendered back through
//! [`Display`](core::fmt::Display), against a browser's `querySelectorAll`.
//!
//! # Grammar
//!
//! ```text
//! selector  := compound ( WS+ compound )*
//! compound  := ( IDENT | '*' )? ( '.' IDENT | HASH | attr )*
//! attr      := '[' WS* IDENT WS* ( '=' WS* ( IDENT | STRING ) WS* )? ']'
//! ```
//!
//! Only the descendant combinator (whitespace) is supported. `>`, `+`, `~`
//! and selector lists (`,`) are rejected with
//! [`SelectorErrorKind::UnsupportedCombinator`]. As in browsers, a block or
//! string left open at the end of the input is closed implicitly.
//!
//! # Example
//!
//! ```
//! use docpane_dom::Selector;
//!
//! let sel: Selector = ".search-results li[data-keywords]".parse().unwrap();
//! assert_eq!(sel.compounds().len(), 2);
//! assert_eq!(sel.to_string(), ".search-results li[data-keywords]");
//! ```

use core::fmt;
use core::str::FromStr;

use cssparser::{
    ParseErrorKind, Parser, ParserInput, ToCss, Token, serialize_identifier, serialize_string,
};

/// How an attribute selector matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    /// `[name]`: the attribute is present with any value.
    Present,
    /// `[name="value"]`: the attribute equals `value` exactly.
    Equals(String),
}

/// A single `[...]` attribute condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSelector {
    /// Attribute name, lowercased.
    pub name: String,
    /// Match rule.
    pub matcher: AttrMatch,
}

impl AttrSelector {
    fn matches(&self, value: Option<&str>) -> bool {
        match (&self.matcher, value) {
            (_, None) => false,
            (AttrMatch::Present, Some(_)) => true,
            (AttrMatch::Equals(expected), Some(actual)) => expected == actual,
        }
    }
}

/// A compound selector: conditions that must all hold on one element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    /// Tag name, lowercased. `None` matches any tag.
    pub tag: Option<String>,
    /// Required `id`.
    pub id: Option<String>,
    /// Required classes.
    pub classes: Vec<String>,
    /// Attribute conditions.
    pub attrs: Vec<AttrSelector>,
}

impl Compound {
    /// Test this compound against an element described by its tag and an
    /// attribute lookup.
    pub fn matches<'a>(&self, tag: &str, attr: impl Fn(&str) -> Option<&'a str>) -> bool {
        if let Some(expected) = &self.tag
            && !expected.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && attr("id") != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.is_empty() {
            let class_attr = attr("class").unwrap_or("");
            let has_all = self
                .classes
                .iter()
                .all(|class| class_attr.split_ascii_whitespace().any(|c| c == class));
            if !has_all {
                return false;
            }
        }
        self.attrs.iter().all(|a| a.matches(attr(&a.name)))
    }

    fn is_universal(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_universal() {
            return f.write_str("*");
        }
        if let Some(tag) = &self.tag {
            serialize_identifier(tag, f)?;
        }
        if let Some(id) = &self.id {
            f.write_str("#")?;
            serialize_identifier(id, f)?;
        }
        for class in &self.classes {
            f.write_str(".")?;
            serialize_identifier(class, f)?;
        }
        for attr in &self.attrs {
            f.write_str("[")?;
            serialize_identifier(&attr.name, f)?;
            if let AttrMatch::Equals(value) = &attr.matcher {
                f.write_str("=")?;
                serialize_string(value, f)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// A parsed selector: compounds joined by descendant combinators.
///
/// Compounds are stored outermost first; the last compound is the subject
/// (the element actually returned by a query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let compounds = selector(&mut parser)?;
        if compounds.is_empty() {
            return Err(SelectorError {
                position: source.len(),
                kind: SelectorErrorKind::Empty,
            });
        }
        Ok(Self { compounds })
    }

    /// `[name]`
    #[must_use]
    pub fn attribute_present(name: &str) -> Self {
        Self::single(AttrSelector {
            name: name.to_ascii_lowercase(),
            matcher: AttrMatch::Present,
        })
    }

    /// `[name="value"]`, with `value` taken verbatim (no escaping needed by
    /// the caller).
    #[must_use]
    pub fn attribute_equals(name: &str, value: &str) -> Self {
        Self::single(AttrSelector {
            name: name.to_ascii_lowercase(),
            matcher: AttrMatch::Equals(value.to_owned()),
        })
    }

    fn single(attr: AttrSelector) -> Self {
        Self {
            compounds: vec![Compound {
                attrs: vec![attr],
                ..Compound::default()
            }],
        }
    }

    /// All compounds, outermost first.
    #[must_use]
    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    /// The compound the matched element itself must satisfy.
    #[must_use]
    pub fn subject(&self) -> &Compound {
        // Parser guarantees at least one compound.
        &self.compounds[self.compounds.len() - 1]
    }

    /// Ancestor compounds, outermost first.
    #[must_use]
    pub fn ancestors(&self) -> &[Compound] {
        &self.compounds[..self.compounds.len() - 1]
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.compounds.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{compound}")?;
        }
        Ok(())
    }
}

/// Why a selector failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorErrorKind {
    /// The input was empty or whitespace.
    Empty,
    /// A token outside the supported subset, rendered as CSS.
    UnexpectedToken(String),
    /// Input ended where a name or value was required.
    UnexpectedEnd,
    /// A quoted attribute value ran into a line break.
    UnterminatedString,
    /// `>`, `+`, `~` or `,`.
    UnsupportedCombinator(char),
}

/// Selector parse error with the byte offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorError {
    /// Byte offset into the source.
    pub position: usize,
    /// What went wrong.
    pub kind: SelectorErrorKind,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SelectorErrorKind::Empty => write!(f, "empty selector"),
            SelectorErrorKind::UnexpectedToken(token) => {
                write!(f, "unexpected {token:?} at offset {}", self.position)
            }
            SelectorErrorKind::UnexpectedEnd => {
                write!(f, "unexpected end of selector at offset {}", self.position)
            }
            SelectorErrorKind::UnterminatedString => {
                write!(f, "unterminated string starting at offset {}", self.position)
            }
            SelectorErrorKind::UnsupportedCombinator(c) => {
                write!(f, "unsupported combinator {c:?} at offset {}", self.position)
            }
        }
    }
}

impl std::error::Error for SelectorError {}

fn unexpected(position: usize, token: &Token<'_>) -> SelectorError {
    SelectorError {
        position,
        kind: SelectorErrorKind::UnexpectedToken(token.to_css_string()),
    }
}

fn end_of_input(position: usize) -> SelectorError {
    SelectorError {
        position,
        kind: SelectorErrorKind::UnexpectedEnd,
    }
}

/// Next token, whitespace included, with the byte offset it starts from.
fn next_raw<'i>(parser: &mut Parser<'i, '_>) -> (usize, Option<Token<'i>>) {
    let position = parser.position().byte_index();
    (position, parser.next_including_whitespace().ok().cloned())
}

/// Next non-whitespace token, with the byte offset the search started from.
fn next_token<'i>(parser: &mut Parser<'i, '_>) -> (usize, Option<Token<'i>>) {
    let position = parser.position().byte_index();
    (position, parser.next().ok().cloned())
}

fn selector(parser: &mut Parser<'_, '_>) -> Result<Vec<Compound>, SelectorError> {
    let mut compounds = Vec::new();
    let mut current: Option<Compound> = None;

    loop {
        let (position, Some(token)) = next_raw(parser) else {
            break;
        };
        match token {
            Token::WhiteSpace(_) => compounds.extend(current.take()),
            Token::Ident(tag) if current.is_none() => {
                current = Some(Compound {
                    tag: Some(tag.to_ascii_lowercase()),
                    ..Compound::default()
                });
            }
            Token::Delim('*') if current.is_none() => current = Some(Compound::default()),
            Token::IDHash(id) => {
                current.get_or_insert_with(Compound::default).id = Some(String::from(&*id));
            }
            Token::Delim('.') => {
                let class = match next_raw(parser) {
                    (_, Some(Token::Ident(class))) => String::from(&*class),
                    (at, Some(other)) => return Err(unexpected(at, &other)),
                    (at, None) => return Err(end_of_input(at)),
                };
                current.get_or_insert_with(Compound::default).classes.push(class);
            }
            Token::SquareBracketBlock => {
                let attr = attribute_block(parser, position)?;
                current.get_or_insert_with(Compound::default).attrs.push(attr);
            }
            Token::Delim(c @ ('>' | '+' | '~')) => {
                return Err(SelectorError {
                    position,
                    kind: SelectorErrorKind::UnsupportedCombinator(c),
                });
            }
            Token::Comma => {
                return Err(SelectorError {
                    position,
                    kind: SelectorErrorKind::UnsupportedCombinator(','),
                });
            }
            other => return Err(unexpected(position, &other)),
        }
    }

    compounds.extend(current);
    Ok(compounds)
}

fn attribute_block(parser: &mut Parser<'_, '_>, open: usize) -> Result<AttrSelector, SelectorError> {
    parser
        .parse_nested_block(|block| {
            attribute(block).map_err(|err| block.new_custom_error::<_, SelectorError>(err))
        })
        .map_err(|err| match err.kind {
            ParseErrorKind::Custom(err) => err,
            ParseErrorKind::Basic(_) => unexpected(open, &Token::SquareBracketBlock),
        })
}

fn attribute(block: &mut Parser<'_, '_>) -> Result<AttrSelector, SelectorError> {
    let name = match next_token(block) {
        (_, Some(Token::Ident(name))) => name.to_ascii_lowercase(),
        (at, Some(other)) => return Err(unexpected(at, &other)),
        (at, None) => return Err(end_of_input(at)),
    };

    let matcher = match next_token(block) {
        (_, None) => AttrMatch::Present,
        (_, Some(Token::Delim('='))) => match next_token(block) {
            (_, Some(Token::Ident(value) | Token::QuotedString(value))) => {
                AttrMatch::Equals(String::from(&*value))
            }
            (at, Some(Token::BadString(_))) => {
                return Err(SelectorError {
                    position: at,
                    kind: SelectorErrorKind::UnterminatedString,
                });
            }
            (at, Some(other)) => return Err(unexpected(at, &other)),
            (at, None) => return Err(end_of_input(at)),
        },
        (at, Some(other)) => return Err(unexpected(at, &other)),
    };

    if let (at, Some(other)) = next_token(block) {
        return Err(unexpected(at, &other));
    }
    Ok(AttrSelector { name, matcher })
}
