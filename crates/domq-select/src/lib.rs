//! domq Selectors
//!
//! CSS selector parsing and matching against the arena DOM. Supports the
//! selector profile needed for element queries: universal, type, id, class
//! and attribute selectors, compounds of those, and the four combinators
//! (descendant, `>`, `+`, `~`), with comma-separated selector lists.
//!
//! Parse failures are surfaced to the caller unchanged; there is no error
//! recovery on malformed selectors.

mod matcher;
mod parser;
mod selectors;

pub use matcher::{matches, query_all, query_first};
pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    SelectorList, SimpleSelector,
};

/// Selector parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {found:?} at position {pos}")]
    Unexpected { pos: usize, found: char },

    #[error("unterminated attribute selector")]
    UnterminatedAttribute,

    #[error("pseudo-classes and pseudo-elements are not supported: {0}")]
    UnsupportedPseudo(String),
}

/// Parse a selector string into a selector list
pub fn parse(input: &str) -> Result<SelectorList, SelectorError> {
    parser::parse(input)
}
