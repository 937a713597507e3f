//! HTML-fragment detection and construction
//!
//! A selector string that starts (after optional leading whitespace) with
//! `<` followed by a tag name or `!` is treated as markup, not a query.
//! Detection runs on the untrimmed string; trimming happens only inside
//! construction.

use domq_dom::{Document, NodeId};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::QueryError;

static FRAGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*<(\w+|!)[^>]*>").expect("fragment pattern is valid"));

/// Check whether a selector string looks like an HTML fragment
pub fn looks_like_html(selector: &str) -> bool {
    FRAGMENT_RE.is_match(selector)
}

/// Build a detached fragment from an HTML string
///
/// The markup is parsed into a throwaway container, then every resulting
/// child is moved, in parse order, into a fragment container until the
/// source container is drained. Returns the fragment's children in order;
/// the source container is left empty.
pub fn create_fragment(doc: &mut Document, html: &str) -> Result<Vec<NodeId>, QueryError> {
    let container = doc.tree_mut().create_element("div");
    domq_html::parse_fragment_into(doc, container, html.trim());

    let fragment = doc.tree_mut().create_fragment();
    while let Some(first) = doc.tree().first_child(container) {
        doc.tree_mut().append_child(fragment, first)?;
    }

    let children = doc.tree().child_ids(fragment);
    tracing::debug!(children = children.len(), "created fragment");
    Ok(children)
}
