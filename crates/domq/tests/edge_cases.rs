//! Edge case tests for domq
//!
//! Inputs at the boundaries of dispatch: empty sequences, duplicate nodes,
//! degenerate fragments, and failure propagation.

use domq::{
    Document, EmptyRegistry, NodeId, QueryConfig, QueryEngine, QueryError,
};
use domq_select::SelectorError;

fn engine() -> QueryEngine {
    QueryEngine::new(&EmptyRegistry, QueryConfig::default())
}

#[test]
fn test_empty_node_list_input() {
    let mut doc = Document::default();
    let result = engine().query(&mut doc, Vec::<NodeId>::new(), ()).unwrap();
    assert!(result.is_empty());
    assert!(!result.is_native());
}

#[test]
fn test_duplicates_preserved() {
    let mut doc = domq_html::parse_document("<p>x</p>", "about:blank");
    let p = engine().query(&mut doc, "p", ()).unwrap().first().unwrap();

    let result = engine().query(&mut doc, vec![p, p, p], ()).unwrap();
    assert_eq!(result.nodes(), &[p, p, p]);
}

#[test]
fn test_absent_selector_surfaces_empty_pattern_error() {
    let mut doc = Document::default();
    let err = engine().query(&mut doc, None::<&str>, ()).unwrap_err();
    assert_eq!(err, QueryError::Selector(SelectorError::Empty));
}

#[test]
fn test_doctype_only_fragment_is_empty() {
    let mut doc = Document::default();
    // Detected as a fragment; the HTML5 parser keeps no body content for it.
    let result = engine().query(&mut doc, "<!doctype html>", ()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_fragment_with_text_between_elements() {
    let mut doc = Document::default();
    let result = engine()
        .query(&mut doc, "<b>x</b>and<i>y</i>", ())
        .unwrap();

    // Element, text, element: all three survive in order.
    assert_eq!(result.len(), 3);
    let kinds: Vec<bool> = result
        .nodes()
        .iter()
        .map(|id| doc.tree().get(*id).unwrap().is_element())
        .collect();
    assert_eq!(kinds, vec![true, false, true]);
}

#[test]
fn test_context_node_list_uses_first_only() {
    let mut doc = domq_html::parse_document(
        "<div id='a'><span>in-a</span></div><div id='b'><span>in-b</span></div>",
        "about:blank",
    );
    let engine = engine();

    let divs = engine.query(&mut doc, "div", ()).unwrap().nodes().to_vec();
    assert_eq!(divs.len(), 2);

    let result = engine.query(&mut doc, "span", divs).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(doc.tree().text_content(result.first().unwrap()), "in-a");
}

#[test]
fn test_unterminated_attribute_selector_propagates() {
    let mut doc = Document::default();
    let err = engine().query(&mut doc, "[href", ()).unwrap_err();
    assert_eq!(
        err,
        QueryError::Selector(SelectorError::UnterminatedAttribute)
    );
}

#[test]
fn test_stray_angle_bracket_is_not_a_fragment() {
    let mut doc = Document::default();
    // "a < b" has no markup prefix, so it goes to the selector parser.
    let err = engine().query(&mut doc, "a < b", ()).unwrap_err();
    assert!(matches!(
        err,
        QueryError::Selector(SelectorError::Unexpected { found: '<', .. })
    ));
}

#[test]
fn test_native_mode_error_behavior_unchanged() {
    let mut doc = Document::default();
    let native = QueryEngine::new(&EmptyRegistry, QueryConfig::native());

    let err = native.query(&mut doc, ".missing )", ()).unwrap_err();
    assert!(matches!(err, QueryError::Selector(_)));
}

#[test]
fn test_query_on_empty_document() {
    let mut doc = Document::default();
    let result = engine().query(&mut doc, "div", ()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_fresh_collection_per_query() {
    let mut doc = domq_html::parse_document("<p>x</p>", "about:blank");
    let engine = engine();

    let first = engine.query(&mut doc, "p", ()).unwrap();
    // Build and attach another paragraph between the two queries.
    let frag = engine.query(&mut doc, "<p>y</p>", ()).unwrap();
    let new_p = frag.first().unwrap();
    let root = doc.root();
    doc.tree_mut().append_child(root, new_p).unwrap();

    let second = engine.query(&mut doc, "p", ()).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);
}
