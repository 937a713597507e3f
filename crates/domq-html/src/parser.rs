//! HTML5 parser implementation
//!
//! Uses html5ever's built-in RcDom and converts to our DOM format. This is
//! simpler and more reliable than implementing TreeSink directly.
//!
//! Fragment parsing goes through the document parser as well: html5ever
//! reconstructs a full document around the markup, and the fragment is the
//! children of the resulting `<body>`. That matches assigning markup to a
//! detached container's innerHTML.

use domq_dom::{Document, DomTree, NodeData, NodeId};
use html5ever::parse_document as html5_parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Parse an HTML string into a Document
pub fn parse_document(html: &str, url: &str) -> Document {
    tracing::debug!(url, "parsing HTML document");

    let dom = html5_parse_document(RcDom::default(), Default::default()).one(html);

    let mut document = Document::new(url);
    let root = document.root();
    convert_children(&dom.document, document.tree_mut(), root);

    tracing::debug!(nodes = document.tree().len(), "parsed document");
    document
}

/// Parse an HTML fragment and append its top-level nodes, in parse order, as
/// children of `container`. Returns the number of nodes appended.
pub fn parse_fragment_into(doc: &mut Document, container: NodeId, html: &str) -> usize {
    let dom = html5_parse_document(RcDom::default(), Default::default()).one(html);

    let before = doc.tree().child_ids(container).len();
    if let Some(body) = find_body(&dom.document) {
        convert_children(&body, doc.tree_mut(), container);
    }
    let appended = doc.tree().child_ids(container).len() - before;

    tracing::debug!(appended, "parsed fragment");
    appended
}

/// Locate the `<body>` element html5ever synthesizes around fragment markup
fn find_body(document: &Handle) -> Option<Handle> {
    let html = document
        .children
        .borrow()
        .iter()
        .find(|child| is_element_named(child, "html"))
        .cloned()?;
    let body = html
        .children
        .borrow()
        .iter()
        .find(|child| is_element_named(child, "body"))
        .cloned();
    body
}

fn is_element_named(handle: &Handle, tag: &str) -> bool {
    match &handle.data {
        RcNodeData::Element { name, .. } => name.local.as_ref() == tag,
        _ => false,
    }
}

/// Convert all children of an RcDom node into our DOM under `parent`
fn convert_children(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    for child in handle.children.borrow().iter() {
        convert_node(child, tree, parent);
    }
}

/// Convert one RcDom node (and its subtree) into our DOM format
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        RcNodeData::Document => {
            convert_children(handle, tree, parent);
        }
        RcNodeData::Doctype {
            name,
            public_id,
            system_id,
        } => {
            let id = tree.create_node(NodeData::Doctype {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            });
            let _ = tree.append_child(parent, id);
        }
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if !text.trim().is_empty() {
                let id = tree.create_text(&text);
                let _ = tree.append_child(parent, id);
            }
        }
        RcNodeData::Comment { contents } => {
            let id = tree.create_comment(&contents.to_string());
            let _ = tree.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let id = tree.create_element(name.local.as_ref());
            for attr in attrs.borrow().iter() {
                if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                    elem.set_attr(attr.name.local.as_ref(), &attr.value);
                }
            }
            let _ = tree.append_child(parent, id);

            convert_children(handle, tree, id);
        }
        RcNodeData::ProcessingInstruction { .. } => {
            // Not represented in our DOM
        }
    }
}
