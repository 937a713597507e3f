//! Document - high-level document API

use crate::{DomTree, NodeId};

/// HTML Document
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
}

impl Document {
    /// Create a new empty document
    pub fn new(url: &str) -> Self {
        tracing::debug!(url, "new document");
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The document root node
    #[inline]
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get element by ID (first match in document order)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.root())
            .with_nodes()
            .find(|(_, node)| {
                node.as_element()
                    .is_some_and(|e| e.id.as_deref() == Some(id))
            })
            .map(|(id, _)| id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new("about:blank");
        let root = doc.root();
        let div = doc.tree_mut().create_element("div");
        doc.tree_mut()
            .get_mut(div)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr("id", "main");
        doc.tree_mut().append_child(root, div).unwrap();

        assert_eq!(doc.get_element_by_id("main"), Some(div));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }
}
