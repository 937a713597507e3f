//! Wrapped collections
//!
//! A `Collection` is an ordered node sequence plus the capability set it was
//! wrapped with. Wrapping never changes the sequence: length, order and
//! indexed access are exactly those of the raw node list, and the capability
//! maps ride alongside behind `Arc`s. Re-wrapping a collection swaps in the
//! same capability set and copies the sequence untouched.

use std::ops::Deref;
use std::sync::Arc;

use domq_dom::{Document, NodeId};

use crate::registry::{ListMethod, ListMethodMap, MethodMap, MethodValue};
use crate::resolver::{QueryEngine, QueryResult};
use crate::{QueryError, Selector};

/// Conversion into a plain ordered node sequence
///
/// This is the normalization step of wrapping: a single node becomes a
/// one-element sequence, a borrowed slice is snapshot-copied, an owned
/// sequence is used as-is, and an existing collection contributes its
/// sequence unchanged.
pub trait IntoNodes {
    fn into_nodes(self) -> Vec<NodeId>;
}

impl IntoNodes for NodeId {
    fn into_nodes(self) -> Vec<NodeId> {
        vec![self]
    }
}

impl IntoNodes for Vec<NodeId> {
    fn into_nodes(self) -> Vec<NodeId> {
        self
    }
}

impl IntoNodes for &[NodeId] {
    fn into_nodes(self) -> Vec<NodeId> {
        self.to_vec()
    }
}

impl IntoNodes for Collection {
    fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

impl IntoNodes for &Collection {
    fn into_nodes(self) -> Vec<NodeId> {
        self.nodes.clone()
    }
}

impl IntoNodes for &QueryResult {
    fn into_nodes(self) -> Vec<NodeId> {
        self.nodes().to_vec()
    }
}

/// An ordered element sequence carrying a capability set
#[derive(Clone)]
pub struct Collection {
    nodes: Vec<NodeId>,
    methods: Arc<MethodMap>,
    list_methods: Arc<ListMethodMap>,
}

impl Collection {
    pub(crate) fn new(
        nodes: Vec<NodeId>,
        methods: Arc<MethodMap>,
        list_methods: Arc<ListMethodMap>,
    ) -> Self {
        Self {
            nodes,
            methods,
            list_methods,
        }
    }

    /// The underlying node sequence
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Look up a named capability
    pub fn method(&self, name: &str) -> Option<&crate::registry::NodeMethod> {
        self.methods.get(name)
    }

    /// Names of all attached capabilities
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.names()
    }

    /// Invoke a named capability over this collection
    pub fn call(
        &self,
        name: &str,
        doc: &mut Document,
        args: &[&str],
    ) -> Result<MethodValue, QueryError> {
        let method = self.methods.get(name).ok_or_else(|| QueryError::UnknownMethod {
            name: name.to_string(),
        })?;
        Ok(method(doc, &self.nodes, args))
    }

    /// Resolve a sequence-level method name (`"each"` aliases `"forEach"`)
    pub fn list_method(&self, name: &str) -> Option<ListMethod> {
        self.list_methods.get(name).copied()
    }

    /// Test all elements against a predicate
    pub fn every(&self, mut pred: impl FnMut(NodeId) -> bool) -> bool {
        self.nodes.iter().copied().all(&mut pred)
    }

    /// Test whether any element matches a predicate
    pub fn some(&self, mut pred: impl FnMut(NodeId) -> bool) -> bool {
        self.nodes.iter().copied().any(&mut pred)
    }

    /// Keep matching elements; the result shares this capability set
    pub fn filter(&self, mut pred: impl FnMut(NodeId) -> bool) -> Collection {
        Collection {
            nodes: self.nodes.iter().copied().filter(|id| pred(*id)).collect(),
            methods: Arc::clone(&self.methods),
            list_methods: Arc::clone(&self.list_methods),
        }
    }

    /// Visit every element in order
    pub fn for_each(&self, mut f: impl FnMut(NodeId)) {
        for id in self.nodes.iter().copied() {
            f(id);
        }
    }

    /// Transform every element in order
    pub fn map<T>(&self, f: impl FnMut(NodeId) -> T) -> Vec<T> {
        self.nodes.iter().copied().map(f).collect()
    }

    /// Sub-query scoped to this collection's first element
    pub fn find(
        &self,
        engine: &QueryEngine,
        doc: &mut Document,
        selector: impl Into<Selector>,
    ) -> Result<QueryResult, QueryError> {
        engine.query(doc, selector, self.nodes.clone())
    }
}

impl Deref for Collection {
    type Target = [NodeId];

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("nodes", &self.nodes)
            .field("methods", &self.methods)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_list_methods;

    fn bare(nodes: Vec<NodeId>) -> Collection {
        Collection::new(
            nodes,
            Arc::new(MethodMap::new()),
            Arc::new(default_list_methods()),
        )
    }

    #[test]
    fn test_sequence_semantics() {
        let ids = vec![NodeId::ROOT];
        let collection = bare(ids.clone());

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.nodes(), &ids[..]);
        assert_eq!(collection[0], NodeId::ROOT);
        assert_eq!(collection.first(), Some(NodeId::ROOT));
    }

    #[test]
    fn test_list_ops() {
        let mut tree = domq_dom::DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("a");
        let collection = bare(vec![a, b, c]);

        let is_a = |id: NodeId| tree.get(id).unwrap().as_element().unwrap().tag == "a";

        assert!(!collection.every(is_a));
        assert!(collection.some(is_a));
        assert_eq!(collection.filter(is_a).nodes(), &[a, c]);

        let mut visited = Vec::new();
        collection.for_each(|id| visited.push(id));
        assert_eq!(visited, vec![a, b, c]);

        let tags: Vec<String> = collection
            .map(|id| tree.get(id).unwrap().as_element().unwrap().tag.clone());
        assert_eq!(tags, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_each_alias() {
        let collection = bare(Vec::new());
        assert_eq!(collection.list_method("each"), Some(ListMethod::ForEach));
        assert_eq!(collection.list_method("forEach"), Some(ListMethod::ForEach));
        assert_eq!(collection.list_method("reduce"), None);
    }

    #[test]
    fn test_unknown_method() {
        let collection = bare(Vec::new());
        let mut doc = Document::default();
        let err = collection.call("attr", &mut doc, &[]).unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownMethod {
                name: "attr".to_string()
            }
        );
    }
}
