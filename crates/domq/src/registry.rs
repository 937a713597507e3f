//! Capability registry boundary
//!
//! The registry is the external source of named operations merged onto
//! collections. The engine treats the node-method map as opaque: it fetches
//! the map once at construction and attaches it to every wrapped collection,
//! never inspecting individual entries.
//!
//! Sequence-level methods are a fixed set (every / filter / forEach / some /
//! map); the registry only controls which names resolve to which member of
//! that set, which is how `each` aliases `forEach`.

use std::collections::BTreeMap;
use std::sync::Arc;

use domq_dom::{Document, NodeId};

/// Value returned by a node method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodValue {
    /// Operation applied for effect only
    None,
    Bool(bool),
    Text(String),
    Nodes(Vec<NodeId>),
}

/// A named operation over a collection of nodes
///
/// Methods receive the document, the collection's node sequence, and opaque
/// string arguments. What a method does with them is entirely the registry's
/// business.
pub type NodeMethod = Arc<dyn Fn(&mut Document, &[NodeId], &[&str]) -> MethodValue + Send + Sync>;

/// Ordered name -> operation map for per-collection methods
#[derive(Clone, Default)]
pub struct MethodMap {
    map: BTreeMap<String, NodeMethod>,
}

impl MethodMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under a name, replacing any existing entry
    pub fn insert<F>(&mut self, name: &str, method: F)
    where
        F: Fn(&mut Document, &[NodeId], &[&str]) -> MethodValue + Send + Sync + 'static,
    {
        self.map.insert(name.to_string(), Arc::new(method));
    }

    pub fn get(&self, name: &str) -> Option<&NodeMethod> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Registered operation names, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl std::fmt::Debug for MethodMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodMap")
            .field("names", &self.map.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The fixed set of sequence-level operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMethod {
    /// Test all elements against a predicate
    Every,
    /// Keep elements matching a predicate
    Filter,
    /// Visit every element
    ForEach,
    /// Test whether any element matches a predicate
    Some,
    /// Transform every element
    Map,
}

/// Name -> sequence-level operation map
pub type ListMethodMap = BTreeMap<String, ListMethod>;

/// The default list-method names, including the `each` alias for `forEach`
pub fn default_list_methods() -> ListMethodMap {
    let mut map = ListMethodMap::new();
    map.insert("every".to_string(), ListMethod::Every);
    map.insert("filter".to_string(), ListMethod::Filter);
    map.insert("forEach".to_string(), ListMethod::ForEach);
    map.insert("each".to_string(), ListMethod::ForEach);
    map.insert("some".to_string(), ListMethod::Some);
    map.insert("map".to_string(), ListMethod::Map);
    map
}

/// External source of collection capabilities
///
/// Implementations are injected into [`crate::QueryEngine::new`]; the engine
/// calls each accessor exactly once and shares the result across all
/// collections it produces.
pub trait CapabilityRegistry {
    /// Per-collection operations, merged verbatim onto wrapped collections
    fn node_methods(&self) -> MethodMap;

    /// Sequence-level operations; the default mapping covers the fixed set
    fn node_list_methods(&self) -> ListMethodMap {
        default_list_methods()
    }
}

/// Registry with no node methods; wrapped collections still get the
/// sequence-level operations
pub struct EmptyRegistry;

impl CapabilityRegistry for EmptyRegistry {
    fn node_methods(&self) -> MethodMap {
        MethodMap::new()
    }
}
