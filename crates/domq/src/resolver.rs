//! Query resolution
//!
//! `QueryEngine` classifies the polymorphic selector input, produces a raw
//! node sequence, and returns it either bare (native mode) or wrapped with
//! the capability set. Dispatch order, first match wins:
//!
//! 1. absent selector -> empty-pattern query against the document root
//! 2. node / node sequence -> normalized as-is, order and identity kept
//! 3. string that looks like HTML -> fragment construction
//! 4. plain selector string -> context resolved to a single root, then a
//!    scoped query in document order
//!
//! No selector validation happens here; whatever the selector engine rejects
//! propagates to the caller unchanged.

use std::sync::Arc;

use domq_dom::{Document, NodeId};

use crate::collection::{Collection, IntoNodes};
use crate::config::QueryConfig;
use crate::fragment;
use crate::input::{Context, Selector};
use crate::registry::{CapabilityRegistry, ListMethodMap, MethodMap};
use crate::QueryError;

/// Result of a query: bare in native mode, wrapped otherwise
///
/// The two variants carry the same sequence for the same input; only the
/// presence of the capability set differs.
#[derive(Debug, Clone)]
pub enum QueryResult {
    /// Bare node sequence, no augmentation
    Native(Vec<NodeId>),
    /// Capability-wrapped collection
    Wrapped(Collection),
}

impl QueryResult {
    /// The node sequence, regardless of variant
    pub fn nodes(&self) -> &[NodeId] {
        match self {
            QueryResult::Native(nodes) => nodes,
            QueryResult::Wrapped(collection) => collection.nodes(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes().first().copied()
    }

    pub fn is_native(&self) -> bool {
        matches!(self, QueryResult::Native(_))
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            QueryResult::Native(_) => None,
            QueryResult::Wrapped(collection) => Some(collection),
        }
    }

    pub fn into_collection(self) -> Option<Collection> {
        match self {
            QueryResult::Native(_) => None,
            QueryResult::Wrapped(collection) => Some(collection),
        }
    }
}

/// Selector resolver
///
/// Holds the configuration and the capability set, both fixed at
/// construction: the registry accessors are called exactly once here and the
/// resulting maps are shared by every collection the engine wraps.
pub struct QueryEngine {
    config: QueryConfig,
    methods: Arc<MethodMap>,
    list_methods: Arc<ListMethodMap>,
}

impl QueryEngine {
    /// Create an engine with the given capability registry and configuration
    pub fn new(registry: &dyn CapabilityRegistry, config: QueryConfig) -> Self {
        let methods = Arc::new(registry.node_methods());
        let list_methods = Arc::new(registry.node_list_methods());
        tracing::debug!(
            node_methods = methods.len(),
            list_methods = list_methods.len(),
            native = config.native,
            "query engine constructed"
        );
        Self {
            config,
            methods,
            list_methods,
        }
    }

    /// Whether results are returned bare
    pub fn is_native(&self) -> bool {
        self.config.native
    }

    /// Resolve a selector to a collection
    ///
    /// `context` scopes string selectors only; node and node-sequence inputs
    /// ignore it. Pass `()` for the document root.
    pub fn query(
        &self,
        doc: &mut Document,
        selector: impl Into<Selector>,
        context: impl Into<Context>,
    ) -> Result<QueryResult, QueryError> {
        let nodes = match selector.into() {
            Selector::None => {
                // Documented native passthrough: the empty pattern goes to
                // the selector engine and its failure is the caller's.
                let list = domq_select::parse("")?;
                domq_select::query_all(doc.tree(), doc.root(), &list)
            }
            Selector::Node(id) => vec![id],
            Selector::Nodes(ids) => ids,
            Selector::Css(s) if fragment::looks_like_html(&s) => {
                fragment::create_fragment(doc, &s)?
            }
            Selector::Css(s) => {
                let root = self.resolve_context(doc, context.into())?;
                let list = domq_select::parse(&s)?;
                domq_select::query_all(doc.tree(), root, &list)
            }
        };

        Ok(if self.config.native {
            QueryResult::Native(nodes)
        } else {
            QueryResult::Wrapped(self.wrap(nodes))
        })
    }

    /// Sub-query scoped to a previous result's first element
    pub fn find(
        &self,
        doc: &mut Document,
        receiver: &QueryResult,
        selector: impl Into<Selector>,
    ) -> Result<QueryResult, QueryError> {
        self.query(doc, selector, receiver.nodes().to_vec())
    }

    /// Wrap a node sequence with this engine's capability set
    ///
    /// Accepts a single node, a sequence, or an existing collection; wrapping
    /// a collection again keeps the same capability names and sequence.
    pub fn wrap(&self, nodes: impl IntoNodes) -> Collection {
        Collection::new(
            nodes.into_nodes(),
            Arc::clone(&self.methods),
            Arc::clone(&self.list_methods),
        )
    }

    fn resolve_context(&self, doc: &Document, context: Context) -> Result<NodeId, QueryError> {
        match context {
            Context::Document => Ok(doc.root()),
            Context::Node(id) => Ok(id),
            Context::Nodes(ids) => {
                ids.first()
                    .copied()
                    .ok_or(QueryError::ContextNotFound { selector: None })
            }
            Context::Css(s) => {
                let list = domq_select::parse(&s)?;
                domq_select::query_first(doc.tree(), doc.root(), &list).ok_or(
                    QueryError::ContextNotFound {
                        selector: Some(s),
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EmptyRegistry;

    #[test]
    fn test_node_input_ignores_context() {
        let mut doc = domq_html::parse_document("<div><p>x</p></div>", "about:blank");
        let engine = QueryEngine::new(&EmptyRegistry, QueryConfig::default());
        let div = engine.query(&mut doc, "div", ()).unwrap().first().unwrap();

        let result = engine.query(&mut doc, div, "p").unwrap();
        assert_eq!(result.nodes(), &[div]);
    }

    #[test]
    fn test_context_not_found() {
        let mut doc = domq_html::parse_document("<div></div>", "about:blank");
        let engine = QueryEngine::new(&EmptyRegistry, QueryConfig::default());

        let err = engine.query(&mut doc, "span", ".missing").unwrap_err();
        assert_eq!(
            err,
            QueryError::ContextNotFound {
                selector: Some(".missing".to_string())
            }
        );

        let empty: Vec<NodeId> = Vec::new();
        let err = engine.query(&mut doc, "span", empty).unwrap_err();
        assert_eq!(err, QueryError::ContextNotFound { selector: None });
    }

    #[test]
    fn test_empty_selector_passthrough() {
        let mut doc = domq_html::parse_document("<div></div>", "about:blank");
        let engine = QueryEngine::new(&EmptyRegistry, QueryConfig::default());

        let err = engine.query(&mut doc, None::<&str>, ()).unwrap_err();
        assert_eq!(err, QueryError::Selector(domq_select::SelectorError::Empty));
    }

    #[test]
    fn test_malformed_selector_propagates() {
        let mut doc = domq_html::parse_document("<div></div>", "about:blank");
        let engine = QueryEngine::new(&EmptyRegistry, QueryConfig::default());

        let err = engine.query(&mut doc, "a:hover", ()).unwrap_err();
        assert!(matches!(
            err,
            QueryError::Selector(domq_select::SelectorError::UnsupportedPseudo(_))
        ));
    }
}
