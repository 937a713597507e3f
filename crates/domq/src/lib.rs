//! domq - DOM query and element collections
//!
//! A small query layer over the domq arena DOM: give it a selector string, a
//! node, or a node sequence and it resolves a normalized, ordered collection
//! of elements. Collections come back in one of two shapes, chosen by
//! configuration:
//!
//! - wrapped: a [`Collection`] carrying the capability set supplied by a
//!   [`CapabilityRegistry`], so named operations and sequence-level helpers
//!   (every / filter / forEach / some / map) chain off the result
//! - native: the bare `Vec<NodeId>` sequence, untouched
//!
//! Selector strings that look like HTML markup (`<tag ...>`) are parsed into
//! a detached fragment instead of being queried.
//!
//! ```
//! use domq::{EmptyRegistry, QueryConfig, QueryEngine};
//!
//! let mut doc = domq_html::parse_document("<p class='a'>one</p><p>two</p>", "about:blank");
//! let engine = QueryEngine::new(&EmptyRegistry, QueryConfig::default());
//! let result = engine.query(&mut doc, "p.a", ()).unwrap();
//! assert_eq!(result.len(), 1);
//! ```
//!
//! Failures are never intercepted: malformed selectors and unresolvable
//! contexts surface as [`QueryError`] at the offending call.

mod collection;
mod config;
mod fragment;
mod input;
mod registry;
mod resolver;

pub use collection::{Collection, IntoNodes};
pub use config::QueryConfig;
pub use fragment::{create_fragment, looks_like_html};
pub use input::{Context, Selector};
pub use registry::{
    default_list_methods, CapabilityRegistry, EmptyRegistry, ListMethod, ListMethodMap,
    MethodMap, MethodValue, NodeMethod,
};
pub use resolver::{QueryEngine, QueryResult};

pub use domq_dom::{Document, DomTree, NodeId};

/// Query errors
///
/// Host-level failures are wrapped, not rewritten: a selector parse error is
/// the selector engine's own error, surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Selector(#[from] domq_select::SelectorError),

    #[error(transparent)]
    Dom(#[from] domq_dom::DomError),

    /// A context resolved to no element
    #[error("context resolved to no element")]
    ContextNotFound { selector: Option<String> },

    /// A named capability was invoked that the registry never supplied
    #[error("unknown method: {name}")]
    UnknownMethod { name: String },
}
