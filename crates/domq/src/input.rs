//! Polymorphic query inputs
//!
//! The resolver accepts a selector string, a single node, or a node sequence
//! in the same position; `Selector` and `Context` are the tagged unions that
//! make the dispatch explicit. `From` impls keep call sites terse.

use domq_dom::NodeId;

/// What to retrieve: a query pattern or direct node reference(s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Absent selector; resolves through the engine's empty-pattern path
    None,
    /// Selector string, or HTML markup to build a fragment from
    Css(String),
    /// A single node, normalized to a one-element sequence
    Node(NodeId),
    /// A node sequence, used in order, duplicates kept
    Nodes(Vec<NodeId>),
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Selector::Css(s.to_string())
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Selector::Css(s)
    }
}

impl From<NodeId> for Selector {
    fn from(id: NodeId) -> Self {
        Selector::Node(id)
    }
}

impl From<Vec<NodeId>> for Selector {
    fn from(ids: Vec<NodeId>) -> Self {
        Selector::Nodes(ids)
    }
}

impl From<&[NodeId]> for Selector {
    fn from(ids: &[NodeId]) -> Self {
        Selector::Nodes(ids.to_vec())
    }
}

impl<T: Into<Selector>> From<Option<T>> for Selector {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => value.into(),
            None => Selector::None,
        }
    }
}

/// The root scope a string selector is evaluated within
///
/// A node-sequence context contributes only its first element; an empty
/// sequence fails at resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// Default: the document root
    Document,
    /// First document-level match of this selector becomes the root
    Css(String),
    /// Use this node as the root
    Node(NodeId),
    /// Use the first node as the root
    Nodes(Vec<NodeId>),
}

impl From<()> for Context {
    fn from(_: ()) -> Self {
        Context::Document
    }
}

impl From<&str> for Context {
    fn from(s: &str) -> Self {
        Context::Css(s.to_string())
    }
}

impl From<String> for Context {
    fn from(s: String) -> Self {
        Context::Css(s)
    }
}

impl From<NodeId> for Context {
    fn from(id: NodeId) -> Self {
        Context::Node(id)
    }
}

impl From<Vec<NodeId>> for Context {
    fn from(ids: Vec<NodeId>) -> Self {
        Context::Nodes(ids)
    }
}

impl From<&[NodeId]> for Context {
    fn from(ids: &[NodeId]) -> Self {
        Context::Nodes(ids.to_vec())
    }
}

impl<T: Into<Context>> From<Option<T>> for Context {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => value.into(),
            None => Context::Document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_conversions() {
        assert_eq!(Selector::from("div"), Selector::Css("div".to_string()));
        assert_eq!(Selector::from(NodeId::ROOT), Selector::Node(NodeId::ROOT));
        assert_eq!(
            Selector::from(vec![NodeId::ROOT]),
            Selector::Nodes(vec![NodeId::ROOT])
        );
        assert_eq!(Selector::from(None::<&str>), Selector::None);
    }

    #[test]
    fn test_context_conversions() {
        assert_eq!(Context::from(()), Context::Document);
        assert_eq!(Context::from(".parent"), Context::Css(".parent".to_string()));
        assert_eq!(Context::from(None::<NodeId>), Context::Document);
    }
}
