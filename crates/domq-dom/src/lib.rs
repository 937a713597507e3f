//! domq DOM - Document Object Model
//!
//! Arena-based DOM tree. Nodes are addressed by `NodeId` (an index into the
//! arena) instead of pointers, which keeps the tree compact and makes node
//! collections plain `Vec<NodeId>` values.

mod document;
mod node;
mod tree;

pub use document::Document;
pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into the arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Check whether this ID refers to a real node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    #[error("hierarchy request error: {0}")]
    HierarchyRequest(&'static str),
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;
