//! DOM Tree (arena-based allocation)
//!
//! All structural mutation goes through the tree so sibling/parent links stay
//! consistent. `append_child` reparents: a node already attached elsewhere is
//! detached from its old position first, which is what makes "move child" a
//! single call.

use crate::{DomError, DomResult, Node, NodeData, NodeId, TextData};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree containing only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeData::Document)],
        }
    }

    /// The document root
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (only the root)
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::detached(NodeData::Element(
            crate::ElementData::new(tag),
        )))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::detached(NodeData::Text(TextData {
            content: content.to_string(),
        })))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::detached(NodeData::Comment(content.to_string())))
    }

    /// Create a detached fragment container
    pub fn create_fragment(&mut self) -> NodeId {
        self.push(Node::detached(NodeData::Fragment))
    }

    /// Create a detached node from prebuilt data
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        self.push(Node::detached(data))
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if parent == child {
            return Err(DomError::HierarchyRequest("cannot append node to itself"));
        }
        if self.get(parent).is_none() {
            return Err(DomError::NotFound(parent));
        }
        if self.get(child).is_none() {
            return Err(DomError::NotFound(child));
        }
        // Appending under a descendant would create a parent-link cycle.
        let mut ancestor = self.nodes[parent.index()].parent;
        while ancestor.is_valid() {
            if ancestor == child {
                return Err(DomError::HierarchyRequest(
                    "cannot append node under its own descendant",
                ));
            }
            ancestor = self.nodes[ancestor.index()].parent;
        }

        self.detach(child)?;

        let old_last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = old_last;
        }
        if old_last.is_valid() {
            self.nodes[old_last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(())
    }

    /// Detach a node from its parent; no-op for already-detached nodes
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let node = self.get(id).ok_or(DomError::NotFound(id))?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(())
    }

    /// First child of a node, if any
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        let first = self.get(id)?.first_child;
        first.is_valid().then_some(first)
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        parent.is_valid().then_some(parent)
    }

    /// Previous sibling, if any
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let prev = self.get(id)?.prev_sibling;
        prev.is_valid().then_some(prev)
    }

    /// Child IDs in order
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(id, _)| id).collect()
    }

    /// Iterate direct children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Iterate all descendants of `root` (excluding `root`) in pre-order,
    /// i.e. document order
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get(root) {
            let mut child = node.last_child;
            while child.is_valid() {
                stack.push(child);
                child = self.nodes[child.index()].prev_sibling;
            }
        }
        Descendants { tree: self, stack }
    }

    /// Concatenated text of a node's descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(|n| n.as_text()) {
            out.push_str(text);
        }
        for (_, node) in self.descendants(id).with_nodes() {
            if let Some(text) = node.as_text() {
                out.push_str(text);
            }
        }
        out
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    /// Yield `(NodeId, &Node)` pairs instead of bare IDs
    pub fn with_nodes(self) -> impl Iterator<Item = (NodeId, &'a Node)> {
        let tree = self.tree;
        self.filter_map(move |id| tree.get(id).map(|n| (id, n)))
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.get(id)?;
        let mut child = node.last_child;
        while child.is_valid() {
            self.stack.push(child);
            child = self.tree.get(child)?.prev_sibling;
        }
        Some(id)
    }
}
