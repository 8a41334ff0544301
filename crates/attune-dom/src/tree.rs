//! Element Tree (arena-based allocation)

use crate::{Element, NodeId};

struct TreeNode {
    element: Element,
    parent: NodeId,
    children: Vec<NodeId>,
}

/// Arena-backed element tree with a fixed root.
pub struct DomTree {
    nodes: Vec<TreeNode>,
}

impl DomTree {
    /// Create a tree holding only the document root element.
    pub fn new() -> Self {
        let root = TreeNode {
            element: Element::new("html"),
            parent: NodeId::NONE,
            children: Vec::new(),
        };
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Allocate a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode {
            element: Element::new(tag),
            parent: NodeId::NONE,
            children: Vec::new(),
        });
        id
    }

    /// Attach `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        self.nodes[child.0 as usize].parent = parent;
        self.nodes[parent.0 as usize].children.push(child);
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).map(|n| &n.element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize).map(|n| &mut n.element)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).map(|n| n.parent).filter(NodeId::is_valid)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Pre-order traversal of the subtree below `scope` (document order).
    /// The scope element itself is not included.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            for child in self.children(id).iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Whether `node` is `scope` or one of its descendants.
    pub fn contains(&self, scope: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == scope {
                return true;
            }
            current = self.parent(current).unwrap_or(NodeId::NONE);
        }
        false
    }

    /// Nearest ancestor-or-self satisfying `predicate`.
    pub fn closest(&self, node: NodeId, predicate: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut current = node;
        while let Some(element) = self.element(current) {
            if predicate(element) {
                return Some(current);
            }
            current = self.parent(current)?;
        }
        None
    }

    /// First element (in allocation order) whose `id` attribute matches.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.element.attr("id") == Some(id))
            .map(|idx| NodeId(idx as u32))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
