//! Host Document Capability
//!
//! The narrow set of document operations the widget core actually uses.
//! Substituting the in-memory implementation keeps the core testable
//! without a real browser.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{DomTree, Element, NodeId};

/// Shared single-threaded handle to a host document.
pub type SharedDocument = Rc<RefCell<dyn HostDocument>>;

/// How a scroll request should animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// A recorded scroll-into-center-view request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub node: NodeId,
    pub behavior: ScrollBehavior,
}

/// Document operations the widget core depends on.
pub trait HostDocument {
    /// Document root element (attribute side-channel target).
    fn root(&self) -> NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    fn focus(&mut self, node: NodeId);
    fn active_element(&self) -> Option<NodeId>;

    /// Request that `node` be scrolled into center view.
    fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior);

    /// Focusable descendants of `scope`, in document order.
    fn query_focusable(&self, scope: NodeId) -> Vec<NodeId>;

    /// Nearest ancestor-or-self of `node` that can act as a trigger
    /// (a button, or an element carrying `tabindex`).
    fn closest_activator(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` is `scope` or lives inside it.
    fn contains(&self, scope: NodeId, node: NodeId) -> bool;
}

/// In-memory host document.
///
/// Tracks the active (focused) element and the last scroll request so
/// headless embeddings and tests can observe focus and scroll behavior.
pub struct MemoryDocument {
    tree: DomTree,
    active: Option<NodeId>,
    last_scroll: Option<ScrollRequest>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self { tree: DomTree::new(), active: None, last_scroll: None }
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create an element and attach it under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.tree.create_element(tag);
        self.tree.append_child(parent, id);
        id
    }

    /// Create an element with an `id` attribute and attach it.
    pub fn append_with_id(&mut self, parent: NodeId, tag: &str, id_attr: &str) -> NodeId {
        let id = self.append_element(parent, tag);
        if let Some(element) = self.tree.element_mut(id) {
            element.set_attr("id", id_attr);
        }
        id
    }

    pub fn last_scroll(&self) -> Option<ScrollRequest> {
        self.last_scroll
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HostDocument for MemoryDocument {
    fn root(&self) -> NodeId {
        self.tree.root()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.find_by_id(id)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree.element(node)?.attr(name).map(String::from)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.tree.element_mut(node) {
            element.set_attr(name, value);
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.tree.element_mut(node) {
            element.remove_attr(name);
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.tree.element(node).is_some() {
            self.active = Some(node);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior) {
        if self.tree.element(node).is_some() {
            self.last_scroll = Some(ScrollRequest { node, behavior });
        }
    }

    fn query_focusable(&self, scope: NodeId) -> Vec<NodeId> {
        self.tree
            .descendants(scope)
            .into_iter()
            .filter(|id| self.tree.element(*id).is_some_and(Element::is_focusable))
            .collect()
    }

    fn closest_activator(&self, node: NodeId) -> Option<NodeId> {
        self.tree.closest(node, Element::is_activator)
    }

    fn contains(&self, scope: NodeId, node: NodeId) -> bool {
        self.tree.contains(scope, node)
    }
}
