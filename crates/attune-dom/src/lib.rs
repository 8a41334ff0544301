//! Attune DOM
//!
//! The narrow host-document capability the Attune widget core runs against.
//! Zero external dependencies: embedders adapt their real document behind
//! the [`HostDocument`] trait, and tests use the in-memory implementation.

mod document;
mod node;
mod tree;

pub use document::{HostDocument, MemoryDocument, ScrollBehavior, ScrollRequest, SharedDocument};
pub use node::{Element, TabIndex};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }
}
