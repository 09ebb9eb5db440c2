//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each physical node having a single token on the ring, each node
//! owns several tokens (virtual nodes). This gives:
//!
//! 1. **Better Load Distribution**: more tokens, smoother distribution of keys
//! 2. **Gradual Rebalancing**: when nodes join or leave, only about `1/N` of
//!    the keys move
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(v) per physical node, v = vnodes per node
//! - **Lookup**: O(log V), V = total vnodes on the ring
//! - **Mutation**: O(V log V) because of the re-sort
//!
//! The label of vnode `i` of node `n` is `"n#i"`; its token is the digest of
//! that label. Regenerating the labels is how removal finds a node's tokens.

use crate::node::NodeId;
use crate::partitioner::Partitioner;
use crate::token::Token;
use std::fmt;

/// A virtual node on the hash ring.
///
/// # Invariants
///
/// - The token is `partitioner.partition(label)` for the ring's partitioner
/// - Every `VirtualNode` belongs to exactly one physical node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualNode {
    /// Token position on the ring.
    pub token: Token,
    /// The physical node that owns this virtual node.
    pub owner: NodeId,
    /// Index in `[0, vnodes_per_node)`.
    pub index: usize,
}

impl VirtualNode {
    /// Derive vnode `index` of `owner` by hashing `"owner#index"`.
    pub fn derive(partitioner: &Partitioner, owner: &NodeId, index: usize) -> Self {
        let token = partitioner.partition(&Self::label_for(owner, index));
        Self {
            token,
            owner: owner.clone(),
            index,
        }
    }

    /// Derive all `count` vnodes of `owner`, in index order.
    pub fn derive_all(partitioner: &Partitioner, owner: &NodeId, count: usize) -> Vec<Self> {
        (0..count)
            .map(|index| Self::derive(partitioner, owner, index))
            .collect()
    }

    /// The string that was hashed to produce this vnode's token.
    pub fn label(&self) -> String {
        Self::label_for(&self.owner, self.index)
    }

    fn label_for(owner: &NodeId, index: usize) -> String {
        format!("{}#{}", owner, index)
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(token={}, node={}#{})", self.token, self.owner, self.index)
    }
}
