//! Hash ring data structure.
//!
//! The ring is a sorted vector of vnode tokens plus a `token -> owner` map.
//! Both live in [`HashRing`] and are only mutated together, through
//! [`HashRing::add_node`] and [`HashRing::remove_node`].
//!
//! # Lookup
//!
//! A key is hashed with the ring's partitioner and the first token `>=` the
//! key's token is found by binary search. If the key's token is greater than
//! every vnode token the search wraps to the first token on the ring.
//!
//! # Mutation
//!
//! Adding a node appends its tokens and re-sorts; removing a node regenerates
//! its tokens and filters them out. Topology changes are expected to be rare
//! compared to lookups, so the sorted vector wins over a tree here.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, warn};

use crate::config::{RingConfig, DEFAULT_ALGORITHM, DEFAULT_VNODES};
use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::partitioner::{HashAlgorithm, Partitioner};
use crate::token::Token;
use crate::vnode::VirtualNode;

/// Consistent hash ring over string keys.
///
/// # Invariants
///
/// - `sorted` is ascending and holds exactly the keys of `owners`
/// - each present node owns `vnodes_per_node` tokens, minus any lost to
///   hash collisions with an earlier owner
/// - the partitioner and `vnodes_per_node` never change after construction
#[derive(Clone, Debug)]
pub struct HashRing {
    partitioner: Partitioner,
    vnodes_per_node: usize,
    owners: HashMap<Token, NodeId>,
    sorted: Vec<Token>,
    nodes: BTreeSet<NodeId>,
}

impl HashRing {
    /// Build a ring from a validated config.
    ///
    /// # Errors
    /// `InvalidConfig` for zero vnodes, no nodes, an empty node name or more
    /// than [`MAX_TOTAL_VNODES`](crate::config::MAX_TOTAL_VNODES) virtual nodes.
    pub fn new(config: RingConfig) -> Result<Self> {
        config.validate()?;
        let total = config.total_vnodes()?;

        let mut ring = Self {
            partitioner: Partitioner::new(config.algorithm),
            vnodes_per_node: config.vnodes,
            owners: HashMap::with_capacity(total),
            sorted: Vec::with_capacity(total),
            nodes: BTreeSet::new(),
        };
        for node in &config.nodes {
            ring.insert_node(node);
        }
        ring.sorted.sort_unstable();

        debug!(
            nodes = ring.nodes.len(),
            vnodes = ring.sorted.len(),
            algorithm = %config.algorithm,
            "built hash ring"
        );
        Ok(ring)
    }

    pub fn from_config(config: &RingConfig) -> Result<Self> {
        Self::new(config.clone())
    }

    /// Find the node responsible for `key`.
    ///
    /// # Errors
    /// `EmptyRing` if every node has been removed.
    pub fn lookup(&self, key: &str) -> Result<&NodeId> {
        self.locate(&self.partitioner.partition(key))
    }

    /// Find the owner of the first vnode at or after `token`, wrapping to the
    /// smallest vnode when `token` is past the end of the ring. A token equal
    /// to a vnode's token belongs to that vnode.
    pub fn locate(&self, token: &Token) -> Result<&NodeId> {
        let idx = self.sorted.partition_point(|t| t < token);
        self.sorted
            .get(idx)
            .or_else(|| self.sorted.first())
            .and_then(|t| self.owners.get(t))
            .ok_or(Error::EmptyRing)
    }

    /// Add a physical node with `vnodes_per_node` virtual nodes.
    ///
    /// Returns the number of vnodes actually inserted: 0 if the node is
    /// already present, fewer than `vnodes_per_node` if some tokens collided
    /// with another node's (the earlier owner keeps the token).
    ///
    /// # Errors
    /// `InvalidConfig` for an empty node name. The ring is untouched.
    pub fn add_node(&mut self, node: impl Into<NodeId>) -> Result<usize> {
        let node = node.into();
        validate_node(&node)?;

        if self.nodes.contains(&node) {
            warn!(node = %node, "node already on the ring, skipping add");
            return Ok(0);
        }

        let inserted = self.insert_node(&node);
        self.sorted.sort_unstable();

        debug!(node = %node, inserted, vnodes = self.sorted.len(), "added node");
        Ok(inserted)
    }

    /// Remove a physical node and all of its virtual nodes.
    ///
    /// Returns `false` (and changes nothing) if the node is not on the ring.
    pub fn remove_node(&mut self, node: &str) -> bool {
        let Some(node) = self.nodes.take(node) else {
            return false;
        };

        let mut removed = HashSet::with_capacity(self.vnodes_per_node);
        for vnode in VirtualNode::derive_all(&self.partitioner, &node, self.vnodes_per_node) {
            // A token lost to a collision belongs to someone else; leave it.
            if self.owners.get(&vnode.token) == Some(&node) {
                self.owners.remove(&vnode.token);
                removed.insert(vnode.token);
            }
        }
        self.sorted.retain(|token| !removed.contains(token));

        debug!(node = %node, removed = removed.len(), vnodes = self.sorted.len(), "removed node");
        true
    }

    /// Current physical nodes, sorted by name.
    pub fn nodes(&self) -> &BTreeSet<NodeId> {
        &self.nodes
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total virtual nodes on the ring.
    pub fn vnode_count(&self) -> usize {
        self.sorted.len()
    }

    /// Number of tokens currently owned by `node`.
    pub fn vnodes_of(&self, node: &str) -> usize {
        self.owners.values().filter(|owner| *owner == node).count()
    }

    pub fn vnodes_per_node(&self) -> usize {
        self.vnodes_per_node
    }

    /// True when there are no virtual nodes left to route to.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.partitioner.algorithm()
    }

    pub fn partitioner(&self) -> &Partitioner {
        &self.partitioner
    }

    /// All vnode tokens, ascending.
    pub fn tokens(&self) -> &[Token] {
        &self.sorted
    }

    pub fn owner_of(&self, token: &Token) -> Option<&NodeId> {
        self.owners.get(token)
    }

    /// True if removing `node` would leave no virtual nodes.
    pub(crate) fn is_sole_owner(&self, node: &str) -> bool {
        self.contains_node(node) && self.owners.values().all(|owner| owner == node)
    }

    /// Insert all vnodes of `node` without re-sorting.
    fn insert_node(&mut self, node: &NodeId) -> usize {
        let mut inserted = 0;
        for vnode in VirtualNode::derive_all(&self.partitioner, node, self.vnodes_per_node) {
            if self.insert_vnode(vnode) {
                inserted += 1;
            }
        }
        self.nodes.insert(node.clone());
        inserted
    }

    /// Insert one vnode unless its token is taken. First owner wins.
    fn insert_vnode(&mut self, vnode: VirtualNode) -> bool {
        match self.owners.entry(vnode.token) {
            Entry::Occupied(entry) => {
                if *entry.get() != vnode.owner {
                    warn!(
                        token = %entry.key(),
                        kept = %entry.get(),
                        dropped = %vnode.owner,
                        index = vnode.index,
                        "hash collision between virtual nodes"
                    );
                }
                false
            }
            Entry::Vacant(entry) => {
                self.sorted.push(entry.key().clone());
                entry.insert(vnode.owner);
                true
            }
        }
    }
}

pub(crate) fn validate_node(node: &NodeId) -> Result<()> {
    if node.is_empty() {
        return Err(Error::invalid_config("node names must not be empty"));
    }
    Ok(())
}

/// Builder for [`HashRing`].
#[derive(Debug, Clone)]
pub struct RingBuilder {
    config: RingConfig,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self {
            config: RingConfig {
                nodes: Vec::new(),
                vnodes: DEFAULT_VNODES,
                algorithm: DEFAULT_ALGORITHM,
            },
        }
    }

    /// Virtual nodes per physical node (default 135).
    pub fn with_vnodes(mut self, vnodes: usize) -> Self {
        self.config.vnodes = vnodes;
        self
    }

    /// Digest algorithm (default SHA-256).
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    pub fn add_node(mut self, node: impl Into<NodeId>) -> Self {
        self.config.nodes.push(node.into());
        self
    }

    pub fn add_nodes<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        self.config.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<HashRing> {
        HashRing::new(self.config)
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
