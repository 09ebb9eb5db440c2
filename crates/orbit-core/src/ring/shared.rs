//! Thread-safe handle over a [`HashRing`].
//!
//! Reads (lookup, distribution) share a read lock. Mutations, including the
//! movement trackers, hold the write lock for their whole
//! snapshot-mutate-recompute sequence so no reader sees a half-applied change.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::analytics::{Distribution, MovementReport};
use crate::config::RingConfig;
use crate::error::Result;
use crate::node::NodeId;
use crate::ring::HashRing;

/// Cloneable, shareable ring handle.
#[derive(Clone, Debug)]
pub struct SharedRing {
    inner: Arc<RwLock<HashRing>>,
}

impl SharedRing {
    pub fn new(config: RingConfig) -> Result<Self> {
        Ok(Self::from_ring(HashRing::new(config)?))
    }

    pub fn from_ring(ring: HashRing) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ring)),
        }
    }

    pub fn lookup(&self, key: &str) -> Result<NodeId> {
        self.inner.read().lookup(key).cloned()
    }

    pub fn distribution<K: AsRef<str>>(&self, keys: &[K]) -> Result<Distribution> {
        self.inner.read().distribution(keys)
    }

    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.inner.read().nodes().clone()
    }

    pub fn vnode_count(&self) -> usize {
        self.inner.read().vnode_count()
    }

    pub fn add_node(&self, node: impl Into<NodeId>) -> Result<usize> {
        self.inner.write().add_node(node)
    }

    pub fn remove_node(&self, node: &str) -> bool {
        self.inner.write().remove_node(node)
    }

    pub fn track_movement_on_add<K: AsRef<str>>(
        &self,
        node: impl Into<NodeId>,
        keys: &[K],
    ) -> Result<MovementReport> {
        self.inner.write().track_movement_on_add(node, keys)
    }

    pub fn track_movement_on_remove<K: AsRef<str>>(
        &self,
        node: &str,
        keys: &[K],
    ) -> Result<MovementReport> {
        self.inner.write().track_movement_on_remove(node, keys)
    }

    /// Copy of the current ring, e.g. to dry-run a topology change.
    pub fn snapshot(&self) -> HashRing {
        self.inner.read().clone()
    }

    /// Replace the ring wholesale with a previous snapshot.
    pub fn restore(&self, ring: HashRing) {
        *self.inner.write() = ring;
    }
}
