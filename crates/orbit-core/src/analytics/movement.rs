//! Key movement across a topology change.
//!
//! The trackers snapshot every key's owner, apply the change, and diff.
//! The change is kept: clone the ring first for a dry run.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::info;

use super::{ensure_keys, percent};
use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::ring::ring::validate_node;
use crate::ring::HashRing;

/// Owner of a key before and after a topology change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyMove {
    pub from: NodeId,
    pub to: NodeId,
}

/// Which keys changed owner.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovementReport {
    total_keys: usize,
    moves: BTreeMap<String, KeyMove>,
    moved_keys: Vec<String>,
    moved_count: usize,
    moved_percent: f64,
}

impl MovementReport {
    /// Size of the key sample.
    pub fn total_keys(&self) -> usize {
        self.total_keys
    }

    /// Moved keys in input order, one entry per moved input element.
    pub fn moved_keys(&self) -> &[String] {
        &self.moved_keys
    }

    pub fn moved_count(&self) -> usize {
        self.moved_count
    }

    /// `moved_count / total_keys * 100`, rounded to two decimals.
    pub fn moved_percent(&self) -> f64 {
        self.moved_percent
    }

    /// Old and new owner of each distinct moved key.
    pub fn moves(&self) -> &BTreeMap<String, KeyMove> {
        &self.moves
    }

    pub fn get(&self, key: &str) -> Option<&KeyMove> {
        self.moves.get(key)
    }
}

impl fmt::Display for MovementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} keys moved ({:.2}%)",
            self.moved_count,
            self.total_keys,
            self.moved_percent
        )
    }
}

impl HashRing {
    /// Add `node` and report which keys it took over.
    ///
    /// # Errors
    /// `NoKeys`, `InvalidConfig` (empty node name) or `EmptyRing` (no owner
    /// to compare against). The ring is only mutated on success.
    pub fn track_movement_on_add<K: AsRef<str>>(
        &mut self,
        node: impl Into<NodeId>,
        keys: &[K],
    ) -> Result<MovementReport> {
        let node = node.into();
        ensure_keys(keys)?;
        validate_node(&node)?;

        let before = self.owners_of(keys)?;
        self.add_node(node.clone())?;
        let report = self.diff(keys, before)?;

        info!(node = %node, moved = report.moved_count(), percent = report.moved_percent, "tracked add");
        Ok(report)
    }

    /// Remove `node` and report where its keys went.
    ///
    /// # Errors
    /// `NoKeys`, or `EmptyRing` if the ring is empty or `node` is the last
    /// owner left (no key would have a new owner). The ring is only mutated
    /// on success.
    pub fn track_movement_on_remove<K: AsRef<str>>(
        &mut self,
        node: &str,
        keys: &[K],
    ) -> Result<MovementReport> {
        ensure_keys(keys)?;
        if self.is_sole_owner(node) {
            return Err(Error::EmptyRing);
        }

        let before = self.owners_of(keys)?;
        self.remove_node(node);
        let report = self.diff(keys, before)?;

        info!(node = %node, moved = report.moved_count(), percent = report.moved_percent, "tracked remove");
        Ok(report)
    }

    fn owners_of<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<NodeId>> {
        keys.iter()
            .map(|key| self.lookup(key.as_ref()).cloned())
            .collect()
    }

    fn diff<K: AsRef<str>>(&self, keys: &[K], before: Vec<NodeId>) -> Result<MovementReport> {
        let mut moves = BTreeMap::new();
        let mut moved_keys = Vec::new();

        for (key, from) in keys.iter().map(|k| k.as_ref()).zip(before) {
            let to = self.lookup(key)?;
            if *to != from {
                moved_keys.push(key.to_owned());
                moves.insert(
                    key.to_owned(),
                    KeyMove {
                        from,
                        to: to.clone(),
                    },
                );
            }
        }

        Ok(MovementReport {
            total_keys: keys.len(),
            moved_count: moved_keys.len(),
            moved_percent: percent(moved_keys.len(), keys.len()),
            moves,
            moved_keys,
        })
    }
}
