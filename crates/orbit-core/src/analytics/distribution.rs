//! Key distribution across physical nodes.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::{ensure_keys, percent};
use crate::error::Result;
use crate::node::NodeId;
use crate::ring::HashRing;

/// Keys routed to one node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NodeShare {
    pub count: usize,
    /// Share of all sampled keys, in percent, rounded to two decimals.
    pub percent: f64,
}

/// How a key sample spreads over the ring's nodes.
///
/// Only nodes that received at least one key appear in the report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Distribution {
    total_keys: usize,
    node_count: usize,
    shares: BTreeMap<NodeId, NodeShare>,
}

impl Distribution {
    pub fn total_keys(&self) -> usize {
        self.total_keys
    }

    /// Nodes on the ring when the sample was taken.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn share(&self, node: &str) -> Option<&NodeShare> {
        self.shares.get(node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &NodeShare)> {
        self.shares.iter()
    }

    /// Number of nodes that received keys.
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Sum of the rounded percentages; 100 within rounding error.
    pub fn percent_total(&self) -> f64 {
        self.shares.values().map(|s| s.percent).sum()
    }

    /// Key count a node would get under a perfectly even spread.
    pub fn ideal_count(&self) -> f64 {
        self.total_keys as f64 / self.node_count as f64
    }

    /// Largest relative distance of any node's count from the ideal count.
    ///
    /// A node on the ring that received no keys counts as a deviation of 1.
    pub fn max_deviation(&self) -> f64 {
        let ideal = self.ideal_count();
        let worst = self
            .shares
            .values()
            .map(|s| (s.count as f64 - ideal).abs() / ideal)
            .fold(0.0, f64::max);
        if self.shares.len() < self.node_count {
            worst.max(1.0)
        } else {
            worst
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, share) in &self.shares {
            writeln!(f, "{}: {} keys ({:.2}%)", node, share.count, share.percent)?;
        }
        Ok(())
    }
}

impl HashRing {
    /// Route every key and tally the owners.
    ///
    /// # Errors
    /// - `NoKeys` for an empty sample (percentages would divide by zero)
    /// - `EmptyRing` if the ring has no nodes
    pub fn distribution<K: AsRef<str>>(&self, keys: &[K]) -> Result<Distribution> {
        ensure_keys(keys)?;

        let mut counts: BTreeMap<&NodeId, usize> = BTreeMap::new();
        for key in keys {
            *counts.entry(self.lookup(key.as_ref())?).or_insert(0) += 1;
        }

        let total = keys.len();
        let shares = counts
            .into_iter()
            .map(|(node, count)| {
                let share = NodeShare {
                    count,
                    percent: percent(count, total),
                };
                (node.clone(), share)
            })
            .collect();

        debug!(keys = total, nodes = self.node_count(), "computed key distribution");
        Ok(Distribution {
            total_keys: total,
            node_count: self.node_count(),
            shares,
        })
    }
}
