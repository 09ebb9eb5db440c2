//! Ring construction parameters.

use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::partitioner::HashAlgorithm;
use serde::{Deserialize, Serialize};

/// Default number of virtual nodes per physical node.
pub const DEFAULT_VNODES: usize = 135;

/// Default digest algorithm.
pub const DEFAULT_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

/// Upper bound on `nodes.len() * vnodes` for a single ring.
pub const MAX_TOTAL_VNODES: usize = 1 << 24;

/// Immutable construction parameters for a [`HashRing`](crate::HashRing).
///
/// Deserializes from JSON such as
/// `{"nodes": ["shard1", "shard2"], "vnodes": 100, "algorithm": "xxh3-64"}`;
/// `vnodes` and `algorithm` are optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingConfig {
    pub nodes: Vec<NodeId>,
    #[serde(default = "default_vnodes")]
    pub vnodes: usize,
    #[serde(default)]
    pub algorithm: HashAlgorithm,
}

fn default_vnodes() -> usize {
    DEFAULT_VNODES
}

impl RingConfig {
    pub fn new<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        Self {
            nodes: nodes.into_iter().map(Into::into).collect(),
            vnodes: DEFAULT_VNODES,
            algorithm: DEFAULT_ALGORITHM,
        }
    }

    pub fn with_vnodes(mut self, vnodes: usize) -> Self {
        self.vnodes = vnodes;
        self
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Checks every construction precondition.
    pub fn validate(&self) -> Result<()> {
        if self.vnodes == 0 {
            return Err(Error::invalid_config("vnodes must be > 0"));
        }
        if self.nodes.is_empty() {
            return Err(Error::invalid_config("at least one node is required"));
        }
        if self.nodes.iter().any(NodeId::is_empty) {
            return Err(Error::invalid_config("node names must not be empty"));
        }
        self.total_vnodes()?;
        Ok(())
    }

    /// Virtual nodes the ring will hold, at most [`MAX_TOTAL_VNODES`].
    pub fn total_vnodes(&self) -> Result<usize> {
        self.nodes
            .len()
            .checked_mul(self.vnodes)
            .filter(|total| *total <= MAX_TOTAL_VNODES)
            .ok_or_else(|| {
                Error::invalid_config(format!(
                    "{} nodes x {} vnodes exceeds the limit of {} virtual nodes",
                    self.nodes.len(),
                    self.vnodes,
                    MAX_TOTAL_VNODES
                ))
            })
    }

    /// Parses and validates a JSON ring description.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RingConfig = serde_json::from_str(json)
            .map_err(|e| Error::invalid_config(format!("malformed ring config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
