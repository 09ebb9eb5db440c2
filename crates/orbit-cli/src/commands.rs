//! Subcommands and their results.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::Result;
use clap::{Args, Subcommand};
use orbit_core::{Distribution, HashRing, MovementReport, NodeId};
use serde::Serialize;

const DISTRIBUTION_KEYS: usize = 100_000;
const MOVEMENT_KEYS: usize = 500_000;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the node owning each key.
    Lookup {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// List physical nodes and their virtual node counts.
    Nodes,
    /// Show how generated keys spread across nodes.
    Distribution(KeySample),
    /// Show which keys move when a node joins or leaves.
    Movement {
        #[command(subcommand)]
        change: Change,
    },
}

#[derive(Subcommand, Debug)]
pub enum Change {
    /// Add a node.
    Add {
        node: String,
        #[command(flatten)]
        sample: KeySample,
    },
    /// Remove a node.
    Remove {
        node: String,
        #[command(flatten)]
        sample: KeySample,
    },
}

/// Generated keys `<prefix>0 .. <prefix>N-1`.
#[derive(Args, Debug, Clone)]
pub struct KeySample {
    /// Number of keys [default: 100000 for distribution, 500000 for movement].
    #[arg(long)]
    pub keys: Option<usize>,

    /// Key prefix.
    #[arg(long, default_value = "user")]
    pub prefix: String,
}

impl KeySample {
    fn generate(&self, default_count: usize) -> Vec<String> {
        generate_keys(&self.prefix, self.keys.unwrap_or(default_count))
    }
}

pub fn generate_keys(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}{}", prefix, i)).collect()
}

/// Output of a command, printable as text or JSON.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandResult {
    Lookup(Vec<KeyOwner>),
    Nodes(Vec<NodeSummary>),
    Distribution(Distribution),
    Movement(MovementSummary),
}

#[derive(Debug, Serialize)]
pub struct KeyOwner {
    pub key: String,
    pub node: NodeId,
}

#[derive(Debug, Serialize)]
pub struct NodeSummary {
    pub node: NodeId,
    pub vnodes: usize,
}

/// Movement report condensed to per-node flows.
#[derive(Debug, Serialize)]
pub struct MovementSummary {
    pub change: &'static str,
    pub node: String,
    pub total_keys: usize,
    pub moved_count: usize,
    pub moved_percent: f64,
    /// Keys moved from (on add) or to (on remove) each other node.
    pub flows: BTreeMap<NodeId, usize>,
}

impl MovementSummary {
    fn from_report(change: &'static str, node: String, report: &MovementReport) -> Self {
        let mut flows = BTreeMap::new();
        for key in report.moved_keys() {
            if let Some(m) = report.get(key) {
                let peer = if change == "add" { &m.from } else { &m.to };
                *flows.entry(peer.clone()).or_insert(0) += 1;
            }
        }
        Self {
            change,
            node,
            total_keys: report.total_keys(),
            moved_count: report.moved_count(),
            moved_percent: report.moved_percent(),
            flows,
        }
    }
}

impl Command {
    pub fn execute(&self, ring: &mut HashRing) -> Result<CommandResult> {
        match self {
            Command::Lookup { keys } => {
                let owners = keys
                    .iter()
                    .map(|key| -> Result<KeyOwner> {
                        Ok(KeyOwner {
                            key: key.clone(),
                            node: ring.lookup(key)?.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(CommandResult::Lookup(owners))
            }
            Command::Nodes => {
                let nodes = ring
                    .nodes()
                    .iter()
                    .map(|node| NodeSummary {
                        node: node.clone(),
                        vnodes: ring.vnodes_of(node.as_str()),
                    })
                    .collect();
                Ok(CommandResult::Nodes(nodes))
            }
            Command::Distribution(sample) => {
                let keys = sample.generate(DISTRIBUTION_KEYS);
                Ok(CommandResult::Distribution(ring.distribution(&keys)?))
            }
            Command::Movement { change } => {
                let summary = match change {
                    Change::Add { node, sample } => {
                        let keys = sample.generate(MOVEMENT_KEYS);
                        let report = ring.track_movement_on_add(node.as_str(), &keys)?;
                        MovementSummary::from_report("add", node.clone(), &report)
                    }
                    Change::Remove { node, sample } => {
                        let keys = sample.generate(MOVEMENT_KEYS);
                        let report = ring.track_movement_on_remove(node, &keys)?;
                        MovementSummary::from_report("remove", node.clone(), &report)
                    }
                };
                Ok(CommandResult::Movement(summary))
            }
        }
    }
}

impl CommandResult {
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string_pretty(self)?);
        }

        let mut out = String::new();
        match self {
            CommandResult::Lookup(owners) => {
                for owner in owners {
                    writeln!(out, "{} -> {}", owner.key, owner.node)?;
                }
            }
            CommandResult::Nodes(nodes) => {
                for node in nodes {
                    writeln!(out, "{} ({} vnodes)", node.node, node.vnodes)?;
                }
            }
            CommandResult::Distribution(dist) => {
                writeln!(
                    out,
                    "Shard Distribution (based on {} keys):\n",
                    dist.total_keys()
                )?;
                write!(out, "{}", dist)?;
            }
            CommandResult::Movement(summary) => {
                writeln!(
                    out,
                    "{} {}: {} of {} keys moved ({:.2}%)",
                    summary.change,
                    summary.node,
                    summary.moved_count,
                    summary.total_keys,
                    summary.moved_percent
                )?;
                let arrow = if summary.change == "add" { "<-" } else { "->" };
                for (peer, count) in &summary.flows {
                    writeln!(out, "  {} {} {}: {} keys", summary.node, arrow, peer, count)?;
                }
            }
        }
        Ok(out.trim_end().to_owned())
    }
}
