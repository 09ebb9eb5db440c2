//! Command-line configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser};
use orbit_core::{HashAlgorithm, HashRing, RingConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

/// Inspect a consistent hash ring: lookups, key distribution, key movement.
#[derive(Parser, Debug)]
#[command(name = "orbit", version, about)]
pub struct CliConfig {
    #[command(flatten)]
    pub ring: RingArgs,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// How to build the ring.
#[derive(Args, Debug, Clone)]
pub struct RingArgs {
    /// JSON ring config (`{"nodes": [...], "vnodes": N, "algorithm": "..."}`).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comma-separated node names. Takes precedence over --node-count.
    #[arg(long, value_delimiter = ',', value_name = "NODES")]
    pub nodes: Vec<String>,

    /// Number of generated nodes named shard1..shardN.
    #[arg(long, default_value_t = 10)]
    pub node_count: usize,

    /// Virtual nodes per physical node [default: 135].
    #[arg(long)]
    pub vnodes: Option<usize>,

    /// Digest algorithm: xxh3-64, xxh3-128, sha256 or sha512 [default: sha256].
    #[arg(long)]
    pub algorithm: Option<HashAlgorithm>,
}

impl RingArgs {
    /// Combine the config file (if any) with command-line overrides.
    pub fn resolve(&self) -> Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading ring config {}", path.display()))?;
                debug!(path = %path.display(), "loaded ring config");
                RingConfig::from_json_str(&raw)
                    .with_context(|| format!("parsing ring config {}", path.display()))?
            }
            None if !self.nodes.is_empty() => RingConfig::new(self.nodes.iter().cloned()),
            None => RingConfig::new((1..=self.node_count).map(|i| format!("shard{}", i))),
        };

        if let Some(vnodes) = self.vnodes {
            config.vnodes = vnodes;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }

        config.validate().context("invalid ring configuration")?;
        Ok(config)
    }
}

impl CliConfig {
    /// Build the ring, run the subcommand and print its result.
    pub fn run(self) -> Result<()> {
        init_logging(self.verbose);

        let config = self.ring.resolve()?;
        info!(
            nodes = config.nodes.len(),
            vnodes = config.vnodes,
            algorithm = %config.algorithm,
            "building ring"
        );
        let mut ring = HashRing::new(config)?;

        let result = self.command.execute(&mut ring)?;
        println!("{}", result.render(self.json)?);
        Ok(())
    }
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` overrides `-v`.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(err) = installed {
        debug!(%err, "keeping the existing global subscriber");
    }
}
