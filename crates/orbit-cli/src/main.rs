//! CLI entry point for orbit.

use clap::Parser;
use orbit_cli::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    config.run()
}
