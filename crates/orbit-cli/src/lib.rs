//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Looking up key owners
//! - Listing nodes
//! - Key distribution across nodes
//! - Key movement when adding/removing nodes

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
