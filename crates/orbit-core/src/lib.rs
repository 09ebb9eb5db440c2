//! Core library for the consistent hash ring.
//!
//! This crate provides:
//! - Selectable digest algorithms and the tokens they produce
//! - Physical and virtual node abstractions
//! - The ring table: construction, lookup, add/remove node
//! - Distribution and key-movement analytics
//! - A lock-guarded handle for sharing one ring across threads
//!
//! # Example
//!
//! ```rust
//! use orbit_core::RingBuilder;
//!
//! let mut ring = RingBuilder::new()
//!     .with_vnodes(100)
//!     .add_nodes(["shard1", "shard2", "shard3"])
//!     .build()?;
//!
//! let owner = ring.lookup("user42")?.clone();
//! assert!(ring.contains_node(owner.as_str()));
//!
//! let keys: Vec<String> = (0..1_000).map(|i| format!("user{}", i)).collect();
//! let report = ring.track_movement_on_add("shard4", &keys)?;
//! assert!(report.moved_count() < keys.len());
//! # Ok::<(), orbit_core::Error>(())
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod vnode;

pub use analytics::{Distribution, KeyMove, MovementReport, NodeShare};
pub use config::{RingConfig, DEFAULT_ALGORITHM, DEFAULT_VNODES, MAX_TOTAL_VNODES};
pub use error::{Error, Result};
pub use node::NodeId;
pub use partitioner::{HashAlgorithm, Partitioner};
pub use ring::{HashRing, RingBuilder, SharedRing};
pub use token::Token;
pub use vnode::VirtualNode;
