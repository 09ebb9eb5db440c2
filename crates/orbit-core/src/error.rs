//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Every variant is a caller precondition violation. None of them are
/// transient and none leave the ring partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Bad construction parameters, node names or algorithm names.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// Lookup against a ring with zero virtual nodes.
    #[error("Ring is empty: no virtual nodes to route to")]
    EmptyRing,
    /// Analytics called with an empty key set.
    #[error("No keys supplied")]
    NoKeys,
}

impl Error {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}
