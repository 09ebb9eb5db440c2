//! Ring tokens.
//!
//! A token is the printable digest of a key or a virtual node label. All
//! tokens produced by one algorithm have the same width, so ordering the hex
//! strings gives the same order as comparing the raw digest bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position on the ring: a fixed-width lowercase hex digest.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Hex-encodes a raw digest.
    pub fn from_digest(bytes: impl AsRef<[u8]>) -> Self {
        Token(hex::encode(bytes))
    }

    /// The hex representation.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Width in hex characters (twice the digest width in bytes).
    #[inline]
    pub fn width(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
