//! Selectable digest algorithms.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Digest algorithm used to place keys and virtual nodes on the ring.
///
/// Variants are listed in order of increasing digest width. Wider digests
/// make collisions less likely at a higher per-call cost.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// 64-bit XXH3.
    #[serde(rename = "xxh3-64", alias = "xxh3")]
    Xxh3_64,
    /// 128-bit XXH3.
    #[serde(rename = "xxh3-128")]
    Xxh3_128,
    /// 256-bit SHA-2.
    #[default]
    #[serde(rename = "sha256")]
    Sha256,
    /// 512-bit SHA-2.
    #[serde(rename = "sha512")]
    Sha512,
}

impl HashAlgorithm {
    /// All supported algorithms, narrowest first.
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Xxh3_64,
        HashAlgorithm::Xxh3_128,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
    ];

    /// Digest width in bits.
    pub fn digest_bits(self) -> usize {
        match self {
            HashAlgorithm::Xxh3_64 => 64,
            HashAlgorithm::Xxh3_128 => 128,
            HashAlgorithm::Sha256 => 256,
            HashAlgorithm::Sha512 => 512,
        }
    }

    /// Canonical name, as accepted by `FromStr` and serde.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Xxh3_64 => "xxh3-64",
            HashAlgorithm::Xxh3_128 => "xxh3-128",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xxh3" | "xxh3-64" => Ok(HashAlgorithm::Xxh3_64),
            "xxh3-128" => Ok(HashAlgorithm::Xxh3_128),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(Error::invalid_config(format!(
                "unknown hash algorithm '{}' (expected one of xxh3-64, xxh3-128, sha256, sha512)",
                other
            ))),
        }
    }
}
