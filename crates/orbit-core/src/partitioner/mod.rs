//! Partitioner abstraction for consistent hashing.
//!
//! A partitioner converts keys into tokens that can be placed on the hash
//! ring. The algorithm is chosen once; the partitioner then holds a plain
//! function pointer to the matching digest.

pub mod algorithm;
pub mod digest;

pub use algorithm::HashAlgorithm;
pub use digest::DigestFn;

use crate::token::Token;
use std::fmt;

/// Converts keys into ring tokens with a fixed algorithm.
///
/// Stateless and `Copy`, so it can be shared across threads freely.
#[derive(Clone, Copy)]
pub struct Partitioner {
    algorithm: HashAlgorithm,
    digest: DigestFn,
}

impl Partitioner {
    /// Binds the digest function for `algorithm`.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let digest: DigestFn = match algorithm {
            HashAlgorithm::Xxh3_64 => digest::xxh3_64_digest,
            HashAlgorithm::Xxh3_128 => digest::xxh3_128_digest,
            HashAlgorithm::Sha256 => digest::sha256_digest,
            HashAlgorithm::Sha512 => digest::sha512_digest,
        };
        Self { algorithm, digest }
    }

    /// Converts a key into a token.
    #[inline]
    pub fn partition(&self, key: &str) -> Token {
        (self.digest)(key.as_bytes())
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns the name of the underlying algorithm.
    pub fn name(&self) -> &'static str {
        self.algorithm.name()
    }
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl fmt::Debug for Partitioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partitioner")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
