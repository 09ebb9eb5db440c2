//! Digest functions backing each [`HashAlgorithm`](super::HashAlgorithm).
//!
//! XXH3 outputs are rendered big-endian so that the hex token orders the same
//! way as the integer.

use crate::token::Token;
use sha2::{Digest, Sha256, Sha512};
use xxhash_rust::xxh3::{xxh3_128, xxh3_64};

/// Signature shared by every digest function.
pub type DigestFn = fn(&[u8]) -> Token;

pub fn xxh3_64_digest(data: &[u8]) -> Token {
    Token::from_digest(xxh3_64(data).to_be_bytes())
}

pub fn xxh3_128_digest(data: &[u8]) -> Token {
    Token::from_digest(xxh3_128(data).to_be_bytes())
}

pub fn sha256_digest(data: &[u8]) -> Token {
    Token::from_digest(Sha256::digest(data))
}

pub fn sha512_digest(data: &[u8]) -> Token {
    Token::from_digest(Sha512::digest(data))
}
