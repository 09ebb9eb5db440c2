//! Ring analytics: key distribution and key movement across topology changes.
//!
//! Both reports are built purely from [`HashRing::lookup`](crate::HashRing::lookup)
//! and are plain values once computed.

pub mod distribution;
pub mod movement;

pub use distribution::{Distribution, NodeShare};
pub use movement::{KeyMove, MovementReport};

use crate::error::{Error, Result};

/// `part / total * 100`, rounded to two decimals.
pub(crate) fn percent(part: usize, total: usize) -> f64 {
    round2(part as f64 / total as f64 * 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn ensure_keys<K>(keys: &[K]) -> Result<()> {
    if keys.is_empty() {
        return Err(Error::NoKeys);
    }
    Ok(())
}
