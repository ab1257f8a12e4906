//! Logical clock shared by all components.
//!
//! Time is a monotonically increasing block height visible to every
//! component identically. Voting windows are defined by height values, not
//! wall-clock durations; the embedder supplies the counter and passes it
//! explicitly into every time-sensitive operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height on the shared logical clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Height zero (genesis).
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The height `blocks` after this one.
    pub fn plus(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(h: u64) -> Self {
        Self(h)
    }
}
