//! Contains core types that are shared between the chain watchers, the polling
//! driver and the message sinks.
//!
//! This includes the chain identity and the deterministic keys under which
//! observed VAAs are stored.
use serde::{Deserialize, Serialize};

mod chain;
pub mod consts;
mod keys;
mod macros;
mod vaas_by_block;

pub use chain::{ChainId, ChainName, Network, UnknownChainError};
pub use keys::{BlockKey, VaaKey};
pub use vaas_by_block::{Truncation, VaasByBlock};

/// A block height on any of the watched chains.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHeight(u64);

macros::u64_backed::new_get!(BlockHeight);
macros::fmt::thin_debug!(BlockHeight);
macros::fmt::thin_display!(BlockHeight);

impl BlockHeight {
    pub const GENESIS: BlockHeight = BlockHeight::new(0);

    /// The height directly below this one, if there is one.
    pub const fn parent(&self) -> Option<Self> {
        match self.0.checked_sub(1) {
            Some(h) => Some(Self(h)),
            None => None,
        }
    }

    /// Number of heights in the inclusive range `self..=other`. Zero if `other`
    /// is below `self`.
    pub const fn distance_to(&self, other: BlockHeight) -> u64 {
        match other.0.checked_sub(self.0) {
            Some(d) => d + 1,
            None => 0,
        }
    }
}

impl std::ops::Add<u64> for BlockHeight {
    type Output = BlockHeight;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl std::ops::AddAssign<u64> for BlockHeight {
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl std::str::FromStr for BlockHeight {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}
