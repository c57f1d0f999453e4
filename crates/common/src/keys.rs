//! Deterministic keys under which observed messages are stored.
//!
//! Both keys are pure functions of their inputs. Neither contains randomness
//! nor depends on the wall clock, so re-scanning the same finalized range
//! always produces the same keys.
use serde::{Serialize, Serializer};

use crate::{BlockHeight, ChainId, ChainName};

/// Identifies a block, rendered as `{height}/{timestamp}`.
///
/// The timestamp is whatever the chain reports for the block header, in the
/// chain's native unit. Keys order by height first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockKey {
    height: BlockHeight,
    timestamp: u64,
}

impl BlockKey {
    pub const fn new(height: BlockHeight, timestamp: u64) -> Self {
        Self { height, timestamp }
    }

    pub const fn height(&self) -> BlockHeight {
        self.height
    }

    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

impl std::fmt::Display for BlockKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.height, self.timestamp)
    }
}

impl Serialize for BlockKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Identifies a single cross-chain message, rendered as
/// `{tx_hash}:{chain_id}/{emitter}/{sequence}`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VaaKey {
    tx_hash: String,
    chain: ChainId,
    emitter: String,
    sequence: u64,
}

impl VaaKey {
    pub fn new(
        tx_hash: impl Into<String>,
        chain: ChainName,
        emitter: impl Into<String>,
        sequence: u64,
    ) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            chain: chain.id(),
            emitter: emitter.into(),
            sequence,
        }
    }

    pub fn tx_hash(&self) -> &str {
        &self.tx_hash
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn emitter(&self) -> &str {
        &self.emitter
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl std::fmt::Display for VaaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}/{}/{}",
            self.tx_hash, self.chain, self.emitter, self.sequence
        )
    }
}

impl Serialize for VaaKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
