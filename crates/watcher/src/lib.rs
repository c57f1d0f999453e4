//! Chain watchers.
//!
//! A [Watcher] finds the VAAs published on one chain within a finalized block
//! range. Each chain has its own finality model and log encoding; the trait
//! hides these differences from the polling driver.
use monitor_common::{BlockHeight, ChainName, VaasByBlock};
use near_rpc_client::RpcError;

mod connection;
pub mod near;

pub use connection::Connection;
pub use near::{NearConfig, NearWatcher};

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait::async_trait]
pub trait Watcher: Send + Sync {
    /// The chain this watcher observes. Never changes.
    fn chain(&self) -> ChainName;

    /// A height the chain guarantees will not be reorganised.
    ///
    /// Establishes the node connection on first use.
    async fn finalized_block_number(&self) -> Result<BlockHeight, WatcherError>;

    /// All VAAs published in the inclusive range `from..=to`, grouped by block.
    ///
    /// `to` must come from a prior [finalized_block_number](Watcher::finalized_block_number).
    /// When the node no longer serves part of the range the result only covers
    /// the upper part and carries a [truncation](monitor_common::Truncation)
    /// marker.
    async fn messages_for_blocks(
        &self,
        from: BlockHeight,
        to: BlockHeight,
    ) -> Result<VaasByBlock, WatcherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("connecting to the chain node: {0:#}")]
    Connect(anyhow::Error),
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("invalid block range: {from} is above {to}")]
    InvalidRange { from: BlockHeight, to: BlockHeight },
}
