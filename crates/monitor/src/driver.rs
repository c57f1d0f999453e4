//! Polling loop which scans each finalized block exactly once.
//!
//! The checkpoint only lives in memory, a restarted driver continues from its
//! configured start block or from the finalized height.
use std::num::NonZeroU64;
use std::time::Duration;

use anyhow::Context;
use monitor_common::BlockHeight;
use monitor_watcher::Watcher;
use tokio_util::sync::CancellationToken;

use crate::sink::MessageSink;

#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// First block to scan. Defaults to the finalized height at startup.
    pub start_block: Option<BlockHeight>,
    /// Largest number of blocks requested from a watcher at once.
    pub max_batch_size: NonZeroU64,
    pub poll_interval: Duration,
}

/// Scan progress of one watcher.
#[derive(Debug)]
pub struct Driver {
    next_block: Option<BlockHeight>,
    finalized: Option<BlockHeight>,
    max_batch_size: NonZeroU64,
}

impl Driver {
    pub fn new(start_block: Option<BlockHeight>, max_batch_size: NonZeroU64) -> Self {
        Self {
            next_block: start_block,
            finalized: None,
            max_batch_size,
        }
    }

    /// The lowest height which has not been scanned yet.
    pub fn next_block(&self) -> Option<BlockHeight> {
        self.next_block
    }

    /// The range the next cycle scans, capped to the batch size.
    fn pending_range(&self) -> Option<(BlockHeight, BlockHeight)> {
        let from = self.next_block?;
        let finalized = self.finalized?;
        if from > finalized {
            return None;
        }

        let batch_end = from + (self.max_batch_size.get() - 1);
        Some((from, batch_end.min(finalized)))
    }

    /// Scans the pending range, if any, and refreshes the finalized height.
    ///
    /// The checkpoint only advances once the sink accepted the messages.
    pub async fn cycle<W, S>(&mut self, watcher: &W, sink: &S) -> anyhow::Result<()>
    where
        W: Watcher + ?Sized,
        S: MessageSink + ?Sized,
    {
        let chain = watcher.chain();

        if let Some((from, to)) = self.pending_range() {
            tracing::debug!(%chain, %from, %to, blocks=%from.distance_to(to), "Scanning blocks");
            let vaas = watcher
                .messages_for_blocks(from, to)
                .await
                .with_context(|| format!("Fetching messages for blocks {from} to {to}"))?;

            if let Some(truncation) = vaas.truncation() {
                let missing = truncation.missing();
                tracing::warn!(
                    %chain,
                    missing_from=%missing.start(),
                    missing_to=%missing.end(),
                    "Skipping blocks the node no longer serves, they need a backfill"
                );
            }

            sink.store(&chain, &vaas)
                .await
                .context("Storing messages")?;

            self.next_block = Some(to + 1);
        }

        let finalized = watcher
            .finalized_block_number()
            .await
            .context("Fetching finalized block number")?;
        tracing::debug!(%chain, %finalized, "Refreshed finalized block");

        self.finalized = Some(finalized);
        self.next_block.get_or_insert(finalized);

        Ok(())
    }
}

/// Runs polling cycles every `poll_interval` until `cancellation` is
/// triggered. Failed cycles are logged and retried on the next tick.
pub async fn run<W, S>(
    watcher: &W,
    sink: &S,
    config: DriverConfig,
    cancellation: CancellationToken,
) where
    W: Watcher + ?Sized,
    S: MessageSink + ?Sized,
{
    let mut driver = Driver::new(config.start_block, config.max_batch_size);
    let chain = watcher.chain();

    tracing::info!(%chain, start_block=?config.start_block, "Starting watcher");

    loop {
        let cycle = tokio::select! {
            _ = cancellation.cancelled() => break,
            cycle = driver.cycle(watcher, sink) => cycle,
        };

        if let Err(e) = cycle {
            tracing::error!(%chain, reason=?e, "Polling cycle failed");
        }

        tokio::select! {
            _ = cancellation.cancelled() => break,
            _ = tokio::time::sleep(config.poll_interval) => {}
        }
    }

    tracing::info!(%chain, next_block=?driver.next_block(), "Watcher stopped");
}
