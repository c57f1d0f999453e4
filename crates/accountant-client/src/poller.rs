//! Periodically publishes the accountant's pending transfers.
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{fetch_all_pending, AccountantApi, PendingTransfer};

pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Polls `api` every `interval` and publishes the complete list of pending
/// transfers on `tx`.
///
/// A failed poll publishes an empty list rather than keeping a stale one.
/// Returns once `cancellation` is triggered or every receiver is gone, and
/// never publishes after cancellation.
pub async fn poll_pending_transfers<A>(
    api: A,
    interval: Duration,
    tx: watch::Sender<Vec<PendingTransfer>>,
    cancellation: CancellationToken,
) where
    A: AccountantApi,
{
    while !cancellation.is_cancelled() && !tx.is_closed() {
        let fetched = tokio::select! {
            _ = cancellation.cancelled() => break,
            fetched = fetch_all_pending(&api) => fetched,
        };

        let pending = match fetched {
            Ok(pending) => {
                tracing::debug!(count=%pending.len(), "Fetched accountant pending transfers");
                pending
            }
            Err(e) => {
                tracing::error!(reason=%e, "Fetching accountant pending transfers failed");
                Vec::new()
            }
        };

        if cancellation.is_cancelled() {
            break;
        }
        tx.send_replace(pending);

        tokio::select! {
            _ = cancellation.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    tracing::debug!("Accountant poller stopped");
}
