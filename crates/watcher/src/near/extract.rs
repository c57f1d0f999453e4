use monitor_common::{BlockKey, ChainName, VaaKey, VaasByBlock};
use near_rpc_client::reply::Block;
use near_rpc_client::{AccountId, NearApi, RpcError};

use super::event::parse_publish_event;

/// Appends the messages the core contract published for transactions of
/// `block` to `vaas`.
///
/// Chunks are fetched concurrently, transaction outcomes one after another.
pub(super) async fn messages_in_block<A>(
    api: &A,
    core_contract: &AccountId,
    block: &Block,
    vaas: &mut VaasByBlock,
) -> Result<(), RpcError>
where
    A: NearApi + ?Sized,
{
    let height = block.header.height;
    let key = BlockKey::new(height, block.header.timestamp);

    // Headers of chunks which were included at a lower height are repeated
    // for shards which missed this block.
    let chunks = block
        .chunks
        .iter()
        .filter(|chunk| chunk.height_included == height)
        .map(|chunk| api.chunk(chunk.chunk_hash.clone()));
    let chunks = futures::future::try_join_all(chunks).await?;

    for transaction in chunks.iter().flat_map(|chunk| &chunk.transactions) {
        let outcome = api
            .transaction_status(transaction.hash.clone(), transaction.signer_id.clone())
            .await?;

        if !outcome.status.is_success() {
            tracing::trace!(tx=%transaction.hash, status=?outcome.status, "Skipping unsuccessful transaction");
            continue;
        }

        let logs = outcome
            .receipts_executed_by(core_contract)
            .flat_map(|receipt| &receipt.outcome.logs);

        for log in logs {
            match parse_publish_event(log) {
                Ok(Some(event)) => {
                    let vaa = VaaKey::new(
                        transaction.hash.as_str(),
                        ChainName::Near,
                        event.emitter,
                        event.sequence,
                    );
                    tracing::debug!(block=%key, %vaa, "Found message");
                    vaas.push(key, vaa);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(tx=%transaction.hash, %height, reason=%e, "Skipping malformed publish event")
                }
            }
        }
    }

    Ok(())
}
