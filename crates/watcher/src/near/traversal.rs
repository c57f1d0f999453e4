use monitor_common::{BlockHeight, Truncation};
use near_rpc_client::reply::Block;
use near_rpc_client::{BlockReference, NearApi, RpcError, RpcErrorKind};

/// Blocks of a requested range in strictly decreasing height order.
#[derive(Debug)]
pub(super) struct Traversal {
    pub blocks: Vec<Block>,
    pub truncation: Option<Truncation>,
}

/// Walks backwards from `to` by following parent hashes until a block below
/// `from` is reached.
///
/// NEAR has no range query and heights may be skipped, so following the
/// parent hashes is the only way to visit every block in the range.
///
/// No block may have been produced at `to` itself. In that case the highest
/// produced height within the range is used as the starting point.
///
/// Stops early without an error if the node reports the history as pruned.
pub(super) async fn collect_blocks<A>(
    api: &A,
    from: BlockHeight,
    to: BlockHeight,
) -> Result<Traversal, RpcError>
where
    A: NearApi + ?Sized,
{
    let mut blocks: Vec<Block> = Vec::new();
    let mut next = BlockReference::Height(to);

    loop {
        // Only the upper end is looked up by height. Below that, parent hashes
        // always point at produced blocks.
        let below = match &next {
            BlockReference::Height(height) if *height > from => height.parent(),
            _ => None,
        };

        let block = match (api.block(next).await, below) {
            (Ok(block), _) => block,
            (Err(e), Some(below)) if e.is_unknown_block() => {
                tracing::debug!(height=%below, "No block produced above, trying lower height");
                next = BlockReference::Height(below);
                continue;
            }
            (Err(e), _) if e.kind() == RpcErrorKind::HistoryPruned => {
                let retrieved_from = blocks.last().map(|b| b.header.height);
                match retrieved_from {
                    Some(lowest) => tracing::error!(
                        %from, %lowest, reason=%e,
                        "Parent of block {lowest} is too old, use backfill-near for blocks before height {lowest}"
                    ),
                    None => tracing::error!(
                        %from, %to, reason=%e,
                        "toBlock {to} is too old, use backfill-near for this range"
                    ),
                }

                return Ok(Traversal {
                    blocks,
                    truncation: Some(Truncation {
                        requested_from: from,
                        requested_to: to,
                        retrieved_from,
                    }),
                });
            }
            (Err(e), _) => return Err(e),
        };

        if block.header.height < from {
            break;
        }

        let reached_genesis = block.header.height == BlockHeight::GENESIS;
        next = BlockReference::Hash(block.header.prev_hash.clone());
        tracing::trace!(height=%block.header.height, "Collected block");
        blocks.push(block);

        if reached_genesis {
            break;
        }
    }

    Ok(Traversal {
        blocks,
        truncation: None,
    })
}
