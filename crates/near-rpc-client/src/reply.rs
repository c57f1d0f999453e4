//! Structures used for deserializing replies from the NEAR JSON-RPC API.
//!
//! Only the fields the watchers consume are modelled. Everything else in the
//! node's reply is ignored, so unrelated schema changes cannot fail a reply.
use monitor_common::BlockHeight;
use serde::Deserialize;

use crate::types::{AccountId, BlockHash, ChunkHash, ReceiptId, TransactionHash};

/// Reply of the `block` method.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub chunks: Vec<ChunkHeader>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    pub height: BlockHeight,
    pub hash: BlockHash,
    pub prev_hash: BlockHash,
    /// Nanoseconds since the unix epoch.
    pub timestamp: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ChunkHeader {
    pub chunk_hash: ChunkHash,
    /// A block repeats the header of the last chunk produced for a shard when
    /// the shard missed this height. Such a chunk was included at a lower
    /// height.
    pub height_included: BlockHeight,
}

/// Reply of the `chunk` method.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub header: ChunkHeader,
    pub transactions: Vec<SignedTransaction>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SignedTransaction {
    pub hash: TransactionHash,
    /// Account the `tx` lookup is routed by.
    pub signer_id: AccountId,
}

/// Reply of the `tx` method.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub status: FinalExecutionStatus,
    pub receipts_outcome: Vec<ExecutionOutcomeWithId>,
}

impl TransactionOutcome {
    /// Receipt outcomes whose receipt was executed by `account`.
    pub fn receipts_executed_by<'a>(
        &'a self,
        account: &'a AccountId,
    ) -> impl Iterator<Item = &'a ExecutionOutcomeWithId> + 'a {
        self.receipts_outcome
            .iter()
            .filter(move |r| &r.outcome.executor_id == account)
    }
}

/// Overall status of a transaction after all of its receipts were executed.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum FinalExecutionStatus {
    NotStarted,
    Started,
    Failure(serde_json::Value),
    /// Base64 encoded return value of the last receipt. May be empty.
    SuccessValue(String),
    SuccessReceiptId(ReceiptId),
}

impl FinalExecutionStatus {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            FinalExecutionStatus::SuccessValue(_) | FinalExecutionStatus::SuccessReceiptId(_)
        )
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ExecutionOutcomeWithId {
    pub id: ReceiptId,
    pub outcome: ExecutionOutcome,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub logs: Vec<String>,
    pub executor_id: AccountId,
}

/// Reply of the `status` method.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Status {
    /// Network id of the node, e.g. `mainnet` or `testnet`.
    pub chain_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions_sorted::assert_eq;

    #[test]
    fn block() {
        let block: Block = serde_json::from_str(include_str!("../fixtures/block.json")).unwrap();

        assert_eq!(block.header.height, BlockHeight::new(101));
        assert_eq!(block.header.timestamp, 1667411339285611563);
        assert_eq!(
            block.header.prev_hash,
            BlockHash::from("7wHhH5DJBjjMKsN8WBa3kE8xjWXG8zA1ixyEDT1MgDrU")
        );
        assert_eq!(block.chunks.len(), 2);
        assert_eq!(block.chunks[1].height_included, BlockHeight::new(99));
    }

    #[test]
    fn unmodelled_fields_are_ignored() {
        let block: Block = serde_json::from_value(serde_json::json!({
            "author": null,
            "header": {
                "height": 7,
                "hash": "h7",
                "prev_hash": "h6",
                "timestamp": 1,
                "gas_price": "100000000"
            },
            "chunks": [{ "chunk_hash": "c7", "shard_id": "0", "height_included": 7 }]
        }))
        .unwrap();
        assert_eq!(block.chunks[0].chunk_hash, ChunkHash::from("c7"));

        let transaction: SignedTransaction = serde_json::from_value(serde_json::json!({
            "hash": "tx",
            "signer_id": "relayer.near",
            "receiver_id": 5,
            "nonce": "74187061000168"
        }))
        .unwrap();
        assert_eq!(transaction.signer_id, AccountId::from("relayer.near"));
    }

    #[test]
    fn chunk() {
        let chunk: Chunk = serde_json::from_str(include_str!("../fixtures/chunk.json")).unwrap();

        assert_eq!(
            chunk.transactions,
            vec![SignedTransaction {
                hash: TransactionHash::from("8kq2M9dJFm3ETeyKQ2AdXJ8QJQzy1c2WXrSVf8Vh2jQd"),
                signer_id: AccountId::from("relayer.portalbridge.near"),
            }]
        );
    }

    mod transaction_outcome {
        use pretty_assertions_sorted::assert_eq;

        use super::*;

        #[test]
        fn empty_success_value_is_success() {
            let outcome: TransactionOutcome =
                serde_json::from_str(include_str!("../fixtures/tx_status.json")).unwrap();

            assert_matches!(&outcome.status, FinalExecutionStatus::SuccessValue(v) if v.is_empty());
            assert!(outcome.status.is_success());
            assert_eq!(outcome.receipts_outcome.len(), 2);
        }

        #[test]
        fn receipts_are_filtered_by_executor() {
            let outcome: TransactionOutcome =
                serde_json::from_str(include_str!("../fixtures/tx_status.json")).unwrap();
            let core = AccountId::from("contract.wormhole_crypto.near");

            let ids = outcome
                .receipts_executed_by(&core)
                .map(|r| r.id.clone())
                .collect::<Vec<_>>();
            assert_eq!(
                ids,
                vec![ReceiptId::from("4ySZqsHXsALYVnRQFmEEcUkd7bQU1gCYzW3C3QvMD4XW")]
            );
        }

        #[test]
        fn statuses() {
            let parse = |s: &str| serde_json::from_str::<FinalExecutionStatus>(s).unwrap();

            assert!(!parse(r#""NotStarted""#).is_success());
            assert!(!parse(r#""Started""#).is_success());
            assert!(!parse(r#"{"Failure":{"ActionError":{"index":0}}}"#).is_success());
            assert!(parse(r#"{"SuccessValue":"Nw=="}"#).is_success());
            assert!(parse(r#"{"SuccessReceiptId":"4ySZ"}"#).is_success());
        }
    }

    #[test]
    fn status() {
        let status: Status = serde_json::from_str(include_str!("../fixtures/status.json")).unwrap();

        assert_eq!(
            status,
            Status {
                chain_id: "mainnet".to_owned(),
            }
        );
    }
}
