//! Query and reply types of the accountant contract.
use serde::{Deserialize, Serialize};

/// Identifies a transfer by the message that initiated it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingTransferKey {
    pub emitter_chain: u16,
    /// Hex encoded emitter address.
    pub emitter_address: String,
    pub sequence: u64,
}

/// A transfer which is awaiting guardian approval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransfer {
    pub key: PendingTransferKey,
    pub data: Vec<PendingTransferData>,
}

/// One observation of a pending transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransferData {
    pub digest: String,
    pub tx_hash: String,
    /// Bitset of the guardians which signed the observation.
    pub signatures: String,
    pub guardian_set_index: u32,
    pub emitter_chain: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum QueryMsg {
    AllPendingTransfers {
        limit: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        start_after: Option<PendingTransferKey>,
    },
}

/// Envelope of a CosmWasm smart query reply on the LCD.
#[derive(Debug, Deserialize)]
pub(crate) struct SmartQueryReply<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AllPendingTransfersReply {
    pub pending: Vec<PendingTransfer>,
}

/// Error body the LCD returns with a non-2xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct LcdError {
    pub code: i64,
    pub message: String,
}
