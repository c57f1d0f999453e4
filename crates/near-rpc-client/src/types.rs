//! Identifiers used in NEAR JSON-RPC requests and replies.
use monitor_common::BlockHeight;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Generates a base58 or account-name backed string newtype.
macro_rules! string_newtype {
    ($(#[$meta:meta])* $target:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $target(pub String);

        impl $target {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $target {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::fmt::Debug for $target {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($target), self.0)
            }
        }

        impl From<&str> for $target {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $target {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_newtype!(BlockHash);
string_newtype!(ChunkHash);
string_newtype!(TransactionHash);
string_newtype!(ReceiptId);
string_newtype!(
    /// A NEAR account such as `contract.wormhole_crypto.near`.
    AccountId
);

/// Selects the block a `block` request refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockReference {
    /// The latest block the node considers final.
    Final,
    Height(BlockHeight),
    Hash(BlockHash),
}

impl BlockReference {
    pub(crate) fn params(&self) -> serde_json::Value {
        match self {
            BlockReference::Final => json!({ "finality": "final" }),
            BlockReference::Height(height) => json!({ "block_id": height.get() }),
            BlockReference::Hash(hash) => json!({ "block_id": hash.as_str() }),
        }
    }
}

impl From<BlockHeight> for BlockReference {
    fn from(value: BlockHeight) -> Self {
        Self::Height(value)
    }
}

impl From<BlockHash> for BlockReference {
    fn from(value: BlockHash) -> Self {
        Self::Hash(value)
    }
}
