use serde::{Deserialize, Serialize};

use crate::macros;

/// The protocol's numeric identifier for a chain.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u16);

macros::u64_backed::new_get!(ChainId, u16);
macros::fmt::thin_debug!(ChainId);
macros::fmt::thin_display!(ChainId);

/// The chains a watcher can be constructed for.
///
/// Every variant maps onto a fixed protocol [ChainId] which is what ends up in
/// the [VaaKey](crate::VaaKey).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChainName {
    Near,
}

impl ChainName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChainName::Near => "near",
        }
    }

    pub const fn id(&self) -> ChainId {
        match self {
            ChainName::Near => ChainId::new(15),
        }
    }
}

impl std::fmt::Display for ChainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown chain: {0}")]
pub struct UnknownChainError(String);

impl std::str::FromStr for ChainName {
    type Err = UnknownChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "near" => Ok(ChainName::Near),
            other => Err(UnknownChainError(other.to_owned())),
        }
    }
}

/// The protocol deployment being observed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_maps_to_protocol_id() {
        assert_eq!(ChainName::Near.id(), 15u16);
        assert_eq!(ChainName::Near.to_string(), "near");
        assert_eq!("near".parse::<ChainName>().unwrap(), ChainName::Near);
    }

    #[test]
    fn unknown_chain_is_rejected() {
        let err = "solana".parse::<ChainName>().unwrap_err();
        assert_eq!(err.to_string(), "unknown chain: solana");
    }
}
