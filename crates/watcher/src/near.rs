//! Watcher for the NEAR core contract.
use anyhow::Context;
use monitor_common::{BlockHeight, ChainName, Network, VaasByBlock};
use near_rpc_client::reply::Block;
use near_rpc_client::{AccountId, BlockReference, Client, NearApi};
use url::Url;

use crate::{Connection, Watcher, WatcherError};

pub mod event;
mod extract;
mod traversal;


/// Node network id reported by the `status` method on mainnet.
pub const MAINNET_NETWORK_ID: &str = "mainnet";

/// Account of the core contract, the only account whose logs are trusted.
pub fn core_contract(network: Network) -> AccountId {
    match network {
        Network::Mainnet => AccountId::from("contract.wormhole_crypto.near"),
        Network::Testnet => AccountId::from("wormhole.wormhole.testnet"),
    }
}

#[derive(Clone, Debug)]
pub struct NearConfig {
    pub url: Url,
    /// The node must report this network id, e.g. `mainnet`.
    pub network_id: String,
    pub network: Network,
}

pub struct NearWatcher<A = Client> {
    core_contract: AccountId,
    connection: Connection<A>,
}

impl NearWatcher<Client> {
    /// Creates a watcher which connects to the configured node on first use.
    pub fn new(config: NearConfig) -> Self {
        let NearConfig {
            url,
            network_id,
            network,
        } = config;

        Self::lazy(network, network_id, move || {
            Client::with_url(url.clone()).context("Creating NEAR RPC client")
        })
    }
}

impl<A: NearApi + 'static> NearWatcher<A> {
    /// Creates a watcher which builds its RPC handle with `make_api` on first
    /// use and verifies that the node serves `network_id`.
    pub fn lazy<F>(network: Network, network_id: String, make_api: F) -> Self
    where
        F: Fn() -> anyhow::Result<A> + Send + Sync + 'static,
    {
        let connection = Connection::lazy(move || {
            let api = make_api();
            let network_id = network_id.clone();
            async move { verify_network(api?, &network_id).await }
        });

        Self::with_connection(network, connection)
    }

    pub fn with_connection(network: Network, connection: Connection<A>) -> Self {
        Self {
            core_contract: core_contract(network),
            connection,
        }
    }

    pub fn core_contract(&self) -> &AccountId {
        &self.core_contract
    }

    async fn api(&self) -> Result<&A, WatcherError> {
        self.connection.get().await.map_err(WatcherError::Connect)
    }
}

async fn verify_network<A: NearApi>(api: A, network_id: &str) -> anyhow::Result<A> {
    let status = api.status().await.context("Fetching NEAR node status")?;

    anyhow::ensure!(
        status.chain_id == network_id,
        "NEAR node serves network {} but {} is configured",
        status.chain_id,
        network_id
    );
    tracing::debug!(network=%status.chain_id, "Connected to NEAR node");

    Ok(api)
}

#[async_trait::async_trait]
impl<A: NearApi + 'static> Watcher for NearWatcher<A> {
    fn chain(&self) -> ChainName {
        ChainName::Near
    }

    #[tracing::instrument(skip(self), fields(chain = %ChainName::Near))]
    async fn finalized_block_number(&self) -> Result<BlockHeight, WatcherError> {
        tracing::info!("Fetching final block");

        let block: Block = self.api().await?.block(BlockReference::Final).await?;
        Ok(block.header.height)
    }

    #[tracing::instrument(skip(self), fields(chain = %ChainName::Near))]
    async fn messages_for_blocks(
        &self,
        from: BlockHeight,
        to: BlockHeight,
    ) -> Result<VaasByBlock, WatcherError> {
        if from > to {
            return Err(WatcherError::InvalidRange { from, to });
        }

        tracing::info!(%from, %to, "Fetching messages for blocks");
        let api = self.api().await?;

        let traversal = traversal::collect_blocks(api, from, to).await?;

        let mut vaas = VaasByBlock::new();
        for block in &traversal.blocks {
            extract::messages_in_block(api, &self.core_contract, block, &mut vaas).await?;
        }

        if let Some(truncation) = traversal.truncation {
            vaas.set_truncation(truncation);
        }

        tracing::info!(
            blocks=%traversal.blocks.len(),
            messages=%vaas.vaa_count(),
            complete=%vaas.is_complete(),
            "Fetched messages for blocks"
        );

        Ok(vaas)
    }
}
