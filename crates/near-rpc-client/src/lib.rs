//! NEAR JSON-RPC client.
use std::time::Duration;

use reqwest::Url;

pub mod error;
pub mod reply;
mod request;
pub mod types;

pub use error::{RpcError, RpcErrorKind};
pub use types::{AccountId, BlockHash, BlockReference, ChunkHash, ReceiptId, TransactionHash};

/// Public RPC endpoint of NEAR mainnet.
pub const MAINNET_URL: &str = "https://rpc.mainnet.near.org";

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait::async_trait]
pub trait NearApi: Send + Sync {
    async fn block(&self, block: BlockReference) -> Result<reply::Block, RpcError>;

    async fn chunk(&self, chunk: ChunkHash) -> Result<reply::Chunk, RpcError>;

    /// Final outcome of a transaction. NEAR routes the lookup by the shard of
    /// `signer`.
    async fn transaction_status(
        &self,
        transaction: TransactionHash,
        signer: AccountId,
    ) -> Result<reply::TransactionOutcome, RpcError>;

    async fn status(&self) -> Result<reply::Status, RpcError>;
}

/// NEAR JSON-RPC client over HTTP.
///
/// Requests are not retried, failures are handed to the caller.
#[derive(Debug, Clone)]
pub struct Client {
    /// This client is internally refcounted
    inner: reqwest::Client,
    url: Url,
}

impl Client {
    /// Creates a [Client] for [MAINNET_URL].
    pub fn mainnet() -> anyhow::Result<Self> {
        Self::with_url(Url::parse(MAINNET_URL)?)
    }

    pub fn with_url(url: Url) -> anyhow::Result<Self> {
        Ok(Self {
            inner: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .user_agent(monitor_common::consts::USER_AGENT)
                .build()?,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn request(&self) -> request::Request<'_, request::stage::Method> {
        request::Request::builder(&self.inner, self.url.clone())
    }
}

#[async_trait::async_trait]
impl NearApi for Client {
    #[tracing::instrument(skip(self))]
    async fn block(&self, block: BlockReference) -> Result<reply::Block, RpcError> {
        self.request().block().params(block.params()).send().await
    }

    #[tracing::instrument(skip(self))]
    async fn chunk(&self, chunk: ChunkHash) -> Result<reply::Chunk, RpcError> {
        self.request()
            .chunk()
            .params(serde_json::json!({ "chunk_id": chunk }))
            .send()
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn transaction_status(
        &self,
        transaction: TransactionHash,
        signer: AccountId,
    ) -> Result<reply::TransactionOutcome, RpcError> {
        self.request()
            .tx()
            .params(serde_json::json!([transaction, signer]))
            .send()
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn status(&self) -> Result<reply::Status, RpcError> {
        self.request().status().no_params().send().await
    }
}
