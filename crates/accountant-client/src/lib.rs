//! Client for the Wormchain accountant contract.
//!
//! The accountant holds transfers back until enough guardians observed them.
//! Its pending transfers are read with CosmWasm smart queries over the LCD
//! REST endpoint of a Wormchain node.
use std::time::Duration;

use anyhow::Context;
use reqwest::Url;

pub mod poller;
mod types;

pub use types::{PendingTransfer, PendingTransferData, PendingTransferKey};
use types::{AllPendingTransfersReply, LcdError, QueryMsg, SmartQueryReply};

/// Largest page the contract serves without exceeding its query gas limit.
pub const PAGE_LIMIT: u32 = 2000;

#[derive(Debug, thiserror::Error)]
pub enum AccountantError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The LCD rejected the query, e.g. because the contract failed.
    #[error("query failed with code {code}: {message}")]
    Query { code: i64, message: String },
    #[error("building query url: {0}")]
    Url(#[from] url::ParseError),
    #[error("encoding query: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait::async_trait]
pub trait AccountantApi: Send + Sync {
    /// One page of pending transfers ordered by key, starting after
    /// `start_after`.
    async fn pending_transfers(
        &self,
        limit: u32,
        start_after: Option<PendingTransferKey>,
    ) -> Result<Vec<PendingTransfer>, AccountantError>;
}

/// Accountant client using the LCD REST API.
#[derive(Debug, Clone)]
pub struct Client {
    /// This client is internally refcounted
    inner: reqwest::Client,
    /// `{lcd}/cosmwasm/wasm/v1/contract/{contract}/smart/`
    smart_query: Url,
}

impl Client {
    pub fn new(lcd: Url, contract: &str) -> anyhow::Result<Self> {
        let mut smart_query = lcd;
        smart_query
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("LCD url cannot be a base"))?
            .pop_if_empty()
            .extend(["cosmwasm", "wasm", "v1", "contract", contract, "smart", ""]);

        Ok(Self {
            inner: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .user_agent(monitor_common::consts::USER_AGENT)
                .build()
                .context("Creating accountant HTTP client")?,
            smart_query,
        })
    }

    async fn query_smart<T>(&self, query: &QueryMsg) -> Result<T, AccountantError>
    where
        T: serde::de::DeserializeOwned,
    {
        // Url safe so the encoded query stays a single path segment.
        let encoded = base64::encode_config(serde_json::to_vec(query)?, base64::URL_SAFE);
        let url = self.smart_query.join(&encoded)?;

        tracing::trace!(%url, "Querying accountant");
        let response = self.inner.get(url).send().await?;
        parse::<SmartQueryReply<T>>(response).await.map(|reply| reply.data)
    }
}

async fn parse<T>(response: reqwest::Response) -> Result<T, AccountantError>
where
    T: serde::de::DeserializeOwned,
{
    if let Some(e) = response.error_for_status_ref().err() {
        let body = response.text().await.unwrap_or_default();
        return match serde_json::from_str::<LcdError>(&body) {
            Ok(LcdError { code, message }) => Err(AccountantError::Query { code, message }),
            Err(_) => Err(AccountantError::Transport(e)),
        };
    }

    Ok(response.json::<T>().await?)
}

#[async_trait::async_trait]
impl AccountantApi for Client {
    #[tracing::instrument(skip(self))]
    async fn pending_transfers(
        &self,
        limit: u32,
        start_after: Option<PendingTransferKey>,
    ) -> Result<Vec<PendingTransfer>, AccountantError> {
        let reply: AllPendingTransfersReply = self
            .query_smart(&QueryMsg::AllPendingTransfers { limit, start_after })
            .await?;
        Ok(reply.pending)
    }
}

/// Fetches every pending transfer by following pages of [PAGE_LIMIT].
pub async fn fetch_all_pending<A>(api: &A) -> Result<Vec<PendingTransfer>, AccountantError>
where
    A: AccountantApi + ?Sized,
{
    fetch_pages(api, PAGE_LIMIT).await
}

async fn fetch_pages<A>(api: &A, limit: u32) -> Result<Vec<PendingTransfer>, AccountantError>
where
    A: AccountantApi + ?Sized,
{
    let mut pending = Vec::new();
    let mut start_after = None;

    loop {
        let page = api.pending_transfers(limit, start_after.take()).await?;
        let is_full = !page.is_empty() && page.len() == limit as usize;

        start_after = page.last().map(|transfer| transfer.key.clone());
        pending.extend(page);

        if !is_full {
            break;
        }
    }

    tracing::trace!(count=%pending.len(), "Fetched pending transfers");
    Ok(pending)
}
