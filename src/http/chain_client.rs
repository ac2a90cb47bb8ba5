//! HTTP implementation of [`ChainDataProvider`].
//!
//! A Cosmos-SDK node exposes two HTTP surfaces, and the explorer needs both:
//!
//! - the CometBFT JSON-RPC endpoint (`/status`, `/blockchain`, `/block`,
//!   `/tx`, `/tx_search`) for blocks and transactions
//! - the Cosmos REST gateway (`/cosmos/...`, `/zigchain/...`) for accounts,
//!   balances and factory tokens
//!
//! # Example
//!
//! ```rust,no_run
//! use url::Url;
//! use zigscan::http::ChainClient;
//! use zigscan::provider::ChainDataProvider;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = ChainClient::new(
//!     Url::parse("https://testnet-rpc.zigchain.com")?,
//!     Url::parse("https://testnet-api.zigchain.com")?,
//! )?;
//!
//! let status = client.get_status().await?;
//! println!("Chain height: {}", status.latest_height);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::HttpError;
use super::http_client::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, HttpClient};
use super::types::{
    Account, AccountsResponse, BalancesResponse, BlockDetail, BlockMeta, BlockResult, BlockchainResult, Coin,
    DenomsResponse, FactoryDenom, JsonRpcResponse, NodeStatus, StatusResult, TxResponse, TxSearchPage,
};
use crate::provider::{ChainDataProvider, OrderBy, Page, TxQuery};

/// Client for a node's RPC and REST endpoints.
///
/// # Features
///
/// - **Automatic Retries**: Transient failures are retried with exponential backoff
/// - **Latency Tracking**: The last round-trip time of each endpoint is kept
/// - **Typed Responses**: Every endpoint decodes into its own response type
///
/// # Thread Safety
///
/// `ChainClient` is `Send + Sync` and can be shared between polling tasks
/// behind an `Arc`.
pub struct ChainClient {
    rpc: HttpClient,
    rest: HttpClient,
}

impl ChainClient {
    /// Creates a client with the default 30 second timeout and 3 retries.
    pub fn new(rpc_url: Url, rest_url: Url) -> Result<Self, HttpError> {
        Self::with_config(
            rpc_url,
            rest_url,
            DEFAULT_MAX_RETRIES,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Creates a client with custom retry and timeout settings.
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - Base URL of the CometBFT RPC endpoint
    /// * `rest_url` - Base URL of the Cosmos REST gateway
    /// * `max_retries` - Retry attempts for transient failures, 0 disables retries
    /// * `timeout` - Maximum duration to wait for each response
    pub fn with_config(rpc_url: Url, rest_url: Url, max_retries: u32, timeout: Duration) -> Result<Self, HttpError> {
        Ok(Self {
            rpc: HttpClient::with_config(rpc_url, max_retries, timeout)?,
            rest: HttpClient::with_config(rest_url, max_retries, timeout)?,
        })
    }

    pub fn rpc_url(&self) -> &Url {
        self.rpc.base_url()
    }

    pub fn rest_url(&self) -> &Url {
        self.rest.base_url()
    }

    /// Round-trip time of the last RPC request, if any was made.
    pub async fn rpc_latency(&self) -> Option<Duration> {
        self.rpc.get_latency().await
    }

    /// Round-trip time of the last REST request, if any was made.
    pub async fn rest_latency(&self) -> Option<Duration> {
        self.rest.get_latency().await
    }

    /// Calls an RPC method whose result must be present.
    async fn rpc_call<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, HttpError> {
        let resp: JsonRpcResponse<T> = self.rpc.get(path, query).await?;
        resp.into_result()?.ok_or_else(|| HttpError::Rpc {
            code: 0,
            message: format!("empty result from {}", path),
        })
    }

    /// Calls an RPC lookup where a JSON-RPC error means "not found".
    ///
    /// CometBFT reports unknown heights and hashes as JSON-RPC errors, either
    /// in a 200 body or in the body of a 500 response, depending on version.
    async fn rpc_lookup<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, HttpError> {
        let resp = match self.rpc.get::<JsonRpcResponse<T>>(path, query).await {
            Ok(resp) => resp,
            Err(HttpError::ServerError { status, body }) => {
                match serde_json::from_str::<JsonRpcResponse<serde_json::Value>>(&body) {
                    Ok(rpc) if rpc.error.is_some() => {
                        debug!(path = path, status = status.as_u16(); "Lookup answered with an RPC error");
                        return Ok(None);
                    },
                    _ => return Err(HttpError::ServerError { status, body }),
                }
            },
            Err(e) => return Err(e),
        };

        match resp.into_result() {
            Ok(result) => Ok(result),
            Err(HttpError::Rpc { code, message }) => {
                debug!(path = path, code = code, message = message.as_str(); "Lookup not found");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }
}

/// Strips an optional `0x` so hashes copied from either convention work.
fn normalize_tx_hash(hash: &str) -> &str {
    let hash = hash.trim();
    hash.strip_prefix("0x")
        .or_else(|| hash.strip_prefix("0X"))
        .unwrap_or(hash)
}

#[async_trait]
impl ChainDataProvider for ChainClient {
    async fn get_status(&self) -> Result<NodeStatus, HttpError> {
        let status: StatusResult = self.rpc_call("status", &[]).await?;
        Ok(status.into())
    }

    async fn get_block_range(&self, min_height: u64, max_height: u64) -> Result<Vec<BlockMeta>, HttpError> {
        let result: BlockchainResult = self
            .rpc_call(
                "blockchain",
                &[
                    ("minHeight", min_height.to_string()),
                    ("maxHeight", max_height.to_string()),
                ],
            )
            .await?;
        Ok(result.block_metas)
    }

    async fn get_block(&self, height: u64) -> Result<Option<BlockDetail>, HttpError> {
        let result: Option<BlockResult> = self.rpc_lookup("block", &[("height", height.to_string())]).await?;
        Ok(result.and_then(|r| {
            r.block.map(|block| BlockDetail {
                hash: r.block_id.hash,
                block,
            })
        }))
    }

    async fn get_transaction(&self, hash: &str) -> Result<Option<TxResponse>, HttpError> {
        let hash = normalize_tx_hash(hash);
        self.rpc_lookup(
            "tx",
            &[("hash", format!("0x{}", hash)), ("prove", "true".to_string())],
        )
        .await
    }

    async fn search_transactions(
        &self,
        query: &TxQuery,
        page: Page,
        order: OrderBy,
    ) -> Result<TxSearchPage, HttpError> {
        self.rpc_call(
            "tx_search",
            &[
                ("query", format!("\"{}\"", query)),
                ("prove", "true".to_string()),
                ("page", page.page().to_string()),
                ("per_page", page.per_page().to_string()),
                ("order_by", format!("\"{}\"", order.as_str())),
            ],
        )
        .await
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, HttpError> {
        let resp: AccountsResponse = self.rest.get("cosmos/auth/v1beta1/accounts", &[]).await?;
        Ok(resp.accounts)
    }

    async fn get_balance(&self, address: &str) -> Result<Vec<Coin>, HttpError> {
        let resp: BalancesResponse = self
            .rest
            .get_segments(&["cosmos", "bank", "v1beta1", "balances", address.trim()], &[])
            .await?;
        Ok(resp.balances)
    }

    async fn get_denoms(&self) -> Result<Vec<FactoryDenom>, HttpError> {
        let resp: DenomsResponse = self.rest.get("zigchain/factory/denom", &[]).await?;
        Ok(resp.denom)
    }
}
