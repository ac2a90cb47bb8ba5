//! HTTP access to a Cosmos-SDK node.
//!
//! This module provides the network half of the explorer: a retrying HTTP
//! client, typed responses for every endpoint the explorer reads, and
//! [`ChainClient`], the [`ChainDataProvider`](crate::provider::ChainDataProvider)
//! implementation built on them.
//!
//! # Architecture
//!
//! - [`ChainClient`] - RPC + REST client implementing the provider trait
//! - [`HttpError`] - Error types for HTTP operations
//! - Response types ([`NodeStatus`], [`BlockMeta`], [`TxResponse`],
//!   [`TxSearchPage`], [`Account`], [`Coin`], [`FactoryDenom`]) for
//!   deserializing node responses
//!
//! # Features
//!
//! - **Automatic Retries**: Exponential backoff for transient failures
//! - **Latency Tracking**: Round-trip time of the last request per endpoint
//! - **Lenient Numbers**: CometBFT's string-encoded integers decode to `u64`
//!
//! # Error Handling
//!
//! All operations return [`Result`] types with [`HttpError`] describing
//! network failures, non-success statuses, JSON-RPC errors and malformed JSON.
//! Lookups of unknown blocks or transactions are not errors: they return
//! `Ok(None)`.

mod chain_client;
mod error;
mod http_client;
mod types;
mod utils;

pub use chain_client::ChainClient;
pub use error::HttpError;
pub use http_client::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
pub use types::{
    Account, BaseAccount, Block, BlockData, BlockDetail, BlockHeader, BlockId, BlockMeta, Coin, ExecTxResult,
    FactoryDenom, JsonRpcError, JsonRpcResponse, NodeStatus, PageResponse, TxResponse, TxSearchPage,
};
