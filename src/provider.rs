//! The explorer's view of a chain.
//!
//! [`ChainDataProvider`] is the seam between the views and the network. The
//! HTTP implementation lives in [`crate::http::ChainClient`]; tests swap in
//! in-memory providers.

use std::fmt::{self, Display};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http::{Account, BlockDetail, BlockMeta, Coin, FactoryDenom, HttpError, NodeStatus, TxResponse, TxSearchPage};

pub const DEFAULT_PER_PAGE: u32 = 10;

/// A `tx_search` query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxQuery {
    /// Every transaction above the given height.
    AllAfterHeight(u64),
    /// Transactions with a `transfer` event sent by the address.
    TransferSender(String),
    /// Transactions with a `transfer` event received by the address.
    TransferRecipient(String),
}

impl Display for TxQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllAfterHeight(height) => write!(f, "tx.height>{}", height),
            Self::TransferSender(address) => write!(f, "transfer.sender='{}'", address),
            Self::TransferRecipient(address) => write!(f, "transfer.recipient='{}'", address),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    Asc,
    #[default]
    Desc,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One-based pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    per_page: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Page {
    /// Returns `None` unless both `page` and `per_page` are at least 1.
    pub fn new(page: u32, per_page: u32) -> Option<Self> {
        (page >= 1 && per_page >= 1).then_some(Self { page, per_page })
    }

    pub fn first(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn previous(&self) -> Option<Self> {
        self.has_previous().then(|| Self {
            page: self.page - 1,
            per_page: self.per_page,
        })
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            per_page: self.per_page,
        }
    }

    /// Number of pages needed for `total` items, at least 1.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.per_page)).max(1)
    }
}

/// Source of raw chain data for the explorer views.
///
/// Lookups by key return `Ok(None)` when the node does not know the block or
/// transaction; errors are reserved for transport and decoding failures.
#[async_trait]
pub trait ChainDataProvider: Send + Sync {
    async fn get_status(&self) -> Result<NodeStatus, HttpError>;

    /// Block metadata for `min_height..=max_height`, newest first.
    async fn get_block_range(&self, min_height: u64, max_height: u64) -> Result<Vec<BlockMeta>, HttpError>;

    async fn get_block(&self, height: u64) -> Result<Option<BlockDetail>, HttpError>;

    async fn get_transaction(&self, hash: &str) -> Result<Option<TxResponse>, HttpError>;

    async fn search_transactions(&self, query: &TxQuery, page: Page, order: OrderBy)
    -> Result<TxSearchPage, HttpError>;

    async fn get_accounts(&self) -> Result<Vec<Account>, HttpError>;

    async fn get_balance(&self, address: &str) -> Result<Vec<Coin>, HttpError>;

    async fn get_denoms(&self) -> Result<Vec<FactoryDenom>, HttpError>;
}
