use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use super::error::ExplorerError;
use crate::decode::{AmountNormalizer, NOT_AVAILABLE, NormalizedAmount, TransferRecord, TransferSelection, extract_transfer_with};
use crate::http::{BlockDetail, BlockMeta, FactoryDenom, HttpError, NodeStatus, TxResponse, TxSearchPage};
use crate::provider::{ChainDataProvider, DEFAULT_PER_PAGE, OrderBy, Page, TxQuery};

/// Largest page CometBFT's `tx_search` serves.
pub const MAX_PER_PAGE: u32 = 100;

pub const DEFAULT_RECENT_BLOCKS: u64 = 10;

/// Knobs for the explorer views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerSettings {
    /// How far below the tip the recent blocks view reaches.
    pub recent_blocks: u64,
    pub default_per_page: u32,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            recent_blocks: DEFAULT_RECENT_BLOCKS,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// A transaction reduced to what the tables show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxSummary {
    pub hash: String,
    pub height: u64,
    pub success: bool,
    pub transfer: Option<TransferRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentBlocks {
    pub latest_height: u64,
    pub blocks: Vec<BlockMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestTxs {
    #[serde(skip)]
    pub page: Page,
    pub total_count: u64,
    pub txs: Vec<TxSummary>,
}

impl LatestTxs {
    pub fn page_count(&self) -> u64 {
        self.page.page_count(self.total_count)
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page.page()) < self.page_count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxDetail {
    pub tx: TxResponse,
    pub transfer: Option<TransferRecord>,
    pub sender_history: Vec<TxSummary>,
    pub receiver_history: Vec<TxSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletDetail {
    pub address: String,
    pub balance: Option<NormalizedAmount>,
    #[serde(skip)]
    pub page: Page,
    pub sent_count: u64,
    pub received_count: u64,
    /// `sent_count + received_count`; a self-transfer is counted on both sides.
    pub tx_count: u64,
    pub txs: Vec<TxSummary>,
}

impl WalletDetail {
    /// Sent and received histories page in lockstep, so the wallet has as
    /// many pages as the longer of the two.
    pub fn page_count(&self) -> u64 {
        self.page
            .page_count(self.sent_count)
            .max(self.page.page_count(self.received_count))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page.page()) < self.page_count()
    }
}

/// Each section of the home page loads on its own; `None` marks a section
/// whose request failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub status: Option<NodeStatus>,
    pub blocks: Option<RecentBlocks>,
    pub txs: Option<LatestTxs>,
    pub tokens: Option<Vec<FactoryDenom>>,
}

/// Loads explorer views from a [`ChainDataProvider`].
#[derive(Debug, Clone)]
pub struct Explorer<P> {
    provider: P,
    normalizer: AmountNormalizer,
    selection: TransferSelection,
    settings: ExplorerSettings,
}

impl<P: ChainDataProvider> Explorer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            normalizer: AmountNormalizer::default(),
            selection: TransferSelection::default(),
            settings: ExplorerSettings::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: AmountNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_selection(mut self, selection: TransferSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_settings(mut self, settings: ExplorerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn normalizer(&self) -> &AmountNormalizer {
        &self.normalizer
    }

    pub fn settings(&self) -> &ExplorerSettings {
        &self.settings
    }

    /// Builds a page from user input. Missing values fall back to page 1 and
    /// the configured page size; sizes above [`MAX_PER_PAGE`] are capped.
    pub fn page(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Page, ExplorerError> {
        let page_number = page.unwrap_or(1);
        let per_page = per_page.unwrap_or(self.settings.default_per_page).min(MAX_PER_PAGE);
        Page::new(page_number, per_page).ok_or(ExplorerError::InvalidPage {
            page: page_number,
            per_page,
        })
    }

    pub fn summarize_tx(&self, tx: &TxResponse) -> TxSummary {
        TxSummary {
            hash: tx.hash.clone(),
            height: tx.height,
            success: tx.tx_result.as_ref().is_none_or(|r| r.is_success()),
            transfer: extract_transfer_with(tx.events(), &self.selection, &self.normalizer),
        }
    }

    pub async fn status(&self) -> Result<NodeStatus, ExplorerError> {
        Ok(self.provider.get_status().await?)
    }

    /// The newest blocks, from the tip down to `recent_blocks` below it
    /// (never below height 1).
    pub async fn recent_blocks(&self) -> Result<RecentBlocks, ExplorerError> {
        let status = self.provider.get_status().await?;
        let latest_height = status.latest_height;
        let min_height = latest_height.saturating_sub(self.settings.recent_blocks).max(1);
        let blocks = if latest_height == 0 {
            Vec::new()
        } else {
            self.provider.get_block_range(min_height, latest_height).await?
        };
        Ok(RecentBlocks { latest_height, blocks })
    }

    pub async fn block(&self, height: u64) -> Result<Option<BlockDetail>, ExplorerError> {
        let block = self.provider.get_block(height).await?;
        if block.is_none() {
            debug!(height = height; "Block not found");
        }
        Ok(block)
    }

    pub async fn latest_txs(&self, page: Page) -> Result<LatestTxs, ExplorerError> {
        let result = self
            .provider
            .search_transactions(&TxQuery::AllAfterHeight(0), page, OrderBy::Desc)
            .await?;
        Ok(LatestTxs {
            page,
            total_count: result.total_count,
            txs: result.txs.iter().map(|tx| self.summarize_tx(tx)).collect(),
        })
    }

    /// A transaction with its transfer and the recent activity of both
    /// parties. History lookups that fail are logged and left empty.
    pub async fn tx_detail(&self, hash: &str) -> Result<Option<TxDetail>, ExplorerError> {
        let Some(tx) = self.provider.get_transaction(hash).await? else {
            debug!(hash = hash; "Transaction not found");
            return Ok(None);
        };
        let transfer = extract_transfer_with(tx.events(), &self.selection, &self.normalizer);

        let history_page = Page::first(self.settings.default_per_page.min(MAX_PER_PAGE));
        let (sender_history, receiver_history) = match &transfer {
            Some(transfer) => {
                tokio::join!(
                    self.history(transfer.has_sender(), TxQuery::TransferSender(transfer.sender.clone()), history_page),
                    self.history(
                        transfer.has_receiver(),
                        TxQuery::TransferRecipient(transfer.receiver.clone()),
                        history_page
                    ),
                )
            },
            None => (Vec::new(), Vec::new()),
        };

        Ok(Some(TxDetail {
            tx,
            transfer,
            sender_history,
            receiver_history,
        }))
    }

    async fn history(&self, enabled: bool, query: TxQuery, page: Page) -> Vec<TxSummary> {
        if !enabled {
            return Vec::new();
        }
        match self.provider.search_transactions(&query, page, OrderBy::Desc).await {
            Ok(result) => result.txs.iter().map(|tx| self.summarize_tx(tx)).collect(),
            Err(e) => {
                warn!(query:% = query, error:% = e; "Failed to load transaction history");
                Vec::new()
            },
        }
    }

    /// Addresses of every account, `N/A` where the account has none.
    pub async fn wallets(&self) -> Result<Vec<String>, ExplorerError> {
        let accounts = self.provider.get_accounts().await?;
        Ok(accounts
            .iter()
            .map(|account| account.address().unwrap_or(NOT_AVAILABLE).to_string())
            .collect())
    }

    /// Balance and transfer history of one address.
    ///
    /// The balance, sent and received lookups fail independently: a failure
    /// is logged and that part of the view comes back empty.
    pub async fn wallet_detail(&self, address: &str, page: Page) -> WalletDetail {
        let sent_query = TxQuery::TransferSender(address.to_string());
        let received_query = TxQuery::TransferRecipient(address.to_string());
        let (balance, sent, received) = tokio::join!(
            self.provider.get_balance(address),
            self.wallet_side(&sent_query, page),
            self.wallet_side(&received_query, page),
        );

        let balance = match balance {
            Ok(coins) => coins
                .first()
                .map(|coin| super::formatting::normalize_balance(&self.normalizer, coin)),
            Err(e) => {
                warn!(address = address, error:% = e; "Failed to load wallet balance");
                None
            },
        };
        let sent = log_search_failure(sent, address, "sent");
        let received = log_search_failure(received, address, "received");

        let (sent_count, received_count) = (sent.total_count, received.total_count);
        let txs = merge_wallet_txs(sent.txs, received.txs)
            .iter()
            .map(|tx| self.summarize_tx(tx))
            .collect();

        WalletDetail {
            address: address.to_string(),
            balance,
            page,
            sent_count,
            received_count,
            tx_count: sent_count + received_count,
            txs,
        }
    }

    /// One side of a wallet's history at `page`.
    ///
    /// CometBFT rejects a page past the last one, which happens whenever one
    /// side is shorter than the other. The side then comes back empty with
    /// its total taken from the first page.
    async fn wallet_side(&self, query: &TxQuery, page: Page) -> Result<TxSearchPage, HttpError> {
        match self.provider.search_transactions(query, page, OrderBy::Desc).await {
            Err(e) if page.has_previous() => {
                debug!(
                    query:% = query,
                    page = page.page(),
                    error:% = e;
                    "Page out of range, counting from the first page"
                );
                let first = self
                    .provider
                    .search_transactions(query, Page::first(page.per_page()), OrderBy::Desc)
                    .await?;
                Ok(TxSearchPage {
                    txs: Vec::new(),
                    total_count: first.total_count,
                })
            },
            result => result,
        }
    }

    pub async fn tokens(&self) -> Result<Vec<FactoryDenom>, ExplorerError> {
        Ok(self.provider.get_denoms().await?)
    }

    /// Status, recent blocks, the first page of transactions and the token
    /// list, each loaded concurrently and independently.
    pub async fn home(&self) -> HomeView {
        let first_page = Page::first(self.settings.default_per_page.min(MAX_PER_PAGE));
        let (status, blocks, txs, tokens) = tokio::join!(
            self.status(),
            self.recent_blocks(),
            self.latest_txs(first_page),
            self.tokens(),
        );

        HomeView {
            status: log_section_failure(status, "status"),
            blocks: log_section_failure(blocks, "blocks"),
            txs: log_section_failure(txs, "transactions"),
            tokens: log_section_failure(tokens, "tokens"),
        }
    }
}

/// Merges the sent and received histories of a wallet, keyed by hash.
///
/// Order is first appearance across `sent` then `received`. When a hash shows
/// up on both sides the received copy replaces the sent one in place.
pub fn merge_wallet_txs(sent: Vec<TxResponse>, received: Vec<TxResponse>) -> Vec<TxResponse> {
    let mut merged: IndexMap<String, TxResponse> = IndexMap::with_capacity(sent.len() + received.len());
    for tx in sent.into_iter().chain(received) {
        merged.insert(tx.hash.clone(), tx);
    }
    merged.into_values().collect()
}

fn log_search_failure(result: Result<TxSearchPage, HttpError>, address: &str, side: &str) -> TxSearchPage {
    result.unwrap_or_else(|e| {
        warn!(address = address, side = side, error:% = e; "Failed to load wallet transactions");
        TxSearchPage::default()
    })
}

fn log_section_failure<T>(result: Result<T, ExplorerError>, section: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(section = section, error:% = e; "Failed to load home section");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::decode::{AmountValue, EventAttribute, LedgerEvent};
    use crate::http::{Account, BaseAccount, BlockHeader, BlockId, Coin, ExecTxResult};

    /// In-memory chain. Searches are keyed by the rendered query string;
    /// a missing key is a transport failure. Like CometBFT, a page past the
    /// last one is rejected.
    #[derive(Default)]
    struct FakeChain {
        latest_height: u64,
        txs: HashMap<String, TxResponse>,
        searches: HashMap<String, TxSearchPage>,
        balances: Option<Vec<Coin>>,
        accounts: Vec<Account>,
        denoms: Option<Vec<FactoryDenom>>,
        ranges: Mutex<Vec<(u64, u64)>>,
    }

    fn unavailable() -> HttpError {
        HttpError::ServerError {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "unavailable".into(),
        }
    }

    #[async_trait]
    impl ChainDataProvider for FakeChain {
        async fn get_status(&self) -> Result<NodeStatus, HttpError> {
            Ok(NodeStatus {
                latest_height: self.latest_height,
                latest_block_hash: "AB".into(),
                latest_block_time: None,
                catching_up: false,
                network: "zig-test-2".into(),
                moniker: "node".into(),
            })
        }

        async fn get_block_range(&self, min_height: u64, max_height: u64) -> Result<Vec<BlockMeta>, HttpError> {
            self.ranges.lock().unwrap().push((min_height, max_height));
            Ok((min_height..=max_height)
                .rev()
                .map(|height| BlockMeta {
                    block_id: BlockId {
                        hash: format!("H{}", height),
                    },
                    block_size: None,
                    header: BlockHeader {
                        chain_id: "zig-test-2".into(),
                        height,
                        time: None,
                        proposer_address: "P".into(),
                    },
                    num_txs: Some(0),
                })
                .collect())
        }

        async fn get_block(&self, _height: u64) -> Result<Option<BlockDetail>, HttpError> {
            Ok(None)
        }

        async fn get_transaction(&self, hash: &str) -> Result<Option<TxResponse>, HttpError> {
            Ok(self.txs.get(hash).cloned())
        }

        async fn search_transactions(
            &self,
            query: &TxQuery,
            page: Page,
            _order: OrderBy,
        ) -> Result<TxSearchPage, HttpError> {
            let result = self.searches.get(&query.to_string()).cloned().ok_or_else(unavailable)?;
            let last = page.page_count(result.total_count);
            if u64::from(page.page()) > last {
                return Err(HttpError::Rpc {
                    code: -32603,
                    message: format!("page should be within [1, {}] range, given {}", last, page.page()),
                });
            }
            Ok(result)
        }

        async fn get_accounts(&self) -> Result<Vec<Account>, HttpError> {
            Ok(self.accounts.clone())
        }

        async fn get_balance(&self, _address: &str) -> Result<Vec<Coin>, HttpError> {
            self.balances.clone().ok_or_else(unavailable)
        }

        async fn get_denoms(&self) -> Result<Vec<FactoryDenom>, HttpError> {
            self.denoms.clone().ok_or_else(unavailable)
        }
    }

    fn tx(hash: &str, height: u64, transfers: &[(&str, &str, &str)]) -> TxResponse {
        let events = transfers
            .iter()
            .map(|(sender, recipient, amount)| {
                LedgerEvent::new(
                    "transfer",
                    vec![
                        EventAttribute::new("recipient", *recipient),
                        EventAttribute::new("sender", *sender),
                        EventAttribute::new("amount", *amount),
                    ],
                )
            })
            .collect();
        TxResponse {
            hash: hash.into(),
            height,
            index: 0,
            tx_result: Some(ExecTxResult {
                code: 0,
                codespace: String::new(),
                log: String::new(),
                gas_wanted: None,
                gas_used: None,
                events: Some(events),
            }),
            tx: None,
        }
    }

    fn page_of(txs: Vec<TxResponse>, total_count: u64) -> TxSearchPage {
        TxSearchPage { txs, total_count }
    }

    #[test]
    fn merge_keeps_first_seen_order_and_prefers_received() {
        let sent = vec![tx("A", 5, &[]), tx("B", 4, &[])];
        let mut received_b = tx("B", 4, &[]);
        received_b.index = 9;
        let received = vec![received_b.clone(), tx("C", 3, &[])];

        let merged = merge_wallet_txs(sent, received);
        let hashes: Vec<&str> = merged.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(hashes, ["A", "B", "C"]);
        assert_eq!(merged[1], received_b);
    }

    #[test]
    fn page_input_is_validated_and_capped() {
        let explorer = Explorer::new(FakeChain::default());
        assert_eq!(explorer.page(None, None).unwrap(), Page::first(DEFAULT_PER_PAGE));
        assert_eq!(explorer.page(Some(2), Some(500)).unwrap().per_page(), MAX_PER_PAGE);
        assert!(matches!(
            explorer.page(Some(0), None),
            Err(ExplorerError::InvalidPage { page: 0, .. })
        ));
        assert!(explorer.page(Some(1), Some(0)).is_err());
    }

    #[tokio::test]
    async fn recent_blocks_stop_at_height_one() {
        let chain = FakeChain {
            latest_height: 4,
            ..Default::default()
        };
        let explorer = Explorer::new(chain);
        let view = explorer.recent_blocks().await.unwrap();
        assert_eq!(view.blocks.len(), 4);
        assert_eq!(explorer.provider().ranges.lock().unwrap().as_slice(), &[(1, 4)]);

        let chain = FakeChain {
            latest_height: 100,
            ..Default::default()
        };
        let explorer = Explorer::new(chain);
        let view = explorer.recent_blocks().await.unwrap();
        assert_eq!(view.blocks.first().map(|b| b.header.height), Some(100));
        assert_eq!(explorer.provider().ranges.lock().unwrap().as_slice(), &[(90, 100)]);
    }

    #[tokio::test]
    async fn tx_detail_loads_both_histories() {
        let mut chain = FakeChain::default();
        chain.txs.insert(
            "T1".into(),
            tx("T1", 7, &[("zig1fee", "zig1collector", "10uzig"), ("zig1alice", "zig1bob", "2000000uzig")]),
        );
        chain.searches.insert(
            "transfer.sender='zig1alice'".into(),
            page_of(vec![tx("S1", 6, &[]), tx("S2", 5, &[])], 2),
        );
        chain
            .searches
            .insert("transfer.recipient='zig1bob'".into(), page_of(vec![tx("R1", 4, &[])], 1));

        let explorer = Explorer::new(chain);
        let detail = explorer.tx_detail("T1").await.unwrap().unwrap();
        let transfer = detail.transfer.unwrap();
        assert_eq!(transfer.sender, "zig1alice");
        assert_eq!(transfer.receiver, "zig1bob");
        assert_eq!(transfer.amount.unwrap().value, AmountValue::Number(2.0));
        assert_eq!(detail.sender_history.len(), 2);
        assert_eq!(detail.receiver_history[0].hash, "R1");
    }

    #[tokio::test]
    async fn tx_detail_skips_unknown_parties_and_tolerates_failures() {
        let mut chain = FakeChain::default();
        chain.txs.insert(
            "T2".into(),
            TxResponse {
                tx_result: Some(ExecTxResult {
                    code: 5,
                    codespace: "sdk".into(),
                    log: "insufficient funds".into(),
                    gas_wanted: Some(100),
                    gas_used: Some(90),
                    events: Some(vec![LedgerEvent::new(
                        "transfer",
                        vec![EventAttribute::new("recipient", "zig1bob")],
                    )]),
                }),
                ..tx("T2", 8, &[])
            },
        );

        let explorer = Explorer::new(chain);
        let detail = explorer.tx_detail("T2").await.unwrap().unwrap();
        // Sender is N/A so no search is issued; the recipient search fails.
        assert!(detail.sender_history.is_empty());
        assert!(detail.receiver_history.is_empty());
        assert!(!explorer.summarize_tx(&detail.tx).success);

        assert!(explorer.tx_detail("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn wallet_detail_merges_and_counts() {
        let mut chain = FakeChain {
            balances: Some(vec![
                Coin {
                    denom: "uzig".into(),
                    amount: "1500000".into(),
                },
                Coin {
                    denom: "stake".into(),
                    amount: "3".into(),
                },
            ]),
            ..Default::default()
        };
        chain.searches.insert(
            "transfer.sender='zig1me'".into(),
            page_of(vec![tx("A", 9, &[("zig1me", "zig1you", "1uzig")]), tx("B", 8, &[])], 12),
        );
        chain
            .searches
            .insert("transfer.recipient='zig1me'".into(), page_of(vec![tx("B", 8, &[]), tx("C", 7, &[])], 30));

        let explorer = Explorer::new(chain);
        let page = explorer.page(Some(1), Some(2)).unwrap();
        let wallet = explorer.wallet_detail("zig1me", page).await;
        assert_eq!(wallet.balance.as_ref().unwrap().to_string(), "1.5 ZIG");
        assert_eq!((wallet.sent_count, wallet.received_count, wallet.tx_count), (12, 30, 42));
        assert_eq!(wallet.page_count(), 15);
        let hashes: Vec<&str> = wallet.txs.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(hashes, ["A", "B", "C"]);
        assert!(wallet.has_next());
    }

    #[tokio::test]
    async fn wallet_detail_keeps_shorter_side_count_past_its_last_page() {
        let mut chain = FakeChain {
            balances: Some(Vec::new()),
            ..Default::default()
        };
        chain
            .searches
            .insert("transfer.sender='zig1me'".into(), page_of(vec![tx("S11", 9, &[])], 25));
        chain
            .searches
            .insert("transfer.recipient='zig1me'".into(), page_of(vec![tx("R1", 7, &[])], 3));

        let explorer = Explorer::new(chain);
        let wallet = explorer.wallet_detail("zig1me", explorer.page(Some(2), Some(10)).unwrap()).await;
        assert_eq!((wallet.sent_count, wallet.received_count, wallet.tx_count), (25, 3, 28));
        let hashes: Vec<&str> = wallet.txs.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(hashes, ["S11"]);
        assert_eq!(wallet.page_count(), 3);
        assert!(wallet.has_next());
    }

    #[tokio::test]
    async fn wallet_pages_follow_the_longer_side() {
        let mut chain = FakeChain::default();
        chain
            .searches
            .insert("transfer.sender='zig1me'".into(), page_of(vec![tx("A", 9, &[])], 10));
        chain
            .searches
            .insert("transfer.recipient='zig1me'".into(), page_of(vec![tx("B", 8, &[])], 10));

        let explorer = Explorer::new(chain);
        let wallet = explorer.wallet_detail("zig1me", explorer.page(Some(1), Some(10)).unwrap()).await;
        assert_eq!(wallet.tx_count, 20);
        assert_eq!(wallet.page_count(), 1);
        assert!(!wallet.has_next());
    }

    #[tokio::test]
    async fn wallet_detail_renders_failed_parts_empty() {
        let mut chain = FakeChain::default();
        chain
            .searches
            .insert("transfer.recipient='zig1me'".into(), page_of(vec![tx("C", 7, &[])], 1));

        let explorer = Explorer::new(chain);
        let wallet = explorer.wallet_detail("zig1me", Page::default()).await;
        assert!(wallet.balance.is_none());
        assert_eq!(wallet.tx_count, 1);
        assert_eq!(wallet.txs.len(), 1);
        assert!(!wallet.has_next());
    }

    #[tokio::test]
    async fn wallets_fall_back_to_base_account_address() {
        let chain = FakeChain {
            accounts: vec![
                Account {
                    address: Some("zig1plain".into()),
                    ..Default::default()
                },
                Account {
                    base_account: Some(BaseAccount {
                        address: Some("zig1module".into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                Account::default(),
            ],
            ..Default::default()
        };
        let explorer = Explorer::new(chain);
        assert_eq!(explorer.wallets().await.unwrap(), ["zig1plain", "zig1module", "N/A"]);
    }

    #[tokio::test]
    async fn home_sections_fail_independently() {
        let chain = FakeChain {
            latest_height: 3,
            ..Default::default()
        };
        let explorer = Explorer::new(chain);
        let home = explorer.home().await;
        assert_eq!(home.status.map(|s| s.latest_height), Some(3));
        assert_eq!(home.blocks.map(|b| b.blocks.len()), Some(3));
        assert!(home.txs.is_none());
        assert!(home.tokens.is_none());
    }
}
