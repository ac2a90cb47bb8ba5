//! Explorer pages: loading, search dispatch and text rendering.
//!
//! [`Explorer`] turns raw provider data into view models (recent blocks, a
//! transaction with its transfer, a wallet's merged history, ...). The
//! [`render`] functions print those models as aligned text tables.

mod error;
pub mod formatting;
pub mod render;
mod search;
mod views;

pub use error::ExplorerError;
pub use search::{DEFAULT_ADDRESS_PREFIX, SearchTarget};
pub use views::{
    DEFAULT_RECENT_BLOCKS, Explorer, ExplorerSettings, HomeView, LatestTxs, MAX_PER_PAGE, RecentBlocks, TxDetail,
    TxSummary, WalletDetail, merge_wallet_txs,
};
