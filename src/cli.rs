use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_CONFIG_FILE: &str = "data/zigscan.toml";

#[derive(Parser)]
#[command(name = "zigscan")]
#[command(about = "Command line block explorer for ZIGChain", long_about = None)]
pub struct Cli {
    #[arg(long, help = "Path to the configuration file", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    #[command(flatten)]
    pub node: NodeArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Endpoint overrides that take precedence over the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct NodeArgs {
    #[arg(long, global = true, help = "CometBFT RPC endpoint")]
    pub rpc_url: Option<String>,
    #[arg(long, global = true, help = "Cosmos REST endpoint")]
    pub rest_url: Option<String>,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    #[arg(long, help = "Page number, starting at 1")]
    pub page: Option<u32>,
    #[arg(long, help = "Results per page (at most 100)")]
    pub per_page: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the node's sync status
    Status,
    /// Overview: status, recent blocks, latest transactions and tokens
    Home,
    /// List the most recent blocks
    Blocks,
    /// Show a block by height
    Block {
        height: u64,
        #[arg(long, help = "Print the block as JSON")]
        raw: bool,
    },
    /// List the latest transactions
    Txs {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a transaction with its transfer and the parties' recent activity
    Tx {
        hash: String,
        #[arg(long, help = "List every event with its attributes")]
        events: bool,
        #[arg(long, help = "Print the transaction as JSON")]
        raw: bool,
    },
    /// List accounts known to the chain
    Wallets,
    /// Show an address's balance and transfer history
    Wallet {
        address: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List tokens created through the factory module
    Tokens,
    /// Look up a block height, wallet address or transaction hash
    Search { query: String },
    /// Keep refreshing recent blocks and transactions until Ctrl+C
    Watch {
        #[arg(short, long, help = "Seconds between refreshes (defaults to the configured poll interval)")]
        interval_secs: Option<u64>,
        #[arg(short, long, help = "Stop after this many seconds")]
        duration_secs: Option<u64>,
    },
}

/// Folds command line overrides into a loaded configuration.
pub trait ApplyArgs {
    fn apply_node(&mut self, args: &NodeArgs);
}
