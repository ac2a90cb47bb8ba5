use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use url::Url;

use zigscan::cli::{ApplyArgs, Cli, Commands, PageArgs};
use zigscan::config::{ExplorerConfig, load_configuration};
use zigscan::daemon::Watcher;
use zigscan::explorer::render::{self, TxRenderOptions};
use zigscan::explorer::{Explorer, SearchTarget};
use zigscan::http::ChainClient;
use zigscan::log::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let mut config = load_configuration(&cli.config_file)?;
    config.apply_node(&cli.node);
    info!(
        rpc_url = config.explorer.rpc_url.as_str(),
        rest_url = config.explorer.rest_url.as_str();
        "Configuration loaded"
    );

    let explorer = build_explorer(&config)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Status => {
            let status = explorer.status().await?;
            render::render_status(&mut out, &status)?;
        },
        Commands::Home => {
            let home = explorer.home().await;
            render::render_home(&mut out, &home)?;
        },
        Commands::Blocks => {
            let blocks = explorer.recent_blocks().await?;
            render::render_blocks(&mut out, &blocks)?;
        },
        Commands::Block { height, raw } => {
            let block = explorer.block(height).await?;
            render::render_block(&mut out, block.as_ref(), raw)?;
        },
        Commands::Txs { page } => {
            let page = resolve_page(&explorer, page)?;
            let txs = explorer.latest_txs(page).await?;
            render::render_latest_txs(&mut out, &txs)?;
        },
        Commands::Tx { hash, events, raw } => {
            let detail = explorer.tx_detail(&hash).await?;
            render::render_tx(&mut out, detail.as_ref(), TxRenderOptions { events, raw })?;
        },
        Commands::Wallets => {
            let wallets = explorer.wallets().await?;
            render::render_wallets(&mut out, &wallets)?;
        },
        Commands::Wallet { address, page } => {
            let page = resolve_page(&explorer, page)?;
            let wallet = explorer.wallet_detail(&address, page).await;
            render::render_wallet(&mut out, &wallet)?;
        },
        Commands::Tokens => {
            let tokens = explorer.tokens().await?;
            render::render_tokens(&mut out, &tokens)?;
        },
        Commands::Search { query } => {
            search(&explorer, &config, &query, &mut out).await?;
        },
        Commands::Watch {
            interval_secs,
            duration_secs,
        } => {
            drop(out);
            let interval = interval_secs
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| config.poll_interval());
            Watcher::new(Arc::new(explorer), interval)
                .with_duration(duration_secs.map(Duration::from_secs))
                .run()
                .await?;
        },
    }

    Ok(())
}

fn build_explorer(config: &ExplorerConfig) -> Result<Explorer<ChainClient>> {
    let rpc_url = Url::parse(&config.explorer.rpc_url).context("Invalid RPC URL")?;
    let rest_url = Url::parse(&config.explorer.rest_url).context("Invalid REST URL")?;
    let client = ChainClient::with_config(rpc_url, rest_url, config.http.max_retries, config.http.timeout())
        .context("Failed to create chain client")?;

    Ok(Explorer::new(client)
        .with_normalizer(config.normalizer())
        .with_selection(config.transfer.selection)
        .with_settings(config.settings()))
}

fn resolve_page(explorer: &Explorer<ChainClient>, args: PageArgs) -> Result<zigscan::provider::Page> {
    Ok(explorer.page(args.page, args.per_page)?)
}

async fn search(
    explorer: &Explorer<ChainClient>,
    config: &ExplorerConfig,
    query: &str,
    out: &mut impl Write,
) -> Result<()> {
    let Some(target) = SearchTarget::classify_with_prefix(query, &config.explorer.address_prefix) else {
        writeln!(out, "Nothing to search for.")?;
        return Ok(());
    };
    info!(query = query, kind:% = target; "Searching");

    match target {
        SearchTarget::Block(height) => {
            let block = explorer.block(height).await?;
            render::render_block(out, block.as_ref(), false)?;
        },
        SearchTarget::Wallet(address) => {
            let page = explorer.page(None, None)?;
            let wallet = explorer.wallet_detail(&address, page).await;
            render::render_wallet(out, &wallet)?;
        },
        SearchTarget::Transaction(hash) => {
            let detail = explorer.tx_detail(&hash).await?;
            render::render_tx(out, detail.as_ref(), TxRenderOptions::default())?;
        },
    }
    Ok(())
}
