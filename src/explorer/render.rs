//! Plain-text rendering of the explorer views.
//!
//! Every renderer writes to an [`io::Write`] so the command line can print to
//! stdout while tests render into a buffer.

use std::io::{self, Write};

use serde::Serialize;

use super::error::ExplorerError;
use super::formatting::{HISTORY_ELLIPSIS, HISTORY_LEN, format_count, format_timestamp, short, truncate};
use super::views::{HomeView, LatestTxs, RecentBlocks, TxDetail, TxSummary, WalletDetail};
use crate::decode::NOT_AVAILABLE;
use crate::http::{BlockDetail, FactoryDenom, NodeStatus};
use crate::provider::Page;

/// Column-aligned table. Widths follow the widest cell per column.
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn write(&self, out: &mut impl Write) -> io::Result<()> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        write_cells(out, &header, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_cells(out, &rule, &widths)?;
        for row in &self.rows {
            write_cells(out, row, &widths)?;
        }
        Ok(())
    }
}

fn write_cells(out: &mut impl Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), ExplorerError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_field(out: &mut impl Write, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{:<14}{}", label, value)
}

fn write_pager(out: &mut impl Write, page: Page, page_count: u64, total: u64, noun: &str) -> io::Result<()> {
    writeln!(
        out,
        "Page {} of {} ({} {})",
        page.page(),
        format_count(page_count),
        format_count(total),
        noun
    )?;
    let mut hints = Vec::new();
    if let Some(previous) = page.previous() {
        hints.push(format!("previous: --page {}", previous.page()));
    }
    if u64::from(page.page()) < page_count {
        hints.push(format!("next: --page {}", page.next().page()));
    }
    if !hints.is_empty() {
        writeln!(out, "{}", hints.join(", "))?;
    }
    Ok(())
}

pub fn render_status(out: &mut impl Write, status: &NodeStatus) -> io::Result<()> {
    write_field(out, "Network", &status.network)?;
    write_field(out, "Moniker", &status.moniker)?;
    write_field(out, "Latest height", format_count(status.latest_height))?;
    write_field(out, "Latest hash", &status.latest_block_hash)?;
    write_field(out, "Latest time", format_timestamp(status.latest_block_time.as_ref()))?;
    write_field(out, "Catching up", if status.catching_up { "yes" } else { "no" })
}

pub fn render_blocks(out: &mut impl Write, view: &RecentBlocks) -> io::Result<()> {
    if view.blocks.is_empty() {
        return writeln!(out, "No block data found.");
    }
    let mut table = Table::new(&["Height", "Time", "Txs", "Proposer"]);
    for meta in &view.blocks {
        table.row(vec![
            meta.header.height.to_string(),
            format_timestamp(meta.header.time.as_ref()),
            meta.num_txs.map_or_else(|| NOT_AVAILABLE.to_string(), format_count),
            short(&meta.header.proposer_address),
        ]);
    }
    table.write(out)
}

pub fn render_block(out: &mut impl Write, block: Option<&BlockDetail>, raw: bool) -> Result<(), ExplorerError> {
    let Some(detail) = block else {
        writeln!(out, "No block data found.")?;
        return Ok(());
    };
    if raw {
        return write_json(out, detail);
    }

    let header = &detail.block.header;
    write_field(out, "Height", header.height)?;
    write_field(out, "Hash", &detail.hash)?;
    write_field(out, "Chain", &header.chain_id)?;
    write_field(out, "Time", format_timestamp(header.time.as_ref()))?;
    write_field(out, "Proposer", &header.proposer_address)?;
    write_field(out, "Transactions", format_count(detail.block.txs().len() as u64))?;
    Ok(())
}

fn transfer_cells(summary: &TxSummary) -> [String; 3] {
    match &summary.transfer {
        Some(transfer) => [short(&transfer.sender), short(&transfer.receiver), transfer.amount_display()],
        None => [NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()],
    }
}

fn summary_table(txs: &[TxSummary]) -> Table {
    let mut table = Table::new(&["Hash", "Height", "Status", "From", "To", "Amount"]);
    for summary in txs {
        let [from, to, amount] = transfer_cells(summary);
        table.row(vec![
            short(&summary.hash),
            summary.height.to_string(),
            if summary.success { "ok" } else { "failed" }.to_string(),
            from,
            to,
            amount,
        ]);
    }
    table
}

pub fn render_latest_txs(out: &mut impl Write, view: &LatestTxs) -> io::Result<()> {
    if view.txs.is_empty() {
        writeln!(out, "No transaction data found.")?;
    } else {
        summary_table(&view.txs).write(out)?;
    }
    write_pager(out, view.page, view.page_count(), view.total_count, "transactions")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TxRenderOptions {
    pub events: bool,
    pub raw: bool,
}

pub fn render_tx(out: &mut impl Write, detail: Option<&TxDetail>, options: TxRenderOptions) -> Result<(), ExplorerError> {
    let Some(detail) = detail else {
        writeln!(out, "No transaction data found.")?;
        return Ok(());
    };
    if options.raw {
        return write_json(out, &detail.tx);
    }

    let tx = &detail.tx;
    write_field(out, "Hash", &tx.hash)?;
    write_field(out, "Height", tx.height)?;
    if let Some(result) = &tx.tx_result {
        let status = if result.is_success() {
            "Success".to_string()
        } else {
            format!("Failed (code {} {})", result.code, result.codespace)
        };
        write_field(out, "Status", status)?;
        let gas = |g: Option<u64>| g.map_or_else(|| NOT_AVAILABLE.to_string(), format_count);
        write_field(out, "Gas", format!("{} / {}", gas(result.gas_used), gas(result.gas_wanted)))?;
    }

    writeln!(out)?;
    match &detail.transfer {
        Some(transfer) => {
            write_field(out, "From", &transfer.sender)?;
            write_field(out, "To", &transfer.receiver)?;
            write_field(out, "Amount", transfer.amount_display())?;
        },
        None => writeln!(out, "No transfer event found.")?,
    }

    if options.events {
        writeln!(out)?;
        writeln!(out, "Events")?;
        for event in tx.events() {
            writeln!(out, "  {}", event.kind)?;
            for attribute in &event.attributes {
                writeln!(out, "    {} = {}", attribute.key, attribute.value)?;
            }
        }
    }

    if let Some(transfer) = &detail.transfer {
        if transfer.has_sender() {
            writeln!(out)?;
            render_history(out, "Sender", &transfer.sender, &detail.sender_history)?;
        }
        if transfer.has_receiver() {
            writeln!(out)?;
            render_history(out, "Receiver", &transfer.receiver, &detail.receiver_history)?;
        }
    }
    Ok(())
}

fn render_history(out: &mut impl Write, role: &str, address: &str, txs: &[TxSummary]) -> io::Result<()> {
    writeln!(out, "{} history ({})", role, truncate(address, HISTORY_LEN, HISTORY_ELLIPSIS))?;
    if txs.is_empty() {
        return writeln!(out, "No transactions found.");
    }
    let mut table = Table::new(&["Hash", "Height", "Amount"]);
    for summary in txs {
        table.row(vec![
            truncate(&summary.hash, HISTORY_LEN, HISTORY_ELLIPSIS),
            summary.height.to_string(),
            summary
                .transfer
                .as_ref()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |t| t.amount_display()),
        ]);
    }
    table.write(out)
}

pub fn render_wallets(out: &mut impl Write, addresses: &[String]) -> io::Result<()> {
    if addresses.is_empty() {
        return writeln!(out, "No wallet data available");
    }
    let mut table = Table::new(&["Address"]);
    for address in addresses {
        table.row(vec![address.clone()]);
    }
    table.write(out)
}

pub fn render_wallet(out: &mut impl Write, wallet: &WalletDetail) -> io::Result<()> {
    write_field(out, "Address", &wallet.address)?;
    match &wallet.balance {
        Some(balance) => write_field(out, "Balance", balance)?,
        None => write_field(out, "Balance", "No balance found.")?,
    }
    write_field(out, "Transactions", format_count(wallet.tx_count))?;
    writeln!(out)?;

    if wallet.txs.is_empty() {
        writeln!(out, "No transactions found for this wallet.")?;
    } else {
        summary_table(&wallet.txs).write(out)?;
    }
    write_pager(out, wallet.page, wallet.page_count(), wallet.tx_count, "transactions")
}

pub fn render_tokens(out: &mut impl Write, tokens: &[FactoryDenom]) -> io::Result<()> {
    if tokens.is_empty() {
        return writeln!(out, "No token data available");
    }
    let mut table = Table::new(&["Token", "Max Supply", "Creator", "Description"]);
    for token in tokens {
        table.row(vec![
            token.label().to_string(),
            token.max_supply_display().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            token.creator.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            token.description.clone().unwrap_or_default(),
        ]);
    }
    table.write(out)
}

pub fn render_home(out: &mut impl Write, home: &HomeView) -> io::Result<()> {
    match &home.status {
        Some(status) => writeln!(
            out,
            "{} at height {} ({})",
            status.network,
            format_count(status.latest_height),
            format_timestamp(status.latest_block_time.as_ref())
        )?,
        None => writeln!(out, "Node status unavailable")?,
    }

    writeln!(out)?;
    writeln!(out, "Recent blocks")?;
    match &home.blocks {
        Some(blocks) => render_blocks(out, blocks)?,
        None => writeln!(out, "No block data found.")?,
    }

    writeln!(out)?;
    writeln!(out, "Latest transactions")?;
    match &home.txs {
        Some(txs) => render_latest_txs(out, txs)?,
        None => writeln!(out, "No transaction data found.")?,
    }

    writeln!(out)?;
    writeln!(out, "Tokens")?;
    render_tokens(out, home.tokens.as_deref().unwrap_or_default())
}
