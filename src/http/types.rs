use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::HttpError;
use super::utils::{opt_u64_from_str, u64_from_str};
use crate::decode::LedgerEvent;

/// CometBFT JSON-RPC envelope. Exactly one of `result` and `error` is set.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse<T> {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: serde_json::Value,
    pub result: Option<T>,
    pub error: Option<JsonRpcError>,
}

impl<T> JsonRpcResponse<T> {
    /// Turns the envelope into its result. An `error` object wins over a
    /// result, and a response carrying neither gives `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, HttpError> {
        match self.error {
            Some(error) => Err(error.into()),
            None => Ok(self.result),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl From<JsonRpcError> for HttpError {
    fn from(error: JsonRpcError) -> Self {
        let message = match error.data {
            Some(serde_json::Value::String(data)) if !data.is_empty() => format!("{}: {}", error.message, data),
            Some(serde_json::Value::Null) | None => error.message,
            Some(data) => format!("{}: {}", error.message, data),
        };
        HttpError::Rpc {
            code: error.code,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResult {
    #[serde(default)]
    pub node_info: Option<NodeInfo>,
    pub sync_info: SyncInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub moniker: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncInfo {
    #[serde(default)]
    pub latest_block_hash: String,
    #[serde(deserialize_with = "u64_from_str")]
    pub latest_block_height: u64,
    #[serde(default)]
    pub latest_block_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub catching_up: bool,
}

/// Node status as seen by the explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub latest_height: u64,
    pub latest_block_hash: String,
    pub latest_block_time: Option<DateTime<Utc>>,
    pub catching_up: bool,
    pub network: String,
    pub moniker: String,
}

impl From<StatusResult> for NodeStatus {
    fn from(status: StatusResult) -> Self {
        let node_info = status.node_info.unwrap_or_default();
        Self {
            latest_height: status.sync_info.latest_block_height,
            latest_block_hash: status.sync_info.latest_block_hash,
            latest_block_time: status.sync_info.latest_block_time,
            catching_up: status.sync_info.catching_up,
            network: node_info.network,
            moniker: node_info.moniker,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchainResult {
    #[serde(default, deserialize_with = "opt_u64_from_str")]
    pub last_height: Option<u64>,
    #[serde(default)]
    pub block_metas: Vec<BlockMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockMeta {
    #[serde(default)]
    pub block_id: BlockId,
    #[serde(default, deserialize_with = "opt_u64_from_str")]
    pub block_size: Option<u64>,
    pub header: BlockHeader,
    #[serde(default, deserialize_with = "opt_u64_from_str")]
    pub num_txs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockId {
    #[serde(default)]
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub chain_id: String,
    #[serde(deserialize_with = "u64_from_str")]
    pub height: u64,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub proposer_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockResult {
    #[serde(default)]
    pub block_id: BlockId,
    pub block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    #[serde(default)]
    pub data: BlockData,
}

impl Block {
    /// Base64 encoded transactions included in the block.
    pub fn txs(&self) -> &[String] {
        self.data.txs.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(default)]
    pub txs: Option<Vec<String>>,
}

/// A block together with the hash CometBFT reports for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDetail {
    pub hash: String,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxResponse {
    pub hash: String,
    #[serde(deserialize_with = "u64_from_str")]
    pub height: u64,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub tx_result: Option<ExecTxResult>,
    #[serde(default)]
    pub tx: Option<String>,
}

impl TxResponse {
    pub fn events(&self) -> &[LedgerEvent] {
        self.tx_result.as_ref().map(|r| r.events()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecTxResult {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub codespace: String,
    #[serde(default)]
    pub log: String,
    #[serde(default, deserialize_with = "opt_u64_from_str")]
    pub gas_wanted: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_from_str")]
    pub gas_used: Option<u64>,
    #[serde(default)]
    pub events: Option<Vec<LedgerEvent>>,
}

impl ExecTxResult {
    pub fn events(&self) -> &[LedgerEvent] {
        self.events.as_deref().unwrap_or_default()
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// One page of `tx_search` results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxSearchPage {
    #[serde(default)]
    pub txs: Vec<TxResponse>,
    #[serde(default, deserialize_with = "u64_from_str")]
    pub total_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub next_key: Option<String>,
    #[serde(default, deserialize_with = "opt_u64_from_str")]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub pagination: Option<PageResponse>,
}

/// An `x/auth` account. Base accounts carry `address` directly, module and
/// vesting accounts nest it under `base_account`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "@type", default)]
    pub type_url: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub base_account: Option<BaseAccount>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Account {
    pub fn address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .or_else(|| self.base_account.as_ref().and_then(|b| b.address.as_deref()))
            .filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseAccount {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "opt_u64_from_str")]
    pub account_number: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_from_str")]
    pub sequence: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancesResponse {
    #[serde(default)]
    pub balances: Vec<Coin>,
    #[serde(default)]
    pub pagination: Option<PageResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenomsResponse {
    #[serde(default)]
    pub denom: Vec<FactoryDenom>,
    #[serde(default)]
    pub pagination: Option<PageResponse>,
}

/// A token created through the `zigchain/factory` module. Only the fields the
/// explorer shows are typed, the rest is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactoryDenom {
    #[serde(default)]
    pub denom: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default, alias = "maxSupply")]
    pub max_supply: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FactoryDenom {
    pub fn label(&self) -> &str {
        self.denom
            .as_deref()
            .or(self.symbol.as_deref())
            .unwrap_or("Unknown Token")
    }

    /// Max supply as text; the chain has sent it both as string and number.
    pub fn max_supply_display(&self) -> Option<String> {
        match self.max_supply.as_ref()? {
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_status() {
        let json = r#"{"jsonrpc":"2.0","id":-1,"result":{
            "node_info":{"network":"zig-test-2","moniker":"rpc-1","version":"0.38.12"},
            "sync_info":{"latest_block_hash":"ABCD","latest_block_height":"123456",
                         "latest_block_time":"2025-03-01T10:00:00.123456789Z","catching_up":false}}}"#;

        let resp: JsonRpcResponse<StatusResult> = serde_json::from_str(json).unwrap();
        let status = NodeStatus::from(resp.into_result().unwrap().unwrap());
        assert_eq!(status.latest_height, 123456);
        assert_eq!(status.network, "zig-test-2");
        assert!(status.latest_block_time.is_some());
    }

    #[test]
    fn rpc_error_maps_to_http_error() {
        let json = r#"{"jsonrpc":"2.0","id":-1,"error":{"code":-32603,"message":"Internal error",
            "data":"tx (ABC) not found"}}"#;

        let resp: JsonRpcResponse<TxResponse> = serde_json::from_str(json).unwrap();
        match resp.into_result() {
            Err(HttpError::Rpc { code, message }) => {
                assert_eq!(code, -32603);
                assert_eq!(message, "Internal error: tx (ABC) not found");
            },
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn decodes_tx_with_missing_events() {
        let json = r#"{"hash":"FF","height":"10","index":0,"tx_result":{"code":0,"log":"","gas_wanted":"200000","gas_used":"81234","events":null}}"#;

        let tx: TxResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tx.height, 10);
        assert!(tx.events().is_empty());
        let result = tx.tx_result.as_ref().unwrap();
        assert_eq!(result.gas_used, Some(81234));
        assert!(result.is_success());
    }

    #[test]
    fn account_address_falls_back_to_base_account() {
        let json = r#"{"accounts":[
            {"@type":"/cosmos.auth.v1beta1.BaseAccount","address":"zig1user","account_number":"7","sequence":"1"},
            {"@type":"/cosmos.auth.v1beta1.ModuleAccount","base_account":{"address":"zig1module"},"name":"fee_collector"},
            {"@type":"/cosmos.auth.v1beta1.ModuleAccount","name":"broken"}],
            "pagination":{"next_key":null,"total":"3"}}"#;

        let resp: AccountsResponse = serde_json::from_str(json).unwrap();
        let addresses: Vec<Option<&str>> = resp.accounts.iter().map(|a| a.address()).collect();
        assert_eq!(addresses, vec![Some("zig1user"), Some("zig1module"), None]);
        assert_eq!(resp.pagination.unwrap().total, Some(3));
    }

    #[test]
    fn factory_denom_keeps_unknown_fields() {
        let json = r#"{"denom":[{"creator":"zig1c","denom":"coin.zig1c.moon","minting_cap":"1000","max_supply":"5000"},{"symbol":"SUN","maxSupply":21},{}]}"#;

        let resp: DenomsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.denom[0].label(), "coin.zig1c.moon");
        assert_eq!(resp.denom[0].extra.get("minting_cap").and_then(|v| v.as_str()), Some("1000"));
        assert_eq!(resp.denom[0].max_supply_display().as_deref(), Some("5000"));
        assert_eq!(resp.denom[1].label(), "SUN");
        assert_eq!(resp.denom[1].max_supply_display().as_deref(), Some("21"));
        assert_eq!(resp.denom[2].max_supply_display(), None);
        assert_eq!(resp.denom[2].label(), "Unknown Token");
    }
}
