//! Configuration file handling.
//!
//! Settings come from a TOML file (created from the embedded defaults on
//! first run), then `ZIGSCAN_*` environment variables, then command line
//! flags through [`ApplyArgs`].

mod loader;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use loader::{get_default_config, load_configuration, load_configuration_with_env, write_config_to};

use crate::cli::{ApplyArgs, NodeArgs};
use crate::decode::{AmountNormalizer, DenomUnit, TransferSelection};
use crate::explorer::{DEFAULT_ADDRESS_PREFIX, DEFAULT_RECENT_BLOCKS, ExplorerSettings};
use crate::http::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::provider::DEFAULT_PER_PAGE;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub explorer: ExplorerOptions,
    #[serde(default)]
    pub http: HttpOptions,
    #[serde(default = "default_denoms")]
    pub denoms: Vec<DenomUnit>,
    #[serde(default)]
    pub transfer: TransferOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExplorerOptions {
    pub rpc_url: String,
    pub rest_url: String,
    pub poll_interval_secs: u64,
    pub recent_blocks: u64,
    pub default_per_page: u32,
    pub address_prefix: String,
}

impl Default for ExplorerOptions {
    fn default() -> Self {
        Self {
            rpc_url: "https://testnet-rpc.zigchain.com".to_string(),
            rest_url: "https://testnet-api.zigchain.com".to_string(),
            poll_interval_secs: 10,
            recent_blocks: DEFAULT_RECENT_BLOCKS,
            default_per_page: DEFAULT_PER_PAGE,
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpOptions {
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TransferOptions {
    pub selection: TransferSelection,
}

fn default_denoms() -> Vec<DenomUnit> {
    vec![DenomUnit::native()]
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            explorer: ExplorerOptions::default(),
            http: HttpOptions::default(),
            denoms: default_denoms(),
            transfer: TransferOptions::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.explorer.poll_interval_secs.max(1))
    }

    pub fn normalizer(&self) -> AmountNormalizer {
        AmountNormalizer::new(self.denoms.clone())
    }

    pub fn settings(&self) -> ExplorerSettings {
        ExplorerSettings {
            recent_blocks: self.explorer.recent_blocks,
            default_per_page: self.explorer.default_per_page.max(1),
        }
    }
}

impl ApplyArgs for ExplorerConfig {
    fn apply_node(&mut self, args: &NodeArgs) {
        if let Some(rpc_url) = &args.rpc_url {
            self.explorer.rpc_url = rpc_url.clone();
        }
        if let Some(rest_url) = &args.rest_url {
            self.explorer.rest_url = rest_url.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_endpoints() {
        let mut config = ExplorerConfig::default();
        config.apply_node(&NodeArgs {
            rpc_url: Some("http://localhost:26657".into()),
            rest_url: None,
        });
        assert_eq!(config.explorer.rpc_url, "http://localhost:26657");
        assert_eq!(config.explorer.rest_url, ExplorerOptions::default().rest_url);
    }

    #[test]
    fn derived_settings_clamp_zero_values() {
        let mut config = ExplorerConfig::default();
        config.explorer.poll_interval_secs = 0;
        config.explorer.default_per_page = 0;
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.settings().default_per_page, 1);
    }
}
