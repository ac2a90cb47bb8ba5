use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment, Map};
use log::info;

use super::ExplorerConfig;

const ENV_PREFIX: &str = "ZIGSCAN";

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads the configuration at `path`, writing the embedded default there
/// first if the file does not exist. `ZIGSCAN_*` variables override the file.
pub fn load_configuration(path: &Path) -> Result<ExplorerConfig> {
    load_configuration_with_env(path, None)
}

/// Like [`load_configuration`], reading overrides from `env` instead of the
/// process environment when given.
pub fn load_configuration_with_env(path: &Path, env: Option<Map<String, String>>) -> Result<ExplorerConfig> {
    if !path.exists() {
        write_config_to(path, get_default_config()).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    let cfg = Config::builder()
        .add_source(config::File::with_name(filename).format(config::FileFormat::Toml))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Could not build config")?;

    cfg.try_deserialize().context("Invalid configuration")
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    Ok(())
}
