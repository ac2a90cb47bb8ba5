pub mod structured_console_encoder;

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use log4rs::{
    Config,
    config::{Deserializers, RawConfig},
};

use crate::log::structured_console_encoder::StructuredConsoleEncoderDeserializer;

/// Log configuration picked up from the working directory when present.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

const EMBEDDED_LOG_CONFIG: &str = include_str!("../../resources/default_log4rs.yml");

fn deserializers() -> Deserializers {
    let mut deserializers = Deserializers::default();
    deserializers.insert("structured_console", StructuredConsoleEncoderDeserializer);
    deserializers
}

/// Initializes logging from `log4rs.yml` if it exists, otherwise from the
/// embedded defaults (warnings on stderr, debug and up in `log/zigscan.log`).
pub fn init_logging() -> Result<()> {
    let path = Path::new(LOG_CONFIG_FILE);

    if path.exists() {
        log4rs::init_file(path, deserializers()).with_context(|| format!("Failed to load {}", LOG_CONFIG_FILE))?;
        info!(path = LOG_CONFIG_FILE; "Logging initialized from external configuration");
        return Ok(());
    }

    let config = embedded_config()?;
    log4rs::init_config(config).context("Failed to initialize logging from embedded config")?;

    debug!("Logging initialized from embedded defaults");
    Ok(())
}

fn embedded_config() -> Result<Config> {
    let raw_config: RawConfig =
        serde_yaml::from_str(EMBEDDED_LOG_CONFIG).context("Embedded logging configuration is invalid YAML")?;

    let (appenders, errors) = raw_config.appenders_lossy(&deserializers());
    if !errors.is_empty() {
        return Err(anyhow!("Errors parsing embedded appenders: {:?}", errors));
    }

    Config::builder()
        .appenders(appenders)
        .loggers(raw_config.loggers())
        .build(raw_config.root())
        .context("Failed to build logging config")
}
