pub mod cli;
pub mod config;
pub mod daemon;
pub mod decode;
pub mod explorer;
pub mod http;
pub mod log;
pub mod provider;
pub mod tasks;

pub use crate::config::ExplorerConfig;
pub use crate::explorer::{Explorer, ExplorerError, SearchTarget};
pub use crate::http::{ChainClient, HttpError};
pub use crate::provider::ChainDataProvider;
