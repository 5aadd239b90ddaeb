use std::path::PathBuf;

use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};

use super::network::P2pConfig;
use super::rpc::{
    self, HttpTimeouts, DEFAULT_GRAPHQL_HOST, DEFAULT_GRAPHQL_PORT, DEFAULT_HTTP_HOST,
    DEFAULT_HTTP_PORT, DEFAULT_MODULES, DEFAULT_VIRTUAL_HOSTS, DEFAULT_WS_HOST, DEFAULT_WS_PORT,
};
use crate::datadir::{self, DataDirStrategy};
use crate::error::ConfigError;

static DEFAULT_CONFIG: Lazy<NodeConfig> = Lazy::new(NodeConfig::default);

/// The process-wide default configuration.
///
/// Built on first access and never modified afterwards. Clone it to derive a
/// configuration with different values.
pub fn default_config() -> &'static NodeConfig {
    &DEFAULT_CONFIG
}

/// Node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Data directory
    pub data_dir: PathBuf,

    /// HTTP RPC host interface, empty to disable
    pub http_host: String,

    /// HTTP RPC port
    pub http_port: u16,

    /// API modules exposed over HTTP
    pub http_modules: Vec<String>,

    /// Accepted `Host` headers for HTTP requests
    pub http_virtual_hosts: Vec<String>,

    /// Websocket RPC host interface, empty to disable
    pub ws_host: String,

    /// Websocket RPC port
    pub ws_port: u16,

    /// API modules exposed over websocket
    pub ws_modules: Vec<String>,

    /// GraphQL host interface, empty to disable
    pub graphql_host: String,

    /// GraphQL port
    pub graphql_port: u16,

    /// Accepted `Host` headers for GraphQL requests
    pub graphql_virtual_hosts: Vec<String>,

    // Tables go last so the TOML rendering stays valid.
    /// HTTP server timeouts
    pub http_timeouts: HttpTimeouts,

    /// Peer-to-peer networking
    pub p2p: P2pConfig,
}

impl Default for NodeConfig {
    /// # Panics
    ///
    /// Panics if the current working directory cannot be determined, see
    /// [`datadir::default_data_dir`].
    fn default() -> Self {
        Self::with_data_dir(datadir::default_data_dir())
    }
}

impl NodeConfig {
    /// Default configuration rooted at `data_dir`. Does not look at the
    /// working directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            http_modules: rpc::to_strings(DEFAULT_MODULES),
            http_virtual_hosts: rpc::to_strings(DEFAULT_VIRTUAL_HOSTS),
            ws_host: DEFAULT_WS_HOST.to_string(),
            ws_port: DEFAULT_WS_PORT,
            ws_modules: rpc::to_strings(DEFAULT_MODULES),
            graphql_host: DEFAULT_GRAPHQL_HOST.to_string(),
            graphql_port: DEFAULT_GRAPHQL_PORT,
            graphql_virtual_hosts: rpc::to_strings(DEFAULT_VIRTUAL_HOSTS),
            http_timeouts: HttpTimeouts::default(),
            p2p: P2pConfig::default(),
        }
    }

    /// Endpoint of the HTTP RPC server, `None` if disabled
    pub fn http_endpoint(&self) -> Option<String> {
        rpc::endpoint(&self.http_host, self.http_port)
    }

    /// Endpoint of the websocket RPC server, `None` if disabled
    pub fn ws_endpoint(&self) -> Option<String> {
        rpc::endpoint(&self.ws_host, self.ws_port)
    }

    /// Endpoint of the GraphQL server, `None` if disabled
    pub fn graphql_endpoint(&self) -> Option<String> {
        rpc::endpoint(&self.graphql_host, self.graphql_port)
    }

    /// A copy of this configuration with the data directory placed according
    /// to `strategy`. Returns `None` if the strategy cannot resolve a path.
    pub fn with_data_dir_strategy(&self, strategy: DataDirStrategy) -> Option<Self> {
        let data_dir = strategy.resolve()?;
        Some(Self {
            data_dir,
            ..self.clone()
        })
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
