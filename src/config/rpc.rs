use std::time::Duration;

use serde::{Serialize, Deserialize};

/// Default host interface for the HTTP RPC server
pub const DEFAULT_HTTP_HOST: &str = "localhost";
/// Default TCP port for the HTTP RPC server
pub const DEFAULT_HTTP_PORT: u16 = 8545;
/// Default host interface for the websocket RPC server
pub const DEFAULT_WS_HOST: &str = "localhost";
/// Default TCP port for the websocket RPC server
pub const DEFAULT_WS_PORT: u16 = 8546;
/// Default host interface for the GraphQL server
pub const DEFAULT_GRAPHQL_HOST: &str = "localhost";
/// Default TCP port for the GraphQL server
pub const DEFAULT_GRAPHQL_PORT: u16 = 8547;

/// API modules exposed over HTTP and websocket unless overridden
pub const DEFAULT_MODULES: &[&str] = &["net", "web3"];

/// Host header values accepted by the HTTP and GraphQL servers
pub const DEFAULT_VIRTUAL_HOSTS: &[&str] = &["localhost"];

/// HTTP server timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpTimeouts {
    /// Maximum time to read a full request, in seconds
    pub read_timeout: u64,

    /// Maximum time to write a response, in seconds
    pub write_timeout: u64,

    /// Keep-alive idle time, in seconds
    pub idle_timeout: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            read_timeout: 30,
            write_timeout: 30,
            idle_timeout: 120,
        }
    }
}

impl HttpTimeouts {
    pub fn read(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    pub fn write(&self) -> Duration {
        Duration::from_secs(self.write_timeout)
    }

    pub fn idle(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }
}

/// Render a `host:port` endpoint. An empty host means the transport is disabled.
pub fn endpoint(host: &str, port: u16) -> Option<String> {
    if host.is_empty() {
        return None;
    }
    if host.contains(':') && !host.starts_with('[') {
        // Bare IPv6 literal
        return Some(format!("[{}]:{}", host, port));
    }
    Some(format!("{}:{}", host, port))
}

pub(crate) fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
