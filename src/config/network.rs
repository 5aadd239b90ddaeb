use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Serialize, Deserialize};

use super::nat::NatStrategy;
use crate::error::ConfigError;

/// Default peer-to-peer listen address (all interfaces)
pub const DEFAULT_LISTEN_ADDR: &str = ":37226";

/// Default maximum number of connected peers
pub const DEFAULT_MAX_PEERS: usize = 50;

/// Peer-to-peer network configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct P2pConfig {
    /// Listen address, `host:port` or `:port`
    pub listen_addr: String,

    /// Maximum number of peers
    pub max_peers: usize,

    /// NAT traversal strategy
    pub nat: NatStrategy,
}

impl Default for P2pConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            max_peers: DEFAULT_MAX_PEERS,
            nat: NatStrategy::Any,
        }
    }
}

impl P2pConfig {
    /// Resolve the listen address to a socket address.
    ///
    /// An empty host binds every IPv4 interface. `localhost` maps to the
    /// loopback address; any other host must be an IP literal.
    pub fn listen_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let (host, port) = split_host_port(&self.listen_addr)?;
        let port = parse_port(&self.listen_addr, port)?;

        let ip = match host {
            "" => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            "localhost" => IpAddr::V4(Ipv4Addr::LOCALHOST),
            host => host.parse::<IpAddr>().map_err(|_| ConfigError::InvalidListenAddr {
                addr: self.listen_addr.clone(),
                reason: format!("host {:?} is not an IP address", host),
            })?,
        };

        Ok(SocketAddr::new(ip, port))
    }

    /// The TCP port peers connect to.
    pub fn listen_port(&self) -> Result<u16, ConfigError> {
        let (_, port) = split_host_port(&self.listen_addr)?;
        parse_port(&self.listen_addr, port)
    }
}

fn split_host_port(addr: &str) -> Result<(&str, &str), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidListenAddr {
        addr: addr.to_string(),
        reason: reason.to_string(),
    };

    if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(|| invalid("missing ']'"))?;
        let port = tail.strip_prefix(':').ok_or_else(|| invalid("missing port"))?;
        return Ok((host, port));
    }

    let (host, port) = addr.rsplit_once(':').ok_or_else(|| invalid("missing port"))?;
    if host.contains(':') {
        return Err(invalid("too many colons"));
    }
    Ok((host, port))
}

fn parse_port(addr: &str, port: &str) -> Result<u16, ConfigError> {
    port.parse::<u16>().map_err(|_| ConfigError::InvalidListenAddr {
        addr: addr.to_string(),
        reason: format!("invalid port {:?}", port),
    })
}
