use std::path::PathBuf;
use structopt::StructOpt;
use krishna::config::{default_config, NatStrategy, NodeConfig};
use krishna::datadir::DataDirStrategy;
use krishna::{init_logger, ConfigError};
use log::{info, warn, error};

#[derive(Debug, StructOpt)]
#[structopt(name = "krishna-config", about = "Print the Krishna node configuration")]
struct Opt {
    /// Data directory
    #[structopt(long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    /// Data directory placement (working-dir, home)
    #[structopt(long)]
    data_dir_strategy: Option<DataDirStrategy>,

    /// HTTP RPC host
    #[structopt(long)]
    http_host: Option<String>,

    /// HTTP RPC port
    #[structopt(long)]
    http_port: Option<u16>,

    /// Comma separated API modules offered over HTTP
    #[structopt(long)]
    http_modules: Option<String>,

    /// Websocket RPC host
    #[structopt(long)]
    ws_host: Option<String>,

    /// Websocket RPC port
    #[structopt(long)]
    ws_port: Option<u16>,

    /// Comma separated API modules offered over websocket
    #[structopt(long)]
    ws_modules: Option<String>,

    /// GraphQL host
    #[structopt(long)]
    graphql_host: Option<String>,

    /// GraphQL port
    #[structopt(long)]
    graphql_port: Option<u16>,

    /// Peer-to-peer listen address
    #[structopt(long)]
    listen_addr: Option<String>,

    /// Maximum number of peers
    #[structopt(long)]
    max_peers: Option<usize>,

    /// NAT strategy (any, none, upnp, pmp, extip:<IP>)
    #[structopt(long)]
    nat: Option<NatStrategy>,
}

fn split_modules(modules: &str) -> Vec<String> {
    modules.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn modules_override(transport: &str, modules: &str) -> Vec<String> {
    let modules = split_modules(modules);
    if modules.is_empty() {
        warn!("No API modules enabled for {}", transport);
    }
    modules
}

fn build_config(opt: Opt) -> Result<NodeConfig, ConfigError> {
    // Only the plain default touches the working directory.
    let mut config = match (opt.data_dir, opt.data_dir_strategy) {
        (Some(data_dir), _) => NodeConfig::with_data_dir(data_dir),
        (None, Some(strategy)) => {
            NodeConfig::with_data_dir(strategy.resolve().ok_or(ConfigError::NoHomeDir)?)
        },
        (None, None) => default_config().clone(),
    };

    if let Some(http_host) = opt.http_host {
        config.http_host = http_host;
    }

    if let Some(http_port) = opt.http_port {
        config.http_port = http_port;
    }

    if let Some(http_modules) = opt.http_modules {
        config.http_modules = modules_override("HTTP", &http_modules);
    }

    if let Some(ws_host) = opt.ws_host {
        config.ws_host = ws_host;
    }

    if let Some(ws_port) = opt.ws_port {
        config.ws_port = ws_port;
    }

    if let Some(ws_modules) = opt.ws_modules {
        config.ws_modules = modules_override("websocket", &ws_modules);
    }

    if let Some(graphql_host) = opt.graphql_host {
        config.graphql_host = graphql_host;
    }

    if let Some(graphql_port) = opt.graphql_port {
        config.graphql_port = graphql_port;
    }

    if let Some(listen_addr) = opt.listen_addr {
        config.p2p.listen_addr = listen_addr;
    }

    if let Some(max_peers) = opt.max_peers {
        config.p2p.max_peers = max_peers;
    }

    if let Some(nat) = opt.nat {
        config.p2p.nat = nat;
    }

    // Reject listen addresses the networking layer could not bind.
    config.p2p.listen_socket_addr()?;

    if config.p2p.max_peers == 0 {
        return Err(ConfigError::InvalidMaxPeers(config.p2p.max_peers));
    }

    Ok(config)
}

fn main() {
    // Initialize logger
    init_logger();

    // Parse command line arguments
    let opt = Opt::from_args();

    let config = match build_config(opt) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Data directory: {:?}", config.data_dir);

    match config.to_toml_string() {
        Ok(config_str) => {
            println!("{}", config_str);
        },
        Err(e) => {
            error!("Failed to serialize configuration: {}", e);
            std::process::exit(1);
        }
    }
}
