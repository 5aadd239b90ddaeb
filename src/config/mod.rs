mod nat;
mod network;
mod node;
pub mod rpc;

pub use nat::NatStrategy;
pub use network::{P2pConfig, DEFAULT_LISTEN_ADDR, DEFAULT_MAX_PEERS};
pub use node::{default_config, NodeConfig};
pub use rpc::HttpTimeouts;
