// Krishna - default runtime configuration for a Krishna node

pub mod config;
pub mod datadir;
pub mod error;

pub use config::{default_config, NodeConfig};
pub use error::ConfigError;

// Initialize logging
pub fn init_logger() {
    env_logger::init();
}
