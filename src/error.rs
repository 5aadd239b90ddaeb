use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unparseable NAT strategy
    #[error("Invalid NAT strategy: {0}")]
    InvalidNat(String),

    /// Unparseable peer listen address
    #[error("Invalid listen address {addr:?}: {reason}")]
    InvalidListenAddr {
        addr: String,
        reason: String,
    },

    /// Peer limit that admits no peers
    #[error("Invalid max peers {0}: must be at least 1")]
    InvalidMaxPeers(usize),

    /// Unknown data directory strategy
    #[error("Invalid data directory strategy: {0}")]
    InvalidDataDirStrategy(String),

    /// No home directory could be determined
    #[error("Unable to determine home directory")]
    NoHomeDir,

    /// TOML rendering failed
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
