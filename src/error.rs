use thiserror::Error;

/// Top-level application error that composes all subsystem errors
#[derive(Error, Debug)]
pub(crate) enum NodeError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Blockchain-related errors
    #[error("Blockchain error: {0}")]
    Blockchain(#[from] miner_blockchain::BlockchainError),
}
