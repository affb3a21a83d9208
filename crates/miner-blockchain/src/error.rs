use alloy::{primitives::U256, signers::local::LocalSignerError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlockchainError {
    #[error("Invalid private key (length: {key_length})")]
    KeyDerivation {
        key_length: usize,
        #[source]
        source: LocalSignerError,
    },

    #[error("RPC request failed ({context}): {reason}")]
    Rpc {
        context: &'static str,
        reason: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Insufficient funds to send transaction: {balance} < {cost}")]
    InsufficientFunds { balance: U256, cost: U256 },

    #[error("Cannot resolve stake contract at '{address}': {reason}")]
    ContractResolution {
        address: String,
        reason: &'static str,
    },

    #[error("Stake deposit submission failed: {reason}")]
    Submission {
        reason: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("RPC connection failed after trying {attempts} endpoint(s)")]
    RpcConnectionFailed { attempts: usize },
}

impl BlockchainError {
    /// Wrap a failed RPC round trip with the pipeline step it served.
    pub fn rpc<E>(context: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Rpc {
            context,
            reason: source.to_string(),
            source: Box::new(source),
        }
    }

    /// Wrap a deposit submission rejected by the ledger.
    pub fn submission<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Submission {
            reason: source.to_string(),
            source: Box::new(source),
        }
    }
}
