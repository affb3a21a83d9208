mod config;
mod config_error;
mod contracts;
mod error;
mod ledger;
mod provider;
mod staking;
mod wallets;

pub use config::{ChainConfig, ChainConfigRaw, WALLET_PRIVATE_KEY_ENV};
pub use config_error::ConfigError;
pub use error::BlockchainError;
pub use ledger::{EvmLedger, LedgerClient};
pub use provider::{BlockchainProvider, initialize_provider, initialize_provider_with_wallet};
pub use staking::{
    ContractReader, ContractTransactor, DepositPolicy, EvmStakeTransactor, SubmissionResult,
    TransactionAuthorization,
};
pub use wallets::{signer_from_private_key, wallet_from_private_key};

// Callers express accounts, balances and transaction hashes in these
// primitives, so re-export them alongside the capability types.
pub use alloy::primitives::{Address, B256, U256};
