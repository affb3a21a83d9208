use alloy::{
    primitives::{Address, U256},
    providers::Provider,
};
use async_trait::async_trait;

use crate::{
    contracts::StakingToken,
    error::BlockchainError,
    provider::BlockchainProvider,
    staking::{ContractReader, EvmStakeToken},
};

// Note: Must use async-trait here because this trait is held as a trait object
// (Arc<dyn LedgerClient>). Native async traits are not dyn-compatible yet.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Next nonce for the account, including transactions still in the mempool.
    async fn pending_nonce_at(&self, address: Address) -> Result<u64, BlockchainError>;

    /// Gas price currently suggested by the ledger.
    async fn suggest_gas_price(&self) -> Result<u128, BlockchainError>;

    /// Native-currency balance of the account.
    async fn balance_at(&self, address: Address) -> Result<U256, BlockchainError>;

    /// Resolve a read handle for the stake token deployed at `address`.
    ///
    /// Fails with [`BlockchainError::ContractResolution`] when the address does
    /// not parse or no code is deployed there.
    async fn stake_token_at(
        &self,
        address: &str,
    ) -> Result<Box<dyn ContractReader>, BlockchainError>;
}

/// [`LedgerClient`] backed by an EVM JSON-RPC provider.
pub struct EvmLedger {
    provider: BlockchainProvider,
}

impl EvmLedger {
    pub fn new(provider: BlockchainProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl LedgerClient for EvmLedger {
    async fn pending_nonce_at(&self, address: Address) -> Result<u64, BlockchainError> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(|e| BlockchainError::rpc("pending nonce", e))
    }

    async fn suggest_gas_price(&self) -> Result<u128, BlockchainError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| BlockchainError::rpc("gas price", e))
    }

    async fn balance_at(&self, address: Address) -> Result<U256, BlockchainError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| BlockchainError::rpc("native balance", e))
    }

    async fn stake_token_at(
        &self,
        address: &str,
    ) -> Result<Box<dyn ContractReader>, BlockchainError> {
        let contract_address: Address =
            address
                .parse()
                .map_err(|_| BlockchainError::ContractResolution {
                    address: address.to_string(),
                    reason: "not a valid EVM address",
                })?;

        // A handle bound to an address without code would answer every query
        // with empty data, so reject it up front.
        let code = self
            .provider
            .get_code_at(contract_address)
            .await
            .map_err(|e| BlockchainError::rpc("contract code", e))?;
        if code.is_empty() {
            return Err(BlockchainError::ContractResolution {
                address: address.to_string(),
                reason: "no contract code at address",
            });
        }

        let contract = StakingToken::new(contract_address, self.provider.clone());
        Ok(Box::new(EvmStakeToken::new(contract)))
    }
}
