use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;

use crate::{contracts::StakingToken, error::BlockchainError, provider::BlockchainProvider};

// ─────────────────────────────────────────────────────────────────────────────
// Deposit policy
// ─────────────────────────────────────────────────────────────────────────────

/// Policy values governing a stake deposit.
///
/// The two gas limits serve different purposes and are deliberately
/// independent: `affordability_gas_limit` only bounds the pre-flight fee
/// estimate, while `submission_gas_limit` is attached to the transaction.
/// Neither is derived from the other.
#[derive(Debug, Clone)]
pub struct DepositPolicy {
    /// Gas units assumed when estimating whether the wallet can pay the fee.
    pub affordability_gas_limit: u64,
    /// Gas limit attached to the submitted deposit transaction.
    pub submission_gas_limit: u64,
    /// Minimum token balance (base units) worth depositing.
    pub minimum_stake_balance: U256,
}

impl Default for DepositPolicy {
    fn default() -> Self {
        Self {
            affordability_gas_limit: 700_000,
            submission_gas_limit: 3_000_000,
            minimum_stake_balance: U256::from(1_000u64),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Value objects
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters for a single signed contract write, built once per deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionAuthorization {
    /// Pending nonce fetched for the submitting account.
    pub nonce: u64,
    /// Native currency attached to the call; deposits never send value.
    pub value: U256,
    /// Gas limit attached to the transaction.
    pub gas_limit: u64,
    /// Legacy gas price in wei.
    pub gas_price: u128,
}

/// Identity of a submitted transaction, available before confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionResult {
    tx_hash: B256,
}

impl SubmissionResult {
    pub fn new(tx_hash: B256) -> Self {
        Self { tx_hash }
    }

    pub fn tx_hash(&self) -> B256 {
        self.tx_hash
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Capabilities
// ─────────────────────────────────────────────────────────────────────────────

// Note: Must use async-trait here because these traits are held as trait
// objects (Box<dyn ContractReader>, Arc<dyn ContractTransactor>). Native async
// traits are not dyn-compatible yet.
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// Token balance of `account` via a read-only contract call.
    async fn balance_of(&self, account: Address) -> Result<U256, BlockchainError>;
}

#[async_trait]
pub trait ContractTransactor: Send + Sync {
    /// Submit the stake deposit with the given authorization.
    ///
    /// Returns as soon as the ledger accepts the transaction; confirmation is
    /// not awaited.
    async fn deposit_stake(
        &self,
        authorization: &TransactionAuthorization,
    ) -> Result<SubmissionResult, BlockchainError>;
}

/// Read handle for the stake token, created by the ledger after verifying the
/// contract address.
pub(crate) struct EvmStakeToken {
    contract: StakingToken::StakingTokenInstance<BlockchainProvider>,
}

impl EvmStakeToken {
    pub(crate) fn new(contract: StakingToken::StakingTokenInstance<BlockchainProvider>) -> Self {
        Self { contract }
    }
}

#[async_trait]
impl ContractReader for EvmStakeToken {
    async fn balance_of(&self, account: Address) -> Result<U256, BlockchainError> {
        self.contract
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| BlockchainError::rpc("token balance", e))
    }
}

/// Submits `depositStake` through a wallet-enabled provider.
pub struct EvmStakeTransactor {
    contract: StakingToken::StakingTokenInstance<BlockchainProvider>,
}

impl EvmStakeTransactor {
    /// Bind the transactor to the stake contract at `address`.
    pub fn resolve(provider: BlockchainProvider, address: &str) -> Result<Self, BlockchainError> {
        let contract_address: Address =
            address
                .parse()
                .map_err(|_| BlockchainError::ContractResolution {
                    address: address.to_string(),
                    reason: "not a valid EVM address",
                })?;

        Ok(Self {
            contract: StakingToken::new(contract_address, provider),
        })
    }
}

#[async_trait]
impl ContractTransactor for EvmStakeTransactor {
    async fn deposit_stake(
        &self,
        authorization: &TransactionAuthorization,
    ) -> Result<SubmissionResult, BlockchainError> {
        self.contract
            .depositStake()
            .nonce(authorization.nonce)
            .value(authorization.value)
            .gas(authorization.gas_limit)
            .gas_price(authorization.gas_price)
            .send()
            .await
            .map(|pending_tx| SubmissionResult::new(*pending_tx.tx_hash()))
            .map_err(BlockchainError::submission)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
