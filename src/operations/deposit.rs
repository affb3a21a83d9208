use std::sync::Arc;

use miner_blockchain::{
    B256, BlockchainError, ContractTransactor, DepositPolicy, LedgerClient,
    TransactionAuthorization, U256, signer_from_private_key,
};

/// Terminal state of a deposit attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DepositOutcome {
    /// The ledger accepted the transaction; confirmation is not awaited.
    Submitted { tx_hash: B256 },
    /// Token balance was below the staking minimum, so nothing was submitted.
    /// A fresh account with no tokens yet is an expected state, not a fault.
    SkippedInsufficientStake { token_balance: U256 },
}

/// Stake deposit operation.
///
/// Locks the account's stake tokens into the staking contract so the account
/// becomes eligible to mine. Performs an affordability check against the
/// wallet's native balance and a minimum-stake check against its token balance
/// before submitting anything.
pub(crate) struct StakeDepositOperation {
    ledger: Arc<dyn LedgerClient>,
    transactor: Arc<dyn ContractTransactor>,
    wallet_private_key: String,
    stake_contract_address: String,
    policy: DepositPolicy,
}

impl StakeDepositOperation {
    pub(crate) fn new(
        ledger: Arc<dyn LedgerClient>,
        transactor: Arc<dyn ContractTransactor>,
        wallet_private_key: impl Into<String>,
        stake_contract_address: impl Into<String>,
    ) -> Self {
        Self {
            ledger,
            transactor,
            wallet_private_key: wallet_private_key.into(),
            stake_contract_address: stake_contract_address.into(),
            policy: DepositPolicy::default(),
        }
    }

    /// Override the default deposit policy.
    #[cfg(test)]
    pub(crate) fn with_policy(mut self, policy: DepositPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the deposit pipeline once.
    ///
    /// Submits at most one transaction and returns as soon as the ledger
    /// accepts it. Dropping the returned future cancels the operation; nothing
    /// is submitted after the affordability or minimum-stake checks abort.
    pub(crate) async fn run(&self) -> Result<DepositOutcome, BlockchainError> {
        let signer = match signer_from_private_key(&self.wallet_private_key) {
            Ok(signer) => signer,
            Err(error) => {
                tracing::error!("Failed to derive account from configured private key: {}", error);
                return Err(error);
            }
        };
        let account = signer.address();

        let nonce = match self.ledger.pending_nonce_at(account).await {
            Ok(nonce) => nonce,
            Err(error) => {
                tracing::error!("Failed to get pending nonce: {}", error);
                return Err(error);
            }
        };

        let gas_price = match self.ledger.suggest_gas_price().await {
            Ok(gas_price) => gas_price,
            Err(error) => {
                tracing::error!("Failed to get gas price: {}", error);
                return Err(error);
            }
        };

        let balance = match self.ledger.balance_at(account).await {
            Ok(balance) => balance,
            Err(error) => {
                tracing::error!("Failed to get native balance: {}", error);
                return Err(error);
            }
        };

        // Widen before multiplying; a gas price in wei times a gas limit can
        // exceed u128.
        let cost = U256::from(gas_price) * U256::from(self.policy.affordability_gas_limit);
        if balance < cost {
            tracing::error!(%balance, %cost, "Insufficient funds to cover deposit gas");
            return Err(BlockchainError::InsufficientFunds { balance, cost });
        }

        let authorization = TransactionAuthorization {
            nonce,
            value: U256::ZERO,
            gas_limit: self.policy.submission_gas_limit,
            gas_price,
        };

        let stake_token = match self.ledger.stake_token_at(&self.stake_contract_address).await {
            Ok(stake_token) => stake_token,
            Err(error) => {
                tracing::error!("Failed to resolve stake contract: {}", error);
                return Err(error);
            }
        };

        let token_balance = match stake_token.balance_of(account).await {
            Ok(token_balance) => token_balance,
            Err(error) => {
                tracing::error!("Failed to get token balance: {}", error);
                return Err(error);
            }
        };
        tracing::info!(%token_balance, "Stake token balance");

        if token_balance < self.policy.minimum_stake_balance {
            tracing::warn!(
                %token_balance,
                minimum = %self.policy.minimum_stake_balance,
                "Insufficient token balance; skipping deposit"
            );
            return Ok(DepositOutcome::SkippedInsufficientStake { token_balance });
        }

        let result = match self.transactor.deposit_stake(&authorization).await {
            Ok(result) => result,
            Err(error) => {
                tracing::error!("Could not deposit stake: {}", error);
                return Err(error);
            }
        };

        tracing::info!("Deposit transaction sent: {}", result.tx_hash());
        Ok(DepositOutcome::Submitted {
            tx_hash: result.tx_hash(),
        })
    }
}
