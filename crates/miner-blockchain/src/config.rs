use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{config_error::ConfigError, wallets::signer_from_private_key};

/// Environment variable consulted when the wallet key is absent from the
/// config file. Resolution happens at config load time.
pub const WALLET_PRIVATE_KEY_ENV: &str = "MINER_WALLET_PRIVATE_KEY";

/// Configuration for the ledger connection and the staking wallet.
///
/// **Secret handling**: the wallet private key should be provided via the
/// `MINER_WALLET_PRIVATE_KEY` environment variable or the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfigRaw {
    /// RPC endpoints for EVM JSON-RPC calls.
    /// Multiple endpoints enable fallback if the primary fails.
    #[serde(default)]
    pub rpc_endpoints: Vec<String>,

    /// Private key for the wallet submitting the stake deposit.
    /// Set via MINER_WALLET_PRIVATE_KEY env var or config file.
    pub wallet_private_key: Option<String>,

    /// Address of the wallet (20-byte EVM address).
    /// If omitted, it is derived from the private key.
    pub wallet_address: Option<String>,

    /// Address of the deployed staking-token contract.
    /// Checked against deployed code when the deposit pipeline resolves it.
    pub stake_contract_address: String,
}

impl ChainConfigRaw {
    /// Ensures at least one RPC endpoint is configured.
    pub fn ensure_rpc_endpoints(&self) -> Result<(), ConfigError> {
        if self.rpc_endpoints.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "rpc_endpoints must include at least one endpoint".to_string(),
            ));
        }
        Ok(())
    }

    /// Ensures the wallet private key is set.
    pub fn ensure_wallet_private_key(&self) -> Result<(), ConfigError> {
        if self.wallet_private_key.is_none() {
            return Err(ConfigError::MissingSecret(format!(
                "{WALLET_PRIVATE_KEY_ENV} env var or wallet_private_key config required"
            )));
        }
        Ok(())
    }

    pub fn resolve(self) -> Result<ChainConfig, ConfigError> {
        let config = self;
        config.ensure_rpc_endpoints()?;
        config.ensure_wallet_private_key()?;

        let wallet_key = config
            .wallet_private_key
            .clone()
            .expect("wallet private key ensured");
        let derived_address = derive_wallet_address(&wallet_key)?;

        let wallet_address = match config.wallet_address.as_deref() {
            Some(address) => {
                let parsed = parse_evm_address(address)?;
                if parsed != derived_address {
                    return Err(ConfigError::InvalidConfig(format!(
                        "wallet_address does not match the address derived from the private key: provided={}, derived={}",
                        address, derived_address
                    )));
                }
                derived_address.to_checksum(None)
            }
            None => derived_address.to_checksum(None),
        };

        Ok(ChainConfig {
            rpc_endpoints: config.rpc_endpoints,
            wallet_private_key: wallet_key,
            wallet_address,
            stake_contract_address: config.stake_contract_address,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    rpc_endpoints: Vec<String>,
    wallet_private_key: String,
    wallet_address: String,
    stake_contract_address: String,
}

impl ChainConfig {
    pub fn rpc_endpoints(&self) -> &[String] {
        &self.rpc_endpoints
    }

    pub fn wallet_private_key(&self) -> &str {
        &self.wallet_private_key
    }

    /// Checksummed address derived from (and verified against) the configured key.
    pub fn wallet_address(&self) -> &str {
        &self.wallet_address
    }

    pub fn stake_contract_address(&self) -> &str {
        &self.stake_contract_address
    }
}

fn parse_evm_address(value: &str) -> Result<Address, ConfigError> {
    value
        .parse::<Address>()
        .map_err(|e| ConfigError::InvalidConfig(format!("invalid EVM address '{}': {}", value, e)))
}

fn derive_wallet_address(private_key: &str) -> Result<Address, ConfigError> {
    let signer = signer_from_private_key(private_key)
        .map_err(|e| ConfigError::InvalidConfig(format!("invalid EVM private key: {}", e)))?;
    Ok(signer.address())
}
