use miner_blockchain::{ChainConfig, ChainConfigRaw};
use serde::{Deserialize, Serialize};

use crate::{config::ConfigError, logger::LoggerConfig};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigRaw {
    pub blockchain: ChainConfigRaw,
    #[serde(default)]
    pub logger: LoggerConfig,
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub blockchain: ChainConfig,
    pub logger: LoggerConfig,
}

impl ConfigRaw {
    pub(crate) fn resolve(self) -> Result<Config, ConfigError> {
        Ok(Config {
            blockchain: self.blockchain.resolve()?,
            logger: self.logger,
        })
    }
}
