use std::path::Path;

use figment::{
    Figment,
    providers::{Format, Toml},
};

use super::{Config, ConfigError, ConfigRaw};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Load and resolve the node configuration.
///
/// Reads `config.toml` from the working directory unless a custom path is
/// given. Runs before the logger is initialized, so failures are reported by
/// the caller rather than logged here.
pub(crate) fn load_configuration(custom_config_path: Option<&str>) -> Result<Config, ConfigError> {
    let config_path = custom_config_path.unwrap_or(DEFAULT_CONFIG_PATH);

    if !Path::new(config_path).exists() {
        return Err(ConfigError::MissingConfig(config_path.to_string()));
    }

    let mut raw: ConfigRaw = Figment::from(Toml::file(config_path))
        .extract()
        .map_err(Box::new)?;

    // Secrets may live in the environment instead of the config file.
    if raw.blockchain.wallet_private_key.is_none() {
        raw.blockchain.wallet_private_key =
            std::env::var(miner_blockchain::WALLET_PRIVATE_KEY_ENV).ok();
    }

    raw.resolve()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const SAMPLE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    const SAMPLE_CONFIG: &str = r#"
[blockchain]
rpc_endpoints = ["http://localhost:8545"]
wallet_private_key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
stake_contract_address = "0x0000000000000000000000000000000000000002"
"#;

    const SAMPLE_CONFIG_WITHOUT_KEY: &str = r#"
[blockchain]
rpc_endpoints = ["http://localhost:8545"]
stake_contract_address = "0x0000000000000000000000000000000000000002"
"#;

    fn write_config(dir: &TempDir, contents: &str) -> String {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write config");
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn load_fails_for_missing_file() {
        let result = load_configuration(Some("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::MissingConfig(_))));
    }

    #[test]
    fn load_resolves_sample_config_with_logger_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, SAMPLE_CONFIG);

        let config = load_configuration(Some(&path)).unwrap();
        assert_eq!(
            config.blockchain.rpc_endpoints()[0],
            "http://localhost:8545"
        );
        assert_eq!(config.logger.level, "info");
    }

    #[test]
    fn load_reads_wallet_key_from_environment() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, SAMPLE_CONFIG_WITHOUT_KEY);

        std::env::set_var(miner_blockchain::WALLET_PRIVATE_KEY_ENV, SAMPLE_KEY);
        let config = load_configuration(Some(&path)).unwrap();
        std::env::remove_var(miner_blockchain::WALLET_PRIVATE_KEY_ENV);

        assert_eq!(
            config.blockchain.wallet_address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let dir = TempDir::new().expect("temp dir");
        let contents = format!("{SAMPLE_CONFIG}\n[extra]\nx = 1\n");
        let path = write_config(&dir, &contents);

        let result = load_configuration(Some(&path));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
