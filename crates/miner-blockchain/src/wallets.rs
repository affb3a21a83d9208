use alloy::{
    network::EthereumWallet,
    signers::local::{LocalSignerError, PrivateKeySigner},
};

use crate::error::BlockchainError;

/// Parse raw private-key material (hex, `0x` prefix optional) into a signer.
///
/// The error reports only the input length so key material never reaches logs.
pub fn signer_from_private_key(private_key: &str) -> Result<PrivateKeySigner, BlockchainError> {
    private_key
        .parse()
        .map_err(|e: LocalSignerError| BlockchainError::KeyDerivation {
            key_length: private_key.len(),
            source: e,
        })
}

pub fn wallet_from_private_key(private_key: &str) -> Result<EthereumWallet, BlockchainError> {
    Ok(EthereumWallet::from(signer_from_private_key(private_key)?))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const SAMPLE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn derives_address_from_private_key() {
        let signer = signer_from_private_key(SAMPLE_KEY).unwrap();
        assert_eq!(
            signer.address().to_checksum(None),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn accepts_prefixed_key_material() {
        let bare = signer_from_private_key(SAMPLE_KEY).unwrap();
        let prefixed = signer_from_private_key(&format!("0x{SAMPLE_KEY}")).unwrap();
        assert_eq!(bare.address(), prefixed.address());
    }

    #[test]
    fn rejects_malformed_key_material() {
        let result = signer_from_private_key("not-a-key");
        assert!(matches!(
            result,
            Err(BlockchainError::KeyDerivation { key_length: 9, .. })
        ));
    }
}
