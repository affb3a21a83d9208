use std::num::NonZeroUsize;

use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::client::RpcClient,
    transports::{
        BoxTransport, IntoBoxTransport,
        http::{Http, reqwest::Url},
        layers::FallbackLayer,
    },
};
use tower::ServiceBuilder;

use crate::{config::ChainConfig, error::BlockchainError, wallets::wallet_from_private_key};

/// Erased provider shared by the ledger and the contract handles.
pub type BlockchainProvider = DynProvider<Ethereum>;

/// Creates a wallet-enabled provider over the given HTTP RPC endpoints.
///
/// Invalid endpoints are skipped with a warning; the remaining ones form a
/// failover chain queried one at a time.
pub async fn initialize_provider_with_wallet(
    rpc_endpoints: &[String],
    wallet: EthereumWallet,
) -> Result<BlockchainProvider, BlockchainError> {
    let mut transports: Vec<BoxTransport> = Vec::new();
    let mut valid_endpoints = Vec::new();

    for endpoint in rpc_endpoints {
        match endpoint.parse::<Url>() {
            Ok(url) => {
                transports.push(Http::new(url).into_box_transport());
                valid_endpoints.push(endpoint.clone());
                tracing::debug!("RPC endpoint added: {}", endpoint);
            }
            Err(e) => {
                tracing::warn!("Invalid RPC URL '{}': {}", endpoint, e);
            }
        }
    }

    if transports.is_empty() {
        return Err(BlockchainError::RpcConnectionFailed {
            attempts: rpc_endpoints.len(),
        });
    }

    // One active transport at a time: pure failover, no parallel queries.
    let fallback_layer = FallbackLayer::default().with_active_transport_count(NonZeroUsize::MIN);
    let transport = ServiceBuilder::new()
        .layer(fallback_layer)
        .service(transports);
    let client = RpcClient::builder().transport(transport, false);

    let provider = ProviderBuilder::new().wallet(wallet).connect_client(client);

    // Probe connectivity before handing the provider out.
    match provider.get_block_number().await {
        Ok(block) => {
            tracing::info!(
                "Ledger provider initialized with {} RPC endpoint(s) (block: {}): {:?}",
                valid_endpoints.len(),
                block,
                valid_endpoints
            );
            Ok(provider.erased())
        }
        Err(e) => {
            tracing::error!("All RPC endpoints failed connectivity check: {}", e);
            Err(BlockchainError::RpcConnectionFailed {
                attempts: valid_endpoints.len(),
            })
        }
    }
}

/// Creates a provider signing with the configured wallet key.
pub async fn initialize_provider(
    config: &ChainConfig,
) -> Result<BlockchainProvider, BlockchainError> {
    let wallet = wallet_from_private_key(config.wallet_private_key())?;

    initialize_provider_with_wallet(config.rpc_endpoints(), wallet).await
}
