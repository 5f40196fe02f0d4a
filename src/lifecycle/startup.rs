//! Startup orchestration.
//!
//! Order: metrics → wallet → RPC client → donation service → listener.
//! Any startup error is fatal.

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::blockchain::{BlockchainClient, TxBuilder, Wallet};
use crate::config::SupportConfig;
use crate::donation::{ChainBackend, DonationService, NetworkRegistry};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Build every subsystem from `config` and serve until a signal arrives.
pub async fn run(config: SupportConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let wallet = Wallet::from_env(config.blockchain.chain_id)?;
    let client = BlockchainClient::new(config.blockchain.clone(), Some(&wallet)).await?;
    let backend = ChainBackend::new(TxBuilder::new(client, wallet), &config.donation);

    let networks = NetworkRegistry::from_config(&config.networks);
    if networks.resolve(config.blockchain.chain_id).is_none() {
        tracing::warn!(
            chain_id = config.blockchain.chain_id,
            "No donation contract for this chain, donations are disabled"
        );
    }

    let shutdown = Arc::new(Shutdown::new());
    let service = DonationService::new(backend, networks, config.donation.clone(), shutdown.clone());

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    HttpServer::new(&config, service)
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
