//! Support box server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser widget / support-cli
//!            │  JSON over HTTP
//!            ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │ http (axum)  profile · networks · balance · quote · donate │
//!   └──────────────────────────┬───────────────────────────────┘
//!                              ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │ donation::DonationService                                │
//!   │   amount check → quote → confirm → submit → wait → classify │
//!   └──────────────────────────┬───────────────────────────────┘
//!                              ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │ blockchain  wallet (env key) · RPC client · tx builder    │
//!   └──────────────────────────┬───────────────────────────────┘
//!                              ▼
//!                      EVM JSON-RPC node
//! ```

use clap::Parser;
use std::path::PathBuf;

use support_box::config::{load_config, SupportConfig};
use support_box::lifecycle::startup;
use support_box::observability::init_logging;

#[derive(Parser)]
#[command(name = "support-box")]
#[command(about = "Portfolio profile and donation widget backend", long_about = None)]
struct Args {
    /// Path to a TOML config file; built-in defaults otherwise.
    #[arg(short, long, env = "SUPPORT_BOX_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SupportConfig::default(),
    };

    init_logging(&config.observability);
    tracing::info!("support-box v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?args.config,
        bind_address = %config.server.bind_address,
        chain_id = config.blockchain.chain_id,
        networks = config.networks.len(),
        "Configuration loaded"
    );

    startup::run(config).await
}
