//! Ranking Feature Pipeline - Main Entry Point

use std::sync::Arc;

use api::{demo, init_logging, run_server, AppState, ServiceConfig};
use ranking_transformer::RankingTransformer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Ranking Feature Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let config = ServiceConfig::from_env()?;

    // Development deployment: seeded in-memory services stand in for the
    // managed feature store, vector index and model registry.
    let backends = demo::seeded_backends(&config)?;
    let transformer = RankingTransformer::connect(
        backends.store,
        backends.index,
        backends.registry,
        config.transformer(),
    )
    .await?;

    let state = Arc::new(AppState::new(transformer));
    run_server(&config.listen_addr, state).await?;

    Ok(())
}
