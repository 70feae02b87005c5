//! station-api binary: configuration, store gateway and HTTP server wiring.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use station_api::config::{Cli, Config};
use station_api::store::AtlasStore;
use station_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting station-api v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;
    info!(
        store = %config.store.base_url,
        database = %config.store.database,
        data_source = %config.store.data_source,
        "record store configured"
    );

    let store = AtlasStore::new(config.store.clone())?;
    let state = AppState::new(Arc::new(store), config.tokens.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("station-api listening on http://{}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
