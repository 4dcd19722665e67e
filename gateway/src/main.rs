use blobgate::api::{router, AppState};
use blobgate::config::Config;
use blobgate::storage::Storage;
use clap::Parser;
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::parse();
    info!("starting with {:?} backend", config.backend);

    let storage = Storage::from_config(&config).await?;
    let state = Arc::new(AppState { storage });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {addr}");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
