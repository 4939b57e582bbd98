mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;

use crate::app::App;
use crate::cli::{StorageBackendArg, CLI};
use crate::state::AppState;
use clap::Parser;
use snipshare_core::ShareStore;
use snipshare_registry::{spawn_sweeper, RandomAllocator, ShareRegistry};
use snipshare_storage::{InMemoryRepository, MySqlRepository};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        sweep_interval = %config.sweep_interval,
        "starting snippet gateway"
    );

    let store: Arc<dyn ShareStore> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(ShareRegistry::new(
            InMemoryRepository::new(),
            RandomAllocator::new(),
        )),
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .ok_or("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(&mysql_dsn).await?;
            Arc::new(ShareRegistry::new(repository, RandomAllocator::new()))
        }
    };

    spawn_sweeper(Arc::clone(&store), config.sweep_interval.try_into()?);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(AppState::new(store))).await?;

    Ok(())
}
