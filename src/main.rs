use std::process;
use std::sync::Arc;

use placecrawler::api::DynAPI;
use placecrawler::config::Config;
use placecrawler::db::{PgStore, Store};
use placecrawler::engine::Engine;
use placecrawler::error::Error;
use placecrawler::external::GoogleMaps;
use placecrawler::server::serve;

#[tokio::main]
async fn main() {
    // loads .env, which may set RUST_LOG
    let config = Config::from_env();
    placecrawler::logging::init();

    let result = match config {
        Ok(config) => run(config).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        tracing::error!(code = err.code, "failed to start server: {}", err);
        process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let store = PgStore::new(&config.database);
    store.ensure_schema().await?;

    let source = GoogleMaps::new(config.google_maps.clone());
    let api = Arc::new(Engine::new(Arc::new(store), Arc::new(source))) as DynAPI;

    serve(api, config.server.addr(), shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}
