//! Creates the places table and index, then exits.

use std::process;

use placecrawler::config::Config;
use placecrawler::db::{PgStore, Store};

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    placecrawler::logging::init();

    let result = match config {
        Ok(config) => PgStore::new(&config.database).ensure_schema().await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => tracing::info!("database initialization complete"),
        Err(err) => {
            tracing::error!("failed to initialize database: {}", err);
            process::exit(1);
        }
    }
}
