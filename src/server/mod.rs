mod handlers;

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::DynAPI;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{crawl, places, root};

pub fn app(api: DynAPI) -> Router {
    Router::new()
        .route("/", get(root::index))
        .route("/crawl", post(crawl::create))
        .route("/places", get(places::list))
        .layer(Extension(api))
}

/// Serves until `shutdown` resolves, then lets in-flight requests finish.
pub async fn serve<F>(api: DynAPI, addr: SocketAddr, shutdown: F) -> Result<(), Error>
where
    F: Future<Output = ()>,
{
    let server = axum::Server::try_bind(&addr)
        .map_err(|err| unexpected_error(format!("could not bind {}: {}", addr, err)))?;

    tracing::info!("listening on {}", addr);

    server
        .serve(app(api).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| unexpected_error(format!("server error: {}", err)))
}
